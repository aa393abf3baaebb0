use crate::frontend::parser::ParserError;

/// Renders a frontend error followed by the offending source line and a
/// caret under the reported column.
pub fn render(err: &ParserError, source: &str) -> String {
    let span = err.span();

    let line_text = source
        .lines()
        .nth(span.line.saturating_sub(1))
        .unwrap_or("");

    format!(
        "error: {}\n  {}\n  {}^",
        err,
        line_text,
        " ".repeat(span.column.saturating_sub(1))
    )
}
