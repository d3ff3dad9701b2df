pub const HEADING_MARKER: &str = "##";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseLine<'a> {
    Heading(&'a str),
    Body(&'a str),
}

/// Splits an answer into display lines. Lines starting with `##` become
/// headings with the marker removed; every line is kept, in order.
pub fn render_response(response: &str) -> Vec<ResponseLine<'_>> {
    response
        .split('\n')
        .map(|line| match line.strip_prefix(HEADING_MARKER) {
            Some(heading) => ResponseLine::Heading(heading.trim()),
            None => ResponseLine::Body(line),
        })
        .collect()
}
