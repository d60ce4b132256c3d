/// Cuts `content` down to a single log-friendly line.
pub(crate) fn shorten_content(content: &str) -> String {
    let max_length = 72;
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max_length && first_line.len() == content.len() {
        first_line.to_owned()
    } else {
        first_line.chars().take(max_length).collect::<String>() + "…"
    }
}
