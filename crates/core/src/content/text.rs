//! Line handling shared by the text-producing renderers.

/// Splits on `\n`, `\r\n` and lone `\r`. A single trailing line break does not
/// produce an extra empty line; a leading byte-order mark is dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let normalised = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalised.split(['\n', '\r']).map(str::to_string).collect();
    if normalised.ends_with(['\n', '\r']) {
        lines.pop();
    }
    lines
}

/// Removes markup a markdown-to-text pass can leave behind: heading and quote
/// markers at the start of a line, and emphasis, code and strike-through marks.
pub fn strip_residual_markup(line: &str) -> String {
    let indent_len = line.len() - line.trim_start().len();
    let (indent, rest) = line.split_at(indent_len);

    let body = if rest.starts_with(['#', '>']) {
        rest.trim_start_matches(['#', '>']).trim_start()
    } else {
        rest
    };

    let mut out = String::with_capacity(line.len());
    out.push_str(indent);
    out.extend(body.chars().filter(|c| !matches!(c, '*' | '`' | '~')));
    out
}
