/// Word-wrap `text` to rows of at most `width` characters.
///
/// Breaks at spaces and consumes the space at the break, so rows never start
/// with one. Words longer than `width` are hard-broken. Explicit newlines are
/// kept as row breaks.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        let mut pos = 0;
        while pos < chars.len() {
            let rest = &chars[pos..];
            if rest.len() <= width {
                rows.push(rest.iter().collect());
                break;
            }
            let (take, advance) = match rest[..=width].iter().rposition(|&c| c == ' ') {
                Some(0) | None => (width, width),
                Some(sp) => (sp, sp + 1),
            };
            rows.push(rest[..take].iter().collect::<String>().trim_end().to_string());
            pos += advance;
            while pos < chars.len() && chars[pos] == ' ' {
                pos += 1;
            }
        }
    }
    rows
}

/// Left edge that centres `len` columns in `extent`.
pub fn centered(extent: u16, len: usize) -> u16 {
    extent.saturating_sub(len.min(usize::from(u16::MAX)) as u16) / 2
}
