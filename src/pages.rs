//! Page-range handling.

use crate::fields::FieldStore;

/// Split a raw page specification into `PAGES:START` / `PAGES:STOP`.
///
/// Accepts `12`, `12-34`, `12--34`, and en/em dash separators. Anything
/// without a separator is a bare start page.
pub fn add_pages(out: &mut FieldStore, value: &str, level: i32) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    let seps: &[char] = &['-', '\u{2013}', '\u{2014}'];
    let (start, stop) = match value.find(seps) {
        // a leading dash is part of the number, not a range separator
        Some(0) | None => (value, ""),
        Some(i) => {
            let start = &value[..i];
            let rest = value[i..].trim_start_matches(seps);
            (start, rest)
        }
    };

    let start = start.trim();
    let stop = stop.trim();
    if !start.is_empty() {
        out.add("PAGES:START", start, level);
    }
    if !stop.is_empty() {
        out.add("PAGES:STOP", stop, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::LEVEL_MAIN;
    use pretty_assertions::assert_eq;

    fn pages(v: &str) -> (Option<String>, Option<String>) {
        let mut f = FieldStore::new();
        add_pages(&mut f, v, LEVEL_MAIN);
        (
            f.value_of("PAGES:START", LEVEL_MAIN).map(str::to_string),
            f.value_of("PAGES:STOP", LEVEL_MAIN).map(str::to_string),
        )
    }

    #[test]
    fn double_dash_range() {
        assert_eq!(pages("34--56"), (Some("34".into()), Some("56".into())));
    }

    #[test]
    fn single_dash_range() {
        assert_eq!(pages("100-110"), (Some("100".into()), Some("110".into())));
    }

    #[test]
    fn en_dash_range() {
        assert_eq!(pages("100\u{2013}110"), (Some("100".into()), Some("110".into())));
    }

    #[test]
    fn bare_page() {
        assert_eq!(pages(" 42 "), (Some("42".into()), None));
    }

    #[test]
    fn open_range() {
        assert_eq!(pages("42-"), (Some("42".into()), None));
    }
}
