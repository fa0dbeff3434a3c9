//! Title/subtitle splitting and recombination.

use crate::fields::FieldStore;

/// Split `value` into title and subtitle on the first `": "` or `"? "`
/// (the question mark stays with the title) and store the pieces.
///
/// Tags starting with `SHORT` store a `SHORTTITLE` and never a subtitle.
pub fn process_title(out: &mut FieldStore, tag: &str, value: &str, level: i32, nosplit: bool) {
    // a colon split wins over a question-mark split
    let split = if nosplit {
        None
    } else if let Some(c) = value.find(": ") {
        Some((c, c + 2))
    } else {
        value.find("? ").map(|q| (q + 1, q + 2))
    };

    let (title, subtitle) = match split {
        Some((end, rest)) => (&value[..end], value[rest..].trim_start()),
        None => (value, ""),
    };

    if tag.get(..5).map_or(false, |h| h.eq_ignore_ascii_case("SHORT")) {
        if !title.is_empty() {
            out.add("SHORTTITLE", title, level);
        }
        // no short subtitle
    } else {
        if !title.is_empty() {
            out.add("TITLE", title, level);
        }
        if !subtitle.is_empty() {
            out.add("SUBTITLE", subtitle, level);
        }
    }
}

/// Join a main title and optional subtitle back into a full title.
///
/// A `": "` separates the pieces unless the main title already ends in
/// `?` or `:`, in which case a plain space is enough.
pub fn combine_title(main: Option<&str>, sub: Option<&str>) -> String {
    let Some(main) = main else {
        return String::new();
    };
    let mut full = main.to_string();
    if let Some(sub) = sub {
        if !main.is_empty() {
            if main.ends_with('?') || main.ends_with(':') {
                full.push(' ');
            } else {
                full.push_str(": ");
            }
        }
        full.push_str(sub);
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};
    use pretty_assertions::assert_eq;

    #[test]
    fn colon_split() {
        let mut f = FieldStore::new();
        process_title(&mut f, "TITLE", "A Study: Methods and Results", LEVEL_MAIN, false);
        assert_eq!(f.value_of("TITLE", LEVEL_MAIN), Some("A Study"));
        assert_eq!(f.value_of("SUBTITLE", LEVEL_MAIN), Some("Methods and Results"));
    }

    #[test]
    fn question_mark_stays_with_title() {
        let mut f = FieldStore::new();
        process_title(&mut f, "TITLE", "Good Team Player? Personality and Teams", LEVEL_MAIN, false);
        assert_eq!(f.value_of("TITLE", LEVEL_MAIN), Some("Good Team Player?"));
        assert_eq!(f.value_of("SUBTITLE", LEVEL_MAIN), Some("Personality and Teams"));
    }

    #[test]
    fn nosplit_keeps_whole_title() {
        let mut f = FieldStore::new();
        process_title(&mut f, "TITLE", "A Study: Methods", LEVEL_MAIN, true);
        assert_eq!(f.value_of("TITLE", LEVEL_MAIN), Some("A Study: Methods"));
        assert_eq!(f.find("SUBTITLE", LEVEL_ANY), None);
    }

    #[test]
    fn short_titles_never_get_subtitles() {
        let mut f = FieldStore::new();
        process_title(&mut f, "SHORTTITLE", "Short: Rest", LEVEL_MAIN, false);
        assert_eq!(f.value_of("SHORTTITLE", LEVEL_MAIN), Some("Short"));
        assert_eq!(f.find("SUBTITLE", LEVEL_ANY), None);
        assert_eq!(f.find("SHORTSUBTITLE", LEVEL_ANY), None);
    }

    #[test]
    fn combine_restores_separator() {
        assert_eq!(combine_title(Some("A Study"), Some("Methods")), "A Study: Methods");
        assert_eq!(combine_title(Some("Why?"), Some("Answers")), "Why? Answers");
        assert_eq!(combine_title(Some("Alone"), None), "Alone");
        assert_eq!(combine_title(None, Some("orphan")), "");
    }
}
