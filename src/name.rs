//! Personal-name parsing into the canonical pipe-separated form
//! `Family|Given|Given||Suffix`, and re-assembly for tag-style writers.
//!
//! User-supplied asis/corps lists short-circuit tokenization: an exact
//! match is stored verbatim under `TAG:ASIS` or `TAG:CORP`.

use crate::fields::FieldStore;

/// Lowercase particles that belong to the family name ("Ludwig van
/// Beethoven", "Charles de la Vallée Poussin").
static PARTICLES: &[&str] = &[
    "al", "da", "de", "del", "della", "den", "der", "di", "dos", "du", "la", "le", "ter", "van",
    "von", "zu",
];

fn is_particle(token: &str) -> bool {
    PARTICLES.iter().any(|p| *p == token)
}

/// Does this token spell "et al." in one of its dress-ups?
pub fn is_etal(token: &str) -> bool {
    let t = token.trim();
    t.eq_ignore_ascii_case("et al")
        || t.eq_ignore_ascii_case("et al.")
        || t.eq_ignore_ascii_case("et. al.")
        || t.eq_ignore_ascii_case("et.al.")
}

/// Number of trailing tokens in `tokens` that spell "et al.".
pub fn count_etal(tokens: &[String]) -> usize {
    let n = tokens.len();
    if n >= 2 && tokens[n - 2].eq_ignore_ascii_case("et") {
        let last = tokens[n - 1].trim_end_matches('.');
        if last.eq_ignore_ascii_case("al") {
            return 2;
        }
    }
    if n >= 1 && is_etal(&tokens[n - 1]) {
        return 1;
    }
    0
}

/// Parse one raw personal name into canonical form.
///
/// Handles `Family, Given`, `Family, Suffix, Given`, and `Given Family`
/// orderings. A name already in canonical form comes back unchanged.
pub fn parse_name(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains('|') || raw.is_empty() {
        return raw.to_string();
    }

    let segments: Vec<&str> = raw.split(',').map(str::trim).collect();

    let (family, suffix, givens): (String, Option<&str>, Vec<&str>) = match segments.len() {
        1 => {
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if tokens.len() == 1 {
                return tokens[0].to_string();
            }
            // family is the last token plus any run of particles before it
            let mut start = tokens.len() - 1;
            while start > 0 && is_particle(tokens[start - 1]) {
                start -= 1;
            }
            // a name that is nothing but particles keeps its last token
            if start == 0 {
                start = tokens.len() - 1;
            }
            (
                tokens[start..].join(" "),
                None,
                tokens[..start].to_vec(),
            )
        }
        2 => (
            segments[0].to_string(),
            None,
            segments[1].split_whitespace().collect(),
        ),
        _ => (
            segments[0].to_string(),
            Some(segments[1]),
            segments[2..]
                .iter()
                .flat_map(|s| s.split_whitespace())
                .collect(),
        ),
    };

    let mut out = family;
    for g in &givens {
        out.push('|');
        out.push_str(g);
    }
    if let Some(sfx) = suffix {
        if !sfx.is_empty() {
            out.push_str("||");
            out.push_str(sfx);
        }
    }
    out
}

/// Canonical form back to `Family, Given Given, Suffix`.
pub fn build_withcomma(canonical: &str) -> String {
    let mut parts = canonical.split('|');
    let family = parts.next().unwrap_or("");
    let mut givens = Vec::new();
    let mut suffix = None;
    let mut saw_break = false;
    for p in parts {
        if p.is_empty() {
            saw_break = true;
            continue;
        }
        if saw_break {
            suffix = Some(p);
        } else {
            givens.push(p);
        }
    }

    let mut out = family.to_string();
    if !givens.is_empty() {
        out.push_str(", ");
        out.push_str(&givens.join(" "));
    }
    if let Some(sfx) = suffix {
        out.push_str(", ");
        out.push_str(sfx);
    }
    out
}

/// Store one name, consulting the asis/corps override lists first.
pub fn add_name(
    out: &mut FieldStore,
    tag: &str,
    raw: &str,
    level: i32,
    asis: &[String],
    corps: &[String],
) {
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    if asis.iter().any(|n| n == raw) {
        out.add_with_suffix(tag, ":ASIS", raw, level, crate::fields::Dup::Suppress);
        return;
    }
    if corps.iter().any(|n| n == raw) {
        out.add_with_suffix(tag, ":CORP", raw, level, crate::fields::Dup::Suppress);
        return;
    }
    out.add(tag, &parse_name(raw), level);
}

/// Store a name that must not be tokenized (single-token names, the
/// literal "et al.").
pub fn add_single_element(out: &mut FieldStore, tag: &str, name: &str, level: i32, corp: bool) {
    if corp {
        out.add_with_suffix(tag, ":CORP", name, level, crate::fields::Dup::Suppress);
    } else {
        out.add(tag, name, level);
    }
}

/// Split a multi-name value on the word "and" and store each name;
/// trailing "et al." is stripped and re-added literally.
pub fn add_names_split_on_and(
    out: &mut FieldStore,
    tag: &str,
    value: &str,
    level: i32,
    asis: &[String],
    corps: &[String],
) {
    let tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    let etal = count_etal(&tokens);
    let tokens = &tokens[..tokens.len() - etal];

    let mut begin = 0;
    while begin < tokens.len() {
        let mut end = begin;
        while end < tokens.len() && !tokens[end].eq_ignore_ascii_case("and") {
            end += 1;
        }
        if end > begin {
            let name = tokens[begin..end].join(" ");
            add_name(out, tag, &name, level, asis, corps);
        }
        begin = end + 1;
        // tolerate doubled "and"s
        while begin < tokens.len() && tokens[begin].eq_ignore_ascii_case("and") {
            begin += 1;
        }
    }

    if etal > 0 {
        add_single_element(out, tag, "et al.", level, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};
    use pretty_assertions::assert_eq;

    #[test]
    fn first_last_ordering() {
        assert_eq!(parse_name("John Q. Smith"), "Smith|John|Q.");
        assert_eq!(parse_name("Jane Doe"), "Doe|Jane");
    }

    #[test]
    fn comma_ordering() {
        assert_eq!(parse_name("Smith, John Q."), "Smith|John|Q.");
        assert_eq!(parse_name("de la Vallée Poussin, Charles"), "de la Vallée Poussin|Charles");
    }

    #[test]
    fn particles_join_the_family() {
        assert_eq!(parse_name("Ludwig van Beethoven"), "van Beethoven|Ludwig");
        assert_eq!(parse_name("Charles de la Vallée"), "de la Vallée|Charles");
    }

    #[test]
    fn suffix_between_commas() {
        assert_eq!(parse_name("Smith, Jr., John"), "Smith|John||Jr.");
    }

    #[test]
    fn single_token_names() {
        assert_eq!(parse_name("Aristotle"), "Aristotle");
    }

    #[test]
    fn canonical_input_is_stable() {
        for name in ["Smith|John|Q.", "Doe|Jane", "Smith|John||Jr."] {
            assert_eq!(parse_name(name), name);
        }
    }

    #[test]
    fn withcomma_round_trip() {
        assert_eq!(build_withcomma("Smith|John|Q."), "Smith, John Q.");
        assert_eq!(build_withcomma("Aristotle"), "Aristotle");
        assert_eq!(build_withcomma("Smith|John||Jr."), "Smith, John, Jr.");
        assert_eq!(build_withcomma("et al."), "et al.");
    }

    #[test]
    fn overrides_bypass_tokenization() {
        let asis = vec!["The Beatles".to_string()];
        let corps = vec!["IBM Research".to_string()];
        let mut f = FieldStore::new();
        add_name(&mut f, "AUTHOR", "The Beatles", LEVEL_MAIN, &asis, &corps);
        add_name(&mut f, "AUTHOR", "IBM Research", LEVEL_MAIN, &asis, &corps);
        add_name(&mut f, "AUTHOR", "John Smith", LEVEL_MAIN, &asis, &corps);
        assert_eq!(f.value_of("AUTHOR:ASIS", LEVEL_ANY), Some("The Beatles"));
        assert_eq!(f.value_of("AUTHOR:CORP", LEVEL_ANY), Some("IBM Research"));
        assert_eq!(f.value_of("AUTHOR", LEVEL_ANY), Some("Smith|John"));
    }

    #[test]
    fn et_al_is_stripped_and_readded() {
        let mut f = FieldStore::new();
        add_names_split_on_and(&mut f, "AUTHOR", "John Smith and Jane Doe and et al.", LEVEL_MAIN, &[], &[]);
        let values: Vec<&str> = f.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["Smith|John", "Doe|Jane", "et al."]);
    }

    #[test]
    fn doubled_and_is_tolerated() {
        let mut f = FieldStore::new();
        add_names_split_on_and(&mut f, "AUTHOR", "G. F. Author and and B. K. Author", LEVEL_MAIN, &[], &[]);
        let values: Vec<&str> = f.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["Author|G.|F.", "Author|B.|K."]);
    }
}
