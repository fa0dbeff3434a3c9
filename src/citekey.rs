//! Citation-key synthesis and batch-wide uniquification.

use crate::fields::{FieldStore, LEVEL_ANY, LEVEL_MAIN};

fn strip_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Synthesize a key from the first author's family name and the year.
/// Returns `None` when either piece is missing.
fn author_year_key(f: &FieldStore) -> Option<String> {
    let author = f
        .value_of_nouse("AUTHOR", LEVEL_MAIN)
        .or_else(|| f.value_of_firstof(&["AUTHOR", "AUTHOR:CORP", "AUTHOR:ASIS"], LEVEL_ANY))?;
    let year = f
        .value_of_nouse("DATE:YEAR", LEVEL_MAIN)
        .or_else(|| f.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY))?;

    let family = author.split('|').next().unwrap_or("");
    let mut key = strip_ws(family);
    key.push_str(&strip_ws(year));
    Some(key)
}

/// The suffix appended to the n-th member of a set of identical keys:
/// `a`..`z`, then an extra `a` is prepended for every 26 (`aa`, `ab`, …).
fn collision_suffix(mut n: usize) -> String {
    const ABC: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let mut s = String::new();
    while n >= 26 {
        s.push('a');
        n -= 26;
    }
    s.push(ABC[n] as char);
    s
}

/// Give every reference lacking a `REFNUM` a synthesized one, then rename
/// duplicate keys with letter suffixes in batch order.
pub fn uniquify(refs: &mut [FieldStore]) {
    // pass 1: synthesize keys where possible
    for f in refs.iter_mut() {
        if f.find("REFNUM", LEVEL_ANY).is_none() {
            if let Some(key) = author_year_key(f) {
                f.add("REFNUM", &key, LEVEL_MAIN);
            }
        }
    }

    // pass 2: suffix duplicate keys in order
    let keys: Vec<Option<String>> = refs
        .iter()
        .map(|f| f.value_of_nouse("REFNUM", LEVEL_ANY).map(str::to_string))
        .collect();

    let mut handled = vec![false; refs.len()];
    for i in 0..refs.len() {
        if handled[i] {
            continue;
        }
        let Some(key) = &keys[i] else { continue };
        let dups: Vec<usize> = (i..refs.len())
            .filter(|&j| keys[j].as_deref() == Some(key))
            .collect();
        if dups.len() < 2 {
            continue;
        }
        for (nsame, &j) in dups.iter().enumerate() {
            let new_key = format!("{}{}", key, collision_suffix(nsame));
            if let Some(n) = refs[j].find("REFNUM", LEVEL_ANY) {
                refs[j].set_value(n, new_key);
            }
            handled[j] = true;
        }
    }
}

/// Make sure every reference carries a `REFNUM`, falling back to
/// `ref<N>`; optionally append `_<N>` to every key.
pub fn ensure_refnums(refs: &mut [FieldStore], add_count: bool) {
    for (i, f) in refs.iter_mut().enumerate() {
        let n = match f.find("REFNUM", LEVEL_MAIN) {
            Some(n) => n,
            None => {
                let key = author_year_key(f).unwrap_or_else(|| format!("ref{}", i + 1));
                f.add("REFNUM", &key, LEVEL_MAIN);
                f.find("REFNUM", LEVEL_MAIN).unwrap()
            }
        };
        if add_count {
            let suffixed = format!("{}_{}", f.value(n), i + 1);
            f.set_value(n, suffixed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference(author: Option<&str>, year: Option<&str>, refnum: Option<&str>) -> FieldStore {
        let mut f = FieldStore::new();
        if let Some(a) = author {
            f.add("AUTHOR", a, LEVEL_MAIN);
        }
        if let Some(y) = year {
            f.add("DATE:YEAR", y, LEVEL_MAIN);
        }
        if let Some(r) = refnum {
            f.add("REFNUM", r, LEVEL_MAIN);
        }
        f
    }

    fn key(f: &FieldStore) -> String {
        f.value_of_nouse("REFNUM", LEVEL_ANY).unwrap().to_string()
    }

    #[test]
    fn synthesis_from_author_and_year() {
        let mut refs = vec![reference(Some("Doe|Jane"), Some("2020"), None)];
        uniquify(&mut refs);
        assert_eq!(key(&refs[0]), "Doe2020");
    }

    #[test]
    fn collisions_get_letter_suffixes_in_order() {
        let mut refs = vec![
            reference(Some("Doe|Jane"), Some("2020"), None),
            reference(Some("Doe|John"), Some("2020"), None),
        ];
        uniquify(&mut refs);
        assert_eq!(key(&refs[0]), "Doe2020a");
        assert_eq!(key(&refs[1]), "Doe2020b");
    }

    #[test]
    fn suffixes_pad_past_z() {
        assert_eq!(collision_suffix(0), "a");
        assert_eq!(collision_suffix(25), "z");
        assert_eq!(collision_suffix(26), "aa");
        assert_eq!(collision_suffix(27), "ab");
        assert_eq!(collision_suffix(52), "aaa");
    }

    #[test]
    fn distinct_keys_are_left_alone() {
        let mut refs = vec![
            reference(None, None, Some("Smith2001")),
            reference(None, None, Some("Doe2020")),
        ];
        uniquify(&mut refs);
        assert_eq!(key(&refs[0]), "Smith2001");
        assert_eq!(key(&refs[1]), "Doe2020");
    }

    #[test]
    fn refnum_fallback_and_count_suffix() {
        let mut refs = vec![
            reference(None, None, None),
            reference(None, None, Some("Doe2020")),
        ];
        ensure_refnums(&mut refs, false);
        assert_eq!(key(&refs[0]), "ref1");

        let mut refs = vec![reference(None, None, Some("X"))];
        ensure_refnums(&mut refs, true);
        assert_eq!(key(&refs[0]), "X_1");
    }

    #[test]
    fn whitespace_is_stripped_from_key_pieces() {
        let mut refs = vec![reference(Some("van Beethoven|Ludwig"), Some("1810 "), None)];
        uniquify(&mut refs);
        assert_eq!(key(&refs[0]), "vanBeethoven1810");
    }
}
