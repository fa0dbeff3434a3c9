//! Serial-number classification: route a raw ISBN/ISSN-ish string to the
//! right canonical tag by digit count.

use crate::fields::FieldStore;

/// Add `value` under `ISSN`, `ISBN`, `ISBN13`, or `SERIALNUMBER`.
///
/// An explicit `ISSN`/`ISBN` prefix wins; otherwise digits (with `x`/`X`
/// check characters) are counted up to the first `;` or `:` after a digit,
/// since paperback/hardback pairs are often separated that way.
pub fn add_serial_number(out: &mut FieldStore, value: &str, level: i32) {
    let head = value.get(..4).unwrap_or("");
    let prefix_issn = head.eq_ignore_ascii_case("ISSN");
    let prefix_isbn = head.eq_ignore_ascii_case("ISBN");

    let mut ndigits = 0usize;
    for c in value.chars() {
        if ndigits > 0 && (c == ';' || c == ':') {
            break;
        }
        if c.is_ascii_digit() || c == 'x' || c == 'X' {
            ndigits += 1;
        }
    }

    let tag = if prefix_issn {
        "ISSN"
    } else if prefix_isbn {
        if ndigits == 13 {
            "ISBN13"
        } else {
            "ISBN"
        }
    } else {
        match ndigits {
            8 => "ISSN",
            10 => "ISBN",
            13 => "ISBN13",
            _ => "SERIALNUMBER",
        }
    };

    out.add(tag, value, level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};

    fn classify(v: &str) -> String {
        let mut f = FieldStore::new();
        add_serial_number(&mut f, v, LEVEL_MAIN);
        f.find(
            "ISSN", LEVEL_ANY,
        )
        .map(|_| "ISSN".to_string())
        .or_else(|| f.find("ISBN13", LEVEL_ANY).map(|_| "ISBN13".to_string()))
        .or_else(|| f.find("ISBN", LEVEL_ANY).map(|_| "ISBN".to_string()))
        .or_else(|| f.find("SERIALNUMBER", LEVEL_ANY).map(|_| "SERIALNUMBER".to_string()))
        .unwrap()
    }

    #[test]
    fn digit_counting() {
        assert_eq!(classify("1234-5678"), "ISSN");
        assert_eq!(classify("0-306-40615-2"), "ISBN");
        assert_eq!(classify("978-0-306-40615-7"), "ISBN13");
        assert_eq!(classify("12345"), "SERIALNUMBER");
    }

    #[test]
    fn check_character_counts_as_digit() {
        assert_eq!(classify("0-8044-2957-X"), "ISBN");
    }

    #[test]
    fn explicit_prefix_wins() {
        assert_eq!(classify("ISSN 12345678"), "ISSN");
        assert_eq!(classify("ISBN 978-0-306-40615-7"), "ISBN13");
    }

    #[test]
    fn stops_at_separator_after_digits() {
        // two ISBN-10s for paperback and hardback
        assert_eq!(classify("0306406152; 0306406153"), "ISBN");
    }
}
