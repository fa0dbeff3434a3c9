//! Date helpers shared by the dialects.

static MONTHS: [(&str, &str); 12] = [
    ("January", "Jan"),
    ("February", "Feb"),
    ("March", "Mar"),
    ("April", "Apr"),
    ("May", "May"),
    ("June", "Jun"),
    ("July", "Jul"),
    ("August", "Aug"),
    ("September", "Sep"),
    ("October", "Oct"),
    ("November", "Nov"),
    ("December", "Dec"),
];

/// Month number 1..=12 from a numeric string, an English month name, or a
/// three-letter abbreviation, case-insensitively.
pub fn month_number(s: &str) -> Option<u32> {
    let s = s.trim().trim_end_matches('.');
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    MONTHS
        .iter()
        .position(|(full, abbr)| s.eq_ignore_ascii_case(full) || s.eq_ignore_ascii_case(abbr))
        .map(|i| i as u32 + 1)
}

/// Normalize a month to the canonical two-digit form, passing through
/// anything unrecognized.
pub fn normalize_month(s: &str) -> String {
    match month_number(s) {
        Some(n) => format!("{n:02}"),
        None => s.to_string(),
    }
}

/// Three-letter English abbreviation for a month number string, for
/// writers that emit `Jan`..`Dec`.
pub fn month_abbrev(s: &str) -> Option<&'static str> {
    let n = s.trim().parse::<usize>().ok()?;
    (1..=12).contains(&n).then(|| MONTHS[n - 1].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_numbers() {
        assert_eq!(month_number("September"), Some(9));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("SEP."), Some(9));
        assert_eq!(month_number("9"), Some(9));
        assert_eq!(month_number("13"), None);
        assert_eq!(month_number("Brumaire"), None);
    }

    #[test]
    fn always_two_digits() {
        assert_eq!(normalize_month("3"), "03");
        assert_eq!(normalize_month("December"), "12");
        assert_eq!(normalize_month("Spring"), "Spring");
    }

    #[test]
    fn abbreviations() {
        assert_eq!(month_abbrev("1"), Some("Jan"));
        assert_eq!(month_abbrev("12"), Some("Dec"));
        assert_eq!(month_abbrev("0"), None);
    }
}
