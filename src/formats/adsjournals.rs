//! Journal abbreviations for the ADS reference code, `abbrev` padded to
//! five characters with dots. Plain data; extend as needed.

pub struct Journal {
    pub abbrev: &'static str,
    pub name: &'static str,
}

pub static JOURNALS: &[Journal] = &[
    Journal { abbrev: "AcASn", name: "Acta Astronomica Sinica" },
    Journal { abbrev: "A&A..", name: "Astronomy and Astrophysics" },
    Journal { abbrev: "AJ...", name: "Astronomical Journal" },
    Journal { abbrev: "ApJ..", name: "Astrophysical Journal" },
    Journal { abbrev: "ApJS.", name: "Astrophysical Journal Supplement Series" },
    Journal { abbrev: "JChPh", name: "Journal of Chemical Physics" },
    Journal { abbrev: "JMP..", name: "Journal of Mathematical Physics" },
    Journal { abbrev: "MNRAS", name: "Monthly Notices of the Royal Astronomical Society" },
    Journal { abbrev: "Natur", name: "Nature" },
    Journal { abbrev: "NJPh.", name: "New Journal of Physics" },
    Journal { abbrev: "PASP.", name: "Publications of the Astronomical Society of the Pacific" },
    Journal { abbrev: "PhRvA", name: "Physical Review A" },
    Journal { abbrev: "PhRvB", name: "Physical Review B" },
    Journal { abbrev: "PhRvC", name: "Physical Review C" },
    Journal { abbrev: "PhRvD", name: "Physical Review D" },
    Journal { abbrev: "PhRvE", name: "Physical Review E" },
    Journal { abbrev: "PhRvL", name: "Physical Review Letters" },
    Journal { abbrev: "PNAS.", name: "Proceedings of the National Academy of Sciences" },
    Journal { abbrev: "RvMP.", name: "Reviews of Modern Physics" },
    Journal { abbrev: "Sci..", name: "Science" },
];

/// Look a journal up by its abbreviation (dots optional) or full name.
pub fn find(title: &str) -> Option<&'static Journal> {
    JOURNALS.iter().find(|j| {
        j.name.eq_ignore_ascii_case(title)
            || j.abbrev.eq_ignore_ascii_case(title)
            || j.abbrev.trim_end_matches('.').eq_ignore_ascii_case(title)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbrevs_are_five_characters() {
        for j in JOURNALS {
            assert_eq!(j.abbrev.len(), 5, "{}", j.abbrev);
        }
    }

    #[test]
    fn lookup_by_either_form() {
        assert_eq!(find("PhRvB").unwrap().abbrev, "PhRvB");
        assert_eq!(find("Physical Review B").unwrap().abbrev, "PhRvB");
        assert_eq!(find("nature").unwrap().abbrev, "Natur");
        assert!(find("Journal of Irreproducible Results").is_none());
    }
}
