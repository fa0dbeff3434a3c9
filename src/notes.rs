//! Notes routing.
//!
//! Several databases hide DOIs and URLs in free-text note fields (Oxford
//! Journals in RIS `N1`, Wiley in EndNote `%1`, and so on). A note that
//! is really a link is reclassified; everything else stays a note.

use crate::fields::FieldStore;
use crate::url;

struct NotePrefix {
    prefix: &'static str,
    tag: &'static str,
}

static NOTE_PREFIXES: &[NotePrefix] = &[
    NotePrefix { prefix: "arXiv:", tag: "ARXIV" },
    NotePrefix { prefix: "http://arxiv.org/abs/", tag: "ARXIV" },
    NotePrefix { prefix: "jstor:", tag: "JSTOR" },
    NotePrefix { prefix: "http://www.jstor.org/stable/", tag: "JSTOR" },
    NotePrefix { prefix: "medline:", tag: "MEDLINE" },
    NotePrefix { prefix: "pubmed:", tag: "PMID" },
    NotePrefix { prefix: "http://www.ncbi.nlm.nih.gov/pubmed/", tag: "PMID" },
    NotePrefix { prefix: "http://www.ncbi.nlm.nih.gov/pmc/articles/", tag: "PMC" },
    NotePrefix { prefix: "http://dx.doi.org/", tag: "DOI" },
    NotePrefix { prefix: "isi:", tag: "ISIREFNUM" },
];

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

fn add_as_url(out: &mut FieldStore, value: &str, level: i32) {
    let mut p = value;
    if starts_with_ci(p, "\\urllink") {
        p = &p[8..];
    }
    if starts_with_ci(p, "\\url") {
        p = &p[4..];
    }
    for np in NOTE_PREFIXES {
        if starts_with_ci(p, np.prefix) {
            out.add(np.tag, &p[np.prefix.len()..], level);
            return;
        }
    }
    out.add("URL", p, level);
}

/// Append a note, reclassifying embedded links.
pub fn add_notes(out: &mut FieldStore, value: &str, level: i32) {
    if !url::is_embedded_link(value) {
        out.add("NOTES", value, level);
        return;
    }

    if let Some(off) = url::doi_offset(value) {
        out.add("DOI", &value[off..], level);
    } else {
        add_as_url(out, value, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};
    use pretty_assertions::assert_eq;

    fn first_row(value: &str) -> (String, String) {
        let mut f = FieldStore::new();
        add_notes(&mut f, value, LEVEL_MAIN);
        let row = f.iter().next().unwrap();
        (row.tag().to_string(), row.value().to_string())
    }

    #[test]
    fn plain_text_stays_notes() {
        assert_eq!(first_row("reviewed twice"), ("NOTES".into(), "reviewed twice".into()));
    }

    #[test]
    fn embedded_doi_is_extracted() {
        assert_eq!(
            first_row("doi: DOI: 10.1016/j.str.2008.03.001"),
            ("DOI".into(), "10.1016/j.str.2008.03.001".into())
        );
    }

    #[test]
    fn database_prefixes_reclassify() {
        assert_eq!(first_row("arXiv:1605.02026"), ("ARXIV".into(), "1605.02026".into()));
        assert_eq!(first_row("isi:000071"), ("ISIREFNUM".into(), "000071".into()));
    }

    #[test]
    fn bare_urls_become_url() {
        let mut f = FieldStore::new();
        add_notes(&mut f, "ftp://example.org/data", LEVEL_MAIN);
        assert_eq!(f.value_of("URL", LEVEL_ANY), Some("ftp://example.org/data"));
    }
}
