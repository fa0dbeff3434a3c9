//! Classification of identifier strings buried in URL-ish fields, and the
//! helpers that re-expand canonical identifiers into URLs on output.

use crate::fields::{FieldStore, LevelMatch};
use lazy_static::lazy_static;
use regex::Regex;

struct UrlPrefix {
    tag: &'static str,
    prefix: &'static str,
}

/// Prefixes re-attached on output (first entry per tag wins).
static PREFIXES: &[UrlPrefix] = &[
    UrlPrefix { tag: "ARXIV", prefix: "http://arxiv.org/abs/" },
    UrlPrefix { tag: "DOI", prefix: "https://doi.org/" },
    UrlPrefix { tag: "JSTOR", prefix: "http://www.jstor.org/stable/" },
    UrlPrefix { tag: "MRNUMBER", prefix: "http://www.ams.org/mathscinet-getitem?mr=" },
    UrlPrefix { tag: "PMID", prefix: "http://www.ncbi.nlm.nih.gov/pubmed/" },
    UrlPrefix { tag: "PMC", prefix: "http://www.ncbi.nlm.nih.gov/pmc/articles/" },
    UrlPrefix { tag: "ISIREFNUM", prefix: "isi:" },
];

/// Recognized on input but never re-emitted in this spelling.
static EXTRA_PREFIXES: &[UrlPrefix] = &[
    UrlPrefix { tag: "ARXIV", prefix: "arXiv:" },
    UrlPrefix { tag: "DOI", prefix: "http://dx.doi.org/" },
    UrlPrefix { tag: "JSTOR", prefix: "jstor:" },
    UrlPrefix { tag: "PMID", prefix: "pmid:" },
    UrlPrefix { tag: "PMID", prefix: "pubmed:" },
    UrlPrefix { tag: "PMC", prefix: "pmc:" },
    UrlPrefix { tag: "URL", prefix: "\\urllink" },
    UrlPrefix { tag: "URL", prefix: "\\url" },
];

lazy_static! {
    static ref DOI_CORE: Regex = Regex::new(r"^\d\d\.\d{4}/").unwrap();
}

/// Offset of the DOI proper inside `s`, when `s` carries one in any of
/// the embedded spellings the databases produce.
pub fn doi_offset(s: &str) -> Option<usize> {
    const FORMS: &[&str] = &["", "doi:", "doi: ", "doi: DOI: ", "https://doi.org/"];
    for form in FORMS {
        let matches = s
            .get(..form.len())
            .map(|head| head.eq_ignore_ascii_case(form))
            .unwrap_or(false);
        if matches && DOI_CORE.is_match(&s[form.len()..]) {
            return Some(form.len());
        }
    }
    None
}

/// Length of a remote URI scheme at the start of `s`, if any.
pub fn uri_scheme_len(s: &str) -> Option<usize> {
    const SCHEMES: &[&str] = &["http:", "https:", "ftp:", "git:", "gopher:"];
    SCHEMES
        .iter()
        .find(|scheme| {
            s.get(..scheme.len())
                .map(|head| head.eq_ignore_ascii_case(scheme))
                .unwrap_or(false)
        })
        .map(|scheme| scheme.len())
}

/// Length of a reference-database prefix (`arXiv:`, `pubmed:`, …), if any.
pub fn database_prefix_len(s: &str) -> Option<usize> {
    const SCHEMES: &[&str] = &["arXiv:", "pubmed:", "medline:", "isi:"];
    SCHEMES
        .iter()
        .find(|scheme| {
            s.get(..scheme.len())
                .map(|head| head.eq_ignore_ascii_case(scheme))
                .unwrap_or(false)
        })
        .map(|scheme| scheme.len())
}

/// Does this free-text value actually carry a link or identifier?
pub fn is_embedded_link(s: &str) -> bool {
    uri_scheme_len(s).is_some() || database_prefix_len(s).is_some() || doi_offset(s).is_some()
}

/// Classify a URL-ish value: strip a known prefix and store the remainder
/// under the matching canonical tag, or keep the whole value as `URL`.
pub fn split_and_add(out: &mut FieldStore, value: &str, level: i32) {
    for p in PREFIXES.iter().chain(EXTRA_PREFIXES) {
        if value.starts_with(p.prefix) {
            out.add(p.tag, &value[p.prefix.len()..], level);
            return;
        }
    }
    out.add("URL", value, level);
}

fn prefix_for(tag: &str) -> &'static str {
    PREFIXES
        .iter()
        .find(|p| p.tag == tag)
        .map(|p| p.prefix)
        .unwrap_or("")
}

fn construct_url(prefix: &str, id: &str) -> String {
    // an identifier that is already a full URL is kept as-is
    let is_url = id
        .get(..5)
        .map(|head| head.eq_ignore_ascii_case("http:"))
        .unwrap_or(false);
    if is_url {
        return id.to_string();
    }
    format!("{prefix}{id}")
}

/// Expand the identifier at `f[n]` into a URL, unless an equal `urltag`
/// row already exists (so we do not duplicate an explicit URL).
pub fn identifier_to_url(f: &FieldStore, n: usize, urltag: &str) -> Option<String> {
    let tag = f.tag(n).to_ascii_uppercase();
    let url = construct_url(prefix_for(&tag), f.value(n));
    let exists = f
        .iter()
        .any(|row| row.tag() == urltag && row.value() == url);
    (!exists).then_some(url)
}

/// Gather every identifier of the listed types, re-attach the canonical
/// prefix, and append them all under `tag_out`.
pub fn merge_and_add(
    fin: &FieldStore,
    lvl_in: impl Into<LevelMatch> + Copy,
    out: &mut FieldStore,
    tag_out: &str,
    lvl_out: i32,
    types: &[&str],
) {
    for tag in types {
        let prefix = prefix_for(tag);
        for n in fin.find_each(tag, lvl_in) {
            let url = format!("{prefix}{}", fin.value(n));
            out.add(tag_out, &url, lvl_out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};
    use pretty_assertions::assert_eq;

    #[test]
    fn doi_spellings() {
        assert_eq!(doi_offset("10.1000/xyz"), Some(0));
        assert_eq!(doi_offset("doi:10.1000/xyz"), Some(4));
        assert_eq!(doi_offset("doi: 10.1000/xyz"), Some(5));
        assert_eq!(doi_offset("doi: DOI: 10.1000/xyz"), Some(10));
        assert_eq!(doi_offset("https://doi.org/10.1000/xyz"), Some(16));
        assert_eq!(doi_offset("not a doi"), None);
        assert_eq!(doi_offset("10.10/short"), None);
    }

    #[test]
    fn split_classifies_known_prefixes() {
        let mut f = FieldStore::new();
        split_and_add(&mut f, "http://arxiv.org/abs/1605.02026", LEVEL_MAIN);
        split_and_add(&mut f, "arXiv:1605.02027", LEVEL_MAIN);
        split_and_add(&mut f, "http://www.jstor.org/stable/1234", LEVEL_MAIN);
        split_and_add(&mut f, "pubmed:999", LEVEL_MAIN);
        split_and_add(&mut f, "\\urlhttp://example.org/x", LEVEL_MAIN);
        split_and_add(&mut f, "http://example.org/page", LEVEL_MAIN);

        let pairs: Vec<(String, String)> = f
            .iter()
            .map(|row| (row.tag().to_string(), row.value().to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ARXIV".to_string(), "1605.02026".to_string()),
                ("ARXIV".to_string(), "1605.02027".to_string()),
                ("JSTOR".to_string(), "1234".to_string()),
                ("PMID".to_string(), "999".to_string()),
                ("URL".to_string(), "http://example.org/x".to_string()),
                ("URL".to_string(), "http://example.org/page".to_string()),
            ]
        );
    }

    #[test]
    fn merge_reattaches_prefixes() {
        let mut fin = FieldStore::new();
        fin.add("DOI", "10.1000/xyz", LEVEL_MAIN);
        fin.add("URL", "http://example.org", LEVEL_MAIN);
        let mut out = FieldStore::new();
        merge_and_add(&fin, LEVEL_ANY, &mut out, "UR", LEVEL_MAIN, &["URL", "DOI"]);
        let values: Vec<&str> = out.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["http://example.org", "https://doi.org/10.1000/xyz"]);
    }

    #[test]
    fn identifier_expansion_skips_existing_urls() {
        let mut f = FieldStore::new();
        f.add("ARXIV", "1605.02026", LEVEL_MAIN);
        f.add("URL", "http://arxiv.org/abs/1605.02026", LEVEL_MAIN);
        assert_eq!(identifier_to_url(&f, 0, "URL"), None);

        let mut f = FieldStore::new();
        f.add("ARXIV", "1605.02026", LEVEL_MAIN);
        assert_eq!(
            identifier_to_url(&f, 0, "URL").as_deref(),
            Some("http://arxiv.org/abs/1605.02026")
        );
    }

    #[test]
    fn embedded_link_detection() {
        assert!(is_embedded_link("https://doi.org/10.1000/xyz"));
        assert!(is_embedded_link("isi:000071"));
        assert!(is_embedded_link("10.1000/xyz"));
        assert!(!is_embedded_link("just some notes"));
    }
}
