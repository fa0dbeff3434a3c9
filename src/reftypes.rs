//! Per-dialect tag dispatch: each reference-type variant carries a lookup
//! table translating the dialect's raw tags to canonical tags, each with a
//! processing kind and a target level.

use crate::fields::FieldStore;
use tracing::warn;

/// How a matched tag's value is converted to canonical fields.
///
/// `Always` and `Default` rows carry no input tag; they augment the
/// converted reference with `"NEWTAG|value"` metadata after the per-field
/// pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingKind {
    Always,
    Default,
    Skip,
    Simple,
    Type,
    Person,
    Date,
    Pages,
    SerialNo,
    Title,
    Notes,
    Doi,
    HowPublished,
    LinkedFile,
    Keyword,
    Url,
    Genre,
    Eprint,
    /// BibTeX `sentelink` file attachments.
    BtSente,
    /// BibTeX `organization` (publisher fallback).
    BtOrg,
    /// BibLaTeX-style thesis `type` hints.
    BltThesisType,
    /// BibLaTeX `school`.
    BltSchool,
    /// BibLaTeX `editor` role variants.
    BltEditor,
    /// BibLaTeX `entrysubtype`.
    BltSubtype,
    BltSkip,
}

/// One row of a variant's lookup table.
#[derive(Clone)]
pub struct TagLookup {
    pub oldtag: &'static str,
    pub newtag: &'static str,
    pub kind: ProcessingKind,
    pub level: i32,
}

/// Shorthand row constructor for the dialect tables.
pub fn row(oldtag: &'static str, newtag: &'static str, kind: ProcessingKind, level: i32) -> TagLookup {
    TagLookup {
        oldtag,
        newtag,
        kind,
        level,
    }
}

/// One reference-type variant: its dialect type name and its rows.
pub struct RefTypeVariant {
    pub type_name: &'static str,
    pub tags: Vec<TagLookup>,
}

impl RefTypeVariant {
    pub fn new(type_name: &'static str, tags: Vec<TagLookup>) -> Self {
        RefTypeVariant { type_name, tags }
    }
}

pub struct RefTypeTable {
    pub variants: Vec<RefTypeVariant>,
}

/// Map a dialect type string to a variant index.
///
/// The first variant whose name is a case-insensitive prefix of the input
/// wins; an unrecognized type falls back to variant 0 and, when `chatty`,
/// says so on the diagnostic channel.
pub fn get_reftype(
    type_value: &str,
    refnum: usize,
    progname: &str,
    table: &RefTypeTable,
    refname: &str,
    is_default: &mut bool,
    chatty: bool,
) -> usize {
    let q = type_value.trim_start();
    *is_default = false;

    for (i, v) in table.variants.iter().enumerate() {
        let matches = q
            .get(..v.type_name.len())
            .map_or(false, |h| h.eq_ignore_ascii_case(v.type_name));
        if matches {
            return i;
        }
    }

    *is_default = true;
    if chatty {
        warn!(
            "{}: did not recognize type '{}' of refnum {} ({}), defaulting to {}",
            progname, q, refnum, refname, table.variants[0].type_name
        );
    }
    0
}

/// Translate a raw tag through the variant's table.
pub fn translate<'a>(tag: &str, reftype: usize, table: &'a RefTypeTable) -> Option<&'a TagLookup> {
    table.variants[reftype]
        .tags
        .iter()
        .find(|r| r.oldtag.eq_ignore_ascii_case(tag))
}

/// Split an `Always`/`Default` row's `"NEWTAG|value"` payload.
pub fn split_tag_value(payload: &str) -> (&str, &str) {
    match payload.split_once('|') {
        Some((tag, value)) => (tag, value),
        None => (payload, ""),
    }
}

/// Apply the `Always` rows of the variant.
pub fn process_always(out: &mut FieldStore, reftype: usize, table: &RefTypeTable) {
    for r in &table.variants[reftype].tags {
        if r.kind != ProcessingKind::Always {
            continue;
        }
        let (tag, value) = split_tag_value(r.newtag);
        out.add(tag, value, r.level);
    }
}

/// Apply the `Default` rows: insert only when no field with the target
/// tag exists at the target level.
pub fn process_default(out: &mut FieldStore, reftype: usize, table: &RefTypeTable) {
    for r in &table.variants[reftype].tags {
        if r.kind != ProcessingKind::Default {
            continue;
        }
        let (tag, value) = split_tag_value(r.newtag);
        if out.find(tag, r.level).is_none() {
            out.add(tag, value, r.level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::LEVEL_MAIN;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    lazy_static! {
        static ref TEST_TABLE: RefTypeTable = RefTypeTable {
            variants: vec![
                RefTypeVariant::new("STD", vec![]),
                RefTypeVariant::new(
                    "JOUR",
                    vec![
                        row("TI", "TITLE", ProcessingKind::Title, LEVEL_MAIN),
                        row(" ", "INTERNAL_TYPE|ARTICLE", ProcessingKind::Always, LEVEL_MAIN),
                        row(" ", "RESOURCE|text", ProcessingKind::Default, LEVEL_MAIN),
                    ],
                ),
            ],
        };
    }

    #[test]
    fn prefix_matching_with_default_fallback() {
        let mut is_default = false;
        assert_eq!(
            get_reftype("JOURNAL", 1, "t", &TEST_TABLE, "r", &mut is_default, false),
            1
        );
        assert!(!is_default);
        assert_eq!(
            get_reftype("weird", 1, "t", &TEST_TABLE, "r", &mut is_default, false),
            0
        );
        assert!(is_default);
    }

    #[test]
    fn non_ascii_type_degrades_to_default() {
        // the ä spans the four-byte boundary that "JOUR" slices at; the
        // lookup must fall back to the default variant, not panic
        let mut is_default = false;
        assert_eq!(
            get_reftype("Schäg", 1, "t", &TEST_TABLE, "r", &mut is_default, false),
            0
        );
        assert!(is_default);
    }

    #[test]
    fn translate_is_case_insensitive() {
        let r = translate("ti", 1, &TEST_TABLE).unwrap();
        assert_eq!(r.newtag, "TITLE");
        assert!(translate("ZZ", 1, &TEST_TABLE).is_none());
    }

    #[test]
    fn always_and_default_augmentation() {
        let mut out = FieldStore::new();
        out.add("RESOURCE", "software", LEVEL_MAIN);
        process_always(&mut out, 1, &TEST_TABLE);
        process_default(&mut out, 1, &TEST_TABLE);
        assert_eq!(out.value_of("INTERNAL_TYPE", LEVEL_MAIN), Some("ARTICLE"));
        // the default row must not stomp the existing RESOURCE
        assert_eq!(out.value_of("RESOURCE", LEVEL_MAIN), Some("software"));
        assert_eq!(out.num(), 2);
    }

    #[test]
    fn payload_splitting() {
        assert_eq!(split_tag_value("GENRE:MARC|periodical"), ("GENRE:MARC", "periodical"));
        assert_eq!(split_tag_value("RESOURCE|text"), ("RESOURCE", "text"));
    }
}
