//! PubMed NBIB tag lookup tables.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant, TagLookup};
use lazy_static::lazy_static;

fn article_rows() -> Vec<TagLookup> {
    vec![
        row("PMID", "PMID", Simple, LEVEL_MAIN),
        row("OWN", "", Skip, LEVEL_MAIN),
        row("STAT", "", Skip, LEVEL_MAIN),
        row("DA", "", Skip, LEVEL_MAIN),
        row("DCOM", "", Skip, LEVEL_MAIN),
        row("LR", "", Skip, LEVEL_MAIN),
        row("IS", "", Skip, LEVEL_MAIN),
        row("VI", "VOLUME", Simple, LEVEL_MAIN),
        row("IP", "ISSUE", Simple, LEVEL_MAIN),
        row("DP", "", Date, LEVEL_MAIN),
        row("TI", "TITLE", Title, LEVEL_MAIN),
        row("PG", "PAGES", Pages, LEVEL_MAIN),
        row("LID", "DOI", Doi, LEVEL_MAIN),
        row("AB", "ABSTRACT", Simple, LEVEL_MAIN),
        row("FAU", "AUTHOR", Person, LEVEL_MAIN),
        row("AU", "", Skip, LEVEL_MAIN),
        row("AD", "ADDRESS:AUTHOR", Simple, LEVEL_MAIN),
        row("LA", "LANGUAGE", Simple, LEVEL_MAIN),
        row("GR", "", Skip, LEVEL_MAIN),
        row("PT", "", Skip, LEVEL_MAIN),
        row("DEP", "", Skip, LEVEL_MAIN),
        row("PL", "ADDRESS", Simple, LEVEL_MAIN),
        row("TA", "SHORTTITLE", Simple, LEVEL_HOST),
        row("JT", "TITLE", Simple, LEVEL_HOST),
        row("JID", "", Skip, LEVEL_HOST),
        row("SB", "", Skip, LEVEL_MAIN),
        row("MH", "KEYWORD", Simple, LEVEL_MAIN),
        row("OT", "KEYWORD", Simple, LEVEL_MAIN),
        row("PMC", "PMC", Simple, LEVEL_MAIN),
        row("OID", "", Skip, LEVEL_MAIN),
        row("EDAT", "", Skip, LEVEL_MAIN),
        row("MHDA", "", Skip, LEVEL_MAIN),
        row("CRDT", "", Skip, LEVEL_MAIN),
        row("PHST", "", Skip, LEVEL_MAIN),
        row("AID", "DOI", Doi, LEVEL_MAIN),
        row("PST", "", Skip, LEVEL_MAIN),
        row("SO", "", Skip, LEVEL_MAIN),
        row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
        row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
        row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
        row(" ", "GENRE:BIBUTILS|journal article", Always, LEVEL_MAIN),
        row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
        row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
    ]
}

lazy_static! {
    pub static ref NBIB_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![
            RefTypeVariant::new("Journal article", article_rows()),
            RefTypeVariant::new("News", article_rows()),
        ],
    };
}
