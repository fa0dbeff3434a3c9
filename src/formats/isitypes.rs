//! ISI Web of Science tag lookup tables.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant, TagLookup};
use lazy_static::lazy_static;

fn base_rows() -> Vec<TagLookup> {
    vec![
        row("AU", "AUTHOR", Person, LEVEL_MAIN),
        row("AF", "AUTHOR", Person, LEVEL_MAIN),
        row("TI", "TITLE", Title, LEVEL_MAIN),
        row("SO", "TITLE", Title, LEVEL_HOST),
        row("JI", "SHORTTITLE", Title, LEVEL_HOST),
        row("J9", "SHORTTITLE", Title, LEVEL_HOST),
        row("PU", "PUBLISHER", Simple, LEVEL_HOST),
        row("PI", "ADDRESS", Simple, LEVEL_HOST),
        row("C1", "ADDRESS", Simple, LEVEL_MAIN),
        row("PA", "ADDRESS:PUBLISHER", Simple, LEVEL_HOST),
        row("RP", "REPRINTADDRESS", Simple, LEVEL_MAIN),
        row("VL", "VOLUME", Simple, LEVEL_MAIN),
        row("AR", "ARTICLENUMBER", Simple, LEVEL_MAIN),
        row("BP", "PAGES:START", Simple, LEVEL_MAIN),
        row("EP", "PAGES:STOP", Simple, LEVEL_MAIN),
        row("PG", "PAGES:TOTAL", Simple, LEVEL_MAIN),
        row("IS", "ISSUE", Simple, LEVEL_MAIN),
        row("SN", "SERIALNUMBER", SerialNo, LEVEL_HOST),
        row("AB", "ABSTRACT", Simple, LEVEL_MAIN),
        row("NF", "NOTES", Notes, LEVEL_MAIN),
        row("DE", "KEYWORD", Keyword, LEVEL_MAIN),
        row("ID", "KEYWORD", Keyword, LEVEL_MAIN),
        row("LA", "LANGUAGE", Simple, LEVEL_MAIN),
        row("TC", "TIMESCITED", Simple, LEVEL_MAIN),
        row("NR", "NUMBERREFS", Simple, LEVEL_MAIN),
        row("CR", "CITEDREFS", Simple, LEVEL_MAIN),
        row("PT", " ", Type, LEVEL_HOST),
        row("DT", "DOCUMENTTYPE", Type, LEVEL_MAIN),
        row("GA", "ISIDELIVERNUM", Simple, LEVEL_MAIN),
        row("UT", "ISIREFNUM", Simple, LEVEL_MAIN),
        row("DI", "DOI", Simple, LEVEL_MAIN),
    ]
}

fn variant(
    type_name: &'static str,
    overrides: Vec<TagLookup>,
    augment: Vec<TagLookup>,
) -> RefTypeVariant {
    let mut tags = overrides;
    tags.extend(base_rows());
    tags.extend(augment);
    RefTypeVariant::new(type_name, tags)
}

lazy_static! {
    pub static ref ISI_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![
            variant("Journal", vec![
                row("PY", "PARTDATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "PARTDATE:MONTH", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|journal article", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
            ]),
            variant("J", vec![
                row("PY", "PARTDATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "PARTDATE:MONTH", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|journal article", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
            ]),
            variant("Book", vec![
                row("PY", "DATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "DATE:MONTH", Simple, LEVEL_MAIN),
                row("PU", "PUBLISHER", Simple, LEVEL_MAIN),
                row("PI", "ADDRESS", Simple, LEVEL_MAIN),
                row("PA", "ADDRESS:PUBLISHER", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
            ]),
            variant("B", vec![
                row("PY", "DATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "DATE:MONTH", Simple, LEVEL_MAIN),
                row("PU", "PUBLISHER", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
            ]),
            variant("Chapter", vec![
                row("PY", "PARTDATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "PARTDATE:MONTH", Simple, LEVEL_MAIN),
                row("PG", "PAGES:TOTAL", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INBOOK", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|book chapter", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_HOST),
            ]),
            variant("S", vec![
                row("SO", "TITLE", Title, LEVEL_MAIN),
                row("SE", "TITLE", Title, LEVEL_HOST),
                row("BS", "SUBTITLE", Title, LEVEL_HOST),
                row("PY", "PARTDATE:YEAR", Simple, LEVEL_MAIN),
                row("PD", "PARTDATE:MONTH", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|INCOLLECTION", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|collection", Always, LEVEL_MAIN),
            ]),
        ],
    };
}
