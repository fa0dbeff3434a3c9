//! RIS tag lookup tables, one variant per `TY` value.
//!
//! Each variant is the shared row set with that type's overrides stacked
//! in front (translation takes the first matching row) plus its
//! augmentation rows.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant, TagLookup};
use lazy_static::lazy_static;

/// Rows shared by every RIS reference type.
fn base_rows() -> Vec<TagLookup> {
    vec![
        row("A1", "AUTHOR", Person, LEVEL_MAIN),
        row("A2", "AUTHOR", Person, LEVEL_HOST),
        row("A3", "EDITOR", Person, LEVEL_SERIES),
        row("A4", "AUTHOR", Person, LEVEL_SERIES),
        row("AB", "ABSTRACT", Simple, LEVEL_MAIN),
        row("AD", "ADDRESS:AUTHOR", Simple, LEVEL_MAIN),
        row("AU", "AUTHOR", Person, LEVEL_MAIN),
        row("BT", "TITLE", Simple, LEVEL_HOST),
        row("C1", "NOTES", Notes, LEVEL_MAIN),
        row("C2", "NOTES", Notes, LEVEL_MAIN),
        row("C3", "NOTES", Notes, LEVEL_MAIN),
        row("C4", "NOTES", Notes, LEVEL_MAIN),
        row("C5", "NOTES", Notes, LEVEL_MAIN),
        row("C6", "NOTES", Notes, LEVEL_MAIN),
        row("C7", "NOTES", Notes, LEVEL_MAIN),
        row("C8", "NOTES", Notes, LEVEL_MAIN),
        row("CA", "CAPTION", Simple, LEVEL_MAIN),
        row("CN", "CALLNUMBER", Simple, LEVEL_MAIN),
        row("CP", "ISSUE", Simple, LEVEL_MAIN),
        row("CT", "ADDRESS", Simple, LEVEL_MAIN),
        row("CY", "ADDRESS", Simple, LEVEL_MAIN),
        row("DA", "DATE:YEAR", Date, LEVEL_MAIN),
        row("DB", "DATABASE", Simple, LEVEL_MAIN),
        row("DI", "DOI", Doi, LEVEL_MAIN),
        row("DO", "DOI", Doi, LEVEL_MAIN),
        row("DP", "DATABASEPROV", Simple, LEVEL_MAIN),
        row("ED", "EDITOR", Person, LEVEL_MAIN),
        row("EP", "PAGES:STOP", Simple, LEVEL_MAIN),
        row("ET", "EDITION", Simple, LEVEL_MAIN),
        row("ID", "REFNUM", Simple, LEVEL_MAIN),
        row("IS", "ISSUE", Simple, LEVEL_MAIN),
        row("J1", "TITLE", Simple, LEVEL_HOST),
        row("J2", "TITLE", Simple, LEVEL_HOST),
        row("JA", "TITLE", Simple, LEVEL_HOST),
        row("JF", "TITLE", Simple, LEVEL_HOST),
        row("JO", "TITLE", Simple, LEVEL_HOST),
        row("KW", "KEYWORD", Simple, LEVEL_MAIN),
        row("L1", "FILEATTACH", LinkedFile, LEVEL_MAIN),
        row("L4", "FIGATTACH", LinkedFile, LEVEL_MAIN),
        row("LA", "LANGUAGE", Simple, LEVEL_MAIN),
        row("LB", "LABEL", Simple, LEVEL_MAIN),
        row("M1", "NOTES", Notes, LEVEL_MAIN),
        row("M2", "NOTES", Notes, LEVEL_MAIN),
        row("M3", "NOTES", Notes, LEVEL_MAIN),
        row("N1", "NOTES", Notes, LEVEL_MAIN),
        row("N2", "ABSTRACT", Simple, LEVEL_MAIN),
        row("NV", "NUMVOLUMES", Simple, LEVEL_MAIN),
        row("OP", "ORIGPUB", Simple, LEVEL_MAIN),
        row("PB", "PUBLISHER", Simple, LEVEL_MAIN),
        row("PY", "DATE:YEAR", Date, LEVEL_MAIN),
        row("RI", "REVIEWEDITEM", Simple, LEVEL_MAIN),
        row("RN", "NOTES", Notes, LEVEL_MAIN),
        row("RP", "REPRINTSTATUS", Simple, LEVEL_MAIN),
        row("SE", "SECTION", Simple, LEVEL_MAIN),
        row("SN", "SERIALNUMBER", SerialNo, LEVEL_MAIN),
        row("SP", "PAGES:START", Simple, LEVEL_MAIN),
        row("ST", "SHORTTITLE", Simple, LEVEL_MAIN),
        row("T1", "TITLE", Title, LEVEL_MAIN),
        row("T2", "SHORTTITLE", Simple, LEVEL_HOST),
        row("T3", "TITLE", Simple, LEVEL_SERIES),
        row("TI", "TITLE", Title, LEVEL_MAIN),
        row("TT", "TRANSTITLE", Title, LEVEL_MAIN),
        row("U1", "NOTES", Notes, LEVEL_MAIN),
        row("U2", "NOTES", Notes, LEVEL_MAIN),
        row("U3", "NOTES", Notes, LEVEL_MAIN),
        row("U4", "NOTES", Notes, LEVEL_MAIN),
        row("U5", "NOTES", Notes, LEVEL_MAIN),
        row("UR", "URL", Url, LEVEL_MAIN),
        row("VL", "VOLUME", Simple, LEVEL_MAIN),
        row("VO", "VOLUME", Simple, LEVEL_MAIN),
        row("Y1", "DATE:YEAR", Date, LEVEL_MAIN),
        row("Y2", "DATE:MONTH", Simple, LEVEL_MAIN),
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

fn host_article_overrides() -> Vec<TagLookup> {
    vec![
        row("ED", "EDITOR", Person, LEVEL_HOST),
        row("PB", "PUBLISHER", Simple, LEVEL_HOST),
        row("SN", "SERIALNUMBER", SerialNo, LEVEL_HOST),
    ]
}

lazy_static! {
    pub static ref RIS_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![
            variant("STD", vec![], vec![
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("GEN", vec![], vec![
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("JOUR", host_article_overrides(), vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|journal article", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
            ]),
            variant("MGZN", host_article_overrides(), vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|magazine", Always, LEVEL_HOST),
            ]),
            variant("BOOK", vec![
                row("A3", "EDITOR", Person, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("CHAP", vec![
                row("PB", "PUBLISHER", Simple, LEVEL_HOST),
                row("SN", "SERIALNUMBER", SerialNo, LEVEL_HOST),
                row("T2", "TITLE", Title, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INBOOK", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|book chapter", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_HOST),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("CONF", vec![
                row("PB", "PUBLISHER", Simple, LEVEL_HOST),
                row("T2", "TITLE", Title, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|CONFERENCE", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_HOST),
            ]),
            variant("STAT", vec![], vec![
                row(" ", "INTERNAL_TYPE|STATUTE", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|legislation", Always, LEVEL_MAIN),
            ]),
            variant("HEAR", vec![], vec![
                row(" ", "INTERNAL_TYPE|HEARING", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|hearing", Always, LEVEL_MAIN),
            ]),
            variant("CASE", vec![], vec![
                row(" ", "INTERNAL_TYPE|CASE", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|legal case and case notes", Always, LEVEL_MAIN),
            ]),
            variant("NEWS", host_article_overrides(), vec![
                row(" ", "INTERNAL_TYPE|NEWSARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|newspaper", Always, LEVEL_HOST),
            ]),
            variant("MPCT", vec![], vec![
                row(" ", "RESOURCE|moving image", Always, LEVEL_MAIN),
            ]),
            variant("PCOMM", vec![], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|communication", Always, LEVEL_MAIN),
            ]),
            variant("PAMP", vec![], vec![
                row(" ", "INTERNAL_TYPE|MISC", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|pamphlet", Always, LEVEL_MAIN),
            ]),
            variant("ELEC", vec![], vec![
                row(" ", "INTERNAL_TYPE|ELECTRONIC", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|electronic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("THES", vec![], vec![
                row(" ", "INTERNAL_TYPE|THESIS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|thesis", Always, LEVEL_MAIN),
            ]),
            variant("RPRT", vec![], vec![
                row(" ", "INTERNAL_TYPE|REPORT", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|technical report", Always, LEVEL_MAIN),
            ]),
            variant("ABST", vec![], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|abstract or summary", Always, LEVEL_MAIN),
            ]),
            variant("COMP", vec![], vec![
                row(" ", "INTERNAL_TYPE|PROGRAM", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|software, multimedia", Always, LEVEL_MAIN),
            ]),
            variant("PAT", vec![], vec![
                row(" ", "INTERNAL_TYPE|PATENT", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|patent", Always, LEVEL_MAIN),
            ]),
            variant("MAP", vec![], vec![
                row(" ", "INTERNAL_TYPE|MAP", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|cartographic", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|map", Always, LEVEL_MAIN),
            ]),
            variant("UNPB", vec![], vec![
                row(" ", "INTERNAL_TYPE|UNPUBLISHED", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|unpublished", Always, LEVEL_MAIN),
            ]),
        ],
    };
}
