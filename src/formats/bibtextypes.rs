//! BibTeX tag lookup tables, one variant per `@type`.
//!
//! `misc` sits first so unrecognized entry types fall back to it.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant, TagLookup};
use lazy_static::lazy_static;

fn base_rows() -> Vec<TagLookup> {
    vec![
        row("refnum", "REFNUM", Simple, LEVEL_MAIN),
        row("author", "AUTHOR", Person, LEVEL_MAIN),
        row("editor", "EDITOR", Person, LEVEL_MAIN),
        row("translator", "TRANSLATOR", Person, LEVEL_MAIN),
        row("title", "TITLE", Title, LEVEL_MAIN),
        row("booktitle", "TITLE", Title, LEVEL_HOST),
        row("series", "TITLE", Title, LEVEL_SERIES),
        row("shorttitle", "SHORTTITLE", Title, LEVEL_MAIN),
        row("year", "DATE:YEAR", Simple, LEVEL_MAIN),
        row("month", "DATE:MONTH", Simple, LEVEL_MAIN),
        row("day", "DATE:DAY", Simple, LEVEL_MAIN),
        row("volume", "VOLUME", Simple, LEVEL_MAIN),
        row("number", "NUMBER", Simple, LEVEL_MAIN),
        row("issue", "ISSUE", Simple, LEVEL_MAIN),
        row("pages", "PAGES", Pages, LEVEL_MAIN),
        row("publisher", "PUBLISHER", Simple, LEVEL_MAIN),
        row("address", "ADDRESS", Simple, LEVEL_MAIN),
        row("edition", "EDITION", Simple, LEVEL_MAIN),
        row("chapter", "SECTION", Simple, LEVEL_MAIN),
        row("language", "LANGUAGE", Simple, LEVEL_MAIN),
        row("location", "LOCATION", Simple, LEVEL_MAIN),
        row("contents", "CONTENTS", Simple, LEVEL_MAIN),
        row("abstract", "ABSTRACT", Simple, LEVEL_MAIN),
        row("note", "NOTES", Notes, LEVEL_MAIN),
        row("annote", "ANNOTE", Simple, LEVEL_MAIN),
        row("keywords", "KEYWORD", Keyword, LEVEL_MAIN),
        row("isbn", "ISBN", SerialNo, LEVEL_MAIN),
        row("issn", "ISSN", SerialNo, LEVEL_MAIN),
        row("doi", "DOI", Doi, LEVEL_MAIN),
        row("url", "URL", Url, LEVEL_MAIN),
        row("howpublished", "", HowPublished, LEVEL_MAIN),
        row("eprint", "", Eprint, LEVEL_MAIN),
        row("archiveprefix", "ARCHIVEPREFIX", Skip, LEVEL_MAIN),
        row("eprinttype", "EPRINTTYPE", Skip, LEVEL_MAIN),
        row("primaryclass", "EPRINTCLASS", Simple, LEVEL_MAIN),
        row("mrnumber", "MRNUMBER", Simple, LEVEL_MAIN),
        row("coden", "CODEN", Simple, LEVEL_MAIN),
        row("file", "FILEATTACH", LinkedFile, LEVEL_MAIN),
        row("sentelink", "FILEATTACH", BtSente, LEVEL_MAIN),
        row("organization", "", BtOrg, LEVEL_MAIN),
        row("crossref", "CROSSREF", Skip, LEVEL_MAIN),
        row("key", "", Skip, LEVEL_MAIN),
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
    pub static ref BIBTEX_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![
            variant("misc", vec![], vec![
                row(" ", "INTERNAL_TYPE|MISC", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("article", vec![
                row("journal", "TITLE", Title, LEVEL_HOST),
                row("editor", "EDITOR", Person, LEVEL_HOST),
                row("publisher", "PUBLISHER", Simple, LEVEL_HOST),
                row("issn", "ISSN", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
            ]),
            // must precede "book": the type names are matched by prefix
            variant("booklet", vec![], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|pamphlet", Always, LEVEL_MAIN),
            ]),
            variant("book", vec![], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
            ]),
            variant("inbook", vec![
                row("title", "TITLE", Title, LEVEL_HOST),
                row("publisher", "PUBLISHER", Simple, LEVEL_HOST),
                row("isbn", "ISBN", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INBOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_HOST),
            ]),
            variant("incollection", vec![
                row("editor", "EDITOR", Person, LEVEL_HOST),
                row("publisher", "PUBLISHER", Simple, LEVEL_HOST),
                row("isbn", "ISBN", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INCOLLECTION", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|collection", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_HOST),
            ]),
            variant("inproceedings", vec![
                row("editor", "EDITOR", Person, LEVEL_HOST),
                row("publisher", "PUBLISHER", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INPROCEEDINGS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_HOST),
            ]),
            variant("conference", vec![
                row("editor", "EDITOR", Person, LEVEL_HOST),
                row("publisher", "PUBLISHER", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INPROCEEDINGS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_HOST),
            ]),
            variant("proceedings", vec![], vec![
                row(" ", "INTERNAL_TYPE|PROCEEDINGS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_MAIN),
            ]),
            variant("manual", vec![], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|instruction", Always, LEVEL_MAIN),
            ]),
            variant("mastersthesis", vec![
                row("school", "DEGREEGRANTOR", Simple, LEVEL_MAIN),
                row("type", "GENRE:UNKNOWN", Genre, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|THESIS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|thesis", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|Masters thesis", Default, LEVEL_MAIN),
            ]),
            variant("phdthesis", vec![
                row("school", "DEGREEGRANTOR", Simple, LEVEL_MAIN),
                row("type", "GENRE:UNKNOWN", Genre, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|THESIS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|thesis", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|Ph.D. thesis", Default, LEVEL_MAIN),
            ]),
            variant("techreport", vec![
                row("institution", "PUBLISHER", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|REPORT", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|technical report", Always, LEVEL_MAIN),
            ]),
            variant("unpublished", vec![], vec![
                row(" ", "INTERNAL_TYPE|UNPUBLISHED", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|unpublished", Always, LEVEL_MAIN),
            ]),
            variant("electronic", vec![], vec![
                row(" ", "INTERNAL_TYPE|ELECTRONIC", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|electronic", Always, LEVEL_MAIN),
            ]),
            variant("www", vec![], vec![
                row(" ", "INTERNAL_TYPE|ELECTRONIC", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|electronic", Always, LEVEL_MAIN),
            ]),
        ],
    };
}
