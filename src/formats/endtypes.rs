//! EndNote refer tag lookup tables, one variant per `%0` type.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant, TagLookup};
use lazy_static::lazy_static;

fn base_rows() -> Vec<TagLookup> {
    vec![
        row("%0", "", Type, LEVEL_MAIN),
        row("%A", "AUTHOR", Person, LEVEL_MAIN),
        row("%E", "EDITOR", Person, LEVEL_MAIN),
        row("%H", "TRANSLATOR", Person, LEVEL_MAIN),
        row("%Y", "EDITOR", Person, LEVEL_SERIES),
        row("%T", "TITLE", Title, LEVEL_MAIN),
        row("%!", "SHORTTITLE", Title, LEVEL_MAIN),
        row("%B", "TITLE", Title, LEVEL_HOST),
        row("%J", "TITLE", Title, LEVEL_HOST),
        row("%S", "TITLE", Title, LEVEL_SERIES),
        row("%V", "VOLUME", Simple, LEVEL_MAIN),
        row("%N", "ISSUE", Simple, LEVEL_MAIN),
        row("%P", "PAGES", Pages, LEVEL_MAIN),
        row("%D", "DATE:YEAR", Date, LEVEL_MAIN),
        row("%8", "DATE:MONTH", Date, LEVEL_MAIN),
        row("%I", "PUBLISHER", Simple, LEVEL_MAIN),
        row("%C", "ADDRESS", Simple, LEVEL_MAIN),
        row("%7", "EDITION", Simple, LEVEL_MAIN),
        row("%@", "SERIALNUMBER", SerialNo, LEVEL_MAIN),
        row("%G", "LANGUAGE", Simple, LEVEL_MAIN),
        row("%K", "KEYWORD", Simple, LEVEL_MAIN),
        row("%X", "ABSTRACT", Simple, LEVEL_MAIN),
        row("%O", "NOTES", Notes, LEVEL_MAIN),
        row("%1", "NOTES", Notes, LEVEL_MAIN),
        row("%2", "NOTES", Notes, LEVEL_MAIN),
        row("%3", "NOTES", Notes, LEVEL_MAIN),
        row("%M", "ACCESSNUM", Simple, LEVEL_MAIN),
        row("%L", "CALLNUMBER", Simple, LEVEL_MAIN),
        row("%F", "REFNUM", Simple, LEVEL_MAIN),
        row("%U", "URL", Url, LEVEL_MAIN),
        row("%R", "DOI", Doi, LEVEL_MAIN),
        row("%9", "GENRE:UNKNOWN", Genre, LEVEL_MAIN),
        row("%W", "LOCATION", Simple, LEVEL_MAIN),
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
    pub static ref END_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![
            variant("Generic", vec![], vec![
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ]),
            variant("Journal Article", vec![
                row("%E", "EDITOR", Person, LEVEL_HOST),
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
                row("%@", "SERIALNUMBER", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|academic journal", Always, LEVEL_HOST),
            ]),
            variant("Magazine Article", vec![
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
                row("%@", "SERIALNUMBER", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|ARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|periodical", Always, LEVEL_HOST),
                row(" ", "GENRE:BIBUTILS|magazine", Always, LEVEL_HOST),
            ]),
            variant("Newspaper Article", vec![
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|NEWSARTICLE", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|continuing", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|newspaper", Always, LEVEL_HOST),
            ]),
            variant("Book", vec![], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
            ]),
            variant("Edited Book", vec![], vec![
                row(" ", "INTERNAL_TYPE|BOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_MAIN),
            ]),
            variant("Book Section", vec![
                row("%E", "EDITOR", Person, LEVEL_HOST),
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
                row("%@", "SERIALNUMBER", SerialNo, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INBOOK", Always, LEVEL_MAIN),
                row(" ", "ISSUANCE|monographic", Always, LEVEL_HOST),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|book chapter", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|book", Always, LEVEL_HOST),
            ]),
            variant("Conference Proceedings", vec![
                row("%E", "EDITOR", Person, LEVEL_HOST),
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INPROCEEDINGS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_HOST),
            ]),
            variant("Conference Paper", vec![
                row("%E", "EDITOR", Person, LEVEL_HOST),
                row("%I", "PUBLISHER", Simple, LEVEL_HOST),
            ], vec![
                row(" ", "INTERNAL_TYPE|INPROCEEDINGS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|conference publication", Always, LEVEL_HOST),
            ]),
            variant("Report", vec![], vec![
                row(" ", "INTERNAL_TYPE|REPORT", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|technical report", Always, LEVEL_MAIN),
            ]),
            variant("Thesis", vec![
                row("%I", "DEGREEGRANTOR", Simple, LEVEL_MAIN),
            ], vec![
                row(" ", "INTERNAL_TYPE|THESIS", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:MARC|thesis", Always, LEVEL_MAIN),
            ]),
            variant("Personal Communication", vec![], vec![
                row(" ", "INTERNAL_TYPE|COMMUNICATION", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|communication", Always, LEVEL_MAIN),
            ]),
            variant("Manuscript", vec![], vec![
                row(" ", "INTERNAL_TYPE|MANUSCRIPT", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|manuscript", Always, LEVEL_MAIN),
            ]),
            variant("Electronic Source", vec![], vec![
                row(" ", "INTERNAL_TYPE|ELECTRONIC", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|electronic", Always, LEVEL_MAIN),
            ]),
            variant("Computer Program", vec![], vec![
                row(" ", "INTERNAL_TYPE|PROGRAM", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|software, multimedia", Always, LEVEL_MAIN),
            ]),
            variant("Unpublished Work", vec![], vec![
                row(" ", "INTERNAL_TYPE|UNPUBLISHED", Always, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
                row(" ", "GENRE:BIBUTILS|unpublished", Always, LEVEL_MAIN),
            ]),
        ],
    };
}
