//! COPAC tag lookup table. The catalog carries no type marker beyond the
//! free-text `DT-` field, so a single generic variant does the work.

use crate::fields::{LEVEL_HOST, LEVEL_MAIN};
use crate::reftypes::ProcessingKind::*;
use crate::reftypes::{row, RefTypeTable, RefTypeVariant};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref COPAC_TABLE: RefTypeTable = RefTypeTable {
        variants: vec![RefTypeVariant::new(
            "Generic",
            vec![
                row("TI-", "TITLE", Title, LEVEL_MAIN),
                row("AU-", "AUTHOR", Person, LEVEL_MAIN),
                row("MV-", "VOLUME", Simple, LEVEL_MAIN),
                row("SE-", "TITLE", Title, LEVEL_HOST),
                row("ED-", "EDITION", Simple, LEVEL_MAIN),
                row("SC-", "SCALE", Simple, LEVEL_MAIN),
                row("PU-", "PUBLISHER", Simple, LEVEL_MAIN),
                row("PY-", "DATE:YEAR", Simple, LEVEL_MAIN),
                row("PD-", "DESCRIPTION", Simple, LEVEL_MAIN),
                row("DT-", "TYPE", Simple, LEVEL_MAIN),
                row("LA-", "LANGUAGE", Simple, LEVEL_MAIN),
                row("IS-", "SERIALNUMBER", SerialNo, LEVEL_MAIN),
                row("NT-", "NOTES", Notes, LEVEL_MAIN),
                row("KW-", "KEYWORD", Simple, LEVEL_MAIN),
                row("UL-", "URL", Simple, LEVEL_MAIN),
                row("HL-", "LOCATION", Simple, LEVEL_MAIN),
                row(" ", "RESOURCE|text", Always, LEVEL_MAIN),
            ],
        )],
    };
}
