//! Converter bodies shared by every dialect. A dialect's convert pass
//! matches on the [`ProcessingKind`](crate::reftypes::ProcessingKind) of
//! each translated tag and calls these unless it has its own handler.

use crate::fields::FieldStore;
use crate::param::Param;
use crate::{genres, name, notes, pages, serialno, title, url};
use std::io::{self, Write};

pub fn convert_simple(out: &mut FieldStore, outtag: &str, value: &str, level: i32) {
    out.add(outtag, value, level);
}

pub fn convert_title(out: &mut FieldStore, outtag: &str, value: &str, level: i32, p: &Param) {
    title::process_title(out, outtag, value, level, p.nosplittitle);
}

pub fn convert_person(out: &mut FieldStore, outtag: &str, value: &str, level: i32, p: &Param) {
    name::add_name(out, outtag, value, level, &p.asis, &p.corps);
}

pub fn convert_pages(out: &mut FieldStore, value: &str, level: i32) {
    pages::add_pages(out, value, level);
}

pub fn convert_serialno(out: &mut FieldStore, value: &str, level: i32) {
    serialno::add_serial_number(out, value, level);
}

pub fn convert_notes(out: &mut FieldStore, value: &str, level: i32) {
    notes::add_notes(out, value, level);
}

pub fn convert_url(out: &mut FieldStore, value: &str, level: i32) {
    url::split_and_add(out, value, level);
}

/// Route a genre term to `GENRE:MARC`, `GENRE:BIBUTILS`, or
/// `GENRE:UNKNOWN` by vocabulary membership.
pub fn convert_genre(out: &mut FieldStore, value: &str, level: i32) {
    let tag = if genres::is_marc_genre(value) {
        "GENRE:MARC"
    } else if genres::is_extra_genre(value) {
        "GENRE:BIBUTILS"
    } else {
        "GENRE:UNKNOWN"
    };
    out.add(tag, value, level);
}

/// Split a delimiter-joined keyword list into one `KEYWORD` per entry.
///
/// Semicolons are the delimiter; commas would break entries like
/// "Microscopy, Confocal".
pub fn convert_keyword(out: &mut FieldStore, outtag: &str, value: &str, level: i32) {
    for kw in value.split(';') {
        let kw = kw.trim();
        if !kw.is_empty() {
            out.add(outtag, kw, level);
        }
    }
}

/// Strip embedded DOI spellings; values without a recognizable DOI are
/// dropped, matching the reading that these tags carry nothing else.
pub fn convert_doi(out: &mut FieldStore, value: &str, level: i32) {
    if let Some(off) = url::doi_offset(value) {
        out.add("DOI", &value[off..], level);
    }
}

/// Shared header: a byte-order mark when UTF-8 output asked for one.
pub fn write_header(w: &mut dyn Write, p: &Param) -> io::Result<()> {
    if p.utf8_out && p.utf8_bom {
        crate::charsets::write_bom(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_MAIN};
    use pretty_assertions::assert_eq;

    #[test]
    fn keyword_splitting() {
        let mut f = FieldStore::new();
        convert_keyword(&mut f, "KEYWORD", "alpha; beta ;; Microscopy, Confocal", LEVEL_MAIN);
        let values: Vec<&str> = f.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["alpha", "beta", "Microscopy, Confocal"]);
    }

    #[test]
    fn genre_routing() {
        let mut f = FieldStore::new();
        convert_genre(&mut f, "periodical", LEVEL_MAIN);
        convert_genre(&mut f, "academic journal", LEVEL_MAIN);
        convert_genre(&mut f, "interpretive dance", LEVEL_MAIN);
        assert_eq!(f.value_of("GENRE:MARC", LEVEL_ANY), Some("periodical"));
        assert_eq!(f.value_of("GENRE:BIBUTILS", LEVEL_ANY), Some("academic journal"));
        assert_eq!(f.value_of("GENRE:UNKNOWN", LEVEL_ANY), Some("interpretive dance"));
    }

    #[test]
    fn doi_cleaning() {
        let mut f = FieldStore::new();
        convert_doi(&mut f, "https://doi.org/10.1000/xyz", LEVEL_MAIN);
        assert_eq!(f.value_of("DOI", LEVEL_ANY), Some("10.1000/xyz"));
    }
}
