//! EndNote refer reader.
//!
//! Tagged lines look like `%A value` (a `%`, one alphanumeric or
//! punctuation character, a space); a blank line separates references.
//! Untagged lines continue the previous value, except after `%K`, where
//! EndNote puts one keyword per line with the tag only on the first.

use super::{endtypes::END_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::date::normalize_month;
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::generic;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::url;
use crate::warn;
use std::io;

pub struct EndnoteIn;

fn is_end_tag(line: &str) -> bool {
    let c: Vec<char> = line.chars().take(3).collect();
    if c.len() < 3 || c[0] != '%' || c[2] != ' ' {
        return false;
    }
    c[1].is_ascii_alphanumeric() || "!@#$^&*()+=?[~>".contains(c[1])
}

fn tagged_line(line: &str) -> (String, String) {
    let tag: String = line.chars().take(2).collect();
    let value: String = line.chars().skip(2).collect();
    (tag, value.trim().to_string())
}

impl InputDriver for EndnoteIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = false;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &END_TABLE
    }

    fn read(&mut self, lines: &mut LineCarry) -> io::Result<Option<RawRecord>> {
        let mut reference = String::new();
        let mut charset = None;
        let mut inref = false;

        while let Some(line) = lines.next_line()? {
            let mut line = line.as_str();
            if charsets::starts_with_bom(line) {
                charset = Some(Charset::Unicode);
                line = charsets::skip_bom(line);
            }

            if line.is_empty() {
                if inref {
                    break;
                }
                continue;
            }

            if is_end_tag(line) {
                if !reference.is_empty() {
                    reference.push('\n');
                }
                reference.push_str(line);
                inref = true;
            } else if inref {
                reference.push('\n');
                reference.push_str(line);
            }
        }

        if reference.is_empty() {
            Ok(None)
        } else {
            Ok(Some(RawRecord {
                text: reference,
                charset,
            }))
        }
    }

    fn process(
        &mut self,
        fin: &mut FieldStore,
        text: &str,
        _filename: &str,
        _nref: usize,
        _p: &Param,
    ) -> bool {
        for line in text.lines() {
            if is_end_tag(line) {
                let (tag, value) = tagged_line(line);
                if !value.is_empty() {
                    fin.add_can_dup(&tag, &value, LEVEL_MAIN);
                }
            } else if fin.num() > 0 {
                let value = line.trim();
                if value.is_empty() {
                    continue;
                }
                let n = fin.num() - 1;
                if fin.tag(n) == "%K" {
                    // keywords continue one per line with the tag elided
                    fin.add_can_dup("%K", value, LEVEL_MAIN);
                } else {
                    let merged = format!("{} {}", fin.value(n), value);
                    fin.set_value(n, merged);
                }
            }
        }
        true
    }

    fn clean(&self, refs: &mut [FieldStore], _p: &Param) {
        for f in refs.iter_mut() {
            clean_wiley_authors(f);
        }
    }

    fn typify(&self, fin: &FieldStore, _filename: &str, nref: usize, p: &Param) -> usize {
        let refname = fin.value_of_nouse("%F", LEVEL_MAIN).unwrap_or("");
        let explicit = fin.value_of_nouse("%0", LEVEL_MAIN);

        let type_name = match explicit {
            Some(t) => t.to_string(),
            None => implied_type(fin).to_string(),
        };

        let mut is_default = false;
        reftypes::get_reftype(
            &type_name,
            nref,
            &p.progname,
            self.table(),
            refname,
            &mut is_default,
            true,
        )
    }

    fn convert(&self, fin: &FieldStore, reftype: usize, p: &Param, out: &mut FieldStore) {
        for n in 0..fin.num() {
            let tag = fin.tag(n);
            let Some(rule) = reftypes::translate(tag, reftype, self.table()) else {
                if p.verbose >= 1 {
                    warn!("{}: cannot find tag '{}'", p.progname, tag);
                }
                continue;
            };
            let value = fin.value(n);
            let level = rule.level;
            match rule.kind {
                ProcessingKind::Simple => generic::convert_simple(out, rule.newtag, value, level),
                ProcessingKind::Title => generic::convert_title(out, rule.newtag, value, level, p),
                ProcessingKind::Person => generic::convert_person(out, rule.newtag, value, level, p),
                ProcessingKind::Pages => generic::convert_pages(out, value, level),
                ProcessingKind::SerialNo => generic::convert_serialno(out, value, level),
                ProcessingKind::Notes => generic::convert_notes(out, value, level),
                ProcessingKind::Url => generic::convert_url(out, value, level),
                ProcessingKind::Genre => generic::convert_genre(out, value, level),
                ProcessingKind::Doi => convert_doi(out, value, level),
                ProcessingKind::Date => convert_date(out, tag, rule.newtag, value, level),
                ProcessingKind::Type => convert_type(out, value, level),
                _ => {}
            }
        }
    }
}

/// Fallback typing when `%0` is absent:
/// journal+volume means an article, `%B` a book section, `%R` without a
/// title a report, a publisher alone a book.
fn implied_type(f: &FieldStore) -> &'static str {
    let has = |tag| f.find(tag, LEVEL_MAIN).is_some();
    if has("%J") && has("%V") {
        "Journal Article"
    } else if has("%B") {
        "Book Section"
    } else if has("%R") && !has("%T") {
        "Report"
    } else if has("%I") && !has("%B") && !has("%J") && !has("%R") {
        "Book"
    } else if !has("%B") && !has("%J") && !has("%R") && !has("%I") {
        "Journal Article"
    } else {
        "Generic"
    }
}

/// Wiley joins several authors on one `%A` line, separated by commas and
/// with a trailing comma to mark the style. Split them into individual
/// fields before name parsing.
fn clean_wiley_authors(f: &mut FieldStore) {
    for n in 0..f.num() {
        if f.tag(n) != "%A" {
            continue;
        }
        let value = f.value(n).to_string();
        if !value.ends_with(',') {
            continue;
        }
        let level = f.level(n);
        let names: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let mut names = names.into_iter();
        if let Some(first) = names.next() {
            f.set_value(n, first);
        }
        for rest in names {
            f.add_can_dup("%A", &rest, level);
        }
    }
}

fn convert_doi(out: &mut FieldStore, value: &str, level: i32) {
    match url::doi_offset(value) {
        Some(off) => out.add("DOI", &value[off..], level),
        // %R is used for all kinds of identifiers, keep unrecognized ones
        None => url::split_and_add(out, value, level),
    }
}

/// `%D` is a year; `%8` is "Month Day, Year", "Month, Year" or
/// "Month Year".
fn convert_date(out: &mut FieldStore, intag: &str, outtag: &str, value: &str, level: i32) {
    let part = outtag.len() >= 4 && outtag[..4].eq_ignore_ascii_case("PART");
    let (ytag, mtag, dtag) = if part {
        ("PARTDATE:YEAR", "PARTDATE:MONTH", "PARTDATE:DAY")
    } else {
        ("DATE:YEAR", "DATE:MONTH", "DATE:DAY")
    };

    if intag == "%D" {
        let year = value.trim();
        if !year.is_empty() {
            out.add(ytag, year, level);
        }
        return;
    }

    let mut pieces = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    if let Some(month) = pieces.next() {
        out.add(mtag, &normalize_month(month), level);
    }
    if let Some(next) = pieces.next() {
        if next.len() == 4 {
            out.add(ytag, next, level);
            return;
        }
        if next.len() < 3 {
            out.add(dtag, next, level);
        }
    }
    if let Some(year) = pieces.next() {
        out.add(ytag, year, level);
    }
}

/// `%0` type names to internal types.
fn convert_type(out: &mut FieldStore, value: &str, level: i32) {
    static TYPES: &[(&str, &str)] = &[
        ("GENERIC", "ARTICLE"),
        ("BOOK", "BOOK"),
        ("MANUSCRIPT", "MANUSCRIPT"),
        ("CONFERENCE PROCEEDINGS", "INPROCEEDINGS"),
        ("CONFERENCE PAPER", "INPROCEEDINGS"),
        ("REPORT", "REPORT"),
        ("COMPUTER PROGRAM", "BOOK"),
        ("AUDIOVISUAL MATERIAL", "AUDIOVISUAL"),
        ("ARTWORK", "BOOK"),
        ("PATENT", "BOOK"),
        ("BILL", "BILL"),
        ("CASE", "CASE"),
        ("JOURNAL ARTICLE", "ARTICLE"),
        ("MAGAZINE ARTICLE", "ARTICLE"),
        ("BOOK SECTION", "INBOOK"),
        ("EDITED BOOK", "BOOK"),
        ("NEWSPAPER ARTICLE", "NEWSARTICLE"),
        ("THESIS", "PHDTHESIS"),
        ("PERSONAL COMMUNICATION", "COMMUNICATION"),
        ("ELECTRONIC SOURCE", "TEXT"),
        ("FILM OR BROADCAST", "AUDIOVISUAL"),
        ("MAP", "MAP"),
        ("HEARING", "HEARING"),
        ("STATUTE", "STATUTE"),
        ("CHART OR TABLE", "CHART"),
        ("WEB PAGE", "WEBPAGE"),
    ];

    let internal = TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, internal)| *internal);

    match internal {
        Some(t) => out.add("INTERNAL_TYPE", t, level),
        None => {
            warn!("did not identify reference type '{}', defaulting to journal article", value);
            out.add("INTERNAL_TYPE", "ARTICLE", level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_recognition() {
        assert!(is_end_tag("%A Doe, Jane"));
        assert!(is_end_tag("%0 Journal Article"));
        assert!(is_end_tag("%@ 0317-8471"));
        assert!(!is_end_tag("%AB"));
        assert!(!is_end_tag("plain text"));
    }

    #[test]
    fn blank_line_separates_references() {
        let data = b"%0 Journal Article\n%A Doe, Jane\n\n%0 Book\n%A Smith, John\n";
        let mut src: &[u8] = data;
        let mut lines = LineCarry::new(&mut src);
        let mut drv = EndnoteIn;
        let first = drv.read(&mut lines).unwrap().unwrap();
        assert!(first.text.contains("%A Doe, Jane"));
        assert!(!first.text.contains("Smith"));
        let second = drv.read(&mut lines).unwrap().unwrap();
        assert!(second.text.contains("%0 Book"));
    }

    #[test]
    fn multiline_values_concatenate_with_space() {
        let mut f = FieldStore::new();
        let mut drv = EndnoteIn;
        drv.process(&mut f, "%T A Title that\nwraps onto two lines", "t", 1, &Param::new("t"));
        assert_eq!(
            f.value_of_nouse("%T", LEVEL_MAIN),
            Some("A Title that wraps onto two lines")
        );
    }

    #[test]
    fn keyword_lines_stay_separate() {
        let mut f = FieldStore::new();
        let mut drv = EndnoteIn;
        drv.process(&mut f, "%K alpha\nbeta\ngamma", "t", 1, &Param::new("t"));
        assert_eq!(f.find_each("%K", LEVEL_MAIN).len(), 3);
    }

    #[test]
    fn wiley_authors_split_on_terminal_comma() {
        let mut f = FieldStore::new();
        f.add_can_dup("%A", "Author A. X. Last, Author N. B. Next,", LEVEL_MAIN);
        clean_wiley_authors(&mut f);
        let values: Vec<&str> = f.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["Author A. X. Last", "Author N. B. Next"]);
    }

    #[test]
    fn month_day_year_parsing() {
        let mut out = FieldStore::new();
        convert_date(&mut out, "%8", "DATE:MONTH", "July 4, 1776", LEVEL_MAIN);
        assert_eq!(out.value_of("DATE:MONTH", LEVEL_MAIN), Some("07"));
        assert_eq!(out.value_of("DATE:DAY", LEVEL_MAIN), Some("4"));
        assert_eq!(out.value_of("DATE:YEAR", LEVEL_MAIN), Some("1776"));
    }

    #[test]
    fn month_year_parsing() {
        let mut out = FieldStore::new();
        convert_date(&mut out, "%8", "DATE:MONTH", "July 1776", LEVEL_MAIN);
        assert_eq!(out.value_of("DATE:MONTH", LEVEL_MAIN), Some("07"));
        assert_eq!(out.value_of("DATE:YEAR", LEVEL_MAIN), Some("1776"));
        assert_eq!(out.find("DATE:DAY", LEVEL_MAIN), None);
    }

    #[test]
    fn implied_types() {
        let mut f = FieldStore::new();
        f.add("%J", "J. Test.", LEVEL_MAIN);
        f.add("%V", "12", LEVEL_MAIN);
        assert_eq!(implied_type(&f), "Journal Article");

        let mut f = FieldStore::new();
        f.add("%B", "A Book", LEVEL_MAIN);
        assert_eq!(implied_type(&f), "Book Section");
    }
}
