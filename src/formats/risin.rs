//! RIS reader.
//!
//! A tag is strictly `XX  - ` (uppercase letter, letter or digit, two
//! spaces, dash, space), with a three-space sloppy form tolerated because
//! some publishers emit it. References run from `TY  - ` to `ER  - `.

use super::{ristypes::RIS_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::generic;
use crate::name;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::url;
use crate::warn;
use std::io;

pub struct RisIn;

fn is_ris_tag(line: &str) -> bool {
    let c: Vec<char> = line.chars().take(7).collect();
    if c.len() < 5 {
        return false;
    }
    if !c[0].is_ascii_uppercase() {
        return false;
    }
    if !(c[1].is_ascii_uppercase() || c[1].is_ascii_digit()) {
        return false;
    }
    if c[2] != ' ' || c[3] != ' ' {
        return false;
    }
    match c[4] {
        '-' => matches!(c.get(5), None | Some(' ')),
        ' ' => c.get(5) == Some(&'-') && matches!(c.get(6), None | Some(' ')),
        _ => false,
    }
}

fn is_start_tag(line: &str) -> bool {
    line.starts_with("TY  - ") || line.starts_with("TY   - ")
}

fn is_end_tag(line: &str) -> bool {
    line.starts_with("ER  -") || line.starts_with("ER   -")
}

/// Split one tagged line into its two-character tag and its value.
fn tagged_line(line: &str) -> (String, String) {
    let tag: String = line.chars().take(2).collect();
    let rest: String = line.chars().skip(6).collect();
    (tag, rest.trim().to_string())
}

impl InputDriver for RisIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = false;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &RIS_TABLE
    }

    fn read(&mut self, lines: &mut LineCarry) -> io::Result<Option<RawRecord>> {
        let mut reference = String::new();
        let mut charset = None;
        let mut inref = false;

        while let Some(line) = lines.next_line()? {
            let mut line = line.as_str();
            if line.is_empty() {
                continue;
            }
            if charsets::starts_with_bom(line) {
                charset = Some(Charset::Unicode);
                line = charsets::skip_bom(line);
            }

            if is_start_tag(line) {
                if inref {
                    // read one reference too far; hand the line back
                    lines.push_back(line.to_string());
                    break;
                }
                inref = true;
            }

            if is_ris_tag(line) {
                if !inref {
                    warn!("tagged line outside a started reference, ignored: '{}'", line);
                } else if is_end_tag(line) {
                    inref = false;
                    break;
                } else {
                    reference.push('\n');
                    reference.push_str(line);
                }
            } else if inref && !is_end_tag(line) {
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
        let mut last_tagged = false;
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            if is_ris_tag(line) {
                let (tag, value) = tagged_line(line);
                if value.is_empty() {
                    last_tagged = false;
                } else {
                    fin.add_can_dup(&tag, &value, LEVEL_MAIN);
                    last_tagged = true;
                }
            } else if last_tagged && fin.num() > 0 {
                // continuation line folds into the previous value
                let n = fin.num() - 1;
                let merged = format!("{} {}", fin.value(n), line.trim());
                fin.set_value(n, merged);
            }
        }
        true
    }

    fn typify(&self, fin: &FieldStore, _filename: &str, nref: usize, p: &Param) -> usize {
        let type_name = fin.value_of_nouse("TY", LEVEL_MAIN).unwrap_or("");
        let refname = fin.value_of_nouse("ID", LEVEL_MAIN).unwrap_or("");
        let mut is_default = false;
        reftypes::get_reftype(
            type_name,
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
                if p.verbose >= 1 && tag != "TY" {
                    warn!("{}: did not identify RIS tag '{}'", p.progname, tag);
                }
                continue;
            };
            let value = fin.value(n);
            let level = rule.level;
            match rule.kind {
                ProcessingKind::Simple => generic::convert_simple(out, rule.newtag, value, level),
                ProcessingKind::Title => generic::convert_title(out, rule.newtag, value, level, p),
                ProcessingKind::SerialNo => generic::convert_serialno(out, value, level),
                ProcessingKind::Notes => generic::convert_notes(out, value, level),
                ProcessingKind::Url => generic::convert_url(out, value, level),
                ProcessingKind::Genre => generic::convert_genre(out, value, level),
                ProcessingKind::Person => convert_person(out, rule.newtag, value, level, p),
                ProcessingKind::Date => convert_date(out, rule.newtag, value, level),
                ProcessingKind::Doi => generic::convert_doi(out, value, level),
                ProcessingKind::LinkedFile => convert_linkedfile(out, rule.newtag, value, level),
                _ => {}
            }
        }
        thesis_hints(fin, reftype, self.table(), out);
    }
}

/// RIS name lines hold one name each, but sloppy exports join several
/// with "and".
fn convert_person(out: &mut FieldStore, outtag: &str, value: &str, level: i32, p: &Param) {
    name::add_names_split_on_and(out, outtag, value, level, &p.asis, &p.corps);
}

/// `PY  - YYYY/MM/DD/other` (every piece optional).
fn convert_date(out: &mut FieldStore, outtag: &str, value: &str, level: i32) {
    let part = outtag.len() >= 4 && outtag[..4].eq_ignore_ascii_case("PART");
    let tags = if part {
        ["PARTDATE:YEAR", "PARTDATE:MONTH", "PARTDATE:DAY", "PARTDATE:OTHER"]
    } else {
        ["DATE:YEAR", "DATE:MONTH", "DATE:DAY", "DATE:OTHER"]
    };

    let mut pieces = value.splitn(4, '/');
    for tag in tags {
        match pieces.next() {
            Some(piece) if !piece.is_empty() => out.add(tag, piece, level),
            Some(_) => {}
            None => break,
        }
    }
}

/// `L1`/`L4` should be `file:` URIs; remote URIs belong in `URL`.
fn convert_linkedfile(out: &mut FieldStore, outtag: &str, value: &str, level: i32) {
    if let Some(stripped) = value.strip_prefix("file:") {
        out.add(outtag, stripped, level);
    } else if url::uri_scheme_len(value).is_some() {
        out.add("URL", value, level);
    } else {
        // badly formed, store the value anyway
        out.add(outtag, value, level);
    }
}

/// `U1` thesis-kind hints on `TY  - THES` records.
fn thesis_hints(fin: &FieldStore, reftype: usize, table: &RefTypeTable, out: &mut FieldStore) {
    const KINDS: &[&str] = &[
        "Ph.D. Thesis",
        "Masters Thesis",
        "Diploma Thesis",
        "Doctoral Thesis",
        "Habilitation Thesis",
        "Licentiate Thesis",
    ];
    if !table.variants[reftype].type_name.eq_ignore_ascii_case("THES") {
        return;
    }
    for n in 0..fin.num() {
        if !fin.tag(n).eq_ignore_ascii_case("U1") {
            continue;
        }
        let value = fin.value(n);
        if KINDS.iter().any(|k| k.eq_ignore_ascii_case(value)) {
            out.add("GENRE:BIBUTILS", value, LEVEL_MAIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_recognition() {
        assert!(is_ris_tag("TY  - JOUR"));
        assert!(is_ris_tag("ER  -"));
        assert!(is_ris_tag("A2   - Three-space tolerance"));
        assert!(!is_ris_tag("ty  - JOUR"));
        assert!(!is_ris_tag("TY -  JOUR"));
        assert!(!is_ris_tag("random text"));
    }

    #[test]
    fn reader_slices_on_ty_and_er() {
        let data = b"TY  - JOUR\nAU  - Doe, Jane\nER  - \nTY  - BOOK\nER  - \n";
        let mut src: &[u8] = data;
        let mut lines = LineCarry::new(&mut src);
        let mut drv = RisIn;
        let first = drv.read(&mut lines).unwrap().unwrap();
        assert!(first.text.contains("AU  - Doe, Jane"));
        let second = drv.read(&mut lines).unwrap().unwrap();
        assert!(second.text.contains("TY  - BOOK"));
        assert!(drv.read(&mut lines).unwrap().is_none());
    }

    #[test]
    fn continuation_lines_merge() {
        let mut f = FieldStore::new();
        let mut drv = RisIn;
        let text = "\nTY  - JOUR\nN1  - a note that\nspans two lines";
        drv.process(&mut f, text, "t", 1, &Param::new("t"));
        assert_eq!(f.value_of_nouse("N1", LEVEL_MAIN), Some("a note that spans two lines"));
    }

    #[test]
    fn date_splitting() {
        let mut out = FieldStore::new();
        convert_date(&mut out, "DATE:YEAR", "2020/03/15/", LEVEL_MAIN);
        assert_eq!(out.value_of("DATE:YEAR", LEVEL_MAIN), Some("2020"));
        assert_eq!(out.value_of("DATE:MONTH", LEVEL_MAIN), Some("03"));
        assert_eq!(out.value_of("DATE:DAY", LEVEL_MAIN), Some("15"));
        assert_eq!(out.find("DATE:OTHER", LEVEL_MAIN), None);
    }

    #[test]
    fn partdate_tags() {
        let mut out = FieldStore::new();
        convert_date(&mut out, "PARTDATE:YEAR", "1998//", LEVEL_MAIN);
        assert_eq!(out.value_of("PARTDATE:YEAR", LEVEL_MAIN), Some("1998"));
    }

    #[test]
    fn linked_file_routing() {
        let mut out = FieldStore::new();
        convert_linkedfile(&mut out, "FILEATTACH", "file:///papers/x.pdf", LEVEL_MAIN);
        convert_linkedfile(&mut out, "FILEATTACH", "https://example.org/x.pdf", LEVEL_MAIN);
        convert_linkedfile(&mut out, "FILEATTACH", "x.pdf", LEVEL_MAIN);
        assert_eq!(out.value_of("FILEATTACH", LEVEL_MAIN), Some("///papers/x.pdf"));
        assert_eq!(out.value_of("URL", LEVEL_MAIN), Some("https://example.org/x.pdf"));
        let values: Vec<&str> = out.iter().map(|r| r.value()).collect();
        assert!(values.contains(&"x.pdf"));
    }
}
