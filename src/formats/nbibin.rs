//! PubMed NBIB reader.
//!
//! Tags are four characters of uppercase letters padded with spaces,
//! then `- `. A reference starts at `PMID- ` and ends at a blank line.

use super::{nbibtypes::NBIB_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::generic;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::warn;
use std::io;

pub struct NbibIn;

fn is_nbib_tag(line: &str) -> bool {
    let c: Vec<char> = line.chars().take(6).collect();
    if c.len() < 6 {
        return false;
    }
    c[0].is_ascii_uppercase()
        && c[1].is_ascii_uppercase()
        && (c[2].is_ascii_uppercase() || c[2] == ' ')
        && (c[3].is_ascii_uppercase() || c[3] == ' ')
        && c[4] == '-'
        && c[5] == ' '
}

fn tagged_line(line: &str) -> (String, String) {
    let tag: String = line.chars().take(4).collect::<String>().trim_end().to_string();
    let value: String = line.chars().skip(6).collect();
    (tag, value.trim().to_string())
}

impl InputDriver for NbibIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = false;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &NBIB_TABLE
    }

    fn read(&mut self, lines: &mut LineCarry) -> io::Result<Option<RawRecord>> {
        let mut reference = String::new();
        let mut charset = None;
        let mut inref = false;

        while let Some(line) = lines.next_line()? {
            let mut line = line.as_str();
            if line.is_empty() {
                if !reference.is_empty() {
                    break;
                }
                continue;
            }
            if charsets::starts_with_bom(line) {
                charset = Some(Charset::Unicode);
                line = charsets::skip_bom(line);
            }

            if line.starts_with("PMID- ") {
                if inref {
                    lines.push_back(line.to_string());
                    break;
                }
                inref = true;
            }

            if is_nbib_tag(line) {
                if !inref {
                    warn!("tagged line outside a started reference, ignored: '{}'", line);
                } else {
                    reference.push('\n');
                    reference.push_str(line);
                }
            } else if inref && line.chars().count() >= 6 {
                // continuation: skip the five-character tag gutter
                let rest: String = line.chars().skip(5).collect();
                reference.push_str(&rest);
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
            if line.is_empty() {
                continue;
            }
            if is_nbib_tag(line) {
                let (tag, value) = tagged_line(line);
                fin.add_can_dup(&tag, &value, LEVEL_MAIN);
            } else if fin.num() > 0 {
                let n = fin.num() - 1;
                let merged = format!("{} {}", fin.value(n), line.trim());
                fin.set_value(n, merged);
            }
        }
        true
    }

    fn typify(&self, fin: &FieldStore, _filename: &str, nref: usize, p: &Param) -> usize {
        let refname = fin.value_of_nouse("PMID", LEVEL_MAIN).unwrap_or("");

        // PT repeats ("Journal Article", "Review", …); take the first
        // value the table knows
        let mut is_default = true;
        let mut reftype = 0;
        for n in fin.find_each("PT", LEVEL_MAIN) {
            reftype = reftypes::get_reftype(
                fin.value(n),
                nref,
                &p.progname,
                self.table(),
                refname,
                &mut is_default,
                false,
            );
            if !is_default {
                break;
            }
        }
        if is_default {
            warn!(
                "{}: did not recognize type of refnum {} ({}), defaulting to {}",
                p.progname,
                nref,
                refname,
                self.table().variants[0].type_name
            );
        }
        reftype
    }

    fn convert(&self, fin: &FieldStore, reftype: usize, p: &Param, out: &mut FieldStore) {
        for n in 0..fin.num() {
            let tag = fin.tag(n);
            let Some(rule) = reftypes::translate(tag, reftype, self.table()) else {
                if p.verbose >= 1 {
                    warn!("{}: did not identify NBIB tag '{}'", p.progname, tag);
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
                ProcessingKind::Date => convert_date(out, value, level),
                ProcessingKind::Doi => convert_id(out, value, level),
                _ => {}
            }
        }
    }
}

/// `DP  - 2016 May 7`
fn convert_date(out: &mut FieldStore, value: &str, level: i32) {
    let mut pieces = value.split_whitespace();
    if let Some(y) = pieces.next() {
        out.add("DATE:YEAR", y, level);
    }
    if let Some(m) = pieces.next() {
        out.add("DATE:MONTH", &crate::date::normalize_month(m), level);
    }
    if let Some(d) = pieces.next() {
        out.add("DATE:DAY", d, level);
    }
}

/// `LID`/`AID` carry `<id> [doi]` or `<id> [pii]`.
fn convert_id(out: &mut FieldStore, value: &str, level: i32) {
    let mut pieces = value.split_whitespace();
    let (Some(id), Some(kind)) = (pieces.next(), pieces.next()) else {
        return;
    };
    match kind {
        "[doi]" => out.add("DOI", id, level),
        "[pii]" => out.add("PII", id, level),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_recognition() {
        assert!(is_nbib_tag("PMID- 12345"));
        assert!(is_nbib_tag("AB  - Abstract text"));
        assert!(is_nbib_tag("FAU - Doe, Jane"));
        assert!(!is_nbib_tag("pmid- 123"));
        assert!(!is_nbib_tag("AB - short gutter"));
    }

    #[test]
    fn record_bounded_by_pmid_and_blank_line() {
        let data = b"PMID- 1\nTI  - First\n\nPMID- 2\nTI  - Second\n";
        let mut src: &[u8] = data;
        let mut lines = LineCarry::new(&mut src);
        let mut drv = NbibIn;
        let first = drv.read(&mut lines).unwrap().unwrap();
        assert!(first.text.contains("TI  - First"));
        assert!(!first.text.contains("Second"));
        let second = drv.read(&mut lines).unwrap().unwrap();
        assert!(second.text.contains("PMID- 2"));
    }

    #[test]
    fn date_parsing() {
        let mut out = FieldStore::new();
        convert_date(&mut out, "2016 May 7", LEVEL_MAIN);
        assert_eq!(out.value_of("DATE:YEAR", LEVEL_MAIN), Some("2016"));
        assert_eq!(out.value_of("DATE:MONTH", LEVEL_MAIN), Some("05"));
        assert_eq!(out.value_of("DATE:DAY", LEVEL_MAIN), Some("7"));
    }

    #[test]
    fn lid_doi_and_pii() {
        let mut out = FieldStore::new();
        convert_id(&mut out, "10.1000/xyz [doi]", LEVEL_MAIN);
        convert_id(&mut out, "S0000(16)000-1 [pii]", LEVEL_MAIN);
        assert_eq!(out.value_of("DOI", LEVEL_MAIN), Some("10.1000/xyz"));
        assert_eq!(out.value_of("PII", LEVEL_MAIN), Some("S0000(16)000-1"));
    }

    #[test]
    fn fau_preferred_over_au() {
        let mut f = FieldStore::new();
        let mut drv = NbibIn;
        drv.process(
            &mut f,
            "\nPMID- 1\nFAU - Doe, Jane\nAU  - Doe J\nPT  - Journal Article",
            "t",
            1,
            &Param::new("t"),
        );
        let reftype = drv.typify(&f, "t", 1, &Param::new("t"));
        let mut out = FieldStore::new();
        drv.convert(&f, reftype, &Param::new("t"), &mut out);
        assert_eq!(out.value_of("AUTHOR", LEVEL_MAIN), Some("Doe|Jane"));
        // the abbreviated AU duplicate is dropped
        assert_eq!(out.find_each("AUTHOR", LEVEL_MAIN).len(), 1);
    }
}
