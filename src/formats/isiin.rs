//! ISI Web of Science reader.
//!
//! Strict two-character uppercase tags followed by a space; the `FN` and
//! `VR` file headers are validated; a record ends at `ER`.

use super::{isitypes::ISI_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::generic;
use crate::name;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::warn;
use std::io;

pub struct IsiIn;

fn is_isi_tag(line: &str) -> bool {
    let mut c = line.chars();
    let (Some(c0), Some(c1)) = (c.next(), c.next()) else {
        return false;
    };
    c0.is_ascii_uppercase() && (c1.is_ascii_uppercase() || c1.is_ascii_digit())
}

fn tagged_line(line: &str) -> (String, String) {
    let tag: String = line.chars().take(2).collect();
    let value: String = line.chars().skip(2).collect();
    (tag, value.trim().to_string())
}

impl InputDriver for IsiIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = false;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &ISI_TABLE
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

            if is_isi_tag(line) {
                if line.starts_with("FN ") {
                    if !line.to_ascii_lowercase().starts_with("fn isi export format") {
                        warn!("warning: file FN type '{}' not recognized", line);
                    }
                } else if line.starts_with("VR ") {
                    if !line.starts_with("VR 1.0") {
                        warn!("warning: file version '{}' not recognized, expected 'VR 1.0'", line);
                    }
                } else if line.starts_with("ER") {
                    if !reference.is_empty() {
                        return Ok(Some(RawRecord {
                            text: reference,
                            charset,
                        }));
                    }
                } else {
                    reference.push('\n');
                    reference.push_str(line);
                    inref = true;
                }
            } else if inref {
                reference.push('\n');
                reference.push_str(line);
            }
        }

        // only ER-terminated records count; a trailing fragment (the EF
        // end-of-file marker included) is dropped
        Ok(None)
    }

    fn process(
        &mut self,
        fin: &mut FieldStore,
        text: &str,
        _filename: &str,
        _nref: usize,
        _p: &Param,
    ) -> bool {
        let mut last_tag = String::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            if is_isi_tag(line) {
                let (tag, value) = tagged_line(line);
                if !value.is_empty() {
                    fin.add_can_dup(&tag, &value, LEVEL_MAIN);
                    last_tag = tag;
                }
            } else {
                let value = line.trim();
                if value.is_empty() || fin.num() == 0 {
                    continue;
                }
                // author lists put one name per continuation line
                if last_tag == "AU" || last_tag == "AF" {
                    fin.add_can_dup(&last_tag, value, LEVEL_MAIN);
                } else {
                    let n = fin.num() - 1;
                    let merged = format!("{} {}", fin.value(n), value);
                    fin.set_value(n, merged);
                }
            }
        }
        true
    }

    fn typify(&self, fin: &FieldStore, _filename: &str, nref: usize, p: &Param) -> usize {
        let type_name = fin.value_of_nouse("PT", LEVEL_MAIN).unwrap_or("");
        let refname = fin.value_of_nouse("UT", LEVEL_MAIN).unwrap_or("");
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
        // authors first: AF (full names) wins over AU (abbreviated)
        let authortag = if fin.find("AF", LEVEL_MAIN).is_some() {
            Some("AF")
        } else if fin.find("AU", LEVEL_MAIN).is_some() {
            Some("AU")
        } else {
            None
        };
        if let Some(atag) = authortag {
            if let Some(rule) = reftypes::translate(atag, reftype, self.table()) {
                for n in fin.find_each(atag, LEVEL_MAIN) {
                    name::add_name(out, rule.newtag, fin.value(n), rule.level, &p.asis, &p.corps);
                }
            }
        }

        for n in 0..fin.num() {
            let tag = fin.tag(n);
            if tag == "AU" || tag == "AF" {
                continue; // handled above
            }
            let Some(rule) = reftypes::translate(tag, reftype, self.table()) else {
                if p.verbose >= 1 {
                    warn!("{}: did not identify ISI tag '{}'", p.progname, tag);
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
                ProcessingKind::Keyword => generic::convert_keyword(out, rule.newtag, value, level),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_ends_at_er() {
        let data = b"FN ISI Export Format\nVR 1.0\nPT J\nTI A Title\nER\nPT J\nTI Another\nER\nEF\n";
        let mut src: &[u8] = data;
        let mut lines = LineCarry::new(&mut src);
        let mut drv = IsiIn;
        let first = drv.read(&mut lines).unwrap().unwrap();
        assert!(first.text.contains("TI A Title"));
        assert!(!first.text.contains("Another"));
        let second = drv.read(&mut lines).unwrap().unwrap();
        assert!(second.text.contains("Another"));
    }

    #[test]
    fn au_continuations_stay_separate_names() {
        let mut f = FieldStore::new();
        let mut drv = IsiIn;
        drv.process(
            &mut f,
            "\nPT J\nAU Doe, J\n   Smith, A\nTI Title text\n   continued",
            "t",
            1,
            &Param::new("t"),
        );
        assert_eq!(f.find_each("AU", LEVEL_MAIN).len(), 2);
        assert_eq!(f.value_of_nouse("TI", LEVEL_MAIN), Some("Title text continued"));
    }

    #[test]
    fn af_preferred_over_au() {
        let mut f = FieldStore::new();
        f.add_can_dup("PT", "J", LEVEL_MAIN);
        f.add_can_dup("AU", "Doe, J", LEVEL_MAIN);
        f.add_can_dup("AF", "Doe, Jane", LEVEL_MAIN);
        let drv = IsiIn;
        let reftype = drv.typify(&f, "t", 1, &Param::new("t"));
        let mut out = FieldStore::new();
        drv.convert(&f, reftype, &Param::new("t"), &mut out);
        assert_eq!(out.value_of("AUTHOR", LEVEL_MAIN), Some("Doe|Jane"));
        assert_eq!(out.find_each("AUTHOR", LEVEL_MAIN).len(), 1);
    }

    #[test]
    fn keywords_split_on_semicolons() {
        let mut f = FieldStore::new();
        f.add_can_dup("PT", "J", LEVEL_MAIN);
        f.add_can_dup("DE", "alpha; beta", LEVEL_MAIN);
        let drv = IsiIn;
        let mut out = FieldStore::new();
        drv.convert(&f, 0, &Param::new("t"), &mut out);
        assert_eq!(out.find_each("KEYWORD", LEVEL_MAIN).len(), 2);
    }
}
