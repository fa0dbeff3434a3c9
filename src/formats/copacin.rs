//! COPAC reader.
//!
//! Tags are two letters plus `- ` (the dash belongs to the tag in the
//! lookup table); continuation lines are dedented and carry no tag.

use super::{copactypes::COPAC_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::generic;
use crate::name;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::warn;
use std::io;

pub struct CopacIn;

fn is_copac_tag(line: &str) -> bool {
    let c: Vec<char> = line.chars().take(4).collect();
    c.len() == 4 && c[0].is_ascii_alphabetic() && c[1].is_ascii_alphabetic() && c[2] == '-' && c[3] == ' '
}

fn tagged_line(line: &str) -> (String, String) {
    let tag: String = line.chars().take(3).collect();
    let value: String = line.chars().skip(4).collect();
    (tag, value.trim().to_string())
}

impl InputDriver for CopacIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = false;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &COPAC_TABLE
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

            if inref && line.is_empty() {
                break;
            }

            if is_copac_tag(line) {
                if !reference.is_empty() {
                    reference.push('\n');
                }
                reference.push_str(line);
                inref = true;
            } else if inref {
                // tag only appears on the first line; dedent the rest
                let rest: String = line.chars().skip(3).collect();
                if !rest.is_empty() {
                    reference.push(' ');
                    reference.push_str(rest.trim_start());
                }
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
            let line = line.trim_start();
            if is_copac_tag(line) {
                let (tag, value) = tagged_line(line);
                if !value.is_empty() {
                    fin.add_can_dup(&tag, &value, LEVEL_MAIN);
                }
            }
        }
        true
    }

    fn typify(&self, _fin: &FieldStore, _filename: &str, _nref: usize, _p: &Param) -> usize {
        0
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
                ProcessingKind::SerialNo => generic::convert_serialno(out, value, level),
                ProcessingKind::Notes => generic::convert_notes(out, value, level),
                ProcessingKind::Person => convert_person(out, rule.newtag, value, level, p),
                _ => {}
            }
        }
    }
}

/// COPAC names lead with the family name but often skip the comma, and
/// editors arrive as authors with an `[Editor]` marker.
fn convert_person(out: &mut FieldStore, outtag: &str, value: &str, level: i32, p: &Param) {
    if p.asis.iter().any(|n| n == value) || p.corps.iter().any(|n| n == value) {
        name::add_name(out, outtag, value, level, &p.asis, &p.corps);
        return;
    }

    let mut tag = outtag;
    let mut tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    let mut has_comma = false;
    for tok in tokens.iter_mut() {
        if tok == "[Editor]" {
            tag = "EDITOR";
            tok.clear();
        } else if tok.ends_with(',') {
            has_comma = true;
        }
    }
    if !has_comma {
        if let Some(first) = tokens.iter_mut().find(|t| !t.is_empty()) {
            first.push(',');
        }
    }
    let rejoined = tokens
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    name::add_name(out, tag, &rejoined, level, &p.asis, &p.corps);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::LEVEL_ANY;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_recognition() {
        assert!(is_copac_tag("TI- A title"));
        assert!(is_copac_tag("AU- Someone"));
        assert!(!is_copac_tag("T1- nope"));
        assert!(!is_copac_tag("TI : nope"));
    }

    #[test]
    fn continuations_are_dedented() {
        let data = b"TI- A very long title\n    that continues\nAU- Smith, John\n\n";
        let mut src: &[u8] = data;
        let mut lines = LineCarry::new(&mut src);
        let mut drv = CopacIn;
        let rec = drv.read(&mut lines).unwrap().unwrap();
        let mut f = FieldStore::new();
        drv.process(&mut f, &rec.text, "t", 1, &Param::new("t"));
        assert_eq!(f.value_of_nouse("TI-", LEVEL_MAIN), Some("A very long title that continues"));
    }

    #[test]
    fn uncommaed_names_get_a_family_comma() {
        let mut out = FieldStore::new();
        convert_person(&mut out, "AUTHOR", "Smith John", LEVEL_MAIN, &Param::new("t"));
        assert_eq!(out.value_of("AUTHOR", LEVEL_MAIN), Some("Smith|John"));
    }

    #[test]
    fn editor_marker_switches_tag() {
        let mut out = FieldStore::new();
        convert_person(&mut out, "AUTHOR", "Smith, John [Editor]", LEVEL_MAIN, &Param::new("t"));
        assert_eq!(out.value_of("EDITOR", LEVEL_MAIN), Some("Smith|John"));
        assert_eq!(out.find("AUTHOR", LEVEL_ANY), None);
    }
}
