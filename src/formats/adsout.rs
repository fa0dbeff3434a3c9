//! ADS (Astrophysics Data System) tagged output.
//!
//! The `%R` line carries the 19-character reference code
//! `YYYYJJJJJVVVVMPPPPA`: year, five-character journal abbreviation,
//! right-aligned volume, right-aligned page with an overflow letter in
//! column 14 for pages ≥ 10000, and the first author's initial folded to
//! ASCII.

use super::{adsjournals, emit_str, OutputDriver};
use crate::fields::{FieldStore, LevelMatch, LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN};
use crate::name;
use crate::param::Param;
use crate::title;
use crate::url;
use std::io::Write;
use unicode_normalization::UnicodeNormalization;

pub struct AdsOut;

/// Right-align up to four digits of `n` into `out[pos..pos+4]`.
fn put_4digit(out: &mut [char], pos: usize, n: u64) {
    let n = n % 10000;
    let digits = n.to_string();
    let start = pos + 4 - digits.len();
    for (i, d) in digits.chars().enumerate() {
        out[start + i] = d;
    }
}

/// Fold the first character of a name to an ASCII letter: NFKD
/// decomposition first, then the stroked/ligature letters NFKD cannot
/// reach; `.` when nothing letter-like survives.
fn initial_ascii(family: &str) -> char {
    for c in family.nfkd() {
        if c.is_ascii_alphabetic() {
            return c.to_ascii_uppercase();
        }
        let folded = match c {
            'Ø' | 'ø' | 'Œ' | 'œ' => 'O',
            'Æ' | 'æ' => 'A',
            'Ł' | 'ł' => 'L',
            'Đ' | 'đ' | 'Ð' | 'ð' => 'D',
            'Þ' | 'þ' => 'T',
            'ß' => 'S',
            _ => continue,
        };
        return folded;
    }
    '.'
}

fn reference_code(f: &FieldStore) -> String {
    let mut code: Vec<char> = vec!['.'; 19];

    if let Some(year) = f.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY) {
        if let Ok(y) = year.trim().parse::<u64>() {
            put_4digit(&mut code, 0, y);
        }
    }

    if let Some(journal) = f.value_of("TITLE", LEVEL_HOST) {
        if let Some(j) = adsjournals::find(journal) {
            for (i, c) in j.abbrev.chars().enumerate() {
                code[4 + i] = c;
            }
        }
    }

    if let Some(volume) = f.value_of("VOLUME", LEVEL_ANY) {
        if let Ok(v) = volume.trim().parse::<u64>() {
            put_4digit(&mut code, 9, v);
        }
    }

    let page = f
        .value_of("PAGES:START", LEVEL_ANY)
        .or_else(|| f.value_of("ARTICLENUMBER", LEVEL_ANY));
    if let Some(page) = page {
        if let Ok(pg) = page.trim().parse::<u64>() {
            put_4digit(&mut code, 14, pg);
            if pg >= 10000 {
                code[13] = (b'a' + ((pg / 10000) as u8)) as char;
            }
        }
    }

    let author = f
        .value_of_nouse("AUTHOR", LEVEL_MAIN)
        .or_else(|| f.value_of_firstof(&["AUTHOR", "AUTHOR:CORP", "AUTHOR:ASIS"], LEVEL_ANY));
    if let Some(author) = author {
        let initial = initial_ascii(author.split('|').next().unwrap_or(""));
        if initial != '.' {
            code[18] = initial;
        }
    }

    code.into_iter().collect()
}

fn append_people(
    fin: &FieldStore,
    tags: &[&str; 3],
    adstag: &str,
    level: impl Into<LevelMatch> + Copy,
    out: &mut FieldStore,
) {
    let names: Vec<String> = fin
        .find_each_of(tags, level)
        .into_iter()
        .map(|n| name::build_withcomma(fin.value(n)))
        .collect();
    if !names.is_empty() {
        out.add(adstag, &names.join("; "), LEVEL_MAIN);
    }
}

/// `%J` carries the full host title with volume, issue and page
/// decorations appended.
fn append_journal(fin: &FieldStore, out: &mut FieldStore) {
    let main = fin
        .value_of("TITLE", LEVEL_HOST)
        .or_else(|| fin.value_of("SHORTTITLE", LEVEL_HOST));
    let sub = fin
        .value_of("SUBTITLE", LEVEL_HOST)
        .or_else(|| fin.value_of("SHORTSUBTITLE", LEVEL_HOST));
    if main.is_none() {
        return;
    }

    let mut full = title::combine_title(main, sub);
    if let Some(vol) = fin.value_of("VOLUME", LEVEL_ANY) {
        full.push_str(", vol. ");
        full.push_str(vol);
    }
    if let Some(iss) = fin.value_of_firstof(&["ISSUE", "NUMBER"], LEVEL_ANY) {
        full.push_str(", no. ");
        full.push_str(iss);
    }
    let sn = fin.value_of("PAGES:START", LEVEL_ANY);
    let en = fin.value_of("PAGES:STOP", LEVEL_ANY);
    let ar = fin.value_of("ARTICLENUMBER", LEVEL_ANY);
    if let Some(s) = sn {
        full.push_str(if en.is_some() { ", pp. " } else { ", p. " });
        full.push_str(s);
    } else if let Some(a) = ar {
        full.push_str(", p. ");
        full.push_str(a);
    }
    if let Some(e) = en {
        full.push('-');
        full.push_str(e);
    }

    out.add("%J", &full, LEVEL_MAIN);
}

fn append_date(fin: &FieldStore, out: &mut FieldStore) {
    let Some(year) = fin.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY) else {
        return;
    };
    let month = fin
        .value_of_firstof(&["DATE:MONTH", "PARTDATE:MONTH"], LEVEL_ANY)
        .and_then(crate::date::month_number)
        .unwrap_or(0);
    out.add("%D", &format!("{month:02}/{year}"), LEVEL_MAIN);
}

fn append_pages(fin: &FieldStore, out: &mut FieldStore) {
    let sn = fin.value_of("PAGES:START", LEVEL_ANY);
    let en = fin.value_of("PAGES:STOP", LEVEL_ANY);
    let ar = fin.value_of("ARTICLENUMBER", LEVEL_ANY);
    if let Some(s) = sn {
        out.add("%P", s, LEVEL_MAIN);
    } else if let Some(a) = ar {
        out.add("%P", a, LEVEL_MAIN);
    }
    if let Some(e) = en {
        out.add("%L", e, LEVEL_MAIN);
    }
}

fn append_easy(fin: &FieldStore, tag: &str, adstag: &str, out: &mut FieldStore) {
    if let Some(v) = fin.value_of(tag, LEVEL_ANY) {
        out.add(adstag, v, LEVEL_MAIN);
    }
}

fn append_keys(fin: &FieldStore, out: &mut FieldStore) {
    let keys: Vec<&str> = fin
        .find_each("KEYWORD", LEVEL_ANY)
        .into_iter()
        .map(|n| fin.value(n))
        .collect();
    if !keys.is_empty() {
        out.add("%K", &keys.join(", "), LEVEL_MAIN);
    }
}

impl OutputDriver for AdsOut {
    fn init_params(&self, p: &mut Param) {
        p.latex_out = false;
        p.utf8_out = true;
        p.utf8_bom = true;
    }

    fn assemble(&self, fin: &FieldStore, _p: &Param, _refnum: usize) -> Option<FieldStore> {
        fin.clear_used();
        let mut out = FieldStore::new();

        out.add("%R", &reference_code(fin), LEVEL_MAIN);
        append_people(fin, &["AUTHOR", "AUTHOR:ASIS", "AUTHOR:CORP"], "%A", LEVEL_MAIN, &mut out);
        append_people(fin, &["EDITOR", "EDITOR:ASIS", "EDITOR:CORP"], "%E", LEVEL_ANY, &mut out);
        append_easy(fin, "TITLE", "%T", &mut out);
        append_journal(fin, &mut out);
        append_date(fin, &mut out);
        append_easy(fin, "VOLUME", "%V", &mut out);
        append_easy(fin, "ISSUE", "%N", &mut out);
        append_easy(fin, "NUMBER", "%N", &mut out);
        append_easy(fin, "LANGUAGE", "%M", &mut out);
        for n in fin.find_each("NOTES", LEVEL_ANY) {
            out.add("%X", fin.value(n), LEVEL_MAIN);
        }
        append_easy(fin, "ABSTRACT", "%B", &mut out);
        append_keys(fin, &mut out);
        url::merge_and_add(
            fin,
            LEVEL_ANY,
            &mut out,
            "%U",
            LEVEL_MAIN,
            &["URL", "PMID", "PMC", "ARXIV", "JSTOR", "MRNUMBER", "FILEATTACH", "FIGATTACH"],
        );
        append_pages(fin, &mut out);
        for n in fin.find_each("DOI", LEVEL_ANY) {
            out.add("%Y", &format!("DOI:{}", fin.value(n)), LEVEL_MAIN);
        }
        out.add("%W", "PHY", LEVEL_MAIN);
        out.add("%G", "AUTHOR", LEVEL_MAIN);

        Some(out)
    }

    fn write(
        &self,
        f: &FieldStore,
        w: &mut dyn Write,
        p: &Param,
        _refnum: usize,
    ) -> crate::Result<()> {
        for row in f.iter() {
            emit_str(w, p, &format!("{} {}\n", row.tag(), row.value()))?;
        }
        emit_str(w, p, "\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_code_layout() {
        let mut f = FieldStore::new();
        f.add("DATE:YEAR", "2001", LEVEL_MAIN);
        f.add("TITLE", "PhRvB", LEVEL_HOST);
        f.add("VOLUME", "64", LEVEL_MAIN);
        f.add("PAGES:START", "12345", LEVEL_MAIN);
        f.add("AUTHOR", "Émile|A.", LEVEL_MAIN);
        assert_eq!(reference_code(&f), "2001PhRvB..64b2345E");
    }

    #[test]
    fn code_pads_missing_pieces_with_dots() {
        let mut f = FieldStore::new();
        f.add("DATE:YEAR", "1999", LEVEL_MAIN);
        assert_eq!(reference_code(&f), "1999...............");
    }

    #[test]
    fn small_page_has_no_overflow_letter() {
        let mut f = FieldStore::new();
        f.add("DATE:YEAR", "2001", LEVEL_MAIN);
        f.add("PAGES:START", "42", LEVEL_MAIN);
        f.add("AUTHOR", "Smith|J.", LEVEL_MAIN);
        assert_eq!(reference_code(&f), "2001............42S");
    }

    #[test]
    fn initial_folding() {
        assert_eq!(initial_ascii("Émile"), 'E');
        assert_eq!(initial_ascii("Ørsted"), 'O');
        assert_eq!(initial_ascii("smith"), 'S');
        assert_eq!(initial_ascii("夏目"), '.');
    }

    #[test]
    fn assembled_record() {
        let mut f = FieldStore::new();
        f.add("AUTHOR", "Doe|Jane", LEVEL_MAIN);
        f.add("TITLE", "A Study", LEVEL_MAIN);
        f.add("TITLE", "Physical Review B", LEVEL_HOST);
        f.add("DATE:YEAR", "2001", LEVEL_MAIN);
        f.add("DATE:MONTH", "3", LEVEL_MAIN);
        f.add("VOLUME", "64", LEVEL_MAIN);
        f.add("DOI", "10.1000/xyz", LEVEL_MAIN);
        let out = AdsOut.assemble(&f, &Param::new("t"), 0).unwrap();
        assert_eq!(out.value_of_nouse("%A", LEVEL_MAIN), Some("Doe, Jane"));
        assert_eq!(out.value_of_nouse("%D", LEVEL_MAIN), Some("03/2001"));
        assert_eq!(out.value_of_nouse("%Y", LEVEL_MAIN), Some("DOI:10.1000/xyz"));
        assert_eq!(out.value_of_nouse("%W", LEVEL_MAIN), Some("PHY"));
        assert!(out
            .value_of_nouse("%J", LEVEL_MAIN)
            .unwrap()
            .starts_with("Physical Review B, vol. 64"));
    }
}
