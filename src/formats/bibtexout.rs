//! BibTeX writer.

use super::{emit_str, OutputDriver};
use crate::date::month_abbrev;
use crate::fields::{FieldStore, LevelMatch, LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::name;
use crate::param::Param;
use crate::title;
use crate::typeinf::{self, HintKind, TypeMatch};
use crate::url;
use crate::warn;
use std::io::Write;

pub struct BibtexOut;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BibType {
    Unknown,
    Article,
    InBook,
    InProceedings,
    Proceedings,
    InCollection,
    Collection,
    Book,
    PhdThesis,
    MastersThesis,
    DiplomaThesis,
    Report,
    Manual,
    Unpublished,
    Electronic,
    Misc,
}

impl BibType {
    fn name(self) -> &'static str {
        use BibType::*;
        match self {
            Article => "Article",
            InBook => "Inbook",
            InProceedings => "InProceedings",
            Proceedings => "Proceedings",
            InCollection => "InCollection",
            Collection => "Collection",
            Book => "Book",
            PhdThesis => "PhdThesis",
            MastersThesis | DiplomaThesis => "MastersThesis",
            Report => "TechReport",
            Manual => "Manual",
            Unpublished => "Unpublished",
            Electronic => "Electronic",
            Unknown | Misc => "Misc",
        }
    }
}

fn get_type(f: &FieldStore, p: &Param, refnum: usize) -> BibType {
    use BibType::*;
    let genre_matches = [
        TypeMatch { name: "periodical", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "academic journal", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "magazine", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "newspaper", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "article", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "instruction", reftype: Manual, level: LEVEL_ANY },
        TypeMatch { name: "book", reftype: Book, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "book", reftype: InBook, level: LEVEL_ANY },
        TypeMatch { name: "book chapter", reftype: InBook, level: LEVEL_ANY },
        TypeMatch { name: "unpublished", reftype: Unpublished, level: LEVEL_ANY },
        TypeMatch { name: "manuscript", reftype: Unpublished, level: LEVEL_ANY },
        TypeMatch { name: "conference publication", reftype: Proceedings, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "conference publication", reftype: InProceedings, level: LEVEL_ANY },
        TypeMatch { name: "collection", reftype: Collection, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "collection", reftype: InCollection, level: LEVEL_ANY },
        TypeMatch { name: "report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "technical report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "Masters thesis", reftype: MastersThesis, level: LEVEL_ANY },
        TypeMatch { name: "Diploma thesis", reftype: DiplomaThesis, level: LEVEL_ANY },
        TypeMatch { name: "Ph.D. thesis", reftype: PhdThesis, level: LEVEL_ANY },
        TypeMatch { name: "Licentiate thesis", reftype: PhdThesis, level: LEVEL_ANY },
        TypeMatch { name: "thesis", reftype: PhdThesis, level: LEVEL_ANY },
        TypeMatch { name: "electronic", reftype: Electronic, level: LEVEL_ANY },
        TypeMatch { name: "miscellaneous", reftype: Misc, level: LEVEL_ANY },
    ];
    let resource_matches = [
        TypeMatch { name: "moving image", reftype: Electronic, level: LEVEL_ANY },
        TypeMatch { name: "software, multimedia", reftype: Electronic, level: LEVEL_ANY },
    ];
    let issuance_matches = [
        TypeMatch { name: "monographic", reftype: Book, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "monographic", reftype: InBook, level: LEVEL_ANY },
    ];

    let mut t = typeinf::type_from_hints(f, HintKind::Genre, &genre_matches, Unknown);
    if t == Unknown {
        t = typeinf::type_from_hints(f, HintKind::Resource, &resource_matches, Unknown);
    }
    if t == Unknown {
        t = typeinf::type_from_hints(f, HintKind::Issuance, &issuance_matches, Unknown);
    }
    if t == Unknown {
        if f.max_level() == 0 {
            let key = f.value_of_nouse("REFNUM", LEVEL_ANY).unwrap_or("");
            warn!(
                "{}: cannot identify type of reference {} {} (defaulting to @Misc)",
                p.progname,
                refnum + 1,
                key
            );
        }
        t = Misc;
    }
    t
}

fn append_citekey(fin: &FieldStore, out: &mut FieldStore, p: &Param) {
    let key = fin.value_of("REFNUM", LEVEL_ANY);
    if p.drop_key || key.is_none() {
        out.add_can_dup("REFNUM", "", LEVEL_MAIN);
        return;
    }
    // family-name pipes and whitespace never belong in a key
    let cleaned: String = key
        .unwrap()
        .chars()
        .take_while(|&c| c != '|')
        .filter(|&c| {
            if p.bibtex_style.strict_key {
                c.is_ascii_alphanumeric()
            } else {
                c != ' ' && c != '\t'
            }
        })
        .collect();
    out.add_can_dup("REFNUM", &cleaned, LEVEL_MAIN);
}

fn append_people(
    fin: &FieldStore,
    tag: &str,
    ctag: &str,
    atag: &str,
    bibtag: &str,
    level: impl Into<LevelMatch> + Copy,
    p: &Param,
    out: &mut FieldStore,
) {
    let level = level.into();
    let mut all = String::new();
    let mut npeople = 0;
    for row in fin.iter() {
        if let LevelMatch::Only(want) = level {
            if row.level() != want {
                continue;
            }
        }
        let person = row.tag().eq_ignore_ascii_case(tag);
        let corp = row.tag().eq_ignore_ascii_case(ctag);
        let asis = row.tag().eq_ignore_ascii_case(atag);
        if !(person || corp || asis) {
            continue;
        }
        if npeople > 0 {
            if p.bibtex_style.whitespace {
                all.push_str("\n\t\tand ");
            } else {
                all.push_str("\nand ");
            }
        }
        if corp || asis {
            all.push('{');
            all.push_str(row.value());
            all.push('}');
        } else {
            all.push_str(&name::build_withcomma(row.value()));
        }
        npeople += 1;
    }
    if npeople > 0 {
        out.add(bibtag, &all, LEVEL_MAIN);
    }
}

fn append_title(
    fin: &FieldStore,
    bibtag: &str,
    level: i32,
    out: &mut FieldStore,
    p: &Param,
) {
    let full_title = fin.find("TITLE", level);
    let use_short =
        full_title.is_none() || (p.bibtex_style.short_title && level == LEVEL_HOST);

    let (main, sub) = if use_short {
        (
            fin.value_of("SHORTTITLE", level),
            fin.value_of("SHORTSUBTITLE", level),
        )
    } else {
        (fin.value_of("TITLE", level), fin.value_of("SUBTITLE", level))
    };

    let full = title::combine_title(main, sub);
    if !full.is_empty() {
        out.add(bibtag, &full, LEVEL_MAIN);
    }
}

fn append_titles(fin: &FieldStore, t: BibType, out: &mut FieldStore, p: &Param) {
    append_title(fin, "title", LEVEL_MAIN, out, p);
    match t {
        BibType::Article => append_title(fin, "journal", LEVEL_HOST, out, p),
        BibType::InBook => {
            append_title(fin, "bookTitle", LEVEL_HOST, out, p);
            append_title(fin, "series", LEVEL_SERIES, out, p);
        }
        BibType::InCollection | BibType::InProceedings => {
            append_title(fin, "booktitle", LEVEL_HOST, out, p);
            append_title(fin, "series", LEVEL_SERIES, out, p);
        }
        BibType::PhdThesis | BibType::MastersThesis | BibType::DiplomaThesis => {
            append_title(fin, "series", LEVEL_HOST, out, p);
        }
        BibType::Book
        | BibType::Report
        | BibType::Collection
        | BibType::Proceedings => {
            append_title(fin, "series", LEVEL_HOST, out, p);
            append_title(fin, "series", LEVEL_SERIES, out, p);
        }
        _ => {}
    }
}

fn append_date(fin: &FieldStore, out: &mut FieldStore) {
    if let Some(y) = fin.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY) {
        out.add("year", y, LEVEL_MAIN);
    }
    if let Some(m) = fin.value_of_firstof(&["DATE:MONTH", "PARTDATE:MONTH"], LEVEL_ANY) {
        out.add("month", month_abbrev(m).unwrap_or(m), LEVEL_MAIN);
    }
    if let Some(d) = fin.value_of_firstof(&["DATE:DAY", "PARTDATE:DAY"], LEVEL_ANY) {
        out.add("day", d, LEVEL_MAIN);
    }
}

fn append_simple(fin: &FieldStore, intag: &str, outtag: &str, out: &mut FieldStore) {
    if let Some(v) = fin.value_of(intag, LEVEL_ANY) {
        out.add(outtag, v, LEVEL_MAIN);
    }
}

fn append_simpleall(fin: &FieldStore, intag: &str, outtag: &str, out: &mut FieldStore) {
    for n in fin.find_each(intag, LEVEL_ANY) {
        out.add_can_dup(outtag, fin.value(n), LEVEL_MAIN);
    }
}

fn append_keywords(fin: &FieldStore, out: &mut FieldStore) {
    let words: Vec<&str> = fin
        .find_each("KEYWORD", LEVEL_ANY)
        .into_iter()
        .map(|n| fin.value(n))
        .collect();
    if !words.is_empty() {
        out.add("keywords", &words.join("; "), LEVEL_MAIN);
    }
}

fn append_fileattach(fin: &FieldStore, out: &mut FieldStore) {
    for n in fin.find_each("FILEATTACH", LEVEL_ANY) {
        let value = fin.value(n);
        let kind = if value.contains(".pdf") {
            "PDF"
        } else if value.contains(".html") {
            "HTML"
        } else {
            "TYPE"
        };
        out.add_can_dup("file", &format!(":{value}:{kind}"), LEVEL_MAIN);
    }
}

fn append_pages(fin: &FieldStore, out: &mut FieldStore, p: &Param) {
    let sn = fin.value_of("PAGES:START", LEVEL_ANY);
    let en = fin.value_of("PAGES:STOP", LEVEL_ANY);
    if sn.is_none() && en.is_none() {
        // fall back on an article number
        if let Some(ar) = fin.value_of("ARTICLENUMBER", LEVEL_ANY) {
            out.add("pages", ar, LEVEL_MAIN);
        }
        return;
    }
    let dash = if p.bibtex_style.single_dash { "-" } else { "--" };
    let pages = match (sn, en) {
        (Some(s), Some(e)) => format!("{s}{dash}{e}"),
        (Some(s), None) => s.to_string(),
        (None, Some(e)) => e.to_string(),
        (None, None) => unreachable!(),
    };
    out.add("pages", &pages, LEVEL_MAIN);
}

/// BibTeX has no `issue`; emit `number` unless both are present.
fn append_issue_number(fin: &FieldStore, out: &mut FieldStore) {
    let issue = fin.value_of("ISSUE", LEVEL_ANY);
    let number = fin.value_of("NUMBER", LEVEL_ANY);
    if let Some(i) = issue {
        let tag = if number.is_some() { "issue" } else { "number" };
        out.add(tag, i, LEVEL_MAIN);
    }
    if let Some(n) = number {
        out.add("number", n, LEVEL_MAIN);
    }
}

fn append_arxiv(fin: &FieldStore, out: &mut FieldStore) {
    let Some(n) = fin.find("ARXIV", LEVEL_ANY) else {
        return;
    };
    fin.set_used(n);
    out.add("archivePrefix", "arXiv", LEVEL_MAIN);
    out.add("eprint", fin.value(n), LEVEL_MAIN);
    // also as a URL for maximum compatibility
    if let Some(link) = url::identifier_to_url(fin, n, "URL") {
        out.add("url", &link, LEVEL_MAIN);
    }
}

fn append_howpublished(fin: &FieldStore, out: &mut FieldStore) {
    let Some(genre) = fin.value_of_nouse("GENRE:BIBUTILS", LEVEL_ANY) else {
        return;
    };
    if matches!(genre, "Habilitation thesis" | "Licentiate thesis" | "Diploma thesis") {
        out.add("howpublished", genre, LEVEL_MAIN);
    }
}

impl OutputDriver for BibtexOut {
    fn init_params(&self, p: &mut Param) {
        p.latex_out = true;
        p.utf8_out = true;
        p.utf8_bom = true;
    }

    fn assemble(&self, fin: &FieldStore, p: &Param, refnum: usize) -> Option<FieldStore> {
        let t = get_type(fin, p, refnum);
        let mut out = FieldStore::new();

        out.add("TYPE", t.name(), LEVEL_MAIN);
        append_citekey(fin, &mut out, p);
        append_people(fin, "AUTHOR", "AUTHOR:CORP", "AUTHOR:ASIS", "author", LEVEL_MAIN, p, &mut out);
        append_people(fin, "EDITOR", "EDITOR:CORP", "EDITOR:ASIS", "editor", LEVEL_ANY, p, &mut out);
        append_people(fin, "TRANSLATOR", "TRANSLATOR:CORP", "TRANSLATOR:ASIS", "translator", LEVEL_ANY, p, &mut out);
        append_titles(fin, t, &mut out, p);
        append_date(fin, &mut out);
        append_simple(fin, "EDITION", "edition", &mut out);
        append_simple(fin, "PUBLISHER", "publisher", &mut out);
        append_simple(fin, "ADDRESS", "address", &mut out);
        append_simple(fin, "VOLUME", "volume", &mut out);
        append_issue_number(fin, &mut out);
        append_pages(fin, &mut out, p);
        append_keywords(fin, &mut out);
        append_simple(fin, "CONTENTS", "contents", &mut out);
        append_simple(fin, "ABSTRACT", "abstract", &mut out);
        append_simple(fin, "LOCATION", "location", &mut out);
        append_simple(fin, "DEGREEGRANTOR", "school", &mut out);
        append_simple(fin, "DEGREEGRANTOR:ASIS", "school", &mut out);
        append_simple(fin, "DEGREEGRANTOR:CORP", "school", &mut out);
        append_simpleall(fin, "NOTES", "note", &mut out);
        append_simpleall(fin, "ANNOTE", "annote", &mut out);
        append_simple(fin, "ISBN", "isbn", &mut out);
        append_simple(fin, "ISSN", "issn", &mut out);
        append_simple(fin, "MRNUMBER", "mrnumber", &mut out);
        append_simple(fin, "CODEN", "coden", &mut out);
        append_simple(fin, "DOI", "doi", &mut out);
        url::merge_and_add(
            fin,
            LEVEL_ANY,
            &mut out,
            "url",
            LEVEL_MAIN,
            &["URL", "DOI", "PMID", "PMC", "JSTOR"],
        );
        append_fileattach(fin, &mut out);
        append_arxiv(fin, &mut out);
        append_simple(fin, "EPRINTCLASS", "primaryClass", &mut out);
        append_simple(fin, "ISIREFNUM", "note", &mut out);
        append_simple(fin, "LANGUAGE", "language", &mut out);
        append_howpublished(fin, &mut out);

        Some(out)
    }

    fn write(
        &self,
        f: &FieldStore,
        w: &mut dyn Write,
        p: &Param,
        _refnum: usize,
    ) -> crate::Result<()> {
        let style = &p.bibtex_style;
        let mut text = String::new();

        // "@Article{" then the citation key
        let entry_type = f.value(0);
        text.push('@');
        if style.uppercase_tags {
            text.push_str(&entry_type.to_ascii_uppercase());
        } else {
            text.push_str(entry_type);
        }
        text.push('{');
        text.push_str(f.value(1));

        for n in 2..f.num() {
            let tag = f.tag(n);
            let value = f.value(n);
            text.push_str(",\n");
            if style.whitespace {
                text.push_str("  ");
            }
            if style.uppercase_tags {
                text.push_str(&tag.to_ascii_uppercase());
            } else {
                text.push_str(tag);
            }
            if style.whitespace {
                text.push_str(" = \t");
            } else {
                text.push('=');
            }

            let delim = if style.brackets { ('{', '}') } else { ('"', '"') };
            text.push(delim.0);

            // in quote mode, interior double quotes alternate between the
            // TeX ligatures `` and ''
            let chars: Vec<char> = value.chars().collect();
            let mut nquotes = 0;
            for (i, &ch) in chars.iter().enumerate() {
                if ch != '"' {
                    text.push(ch);
                } else if style.brackets || (i > 0 && chars[i - 1] == '\\') {
                    text.push('"');
                } else {
                    if nquotes % 2 == 0 {
                        text.push_str("``");
                    } else {
                        text.push_str("''");
                    }
                    nquotes += 1;
                }
            }

            text.push(delim.1);
        }

        if style.final_comma {
            text.push(',');
        }
        text.push_str("\n}\n\n");

        emit_str(w, p, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article() -> FieldStore {
        let mut f = FieldStore::new();
        f.add("REFNUM", "Smith2001", LEVEL_MAIN);
        f.add("AUTHOR", "Smith|John|Q.", LEVEL_MAIN);
        f.add("AUTHOR", "Doe|Jane", LEVEL_MAIN);
        f.add("TITLE", "A Study", LEVEL_MAIN);
        f.add("SUBTITLE", "Methods and Results", LEVEL_MAIN);
        f.add("TITLE", "J. Test.", LEVEL_HOST);
        f.add("DATE:YEAR", "2001", LEVEL_MAIN);
        f.add("VOLUME", "12", LEVEL_MAIN);
        f.add("PAGES:START", "34", LEVEL_MAIN);
        f.add("PAGES:STOP", "56", LEVEL_MAIN);
        f.add("GENRE:BIBUTILS", "academic journal", LEVEL_HOST);
        f.add("RESOURCE", "text", LEVEL_MAIN);
        f
    }

    #[test]
    fn article_assembly() {
        let out = BibtexOut.assemble(&article(), &Param::new("t"), 0).unwrap();
        assert_eq!(out.value(0), "Article");
        assert_eq!(out.value(1), "Smith2001");
        assert_eq!(
            out.value_of_nouse("author", LEVEL_MAIN),
            Some("Smith, John Q.\nand Doe, Jane")
        );
        assert_eq!(out.value_of_nouse("journal", LEVEL_MAIN), Some("J. Test."));
        assert_eq!(out.value_of_nouse("title", LEVEL_MAIN), Some("A Study: Methods and Results"));
        assert_eq!(out.value_of_nouse("pages", LEVEL_MAIN), Some("34--56"));
    }

    #[test]
    fn quote_mode_write() {
        let f = article();
        let p = Param::new("t");
        let out = BibtexOut.assemble(&f, &p, 0).unwrap();
        let mut buf = Vec::new();
        BibtexOut.write(&out, &mut buf, &p, 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("@Article{Smith2001,\n"));
        assert!(text.contains("pages=\"34--56\""));
        assert!(text.trim_end().ends_with('}'));
    }

    #[test]
    fn bracket_and_uppercase_modes() {
        let f = article();
        let mut p = Param::new("t");
        p.bibtex_style.brackets = true;
        p.bibtex_style.uppercase_tags = true;
        p.bibtex_style.final_comma = true;
        let out = BibtexOut.assemble(&f, &p, 0).unwrap();
        let mut buf = Vec::new();
        BibtexOut.write(&out, &mut buf, &p, 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("@ARTICLE{Smith2001,\n"));
        assert!(text.contains("VOLUME={12}"));
        assert!(text.contains(",\n}\n"));
    }

    #[test]
    fn interior_quotes_alternate_ligatures() {
        let mut f = FieldStore::new();
        f.add("TYPE", "Misc", LEVEL_MAIN);
        f.add("REFNUM", "k", LEVEL_MAIN);
        f.add("title", "a \"quoted\" word", LEVEL_MAIN);
        let p = Param::new("t");
        let mut buf = Vec::new();
        BibtexOut.write(&f, &mut buf, &p, 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("``quoted''"));
    }

    #[test]
    fn strict_key_strips_punctuation() {
        let mut fin = FieldStore::new();
        fin.add("REFNUM", "Smith & Co. 2001", LEVEL_MAIN);
        let mut p = Param::new("t");
        p.bibtex_style.strict_key = true;
        let mut out = FieldStore::new();
        append_citekey(&fin, &mut out, &p);
        assert_eq!(out.value(0), "SmithCo2001");
    }

    #[test]
    fn drop_key_mode() {
        let mut p = Param::new("t");
        p.drop_key = true;
        let mut out = FieldStore::new();
        append_citekey(&article(), &mut out, &p);
        assert_eq!(out.value(0), "");
    }

    #[test]
    fn thesis_types() {
        let mut f = FieldStore::new();
        f.add("GENRE:BIBUTILS", "Masters thesis", LEVEL_MAIN);
        assert_eq!(get_type(&f, &Param::new("t"), 0), BibType::MastersThesis);
        let mut f = FieldStore::new();
        f.add("GENRE:MARC", "thesis", LEVEL_MAIN);
        assert_eq!(get_type(&f, &Param::new("t"), 0), BibType::PhdThesis);
    }
}
