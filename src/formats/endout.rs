//! EndNote refer writer.

use super::{emit_str, OutputDriver};
use crate::date::month_abbrev;
use crate::fields::{FieldStore, LevelMatch, LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::name;
use crate::param::Param;
use crate::title;
use crate::typeinf::{self, HintKind, TypeMatch};
use crate::url;
use std::io::Write;

pub struct EndnoteOut;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EndType {
    Generic,
    Article,
    MagArticle,
    Newspaper,
    Book,
    InBook,
    InProceedings,
    Proceedings,
    Report,
    Thesis,
    MastersThesis,
    PhdThesis,
    DiplomaThesis,
    DoctoralThesis,
    HabilitationThesis,
    LicentiateThesis,
    Communication,
    Manuscript,
    Electronic,
    Program,
    Map,
    Statute,
    Hearing,
    Case,
    Unpublished,
}

impl EndType {
    fn name(self) -> &'static str {
        use EndType::*;
        match self {
            Generic => "Generic",
            Article => "Journal Article",
            MagArticle => "Magazine Article",
            Newspaper => "Newspaper Article",
            Book => "Book",
            InBook => "Book Section",
            InProceedings => "Conference Paper",
            Proceedings => "Conference Proceedings",
            Report => "Report",
            Thesis | MastersThesis | PhdThesis | DiplomaThesis | DoctoralThesis
            | HabilitationThesis | LicentiateThesis => "Thesis",
            Communication => "Personal Communication",
            Manuscript => "Manuscript",
            Electronic => "Electronic Source",
            Program => "Computer Program",
            Map => "Map",
            Statute => "Statute",
            Hearing => "Hearing",
            Case => "Case",
            Unpublished => "Unpublished Work",
        }
    }

    fn is_element(self) -> bool {
        matches!(
            self,
            EndType::Article
                | EndType::MagArticle
                | EndType::Newspaper
                | EndType::InBook
                | EndType::InProceedings
        )
    }

    fn uses_journal(self) -> bool {
        matches!(self, EndType::Article | EndType::MagArticle | EndType::Newspaper)
    }
}

fn get_type(f: &FieldStore) -> EndType {
    use EndType::*;
    let genre_matches = [
        TypeMatch { name: "academic journal", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "journal article", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "magazine", reftype: MagArticle, level: LEVEL_ANY },
        TypeMatch { name: "newspaper", reftype: Newspaper, level: LEVEL_ANY },
        TypeMatch { name: "conference publication", reftype: InProceedings, level: LEVEL_ANY },
        TypeMatch { name: "book chapter", reftype: InBook, level: LEVEL_ANY },
        TypeMatch { name: "Masters thesis", reftype: MastersThesis, level: LEVEL_ANY },
        TypeMatch { name: "Ph.D. thesis", reftype: PhdThesis, level: LEVEL_ANY },
        TypeMatch { name: "Diploma thesis", reftype: DiplomaThesis, level: LEVEL_ANY },
        TypeMatch { name: "Doctoral thesis", reftype: DoctoralThesis, level: LEVEL_ANY },
        TypeMatch { name: "Habilitation thesis", reftype: HabilitationThesis, level: LEVEL_ANY },
        TypeMatch { name: "Licentiate thesis", reftype: LicentiateThesis, level: LEVEL_ANY },
        TypeMatch { name: "thesis", reftype: Thesis, level: LEVEL_ANY },
        TypeMatch { name: "communication", reftype: Communication, level: LEVEL_ANY },
        TypeMatch { name: "manuscript", reftype: Manuscript, level: LEVEL_ANY },
        TypeMatch { name: "unpublished", reftype: Unpublished, level: LEVEL_ANY },
        TypeMatch { name: "electronic", reftype: Electronic, level: LEVEL_ANY },
        TypeMatch { name: "legislation", reftype: Statute, level: LEVEL_ANY },
        TypeMatch { name: "hearing", reftype: Hearing, level: LEVEL_ANY },
        TypeMatch { name: "legal case and case notes", reftype: Case, level: LEVEL_ANY },
        TypeMatch { name: "report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "technical report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "map", reftype: Map, level: LEVEL_ANY },
        TypeMatch { name: "periodical", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "book", reftype: Book, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "book", reftype: InBook, level: LEVEL_ANY },
        TypeMatch { name: "collection", reftype: Book, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "collection", reftype: InBook, level: LEVEL_ANY },
    ];
    let resource_matches = [
        TypeMatch { name: "software, multimedia", reftype: Program, level: LEVEL_ANY },
        TypeMatch { name: "cartographic", reftype: Map, level: LEVEL_ANY },
    ];
    let issuance_matches = [
        TypeMatch { name: "monographic", reftype: Book, level: LevelMatch::Only(LEVEL_MAIN) },
        TypeMatch { name: "monographic", reftype: InBook, level: LEVEL_ANY },
    ];

    let mut t = typeinf::type_from_hints(f, HintKind::Genre, &genre_matches, Generic);
    if t == Generic {
        t = typeinf::type_from_hints(f, HintKind::Resource, &resource_matches, Generic);
    }
    if t == Generic {
        t = typeinf::type_from_hints(f, HintKind::Issuance, &issuance_matches, Generic);
    }
    t
}

fn append_title_pair(
    fin: &FieldStore,
    entag: &str,
    level: impl Into<LevelMatch> + Copy,
    maintag: &str,
    subtag: &str,
    out: &mut FieldStore,
) -> bool {
    let main = fin.value_of(maintag, level);
    let sub = fin.value_of(subtag, level);
    let full = title::combine_title(main, sub);
    if full.is_empty() {
        return false;
    }
    out.add(entag, &full, LEVEL_MAIN);
    true
}

fn append_people(
    fin: &FieldStore,
    tag: &str,
    entag: &str,
    level: impl Into<LevelMatch> + Copy,
    out: &mut FieldStore,
) {
    for n in fin.find_each(tag, level) {
        out.add_can_dup(entag, &name::build_withcomma(fin.value(n)), LEVEL_MAIN);
    }
}

fn append_easy(fin: &FieldStore, tag: &str, entag: &str, level: impl Into<LevelMatch> + Copy, out: &mut FieldStore) {
    if let Some(v) = fin.value_of(tag, level) {
        out.add(entag, v, LEVEL_MAIN);
    }
}

fn append_easyall(fin: &FieldStore, tag: &str, entag: &str, level: impl Into<LevelMatch> + Copy, out: &mut FieldStore) {
    for n in fin.find_each(tag, level) {
        out.add(entag, fin.value(n), LEVEL_MAIN);
    }
}

fn append_date(fin: &FieldStore, out: &mut FieldStore) {
    if let Some(y) = fin.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY) {
        out.add("%D", y, LEVEL_MAIN);
    }
    let month = fin.value_of_firstof(&["DATE:MONTH", "PARTDATE:MONTH"], LEVEL_ANY);
    let day = fin.value_of_firstof(&["DATE:DAY", "PARTDATE:DAY"], LEVEL_ANY);
    if month.is_some() || day.is_some() {
        let m = month.map(|m| month_abbrev(m).unwrap_or(m)).unwrap_or("");
        let text = match day {
            Some(d) => format!("{m} {d}").trim().to_string(),
            None => m.to_string(),
        };
        if !text.is_empty() {
            out.add("%8", &text, LEVEL_MAIN);
        }
    }
}

fn append_pages(fin: &FieldStore, out: &mut FieldStore) {
    let sn = fin.value_of("PAGES:START", LEVEL_ANY);
    let en = fin.value_of("PAGES:STOP", LEVEL_ANY);
    match (sn, en) {
        (Some(s), Some(e)) => out.add("%P", &format!("{s}-{e}"), LEVEL_MAIN),
        (Some(s), None) => out.add("%P", s, LEVEL_MAIN),
        (None, Some(e)) => out.add("%P", e, LEVEL_MAIN),
        (None, None) => {
            if let Some(ar) = fin.value_of("ARTICLENUMBER", LEVEL_ANY) {
                out.add("%P", ar, LEVEL_MAIN);
            }
        }
    }
}

fn append_thesis_hint(t: EndType, out: &mut FieldStore) {
    let hint = match t {
        EndType::MastersThesis => "Masters thesis",
        EndType::PhdThesis => "Ph.D. thesis",
        EndType::DiplomaThesis => "Diploma thesis",
        EndType::DoctoralThesis => "Doctoral thesis",
        EndType::HabilitationThesis => "Habilitation thesis",
        EndType::LicentiateThesis => "Licentiate thesis",
        _ => return,
    };
    out.add("%9", hint, LEVEL_MAIN);
}

impl OutputDriver for EndnoteOut {
    fn init_params(&self, p: &mut Param) {
        p.latex_out = false;
        p.utf8_out = true;
        p.utf8_bom = true;
    }

    fn assemble(&self, fin: &FieldStore, _p: &Param, _refnum: usize) -> Option<FieldStore> {
        let t = get_type(fin);
        let mut out = FieldStore::new();

        out.add("%0", t.name(), LEVEL_MAIN);

        let added = append_title_pair(fin, "%T", LEVEL_MAIN, "TITLE", "SUBTITLE", &mut out);
        if added {
            append_title_pair(fin, "%!", LEVEL_MAIN, "SHORTTITLE", "SHORTSUBTITLE", &mut out);
        } else {
            append_title_pair(fin, "%T", LEVEL_MAIN, "SHORTTITLE", "SHORTSUBTITLE", &mut out);
        }

        append_people(fin, "AUTHOR", "%A", LEVEL_MAIN, &mut out);
        append_easyall(fin, "AUTHOR:CORP", "%A", LEVEL_MAIN, &mut out);
        append_easyall(fin, "AUTHOR:ASIS", "%A", LEVEL_MAIN, &mut out);
        append_people(fin, "EDITOR", "%E", LEVEL_MAIN, &mut out);
        if t.is_element() {
            append_people(fin, "EDITOR", "%E", LEVEL_HOST, &mut out);
        } else {
            append_people(fin, "EDITOR", "%Y", LEVEL_HOST, &mut out);
        }
        append_people(fin, "TRANSLATOR", "%H", LEVEL_ANY, &mut out);
        append_people(fin, "AUTHOR", "%Y", LEVEL_SERIES, &mut out);
        append_people(fin, "EDITOR", "%Y", LEVEL_SERIES, &mut out);

        if t.is_element() {
            let host = if t.uses_journal() { "%J" } else { "%B" };
            let added = append_title_pair(fin, host, LEVEL_HOST, "TITLE", "SUBTITLE", &mut out);
            if !added {
                append_title_pair(fin, host, LEVEL_HOST, "SHORTTITLE", "SHORTSUBTITLE", &mut out);
            }
            append_title_pair(fin, "%S", LEVEL_SERIES, "TITLE", "SUBTITLE", &mut out);
        } else {
            append_title_pair(fin, "%S", LEVEL_HOST, "TITLE", "SUBTITLE", &mut out);
        }

        append_date(fin, &mut out);
        append_easy(fin, "VOLUME", "%V", LEVEL_ANY, &mut out);
        append_easy(fin, "ISSUE", "%N", LEVEL_ANY, &mut out);
        append_easy(fin, "NUMBER", "%N", LEVEL_ANY, &mut out);
        append_easy(fin, "EDITION", "%7", LEVEL_ANY, &mut out);
        append_easy(fin, "PUBLISHER", "%I", LEVEL_ANY, &mut out);
        append_easy(fin, "ADDRESS", "%C", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR", "%C", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR:CORP", "%C", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR:ASIS", "%C", LEVEL_ANY, &mut out);
        append_easy(fin, "SERIALNUMBER", "%@", LEVEL_ANY, &mut out);
        append_easy(fin, "ISSN", "%@", LEVEL_ANY, &mut out);
        append_easy(fin, "ISBN", "%@", LEVEL_ANY, &mut out);
        append_easy(fin, "LANGUAGE", "%G", LEVEL_ANY, &mut out);
        append_easy(fin, "REFNUM", "%F", LEVEL_ANY, &mut out);
        append_easyall(fin, "NOTES", "%O", LEVEL_ANY, &mut out);
        append_easy(fin, "ABSTRACT", "%X", LEVEL_ANY, &mut out);
        append_easyall(fin, "KEYWORD", "%K", LEVEL_ANY, &mut out);
        append_thesis_hint(t, &mut out);
        append_easyall(fin, "DOI", "%R", LEVEL_ANY, &mut out);
        append_easyall(fin, "URL", "%U", LEVEL_ANY, &mut out);
        append_easyall(fin, "FILEATTACH", "%U", LEVEL_ANY, &mut out);
        url::merge_and_add(
            fin,
            LEVEL_ANY,
            &mut out,
            "%U",
            LEVEL_MAIN,
            &["PMID", "PMC", "ARXIV", "JSTOR", "MRNUMBER"],
        );
        append_pages(fin, &mut out);

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

    fn article() -> FieldStore {
        let mut f = FieldStore::new();
        f.add("AUTHOR", "Doe|Jane", LEVEL_MAIN);
        f.add("TITLE", "A Study", LEVEL_MAIN);
        f.add("SUBTITLE", "Methods", LEVEL_MAIN);
        f.add("TITLE", "J. Test.", LEVEL_HOST);
        f.add("DATE:YEAR", "2020", LEVEL_MAIN);
        f.add("GENRE:BIBUTILS", "academic journal", LEVEL_HOST);
        f.add("REFNUM", "Doe2020", LEVEL_MAIN);
        f
    }

    #[test]
    fn journal_article_shape() {
        let out = EndnoteOut.assemble(&article(), &Param::new("t"), 0).unwrap();
        assert_eq!(out.value_of_nouse("%0", LEVEL_MAIN), Some("Journal Article"));
        assert_eq!(out.value_of_nouse("%T", LEVEL_MAIN), Some("A Study: Methods"));
        assert_eq!(out.value_of_nouse("%A", LEVEL_MAIN), Some("Doe, Jane"));
        assert_eq!(out.value_of_nouse("%J", LEVEL_MAIN), Some("J. Test."));
        assert_eq!(out.value_of_nouse("%D", LEVEL_MAIN), Some("2020"));
        assert_eq!(out.value_of_nouse("%F", LEVEL_MAIN), Some("Doe2020"));
    }

    #[test]
    fn one_tag_per_line() {
        let out = EndnoteOut.assemble(&article(), &Param::new("t"), 0).unwrap();
        let mut buf = Vec::new();
        EndnoteOut.write(&out, &mut buf, &Param::new("t"), 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("%0 Journal Article\n"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn thesis_hint_written() {
        let mut f = FieldStore::new();
        f.add("TITLE", "On Stuff", LEVEL_MAIN);
        f.add("GENRE:BIBUTILS", "Ph.D. thesis", LEVEL_MAIN);
        let out = EndnoteOut.assemble(&f, &Param::new("t"), 0).unwrap();
        assert_eq!(out.value_of_nouse("%0", LEVEL_MAIN), Some("Thesis"));
        assert_eq!(out.value_of_nouse("%9", LEVEL_MAIN), Some("Ph.D. thesis"));
    }
}
