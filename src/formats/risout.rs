//! RIS writer: infer the `TY` type from the canonical hints, reorder the
//! fields into RIS shape, and emit `XX  - value` lines.

use super::{emit_str, OutputDriver};
use crate::fields::{FieldStore, LevelMatch, LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN, LEVEL_SERIES};
use crate::name;
use crate::param::Param;
use crate::title;
use crate::typeinf::{self, HintKind, TypeMatch};
use crate::url;
use std::io::Write;

pub struct RisOut;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RisType {
    Std,
    Abstract,
    Article,
    Book,
    Case,
    InBook,
    Conf,
    Elec,
    Hear,
    MagArticle,
    Newspaper,
    Pamphlet,
    Patent,
    PComm,
    Program,
    Report,
    Statute,
    Thesis,
    LicentiateThesis,
    MastersThesis,
    PhdThesis,
    DiplomaThesis,
    DoctoralThesis,
    HabilitationThesis,
    Map,
    Unpublished,
}

impl RisType {
    fn tag(self) -> &'static str {
        use RisType::*;
        match self {
            Std => "STD",
            Abstract => "ABST",
            Article => "JOUR",
            Book => "BOOK",
            Case => "CASE",
            InBook => "CHAP",
            Conf => "CONF",
            Elec => "ELEC",
            Hear => "HEAR",
            MagArticle => "MGZN",
            Newspaper => "NEWS",
            Pamphlet => "PAMP",
            Patent => "PAT",
            PComm => "PCOMM",
            Program => "COMP",
            Report => "RPRT",
            Statute => "STAT",
            Thesis | LicentiateThesis | MastersThesis | PhdThesis | DiplomaThesis
            | DoctoralThesis | HabilitationThesis => "THES",
            Map => "MAP",
            Unpublished => "UNPB",
        }
    }

    /// Is the item a part of a larger host (article, chapter, paper)?
    fn is_element(self) -> bool {
        matches!(
            self,
            RisType::Article
                | RisType::InBook
                | RisType::MagArticle
                | RisType::Newspaper
                | RisType::Abstract
                | RisType::Conf
        )
    }

    fn uses_journal(self) -> bool {
        matches!(self, RisType::Article | RisType::MagArticle)
    }
}

fn get_type(f: &FieldStore) -> RisType {
    use RisType::*;
    let genre_matches = [
        TypeMatch { name: "academic journal", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "article", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "journal article", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "magazine", reftype: MagArticle, level: LEVEL_ANY },
        TypeMatch { name: "conference publication", reftype: Conf, level: LEVEL_ANY },
        TypeMatch { name: "newspaper", reftype: Newspaper, level: LEVEL_ANY },
        TypeMatch { name: "legislation", reftype: Statute, level: LEVEL_ANY },
        TypeMatch { name: "communication", reftype: PComm, level: LEVEL_ANY },
        TypeMatch { name: "hearing", reftype: Hear, level: LEVEL_ANY },
        TypeMatch { name: "electronic", reftype: Elec, level: LEVEL_ANY },
        TypeMatch { name: "legal case and case notes", reftype: Case, level: LEVEL_ANY },
        TypeMatch { name: "book chapter", reftype: InBook, level: LEVEL_ANY },
        TypeMatch { name: "Ph.D. thesis", reftype: PhdThesis, level: LEVEL_ANY },
        TypeMatch { name: "Licentiate thesis", reftype: LicentiateThesis, level: LEVEL_ANY },
        TypeMatch { name: "Masters thesis", reftype: MastersThesis, level: LEVEL_ANY },
        TypeMatch { name: "Diploma thesis", reftype: DiplomaThesis, level: LEVEL_ANY },
        TypeMatch { name: "Doctoral thesis", reftype: DoctoralThesis, level: LEVEL_ANY },
        TypeMatch { name: "Habilitation thesis", reftype: HabilitationThesis, level: LEVEL_ANY },
        TypeMatch { name: "report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "technical report", reftype: Report, level: LEVEL_ANY },
        TypeMatch { name: "abstract or summary", reftype: Abstract, level: LEVEL_ANY },
        TypeMatch { name: "patent", reftype: Patent, level: LEVEL_ANY },
        TypeMatch { name: "unpublished", reftype: Unpublished, level: LEVEL_ANY },
        TypeMatch { name: "manuscript", reftype: Unpublished, level: LEVEL_ANY },
        TypeMatch { name: "map", reftype: Map, level: LEVEL_ANY },
        TypeMatch { name: "pamphlet", reftype: Pamphlet, level: LEVEL_ANY },
        TypeMatch { name: "periodical", reftype: Article, level: LEVEL_ANY },
        TypeMatch { name: "thesis", reftype: Thesis, level: LEVEL_ANY },
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

    let mut t = typeinf::type_from_hints(f, HintKind::Genre, &genre_matches, Std);
    if t == Std {
        t = typeinf::type_from_hints(f, HintKind::Resource, &resource_matches, Std);
    }
    if t == Std {
        t = typeinf::type_from_hints(f, HintKind::Issuance, &issuance_matches, Std);
    }
    if t == Std && f.max_level() > 0 {
        t = InBook;
    }
    t
}

fn append_people(fin: &FieldStore, tag: &str, ristag: &str, level: i32, out: &mut FieldStore) {
    for n in fin.find_each(tag, level) {
        out.add_can_dup(ristag, &name::build_withcomma(fin.value(n)), LEVEL_MAIN);
    }
}

fn append_easyall(fin: &FieldStore, tag: &str, ristag: &str, level: impl Into<LevelMatch> + Copy, out: &mut FieldStore) {
    for n in fin.find_each(tag, level) {
        out.add(ristag, fin.value(n), LEVEL_MAIN);
    }
}

fn append_easy(fin: &FieldStore, tag: &str, ristag: &str, level: impl Into<LevelMatch> + Copy, out: &mut FieldStore) {
    if let Some(v) = fin.value_of(tag, level) {
        out.add(ristag, v, LEVEL_MAIN);
    }
}

fn append_all_people(fin: &FieldStore, t: RisType, out: &mut FieldStore) {
    append_people(fin, "AUTHOR", "AU", LEVEL_MAIN, out);
    append_easyall(fin, "AUTHOR:CORP", "AU", LEVEL_MAIN, out);
    append_easyall(fin, "AUTHOR:ASIS", "AU", LEVEL_MAIN, out);
    append_people(fin, "AUTHOR", "A2", LEVEL_HOST, out);
    append_easyall(fin, "AUTHOR:CORP", "A2", LEVEL_HOST, out);
    append_easyall(fin, "AUTHOR:ASIS", "A2", LEVEL_HOST, out);
    append_people(fin, "AUTHOR", "A3", LEVEL_SERIES, out);
    append_easyall(fin, "AUTHOR:CORP", "A3", LEVEL_SERIES, out);
    append_easyall(fin, "AUTHOR:ASIS", "A3", LEVEL_SERIES, out);
    append_people(fin, "EDITOR", "ED", LEVEL_MAIN, out);
    append_easyall(fin, "EDITOR:CORP", "ED", LEVEL_MAIN, out);
    append_easyall(fin, "EDITOR:ASIS", "ED", LEVEL_MAIN, out);
    let host_ed = if t.is_element() { "ED" } else { "A3" };
    append_people(fin, "EDITOR", host_ed, LEVEL_HOST, out);
    append_easyall(fin, "EDITOR:CORP", host_ed, LEVEL_HOST, out);
    append_easyall(fin, "EDITOR:ASIS", host_ed, LEVEL_HOST, out);
    append_people(fin, "EDITOR", "A3", LEVEL_SERIES, out);
    append_easyall(fin, "EDITOR:CORP", "A3", LEVEL_SERIES, out);
    append_easyall(fin, "EDITOR:ASIS", "A3", LEVEL_SERIES, out);
}

fn append_date(fin: &FieldStore, out: &mut FieldStore) {
    let year = fin.value_of_firstof(&["DATE:YEAR", "PARTDATE:YEAR"], LEVEL_ANY);
    let month = fin.value_of_firstof(&["DATE:MONTH", "PARTDATE:MONTH"], LEVEL_ANY);
    let day = fin.value_of_firstof(&["DATE:DAY", "PARTDATE:DAY"], LEVEL_ANY);

    if let Some(y) = year {
        out.add("PY", y, LEVEL_MAIN);
    }
    if year.is_some() || month.is_some() || day.is_some() {
        let date = format!(
            "{}/{}/{}",
            year.unwrap_or(""),
            month.unwrap_or(""),
            day.unwrap_or("")
        );
        out.add("DA", &date, LEVEL_MAIN);
    }
}

fn append_title_pair(
    fin: &FieldStore,
    ristag: &str,
    level: impl Into<LevelMatch> + Copy,
    maintag: &str,
    subtag: &str,
    out: &mut FieldStore,
) {
    let main = fin.value_of(maintag, level);
    let sub = fin.value_of(subtag, level);
    let full = title::combine_title(main, sub);
    if !full.is_empty() {
        out.add(ristag, &full, LEVEL_MAIN);
    }
}

fn append_all_titles(fin: &FieldStore, t: RisType, out: &mut FieldStore) {
    append_title_pair(fin, "TI", LEVEL_MAIN, "TITLE", "SUBTITLE", out);
    append_title_pair(fin, "T2", LEVEL_ANY, "SHORTTITLE", "SHORTSUBTITLE", out);
    if t.is_element() {
        let host_tag = if t.uses_journal() { "JO" } else { "BT" };
        append_title_pair(fin, host_tag, LEVEL_HOST, "TITLE", "SUBTITLE", out);
        append_title_pair(fin, "T3", LEVEL_SERIES, "TITLE", "SUBTITLE", out);
    } else {
        append_title_pair(fin, "T3", LEVEL_HOST, "TITLE", "SUBTITLE", out);
    }
}

fn append_pages(fin: &FieldStore, out: &mut FieldStore) {
    let sn = fin.value_of("PAGES:START", LEVEL_ANY);
    let en = fin.value_of("PAGES:STOP", LEVEL_ANY);
    if sn.is_some() || en.is_some() {
        if let Some(sn) = sn {
            out.add("SP", sn, LEVEL_MAIN);
        }
        if let Some(en) = en {
            out.add("EP", en, LEVEL_MAIN);
        }
    } else if let Some(ar) = fin.value_of("ARTICLENUMBER", LEVEL_ANY) {
        // no pages, article number stands in for the start page
        out.add("SP", ar, LEVEL_MAIN);
    }
}

fn append_file(fin: &FieldStore, tag: &str, ristag: &str, out: &mut FieldStore) {
    for n in fin.find_each(tag, LEVEL_ANY) {
        let v = fin.value(n);
        let uri = if url::uri_scheme_len(v).is_some() || v.starts_with("file:") {
            v.to_string()
        } else {
            format!("file:{v}")
        };
        out.add(ristag, &uri, LEVEL_MAIN);
    }
}

fn append_thesis_hint(t: RisType, out: &mut FieldStore) {
    let hint = match t {
        RisType::MastersThesis => "Masters thesis",
        RisType::PhdThesis => "Ph.D. thesis",
        RisType::DiplomaThesis => "Diploma thesis",
        RisType::DoctoralThesis => "Doctoral thesis",
        RisType::HabilitationThesis => "Habilitation thesis",
        RisType::LicentiateThesis => "Licentiate thesis",
        _ => return,
    };
    out.add("U1", hint, LEVEL_MAIN);
}

impl OutputDriver for RisOut {
    fn init_params(&self, p: &mut Param) {
        p.latex_out = false;
        p.utf8_out = true;
        p.utf8_bom = true;
    }

    fn assemble(&self, fin: &FieldStore, _p: &Param, _refnum: usize) -> Option<FieldStore> {
        let t = get_type(fin);
        let mut out = FieldStore::new();

        out.add("TY", t.tag(), LEVEL_MAIN);
        append_all_people(fin, t, &mut out);
        append_date(fin, &mut out);
        append_all_titles(fin, t, &mut out);
        append_pages(fin, &mut out);
        append_easy(fin, "VOLUME", "VL", LEVEL_ANY, &mut out);
        append_easy(fin, "ISSUE", "IS", LEVEL_ANY, &mut out);
        append_easy(fin, "NUMBER", "IS", LEVEL_ANY, &mut out);
        append_easy(fin, "EDITION", "ET", LEVEL_ANY, &mut out);
        append_easy(fin, "NUMVOLUMES", "NV", LEVEL_ANY, &mut out);
        append_easy(fin, "ADDRESS:AUTHOR", "AD", LEVEL_ANY, &mut out);
        append_easy(fin, "PUBLISHER", "PB", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR", "PB", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR:ASIS", "PB", LEVEL_ANY, &mut out);
        append_easy(fin, "DEGREEGRANTOR:CORP", "PB", LEVEL_ANY, &mut out);
        append_easy(fin, "ADDRESS", "CY", LEVEL_ANY, &mut out);
        append_easyall(fin, "KEYWORD", "KW", LEVEL_ANY, &mut out);
        append_easy(fin, "ABSTRACT", "AB", LEVEL_ANY, &mut out);
        append_easy(fin, "CALLNUMBER", "CN", LEVEL_ANY, &mut out);
        append_easy(fin, "ISSN", "SN", LEVEL_ANY, &mut out);
        append_easy(fin, "ISBN", "SN", LEVEL_ANY, &mut out);
        append_file(fin, "FILEATTACH", "L1", &mut out);
        append_file(fin, "FIGATTACH", "L4", &mut out);
        append_easy(fin, "CAPTION", "CA", LEVEL_ANY, &mut out);
        url::merge_and_add(
            fin,
            LEVEL_ANY,
            &mut out,
            "UR",
            LEVEL_MAIN,
            &["URL", "DOI", "PMID", "PMC", "ARXIV", "JSTOR", "MRNUMBER"],
        );
        append_easyall(fin, "DOI", "DO", LEVEL_ANY, &mut out);
        append_easy(fin, "LANGUAGE", "LA", LEVEL_ANY, &mut out);
        append_easy(fin, "NOTES", "N1", LEVEL_ANY, &mut out);
        append_easy(fin, "REFNUM", "ID", LEVEL_ANY, &mut out);
        append_thesis_hint(t, &mut out);

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
            emit_str(w, p, &format!("{}  - {}\n", row.tag(), row.value()))?;
        }
        emit_str(w, p, "ER  - \n")?;
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
        f.add("TITLE", "J. Test.", LEVEL_HOST);
        f.add("DATE:YEAR", "2020", LEVEL_MAIN);
        f.add("DATE:MONTH", "03", LEVEL_MAIN);
        f.add("PAGES:START", "100", LEVEL_MAIN);
        f.add("PAGES:STOP", "110", LEVEL_MAIN);
        f.add("DOI", "10.1000/xyz", LEVEL_MAIN);
        f.add("GENRE:MARC", "periodical", LEVEL_HOST);
        f.add("GENRE:BIBUTILS", "academic journal", LEVEL_HOST);
        f.add("ISSUANCE", "continuing", LEVEL_HOST);
        f.add("RESOURCE", "text", LEVEL_MAIN);
        f.add("REFNUM", "Doe2020", LEVEL_MAIN);
        f
    }

    #[test]
    fn journal_articles_get_ty_jour() {
        assert_eq!(get_type(&article()), RisType::Article);
    }

    #[test]
    fn assembled_record_shape() {
        let out = RisOut.assemble(&article(), &Param::new("t"), 0).unwrap();
        assert_eq!(out.value_of_nouse("TY", LEVEL_MAIN), Some("JOUR"));
        assert_eq!(out.value_of_nouse("AU", LEVEL_MAIN), Some("Doe, Jane"));
        assert_eq!(out.value_of_nouse("JO", LEVEL_MAIN), Some("J. Test."));
        assert_eq!(out.value_of_nouse("PY", LEVEL_MAIN), Some("2020"));
        assert_eq!(out.value_of_nouse("DA", LEVEL_MAIN), Some("2020/03/"));
        assert_eq!(out.value_of_nouse("SP", LEVEL_MAIN), Some("100"));
        assert_eq!(out.value_of_nouse("EP", LEVEL_MAIN), Some("110"));
        assert_eq!(out.value_of_nouse("DO", LEVEL_MAIN), Some("10.1000/xyz"));
        assert_eq!(out.value_of_nouse("ID", LEVEL_MAIN), Some("Doe2020"));
        // the DOI also shows up as a full URL
        assert_eq!(out.value_of_nouse("UR", LEVEL_MAIN), Some("https://doi.org/10.1000/xyz"));
    }

    #[test]
    fn writer_terminates_with_er() {
        let out = RisOut.assemble(&article(), &Param::new("t"), 0).unwrap();
        let mut buf = Vec::new();
        RisOut.write(&out, &mut buf, &Param::new("t"), 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("TY  - JOUR\n"));
        assert!(text.ends_with("ER  - \n"));
    }

    #[test]
    fn monographic_hint_yields_book() {
        let mut f = FieldStore::new();
        f.add("TITLE", "Some Book", LEVEL_MAIN);
        f.add("ISSUANCE", "monographic", LEVEL_MAIN);
        assert_eq!(get_type(&f), RisType::Book);
    }

    #[test]
    fn article_number_stands_in_for_pages() {
        let mut f = FieldStore::new();
        f.add("ARTICLENUMBER", "022345", LEVEL_MAIN);
        let mut out = FieldStore::new();
        append_pages(&f, &mut out);
        assert_eq!(out.value_of_nouse("SP", LEVEL_MAIN), Some("022345"));
    }
}
