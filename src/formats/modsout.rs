//! MODS XML writer.
//!
//! One `<mods ID="…">` element per reference inside a `<modsCollection>`;
//! host, series and original-work levels nest as `<relatedItem>`
//! elements. Values arrive already XML-escaped from charset conversion.

use super::{emit_str, OutputDriver};
use crate::charsets;
use crate::fields::{FieldStore, LEVEL_HOST, LEVEL_MAIN, LEVEL_ORIG, LEVEL_SERIES};
use crate::param::{Param, XmlOut};
use std::fmt::Write as _;
use std::io::Write;

pub struct ModsOut;

/// iso639-2b codes for the languages the corpus names in full.
static ISO639_2B: &[(&str, &str)] = &[
    ("arabic", "ara"),
    ("chinese", "chi"),
    ("czech", "cze"),
    ("danish", "dan"),
    ("dutch", "dut"),
    ("english", "eng"),
    ("finnish", "fin"),
    ("french", "fre"),
    ("german", "ger"),
    ("greek", "gre"),
    ("hebrew", "heb"),
    ("hungarian", "hun"),
    ("italian", "ita"),
    ("japanese", "jpn"),
    ("korean", "kor"),
    ("latin", "lat"),
    ("norwegian", "nor"),
    ("polish", "pol"),
    ("portuguese", "por"),
    ("russian", "rus"),
    ("spanish", "spa"),
    ("swedish", "swe"),
    ("turkish", "tur"),
    ("ukrainian", "ukr"),
];

fn iso639_code(language: &str) -> Option<&'static str> {
    ISO639_2B
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(language))
        .map(|(_, code)| *code)
}

/// Identifier type attributes, canonical tag to MODS name.
static IDENTIFIER_TYPES: &[(&str, &str)] = &[
    ("REFNUM", "citekey"),
    ("ISSN", "issn"),
    ("ISBN", "isbn"),
    ("ISBN13", "isbn"),
    ("DOI", "doi"),
    ("PMID", "pubmed"),
    ("MEDLINE", "medline"),
    ("PMC", "pmc"),
    ("PII", "pii"),
    ("ARXIV", "arXiv"),
    ("ISIREFNUM", "isi"),
    ("SERIALNUMBER", "serial number"),
    ("ACCESSNUM", "accessnum"),
    ("JSTOR", "jstor"),
    ("MRNUMBER", "mr"),
];

struct Xml {
    text: String,
    indent: usize,
}

impl Xml {
    fn new() -> Self {
        Xml {
            text: String::new(),
            indent: 0,
        }
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.text.push_str("    ");
        }
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.pad();
        self.text.push('<');
        self.text.push_str(tag);
        for (k, v) in attrs {
            let _ = write!(self.text, " {k}=\"{v}\"");
        }
        self.text.push_str(">\n");
        self.indent += 1;
    }

    fn close(&mut self, tag: &str) {
        self.indent -= 1;
        self.pad();
        let _ = writeln!(self.text, "</{tag}>");
    }

    fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], value: &str) {
        self.pad();
        self.text.push('<');
        self.text.push_str(tag);
        for (k, v) in attrs {
            let _ = write!(self.text, " {k}=\"{v}\"");
        }
        let _ = write!(self.text, ">{value}</{tag}>");
        self.text.push('\n');
    }

    fn selfclose(&mut self, tag: &str) {
        self.pad();
        let _ = writeln!(self.text, "<{tag}/>");
    }
}

fn output_title(x: &mut Xml, f: &FieldStore, level: i32) {
    let title = f.value_of("TITLE", level);
    let sub = f.value_of("SUBTITLE", level);
    let part = f.value_of("PARTTITLE", level);
    let short = f.value_of("SHORTTITLE", level);

    x.open("titleInfo", &[]);
    if let Some(t) = title {
        x.leaf("title", &[], t);
    }
    if let Some(s) = sub {
        x.leaf("subTitle", &[], s);
    }
    if let Some(p) = part {
        x.leaf("partName", &[], p);
    }
    if title.is_none() && sub.is_none() {
        // MODS requires at least an empty title element
        x.selfclose("title");
    }
    x.close("titleInfo");

    // the abbreviated form, unless it repeats the full title exactly
    if let Some(s) = short {
        if title != Some(s) || sub.is_some() {
            x.open("titleInfo", &[("type", "abbreviated")]);
            x.leaf("title", &[], s);
            x.close("titleInfo");
        }
    }
}

/// One personal name from canonical `Family|Given|Given||Suffix` form.
fn output_person(x: &mut Xml, canonical: &str) {
    let mut family = None;
    let mut givens = Vec::new();
    let mut suffix = None;
    let mut saw_break = false;
    for (i, piece) in canonical.split('|').enumerate() {
        if i == 0 {
            family = Some(piece);
        } else if piece.is_empty() {
            saw_break = true;
        } else if saw_break {
            suffix = Some(piece);
        } else {
            givens.push(piece);
        }
    }
    for g in givens {
        // initials drop their periods: "Q." is the namePart "Q"
        let g = if g.len() == 2 && g.ends_with('.') {
            &g[..1]
        } else {
            g
        };
        x.leaf("namePart", &[("type", "given")], g);
    }
    if let Some(fam) = family {
        if !fam.is_empty() {
            x.leaf("namePart", &[("type", "family")], fam);
        }
    }
    if let Some(sfx) = suffix {
        x.leaf("namePart", &[("type", "suffix")], sfx);
    }
}

fn output_names(x: &mut Xml, f: &FieldStore, level: i32) {
    // (canonical role tag, marcrelator term)
    const ROLES: &[(&str, &str)] = &[
        ("AUTHOR", "author"),
        ("EDITOR", "editor"),
        ("TRANSLATOR", "translator"),
        ("DEGREEGRANTOR", "degree grantor"),
        ("ORGANIZER", "organizer of meeting"),
        ("REPORTER", "reporter"),
        ("ADDRESSEE", "addressee"),
    ];

    for (role_tag, role_term) in ROLES {
        for row in f.iter() {
            if row.level() != level || row.value().is_empty() {
                continue;
            }
            let tag = row.tag();
            let (base, shape) = match tag.rsplit_once(':') {
                Some((base, "ASIS")) => (base, "asis"),
                Some((base, "CORP")) => (base, "corp"),
                _ => (tag, "person"),
            };
            if !base.eq_ignore_ascii_case(role_tag) {
                continue;
            }

            match shape {
                "asis" => {
                    x.open("name", &[]);
                    x.leaf("namePart", &[], row.value());
                }
                "corp" => {
                    x.open("name", &[("type", "corporate")]);
                    x.leaf("namePart", &[], row.value());
                }
                _ => {
                    x.open("name", &[("type", "personal")]);
                    output_person(x, row.value());
                }
            }
            x.open("role", &[]);
            x.leaf(
                "roleTerm",
                &[("authority", "marcrelator"), ("type", "text")],
                role_term,
            );
            x.close("role");
            x.close("name");
        }
    }
}

fn pieces_from(f: &FieldStore, level: i32, tags: [&str; 3]) -> Option<String> {
    let y = f.value_of(tags[0], level);
    let m = f.value_of(tags[1], level);
    let d = f.value_of(tags[2], level);
    if y.is_none() && m.is_none() && d.is_none() {
        return None;
    }
    let mut out = y.unwrap_or("XXXX").to_string();
    if let Some(m) = m {
        // zero pad single-digit months and days
        if m.len() == 1 {
            out.push_str("-0");
        } else {
            out.push('-');
        }
        out.push_str(m);
    }
    if let Some(d) = d {
        if m.is_none() {
            out.push_str("-XX");
        }
        if d.len() == 1 {
            out.push_str("-0");
        } else {
            out.push('-');
        }
        out.push_str(d);
    }
    Some(out)
}

fn date_pieces(f: &FieldStore, level: i32) -> Option<String> {
    pieces_from(f, level, ["DATE:YEAR", "DATE:MONTH", "DATE:DAY"]).or_else(|| {
        pieces_from(f, level, ["PARTDATE:YEAR", "PARTDATE:MONTH", "PARTDATE:DAY"])
    })
}

/// The `<part>` date only ever comes from the part-date fields.
fn partdate_pieces(f: &FieldStore, level: i32) -> Option<String> {
    pieces_from(f, level, ["PARTDATE:YEAR", "PARTDATE:MONTH", "PARTDATE:DAY"])
}

fn output_origin(x: &mut Xml, f: &FieldStore, level: i32, with_date: bool) {
    let issuance = f.value_of("ISSUANCE", level);
    let publisher = f.value_of("PUBLISHER", level);
    let place = f.value_of_firstof(&["ADDRESS", "ADDRESS:PUBLISHER", "ADDRESS:AUTHOR"], level);
    let edition = f.value_of("EDITION", level);
    let date = if with_date { date_pieces(f, level) } else { None };

    if issuance.is_none()
        && publisher.is_none()
        && place.is_none()
        && edition.is_none()
        && date.is_none()
    {
        return;
    }

    x.open("originInfo", &[]);
    if let Some(i) = issuance {
        x.leaf("issuance", &[], i);
    }
    if let Some(d) = date {
        x.leaf("dateIssued", &[], &d);
    }
    if let Some(p) = publisher {
        x.leaf("publisher", &[], p);
    }
    if let Some(pl) = place {
        x.open("place", &[]);
        x.leaf("placeTerm", &[("type", "text")], pl);
        x.close("place");
    }
    if let Some(e) = edition {
        x.leaf("edition", &[], e);
    }
    x.close("originInfo");
}

fn output_language(x: &mut Xml, f: &FieldStore, tag: &str, element: &str, level: i32) {
    let Some(lang) = f.value_of(tag, level) else {
        return;
    };
    x.open(element, &[]);
    x.leaf("languageTerm", &[("type", "text")], lang);
    if let Some(code) = iso639_code(lang) {
        x.leaf(
            "languageTerm",
            &[("type", "code"), ("authority", "iso639-2b")],
            code,
        );
    }
    x.close(element);
}

fn output_genres(x: &mut Xml, f: &FieldStore, level: i32) {
    if let Some(r) = f.value_of("RESOURCE", level) {
        x.leaf("typeOfResource", &[], r);
    }
    for n in f.find_each("GENRE:MARC", level) {
        x.leaf("genre", &[("authority", "marcgt")], f.value(n));
    }
    for n in f.find_each("GENRE:BIBUTILS", level) {
        x.leaf("genre", &[], f.value(n));
    }
    for n in f.find_each("GENRE:UNKNOWN", level) {
        x.leaf("genre", &[], f.value(n));
    }
}

fn output_details(x: &mut Xml, f: &FieldStore, level: i32) {
    let mut part = Vec::new();
    for (tag, kind) in [
        ("VOLUME", "volume"),
        ("ISSUE", "issue"),
        ("NUMBER", "number"),
        ("SECTION", "section"),
    ] {
        if let Some(v) = f.value_of(tag, level) {
            part.push((kind, v.to_string()));
        }
    }
    let start = f.value_of("PAGES:START", level);
    let stop = f.value_of("PAGES:STOP", level);
    let total = f.value_of("PAGES:TOTAL", level);
    let article = f.value_of("ARTICLENUMBER", level);
    let date = partdate_pieces(f, level);

    if part.is_empty()
        && start.is_none()
        && stop.is_none()
        && total.is_none()
        && article.is_none()
        && date.is_none()
    {
        return;
    }

    x.open("part", &[]);
    if let Some(d) = date {
        x.leaf("date", &[], &d);
    }
    for (kind, v) in part {
        x.pad();
        let _ = writeln!(
            x.text,
            "<detail type=\"{kind}\"><number>{v}</number></detail>"
        );
    }
    if start.is_some() || stop.is_some() {
        x.open("extent", &[("unit", "page")]);
        if let Some(s) = start {
            x.leaf("start", &[], s);
        }
        if let Some(e) = stop {
            x.leaf("end", &[], e);
        }
        if let Some(t) = total {
            x.leaf("total", &[], t);
        }
        x.close("extent");
    } else if let Some(a) = article {
        x.open("extent", &[("unit", "page")]);
        x.leaf("start", &[], a);
        x.close("extent");
    }
    x.close("part");
}

/// The descriptive body shared by the item and every related level.
fn output_level_body(x: &mut Xml, f: &FieldStore, level: i32) {
    output_title(x, f, level);
    output_names(x, f, level);
    output_origin(x, f, level, level != LEVEL_HOST);
    output_language(x, f, "LANGUAGE", "language", level);
    output_language(x, f, "LANGCATALOG", "languageOfCataloging", level);
    output_genres(x, f, level);

    if let Some(d) = f.value_of("DESCRIPTION", level) {
        x.open("physicalDescription", &[]);
        x.leaf("note", &[], d);
        x.close("physicalDescription");
    }
    if let Some(a) = f.value_of("ABSTRACT", level) {
        x.leaf("abstract", &[], a);
    }
    if let Some(c) = f.value_of("CONTENTS", level) {
        x.leaf("tableOfContents", &[], c);
    }
    for n in f.find_each("NOTES", level) {
        x.leaf("note", &[], f.value(n));
    }
    for n in f.find_each("ANNOTE", level) {
        x.leaf("note", &[("type", "annotation")], f.value(n));
    }
    for n in f.find_each("KEYWORD", level) {
        x.open("subject", &[]);
        x.leaf("topic", &[], f.value(n));
        x.close("subject");
    }
    if let Some(c) = f.value_of("CALLNUMBER", level) {
        x.leaf("classification", &[], c);
    }
}

fn output_identifiers(x: &mut Xml, f: &FieldStore, p: &Param) {
    for (tag, mods_type) in IDENTIFIER_TYPES {
        if *tag == "REFNUM" && p.drop_key {
            continue;
        }
        for n in f.find_each(tag, crate::fields::LEVEL_ANY) {
            x.leaf("identifier", &[("type", mods_type)], f.value(n));
        }
    }

    let urls = f.find_each("URL", crate::fields::LEVEL_ANY);
    let files = f.find_each("FILEATTACH", crate::fields::LEVEL_ANY);
    if !urls.is_empty() || !files.is_empty() {
        x.open("location", &[]);
        for n in urls {
            x.leaf("url", &[], f.value(n));
        }
        for n in files {
            x.leaf("physicalLocation", &[], f.value(n));
        }
        x.close("location");
    }
}

impl OutputDriver for ModsOut {
    fn init_params(&self, p: &mut Param) {
        p.latex_out = false;
        p.utf8_out = true;
        p.utf8_bom = true;
        p.xml_out = XmlOut::Minimal;
    }

    fn header(&self, w: &mut dyn Write, p: &Param) -> std::io::Result<()> {
        if p.utf8_out && p.utf8_bom {
            charsets::write_bom(w)?;
        }
        let encoding = if p.utf8_out { "UTF-8" } else { "US-ASCII" };
        let text = format!(
            "<?xml version=\"1.0\" encoding=\"{encoding}\"?>\n<modsCollection xmlns=\"http://www.loc.gov/mods/v3\">\n"
        );
        charsets::emit(w, &text, p.utf8_out)
    }

    fn footer(&self, w: &mut dyn Write) -> std::io::Result<()> {
        w.write_all(b"</modsCollection>\n")
    }

    fn write(
        &self,
        f: &FieldStore,
        w: &mut dyn Write,
        p: &Param,
        refnum: usize,
    ) -> crate::Result<()> {
        let mut x = Xml::new();

        if p.drop_key {
            x.open("mods", &[]);
        } else {
            match f.value_of("REFNUM", LEVEL_MAIN) {
                Some(id) => x.open("mods", &[("ID", id)]),
                None => x.open("mods", &[("ID", &format!("ref{}", refnum + 1))]),
            }
        }

        output_level_body(&mut x, f, LEVEL_MAIN);

        if f.iter().any(|row| row.level() == LEVEL_HOST) {
            x.open("relatedItem", &[("type", "host")]);
            output_level_body(&mut x, f, LEVEL_HOST);
            output_details(&mut x, f, LEVEL_MAIN);
            x.close("relatedItem");
        } else {
            output_details(&mut x, f, LEVEL_MAIN);
        }
        if f.iter().any(|row| row.level() == LEVEL_SERIES) {
            x.open("relatedItem", &[("type", "series")]);
            output_level_body(&mut x, f, LEVEL_SERIES);
            x.close("relatedItem");
        }
        if f.iter().any(|row| row.level() == LEVEL_ORIG) {
            x.open("relatedItem", &[("type", "original")]);
            output_level_body(&mut x, f, LEVEL_ORIG);
            x.close("relatedItem");
        }

        output_identifiers(&mut x, f, p);
        x.close("mods");

        emit_str(w, p, &x.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::LEVEL_MAIN;

    fn article() -> FieldStore {
        let mut f = FieldStore::new();
        f.add("REFNUM", "Smith2001", LEVEL_MAIN);
        f.add("AUTHOR", "Smith|John|Q.", LEVEL_MAIN);
        f.add("TITLE", "A Study", LEVEL_MAIN);
        f.add("SUBTITLE", "Methods", LEVEL_MAIN);
        f.add("TITLE", "J. Test.", LEVEL_HOST);
        f.add("DATE:YEAR", "2001", LEVEL_MAIN);
        f.add("VOLUME", "12", LEVEL_MAIN);
        f.add("PAGES:START", "34", LEVEL_MAIN);
        f.add("PAGES:STOP", "56", LEVEL_MAIN);
        f.add("ISSUANCE", "continuing", LEVEL_HOST);
        f.add("GENRE:MARC", "periodical", LEVEL_HOST);
        f.add("RESOURCE", "text", LEVEL_MAIN);
        f.add("LANGUAGE", "French", LEVEL_MAIN);
        f.add("DOI", "10.1000/xyz", LEVEL_MAIN);
        f
    }

    fn render(f: &FieldStore) -> String {
        let mut buf = Vec::new();
        ModsOut.write(f, &mut buf, &Param::new("t"), 0).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn mods_structure() {
        let text = render(&article());
        assert!(text.starts_with("<mods ID=\"Smith2001\">"));
        assert!(text.contains("<title>A Study</title>"));
        assert!(text.contains("<subTitle>Methods</subTitle>"));
        assert!(text.contains("<relatedItem type=\"host\">"));
        assert!(text.contains("<title>J. Test.</title>"));
        assert!(text.contains("<namePart type=\"family\">Smith</namePart>"));
        // the "Q." initial loses its period
        assert!(text.contains("<namePart type=\"given\">Q</namePart>"));
        assert!(text.contains("<detail type=\"volume\"><number>12</number></detail>"));
        assert!(text.contains("<start>34</start>"));
        assert!(text.contains("<identifier type=\"doi\">10.1000/xyz</identifier>"));
        assert!(text.trim_end().ends_with("</mods>"));
    }

    #[test]
    fn language_code_is_added_when_known() {
        let text = render(&article());
        assert!(text.contains("<languageTerm type=\"text\">French</languageTerm>"));
        assert!(text
            .contains("<languageTerm type=\"code\" authority=\"iso639-2b\">fre</languageTerm>"));
    }

    #[test]
    fn genre_authorities() {
        let text = render(&article());
        assert!(text.contains("<genre authority=\"marcgt\">periodical</genre>"));
        assert!(text.contains("<typeOfResource>text</typeOfResource>"));
    }

    #[test]
    fn header_and_footer() {
        let mut buf = Vec::new();
        let mut p = Param::new("t");
        p.utf8_bom = false;
        ModsOut.header(&mut buf, &p).unwrap();
        ModsOut.footer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("<modsCollection xmlns=\"http://www.loc.gov/mods/v3\">"));
        assert!(text.ends_with("</modsCollection>\n"));
    }
}
