//! Genre vocabularies used to classify `GENRE:*` fields and to infer
//! reference types.

/// MARC genre authority terms (www.loc.gov/marc/sourcecode/genre).
pub static MARC_GENRES: &[&str] = &[
    "abstract or summary",
    "art original",
    "art reproduction",
    "article",
    "atlas",
    "autobiography",
    "bibliography",
    "biography",
    "book",
    "calendar",
    "catalog",
    "chart",
    "comic or graphic novel",
    "comic strip",
    "conference publication",
    "database",
    "dictionary",
    "diorama",
    "directory",
    "discography",
    "drama",
    "encyclopedia",
    "essay",
    "festschrift",
    "fiction",
    "filmography",
    "filmstrip",
    "finding aid",
    "flash card",
    "folktale",
    "font",
    "game",
    "government publication",
    "graphic",
    "globe",
    "handbook",
    "history",
    "humor, satire",
    "hymnal",
    "index",
    "instruction",
    "interview",
    "issue",
    "journal",
    "kit",
    "language instruction",
    "law report or digest",
    "legal article",
    "legal case and case notes",
    "legislation",
    "letter",
    "loose-leaf",
    "map",
    "memoir",
    "microscope slide",
    "model",
    "motion picture",
    "multivolume monograph",
    "newspaper",
    "novel",
    "numeric data",
    "offprint",
    "online system or service",
    "patent",
    "periodical",
    "picture",
    "poetry",
    "programmed text",
    "realia",
    "rehearsal",
    "remote sensing image",
    "reporting",
    "review",
    "series",
    "short story",
    "slide",
    "sound",
    "speech",
    "standard or specification",
    "statistics",
    "survey of literature",
    "technical drawing",
    "technical report",
    "thesis",
    "toy",
    "transparency",
    "treaty",
    "videorecording",
    "web site",
    "yearbook",
];

/// MARC resource terms for `RESOURCE` fields.
pub static MARC_RESOURCES: &[&str] = &[
    "cartographic",
    "kit",
    "mixed material",
    "moving image",
    "notated music",
    "software, multimedia",
    "sound recording",
    "sound recording - musical",
    "sound recording - nonmusical",
    "still image",
    "text",
    "three dimensional object",
];

/// Genre terms of the internal vocabulary that MARC does not define.
pub static EXTRA_GENRES: &[&str] = &[
    "academic journal",
    "airtel",
    "collection",
    "communication",
    "Diploma thesis",
    "Doctoral thesis",
    "electronic",
    "e-mail communication",
    "Habilitation thesis",
    "handwritten note",
    "hearing",
    "journal article",
    "Licentiate thesis",
    "magazine",
    "magazine article",
    "manuscript",
    "Masters thesis",
    "memo",
    "miscellaneous",
    "newspaper article",
    "pamphlet",
    "Ph.D. thesis",
    "press release",
    "teletype",
    "television broadcast",
    "unpublished",
];

fn in_list(list: &[&str], query: &str) -> bool {
    list.iter().any(|g| g.eq_ignore_ascii_case(query))
}

pub fn is_marc_genre(query: &str) -> bool {
    in_list(MARC_GENRES, query)
}

pub fn is_marc_resource(query: &str) -> bool {
    in_list(MARC_RESOURCES, query)
}

pub fn is_extra_genre(query: &str) -> bool {
    in_list(EXTRA_GENRES, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_membership() {
        assert!(is_marc_genre("periodical"));
        assert!(is_marc_genre("TECHNICAL REPORT"));
        assert!(!is_marc_genre("academic journal"));
        assert!(is_extra_genre("academic journal"));
        assert!(is_extra_genre("ph.d. thesis"));
        assert!(is_marc_resource("text"));
    }
}
