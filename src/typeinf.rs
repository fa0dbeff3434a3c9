//! Reference-type inference from genre/resource/issuance hints.
//!
//! Output dialects map the canonical hint fields onto their own type
//! enums. The match lists are dialect data; the three-pass first-match
//! algorithm is shared.

use crate::fields::{FieldStore, LevelMatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintKind {
    Genre,
    Resource,
    Issuance,
}

/// One `(value, type, level)` match row.
pub struct TypeMatch<T: Copy> {
    pub name: &'static str,
    pub reftype: T,
    pub level: LevelMatch,
}

fn is_hint_tag(kind: HintKind, tag: &str) -> bool {
    match kind {
        HintKind::Genre => {
            tag.eq_ignore_ascii_case("GENRE:MARC")
                || tag.eq_ignore_ascii_case("GENRE:BIBUTILS")
                || tag.eq_ignore_ascii_case("GENRE:UNKNOWN")
        }
        HintKind::Resource => tag.eq_ignore_ascii_case("RESOURCE"),
        HintKind::Issuance => tag.eq_ignore_ascii_case("ISSUANCE"),
    }
}

/// First match wins: the match list is scanned in order, and within each
/// row every hint field of the reference is examined. Distinguishing
/// `book` at MAIN from `book` anywhere orders the rows, not the fields.
pub fn type_from_hints<T: Copy>(
    f: &FieldStore,
    kind: HintKind,
    matches: &[TypeMatch<T>],
    unknown: T,
) -> T
where
    T: PartialEq,
{
    for m in matches {
        for row in f.iter() {
            if !is_hint_tag(kind, row.tag()) {
                continue;
            }
            if !row.value().eq_ignore_ascii_case(m.name) {
                continue;
            }
            if let LevelMatch::Only(want) = m.level {
                if row.level() != want {
                    continue;
                }
            }
            return m.reftype;
        }
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN};
    use crate::fields::LevelMatch::Only;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum T {
        Unknown,
        Book,
        Chapter,
    }

    #[test]
    fn level_refines_the_same_genre() {
        let matches = [
            TypeMatch { name: "book", reftype: T::Book, level: Only(LEVEL_MAIN) },
            TypeMatch { name: "book", reftype: T::Chapter, level: LEVEL_ANY },
        ];

        let mut whole = FieldStore::new();
        whole.add("GENRE:MARC", "book", LEVEL_MAIN);
        assert_eq!(type_from_hints(&whole, HintKind::Genre, &matches, T::Unknown), T::Book);

        let mut chapter = FieldStore::new();
        chapter.add("GENRE:MARC", "book", LEVEL_HOST);
        assert_eq!(type_from_hints(&chapter, HintKind::Genre, &matches, T::Unknown), T::Chapter);
    }

    #[test]
    fn non_hint_tags_are_ignored() {
        let matches = [TypeMatch { name: "book", reftype: T::Book, level: LEVEL_ANY }];
        let mut f = FieldStore::new();
        f.add("TITLE", "book", LEVEL_MAIN);
        assert_eq!(type_from_hints(&f, HintKind::Genre, &matches, T::Unknown), T::Unknown);
    }
}
