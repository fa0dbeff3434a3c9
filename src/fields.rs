//! The tagged intermediate container every stage of the pipeline works on.
//!
//! A reference is an insertion-ordered list of `(tag, value, level)` rows.
//! Tags compare ASCII-case-insensitively. The `level` records bibliographic
//! nesting: the item itself, its host (journal, book), the series above
//! that, or the original work for re-publications.

use std::cell::Cell;

pub const LEVEL_ORIG: i32 = -2;
pub const LEVEL_MAIN: i32 = 0;
pub const LEVEL_HOST: i32 = 1;
pub const LEVEL_SERIES: i32 = 2;

/// Level constraint for lookups.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LevelMatch {
    Any,
    Only(i32),
}

pub const LEVEL_ANY: LevelMatch = LevelMatch::Any;

impl From<i32> for LevelMatch {
    fn from(level: i32) -> Self {
        LevelMatch::Only(level)
    }
}

impl LevelMatch {
    fn matches(self, level: i32) -> bool {
        match self {
            LevelMatch::Any => true,
            LevelMatch::Only(want) => level == want,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dup {
    /// Append unconditionally.
    Allow,
    /// Return success without appending when an identical
    /// (case-insensitive tag, value, level) row already exists.
    Suppress,
}

#[derive(Debug)]
pub struct Field {
    tag: String,
    value: String,
    level: i32,
    used: Cell<bool>,
}

impl Field {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn is_used(&self) -> bool {
        self.used.get()
    }
}

/// Ordered store of [`Field`] rows; iteration is insertion order.
#[derive(Debug, Default)]
pub struct FieldStore {
    fields: Vec<Field>,
}

impl FieldStore {
    pub fn new() -> Self {
        FieldStore { fields: Vec::new() }
    }

    pub fn num(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Append a row. With [`Dup::Suppress`], an identical row is silently
    /// dropped instead.
    pub fn add_dup(&mut self, tag: &str, value: &str, level: i32, dup: Dup) {
        if dup == Dup::Suppress {
            let exists = self.fields.iter().any(|f| {
                f.level == level && f.tag.eq_ignore_ascii_case(tag) && f.value == value
            });
            if exists {
                return;
            }
        }
        self.fields.push(Field {
            tag: tag.to_string(),
            value: value.to_string(),
            level,
            used: Cell::new(false),
        });
    }

    /// Append with duplicate suppression (the common case).
    pub fn add(&mut self, tag: &str, value: &str, level: i32) {
        self.add_dup(tag, value, level, Dup::Suppress);
    }

    /// Append unconditionally.
    pub fn add_can_dup(&mut self, tag: &str, value: &str, level: i32) {
        self.add_dup(tag, value, level, Dup::Allow);
    }

    /// Append under `tag` + `suffix` (e.g. `AUTHOR` + `:CORP`).
    pub fn add_with_suffix(&mut self, tag: &str, suffix: &str, value: &str, level: i32, dup: Dup) {
        let mut full = String::with_capacity(tag.len() + suffix.len());
        full.push_str(tag);
        full.push_str(suffix);
        self.add_dup(&full, value, level, dup);
    }

    /// Overwrite the first row matching `(tag, level)`, or append one.
    pub fn replace_or_add(&mut self, tag: &str, value: &str, level: i32) {
        match self.find(tag, level) {
            Some(n) => self.fields[n].value = value.to_string(),
            None => self.add(tag, value, level),
        }
    }

    /// Index of the first row whose tag matches case-insensitively at the
    /// requested level. Rows with empty values are treated as not-found
    /// and marked used so they stop showing up in unused-tag diagnostics.
    pub fn find(&self, tag: &str, level: impl Into<LevelMatch>) -> Option<usize> {
        let level = level.into();
        for (i, f) in self.fields.iter().enumerate() {
            if !level.matches(f.level) || !f.tag.eq_ignore_ascii_case(tag) {
                continue;
            }
            if !f.value.is_empty() {
                return Some(i);
            }
            f.used.set(true);
        }
        None
    }

    /// First match among `tags`, in tag-priority order.
    pub fn find_first_of(&self, tags: &[&str], level: impl Into<LevelMatch>) -> Option<usize> {
        let level = level.into();
        tags.iter().find_map(|tag| self.find(tag, level))
    }

    /// Value of the first match, marking the row used.
    pub fn value_of(&self, tag: &str, level: impl Into<LevelMatch>) -> Option<&str> {
        self.find(tag, level).map(|n| {
            self.fields[n].used.set(true);
            self.fields[n].value.as_str()
        })
    }

    /// Like [`value_of`](Self::value_of), without touching the used bit.
    pub fn value_of_nouse(&self, tag: &str, level: impl Into<LevelMatch>) -> Option<&str> {
        self.find(tag, level).map(|n| self.fields[n].value.as_str())
    }

    pub fn value_of_firstof(&self, tags: &[&str], level: impl Into<LevelMatch>) -> Option<&str> {
        self.find_first_of(tags, level).map(|n| {
            self.fields[n].used.set(true);
            self.fields[n].value.as_str()
        })
    }

    /// Indices of every non-empty row matching `(tag, level)`, marking
    /// each used. Empty rows only get their used bit set.
    pub fn find_each(&self, tag: &str, level: impl Into<LevelMatch>) -> Vec<usize> {
        let level = level.into();
        let mut out = Vec::new();
        for (i, f) in self.fields.iter().enumerate() {
            if !level.matches(f.level) || !f.tag.eq_ignore_ascii_case(tag) {
                continue;
            }
            if f.value.is_empty() {
                f.used.set(true);
            } else {
                f.used.set(true);
                out.push(i);
            }
        }
        out
    }

    /// [`find_each`](Self::find_each) over several tags at once, in row order.
    pub fn find_each_of(&self, tags: &[&str], level: impl Into<LevelMatch>) -> Vec<usize> {
        let level = level.into();
        let mut out = Vec::new();
        for (i, f) in self.fields.iter().enumerate() {
            if !level.matches(f.level) {
                continue;
            }
            if !tags.iter().any(|t| f.tag.eq_ignore_ascii_case(t)) {
                continue;
            }
            if f.value.is_empty() {
                f.used.set(true);
            } else {
                f.used.set(true);
                out.push(i);
            }
        }
        out
    }

    pub fn max_level(&self) -> i32 {
        self.fields.iter().map(|f| f.level).max().unwrap_or(0)
    }

    pub fn tag(&self, n: usize) -> &str {
        &self.fields[n].tag
    }

    pub fn value(&self, n: usize) -> &str {
        &self.fields[n].value
    }

    pub fn value_mut(&mut self, n: usize) -> &mut String {
        &mut self.fields[n].value
    }

    pub fn set_value(&mut self, n: usize, value: impl Into<String>) {
        self.fields[n].value = value.into();
    }

    pub fn set_tag(&mut self, n: usize, tag: impl Into<String>) {
        self.fields[n].tag = tag.into();
    }

    pub fn level(&self, n: usize) -> i32 {
        self.fields[n].level
    }

    pub fn is_used(&self, n: usize) -> bool {
        self.fields[n].used.get()
    }

    pub fn set_used(&self, n: usize) {
        if let Some(f) = self.fields.get(n) {
            f.used.set(true);
        }
    }

    pub fn clear_used(&self) {
        for f in &self.fields {
            f.used.set(false);
        }
    }

    pub fn has_notag(&self, n: usize) -> bool {
        self.fields[n].tag.is_empty()
    }

    pub fn has_nodata(&self, n: usize) -> bool {
        self.fields[n].value.is_empty()
    }

    /// Debug dump of every row, one line each, for the verbose modes.
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        for (i, f) in self.fields.iter().enumerate() {
            writeln!(
                out,
                "{}\tlevel = {}\t'{}' = '{}'",
                i + 1,
                f.level,
                f.tag,
                f.value
            )
            .unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> FieldStore {
        let mut f = FieldStore::new();
        f.add("AUTHOR", "Smith|John", LEVEL_MAIN);
        f.add("AUTHOR", "Doe|Jane", LEVEL_MAIN);
        f.add("TITLE", "A Study", LEVEL_MAIN);
        f.add("TITLE", "J. Test.", LEVEL_HOST);
        f
    }

    #[test]
    fn find_is_case_insensitive_and_level_aware() {
        let f = store();
        assert_eq!(f.find("title", LEVEL_MAIN), Some(2));
        assert_eq!(f.find("TiTlE", LEVEL_HOST), Some(3));
        assert_eq!(f.find("TITLE", LEVEL_SERIES), None);
        assert_eq!(f.find("TITLE", LEVEL_ANY), Some(2));
    }

    #[test]
    fn no_dup_suppresses_identical_triples() {
        let mut f = store();
        f.add("author", "Smith|John", LEVEL_MAIN);
        assert_eq!(f.num(), 4);
        // same tag+value at a different level is a new row
        f.add("AUTHOR", "Smith|John", LEVEL_HOST);
        assert_eq!(f.num(), 5);
        f.add_can_dup("AUTHOR", "Smith|John", LEVEL_MAIN);
        assert_eq!(f.num(), 6);
    }

    #[test]
    fn empty_value_is_not_found_but_marked_used() {
        let mut f = FieldStore::new();
        f.add_can_dup("NOTE", "", LEVEL_MAIN);
        assert_eq!(f.find("NOTE", LEVEL_MAIN), None);
        assert!(f.is_used(0));
    }

    #[test]
    fn replace_or_add_overwrites_in_place() {
        let mut f = store();
        f.replace_or_add("TITLE", "Replaced", LEVEL_MAIN);
        assert_eq!(f.value(2), "Replaced");
        assert_eq!(f.num(), 4);
        f.replace_or_add("VOLUME", "12", LEVEL_MAIN);
        assert_eq!(f.num(), 5);
    }

    #[test]
    fn find_each_returns_all_matches_in_order() {
        let f = store();
        assert_eq!(f.find_each("AUTHOR", LEVEL_MAIN), vec![0, 1]);
        assert!(f.is_used(0) && f.is_used(1));
        assert_eq!(f.find_each_of(&["AUTHOR", "TITLE"], LEVEL_ANY), vec![0, 1, 2, 3]);
    }

    #[test]
    fn insertion_order_is_stable() {
        let f = store();
        let tags: Vec<_> = f.iter().map(|x| x.tag()).collect();
        assert_eq!(tags, vec!["AUTHOR", "AUTHOR", "TITLE", "TITLE"]);
        assert_eq!(f.max_level(), LEVEL_HOST);
    }
}
