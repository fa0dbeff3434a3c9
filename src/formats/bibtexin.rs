//! BibTeX reader.
//!
//! References start at `@type{key,` (or parentheses); values respect
//! brace and quote pairing with backslash escapes; `#` concatenates at
//! top level; `@STRING` definitions populate a macro table consulted by
//! later values; `@COMMENT` blocks are dropped.

use super::{bibtextypes::BIBTEX_TABLE, InputDriver, LineCarry, RawRecord};
use crate::charsets::{self, Charset};
use crate::fields::{FieldStore, LEVEL_ANY, LEVEL_MAIN};
use crate::generic;
use crate::name;
use crate::param::Param;
use crate::reftypes::{self, ProcessingKind, RefTypeTable};
use crate::url;
use crate::warn;
use std::collections::HashMap;
use std::io;

#[derive(Default)]
pub struct BibtexIn {
    /// `@STRING` macro table; a redefinition keeps the last value.
    macros: HashMap<String, String>,
}

/* ---------- value tokenizer ---------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escaped {
    Not,
    Quotes,
    Braces,
}

fn token_escape(s: &str) -> Escaped {
    let first = s.chars().next();
    let last = s.chars().last();
    match (first, last) {
        (Some('"'), Some('"')) if s.len() >= 2 => Escaped::Quotes,
        (Some('{'), Some('}')) if s.len() >= 2 => Escaped::Braces,
        _ => Escaped::Not,
    }
}

fn trim_first_last(s: &str) -> &str {
    let mut chars = s.char_indices();
    let Some((_, first)) = chars.next() else {
        return s;
    };
    let start = first.len_utf8();
    if s.len() <= start {
        return "";
    }
    let end = s.len() - s.chars().last().map(char::len_utf8).unwrap_or(0);
    if end < start {
        return "";
    }
    &s[start..end]
}

/// Scan one value off `chars[*i..]`, producing delimiter-aware tokens.
/// Stops at an unescaped `,`, `=`, `}` or `)`.
fn scan_value(
    chars: &[char],
    i: &mut usize,
    tokens: &mut Vec<String>,
    progname: &str,
    filename: &str,
    nref: usize,
) {
    let mut nbraces = 0i32;
    let mut nquotes = false;
    let mut token = String::new();
    let start = *i;

    while *i < chars.len() {
        let c = chars[*i];

        if !nquotes && nbraces == 0 && matches!(c, ',' | '=' | '}' | ')') {
            break;
        }

        let prev_backslash = *i > start && chars[*i - 1] == '\\';

        if c == '"' {
            token.push(c);
            if nbraces == 0 && !prev_backslash {
                nquotes = !nquotes;
                if !nquotes {
                    tokens.push(std::mem::take(&mut token));
                }
            }
        } else if c == '{' {
            token.push(c);
            if !nquotes && !prev_backslash {
                nbraces += 1;
            }
        } else if c == '}' {
            token.push(c);
            if !nquotes && !prev_backslash {
                nbraces -= 1;
                if nbraces == 0 {
                    tokens.push(std::mem::take(&mut token));
                }
                if nbraces < 0 {
                    break;
                }
            }
        } else if c == '#' {
            if nquotes || nbraces != 0 {
                token.push(c);
            } else {
                if !token.is_empty() {
                    tokens.push(std::mem::take(&mut token));
                }
                tokens.push("#".to_string());
            }
        } else if !c.is_whitespace() {
            token.push(c);
        } else if nquotes || nbraces != 0 {
            // escaped whitespace joins the token; newlines become spaces
            if !token.is_empty() || !matches!(c, '\n' | '\r') {
                if matches!(c, '\n' | '\r') {
                    token.push(' ');
                    while *i + 1 < chars.len() && chars[*i + 1].is_whitespace() {
                        *i += 1;
                    }
                } else {
                    token.push(c);
                }
            }
        } else if !token.is_empty() {
            tokens.push(std::mem::take(&mut token));
        }

        *i += 1;
    }

    if nbraces != 0 {
        warn!("{}: mismatch in number of braces in file {} reference {}", progname, filename, nref);
    }
    if nquotes {
        warn!("{}: mismatch in number of quotes in file {} reference {}", progname, filename, nref);
    }
    if !token.is_empty() {
        tokens.push(token);
    }
}

/* ---------- record parsing ---------- */

fn skip_ws(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
}

/// `@article{` -> "article", positioned after the opening brace.
fn scan_type(chars: &[char], i: &mut usize) -> String {
    if chars.get(*i) == Some(&'@') {
        *i += 1;
    }
    skip_ws(chars, i);
    let mut t = String::new();
    while *i < chars.len() && !matches!(chars[*i], '{' | '(') && !chars[*i].is_whitespace() {
        t.push(chars[*i]);
        *i += 1;
    }
    skip_ws(chars, i);
    if matches!(chars.get(*i), Some('{') | Some('(')) {
        *i += 1;
    }
    skip_ws(chars, i);
    t
}

/// The citation key up to the first comma. Some exporters omit the key;
/// an `=` inside the scan means we are looking at a tag instead, so back
/// off.
fn scan_id(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    let mut id = String::new();
    while *i < chars.len() && chars[*i] != ',' {
        id.push(chars[*i]);
        *i += 1;
    }
    if *i < chars.len() {
        *i += 1; // consume the comma
    }
    if id.contains('=') {
        *i = start;
        return String::new();
    }
    skip_ws(chars, i);
    id.trim().to_string()
}

fn scan_tag(chars: &[char], i: &mut usize) -> String {
    skip_ws(chars, i);
    let mut tag = String::new();
    while *i < chars.len() && !chars[*i].is_whitespace() && chars[*i] != '=' {
        tag.push(chars[*i]);
        *i += 1;
    }
    skip_ws(chars, i);
    tag
}

impl BibtexIn {
    /// Replace unprotected tokens that name `@STRING` macros.
    fn replace_macros(&self, tokens: &mut [String]) {
        for tok in tokens.iter_mut() {
            if token_escape(tok) != Escaped::Not || tok == "#" {
                continue;
            }
            if let Some(replacement) = self.macros.get(tok.as_str()) {
                *tok = replacement.clone();
            }
        }
    }

    /// One `tag = value` pair; `strip_quotes` is off while collecting
    /// `@STRING` definitions so the quoting survives into the table.
    fn parse_line(
        &self,
        chars: &[char],
        i: &mut usize,
        strip_quotes: bool,
        progname: &str,
        filename: &str,
        nref: usize,
    ) -> (String, String) {
        let tag = scan_tag(chars, i);
        if tag.is_empty() {
            // skip to the end of this line
            while *i < chars.len() && !matches!(chars[*i], '\n' | '\r') {
                *i += 1;
            }
            while *i < chars.len() && matches!(chars[*i], '\n' | '\r') {
                *i += 1;
            }
            return (tag, String::new());
        }

        let mut tokens = Vec::new();
        if chars.get(*i) == Some(&'=') {
            *i += 1;
            scan_value(chars, i, &mut tokens, progname, filename, nref);
        }

        self.replace_macros(&mut tokens);
        concatenate_tokens(&mut tokens, progname, filename, nref);

        let mut data = String::new();
        for tok in &tokens {
            match token_escape(tok) {
                Escaped::Braces => data.push_str(trim_first_last(tok)),
                Escaped::Quotes if strip_quotes => data.push_str(trim_first_last(tok)),
                _ => data.push_str(tok),
            }
        }
        (tag, data)
    }

    fn process_string_def(&mut self, chars: &[char], progname: &str, filename: &str, nref: usize) {
        let mut i = 0;
        while i < chars.len() && !matches!(chars[i], '{' | '(') {
            i += 1;
        }
        if i < chars.len() {
            i += 1;
        }
        skip_ws(chars, &mut i);
        let (key, mut value) = self.parse_line(chars, &mut i, false, progname, filename, nref);
        if key.is_empty() {
            return;
        }
        // the escaped-space convention of journal abbreviation lists
        value = value.replace("\\ ", " ");
        let value = match token_escape(&value) {
            Escaped::Not => value,
            _ => trim_first_last(&value).to_string(),
        };
        self.macros.insert(key, value);
    }

    fn process_ref(
        &self,
        fin: &mut FieldStore,
        chars: &[char],
        progname: &str,
        filename: &str,
        nref: usize,
    ) -> bool {
        let mut i = 0;
        let entry_type = scan_type(chars, &mut i);
        let id = scan_id(chars, &mut i);
        if entry_type.is_empty() || id.is_empty() {
            return false;
        }
        fin.add("INTERNAL_TYPE", &entry_type, LEVEL_MAIN);
        fin.add("REFNUM", &id, LEVEL_MAIN);

        while i < chars.len() {
            let (tag, data) = self.parse_line(chars, &mut i, true, progname, filename, nref);
            // consume a field separator if we stopped on one
            if matches!(chars.get(i), Some(',') | Some('}') | Some(')')) {
                i += 1;
            }
            if !tag.is_empty() && !data.is_empty() {
                fin.add_can_dup(&tag, &data, LEVEL_MAIN);
            }
        }
        true
    }
}

/// Fold `a # b` token triples left to right, mending mismatched
/// quote/brace protection on the joined halves.
fn concatenate_tokens(tokens: &mut Vec<String>, progname: &str, filename: &str, nref: usize) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] != "#" {
            i += 1;
            continue;
        }
        if i == 0 || i == tokens.len() - 1 {
            warn!(
                "{}: stray string concatenation ('#' character) in file {} reference {}",
                progname, filename, nref
            );
            tokens.remove(i);
            continue;
        }

        let right = tokens.remove(i + 1);
        tokens.remove(i);
        let left = &mut tokens[i - 1];

        let esc_l = token_escape(left);
        let esc_r = token_escape(&right);

        let mut l = left.clone();
        let mut r = right;
        if esc_l != Escaped::Not {
            l.pop();
        }
        if esc_r != Escaped::Not {
            r.remove(0);
        }
        if esc_l != esc_r {
            if esc_l == Escaped::Not {
                match esc_r {
                    Escaped::Quotes => l.insert(0, '"'),
                    _ => l.insert(0, '{'),
                }
            } else {
                if esc_r != Escaped::Not {
                    r.pop();
                }
                match esc_l {
                    Escaped::Quotes => r.push('"'),
                    _ => r.push('}'),
                }
            }
        }
        l.push_str(&r);
        tokens[i - 1] = l;
    }
}

/* ---------- value clean-up ---------- */

/// Split on whitespace outside braces.
fn brace_split(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut tokens = Vec::new();
    let mut tok = String::new();
    let mut depth = 0i32;
    for (i, &c) in chars.iter().enumerate() {
        let escaped = i > 0 && chars[i - 1] == '\\';
        if c == '{' && !escaped {
            depth += 1;
            tok.push(c);
        } else if c == '}' && !escaped {
            depth -= 1;
            tok.push(c);
        } else if !c.is_whitespace() || depth > 0 {
            tok.push(c);
        } else if !tok.is_empty() {
            tokens.push(std::mem::take(&mut tok));
        }
    }
    if !tok.is_empty() {
        tokens.push(tok);
    }
    tokens.iter().map(|t| t.trim().to_string()).collect()
}

/// Strip font markup, collapse `\~`/`~`, remove unescaped braces.
fn clean_token(tok: &str) -> String {
    const MARKUP: &[&str] = &[
        "\\textit",
        "\\textbf",
        "\\textsl",
        "\\textsc",
        "\\textsf",
        "\\texttt",
        "\\textsubscript",
        "\\textsuperscript",
        "\\emph",
        "\\url",
        "\\mbox",
    ];
    let mut s = tok.to_string();
    for m in MARKUP {
        s = s.replace(m, "");
    }
    s = s.replace("\\it ", "").replace("\\em ", "");
    s = s.replace("\\%", "%").replace("\\$", "$");
    while s.contains("  ") {
        s = s.replace("  ", " ");
    }
    s = s.replace("\\textdollar", "$").replace("\\textunderscore", "_");

    // unescaped braces vanish, escaped ones stay as literals
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut k = 0;
    while k < chars.len() {
        let c = chars[k];
        if c == '\\' && matches!(chars.get(k + 1), Some('{') | Some('}')) {
            out.push(chars[k + 1]);
            k += 2;
            continue;
        }
        if c != '{' && c != '}' {
            out.push(c);
        }
        k += 1;
    }

    // "\~" is a literal tilde; a bare "~" is a sticky space
    let chars: Vec<char> = out.chars().collect();
    let mut fixed = String::with_capacity(out.len());
    let mut k = 0;
    while k < chars.len() {
        if chars[k] == '\\' && chars.get(k + 1) == Some(&'~') {
            fixed.push('~');
            k += 2;
        } else if chars[k] == '~' {
            fixed.push(' ');
            k += 1;
        } else {
            fixed.push(chars[k]);
            k += 1;
        }
    }
    fixed
}

fn is_url_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("url")
}

fn is_name_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("author") || tag.eq_ignore_ascii_case("editor")
}

/// Clean one reference's values in place; `\href{url}{text}` splits its
/// URL out into a separate field.
fn clean_ref(f: &mut FieldStore, p: &Param) {
    let mut hrefs: Vec<String> = Vec::new();
    for n in 0..f.num() {
        let tag = f.tag(n).to_string();
        if f.value(n).is_empty() || is_url_tag(&tag) {
            continue;
        }
        let mut tokens = brace_split(f.value(n));
        for tok in tokens.iter_mut() {
            let href = {
                let inner = match token_escape(tok) {
                    Escaped::Braces => trim_first_last(tok),
                    _ => tok.as_str(),
                };
                let is_href = inner
                    .get(..6)
                    .map(|head| head.eq_ignore_ascii_case("\\href{"))
                    .unwrap_or(false);
                if is_href {
                    inner
                        .find('}')
                        .map(|end| (inner[6..end].to_string(), inner[end + 1..].to_string()))
                } else {
                    None
                }
            };
            if let Some((link, rest)) = href {
                hrefs.push(link);
                *tok = rest;
            }
            if p.latex_in && !is_name_tag(&tag) && !is_url_tag(&tag) {
                *tok = clean_token(tok);
            }
        }
        f.set_value(n, tokens.join(" "));
    }
    for url in hrefs {
        f.add("URL", &url, LEVEL_MAIN);
    }
}

/* ---------- crossrefs ---------- */

fn find_ref_by_key(refs: &[FieldStore], key: &str) -> Option<usize> {
    refs.iter().position(|f| {
        f.value_of_nouse("REFNUM", LEVEL_ANY)
            .map(|v| v == key)
            .unwrap_or(false)
    })
}

/// Inherit the target's fields one level down; a TITLE becomes the
/// `booktitle` for contained types.
fn resolve_crossrefs(refs: &mut [FieldStore], p: &Param) {
    for i in 0..refs.len() {
        let Some(n) = refs[i].find("CROSSREF", LEVEL_ANY) else {
            continue;
        };
        refs[i].set_used(n);
        let key = refs[i].value(n).to_string();
        let Some(target) = find_ref_by_key(refs, &key) else {
            let name = refs[i].value_of_nouse("REFNUM", LEVEL_ANY).unwrap_or("");
            warn!("{}: cannot find cross-reference '{}' for reference '{}'", p.progname, key, name);
            continue;
        };
        if target == i {
            continue;
        }

        let own_type = refs[i]
            .value_of_nouse("INTERNAL_TYPE", LEVEL_ANY)
            .unwrap_or("")
            .to_string();
        let inherited: Vec<(String, String, i32)> = refs[target]
            .iter()
            .filter(|row| {
                !row.tag().eq_ignore_ascii_case("INTERNAL_TYPE")
                    && !row.tag().eq_ignore_ascii_case("REFNUM")
            })
            .map(|row| {
                let mut tag = row.tag().to_string();
                if tag.eq_ignore_ascii_case("TITLE")
                    && (own_type.eq_ignore_ascii_case("INPROCEEDINGS")
                        || own_type.eq_ignore_ascii_case("INCOLLECTION"))
                {
                    tag = "booktitle".to_string();
                }
                (tag, row.value().to_string(), row.level() + 1)
            })
            .collect();
        for (tag, value, level) in inherited {
            refs[i].add(&tag, &value, level);
        }
    }
}

/* ---------- the driver ---------- */

impl InputDriver for BibtexIn {
    fn init_params(&self, p: &mut Param) {
        p.latex_in = true;
        p.xml_in = false;
        p.utf8_in = false;
    }

    fn table(&self) -> &'static RefTypeTable {
        &BIBTEX_TABLE
    }

    fn read(&mut self, lines: &mut LineCarry) -> io::Result<Option<RawRecord>> {
        let mut reference = String::new();
        let mut charset = None;
        let mut haveref = false;

        while let Some(line) = lines.next_line()? {
            let mut line = line.as_str();
            if charsets::starts_with_bom(line) {
                charset = Some(Charset::Unicode);
                line = charsets::skip_bom(line);
            }
            let trimmed = line.trim_start();
            if trimmed.starts_with('%') {
                continue;
            }
            if trimmed.starts_with('@') {
                if haveref {
                    lines.push_back(trimmed.to_string());
                    break;
                }
                haveref = true;
            }
            if haveref {
                reference.push_str(trimmed);
                reference.push('\n');
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
        filename: &str,
        nref: usize,
        p: &Param,
    ) -> bool {
        let lower = text.to_ascii_lowercase();
        let chars: Vec<char> = text.chars().collect();
        if lower.starts_with("@string") {
            self.process_string_def(&chars[7..], &p.progname, filename, nref);
            false
        } else if lower.starts_with("@comment") {
            false
        } else {
            self.process_ref(fin, &chars, &p.progname, filename, nref)
        }
    }

    fn clean(&self, refs: &mut [FieldStore], p: &Param) {
        for f in refs.iter_mut() {
            clean_ref(f, p);
        }
        resolve_crossrefs(refs, p);
    }

    fn typify(&self, fin: &FieldStore, _filename: &str, nref: usize, p: &Param) -> usize {
        let type_name = fin.value_of_nouse("INTERNAL_TYPE", LEVEL_MAIN).unwrap_or("");
        let refname = fin.value_of_nouse("REFNUM", LEVEL_MAIN).unwrap_or("");
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
        for n in 0..fin.num() {
            if fin.is_used(n) || fin.has_notag(n) || fin.has_nodata(n) {
                continue; // e.g. a successfully inherited crossref
            }
            let tag = fin.tag(n);
            let Some(rule) = reftypes::translate(tag, reftype, self.table()) else {
                if p.verbose >= 1 && !tag.eq_ignore_ascii_case("INTERNAL_TYPE") {
                    warn!("{}: cannot find tag '{}'", p.progname, tag);
                }
                continue;
            };
            let value = fin.value(n);
            let level = rule.level;
            match rule.kind {
                ProcessingKind::Simple => generic::convert_simple(out, rule.newtag, value, level),
                ProcessingKind::Title => convert_title(fin, out, tag, value, level, p),
                ProcessingKind::Person => convert_person(out, rule.newtag, value, level, p),
                ProcessingKind::Pages => generic::convert_pages(out, value, level),
                ProcessingKind::SerialNo => generic::convert_serialno(out, value, level),
                ProcessingKind::Notes => generic::convert_notes(out, value, level),
                ProcessingKind::Url => generic::convert_url(out, value, level),
                ProcessingKind::Genre => generic::convert_genre(out, value, level),
                ProcessingKind::Keyword => generic::convert_keyword(out, rule.newtag, value, level),
                ProcessingKind::Doi => generic::convert_doi(out, value, level),
                ProcessingKind::HowPublished => convert_howpublished(out, value, level),
                ProcessingKind::Eprint => convert_eprint(fin, out, value, level),
                ProcessingKind::LinkedFile => convert_linkedfile(out, value, level),
                ProcessingKind::BtSente => convert_sentelink(out, value, level),
                ProcessingKind::BtOrg => convert_organization(fin, out, value, level),
                _ => {}
            }
        }
    }
}

/// The title of an untitled `@inbook` section names the book; when a
/// `booktitle` is also present the entry is being abused as
/// `@incollection` and `title` names the section after all.
fn convert_title(
    fin: &FieldStore,
    out: &mut FieldStore,
    intag: &str,
    value: &str,
    level: i32,
    p: &Param,
) {
    let mut level = level;
    if intag.eq_ignore_ascii_case("TITLE")
        && fin
            .value_of_nouse("INTERNAL_TYPE", LEVEL_ANY)
            .map(|t| t.eq_ignore_ascii_case("INBOOK"))
            .unwrap_or(false)
        && fin.find("BOOKTITLE", LEVEL_ANY).is_some()
    {
        level = LEVEL_MAIN;
    }
    generic::convert_title(out, "TITLE", value, level, p);
}

/// Names come as one field with ` and ` separators; asis/corps matching
/// applies to the whole field before any splitting. A terminal comma
/// marks the Wiley export style, several comma-separated names on one
/// line.
fn convert_person(out: &mut FieldStore, outtag: &str, value: &str, level: i32, p: &Param) {
    if p.asis.iter().any(|n| n == value) {
        out.add_with_suffix(outtag, ":ASIS", value, level, crate::fields::Dup::Suppress);
        return;
    }
    if p.corps.iter().any(|n| n == value) {
        out.add_with_suffix(outtag, ":CORP", value, level, crate::fields::Dup::Suppress);
        return;
    }
    let cleaned: Vec<String> = brace_split(value).iter().map(|t| clean_token(t)).collect();
    let joined = cleaned.join(" ");

    if joined.trim_end().ends_with(',') {
        for one in joined.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            name::add_name(out, outtag, one, level, &p.asis, &p.corps);
        }
        return;
    }

    name::add_names_split_on_and(out, outtag, &joined, level, &p.asis, &p.corps);
}

/// `howpublished` mostly stands in for a publisher, except when it
/// carries thesis hints or a bare link.
fn convert_howpublished(out: &mut FieldStore, value: &str, level: i32) {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("diplom") {
        out.replace_or_add("GENRE:BIBUTILS", "Diploma thesis", level);
    } else if lower.starts_with("habilitation") {
        out.replace_or_add("GENRE:BIBUTILS", "Habilitation thesis", level);
    } else if lower.starts_with("licentiate") {
        out.replace_or_add("GENRE:BIBUTILS", "Licentiate thesis", level);
    } else if url::is_embedded_link(value) {
        url::split_and_add(out, value, level);
    } else {
        out.add("PUBLISHER", value, level);
    }
}

/// `eprint` pairs with `archivePrefix`/`eprinttype` to name a database;
/// an unknown or missing prefix degrades to a URL.
fn convert_eprint(fin: &FieldStore, out: &mut FieldStore, value: &str, level: i32) {
    let prefix = fin
        .value_of_nouse("ARCHIVEPREFIX", level)
        .or_else(|| fin.value_of_nouse("EPRINTTYPE", level));
    match prefix {
        Some("arXiv") => out.add("ARXIV", value, level),
        Some("jstor") => out.add("JSTOR", value, level),
        Some("medline") => out.add("MEDLINE", value, level),
        Some("pubmed") => out.add("PMID", value, level),
        Some(other) => out.add("URL", &format!("{other}:{value}"), level),
        None => out.add("URL", value, level),
    }
}

/// `file={Description:/path/to/file.pdf:PDF}`: the path sits between the
/// first and last colons. DOS drive letters put extra colons inside, so
/// everything between those two is kept.
fn convert_linkedfile(out: &mut FieldStore, value: &str, level: i32) {
    let colons = value.matches(':').count();
    if colons > 1 {
        let first = value.find(':').unwrap();
        let last = value.rfind(':').unwrap();
        let link = value[first + 1..last].trim();
        if !link.is_empty() {
            out.add("FILEATTACH", link, level);
        }
    } else {
        // not in the file-specification shape, keep the raw value
        out.add("FILEATTACH", value, level);
    }
}

/// `sentelink = {file://path,Sente,PDF}` keeps only the path.
fn convert_sentelink(out: &mut FieldStore, value: &str, level: i32) {
    let link = value.split(',').next().unwrap_or("").trim();
    if !link.is_empty() {
        out.add("FILEATTACH", link, level);
    }
}

/// `organization` stands in for a missing publisher, otherwise it names
/// the meeting organizer.
fn convert_organization(fin: &FieldStore, out: &mut FieldStore, value: &str, level: i32) {
    if fin.find("publisher", LEVEL_ANY).is_none() {
        out.add("PUBLISHER", value, level);
    } else {
        out.add("ORGANIZER:CORP", value, level);
    }
}
