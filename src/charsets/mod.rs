//! Character-set and escape-syntax conversion.
//!
//! Values flow through the pipeline as `String`s in one of two states:
//! before charset conversion each `char` holds one raw input byte widened
//! to a code point ("byte chars"); conversion turns the value into genuine
//! Unicode text, or back into byte chars when the requested output charset
//! is not UTF-8. [`emit`] narrows byte chars to bytes at the output edge.

pub mod entities;
pub mod gb18030;
pub mod latex;
pub mod tables;

use crate::param::{Param, XmlOut};
use std::io::{self, Write};

/// A supported character encoding. `Unicode` and `Gb18030` are handled by
/// dedicated codecs; everything else is a single-byte table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Unicode,
    Gb18030,
    Table(usize),
}

/// Case-insensitive catalog lookup, including the UTF-8 and GB18030
/// sentinels.
pub fn find(name: &str) -> Option<Charset> {
    if name.eq_ignore_ascii_case("unicode")
        || name.eq_ignore_ascii_case("utf8")
        || name.eq_ignore_ascii_case("utf-8")
    {
        return Some(Charset::Unicode);
    }
    if name.eq_ignore_ascii_case("gb18030") {
        return Some(Charset::Gb18030);
    }
    tables::lookup(name).map(Charset::Table)
}

/// Names of every supported charset, for `--help`-style listings.
pub fn list_names() -> Vec<&'static str> {
    let mut names = vec!["unicode", "gb18030"];
    names.extend(tables::TABLES.iter().map(|t| t.name));
    names
}

/// Widen raw bytes into byte chars.
pub fn widen(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Do the first three chars spell a UTF-8 byte-order mark?
pub fn starts_with_bom(s: &str) -> bool {
    let mut it = s.chars();
    matches!(
        (it.next(), it.next(), it.next()),
        (Some('\u{EF}'), Some('\u{BB}'), Some('\u{BF}'))
    )
}

pub fn skip_bom(s: &str) -> &str {
    if starts_with_bom(s) {
        // the three widened BOM chars are two UTF-8 bytes each
        let off: usize = s.chars().take(3).map(char::len_utf8).sum();
        &s[off..]
    } else {
        s
    }
}

/// Decode a UTF-8 sequence stored as byte chars. An illegal leading byte
/// yields `?` and advances one position.
fn utf8_decode(chars: &[char], pos: &mut usize) -> u32 {
    let b0 = chars[*pos] as u32;
    if b0 < 0x80 {
        *pos += 1;
        return b0;
    }
    let (len, mut ch) = if b0 >> 5 == 0b110 {
        (2, b0 & 0x1F)
    } else if b0 >> 4 == 0b1110 {
        (3, b0 & 0x0F)
    } else if b0 >> 3 == 0b11110 {
        (4, b0 & 0x07)
    } else {
        *pos += 1;
        return '?' as u32;
    };
    for k in 1..len {
        let b = match chars.get(*pos + k) {
            Some(&c) => c as u32,
            None => {
                *pos += 1;
                return '?' as u32;
            }
        };
        if b >> 6 != 0b10 {
            *pos += 1;
            return '?' as u32;
        }
        ch = (ch << 6) | (b & 0x3F);
    }
    *pos += len;
    ch
}

fn bytes_at(chars: &[char], pos: usize) -> Vec<u8> {
    chars[pos..]
        .iter()
        .take(4)
        .map(|&c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

/// Pull the next code point off the value, applying the configured input
/// syntaxes.
fn get_unicode(chars: &[char], pos: &mut usize, p: &Param, latex_in: bool) -> u32 {
    let mut from_unicode_table = false;
    let c = chars[*pos];

    let ch = if p.xml_in && c == '&' {
        let (ch, named) = entities::decode_entity(chars, pos);
        from_unicode_table = named;
        ch
    } else if p.charset_in == Charset::Gb18030 {
        let bytes = bytes_at(chars, *pos);
        let mut bpos = 0;
        let ch = gb18030::decode(&bytes, &mut bpos);
        *pos += bpos;
        from_unicode_table = true;
        ch
    } else if latex_in {
        // LaTeX sources are frequently UTF-8 these days
        if p.utf8_in && (c as u32) & 0x80 != 0 {
            from_unicode_table = true;
            utf8_decode(chars, pos)
        } else {
            let (ch, matched) = latex::latex_to_char(chars, pos);
            from_unicode_table = matched;
            ch
        }
    } else if p.utf8_in {
        utf8_decode(chars, pos)
    } else {
        *pos += 1;
        c as u32
    };

    if !from_unicode_table {
        if let Charset::Table(t) = p.charset_in {
            return tables::byte_to_unicode(t, ch);
        }
    }
    ch
}

fn push_char(out: &mut String, ch: u32) {
    out.push(char::from_u32(ch).unwrap_or('?'));
}

fn push_entity(out: &mut String, ch: u32) {
    out.push_str(&format!("&#{ch};"));
}

/// Escape the five minimal XML entities; true when one was written.
fn push_minimal_xml(out: &mut String, ch: u32) -> bool {
    let ent = match ch {
        34 => "&quot;",
        38 => "&amp;",
        39 => "&apos;",
        60 => "&lt;",
        62 => "&gt;",
        _ => return false,
    };
    out.push_str(ent);
    true
}

fn write_unicode(out: &mut String, ch: u32, p: &Param, latex_out: bool) {
    if latex_out {
        match latex::char_to_latex(ch) {
            Some(tex) => out.push_str(&tex),
            // unknown to the LaTeX table: fall back to the character when
            // the caller also asked for Unicode, else '?'
            None => {
                if p.utf8_out {
                    push_char(out, ch);
                } else {
                    out.push('?');
                }
            }
        }
        return;
    }

    if p.utf8_out {
        if p.xml_out.is_on() {
            if push_minimal_xml(out, ch) {
                return;
            }
            if ch > 127 && p.xml_out == XmlOut::Entities {
                push_entity(out, ch);
                return;
            }
        }
        push_char(out, ch);
        return;
    }

    if p.charset_out == Charset::Gb18030 {
        if p.xml_out.is_on() {
            if push_minimal_xml(out, ch) {
                return;
            }
            if ch > 127 && p.xml_out == XmlOut::Entities {
                push_entity(out, ch);
                return;
            }
        }
        let bytes = gb18030::encode(ch);
        if bytes.is_empty() {
            out.push('?');
        } else {
            for b in bytes {
                out.push(b as char);
            }
        }
        return;
    }

    let narrowed = match p.charset_out {
        Charset::Table(t) => tables::unicode_to_byte(t, ch),
        _ => ch,
    };
    if p.xml_out.is_on() {
        if push_minimal_xml(out, narrowed) {
            return;
        }
        if narrowed > 127 {
            push_entity(out, narrowed);
            return;
        }
    }
    push_char(out, narrowed);
}

/// Convert one value between the configured input and output syntaxes.
///
/// `protect_latex` disables LaTeX interpretation both ways; the pipeline
/// sets it for DOI/URL-like tags whose values must survive verbatim.
/// `input_encoded` says whether the value still holds raw input (byte
/// chars, escapes). Values already in canonical Unicode form, as on the
/// write half of the pipeline, only go through the output encoding; a
/// same-charset round trip stays byte-identical.
pub fn convert(value: &str, p: &Param, protect_latex: bool, input_encoded: bool) -> String {
    if value.is_empty() {
        return String::new();
    }
    let latex_in = input_encoded && p.latex_in && !protect_latex;
    let latex_out = p.latex_out && !protect_latex;

    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut pos = 0;
    while pos < chars.len() {
        let ch = if input_encoded {
            get_unicode(&chars, &mut pos, p, latex_in)
        } else {
            let c = chars[pos] as u32;
            pos += 1;
            c
        };
        write_unicode(&mut out, ch, p, latex_out);
    }
    out
}

/// Write a converted value out: UTF-8 text directly, byte chars narrowed
/// to single bytes.
pub fn emit(w: &mut dyn Write, s: &str, utf8_out: bool) -> io::Result<()> {
    if utf8_out {
        return w.write_all(s.as_bytes());
    }
    let mut bytes = Vec::with_capacity(s.len());
    for ch in s.chars() {
        bytes.push(if (ch as u32) < 256 { ch as u8 } else { b'?' });
    }
    w.write_all(&bytes)
}

pub fn write_bom(w: &mut dyn Write) -> io::Result<()> {
    w.write_all(&[0xEF, 0xBB, 0xBF])
}

/// Find an `<?xml … encoding="…"?>` prolog, returning the declared
/// charset (if recognized) and the buffer with the prolog removed.
pub fn strip_xml_prolog(s: &str) -> (Option<Charset>, String) {
    let lower = s.to_ascii_lowercase();
    let Some(start) = lower.find("<?xml") else {
        return (None, s.to_string());
    };
    let Some(end_rel) = lower[start..].find("?>") else {
        return (None, s.to_string());
    };
    let end = start + end_rel + 2;
    let prolog = &s[start..end];

    let mut charset = None;
    if let Some(attr) = prolog.to_ascii_lowercase().find("encoding=") {
        let rest = &prolog[attr + "encoding=".len()..];
        let mut it = rest.chars();
        if let Some(quote @ ('"' | '\'')) = it.next() {
            let name: String = it.take_while(|&c| c != quote).collect();
            charset = find(&name);
            if charset.is_none() {
                tracing::warn!("did not recognize encoding '{}'", name);
            }
        }
    }

    let mut stripped = String::with_capacity(s.len());
    stripped.push_str(&s[..start]);
    stripped.push_str(&s[end..]);
    (charset, stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::CharsetSource;
    use pretty_assertions::assert_eq;

    fn p() -> Param {
        Param::new("test")
    }

    #[test]
    fn xml_entities_to_utf8() {
        let mut p = p();
        p.xml_in = true;
        p.utf8_out = true;
        assert_eq!(convert("&#x03B1; and &alpha;", &p, false, true), "α and α");
    }

    #[test]
    fn xml_entities_to_latex() {
        let mut p = p();
        p.xml_in = true;
        p.latex_out = true;
        assert_eq!(convert("&#x03B1; and &alpha;", &p, false, true), "$\\alpha$ and $\\alpha$");
    }

    #[test]
    fn latex_to_utf8() {
        let mut p = p();
        p.latex_in = true;
        p.utf8_out = true;
        assert_eq!(convert("Jos{\\'e}", &p, false, true), "José");
        assert_eq!(convert("Garc{\\'\\i}a", &p, false, true), "García");
    }

    #[test]
    fn utf8_to_latex() {
        let mut p = p();
        p.utf8_in = true;
        p.latex_out = true;
        let widened = widen("José".as_bytes());
        assert_eq!(convert(&widened, &p, false, true), "Jos{\\'e}");
    }

    #[test]
    fn protected_values_skip_latex() {
        let mut p = p();
        p.latex_in = true;
        p.utf8_in = true;
        p.latex_out = true;
        let doi = "10.1000/a_b{c}";
        assert_eq!(convert(doi, &p, true, true), doi);
    }

    #[test]
    fn single_byte_table_input() {
        let mut p = p();
        p.set_charset_in(find("latin1").unwrap(), CharsetSource::User);
        p.utf8_in = false;
        let widened = widen(&[b'c', 0xE9]); // "cé" in latin1
        assert_eq!(convert(&widened, &p, false, true), "cé");
    }

    #[test]
    fn single_byte_table_output_narrows() {
        let mut p = p();
        p.utf8_in = true;
        p.utf8_out = false;
        p.charset_out = find("latin1").unwrap();
        let widened = widen("café λ".as_bytes());
        let out = convert(&widened, &p, false, true);
        // é narrows to its latin-1 byte, λ is unmappable
        let bytes: Vec<u32> = out.chars().map(|c| c as u32).collect();
        assert_eq!(bytes, vec![99, 97, 102, 0xE9, 32, b'?' as u32]);
    }

    #[test]
    fn minimal_xml_mode_escapes_only_the_five() {
        let mut p = p();
        p.utf8_in = true;
        p.xml_out = XmlOut::Minimal;
        let widened = widen("a<b & \"c\" é".as_bytes());
        assert_eq!(convert(&widened, &p, false, true), "a&lt;b &amp; &quot;c&quot; é");
    }

    #[test]
    fn entity_xml_mode_escapes_non_ascii() {
        let mut p = p();
        p.utf8_in = true;
        p.xml_out = XmlOut::Entities;
        let widened = widen("é".as_bytes());
        assert_eq!(convert(&widened, &p, false, true), "&#233;");
    }

    #[test]
    fn invalid_utf8_byte_becomes_question_mark() {
        let mut p = p();
        p.utf8_in = true;
        let widened = widen(&[0xFF, b'x']);
        assert_eq!(convert(&widened, &p, false, true), "?x");
    }

    #[test]
    fn prolog_detection_and_stripping() {
        let (cs, rest) = strip_xml_prolog("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a/>");
        assert_eq!(cs, Some(Charset::Unicode));
        assert_eq!(rest, "\n<a/>");

        let (cs, rest) = strip_xml_prolog("plain text");
        assert_eq!(cs, None);
        assert_eq!(rest, "plain text");
    }

    #[test]
    fn gb18030_output() {
        let mut p = p();
        p.utf8_in = true;
        p.utf8_out = false;
        p.charset_out = Charset::Gb18030;
        let widened = widen("A€".as_bytes());
        let out = convert(&widened, &p, false, true);
        let bytes: Vec<u32> = out.chars().map(|c| c as u32).collect();
        assert_eq!(bytes, vec![b'A' as u32, 0x80]);
    }
}
