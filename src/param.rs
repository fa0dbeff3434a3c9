//! The parameter block carried through a conversion run.

use crate::charsets::Charset;
use crate::{Error, Result};
use std::path::Path;

/// Input dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Bibtex,
    Ris,
    EndnoteRefer,
    Nbib,
    Isi,
    Copac,
}

impl InputFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bib" | "bibtex" | "biblatex" => Ok(InputFormat::Bibtex),
            "ris" => Ok(InputFormat::Ris),
            "end" | "endnote" => Ok(InputFormat::EndnoteRefer),
            "nbib" | "med" | "medline" | "pubmed" => Ok(InputFormat::Nbib),
            "isi" => Ok(InputFormat::Isi),
            "copac" => Ok(InputFormat::Copac),
            other => Err(Error::bad_input(format!("unknown input format '{other}'"))),
        }
    }
}

/// Output dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ads,
    Bibtex,
    EndnoteRefer,
    Mods,
    Ris,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ads" => Ok(OutputFormat::Ads),
            "bib" | "bibtex" | "biblatex" => Ok(OutputFormat::Bibtex),
            "end" | "endnote" => Ok(OutputFormat::EndnoteRefer),
            "mods" | "xml" => Ok(OutputFormat::Mods),
            "ris" => Ok(OutputFormat::Ris),
            other => Err(Error::bad_input(format!("unknown output format '{other}'"))),
        }
    }

    /// File suffix used by single-reference-per-file output.
    pub fn file_suffix(self) -> &'static str {
        match self {
            OutputFormat::Ads => "ads",
            OutputFormat::Bibtex => "bib",
            OutputFormat::EndnoteRefer => "end",
            OutputFormat::Mods => "xml",
            OutputFormat::Ris => "ris",
        }
    }
}

/// Where a charset selection came from. A file-declared charset beats the
/// dialect default but loses to an explicit user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CharsetSource {
    Default,
    File,
    User,
}

/// XML escaping on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlOut {
    #[default]
    Off,
    /// Escape only `& < > " '`.
    Minimal,
    /// Additionally write numeric entities for everything above ASCII.
    Entities,
}

impl XmlOut {
    pub fn is_on(self) -> bool {
        self != XmlOut::Off
    }
}

/// BibTeX writer mode bits.
#[derive(Debug, Clone, Default)]
pub struct BibtexStyle {
    /// `tag = {value}` instead of `tag = "value"`.
    pub brackets: bool,
    pub uppercase_tags: bool,
    /// En dash (`-`) page ranges instead of `--`.
    pub single_dash: bool,
    pub final_comma: bool,
    /// Citation keys restricted to ASCII alphanumerics.
    pub strict_key: bool,
    /// Padded ` tag = \tvalue` layout.
    pub whitespace: bool,
    /// Prefer SHORTTITLE for host titles.
    pub short_title: bool,
}

/// Configuration for one direction of a conversion run.
#[derive(Debug, Clone)]
pub struct Param {
    pub progname: String,

    pub read_format: Option<InputFormat>,
    pub write_format: Option<OutputFormat>,

    pub charset_in: Charset,
    pub charset_in_src: CharsetSource,
    pub utf8_in: bool,
    pub latex_in: bool,
    pub xml_in: bool,

    pub charset_out: Charset,
    pub charset_out_src: CharsetSource,
    pub utf8_out: bool,
    pub utf8_bom: bool,
    pub latex_out: bool,
    pub xml_out: XmlOut,

    pub nosplittitle: bool,
    pub verbose: u8,
    /// Append `_<index>` to every citation key.
    pub add_count: bool,
    /// Skip clean/typify/convert and emit the processed fields untouched.
    pub output_raw: bool,
    pub single_ref_per_file: bool,
    /// Drop citation keys on output (BibTeX and MODS).
    pub drop_key: bool,
    pub bibtex_style: BibtexStyle,

    /// Names to emit verbatim instead of tokenizing.
    pub asis: Vec<String>,
    /// Names to treat as corporate authors.
    pub corps: Vec<String>,
}

impl Param {
    pub fn new(progname: &str) -> Self {
        Param {
            progname: progname.to_string(),
            read_format: None,
            write_format: None,
            charset_in: Charset::Unicode,
            charset_in_src: CharsetSource::Default,
            utf8_in: false,
            latex_in: false,
            xml_in: false,
            charset_out: Charset::Unicode,
            charset_out_src: CharsetSource::Default,
            utf8_out: true,
            utf8_bom: true,
            latex_out: false,
            xml_out: XmlOut::Off,
            nosplittitle: false,
            verbose: 0,
            add_count: false,
            output_raw: false,
            single_ref_per_file: false,
            drop_key: false,
            bibtex_style: BibtexStyle::default(),
            asis: Vec::new(),
            corps: Vec::new(),
        }
    }

    /// Apply a charset selection to the input side, honoring source
    /// precedence.
    pub fn set_charset_in(&mut self, charset: Charset, src: CharsetSource) {
        if src >= self.charset_in_src {
            self.charset_in = charset;
            self.charset_in_src = src;
            self.utf8_in = charset == Charset::Unicode;
        }
    }

    pub fn set_charset_out(&mut self, charset: Charset, src: CharsetSource) {
        if src >= self.charset_out_src {
            self.charset_out = charset;
            self.charset_out_src = src;
            self.utf8_out = charset == Charset::Unicode;
        }
    }

    /// Read-direction copy: output side forced to the Unicode
    /// intermediate form.
    pub fn for_reading(&self) -> Param {
        let mut p = self.clone();
        p.utf8_out = true;
        p.charset_out = Charset::Unicode;
        p.charset_out_src = CharsetSource::Default;
        p.xml_out = XmlOut::Off;
        p.latex_out = false;
        p
    }

    /// Write-direction copy: input side forced to the Unicode
    /// intermediate form.
    pub fn for_writing(&self) -> Param {
        let mut p = self.clone();
        p.xml_in = false;
        p.latex_in = false;
        p.utf8_in = true;
        p.charset_in = Charset::Unicode;
        p.charset_in_src = CharsetSource::Default;
        p
    }

    pub fn add_asis(&mut self, name: &str) {
        self.asis.push(name.to_string());
    }

    pub fn add_corps(&mut self, name: &str) {
        self.corps.push(name.to_string());
    }

    /// Load one name per line into the asis list.
    pub fn read_asis_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|_| Error::CantOpen(path.display().to_string()))?;
        self.asis.extend(lines_of(&text));
        Ok(())
    }

    /// Load one name per line into the corps list.
    pub fn read_corps_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|_| Error::CantOpen(path.display().to_string()))?;
        self.corps.extend(lines_of(&text));
        Ok(())
    }
}

fn lines_of(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_source_precedence() {
        let mut p = Param::new("test");
        p.set_charset_in(Charset::Unicode, CharsetSource::User);
        // file-declared must not override a user choice
        p.set_charset_in(Charset::Gb18030, CharsetSource::File);
        assert_eq!(p.charset_in, Charset::Unicode);
        assert_eq!(p.charset_in_src, CharsetSource::User);

        let mut p = Param::new("test");
        p.set_charset_in(Charset::Gb18030, CharsetSource::File);
        assert_eq!(p.charset_in, Charset::Gb18030);
        assert!(!p.utf8_in);
    }

    #[test]
    fn direction_copies_force_unicode_intermediate() {
        let mut p = Param::new("test");
        p.latex_in = true;
        p.latex_out = true;
        p.xml_out = XmlOut::Entities;

        let r = p.for_reading();
        assert!(r.latex_in);
        assert!(!r.latex_out);
        assert!(r.utf8_out);
        assert_eq!(r.xml_out, XmlOut::Off);

        let w = p.for_writing();
        assert!(!w.latex_in);
        assert!(w.utf8_in);
        assert!(w.latex_out);
    }
}
