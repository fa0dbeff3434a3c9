//! The dialect driver contract and the registry wiring each format id to
//! its implementation.

pub mod adsjournals;
pub mod adsout;
pub mod bibtexin;
pub mod bibtexout;
pub mod bibtextypes;
pub mod copacin;
pub mod copactypes;
pub mod endin;
pub mod endout;
pub mod endtypes;
pub mod isiin;
pub mod isitypes;
pub mod modsout;
pub mod nbibin;
pub mod nbibtypes;
pub mod risin;
pub mod ristypes;
pub mod risout;

use crate::fields::FieldStore;
use crate::param::{InputFormat, OutputFormat, Param};
use crate::pipeline::Batch;
use crate::reftypes::RefTypeTable;
use std::io::{self, BufRead, Write};

/// Emit already-converted text: UTF-8 directly, otherwise narrowed to
/// single bytes.
pub fn emit_str(w: &mut dyn Write, p: &Param, s: &str) -> crate::Result<()> {
    crate::charsets::emit(w, s, p.utf8_out).map_err(crate::Error::from)
}

/// One record's raw text plus any charset the file itself declared.
pub struct RawRecord {
    pub text: String,
    pub charset: Option<crate::charsets::Charset>,
}

/// Line source with one line of push-back, since several readers must
/// read past the end of a record to find its boundary.
pub struct LineCarry<'a> {
    src: &'a mut dyn BufRead,
    carry: Option<String>,
}

impl<'a> LineCarry<'a> {
    pub fn new(src: &'a mut dyn BufRead) -> Self {
        LineCarry { src, carry: None }
    }

    /// Next line as widened byte chars, line ending stripped; `None` at
    /// end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.carry.take() {
            return Ok(Some(line));
        }
        let mut buf = Vec::new();
        let n = self.src.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
            buf.pop();
        }
        Ok(Some(crate::charsets::widen(&buf)))
    }

    pub fn push_back(&mut self, line: String) {
        debug_assert!(self.carry.is_none());
        self.carry = Some(line);
    }
}

/// The read half of a dialect.
///
/// Methods take `&mut self` because some dialects carry per-run state
/// (the BibTeX `@STRING` macro table).
pub trait InputDriver {
    /// Dialect defaults for the parameter block.
    fn init_params(&self, p: &mut Param);

    /// The dialect's per-reference-type lookup tables.
    fn table(&self) -> &'static RefTypeTable;

    /// Pull the next reference's raw text off the stream.
    fn read(&mut self, lines: &mut LineCarry) -> io::Result<Option<RawRecord>>;

    /// Tokenize one reference into raw tagged fields. A false return
    /// means the record was consumed but produces no reference (BibTeX
    /// `@STRING` and `@COMMENT`).
    fn process(
        &mut self,
        fin: &mut FieldStore,
        text: &str,
        filename: &str,
        nref: usize,
        p: &Param,
    ) -> bool;

    /// Batch-wide fix-ups after charset conversion.
    fn clean(&self, _refs: &mut [FieldStore], _p: &Param) {}

    /// Identify the reference-type variant.
    fn typify(&self, fin: &FieldStore, filename: &str, nref: usize, p: &Param) -> usize;

    /// Translate raw fields into canonical fields.
    fn convert(&self, fin: &FieldStore, reftype: usize, p: &Param, out: &mut FieldStore);
}

/// The write half of a dialect.
pub trait OutputDriver {
    fn init_params(&self, p: &mut Param);

    fn header(&self, w: &mut dyn Write, p: &Param) -> io::Result<()> {
        crate::generic::write_header(w, p)
    }

    fn footer(&self, _w: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Reorder canonical fields into the dialect's output shape. Dialects
    /// without an assembler write the canonical store directly.
    fn assemble(&self, _fin: &FieldStore, _p: &Param, _refnum: usize) -> Option<FieldStore> {
        None
    }

    fn write(
        &self,
        f: &FieldStore,
        w: &mut dyn Write,
        p: &Param,
        refnum: usize,
    ) -> crate::Result<()>;
}

pub fn input_driver(format: InputFormat) -> Box<dyn InputDriver> {
    match format {
        InputFormat::Bibtex => Box::new(bibtexin::BibtexIn::default()),
        InputFormat::Ris => Box::new(risin::RisIn),
        InputFormat::EndnoteRefer => Box::new(endin::EndnoteIn),
        InputFormat::Nbib => Box::new(nbibin::NbibIn),
        InputFormat::Isi => Box::new(isiin::IsiIn),
        InputFormat::Copac => Box::new(copacin::CopacIn),
    }
}

pub fn output_driver(format: OutputFormat) -> Box<dyn OutputDriver> {
    match format {
        OutputFormat::Ads => Box::new(adsout::AdsOut),
        OutputFormat::Bibtex => Box::new(bibtexout::BibtexOut),
        OutputFormat::EndnoteRefer => Box::new(endout::EndnoteOut),
        OutputFormat::Mods => Box::new(modsout::ModsOut),
        OutputFormat::Ris => Box::new(risout::RisOut),
    }
}

/// Build a parameter block with the input dialect's defaults applied.
pub fn init_input_params(format: InputFormat, progname: &str) -> Param {
    let mut p = Param::new(progname);
    p.read_format = Some(format);
    input_driver(format).init_params(&mut p);
    p
}

/// Build a parameter block with the output dialect's defaults applied.
pub fn init_output_params(format: OutputFormat, progname: &str) -> Param {
    let mut p = Param::new(progname);
    p.write_format = Some(format);
    output_driver(format).init_params(&mut p);
    p
}

/// Convenience wrapper: read `input` in `from`-format and write the batch
/// to `w` in `to`-format, with separately prepared parameter blocks.
pub fn convert_stream(
    input: &mut dyn BufRead,
    filename: &str,
    read_p: &Param,
    w: &mut dyn Write,
    write_p: &Param,
) -> crate::Result<()> {
    let mut batch = Batch::new();
    batch.read(input, filename, read_p)?;
    batch.write(w, write_p)
}
