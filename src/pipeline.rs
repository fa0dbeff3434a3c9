//! The per-reference conversion engine: read, process, charset-fix,
//! clean, typify, convert, augment, uniquify, and write.

use crate::charsets;
use crate::citekey;
use crate::fields::{FieldStore, LEVEL_MAIN};
use crate::formats::{self, LineCarry};
use crate::param::{CharsetSource, Param};
use crate::reftypes;
use crate::{debug, Error, Result};
use std::io::{BufRead, Write};
use std::path::Path;

/// Tags whose values must never be LaTeX-mangled in either direction.
fn is_protected_tag(tag: &str) -> bool {
    const PROTECTED: &[&str] = &["DOI", "URL", "REFNUM", "FILEATTACH"];
    PROTECTED.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

fn fix_charsets(refs: &mut [FieldStore], p: &Param, input_encoded: bool) {
    for f in refs.iter_mut() {
        for n in 0..f.num() {
            let protect = is_protected_tag(f.tag(n));
            let converted = charsets::convert(f.value(n), p, protect, input_encoded);
            f.set_value(n, converted);
        }
    }
}

fn dump_batch(refs: &[FieldStore], stage: &str) {
    for (i, f) in refs.iter().enumerate() {
        debug!("======== {} reference {}\n{}", stage, i + 1, f.report());
    }
}

/// An ordered batch of references in canonical form.
#[derive(Default)]
pub struct Batch {
    pub refs: Vec<FieldStore>,
}

impl Batch {
    pub fn new() -> Self {
        Batch::default()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Read a stream of references, converting each to canonical form.
    ///
    /// The parameter block must have been initialized for an input format
    /// (see [`formats::init_input_params`]).
    pub fn read(&mut self, src: &mut dyn BufRead, filename: &str, p: &Param) -> Result<()> {
        let format = p
            .read_format
            .ok_or_else(|| Error::bad_input("no input format selected"))?;
        let mut lp = p.for_reading();
        let mut driver = formats::input_driver(format);

        // stage 1: slice the stream into records and tokenize them
        let mut raw: Vec<FieldStore> = Vec::new();
        let mut lines = LineCarry::new(src);
        let mut nref = 0;
        while let Some(rec) = driver.read(&mut lines)? {
            if rec.text.is_empty() {
                continue;
            }
            let mut f = FieldStore::new();
            nref += 1;
            if driver.process(&mut f, &rec.text, filename, nref, &lp) {
                raw.push(f);
            }
            if let Some(cs) = rec.charset {
                // a file-declared charset beats the default but not an
                // explicit user choice
                lp.set_charset_in(cs, CharsetSource::File);
            }
        }
        // the Unicode default implies UTF-8 byte decoding
        if lp.charset_in == charsets::Charset::Unicode {
            lp.utf8_in = true;
        }
        dump_batch(&raw, "raw input");

        if p.output_raw {
            self.refs.extend(raw);
            citekey::ensure_refnums(&mut self.refs, lp.add_count);
            return Ok(());
        }

        // stage 2: character-set and escape-syntax conversion
        fix_charsets(&mut raw, &lp, true);
        dump_batch(&raw, "post charset fix");

        // stage 3: dialect-wide clean-ups (crossrefs, author fix-ups)
        driver.clean(&mut raw, &lp);
        dump_batch(&raw, "post clean");

        // stages 4+5: typify and convert each reference
        let base = self.refs.len();
        for (i, fin) in raw.iter().enumerate() {
            let reftype = driver.typify(fin, filename, i + 1, &lp);
            let mut out = FieldStore::new();
            driver.convert(fin, reftype, &lp, &mut out);
            reftypes::process_always(&mut out, reftype, driver.table());
            reftypes::process_default(&mut out, reftype, driver.table());
            self.refs.push(out);
        }
        dump_batch(&self.refs[base..], "converted");

        // stage 6: batch-wide citation keys
        citekey::uniquify(&mut self.refs);
        citekey::ensure_refnums(&mut self.refs, lp.add_count);

        Ok(())
    }

    /// Write the whole batch to one stream.
    pub fn write(&mut self, w: &mut dyn Write, p: &Param) -> Result<()> {
        let format = p
            .write_format
            .ok_or_else(|| Error::bad_input("no output format selected"))?;
        if p.single_ref_per_file {
            return self.write_one_per_file(p);
        }
        let lp = p.for_writing();
        let driver = formats::output_driver(format);

        fix_charsets(&mut self.refs, &lp, false);
        dump_batch(&self.refs, "pre write");

        driver.header(w, &lp)?;
        for (i, f) in self.refs.iter().enumerate() {
            match driver.assemble(f, &lp, i) {
                Some(out) => driver.write(&out, w, &lp, i)?,
                None => driver.write(f, w, &lp, i)?,
            }
        }
        driver.footer(w)?;
        Ok(())
    }

    /// Write each reference into its own file, named after its citation
    /// key plus the format's suffix.
    pub fn write_one_per_file(&mut self, p: &Param) -> Result<()> {
        let format = p
            .write_format
            .ok_or_else(|| Error::bad_input("no output format selected"))?;
        let lp = p.for_writing();
        let driver = formats::output_driver(format);

        fix_charsets(&mut self.refs, &lp, false);

        for (i, f) in self.refs.iter().enumerate() {
            let name = single_ref_filename(f, i, format.file_suffix())?;
            let mut file = std::fs::File::create(&name)
                .map_err(|_| Error::CantOpen(name.clone()))?;
            driver.header(&mut file, &lp)?;
            match driver.assemble(f, &lp, i) {
                Some(out) => driver.write(&out, &mut file, &lp, i)?,
                None => driver.write(f, &mut file, &lp, i)?,
            }
            driver.footer(&mut file)?;
        }
        Ok(())
    }
}

/// Pick a fresh file name `<refnum>.<suffix>`, appending `_N` while the
/// name is taken. Sixty thousand collisions is a configuration problem.
fn single_ref_filename(f: &FieldStore, nref: usize, suffix: &str) -> Result<String> {
    let stem = f
        .value_of_nouse("REFNUM", LEVEL_MAIN)
        .map(str::to_string)
        .unwrap_or_else(|| (nref + 1).to_string());

    let mut name = format!("{stem}.{suffix}");
    let mut count = 0u32;
    while Path::new(&name).exists() {
        count += 1;
        if count == 60000 {
            return Err(Error::CantOpen(name));
        }
        name = format!("{stem}_{count}.{suffix}");
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::LEVEL_MAIN;

    #[test]
    fn protected_tags() {
        assert!(is_protected_tag("doi"));
        assert!(is_protected_tag("FILEATTACH"));
        assert!(!is_protected_tag("TITLE"));
    }

    #[test]
    fn charset_fix_preserves_order_and_levels() {
        let mut f = FieldStore::new();
        f.add("TITLE", "plain", LEVEL_MAIN);
        f.add("TITLE", "host", crate::fields::LEVEL_HOST);
        let mut p = Param::new("t");
        p.utf8_in = true;
        let mut refs = vec![f];
        fix_charsets(&mut refs, &p, true);
        assert_eq!(refs[0].tag(0), "TITLE");
        assert_eq!(refs[0].level(1), crate::fields::LEVEL_HOST);
        assert_eq!(refs[0].value(0), "plain");
    }
}
