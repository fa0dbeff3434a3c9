//! Named single-byte charsets: byte 0x80..=0xFF to code point, with the
//! low half identical to ASCII. Lookup is by case-insensitive name or
//! alias. The catalog is plain data and grows by adding a table here.

pub struct CharsetTable {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Code points for bytes 0x80..=0xFF.
    pub hi: [u32; 128],
}

/// Identity mapping for the high half (ISO-8859-1).
const fn latin1_hi() -> [u32; 128] {
    let mut hi = [0u32; 128];
    let mut i = 0;
    while i < 128 {
        hi[i] = 0x80 + i as u32;
        i += 1;
    }
    hi
}

const LATIN1_HI: [u32; 128] = latin1_hi();

const fn ascii_hi() -> [u32; 128] {
    let mut hi = [0u32; 128];
    let mut i = 0;
    while i < 128 {
        hi[i] = '?' as u32;
        i += 1;
    }
    hi
}

const fn latin15_hi() -> [u32; 128] {
    let mut hi = latin1_hi();
    hi[0xA4 - 0x80] = 0x20AC; // euro
    hi[0xA6 - 0x80] = 0x0160; // S caron
    hi[0xA8 - 0x80] = 0x0161;
    hi[0xB4 - 0x80] = 0x017D; // Z caron
    hi[0xB8 - 0x80] = 0x017E;
    hi[0xBC - 0x80] = 0x0152; // OE
    hi[0xBD - 0x80] = 0x0153;
    hi[0xBE - 0x80] = 0x0178; // Y diaeresis
    hi
}

const fn cp1252_hi() -> [u32; 128] {
    let mut hi = latin1_hi();
    hi[0x00] = 0x20AC; // euro
    hi[0x02] = 0x201A;
    hi[0x03] = 0x0192;
    hi[0x04] = 0x201E;
    hi[0x05] = 0x2026;
    hi[0x06] = 0x2020;
    hi[0x07] = 0x2021;
    hi[0x08] = 0x02C6;
    hi[0x09] = 0x2030;
    hi[0x0A] = 0x0160;
    hi[0x0B] = 0x2039;
    hi[0x0C] = 0x0152;
    hi[0x0E] = 0x017D;
    hi[0x11] = 0x2018;
    hi[0x12] = 0x2019;
    hi[0x13] = 0x201C;
    hi[0x14] = 0x201D;
    hi[0x15] = 0x2022;
    hi[0x16] = 0x2013;
    hi[0x17] = 0x2014;
    hi[0x18] = 0x02DC;
    hi[0x19] = 0x2122;
    hi[0x1A] = 0x0161;
    hi[0x1B] = 0x203A;
    hi[0x1C] = 0x0153;
    hi[0x1E] = 0x017E;
    hi[0x1F] = 0x0178;
    hi
}

const fn cp1251_hi() -> [u32; 128] {
    let mut hi = [0u32; 128];
    // 0x80..=0xBF
    let punct: [u32; 64] = [
        0x0402, 0x0403, 0x201A, 0x0453, 0x201E, 0x2026, 0x2020, 0x2021, 0x20AC, 0x2030, 0x0409,
        0x2039, 0x040A, 0x040C, 0x040B, 0x040F, 0x0452, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022,
        0x2013, 0x2014, 0x0098, 0x2122, 0x0459, 0x203A, 0x045A, 0x045C, 0x045B, 0x045F, 0x00A0,
        0x040E, 0x045E, 0x0408, 0x00A4, 0x0490, 0x00A6, 0x00A7, 0x0401, 0x00A9, 0x0404, 0x00AB,
        0x00AC, 0x00AD, 0x00AE, 0x0407, 0x00B0, 0x00B1, 0x0406, 0x0456, 0x0491, 0x00B5, 0x00B6,
        0x00B7, 0x0451, 0x2116, 0x0454, 0x00BB, 0x0458, 0x0405, 0x0455, 0x0457,
    ];
    let mut i = 0;
    while i < 64 {
        hi[i] = punct[i];
        i += 1;
    }
    // 0xC0..=0xFF: the contiguous Cyrillic block
    while i < 128 {
        hi[i] = 0x0410 + (i as u32 - 64);
        i += 1;
    }
    hi
}

pub static TABLES: &[CharsetTable] = &[
    CharsetTable {
        name: "ascii",
        aliases: &["us-ascii", "usascii", "ansi_x3.4-1968"],
        hi: ascii_hi(),
    },
    CharsetTable {
        name: "iso8859-1",
        aliases: &["iso-8859-1", "iso_8859-1", "8859-1", "latin1", "l1", "cp819"],
        hi: LATIN1_HI,
    },
    CharsetTable {
        name: "iso8859-15",
        aliases: &["iso-8859-15", "iso_8859-15", "8859-15", "latin9", "latin-9", "l9"],
        hi: latin15_hi(),
    },
    CharsetTable {
        name: "cp1251",
        aliases: &["windows-1251", "windows1251", "win1251", "ms-cyrl"],
        hi: cp1251_hi(),
    },
    CharsetTable {
        name: "cp1252",
        aliases: &["windows-1252", "windows1252", "win1252", "ms-ansi"],
        hi: cp1252_hi(),
    },
];

/// Index into [`TABLES`] for a case-insensitive name or alias.
pub fn lookup(name: &str) -> Option<usize> {
    TABLES.iter().position(|t| {
        t.name.eq_ignore_ascii_case(name) || t.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Byte to code point.
pub fn byte_to_unicode(table: usize, byte: u32) -> u32 {
    if byte < 0x80 {
        byte
    } else if byte <= 0xFF {
        TABLES[table].hi[(byte - 0x80) as usize]
    } else {
        byte
    }
}

/// Code point to byte, `?` when the charset has no slot for it.
pub fn unicode_to_byte(table: usize, ch: u32) -> u32 {
    if ch < 0x80 {
        return ch;
    }
    match TABLES[table].hi.iter().position(|&u| u == ch) {
        Some(i) => 0x80 + i as u32,
        None => '?' as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_aliases_case_insensitively() {
        assert_eq!(lookup("Latin1"), lookup("ISO-8859-1"));
        assert_eq!(lookup("WINDOWS-1252"), lookup("cp1252"));
        assert!(lookup("klingon-8").is_none());
    }

    #[test]
    fn latin1_is_identity() {
        let t = lookup("latin1").unwrap();
        assert_eq!(byte_to_unicode(t, 0xE9), 0xE9); // é
        assert_eq!(unicode_to_byte(t, 0xE9), 0xE9);
    }

    #[test]
    fn cp1252_punctuation() {
        let t = lookup("cp1252").unwrap();
        assert_eq!(byte_to_unicode(t, 0x93), 0x201C); // left double quote
        assert_eq!(byte_to_unicode(t, 0x80), 0x20AC); // euro
        assert_eq!(unicode_to_byte(t, 0x2014), 0x97); // em dash
        assert_eq!(unicode_to_byte(t, 0x0416), '?' as u32); // Ж unmappable
    }

    #[test]
    fn cp1251_cyrillic_block() {
        let t = lookup("cp1251").unwrap();
        assert_eq!(byte_to_unicode(t, 0xC0), 0x0410); // А
        assert_eq!(byte_to_unicode(t, 0xFF), 0x044F); // я
        assert_eq!(unicode_to_byte(t, 0x0436), 0xE6); // ж
        assert_eq!(byte_to_unicode(t, 0xA8), 0x0401); // Ё
    }

    #[test]
    fn round_trip_all_slots() {
        for (ti, t) in TABLES.iter().enumerate() {
            for b in 0x80u32..=0xFF {
                let u = byte_to_unicode(ti, b);
                if u == '?' as u32 {
                    continue; // ascii table maps everything high to '?'
                }
                // slots may be duplicated only if they map back somewhere
                let back = unicode_to_byte(ti, u);
                assert_eq!(byte_to_unicode(ti, back), u, "table {} byte {:#x}", t.name, b);
            }
        }
    }
}
