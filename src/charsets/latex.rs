//! LaTeX escape sequences: decoding the common spellings of accented
//! letters, ligatures, Greek letters and text symbols to code points, and
//! encoding code points back.
//!
//! Every accented letter accepts the three usual spellings (`{\'e}`,
//! `\'{e}`, `\'e`). On output each code point carries a class deciding its
//! wrapper: most macros are brace-wrapped (`{\'e}`), Greek letters are
//! math-wrapped (`$\alpha$`), and quote/dash ligatures are emitted bare
//! (` `` `, `''`, `---`).

use lazy_static::lazy_static;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Class {
    /// Emitted verbatim, no wrapper.
    Combo,
    /// Wrapped as `{\out}`.
    Macro,
    /// Wrapped as `$\out$`.
    Math,
}

struct LatexChar {
    unicode: u32,
    class: Class,
    out: String,
    variants: Vec<String>,
}

fn lit(unicode: u32, class: Class, out: &str, variants: &[&str]) -> LatexChar {
    LatexChar {
        unicode,
        class,
        out: out.to_string(),
        variants: variants.iter().map(|s| s.to_string()).collect(),
    }
}

/// Accent spelled with a punctuation character (`\'A`); braces around the
/// letter are optional in every position.
fn accent_punct(unicode: u32, accent: char, letter: char) -> LatexChar {
    LatexChar {
        unicode,
        class: Class::Macro,
        out: format!("{accent}{letter}"),
        variants: vec![
            format!("{{\\{accent}{letter}}}"),
            format!("\\{accent}{{{letter}}}"),
            format!("\\{accent}{letter}"),
        ],
    }
}

/// Accent spelled with a letter macro (`\v{C}`, `\c C`).
fn accent_letter(unicode: u32, accent: char, letter: char) -> LatexChar {
    LatexChar {
        unicode,
        class: Class::Macro,
        out: format!("{accent}{{{letter}}}"),
        variants: vec![
            format!("{{\\{accent}{{{letter}}}}}"),
            format!("\\{accent}{{{letter}}}"),
            format!("\\{accent} {letter}"),
        ],
    }
}

/// Accent applied to the dotless i.
fn accent_dotless_i(unicode: u32, accent: char) -> LatexChar {
    LatexChar {
        unicode,
        class: Class::Macro,
        out: format!("{accent}{{\\i}}"),
        variants: vec![
            format!("{{\\{accent}\\i}}"),
            format!("\\{accent}{{\\i}}"),
            format!("\\{accent}\\i"),
        ],
    }
}

/// Letter-shaped macro such as `\ss` or `\AA`.
fn named(unicode: u32, name: &str) -> LatexChar {
    LatexChar {
        unicode,
        class: Class::Macro,
        out: name.to_string(),
        variants: vec![
            format!("{{\\{name}}}"),
            format!("\\{name}{{}}"),
            format!("\\{name}"),
        ],
    }
}

fn greek(unicode: u32, name: &str) -> LatexChar {
    LatexChar {
        unicode,
        class: Class::Math,
        out: name.to_string(),
        variants: vec![format!("$\\{name}$"), format!("\\{name}")],
    }
}

fn build_table() -> Vec<LatexChar> {
    let mut t = Vec::new();

    // LaTeX special characters
    t.push(lit(32, Class::Combo, " ", &["\\ "]));
    t.push(lit(35, Class::Macro, "#", &["\\#"]));
    t.push(lit(36, Class::Macro, "$", &["\\$"]));
    t.push(lit(37, Class::Macro, "%", &["\\%"]));
    t.push(lit(38, Class::Macro, "&", &["\\&"]));
    t.push(lit(95, Class::Macro, "_", &["\\_"]));
    t.push(lit(123, Class::Macro, "{", &["\\{", "{\\textbraceleft}", "\\textbraceleft"]));
    t.push(lit(125, Class::Macro, "}", &["\\}", "{\\textbraceright}", "\\textbraceright"]));
    t.push(lit(92, Class::Macro, "backslash", &["{\\backslash}", "\\backslash"]));
    t.push(lit(176, Class::Macro, "textdegree", &["{\\textdegree}", "\\textdegree", "^\\circ"]));
    t.push(lit(126, Class::Macro, "textasciitilde", &["{\\textasciitilde}", "\\textasciitilde", "\\~{}"]));

    // punctuation-spelled accents: grave, acute, circumflex, tilde, diaeresis
    let punct_accents: &[(char, &[(u32, char)])] = &[
        ('`', &[
            (192, 'A'), (200, 'E'), (204, 'I'), (210, 'O'), (217, 'U'),
            (224, 'a'), (232, 'e'), (242, 'o'), (249, 'u'),
        ]),
        ('\'', &[
            (193, 'A'), (201, 'E'), (205, 'I'), (211, 'O'), (218, 'U'), (221, 'Y'),
            (225, 'a'), (233, 'e'), (243, 'o'), (250, 'u'), (253, 'y'),
            (262, 'C'), (263, 'c'), (313, 'L'), (314, 'l'), (323, 'N'), (324, 'n'),
            (340, 'R'), (341, 'r'), (346, 'S'), (347, 's'), (377, 'Z'), (378, 'z'),
            (500, 'G'), (501, 'g'),
        ]),
        ('^', &[
            (194, 'A'), (202, 'E'), (206, 'I'), (212, 'O'), (219, 'U'),
            (226, 'a'), (234, 'e'), (244, 'o'), (251, 'u'),
            (264, 'C'), (265, 'c'), (284, 'G'), (285, 'g'), (292, 'H'), (293, 'h'),
            (308, 'J'), (309, 'j'), (348, 'S'), (349, 's'), (372, 'W'), (373, 'w'),
            (374, 'Y'), (375, 'y'),
        ]),
        ('~', &[
            (195, 'A'), (209, 'N'), (213, 'O'),
            (227, 'a'), (241, 'n'), (245, 'o'),
            (296, 'I'), (360, 'U'), (361, 'u'),
        ]),
        ('"', &[
            (196, 'A'), (203, 'E'), (207, 'I'), (214, 'O'), (220, 'U'), (376, 'Y'),
            (228, 'a'), (235, 'e'), (246, 'o'), (252, 'u'), (255, 'y'),
        ]),
    ];
    for (accent, letters) in punct_accents {
        for &(u, l) in *letters {
            t.push(accent_punct(u, *accent, l));
        }
    }

    // letter-spelled accents
    let letter_accents: &[(char, &[(u32, char)])] = &[
        // macron
        ('=', &[
            (256, 'A'), (257, 'a'), (274, 'E'), (275, 'e'), (298, 'I'),
            (332, 'O'), (333, 'o'), (362, 'U'), (363, 'u'),
        ]),
        // breve
        ('u', &[
            (258, 'A'), (259, 'a'), (276, 'E'), (277, 'e'), (286, 'G'), (287, 'g'),
            (300, 'I'), (334, 'O'), (335, 'o'), (364, 'U'), (365, 'u'),
        ]),
        // ogonek
        ('k', &[
            (260, 'A'), (261, 'a'), (280, 'E'), (281, 'e'), (302, 'I'), (303, 'i'),
            (370, 'U'), (371, 'u'), (490, 'O'), (491, 'o'),
        ]),
        // caron
        ('v', &[
            (268, 'C'), (269, 'c'), (270, 'D'), (271, 'd'), (282, 'E'), (283, 'e'),
            (317, 'L'), (318, 'l'), (327, 'N'), (328, 'n'), (344, 'R'), (345, 'r'),
            (352, 'S'), (353, 's'), (356, 'T'), (357, 't'), (381, 'Z'), (382, 'z'),
            (461, 'A'), (462, 'a'), (463, 'I'), (465, 'O'), (466, 'o'),
            (467, 'U'), (468, 'u'), (486, 'G'), (487, 'g'),
        ]),
        // cedilla
        ('c', &[
            (199, 'C'), (231, 'c'), (290, 'G'), (291, 'g'), (310, 'K'), (311, 'k'),
            (315, 'L'), (316, 'l'), (325, 'N'), (326, 'n'), (342, 'R'), (343, 'r'),
            (350, 'S'), (351, 's'), (354, 'T'), (355, 't'),
        ]),
        // dot above
        ('.', &[
            (266, 'C'), (267, 'c'), (278, 'E'), (279, 'e'), (288, 'G'), (289, 'g'),
            (304, 'I'), (379, 'Z'), (380, 'z'),
        ]),
        // double acute
        ('H', &[(336, 'O'), (337, 'o'), (368, 'U'), (369, 'u')]),
        // ring
        ('r', &[(366, 'U'), (367, 'u')]),
    ];
    for (accent, letters) in letter_accents {
        for &(u, l) in *letters {
            t.push(accent_letter(u, *accent, l));
        }
    }

    // ring over A spells \AA first
    t.push(lit(197, Class::Macro, "AA", &["{\\AA}", "{\\r{A}}", "\\r{A}"]));
    t.push(lit(229, Class::Macro, "aa", &["{\\aa}", "{\\r{a}}", "\\r{a}"]));

    // dotless i, alone and under accents; no bare \i spelling, it would
    // swallow the i of \it and friends
    t.push(lit(305, Class::Macro, "i", &["{\\i}", "\\i{}"]));
    for &(u, accent) in &[
        (236u32, '`'),
        (237, '\''),
        (238, '^'),
        (239, '"'),
        (297, '~'),
        (299, '='),
        (301, 'u'),
        (464, 'v'),
    ] {
        t.push(accent_dotless_i(u, accent));
    }

    // ligatures and stroked letters
    t.push(named(198, "AE"));
    t.push(named(230, "ae"));
    t.push(named(338, "OE"));
    t.push(named(339, "oe"));
    t.push(named(216, "O"));
    t.push(named(248, "o"));
    t.push(named(321, "L"));
    t.push(named(322, "l"));
    t.push(named(272, "DJ"));
    t.push(named(273, "dj"));
    t.push(named(223, "ss"));
    t.push(named(208, "DH"));
    t.push(named(240, "dh"));
    t.push(named(222, "TH"));
    t.push(named(254, "th"));

    // Greek letters are math symbols on output
    let caps = [
        (913, "Alpha"), (914, "Beta"), (915, "Gamma"), (916, "Delta"), (917, "Epsilon"),
        (918, "Zeta"), (919, "Eta"), (920, "Theta"), (921, "Iota"), (922, "Kappa"),
        (923, "Lambda"), (924, "Mu"), (925, "Nu"), (926, "Xi"), (927, "Omicron"),
        (928, "Pi"), (929, "Rho"), (931, "Sigma"), (932, "Tau"), (933, "Upsilon"),
        (934, "Phi"), (935, "Chi"), (936, "Psi"), (937, "Omega"),
    ];
    let small = [
        (945, "alpha"), (946, "beta"), (947, "gamma"), (948, "delta"), (949, "epsilon"),
        (950, "zeta"), (951, "eta"), (952, "theta"), (953, "iota"), (954, "kappa"),
        (955, "lambda"), (956, "mu"), (957, "nu"), (958, "xi"), (959, "omicron"),
        (960, "pi"), (961, "rho"), (963, "sigma"), (964, "tau"), (965, "upsilon"),
        (966, "phi"), (967, "chi"), (968, "psi"), (969, "omega"),
    ];
    for (u, name) in caps.iter().chain(small.iter()) {
        t.push(greek(*u, name));
    }

    t.push(lit(181, Class::Macro, "textmu", &["{\\textmu}", "\\textmu", "$\\mu$"]));

    // quotes and dashes are bare ligatures
    t.push(lit(8220, Class::Combo, "``", &["``", "{\\textquotedblleft}", "\\textquotedblleft"]));
    t.push(lit(8221, Class::Combo, "''", &["''", "{\\textquotedblright}", "\\textquotedblright"]));
    t.push(lit(8216, Class::Combo, "`", &["`", "{\\textquoteleft}", "\\textquoteleft"]));
    t.push(lit(8217, Class::Combo, "'", &["'", "{\\textquoteright}", "\\textquoteright"]));
    t.push(lit(8212, Class::Combo, "---", &["---", "{\\textemdash}", "\\textemdash"]));
    t.push(lit(8211, Class::Combo, "--", &["--", "{\\textendash}", "\\textendash"]));
    t.push(lit(8230, Class::Macro, "ldots", &["{\\ldots}", "{\\textellipsis}", "\\textellipsis"]));

    // common text symbols
    t.push(lit(161, Class::Macro, "textexclamdown", &["{\\textexclamdown}", "\\textexclamdown"]));
    t.push(lit(162, Class::Macro, "textcent", &["{\\textcent}", "\\textcent"]));
    t.push(lit(163, Class::Macro, "textsterling", &["{\\textsterling}", "\\textsterling", "\\pounds"]));
    t.push(lit(165, Class::Macro, "textyen", &["{\\textyen}", "\\textyen"]));
    t.push(lit(167, Class::Macro, "textsection", &["{\\textsection}", "\\textsection", "\\S{}"]));
    t.push(lit(169, Class::Macro, "textcopyright", &["{\\textcopyright}", "\\textcopyright"]));
    t.push(lit(174, Class::Macro, "textregistered", &["{\\textregistered}", "\\textregistered"]));
    t.push(lit(177, Class::Macro, "textpm", &["{\\textpm}", "\\textpm"]));
    t.push(lit(178, Class::Macro, "texttwosuperior", &["{\\texttwosuperior}", "\\texttwosuperior", "$^2$"]));
    t.push(lit(179, Class::Macro, "textthreesuperior", &["{\\textthreesuperior}", "\\textthreesuperior", "$^3$"]));
    t.push(lit(182, Class::Macro, "textparagraph", &["{\\textparagraph}", "\\textparagraph"]));
    t.push(lit(183, Class::Macro, "textperiodcentered", &["{\\textperiodcentered}", "\\textperiodcentered"]));
    t.push(lit(185, Class::Macro, "textonesuperior", &["{\\textonesuperior}", "\\textonesuperior", "$^1$"]));
    t.push(lit(188, Class::Macro, "textonequarter", &["{\\textonequarter}", "\\textonequarter"]));
    t.push(lit(189, Class::Macro, "textonehalf", &["{\\textonehalf}", "\\textonehalf"]));
    t.push(lit(190, Class::Macro, "textthreequarters", &["{\\textthreequarters}", "\\textthreequarters"]));
    t.push(lit(191, Class::Macro, "textquestiondown", &["{\\textquestiondown}", "\\textquestiondown"]));
    t.push(lit(215, Class::Macro, "texttimes", &["{\\texttimes}", "\\texttimes"]));
    t.push(lit(247, Class::Macro, "textdiv", &["{\\textdiv}", "\\textdiv"]));
    t.push(lit(402, Class::Macro, "textflorin", &["{\\textflorin}", "\\textflorin"]));
    t.push(lit(8224, Class::Macro, "textdagger", &["{\\textdagger}", "\\textdagger"]));
    t.push(lit(8225, Class::Macro, "textdaggerdbl", &["{\\textdaggerdbl}", "\\textdaggerdbl"]));
    t.push(lit(8226, Class::Macro, "textbullet", &["{\\textbullet}", "\\textbullet"]));
    t.push(lit(8364, Class::Macro, "texteuro", &["{\\texteuro}", "\\texteuro"]));
    t.push(lit(8482, Class::Macro, "texttrademark", &["{\\texttrademark}", "\\texttrademark", "$^{TM}$"]));

    t
}

lazy_static! {
    static ref LATEX_CHARS: Vec<LatexChar> = build_table();
    /// Every input variant, longest first so prefix matching is greedy.
    static ref MATCHERS: Vec<(Vec<char>, u32)> = {
        let mut m: Vec<(Vec<char>, u32)> = LATEX_CHARS
            .iter()
            .flat_map(|lc| {
                lc.variants
                    .iter()
                    .map(move |v| (v.chars().collect::<Vec<char>>(), lc.unicode))
            })
            .collect();
        m.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        m
    };
}

/// Characters that can open a LaTeX escape; anything else short-circuits.
fn may_start_escape(c: char) -> bool {
    matches!(c, '{' | '\\' | '~' | '$' | '\'' | '`' | '-' | '^')
}

/// Decode the escape at `chars[*pos]`.
///
/// Returns `(code point, matched)`; when no table entry matches, the
/// character itself is returned and `matched` is false (the caller then
/// applies input-charset mapping as for any ordinary byte).
pub fn latex_to_char(chars: &[char], pos: &mut usize) -> (u32, bool) {
    let c = chars[*pos];
    if may_start_escape(c) {
        let rest = &chars[*pos..];
        for (variant, unicode) in MATCHERS.iter() {
            if rest.len() >= variant.len() && rest[..variant.len()] == variant[..] {
                *pos += variant.len();
                return (*unicode, true);
            }
        }
    }
    *pos += 1;
    (c as u32, false)
}

/// Encode one code point as LaTeX, or `None` when the table has no entry.
///
/// The class wraps the bare form: `{\macro}`, `$\math$`, or nothing for
/// quote/dash ligatures.
pub fn char_to_latex(ch: u32) -> Option<String> {
    if ch == ' ' as u32 {
        return Some(" ".to_string());
    }
    let lc = LATEX_CHARS.iter().find(|lc| lc.unicode == ch)?;
    Some(match lc.class {
        Class::Combo => lc.out.clone(),
        Class::Macro => format!("{{\\{}}}", lc.out),
        Class::Math => format!("$\\{}$", lc.out),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(s: &str) -> String {
        let chars: Vec<char> = s.chars().collect();
        let mut pos = 0;
        let mut out = String::new();
        while pos < chars.len() {
            let (c, _) = latex_to_char(&chars, &mut pos);
            out.push(char::from_u32(c).unwrap());
        }
        out
    }

    #[test]
    fn three_spellings_of_an_accent() {
        assert_eq!(decode_all("{\\'e}"), "é");
        assert_eq!(decode_all("\\'{e}"), "é");
        assert_eq!(decode_all("\\'e"), "é");
    }

    #[test]
    fn dotless_i_accents() {
        assert_eq!(decode_all("{\\i}"), "ı");
        assert_eq!(decode_all("{\\'\\i}"), "í");
        assert_eq!(decode_all("\\'{\\i}"), "í");
    }

    #[test]
    fn named_letters() {
        assert_eq!(decode_all("{\\ss}"), "ß");
        assert_eq!(decode_all("{\\O}"), "Ø");
        assert_eq!(decode_all("{\\AA}"), "Å");
        assert_eq!(decode_all("\\r{A}"), "Å");
    }

    #[test]
    fn greedy_matching_prefers_longer_ligatures() {
        assert_eq!(decode_all("---"), "\u{2014}");
        assert_eq!(decode_all("--"), "\u{2013}");
        assert_eq!(decode_all("``x''"), "\u{201C}x\u{201D}");
    }

    #[test]
    fn output_wrapping_by_class() {
        assert_eq!(char_to_latex(945).as_deref(), Some("$\\alpha$"));
        assert_eq!(char_to_latex(233).as_deref(), Some("{\\'e}"));
        assert_eq!(char_to_latex(0x2014).as_deref(), Some("---"));
        assert_eq!(char_to_latex(0x201D).as_deref(), Some("''"));
        assert_eq!(char_to_latex(0x4E2D), None);
    }

    #[test]
    fn escape_round_trip() {
        for &u in &[193u32, 233, 231, 337, 352, 945, 969, 223, 305, 8212] {
            let tex = char_to_latex(u).unwrap();
            assert_eq!(decode_all(&tex), char::from_u32(u).unwrap().to_string(), "{tex}");
        }
    }
}
