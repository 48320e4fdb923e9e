// src/postprocess/textcomp.rs
//! Text-mode macros for symbols outside the document's input encoding.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static TEXTCOMP_MACROS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Latin-1 punctuation and signs
        ('\u{00A1}', r"\textexclamdown"),
        ('\u{00A2}', r"\textcent"),
        ('\u{00A3}', r"\textsterling"),
        ('\u{00A4}', r"\textcurrency"),
        ('\u{00A5}', r"\textyen"),
        ('\u{00A6}', r"\textbrokenbar"),
        ('\u{00A7}', r"\textsection"),
        ('\u{00A8}', r"\textasciidieresis"),
        ('\u{00A9}', r"\textcopyright"),
        ('\u{00AA}', r"\textordfeminine"),
        ('\u{00AB}', r"\guillemotleft"),
        ('\u{00AC}', r"\textlnot"),
        ('\u{00AE}', r"\textregistered"),
        ('\u{00AF}', r"\textasciimacron"),
        ('\u{00B0}', r"\textdegree"),
        ('\u{00B1}', r"\textpm"),
        ('\u{00B2}', r"\texttwosuperior"),
        ('\u{00B3}', r"\textthreesuperior"),
        ('\u{00B4}', r"\textasciiacute"),
        ('\u{00B5}', r"\textmu"),
        ('\u{00B6}', r"\textparagraph"),
        ('\u{00B9}', r"\textonesuperior"),
        ('\u{00BA}', r"\textordmasculine"),
        ('\u{00BB}', r"\guillemotright"),
        ('\u{00BC}', r"\textonequarter"),
        ('\u{00BD}', r"\textonehalf"),
        ('\u{00BE}', r"\textthreequarters"),
        ('\u{00BF}', r"\textquestiondown"),
        // General punctuation
        ('\u{2013}', r"\textendash"),
        ('\u{2014}', r"\textemdash"),
        ('\u{2016}', r"\textbardbl"),
        ('\u{201A}', r"\quotesinglbase"),
        ('\u{201C}', r"\textquotedblleft"),
        ('\u{201D}', r"\textquotedblright"),
        ('\u{201E}', r"\quotedblbase"),
        ('\u{2020}', r"\textdagger"),
        ('\u{2021}', r"\textdaggerdbl"),
        ('\u{2022}', r"\textbullet"),
        ('\u{2026}', r"\textellipsis"),
        ('\u{2030}', r"\textperthousand"),
        ('\u{2031}', r"\textpertenthousand"),
        ('\u{2039}', r"\guilsinglleft"),
        ('\u{203A}', r"\guilsinglright"),
        ('\u{203B}', r"\textreferencemark"),
        ('\u{203D}', r"\textinterrobang"),
        ('\u{2044}', r"\textfractionsolidus"),
        ('\u{2052}', r"\textdiscount"),
        // Currency
        ('\u{20A1}', r"\textcolonmonetary"),
        ('\u{20A4}', r"\textlira"),
        ('\u{20A6}', r"\textnaira"),
        ('\u{20A9}', r"\textwon"),
        ('\u{20AB}', r"\textdong"),
        ('\u{20AC}', r"\texteuro"),
        ('\u{20B1}', r"\textpeso"),
        // Letterlike symbols
        ('\u{2103}', r"\textcelsius"),
        ('\u{2116}', r"\textnumero"),
        ('\u{2117}', r"\textcircledP"),
        ('\u{211E}', r"\textrecipe"),
        ('\u{2120}', r"\textservicemark"),
        ('\u{2122}', r"\texttrademark"),
        ('\u{2126}', r"\textohm"),
        ('\u{2127}', r"\textmho"),
        ('\u{212E}', r"\textestimated"),
        // Arrows and operators
        ('\u{2190}', r"\textleftarrow"),
        ('\u{2191}', r"\textuparrow"),
        ('\u{2192}', r"\textrightarrow"),
        ('\u{2193}', r"\textdownarrow"),
        ('\u{2212}', r"\textminus"),
        ('\u{2217}', r"\textasteriskcentered"),
        ('\u{221A}', r"\textsurd"),
        ('\u{2329}', r"\textlangle"),
        ('\u{232A}', r"\textrangle"),
        ('\u{3008}', r"\textlangle"),
        ('\u{3009}', r"\textrangle"),
        // Miscellaneous
        ('\u{2422}', r"\textblank"),
        ('\u{25E6}', r"\textopenbullet"),
        ('\u{25EF}', r"\textbigcircle"),
        ('\u{266A}', r"\textmusicalnote"),
    ])
});

/// The textcomp macro for `c`, if there is one.
pub fn textcomp_macro(c: char) -> Option<&'static str> {
    TEXTCOMP_MACROS.get(&c).copied()
}
