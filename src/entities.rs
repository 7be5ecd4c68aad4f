//! Entity-reference resolution.
//!
//! Resolves the body of a character reference (the text between `&` and `;`)
//! to its literal meaning. Named entities cover the HTML core set plus the
//! Latin-1 and typographic names that show up in real documents; numeric
//! references accept decimal and hexadecimal forms.

/// A resolved entity reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decoded {
    /// A named entity mapped to static replacement text.
    Str(&'static str),
    /// A numeric character reference.
    Char(char),
}

/// Resolve an entity body (without the surrounding `&` and `;`).
///
/// Returns `None` when the body is not a recognized named entity and not a
/// well-formed numeric reference; the caller emits the reference literally
/// in that case.
pub(crate) fn resolve(body: &str) -> Option<Decoded> {
    if let Some(digits) = body.strip_prefix('#') {
        return numeric(digits).map(Decoded::Char);
    }
    named(body).map(Decoded::Str)
}

/// Parse a numeric reference body (after the `#`).
///
/// References to invalid scalar values (zero, surrogates, out of range no
/// matter how far — digit runs overflowing `u32` included) resolve to
/// U+FFFD rather than failing the document, matching how browsers recover.
fn numeric(digits: &str) -> Option<char> {
    if digits.is_empty() {
        return None;
    }
    let value = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).unwrap_or(u32::MAX)
    } else {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u32>().unwrap_or(u32::MAX)
    };
    if value == 0 {
        return Some('\u{FFFD}');
    }
    Some(char::from_u32(value).unwrap_or('\u{FFFD}'))
}

/// Look up a named entity. Case-sensitive, with the historical all-caps
/// aliases for the core four.
fn named(name: &str) -> Option<&'static str> {
    Some(match name {
        // Core set
        "amp" | "AMP" => "&",
        "lt" | "LT" => "<",
        "gt" | "GT" => ">",
        "quot" | "QUOT" => "\"",
        "apos" => "'",

        // Spaces and joiners
        "nbsp" => "\u{A0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{AD}",
        "zwnj" => "\u{200C}",
        "zwj" => "\u{200D}",

        // Typography
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201A}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "bdquo" => "\u{201E}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "prime" => "\u{2032}",
        "Prime" => "\u{2033}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "permil" => "\u{2030}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203A}",
        "laquo" => "\u{AB}",
        "raquo" => "\u{BB}",
        "middot" => "\u{B7}",
        "sect" => "\u{A7}",
        "para" => "\u{B6}",

        // Signs and currency
        "copy" => "\u{A9}",
        "reg" => "\u{AE}",
        "trade" => "\u{2122}",
        "deg" => "\u{B0}",
        "plusmn" => "\u{B1}",
        "micro" => "\u{B5}",
        "times" => "\u{D7}",
        "divide" => "\u{F7}",
        "minus" => "\u{2212}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "asymp" => "\u{2248}",
        "infin" => "\u{221E}",
        "frac14" => "\u{BC}",
        "frac12" => "\u{BD}",
        "frac34" => "\u{BE}",
        "sup2" => "\u{B2}",
        "sup3" => "\u{B3}",
        "euro" => "\u{20AC}",
        "cent" => "\u{A2}",
        "pound" => "\u{A3}",
        "curren" => "\u{A4}",
        "yen" => "\u{A5}",
        "iexcl" => "\u{A1}",
        "iquest" => "\u{BF}",

        // Latin-1 letters common in western-European text
        "agrave" => "\u{E0}",
        "aacute" => "\u{E1}",
        "acirc" => "\u{E2}",
        "atilde" => "\u{E3}",
        "auml" => "\u{E4}",
        "aring" => "\u{E5}",
        "aelig" => "\u{E6}",
        "ccedil" => "\u{E7}",
        "egrave" => "\u{E8}",
        "eacute" => "\u{E9}",
        "ecirc" => "\u{EA}",
        "euml" => "\u{EB}",
        "igrave" => "\u{EC}",
        "iacute" => "\u{ED}",
        "icirc" => "\u{EE}",
        "iuml" => "\u{EF}",
        "ntilde" => "\u{F1}",
        "ograve" => "\u{F2}",
        "oacute" => "\u{F3}",
        "ocirc" => "\u{F4}",
        "otilde" => "\u{F5}",
        "ouml" => "\u{F6}",
        "oslash" => "\u{F8}",
        "ugrave" => "\u{F9}",
        "uacute" => "\u{FA}",
        "ucirc" => "\u{FB}",
        "uuml" => "\u{FC}",
        "yacute" => "\u{FD}",
        "yuml" => "\u{FF}",
        "szlig" => "\u{DF}",
        "Agrave" => "\u{C0}",
        "Aacute" => "\u{C1}",
        "Auml" => "\u{C4}",
        "Ccedil" => "\u{C7}",
        "Egrave" => "\u{C8}",
        "Eacute" => "\u{C9}",
        "Ntilde" => "\u{D1}",
        "Ouml" => "\u{D6}",
        "Uuml" => "\u{DC}",

        _ => return None,
    })
}
