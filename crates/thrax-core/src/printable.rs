//! Printable-codepoint test and the quoting rules of the canonical output.
//!
//! A codepoint sequence is rendered either fully quoted (`'a\nb'`) or fully
//! as raw codepoints (`<97 10 98>`). The two forms are never mixed.

use std::fmt::{self, Write};

/// Largest Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

const BACKSPACE: u32 = 0x08;

/// Codepoints outside every assigned Unicode block. Sorted, inclusive.
const UNALLOCATED: &[(u32, u32)] = &[
    (0x2FE0, 0x2FEF),
    (0x10200, 0x1027F),
    (0x103E0, 0x103FF),
    (0x10780, 0x107FF),
    (0x11E00, 0x11EDF),
    (0x12550, 0x12F8F),
    (0x13440, 0x143FF),
    (0x14680, 0x167FF),
    (0x1BCB0, 0x1CFFF),
    (0x1FC00, 0x1FFFF),
    (0x2A6E0, 0x2A6FF),
    (0x2EBF0, 0x2F7FF),
    (0x2FA20, 0x2FFFF),
    (0x31350, 0xDFFFF),
    (0xE0080, 0xE00FF),
    (0xE01F0, 0xEFFFF),
];

/// Specials block, `U+FFF0..=U+FFFF`.
const SPECIALS: (u32, u32) = (0xFFF0, 0xFFFF);

pub fn is_printable_char(codepoint: u32) -> bool {
    if matches!(codepoint, 0 | BACKSPACE | 0x09 | 0x0A | 0x0D | 0x20) {
        return true;
    }
    let Some(ch) = char::from_u32(codepoint) else {
        return false;
    };
    if ch.is_control() || (SPECIALS.0..=SPECIALS.1).contains(&codepoint) {
        return false;
    }
    !is_unallocated(codepoint)
}

fn is_unallocated(codepoint: u32) -> bool {
    let idx = UNALLOCATED.partition_point(|&(_, hi)| hi < codepoint);
    UNALLOCATED
        .get(idx)
        .is_some_and(|&(lo, _)| lo <= codepoint)
}

/// Writes one printable codepoint with the literal escapes applied.
///
/// The caller must have checked [`is_printable_char`].
pub fn write_printable_char(w: &mut impl Write, codepoint: u32) -> fmt::Result {
    match codepoint {
        0x0A => w.write_str("\\n"),
        0x0D => w.write_str("\\r"),
        0x09 => w.write_str("\\t"),
        BACKSPACE => w.write_str("\\b"),
        0 => w.write_str("\\0"),
        0x27 => w.write_str("\\'"),
        0x5C => w.write_str("\\\\"),
        _ => w.write_char(char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

/// `'abc'` when every codepoint is printable, `<97 98 99>` otherwise.
pub fn write_literal(w: &mut impl Write, codepoints: &[u32]) -> fmt::Result {
    if codepoints.iter().copied().all(is_printable_char) {
        w.write_char('\'')?;
        for &c in codepoints {
            write_printable_char(w, c)?;
        }
        return w.write_char('\'');
    }

    w.write_char('<')?;
    for (i, c) in codepoints.iter().enumerate() {
        if i > 0 {
            w.write_char(' ')?;
        }
        write!(w, "{c}")?;
    }
    w.write_char('>')
}

/// One inclusive run of a character class.
///
/// `'a'`, `['a'-'z']`, `<7>` or `<0-31>`.
pub fn write_range(w: &mut impl Write, from: u32, to: u32) -> fmt::Result {
    let printable = is_printable_char(from) && is_printable_char(to);
    match (from == to, printable) {
        (true, true) => write_literal(w, &[from]),
        (true, false) => write!(w, "<{from}>"),
        (false, true) => {
            w.write_char('[')?;
            write_literal(w, &[from])?;
            w.write_char('-')?;
            write_literal(w, &[to])?;
            w.write_char(']')
        }
        (false, false) => write!(w, "<{from}-{to}>"),
    }
}
