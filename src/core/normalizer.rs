//! Filename text normalization.
//!
//! - `normalize`: repairs names whose UTF-8 bytes were read as Windows-1252
//! - `clean_title`: strips the extension and separator noise
//! - `simplify`: accent-folded ASCII key used only for equality checks
//! - `sanitize_for_filesystem`: makes a computed name safe as a path component

use regex::Regex;
use std::ffi::OsStr;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Trailing file extension; group 1 is the extension without the dot.
pub(crate) static RE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9]+)$").expect("extension regex"));

static RE_OPEN_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([\(\[])\s*").expect("open bracket regex"));

static RE_CLOSE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([\)\]])\s*").expect("close bracket regex"));

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Windows-1252 code points for bytes 0x80..=0x9F. `None` marks bytes the
/// code page leaves undefined; those fall back to the Latin-1 control char.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Map a char back to the single Windows-1252 byte that would display as it.
fn encode_cp1252(c: char) -> Option<u8> {
    let code = u32::from(c);
    if code <= 0xFF {
        return Some(code as u8);
    }
    CP1252_HIGH
        .iter()
        .position(|&mapped| mapped == Some(c))
        .map(|idx| 0x80 + idx as u8)
}

/// Decode raw bytes as Windows-1252.
pub fn decode_cp1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize].unwrap_or(b as char),
            _ => b as char,
        })
        .collect()
}

/// Repair mis-decoded names such as `AmÃ©lie` into `Amélie`.
///
/// Never fails: when the text cannot be improved it is returned unchanged.
pub fn normalize(raw: &str) -> String {
    if raw.is_ascii() {
        return raw.to_string();
    }

    let bytes: Option<Vec<u8>> = raw.chars().map(encode_cp1252).collect();
    match bytes.map(String::from_utf8) {
        Some(Ok(decoded)) if decoded != raw => {
            tracing::debug!("Re-decoded filename: {} -> {}", raw, decoded);
            decoded
        }
        _ => raw.to_string(),
    }
}

/// Decode an OS file name and normalize it.
pub fn normalize_os(name: &OsStr) -> String {
    match name.to_str() {
        Some(text) => normalize(text),
        None => normalize(&decode_cp1252(name.as_encoded_bytes())),
    }
}

/// Strip the extension and separator noise from a file name.
///
/// Dots and underscores become spaces, whitespace inside brackets is pushed
/// outside them, and runs of whitespace collapse to one space.
pub fn clean_title(text: &str) -> String {
    let without_ext = RE_EXTENSION.replace(text, "");
    let spaced = without_ext.replace(['.', '_'], " ");
    let opened = RE_OPEN_BRACKET.replace_all(&spaced, " $1");
    let closed = RE_CLOSE_BRACKET.replace_all(&opened, "$1 ");
    RE_WHITESPACE.replace_all(&closed, " ").trim().to_string()
}

/// Comparison key: lowercase, accents folded, ASCII alphanumerics only.
pub fn simplify(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Make a computed name usable as a single path component.
pub fn sanitize_for_filesystem(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\0' => '-',
            ':' => '.',
            _ => c,
        })
        .collect()
}
