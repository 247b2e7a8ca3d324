//! # shellrun Output Encoding (`common::encoding`)
//!
//! File: cli/src/common/encoding.rs
//!
//! ## Overview
//!
//! Console output arrives as raw bytes whose encoding depends on the host: a
//! Chinese Windows console speaks GBK (code page 936), an old US console code
//! page 437, most Linux systems UTF-8. This module provides the `Charset` value
//! used to turn those bytes into text.
//!
//! `Charset` covers the three encodings the resolver maps code pages to
//! (`UTF-8`, `GBK`, `ISO-8859-1`) plus any other encoding `encoding_rs` knows by
//! label, which is what a POSIX locale such as `ja_JP.EUC-JP` may report.
//!
//! ISO-8859-1 is decoded as true Latin-1 (every byte maps to the code point of the
//! same value). `encoding_rs` follows the WHATWG rule that treats the
//! `iso-8859-1` label as windows-1252, so those labels are intercepted first.
//!
//! Labels are also matched in their compact form (lowercase, no `-` or `_`), so
//! glibc codeset spellings such as `eucJP`, `euckr` or `iso88591` resolve.
//!
use crate::core::error::ShellrunError;
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Labels that select true Latin-1 decoding, in compact form.
const LATIN1_LABELS: &[&str] = &[
    "iso88591",
    "iso88591:1987",
    "isoir100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
];

/// Compact codeset names used by glibc locales that WHATWG labels do not cover.
fn locale_alias(compact: &str) -> Option<&'static Encoding> {
    match compact {
        "eucjp" => Some(encoding_rs::EUC_JP),
        "euckr" => Some(encoding_rs::EUC_KR),
        "big5hkscs" => Some(encoding_rs::BIG5),
        "iso885915" => Some(encoding_rs::ISO_8859_15),
        _ => None,
    }
}

/// Lowercases `label` and drops `-` and `_`.
fn compact_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A resolved text encoding for decoding process output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Gbk,
    Latin1,
    /// Any other encoding known to `encoding_rs`.
    Other(&'static Encoding),
}

impl Charset {
    /// Looks up a charset by name, case-insensitively.
    ///
    /// Returns `None` when the label names no encoding this crate can decode.
    pub fn from_label(label: &str) -> Option<Charset> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        let compact = compact_label(trimmed);
        if LATIN1_LABELS.contains(&compact.as_str()) {
            return Some(Charset::Latin1);
        }
        if let Some(encoding) = locale_alias(&compact) {
            return Some(Charset::from_encoding(encoding));
        }
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        let encoding = Encoding::for_label(normalized.as_bytes())?;
        Some(Charset::from_encoding(encoding))
    }

    fn from_encoding(encoding: &'static Encoding) -> Charset {
        if encoding == encoding_rs::UTF_8 {
            Charset::Utf8
        } else if encoding == encoding_rs::GBK {
            Charset::Gbk
        } else {
            Charset::Other(encoding)
        }
    }

    /// Canonical display name (`UTF-8`, `GBK`, `ISO-8859-1`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Gbk => "GBK",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Other(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes),
            Charset::Gbk => encoding_rs::GBK.decode_without_bom_handling(bytes).0,
            Charset::Latin1 => encoding_rs::mem::decode_latin1(bytes),
            Charset::Other(encoding) => encoding.decode_without_bom_handling(bytes).0,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = ShellrunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::from_label(s).ok_or_else(|| ShellrunError::UnsupportedCharset(s.to_string()))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known_names() {
        assert_eq!(Charset::from_label("UTF-8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_label("utf8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_label("GBK"), Some(Charset::Gbk));
        assert_eq!(Charset::from_label("gb2312"), Some(Charset::Gbk));
        assert_eq!(Charset::from_label("ISO-8859-1"), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("ISO8859-1"), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("latin1"), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("Latin-1"), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("iso88591"), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("ISO_8859-1"), Some(Charset::Latin1));
    }

    #[test]
    fn test_from_label_glibc_codesets() {
        assert_eq!(Charset::from_label("eucJP"), Some(Charset::Other(encoding_rs::EUC_JP)));
        assert_eq!(Charset::from_label("euckr"), Some(Charset::Other(encoding_rs::EUC_KR)));
        assert_eq!(Charset::from_label("big5hkscs"), Some(Charset::Other(encoding_rs::BIG5)));
        assert_eq!(Charset::from_label("BIG5-HKSCS"), Some(Charset::Other(encoding_rs::BIG5)));
        assert_eq!(
            Charset::from_label("iso885915"),
            Some(Charset::Other(encoding_rs::ISO_8859_15))
        );
    }

    #[test]
    fn test_from_label_other_encodings() {
        let euc_jp = Charset::from_label("EUC-JP").expect("EUC-JP should be known");
        assert_eq!(euc_jp, Charset::Other(encoding_rs::EUC_JP));
        assert_eq!(euc_jp.name(), "EUC-JP");

        // Only the explicit iso-8859-1 family is intercepted.
        assert_eq!(
            Charset::from_label("windows-1252"),
            Some(Charset::Other(encoding_rs::WINDOWS_1252))
        );
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(Charset::from_label(""), None);
        assert_eq!(Charset::from_label("   "), None);
        assert_eq!(Charset::from_label("KLINGON-8"), None);

        let err = "KLINGON-8".parse::<Charset>().unwrap_err();
        assert!(matches!(err, ShellrunError::UnsupportedCharset(ref l) if l == "KLINGON-8"));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Charset::Utf8.to_string(), "UTF-8");
        assert_eq!(Charset::Gbk.to_string(), "GBK");
        assert_eq!(Charset::Latin1.to_string(), "ISO-8859-1");
        assert_eq!(Charset::default(), Charset::Utf8);
    }

    #[test]
    fn test_decode_gbk() {
        // "中文" in GBK.
        let bytes = [0xD6, 0xD0, 0xCE, 0xC4];
        assert_eq!(Charset::Gbk.decode(&bytes), "中文");
    }

    #[test]
    fn test_decode_latin1_maps_high_bytes_directly() {
        // 0x80 stays U+0080 under Latin-1 (windows-1252 would give '€').
        let bytes = [b'c', b'a', b'f', 0xE9, 0x80];
        assert_eq!(Charset::Latin1.decode(&bytes), "caf\u{e9}\u{80}");
    }

    #[test]
    fn test_decode_utf8_lossy() {
        assert_eq!(Charset::Utf8.decode("héllo".as_bytes()), "héllo");
        assert_eq!(Charset::Utf8.decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }
}
