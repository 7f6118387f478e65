//! Byte decoding and mojibake repair for extracted text.
//!
//! Course materials come from varied authoring tools, often on Windows
//! locales, so a strict UTF-8 decode is tried first and Windows-1252 and
//! Latin-1 act as fallbacks. Separately, text that already went through a
//! wrong decode upstream (UTF-8 bytes read as Latin-1, the classic
//! "mojibake") is patched with a fixed table of literal replacements.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

/// A candidate decoding, tried in [`DECODE_CHAIN`] order until one accepts
/// the input without invalid sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeCandidate {
    Utf8Strict,
    Windows1252,
    Latin1,
}

/// Fixed decode priority. Latin-1 maps every byte to a code point, so the
/// chain always terminates with a result.
const DECODE_CHAIN: &[DecodeCandidate] = &[
    DecodeCandidate::Utf8Strict,
    DecodeCandidate::Windows1252,
    DecodeCandidate::Latin1,
];

impl DecodeCandidate {
    fn try_decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            DecodeCandidate::Utf8Strict => {
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            DecodeCandidate::Windows1252 => {
                let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
                if had_errors { None } else { Some(decoded.into_owned()) }
            }
            DecodeCandidate::Latin1 => {
                Some(bytes.iter().map(|&b| b as char).collect())
            }
        }
    }
}

/// Decode a raw text buffer with the fallback chain: strict UTF-8, then
/// Windows-1252, then Latin-1. The first candidate that decodes without
/// invalid sequences wins; no candidate substitutes replacement characters.
pub fn decode_text_bytes(bytes: &[u8]) -> String {
    for candidate in DECODE_CHAIN {
        if let Some(text) = candidate.try_decode(bytes) {
            return text;
        }
    }
    // Latin-1 accepts every byte, so the chain cannot fall through.
    bytes.iter().map(|&b| b as char).collect()
}

/// Ordered literal replacements for UTF-8 text that was mis-decoded as
/// Latin-1/Windows-1252 somewhere upstream. Applied in table order; some
/// patterns share a prefix, so the order is part of the contract. Sequences
/// not in the table are left as-is — this is a bounded best-effort repair,
/// not charset detection.
const MOJIBAKE_REPLACEMENTS: &[(&str, &str)] = &[
    ("Ã¡", "á"),
    ("Ã©", "é"),
    ("Ã\u{ad}", "í"),
    ("Ã³", "ó"),
    ("Ãº", "ú"),
    ("Ã±", "ñ"),
    ("Ã\u{81}", "Á"),
    ("Ã‰", "É"),
    ("Ã\u{8d}", "Í"),
    ("Ã\"", "Ó"),
    ("Ãš", "Ú"),
    ("Ã'", "Ñ"),
    ("Â¿", "¿"),
    ("Â¡", "¡"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€™", "'"),
    ("â€\"", "—"),
    ("Â°", "°"),
];

/// Repair common encoding corruption in already-decoded text: strip every
/// Unicode replacement character (U+FFFD), then apply the fixed mojibake
/// table. Pure and idempotent over the defined replacement set.
pub fn repair_encoding(text: &str) -> String {
    let stripped: Cow<'_, str> = if text.contains('\u{fffd}') {
        Cow::Owned(text.chars().filter(|&c| c != '\u{fffd}').collect())
    } else {
        Cow::Borrowed(text)
    };

    let mut repaired = stripped.into_owned();
    for (pattern, replacement) in MOJIBAKE_REPLACEMENTS {
        if repaired.contains(pattern) {
            repaired = repaired.replace(pattern, replacement);
        }
    }
    repaired
}

/// Extract the content of a plain-text (`.txt`) buffer: decode with the
/// fallback chain, repair, trim. Cannot fail.
pub fn extract_plain_text(bytes: &[u8]) -> String {
    repair_encoding(&decode_text_bytes(bytes)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        let bytes = "Educación en química".as_bytes();
        assert_eq!(decode_text_bytes(bytes), "Educación en química");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0xF3/0xED are invalid as UTF-8 lead bytes but valid Windows-1252
        let bytes = b"Educaci\xf3n en qu\xedmica";
        assert_eq!(decode_text_bytes(bytes), "Educación en química");
    }

    #[test]
    fn test_decode_does_not_substitute_replacement_chars() {
        let bytes = b"caf\xe9";
        let text = decode_text_bytes(bytes);
        assert_eq!(text, "café");
        assert!(!text.contains('\u{fffd}'));
    }

    #[test]
    fn test_latin1_terminal_fallback_accepts_every_byte() {
        let all_bytes: Vec<u8> = (0u8..=255).collect();
        let text = DecodeCandidate::Latin1.try_decode(&all_bytes).unwrap();
        assert_eq!(text.chars().count(), 256);
    }

    #[test]
    fn test_repair_strips_replacement_characters() {
        assert_eq!(repair_encoding("abc\u{fffd}def"), "abcdef");
        assert_eq!(repair_encoding("\u{fffd}\u{fffd}"), "");
    }

    #[test]
    fn test_repair_accented_vowels() {
        assert_eq!(repair_encoding("Ã¡"), "á");
        assert_eq!(repair_encoding("Ã©"), "é");
        assert_eq!(repair_encoding("Ã\u{ad}"), "í");
        assert_eq!(repair_encoding("Ã³"), "ó");
        assert_eq!(repair_encoding("Ãº"), "ú");
        assert_eq!(repair_encoding("Ã±"), "ñ");
    }

    #[test]
    fn test_repair_uppercase_and_punctuation() {
        assert_eq!(repair_encoding("Ã\u{81}"), "Á");
        assert_eq!(repair_encoding("Ã‰"), "É");
        assert_eq!(repair_encoding("Ã\u{8d}"), "Í");
        assert_eq!(repair_encoding("Ã\""), "Ó");
        assert_eq!(repair_encoding("Ãš"), "Ú");
        assert_eq!(repair_encoding("Ã'"), "Ñ");
        assert_eq!(repair_encoding("Â¿"), "¿");
        assert_eq!(repair_encoding("Â¡"), "¡");
        assert_eq!(repair_encoding("Â°"), "°");
    }

    #[test]
    fn test_repair_quotes_and_dashes() {
        assert_eq!(repair_encoding("â€œ"), "\"");
        assert_eq!(repair_encoding("â€\u{9d}"), "\"");
        assert_eq!(repair_encoding("â€™"), "'");
        assert_eq!(repair_encoding("â€\""), "—");
    }

    #[test]
    fn test_repair_full_table_round_trip() {
        for (corrupted, correct) in MOJIBAKE_REPLACEMENTS {
            assert_eq!(&repair_encoding(corrupted), correct);
        }
    }

    #[test]
    fn test_repair_in_context() {
        assert_eq!(
            repair_encoding("EducaciÃ³n en quÃ\u{ad}mica"),
            "Educación en química"
        );
        assert_eq!(repair_encoding("Â¿QuÃ© es?"), "¿Qué es?");
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inputs = [
            "EducaciÃ³n quÃ\u{ad}mica Â¿â€œcitaâ€\u{9d}? 25Â°C â€” fin",
            "plain ascii stays put",
            "ya reparado: Educación ¿qué? 25°C",
            "abc\u{fffd}def",
        ];
        for input in inputs {
            let once = repair_encoding(input);
            assert_eq!(repair_encoding(&once), once);
        }
    }

    #[test]
    fn test_repair_leaves_unmapped_sequences_alone() {
        // Mojibake for "ü" (Ã¼) is not in the table
        assert_eq!(repair_encoding("GrÃ¼n"), "GrÃ¼n");
    }

    #[test]
    fn test_extract_plain_text_utf8_end_to_end() {
        let bytes = "  Educación en química\n".as_bytes();
        let text = extract_plain_text(bytes);
        assert_eq!(text, "Educación en química");
        assert!(!text.contains('\u{fffd}'));
    }

    #[test]
    fn test_extract_plain_text_windows_1252_end_to_end() {
        let text = extract_plain_text(b"Evaluaci\xf3n del m\xf3dulo");
        assert_eq!(text, "Evaluación del módulo");
    }

    #[test]
    fn test_extract_plain_text_empty() {
        assert_eq!(extract_plain_text(b""), "");
        assert_eq!(extract_plain_text(b"   \n\t"), "");
    }
}
