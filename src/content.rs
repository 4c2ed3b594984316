//! Binary detection and text decoding for file contents.

use crate::options::BinaryDetection;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Tunable constants of the null-byte / non-text-ratio heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryHeuristic {
    /// A NUL within this many leading bytes marks the buffer binary.
    pub null_window: usize,
    /// Number of leading bytes sampled for the non-text ratio.
    pub sample_window: usize,
    /// Buffers whose non-text share of the sample exceeds this are binary.
    pub max_non_text_ratio: f64,
}

impl Default for BinaryHeuristic {
    fn default() -> Self {
        Self {
            null_window: 800,
            sample_window: 1000,
            max_non_text_ratio: 0.30,
        }
    }
}

impl BinaryHeuristic {
    pub fn is_binary(&self, bytes: &[u8]) -> bool {
        let head = &bytes[..bytes.len().min(self.null_window)];
        if head.contains(&0) {
            return true;
        }
        let sample = &bytes[..bytes.len().min(self.sample_window)];
        if sample.is_empty() {
            return false;
        }
        let non_text = sample.iter().filter(|&&b| !is_texty(b)).count();
        non_text as f64 / sample.len() as f64 > self.max_non_text_ratio
    }
}

/// Tab, LF, FF, CR, ESC, BEL, BS and printable ASCII.
pub fn is_texty(b: u8) -> bool {
    matches!(b, 7 | 8 | 9 | 10 | 12 | 13 | 27 | 0x20..=0x7e)
}

pub(crate) fn is_binary(
    bytes: &[u8],
    detection: BinaryDetection,
    heuristic: &BinaryHeuristic,
) -> bool {
    match detection {
        BinaryDetection::Heuristic => heuristic.is_binary(bytes),
        BinaryDetection::Inspector => {
            let sample = &bytes[..bytes.len().min(heuristic.sample_window)];
            content_inspector::inspect(sample).is_binary()
        }
        BinaryDetection::None => false,
    }
}

/// Decodes as strict UTF-8, falling back to Latin-1 (every byte maps to the
/// code point of the same value, so the fallback cannot fail).
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| char::from(b)).collect(),
    }
}

pub fn encode_binary(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_byte_in_window_is_binary() {
        let h = BinaryHeuristic::default();
        let mut buf = vec![b'a'; 799];
        buf.push(0);
        buf.extend(std::iter::repeat_n(b'a', 5000));
        assert!(h.is_binary(&buf));
        assert!(h.is_binary(&[0, 1, 2]));
    }

    #[test]
    fn null_byte_past_window_is_ignored() {
        let h = BinaryHeuristic::default();
        let mut buf = vec![b'a'; 800];
        buf.push(0);
        assert!(!h.is_binary(&buf));
    }

    #[test]
    fn non_text_ratio_threshold() {
        let h = BinaryHeuristic::default();
        // 30 of 100 non-text bytes is not above the threshold.
        let mut at_limit = vec![b'x'; 70];
        at_limit.extend(std::iter::repeat_n(0x80u8, 30));
        assert!(!h.is_binary(&at_limit));
        let mut over = vec![b'x'; 69];
        over.extend(std::iter::repeat_n(0x80u8, 31));
        assert!(h.is_binary(&over));
    }

    #[test]
    fn only_the_sample_window_counts() {
        let h = BinaryHeuristic::default();
        let mut buf = vec![b'x'; 1000];
        buf.extend(std::iter::repeat_n(0xffu8, 10_000));
        assert!(!h.is_binary(&buf));
    }

    #[test]
    fn custom_constants_apply() {
        let h = BinaryHeuristic {
            null_window: 2,
            sample_window: 4,
            max_non_text_ratio: 0.5,
        };
        assert!(!h.is_binary(b"ab\0d"));
        assert!(h.is_binary(&[b'a', 0x90, 0x91, 0x92]));
    }

    #[test]
    fn empty_buffer_is_text() {
        assert!(!BinaryHeuristic::default().is_binary(&[]));
    }

    #[test]
    fn texty_set_members() {
        for b in [7u8, 8, 9, 10, 12, 13, 27, b' ', b'~', b'A'] {
            assert!(is_texty(b), "{b} should be texty");
        }
        for b in [0u8, 1, 11, 14, 31, 127, 128, 255] {
            assert!(!is_texty(b), "{b} should not be texty");
        }
    }

    #[test]
    fn utf8_text_round_trips() {
        let original = "fn main() {\n\tprintln!(\"hi\");\r\n}\n".as_bytes().to_vec();
        assert!(!BinaryHeuristic::default().is_binary(&original));
        let decoded = decode_text(original.clone());
        assert_eq!(decoded.into_bytes(), original);
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        assert_eq!(decode_text(vec![b'c', b'a', b'f', 0xe9]), "caf\u{e9}");
        assert_eq!(decode_text(vec![0xff]), "\u{ff}");
    }

    #[test]
    fn detection_strategies() {
        let h = BinaryHeuristic::default();
        let data = [0u8, 1, 2];
        assert!(is_binary(&data, BinaryDetection::Heuristic, &h));
        assert!(is_binary(&data, BinaryDetection::Inspector, &h));
        assert!(!is_binary(&data, BinaryDetection::None, &h));
        assert!(!is_binary(b"plain", BinaryDetection::Inspector, &h));
    }

    #[test]
    fn base64_is_standard_padded() {
        assert_eq!(encode_binary(&[0, 1, 2]), "AAEC");
        assert_eq!(encode_binary(b"a"), "YQ==");
    }
}
