use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw page bytes to text: BOM -> valid UTF-8 -> chardetng guess.
///
/// Never fails; undecodable sequences become replacement characters and are
/// flagged in `had_errors`.
pub fn decode_page(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedText {
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
