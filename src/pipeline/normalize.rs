//! Source content normalization.
//!
//! Subscription sources publish either a base64 blob or plain text. Decoding
//! is attempted first; failure means the body is already plain text.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Standard alphabet, padding optional, trailing bits tolerated.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Plain text of a source body, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The body was base64 and this is the decoded text.
    Decoded(String),
    /// The body was not base64 and is passed through unchanged.
    Raw(String),
}

impl Normalized {
    pub fn text(&self) -> &str {
        match self {
            Normalized::Decoded(text) | Normalized::Raw(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Normalized::Decoded(text) | Normalized::Raw(text) => text,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Normalized::Decoded(_))
    }
}

/// Decode `raw` as base64 if possible, otherwise return it unchanged.
///
/// ASCII whitespace is ignored while decoding, so line-wrapped blobs decode.
/// Decoded bytes that are not valid UTF-8 are converted lossily.
pub fn normalize(raw: &str) -> Normalized {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match FORGIVING.decode(compact.as_bytes()) {
        Ok(bytes) => Normalized::Decoded(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::trace!(error = %e, "Body is not base64, using raw text");
            Normalized::Raw(raw.to_string())
        }
    }
}
