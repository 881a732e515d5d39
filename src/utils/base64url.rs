//! Base64URL decoding per RFC 4648
//!
//! Token segments and JWK fields usually arrive without padding. Input is
//! padded with `=` to a multiple of four characters before decoding, and
//! non-zero trailing bits are tolerated.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine};

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Pad `input` to a multiple of four characters
fn pad(input: &str) -> String {
    let mut padded = String::with_capacity(input.len() + 3);
    padded.push_str(input);
    let remainder = input.len() % 4;
    if remainder != 0 {
        padded.extend(std::iter::repeat_n('=', 4 - remainder));
    }
    padded
}

/// Decode a Base64URL string (padded or not) to bytes
pub(crate) fn decode_bytes(input: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_LENIENT.decode(pad(input))
}
