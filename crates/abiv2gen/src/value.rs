//! Deterministic value synthesis.
//!
//! Every synthesized literal is a pure function of the leaf's position counter:
//! the SHA-256 digest of the counter's decimal text, masked to the hex-digit
//! budget of the target type. Reproducibility from the counter alone is a
//! correctness requirement (fuzz failures must replay); no system randomness is
//! involved. The hash is not a cryptographic contract, only a cheap way to get
//! distinct, well-spread values per position.

use sha2::{Digest, Sha256};

use crate::validate;

fn hash_counter(counter: u32) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(counter.to_string().as_bytes());
    h.finalize().into()
}

/// Full 64-hex-digit digest of the counter, lowercase, unprefixed.
pub fn digest_hex(counter: u32) -> String {
    hash_counter(counter)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Low `nibbles` hex digits of the counter digest as a `0x` number literal.
/// Leading zeros are stripped; a fully masked-out value renders as `0x0`.
fn masked_hex(counter: u32, nibbles: usize) -> String {
    debug_assert!((1..=64).contains(&nibbles));
    let hex = digest_hex(counter);
    let tail = &hex[hex.len() - nibbles..];
    let tail = tail.trim_start_matches('0');
    if tail.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{tail}")
    }
}

/// Unsigned integer literal, `< 2^width`.
pub fn uint_value(width: u32, counter: u32) -> Result<String, String> {
    validate::validate_integer_width(width)?;
    Ok(masked_hex(counter, (width / 4) as usize))
}

/// Signed integer literal. Masked one hex nibble narrower than the type, so the
/// value is `< 2^(width-4)` and the sign bit is never set; negative-literal
/// syntax is deliberately never needed.
pub fn int_value(width: u32, counter: u32) -> Result<String, String> {
    validate::validate_integer_width(width)?;
    Ok(masked_hex(counter, (width / 4 - 1) as usize))
}

pub fn integer_value(signed: bool, width: u32, counter: u32) -> Result<String, String> {
    if signed {
        int_value(width, counter)
    } else {
        uint_value(width, counter)
    }
}

/// Address literal: the 160-bit unsigned derivation wrapped in an address cast.
pub fn address_value(counter: u32) -> Result<String, String> {
    Ok(format!("address({})", uint_value(160, counter)?))
}

/// Fixed-size byte literal, masked to `width * 2` hex digits.
pub fn fixed_bytes_value(width: u32, counter: u32) -> Result<String, String> {
    validate::validate_fixed_bytes_width(width)?;
    Ok(masked_hex(counter, (width * 2) as usize))
}

/// Quoted string literal shared by `bytes` and `string` declarations.
pub fn bytes_value(counter: u32) -> String {
    format!("\"{}\"", digest_hex(counter))
}
