//! Named precondition checks over description widths.
//!
//! Violations indicate a malformed upstream description and are fatal to the
//! synthesis run; they are never recovered from.

pub fn validate_integer_width(width: u32) -> Result<(), String> {
    if width == 0 || width > 256 {
        return Err(format!("integer width must be in 8..=256, got {width}"));
    }
    if width % 8 != 0 {
        return Err(format!("integer width must be a multiple of 8, got {width}"));
    }
    Ok(())
}

pub fn validate_fixed_bytes_width(width: u32) -> Result<(), String> {
    if !(1..=32).contains(&width) {
        return Err(format!("fixed bytes width must be in 1..=32, got {width}"));
    }
    Ok(())
}
