//! Public synthesis entry points.
//!
//! One call owns one private generation state; repeated calls over the same
//! description produce byte-identical output. There is no partial output: the
//! result is either the complete program text or an error.

use std::fmt::Display;

use crate::ast::ProgramDescription;
use crate::description;
use crate::sol_emit;

#[derive(Debug, Clone)]
pub struct SynthOptions {
    /// Added to the external-convention diagnostic codes so they cannot
    /// collide with the public-convention codes `1..N`.
    pub external_call_offset: u32,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            external_call_offset: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthErrorKind {
    /// The serialized description could not be decoded.
    Decode,
    /// The decoded description violates an input contract (widths, empty
    /// dimensions at value synthesis). The upstream generator is at fault;
    /// nothing is retried.
    Precondition,
    Internal,
}

impl SynthErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SynthErrorKind::Decode => "decode",
            SynthErrorKind::Precondition => "precondition",
            SynthErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SynthError {
    pub kind: SynthErrorKind,
    pub message: String,
}

impl SynthError {
    pub fn new(kind: SynthErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::error::Error for SynthError {}

impl Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind.as_str(), self.message)
    }
}

/// Synthesizes the self-checking Solidity program for an already-decoded
/// description.
pub fn synthesize_description(
    description: &ProgramDescription,
    options: &SynthOptions,
) -> Result<String, SynthError> {
    sol_emit::synthesize(description, options)
}

/// Decodes a serialized JSON description and synthesizes its program.
pub fn synthesize_program(bytes: &[u8], options: &SynthOptions) -> Result<String, SynthError> {
    let description = description::description_from_json(bytes)
        .map_err(|e| SynthError::new(SynthErrorKind::Decode, e.to_string()))?;
    synthesize_description(&description, options)
}
