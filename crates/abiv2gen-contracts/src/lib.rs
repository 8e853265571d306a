//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for schema/version strings
//! that appear in machine-readable I/O. Bump them when the corresponding JSON
//! shape changes incompatibly.

/// Schema version of the serialized variable description consumed by the
/// synthesizer (`state_vars` / `local_vars` type tree).
pub const ABIV2_DESCRIPTION_SCHEMA_VERSION: &str = "abiv2gen.description@0.1.0";

/// Schema version of the CLI tool report emitted with `--report-json`.
pub const ABIV2GEN_REPORT_SCHEMA_VERSION: &str = "abiv2gen.report@0.1.0";
