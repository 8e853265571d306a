use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use abiv2gen::synth::{self, SynthOptions};
use abiv2gen_contracts::{ABIV2GEN_REPORT_SCHEMA_VERSION, ABIV2_DESCRIPTION_SCHEMA_VERSION};

#[derive(Parser)]
#[command(name = "abiv2gen")]
#[command(
    about = "ABIEncoderV2 fuzzer front end (variable description -> self-checking Solidity program).",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the pinned description schema version.
    SchemaVersion,
    /// Synthesize the test program for a JSON variable description.
    Synth {
        #[arg(long)]
        description: PathBuf,
        /// Write the program here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Override the diagnostic-code offset of the external-convention call.
        #[arg(long, value_name = "CODE")]
        external_call_offset: Option<u32>,
        /// Print a machine-readable tool report to stdout.
        #[arg(long)]
        report_json: bool,
    },
}

#[derive(Debug, Serialize)]
struct ToolReport {
    schema_version: &'static str,
    command: &'static str,
    ok: bool,
    r#in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    exit_code: u8,
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::SchemaVersion => {
            println!("{ABIV2_DESCRIPTION_SCHEMA_VERSION}");
            Ok(std::process::ExitCode::SUCCESS)
        }
        Cmd::Synth {
            description,
            out,
            external_call_offset,
            report_json,
        } => {
            let bytes = std::fs::read(&description)
                .with_context(|| format!("read description: {}", description.display()))?;
            let mut options = SynthOptions::default();
            if let Some(offset) = external_call_offset {
                options.external_call_offset = offset;
            }

            let result = synth::synthesize_program(&bytes, &options);
            let (ok, error) = match &result {
                Ok(_) => (true, None),
                Err(e) => (false, Some(e.to_string())),
            };

            if let Ok(program) = &result {
                match &out {
                    Some(path) => {
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent).with_context(|| {
                                format!("create output dir: {}", parent.display())
                            })?;
                        }
                        std::fs::write(path, program.as_bytes())
                            .with_context(|| format!("write: {}", path.display()))?;
                    }
                    None => print!("{program}"),
                }
            }

            let exit_code = if ok { 0 } else { 1 };
            if report_json {
                let report = ToolReport {
                    schema_version: ABIV2GEN_REPORT_SCHEMA_VERSION,
                    command: "synth",
                    ok,
                    r#in: description.display().to_string(),
                    error: error.clone(),
                    exit_code,
                };
                println!(
                    "{}",
                    serde_json::to_string(&report).context("encode tool report")?
                );
            } else if let Some(error) = &error {
                eprintln!("abiv2gen: {error}");
            }
            Ok(std::process::ExitCode::from(exit_code))
        }
    }
}
