//! JSON output types for machine-readable CLI output.
//!
//! With `--json`, both commands print a single result envelope to stdout
//! so other tools can pick up the conversion outcome programmatically.

use dotfont_core::Warning;
use serde::Serialize;

/// Result envelope printed by the `--json` flag.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Always true; failures exit through stderr before any envelope.
    pub ok: bool,
    /// The command that produced this report ("extract" or "generate").
    pub command: &'static str,
    /// Input path as given on the command line.
    pub input: String,
    /// Output path as given on the command line.
    pub output: String,
    /// Number of glyph entries written, alias entries included.
    pub glyphs: usize,
    /// Number of alias declarations.
    pub aliases: usize,
    /// BLAKE3 hash of the output artifact.
    pub hash: String,
    /// Non-fatal conditions encountered during the conversion.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Prints the envelope as pretty JSON on stdout.
pub fn print(report: &JsonReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
