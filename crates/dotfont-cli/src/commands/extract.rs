//! Extract command implementation
//!
//! Reads an existing packed table and writes every glyph back out as an
//! editable art block. The art text is built fully in memory before the
//! output path is touched.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use dotfont_core::{art, hash, legacy, CountPolicy};

use crate::commands::json_output::{self, JsonReport};

/// Run the extract command
///
/// # Arguments
/// * `packed_table` - Path to the packed table source
/// * `art_output` - Path to write the art file
/// * `policy` - How a lookup/record count mismatch is handled
/// * `json` - Print a machine-readable result envelope
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    packed_table: &str,
    art_output: &str,
    policy: CountPolicy,
    json: bool,
) -> Result<ExitCode> {
    if !json {
        println!("{} {}", "Extracting:".cyan().bold(), packed_table);
    }

    let source = fs::read_to_string(packed_table)
        .with_context(|| format!("Failed to read packed table: {}", packed_table))?;

    let (table, warnings) = legacy::read_table(&source, policy)?;
    let art_text = art::render(&table);
    let digest = hash::artifact_hash(&art_text);

    fs::write(art_output, &art_text)
        .with_context(|| format!("Failed to write to: {}", art_output))?;

    if json {
        json_output::print(&JsonReport {
            ok: true,
            command: "extract",
            input: packed_table.to_string(),
            output: art_output.to_string(),
            glyphs: table.len(),
            aliases: table.alias_count(),
            hash: digest,
            warnings,
        })?;
    } else {
        for warning in &warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
        println!("{} {} glyphs", "Table:".dimmed(), table.len());
        println!("{} {}", "Hash:".dimmed(), digest);
        println!("{} Wrote {}", "SUCCESS".green().bold(), art_output);
    }

    Ok(ExitCode::SUCCESS)
}
