//! Generate command implementation
//!
//! Compiles an art file into a packed glyph table. The artifact is built
//! and validated fully in memory before the output path is touched, so a
//! failing run never leaves a partial table behind.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use dotfont_core::{art, emit, hash, Layout, WidthMode};

use crate::commands::json_output::{self, JsonReport};

/// Run the generate command
///
/// # Arguments
/// * `art_input` - Path to the art input file
/// * `table_output` - Path to write the packed table
/// * `layout` - Output layout (legacy or map)
/// * `width` - Width policy (explicit or dynamic)
/// * `json` - Print a machine-readable result envelope
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    art_input: &str,
    table_output: &str,
    layout: Layout,
    width: WidthMode,
    json: bool,
) -> Result<ExitCode> {
    if !json {
        println!("{} {}", "Generating:".cyan().bold(), art_input);
    }

    let art_text = fs::read_to_string(art_input)
        .with_context(|| format!("Failed to read art file: {}", art_input))?;

    let table = art::parse(&art_text, width)?;
    let artifact = emit::emit(&table, layout)?;
    let digest = hash::artifact_hash(&artifact);

    fs::write(table_output, &artifact)
        .with_context(|| format!("Failed to write to: {}", table_output))?;

    if json {
        json_output::print(&JsonReport {
            ok: true,
            command: "generate",
            input: art_input.to_string(),
            output: table_output.to_string(),
            glyphs: table.len(),
            aliases: table.alias_count(),
            hash: digest,
            warnings: Vec::new(),
        })?;
    } else {
        println!(
            "{} {} glyphs, {} aliases ({} layout, {} width)",
            "Table:".dimmed(),
            table.len(),
            table.alias_count(),
            layout,
            width
        );
        println!("{} {}", "Hash:".dimmed(), digest);
        println!("{} Wrote {}", "SUCCESS".green().bold(), table_output);
    }

    Ok(ExitCode::SUCCESS)
}
