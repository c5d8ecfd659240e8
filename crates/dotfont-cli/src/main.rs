//! dotfont - glyph table codec for dot-matrix display fonts
//!
//! This binary converts between editable ASCII-art glyph definitions and
//! the packed tables compiled into display firmware.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use dotfont_cli::commands;
use dotfont_core::{CountPolicy, Layout, WidthMode};

/// dotfont - Glyph Table Codec
#[derive(Parser)]
#[command(name = "dotfont")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a packed table source back into editable ASCII art
    Extract {
        /// Path to the packed table source (C header)
        packed_table: String,

        /// Path to write the art file
        art_output: String,

        /// Truncate to the shorter length when the lookup string and the
        /// record array disagree, instead of failing
        #[arg(long)]
        lenient: bool,

        /// Output machine-readable JSON result (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compile an art file into a packed glyph table
    Generate {
        /// Path to the art input file
        art_input: String,

        /// Path to write the packed table
        table_output: String,

        /// Output layout
        #[arg(long, default_value = "map", value_parser = ["legacy", "map"])]
        layout: String,

        /// Width policy
        #[arg(long, default_value = "dynamic", value_parser = ["explicit", "dynamic"])]
        width: String,

        /// Output machine-readable JSON result (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            packed_table,
            art_output,
            lenient,
            json,
        } => {
            let policy = if lenient {
                CountPolicy::Lenient
            } else {
                CountPolicy::Strict
            };
            commands::extract::run(&packed_table, &art_output, policy, json)
        }
        Commands::Generate {
            art_input,
            table_output,
            layout,
            width,
            json,
        } => {
            let layout = layout
                .parse::<Layout>()
                .expect("clap should have validated layout");
            let width = width
                .parse::<WidthMode>()
                .expect("clap should have validated width");
            commands::generate::run(&art_input, &table_output, layout, width, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
