//! Command implementations for the dotfont CLI.

pub mod extract;
pub mod generate;
pub mod json_output;
