//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Mendelian genetics toolkit: genome definitions, random genetic codes, phenotype resolution
#[derive(Parser, Debug)]
#[command(name = "mendel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (repeat for more: -d -d ...)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Storage directory for .genome/.code files
    #[arg(long, global = true, default_value = "files")]
    pub files_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a genome and generate random codes with resolved phenotypes
    Genome {
        /// Logical genome name (reads <name>.genome)
        name: String,

        /// Number of random codes to generate
        #[arg(short, long, default_value_t = 15)]
        count: usize,
    },

    /// Lex a genome file and write a token report next to it
    Scan {
        /// Logical genome name (reads <name>.genome)
        name: String,
    },

    /// Resolve an existing code file against its genome
    Code {
        /// Logical code name (reads <name>.code)
        name: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
