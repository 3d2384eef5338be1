//! Command execution: thin orchestration over the core and storage.

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::errors::GeneticsResult;
use crate::lexer::scan;
use crate::model::{random_genome_code, GenomeCode};
use crate::parser::{parse_genome, GenomeRegistry};
use crate::storage::Storage;
use crate::{read_code, read_genome};

pub fn execute_command(cli: &Cli) -> GeneticsResult<()> {
    let storage = Storage::new(&cli.files_dir);
    match &cli.command {
        Some(Commands::Genome { name, count }) => _genome(&storage, name, *count),
        Some(Commands::Scan { name }) => _scan(&storage, name),
        Some(Commands::Code { name }) => _code(&storage, name),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Parse `<name>.genome`, write it back as `.genome.out`, then generate
/// `count` random codes `name00..`, each stored, re-read through the
/// parser, and stored again as `.code.out` with its phenotypes appended.
#[instrument(skip(storage))]
fn _genome(storage: &Storage, name: &str, count: usize) -> GeneticsResult<()> {
    let mut registry = GenomeRegistry::new();
    let genome = read_genome(storage, &mut registry, name)?;
    storage.store_genome_text(name, &genome.to_string(), ".out", false)?;

    let mut rng = rand::thread_rng();
    for i in 0..count {
        let code_name = format!("{}{:02}", name, i);
        let random_code = random_genome_code(&code_name, &genome, &mut rng)?;
        storage.store_code_text(&code_name, &random_code.to_string(), "", false)?;

        // Round-trip through the text format before resolving.
        let code = read_code(storage, &mut registry, &code_name)?;
        write_resolved(storage, &code)?;
    }
    debug!("generated {} codes for genome '{}'", count, name);
    Ok(())
}

/// Lex `<name>.genome` into a `KIND value` report (`.genome.scan`), then
/// parse it and write the rendered genome to `.genome.out`.
#[instrument(skip(storage))]
fn _scan(storage: &Storage, name: &str) -> GeneticsResult<()> {
    let text = storage.load_genome_text(name)?;
    let tokens = scan(&text)?;

    let report = tokens
        .iter()
        .map(|t| format!("{} {}", t.kind(), t))
        .collect::<Vec<_>>()
        .join("\n");
    storage.store_genome_text(name, &report, ".scan", false)?;

    let mut registry = GenomeRegistry::new();
    let genome = parse_genome(&tokens, &mut registry)?;
    storage.store_genome_text(name, &genome.to_string(), ".out", false)
}

/// Read `<name>.code` and write `.code.out` with phenotypes appended.
#[instrument(skip(storage))]
fn _code(storage: &Storage, name: &str) -> GeneticsResult<()> {
    let mut registry = GenomeRegistry::new();
    let code = read_code(storage, &mut registry, name)?;
    write_resolved(storage, &code)
}

fn write_resolved(storage: &Storage, code: &GenomeCode) -> GeneticsResult<()> {
    storage.store_code_text(&code.name, &code.to_string(), ".out", false)?;
    storage.store_code_text(&code.name, &format!("\n{}", render_phenotypes(code)), ".out", true)
}

/// One line per gene code; an unmatched configuration renders as `none`.
fn render_phenotypes(code: &GenomeCode) -> String {
    code.resolve()
        .iter()
        .map(|p| p.unwrap_or("none"))
        .collect::<Vec<_>>()
        .join("\n")
}
