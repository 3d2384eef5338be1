//! Mendelian genetics toolkit.
//!
//! Defines a small text format for genomes (named genes with alleles and
//! phenotype rules) and genetic codes (concrete diploid allele
//! assignments), parses both dialects, and resolves codes to phenotypes.
//!
//! Pipeline: raw text → [`lexer::scan`] → tokens → [`parser`] → model
//! instance → [`model::GenomeCode::resolve`] → phenotypes.

use std::rc::Rc;

pub mod cli;
pub mod errors;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod storage;
pub mod util;

use errors::GeneticsResult;
use model::{Genome, GenomeCode};
use parser::{parse_code, parse_genome, GenomeRegistry};
use storage::Storage;

/// Read and parse `<name>.genome` from storage, registering the result.
pub fn read_genome(
    storage: &Storage,
    registry: &mut GenomeRegistry,
    name: &str,
) -> GeneticsResult<Rc<Genome>> {
    let text = storage.load_genome_text(name)?;
    let tokens = lexer::scan(&text)?;
    parse_genome(&tokens, registry)
}

/// Read and parse `<name>.code` from storage. The referenced genome is
/// taken from the registry, or loaded through storage on a miss.
pub fn read_code(
    storage: &Storage,
    registry: &mut GenomeRegistry,
    name: &str,
) -> GeneticsResult<GenomeCode> {
    let text = storage.load_code_text(name)?;
    let tokens = lexer::scan(&text)?;
    parse_code(&tokens, registry, storage)
}
