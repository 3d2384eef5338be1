//! Parsers for the two file dialects, plus the genome registry.
//!
//! Both entry points consume the token sequence left to right through an
//! index-based cursor. The grammar is flat: a dispatch loop keyed on the
//! next command token, with the current gene as the only carried state.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::errors::{GeneticsError, GeneticsResult};
use crate::lexer::{scan, Token};
use crate::model::{Gene, GeneCode, Genome, GenomeCode, Slot};

/// Collaborator that fetches genome definition text by logical name.
///
/// Implemented by the storage layer; tests substitute their own doubles.
pub trait GenomeSource {
    fn load_genome_text(&self, name: &str) -> GeneticsResult<String>;
}

/// Cache of parsed genomes, keyed by genome name.
///
/// Populated on every successful genome parse, never evicted during a
/// run. Owned by the orchestration layer and passed through the parsing
/// calls; there is no hidden global.
#[derive(Debug, Default)]
pub struct GenomeRegistry {
    genomes: HashMap<String, Rc<Genome>>,
}

impl GenomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Rc<Genome>> {
        self.genomes.get(name).cloned()
    }

    /// Register a genome, overwriting any prior entry of the same name.
    pub fn insert(&mut self, genome: Genome) -> Rc<Genome> {
        let genome = Rc::new(genome);
        self.genomes
            .insert(genome.name.clone(), Rc::clone(&genome));
        genome
    }

    /// Fetch a genome by name, loading and parsing it via `source` on a
    /// registry miss.
    pub fn resolve(
        &mut self,
        name: &str,
        source: &dyn GenomeSource,
    ) -> GeneticsResult<Rc<Genome>> {
        if let Some(genome) = self.get(name) {
            debug!("registry hit: {}", name);
            return Ok(genome);
        }
        let text = source.load_genome_text(name)?;
        let tokens = scan(&text)?;
        parse_genome(&tokens, self)
    }
}

/// Index-based cursor over the token sequence.
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(&mut self, expected: &str) -> GeneticsResult<&'a Token> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| GeneticsError::UnexpectedEof {
                expected: expected.to_string(),
            })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect_command(&mut self, keyword: &str) -> GeneticsResult<()> {
        let expected = format!(".{}", keyword);
        match self.next(&expected)? {
            Token::Command(name) if name == keyword => Ok(()),
            other => Err(unexpected(expected, other)),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> GeneticsResult<&'a str> {
        match self.next(expected)? {
            Token::Ident(name) => Ok(name),
            other => Err(unexpected(expected, other)),
        }
    }

    fn expect_slot(&mut self, expected: &str) -> GeneticsResult<Slot> {
        match self.next(expected)? {
            Token::Ident(name) => Ok(Slot::Allele(name.clone())),
            Token::Wildcard => Ok(Slot::Any),
            other => Err(unexpected(expected, other)),
        }
    }

    fn expect_string(&mut self, expected: &str) -> GeneticsResult<&'a str> {
        match self.next(expected)? {
            Token::Str(text) => Ok(text),
            other => Err(unexpected(expected, other)),
        }
    }
}

fn unexpected(expected: impl Into<String>, found: &Token) -> GeneticsError {
    GeneticsError::UnexpectedToken {
        expected: expected.into(),
        found: format!("{} '{}'", found.kind(), found),
    }
}

/// Parse a `.genome` token sequence into a [`Genome`] and register it.
///
/// Grammar: `.genome ID (.gene ID (.allele ID)* (.fenotipe (ID|@) (ID|@) STRING)*)*`.
/// The most recent `.gene` is the target of subsequent `.allele` and
/// `.fenotipe` commands; either of those before any `.gene` is a syntax
/// error. On success the genome is registered under its name, replacing
/// any prior entry.
#[instrument(skip_all)]
pub fn parse_genome(
    tokens: &[Token],
    registry: &mut GenomeRegistry,
) -> GeneticsResult<Rc<Genome>> {
    let mut cursor = Cursor::new(tokens);
    cursor.expect_command("genome")?;
    let mut genome = Genome::new(cursor.expect_ident("a genome name")?);

    while !cursor.is_done() {
        let expected = ".gene, .allele or .fenotipe";
        match cursor.next(expected)? {
            Token::Command(c) if c == "gene" => {
                let gene_name = cursor.expect_ident("a gene name")?;
                genome.add_gene(Gene::new(gene_name))?;
            }
            Token::Command(c) if c == "allele" => {
                let allele = cursor.expect_ident("an allele name")?;
                let gene = current_gene(&mut genome, ".allele")?;
                gene.add_allele(allele)?;
            }
            Token::Command(c) if c == "fenotipe" => {
                let slot1 = cursor.expect_slot("an allele name or @")?;
                let slot2 = cursor.expect_slot("an allele name or @")?;
                let output = cursor.expect_string("a fenotipe output string")?;
                let gene = current_gene(&mut genome, ".fenotipe")?;
                gene.add_phenotype(slot1, slot2, output)?;
            }
            other => return Err(unexpected(expected, other)),
        }
    }

    debug!(genome = %genome.name, genes = genome.genes.len(), "parsed genome");
    Ok(registry.insert(genome))
}

fn current_gene<'a>(genome: &'a mut Genome, command: &str) -> GeneticsResult<&'a mut Gene> {
    genome
        .genes
        .last_mut()
        .ok_or_else(|| GeneticsError::UnexpectedToken {
            expected: ".gene".to_string(),
            found: format!("COMMAND '{}'", command),
        })
}

/// Parse a `.code` token sequence into a [`GenomeCode`].
///
/// Grammar: `.code ID .genome ID (.gene ID ID ID)*`. The referenced
/// genome is taken from the registry, loading it through `source` when
/// absent. Every `.gene` line must name a gene of that genome. The
/// resulting code is returned without being registered anywhere.
#[instrument(skip_all)]
pub fn parse_code(
    tokens: &[Token],
    registry: &mut GenomeRegistry,
    source: &dyn GenomeSource,
) -> GeneticsResult<GenomeCode> {
    let mut cursor = Cursor::new(tokens);
    cursor.expect_command("code")?;
    let code_name = cursor.expect_ident("a code name")?;
    cursor.expect_command("genome")?;
    let genome_name = cursor.expect_ident("a genome name")?;

    let genome = registry.resolve(genome_name, source)?;
    let mut code = GenomeCode::new(code_name, genome);

    while !cursor.is_done() {
        cursor.expect_command("gene")?;
        let gene_name = cursor.expect_ident("a gene name")?;
        if code.genome.find_gene(gene_name).is_none() {
            return Err(GeneticsError::UnknownGene {
                genome: code.genome.name.clone(),
                gene: gene_name.to_string(),
            });
        }
        let allele1 = cursor.expect_ident("an allele name")?;
        let allele2 = cursor.expect_ident("an allele name")?;
        code.add_gene_code(GeneCode::new(gene_name, allele1, allele2))?;
    }

    debug!(code = %code.name, genes = code.gene_codes.len(), "parsed genome code");
    Ok(code)
}
