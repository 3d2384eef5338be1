//! Error taxonomy for lexing, parsing, model construction and storage.

use thiserror::Error;

/// Errors raised by the genetics core and its storage collaborator.
/// All of these propagate uncaught to the caller; there is no local
/// recovery anywhere in the core. A failed phenotype resolution is NOT
/// an error, it is a `None` result.
#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("unexpected character '{fragment}' in line {line}")]
    Syntax { fragment: String, line: usize },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },

    #[error("gene '{gene}' already has allele '{allele}'")]
    DuplicateAllele { gene: String, allele: String },

    #[error("genome '{genome}' already has gene '{gene}'")]
    DuplicateGene { genome: String, gene: String },

    #[error("genome code '{code}' already has a gene code for '{gene}'")]
    DuplicateGeneCode { code: String, gene: String },

    #[error("'{allele}' is not in the allele list of gene '{gene}'")]
    UnknownAllele { gene: String, allele: String },

    #[error("genome '{genome}' has no gene '{gene}'")]
    UnknownGene { genome: String, gene: String },

    #[error("cannot generate a code for gene '{gene}': no alleles declared")]
    EmptyGene { gene: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl GeneticsError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type GeneticsResult<T> = Result<T, GeneticsError>;
