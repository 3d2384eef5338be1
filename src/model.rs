//! Domain model: genes, genomes, and their concrete "code" instances.
//!
//! A [`Genome`] owns its [`Gene`]s, a gene owns its alleles and
//! [`Phenotype`] rules. [`GenomeCode`] / [`GeneCode`] are instances of a
//! genome: a concrete diploid allele assignment per gene. Codes reference
//! genes by name and share the genome via `Rc`; they never own it.

use std::fmt;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{GeneticsError, GeneticsResult};

/// One slot of a phenotype rule: a concrete allele or the `@` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Matches any allele ("don't care").
    Any,
    /// Matches the named allele.
    Allele(String),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Any => write!(f, "@"),
            Slot::Allele(name) => write!(f, "{}", name),
        }
    }
}

/// A phenotype rule: a pair of allele slots and the observable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phenotype {
    pub slots: (Slot, Slot),
    pub output: String,
}

impl Phenotype {
    pub fn new(slot1: Slot, slot2: Slot, output: impl Into<String>) -> Self {
        Self {
            slots: (slot1, slot2),
            output: output.into(),
        }
    }

    /// Whether this rule applies to the given diploid configuration.
    ///
    /// Two wildcards match unconditionally; one wildcard matches if either
    /// query allele equals the concrete slot; two concrete slots match the
    /// unordered allele pair.
    pub fn matches(&self, allele1: &str, allele2: &str) -> bool {
        match (&self.slots.0, &self.slots.1) {
            (Slot::Any, Slot::Any) => true,
            (Slot::Allele(a), Slot::Any) | (Slot::Any, Slot::Allele(a)) => {
                allele1 == a || allele2 == a
            }
            (Slot::Allele(a), Slot::Allele(b)) => {
                (allele1 == a && allele2 == b) || (allele1 == b && allele2 == a)
            }
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ".fenotipe {} {} \"{}\"",
            self.slots.0, self.slots.1, self.output
        )
    }
}

/// A named trait definition: its alleles and phenotype rules, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    pub name: String,
    pub alleles: Vec<String>,
    pub phenotypes: Vec<Phenotype>,
}

impl Gene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alleles: Vec::new(),
            phenotypes: Vec::new(),
        }
    }

    /// Append an allele. Duplicates within a gene are rejected.
    pub fn add_allele(&mut self, allele: impl Into<String>) -> GeneticsResult<()> {
        let allele = allele.into();
        if self.alleles.contains(&allele) {
            return Err(GeneticsError::DuplicateAllele {
                gene: self.name.clone(),
                allele,
            });
        }
        self.alleles.push(allele);
        Ok(())
    }

    /// Append a phenotype rule. Concrete slots must name a declared
    /// allele; wildcards are exempt.
    pub fn add_phenotype(
        &mut self,
        slot1: Slot,
        slot2: Slot,
        output: impl Into<String>,
    ) -> GeneticsResult<()> {
        for slot in [&slot1, &slot2] {
            if let Slot::Allele(allele) = slot {
                if !self.alleles.contains(allele) {
                    return Err(GeneticsError::UnknownAllele {
                        gene: self.name.clone(),
                        allele: allele.clone(),
                    });
                }
            }
        }
        self.phenotypes.push(Phenotype::new(slot1, slot2, output));
        Ok(())
    }

    /// Resolve a diploid configuration to its phenotype output.
    ///
    /// Rules are evaluated in insertion order, first match wins; `None`
    /// means no rule applies. Dominance hierarchies are expressed by rule
    /// order (wildcard rule for the dominant allele first, specific pairs
    /// after).
    pub fn resolve(&self, allele1: &str, allele2: &str) -> Option<&str> {
        self.phenotypes
            .iter()
            .find(|p| p.matches(allele1, allele2))
            .map(|p| p.output.as_str())
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".gene {}", self.name)?;
        for allele in &self.alleles {
            write!(f, "\n.allele {}", allele)?;
        }
        for phenotype in &self.phenotypes {
            write!(f, "\n{}", phenotype)?;
        }
        Ok(())
    }
}

/// An ordered collection of genes: the full genetic schema of a being.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    pub name: String,
    pub genes: Vec<Gene>,
}

impl Genome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genes: Vec::new(),
        }
    }

    /// Append a gene. Gene names are unique within a genome.
    pub fn add_gene(&mut self, gene: Gene) -> GeneticsResult<()> {
        if self.find_gene(&gene.name).is_some() {
            return Err(GeneticsError::DuplicateGene {
                genome: self.name.clone(),
                gene: gene.name,
            });
        }
        self.genes.push(gene);
        Ok(())
    }

    pub fn find_gene(&self, name: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.name == name)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".genome {}", self.name)?;
        for gene in &self.genes {
            write!(f, "\n\n{}", gene)?;
        }
        Ok(())
    }
}

/// A concrete diploid configuration for one gene of a genome.
///
/// References the gene by name. The alleles are NOT validated against the
/// gene's allele list; an allele no rule covers simply resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneCode {
    pub gene: String,
    pub allele1: String,
    pub allele2: String,
}

impl GeneCode {
    pub fn new(
        gene: impl Into<String>,
        allele1: impl Into<String>,
        allele2: impl Into<String>,
    ) -> Self {
        Self {
            gene: gene.into(),
            allele1: allele1.into(),
            allele2: allele2.into(),
        }
    }

    /// Resolve this configuration against the owning genome.
    pub fn resolve<'a>(&self, genome: &'a Genome) -> Option<&'a str> {
        genome
            .find_gene(&self.gene)?
            .resolve(&self.allele1, &self.allele2)
    }
}

impl fmt::Display for GeneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".gene {} {} {}", self.gene, self.allele1, self.allele2)
    }
}

/// A named instance of a genome: one [`GeneCode`] per gene.
///
/// Holds the parsed genome via `Rc`; the genome is owned by the registry,
/// never by its codes.
#[derive(Debug, Clone)]
pub struct GenomeCode {
    pub name: String,
    pub genome: Rc<Genome>,
    pub gene_codes: Vec<GeneCode>,
}

impl GenomeCode {
    pub fn new(name: impl Into<String>, genome: Rc<Genome>) -> Self {
        Self {
            name: name.into(),
            genome,
            gene_codes: Vec::new(),
        }
    }

    /// Append a gene code. At most one configuration per gene name.
    pub fn add_gene_code(&mut self, gene_code: GeneCode) -> GeneticsResult<()> {
        if self.gene_codes.iter().any(|g| g.gene == gene_code.gene) {
            return Err(GeneticsError::DuplicateGeneCode {
                code: self.name.clone(),
                gene: gene_code.gene,
            });
        }
        self.gene_codes.push(gene_code);
        Ok(())
    }

    /// Resolve every gene code in order. `None` entries mean no phenotype
    /// rule matched that configuration.
    pub fn resolve(&self) -> Vec<Option<&str>> {
        self.gene_codes
            .iter()
            .map(|g| g.resolve(&self.genome))
            .collect()
    }
}

impl fmt::Display for GenomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".code {}\n.genome {}", self.name, self.genome.name)?;
        for gene_code in &self.gene_codes {
            write!(f, "\n{}", gene_code)?;
        }
        Ok(())
    }
}

/// Draw a random diploid configuration for one gene, each allele chosen
/// uniformly from the gene's allele list.
pub fn random_gene_code(gene: &Gene, rng: &mut impl Rng) -> GeneticsResult<GeneCode> {
    let allele1 = gene
        .alleles
        .choose(rng)
        .ok_or_else(|| GeneticsError::EmptyGene {
            gene: gene.name.clone(),
        })?
        .clone();
    let allele2 = gene
        .alleles
        .choose(rng)
        .ok_or_else(|| GeneticsError::EmptyGene {
            gene: gene.name.clone(),
        })?
        .clone();
    Ok(GeneCode::new(&gene.name, allele1, allele2))
}

/// Build a random [`GenomeCode`] covering every gene of the genome.
pub fn random_genome_code(
    name: impl Into<String>,
    genome: &Rc<Genome>,
    rng: &mut impl Rng,
) -> GeneticsResult<GenomeCode> {
    let mut code = GenomeCode::new(name, Rc::clone(genome));
    for gene in &genome.genes {
        let gene_code = random_gene_code(gene, rng)?;
        code.add_gene_code(gene_code)?;
    }
    Ok(code)
}
