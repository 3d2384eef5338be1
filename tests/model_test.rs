//! Tests for the domain model and the phenotype resolver

use std::rc::Rc;

use mendel::errors::GeneticsError;
use mendel::model::{random_genome_code, Gene, GeneCode, Genome, GenomeCode, Slot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};

#[fixture]
fn pea_gene() -> Gene {
    // Classic dominance: A dominant (tall), a recessive (short)
    let mut gene = Gene::new("Height");
    gene.add_allele("A").unwrap();
    gene.add_allele("a").unwrap();
    gene.add_phenotype(Slot::Allele("A".to_string()), Slot::Allele("A".to_string()), "tall")
        .unwrap();
    gene.add_phenotype(Slot::Allele("A".to_string()), Slot::Allele("a".to_string()), "tall")
        .unwrap();
    gene.add_phenotype(Slot::Allele("a".to_string()), Slot::Allele("a".to_string()), "short")
        .unwrap();
    gene
}

#[test]
fn given_gene_when_adding_duplicate_allele_then_fails() {
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();

    let err = gene.add_allele("R").unwrap_err();

    match err {
        GeneticsError::DuplicateAllele { gene, allele } => {
            assert_eq!(gene, "Color");
            assert_eq!(allele, "R");
        }
        other => panic!("expected DuplicateAllele, got {:?}", other),
    }
}

#[test]
fn given_gene_when_adding_distinct_alleles_then_insertion_order_is_kept() {
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();
    gene.add_allele("W").unwrap();

    assert_eq!(gene.alleles, vec!["R", "W"]);
}

#[rstest]
#[case("a", "A", Some("tall"))]
#[case("A", "a", Some("tall"))]
#[case("a", "a", Some("short"))]
#[case("A", "A", Some("tall"))]
#[case("a", "x", None)]
fn given_pea_gene_when_resolving_then_order_independent_first_match(
    pea_gene: Gene,
    #[case] allele1: &str,
    #[case] allele2: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(pea_gene.resolve(allele1, allele2), expected);
}

#[test]
fn given_double_wildcard_rule_when_resolving_then_always_matches() {
    let mut gene = Gene::new("Height");
    gene.add_allele("A").unwrap();
    gene.add_allele("a").unwrap();
    gene.add_phenotype(Slot::Any, Slot::Any, "unconditional").unwrap();

    assert_eq!(gene.resolve("x", "y"), Some("unconditional"));
    assert_eq!(gene.resolve("A", "a"), Some("unconditional"));
}

#[test]
fn given_single_wildcard_rule_when_resolving_then_matches_either_side() {
    // One fully dominant allele modeled with a wildcard slot
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();
    gene.add_allele("w").unwrap();
    gene.add_phenotype(Slot::Allele("R".to_string()), Slot::Any, "red").unwrap();
    gene.add_phenotype(Slot::Allele("w".to_string()), Slot::Allele("w".to_string()), "white")
        .unwrap();

    assert_eq!(gene.resolve("w", "R"), Some("red"));
    assert_eq!(gene.resolve("R", "w"), Some("red"));
    assert_eq!(gene.resolve("w", "w"), Some("white"));
}

#[test]
fn given_rules_when_resolving_then_first_matching_rule_wins() {
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();
    gene.add_phenotype(Slot::Any, Slot::Any, "first").unwrap();
    gene.add_phenotype(Slot::Allele("R".to_string()), Slot::Allele("R".to_string()), "second")
        .unwrap();

    assert_eq!(gene.resolve("R", "R"), Some("first"));
}

#[test]
fn given_phenotype_with_undeclared_allele_when_adding_then_fails() {
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();

    let err = gene
        .add_phenotype(Slot::Allele("R".to_string()), Slot::Allele("W".to_string()), "pink")
        .unwrap_err();

    assert!(matches!(err, GeneticsError::UnknownAllele { .. }));
}

#[test]
fn given_wildcard_slot_when_adding_phenotype_then_exempt_from_allele_check() {
    let mut gene = Gene::new("Color");
    gene.add_allele("R").unwrap();

    gene.add_phenotype(Slot::Any, Slot::Allele("R".to_string()), "red").unwrap();
}

#[test]
fn given_genome_when_adding_duplicate_gene_then_fails() {
    let mut genome = Genome::new("Pea");
    genome.add_gene(Gene::new("Height")).unwrap();

    let err = genome.add_gene(Gene::new("Height")).unwrap_err();

    match err {
        GeneticsError::DuplicateGene { genome, gene } => {
            assert_eq!(genome, "Pea");
            assert_eq!(gene, "Height");
        }
        other => panic!("expected DuplicateGene, got {:?}", other),
    }
}

#[rstest]
fn given_genome_when_finding_gene_then_returns_match_or_none(pea_gene: Gene) {
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();

    assert!(genome.find_gene("Height").is_some());
    assert!(genome.find_gene("Color").is_none());
}

#[rstest]
fn given_genome_code_when_adding_duplicate_gene_code_then_error_names_the_gene(pea_gene: Gene) {
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();
    let genome = Rc::new(genome);

    let mut code = GenomeCode::new("pea01", Rc::clone(&genome));
    code.add_gene_code(GeneCode::new("Height", "A", "a")).unwrap();

    let err = code.add_gene_code(GeneCode::new("Height", "a", "a")).unwrap_err();

    match err {
        GeneticsError::DuplicateGeneCode { code, gene } => {
            assert_eq!(code, "pea01");
            assert_eq!(gene, "Height");
        }
        other => panic!("expected DuplicateGeneCode, got {:?}", other),
    }
}

#[rstest]
fn given_genome_code_when_resolving_then_one_phenotype_per_gene_code(pea_gene: Gene) {
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();
    let genome = Rc::new(genome);

    let mut code = GenomeCode::new("pea01", Rc::clone(&genome));
    code.add_gene_code(GeneCode::new("Height", "a", "A")).unwrap();

    assert_eq!(code.resolve(), vec![Some("tall")]);
}

#[rstest]
fn given_invalid_alleles_when_resolving_then_yields_none_not_error(pea_gene: Gene) {
    // Alleles are not validated at construction; resolution simply fails to match.
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();
    let genome = Rc::new(genome);

    let mut code = GenomeCode::new("pea01", Rc::clone(&genome));
    code.add_gene_code(GeneCode::new("Height", "Z", "Z")).unwrap();

    assert_eq!(code.resolve(), vec![None]);
}

#[test]
fn given_gene_without_alleles_when_generating_random_code_then_empty_gene_error() {
    // A gene with no alleles has nothing to draw from.
    let mut genome = Genome::new("Pea");
    genome.add_gene(Gene::new("Height")).unwrap();
    let genome = Rc::new(genome);
    let mut rng = StdRng::seed_from_u64(1);

    let err = random_genome_code("pea00", &genome, &mut rng).unwrap_err();

    match err {
        GeneticsError::EmptyGene { gene } => assert_eq!(gene, "Height"),
        other => panic!("expected EmptyGene, got {:?}", other),
    }
}

#[rstest]
fn given_genome_when_displaying_then_reproduces_the_text_format(pea_gene: Gene) {
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();

    let rendered = genome.to_string();

    assert!(rendered.starts_with(".genome Pea"));
    assert!(rendered.contains(".gene Height"));
    assert!(rendered.contains(".allele A"));
    assert!(rendered.contains(".fenotipe a a \"short\""));
}

#[rstest]
fn given_genome_code_when_displaying_then_reproduces_the_text_format(pea_gene: Gene) {
    let mut genome = Genome::new("Pea");
    genome.add_gene(pea_gene).unwrap();
    let mut code = GenomeCode::new("pea01", Rc::new(genome));
    code.add_gene_code(GeneCode::new("Height", "A", "a")).unwrap();

    assert_eq!(
        code.to_string(),
        ".code pea01\n.genome Pea\n.gene Height A a"
    );
}
