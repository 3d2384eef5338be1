//! File-backed storage for genome and code texts.
//!
//! Logical names map to paths by convention under a base directory:
//! `<name>.genome` / `<name>.code`, plus a derived-artifact suffix
//! (`.out`, `.scan`) for generated output.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::errors::{GeneticsError, GeneticsResult};
use crate::parser::GenomeSource;

#[derive(Debug, Clone)]
pub struct Storage {
    base_dir: PathBuf,
}

impl Storage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn genome_path(&self, name: &str, suffix: &str) -> PathBuf {
        self.base_dir.join(format!("{}.genome{}", name, suffix))
    }

    pub fn code_path(&self, name: &str, suffix: &str) -> PathBuf {
        self.base_dir.join(format!("{}.code{}", name, suffix))
    }

    pub fn load_genome_text(&self, name: &str) -> GeneticsResult<String> {
        read_text(self.genome_path(name, ""))
    }

    pub fn load_code_text(&self, name: &str) -> GeneticsResult<String> {
        read_text(self.code_path(name, ""))
    }

    #[instrument(skip(self, text))]
    pub fn store_genome_text(
        &self,
        name: &str,
        text: &str,
        suffix: &str,
        append: bool,
    ) -> GeneticsResult<()> {
        write_text(self.genome_path(name, suffix), text, append)
    }

    #[instrument(skip(self, text))]
    pub fn store_code_text(
        &self,
        name: &str,
        text: &str,
        suffix: &str,
        append: bool,
    ) -> GeneticsResult<()> {
        write_text(self.code_path(name, suffix), text, append)
    }
}

impl GenomeSource for Storage {
    fn load_genome_text(&self, name: &str) -> GeneticsResult<String> {
        Storage::load_genome_text(self, name)
    }
}

fn read_text(path: PathBuf) -> GeneticsResult<String> {
    debug!("reading {}", path.display());
    fs::read_to_string(&path)
        .map_err(|e| GeneticsError::io(format!("reading {}", path.display()), e))
}

/// Writes `text` with a trailing newline, creating the parent directory
/// when missing. Append mode attaches to an existing artifact.
fn write_text(path: PathBuf, text: &str, append: bool) -> GeneticsResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| GeneticsError::io(format!("creating {}", parent.display()), e))?;
    }

    let mut options = OpenOptions::new();
    if append {
        options.create(true).append(true);
    } else {
        options.create(true).write(true).truncate(true);
    }
    let mut file = options
        .open(&path)
        .map_err(|e| GeneticsError::io(format!("opening {}", path.display()), e))?;

    writeln!(file, "{}", text)
        .map_err(|e| GeneticsError::io(format!("writing {}", path.display()), e))
}
