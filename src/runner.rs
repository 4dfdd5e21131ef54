//! Sequential driver: walk, transform, then write or report each file.

use crate::rules::{Rules, SourceCategory};
use crate::transform::Transform;
use crate::walker::{SourceFile, Walker};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use humansize::{format_size, BINARY};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file whose content the transform changed
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub category: Option<SourceCategory>,
    pub original_size: u64,
    pub cleaned_size: u64,
}

/// Totals printed at the end of a run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub changed: usize,
    pub errors: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub by_category: BTreeMap<Option<SourceCategory>, usize>,
}

impl RunSummary {
    fn record(&mut self, change: &FileChange) {
        self.changed += 1;
        self.bytes_before += change.original_size;
        self.bytes_after += change.cleaned_size;
        *self.by_category.entry(change.category).or_insert(0) += 1;
    }
}

/// Runs one transform over every candidate file under a root
pub struct Runner {
    root: PathBuf,
    dry_run: bool,
}

impl Runner {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Runner {
            root: root.to_path_buf(),
            dry_run,
        }
    }

    /// Process every candidate file. Per-file failures are reported and
    /// skipped; only a missing or non-directory root is an error.
    pub fn run(&self, rules: &Rules, transform: &dyn Transform) -> Result<RunSummary> {
        if !self.root.exists() {
            bail!("Target directory {} does not exist.", self.root.display());
        }
        if !self.root.is_dir() {
            bail!("Target {} is not a directory.", self.root.display());
        }

        if self.dry_run {
            println!("{}", "DRY RUN MODE: No files will be modified.".bold().yellow());
        } else {
            println!("{}", "REAL RUN: Files will be modified.".bold().red());
        }
        println!("Targeting: {}", self.root.display());
        println!("Press Ctrl+C to abort.");

        debug!(
            "Running {} over extensions {:?}",
            transform.name(),
            transform.extensions()
        );

        let mut summary = RunSummary::default();
        let walker = Walker::new(&self.root, transform.extensions(), rules);

        for file in walker.files() {
            match self.process_file(&file, transform) {
                Ok(Some(change)) => {
                    let shown = self.relative(&change.path);
                    if self.dry_run {
                        println!("[DRY RUN] Would clean: {}", shown.display());
                    } else {
                        println!("Cleaned: {}", shown.display());
                    }
                    summary.record(&change);
                }
                Ok(None) => {
                    debug!("Unchanged: {}", file.path.display());
                }
                Err(err) => {
                    println!("Error processing {}: {:#}", file.path.display(), err);
                    summary.errors += 1;
                }
            }
        }

        self.print_summary(rules, &summary);
        Ok(summary)
    }

    /// Read, transform and (outside dry runs) overwrite a single file.
    /// Returns None when the transform leaves the text as it was.
    pub fn process_file(
        &self,
        file: &SourceFile,
        transform: &dyn Transform,
    ) -> Result<Option<FileChange>> {
        let content = fs::read_to_string(&file.path)
            .with_context(|| format!("Failed to read {}", file.path.display()))?;

        let cleaned = transform.apply(&content);
        if cleaned == content {
            return Ok(None);
        }

        if !self.dry_run {
            fs::write(&file.path, &cleaned)
                .with_context(|| format!("Failed to write {}", file.path.display()))?;
        }

        Ok(Some(FileChange {
            path: file.path.clone(),
            category: file.category,
            original_size: content.len() as u64,
            cleaned_size: cleaned.len() as u64,
        }))
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn print_summary(&self, rules: &Rules, summary: &RunSummary) {
        let action = if self.dry_run { "Would clean" } else { "Cleaned" };

        println!();
        println!(
            "{}",
            format!("Total files: {} ({})", summary.changed, action).bold()
        );

        for (category, count) in &summary.by_category {
            let name = match category {
                Some(category) => rules.category_name(*category),
                None => "Other",
            };
            println!("  - {}: {}", name, count);
        }

        if summary.changed > 0 {
            println!(
                "  {}",
                format!(
                    "Size: {} -> {}",
                    format_size(summary.bytes_before, BINARY),
                    format_size(summary.bytes_after, BINARY)
                )
                .green()
            );
        }

        if summary.errors > 0 {
            println!("{}", format!("Errors: {}", summary.errors).red());
        }
    }
}
