//! Candidate file discovery under a target root.

use crate::rules::{extension_of, Rules, SourceCategory};

use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A file selected for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// None when the extension belongs to a task but to no clean category
    pub category: Option<SourceCategory>,
}

/// True when any directory name in `relative` is one of `excludes`
pub fn is_excluded_dir(relative: &Path, excludes: &[String]) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => excludes.iter().any(|exclude| name == exclude.as_str()),
        _ => false,
    })
}

/// Recursive walker restricted to a set of extensions
pub struct Walker<'a> {
    root: PathBuf,
    extensions: &'a [String],
    rules: &'a Rules,
}

impl<'a> Walker<'a> {
    pub fn new(root: &Path, extensions: &'a [String], rules: &'a Rules) -> Self {
        Walker {
            root: root.to_path_buf(),
            extensions,
            rules,
        }
    }

    /// Lazily yield candidate files in file-name order.
    /// A missing root, or one that is not a directory, yields nothing.
    pub fn files(&self) -> impl Iterator<Item = SourceFile> + 'a {
        let extensions = self.extensions;
        let rules = self.rules;
        let root = self.root.clone();
        let exclude = rules.exclude_dirs.clone();

        let walker = self.root.is_dir().then(|| {
            WalkBuilder::new(&self.root)
                .hidden(false)
                // Only the configured excludes apply; ignore files are not consulted
                .git_ignore(false)
                .ignore(false)
                .git_global(false)
                .git_exclude(false)
                .parents(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .filter_entry(move |entry| {
                    let path = entry.path();
                    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        // Match below the root only, so a root named "build" still works
                        let relative = path.strip_prefix(&root).unwrap_or(path);
                        if is_excluded_dir(relative, &exclude) {
                            debug!("Skipping excluded directory: {}", path.display());
                            return false;
                        }
                    }
                    true
                })
                .build()
        });

        walker
            .into_iter()
            .flatten()
            .filter_map(move |result| {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!("Failed to access entry: {}", err);
                        return None;
                    }
                };

                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return None;
                }

                let path = entry.into_path();
                let ext = extension_of(&path)?;
                if !extensions.contains(&ext) {
                    return None;
                }

                debug!("Candidate: {}", path.display());
                Some(SourceFile {
                    category: rules.category_for(&path),
                    path,
                })
            })
    }
}
