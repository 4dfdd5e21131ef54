//! Rule loading from rules.toml: extension sets, excluded directories and the
//! logging-call patterns stripped by the cleaner.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Source category derived from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceCategory {
    Apple,   // Swift and Objective-C sources
    Android, // Kotlin and Java sources
    Web,     // TypeScript and JavaScript sources
}

/// Structure to deserialize rules from TOML
#[derive(Debug, Deserialize)]
struct RulesConfig {
    walk: WalkConfig,
    clean: CleanConfig,
    rewrite_logs: RewriteConfig,
    prune_docs: PruneConfig,
}

#[derive(Debug, Deserialize)]
struct WalkConfig {
    #[serde(default)]
    exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CleanConfig {
    apple: CategoryConfig,
    android: CategoryConfig,
    web: CategoryConfig,
}

#[derive(Debug, Deserialize)]
struct CategoryConfig {
    name: String,
    extensions: Vec<String>,
    #[serde(default)]
    logs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RewriteConfig {
    extensions: Vec<String>,
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct PruneConfig {
    extensions: Vec<String>,
    #[serde(default)]
    blocks: Vec<String>,
}

// Embed the TOML file directly in the binary at compile time
const RULES_TOML: &str = include_str!("../rules.toml");

/// Extensions and logging patterns for one source category
#[derive(Debug, Clone)]
pub struct CategoryRules {
    pub category: SourceCategory,
    /// Display name used in reports (e.g., "iOS", "TS/JS")
    pub name: String,
    /// Lowercase extensions without the leading dot
    pub extensions: Vec<String>,
    pub log_patterns: Vec<Regex>,
}

/// Literal token replacement applied by `rewrite-logs`
#[derive(Debug, Clone)]
pub struct RewriteRules {
    pub extensions: Vec<String>,
    pub from: String,
    pub to: String,
}

/// Boilerplate documentation blocks removed by `prune-docs`
#[derive(Debug, Clone)]
pub struct PruneRules {
    pub extensions: Vec<String>,
    pub blocks: Vec<String>,
}

/// Complete rule set handed to the walker and the transforms
#[derive(Debug, Clone)]
pub struct Rules {
    /// Directory names whose subtrees are never visited
    pub exclude_dirs: Vec<String>,
    /// Categories in fixed order: Apple, Android, Web
    pub categories: Vec<CategoryRules>,
    pub rewrite_logs: RewriteRules,
    pub prune_docs: PruneRules,
}

impl Rules {
    /// Load the rules compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(RULES_TOML).context("Failed to parse embedded rules.toml")
    }

    /// Load rules from a TOML file with the same layout as the embedded one
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RulesConfig = toml::from_str(text)?;

        let categories = vec![
            compile_category(SourceCategory::Apple, config.clean.apple)?,
            compile_category(SourceCategory::Android, config.clean.android)?,
            compile_category(SourceCategory::Web, config.clean.web)?,
        ];

        Ok(Rules {
            exclude_dirs: config.walk.exclude,
            categories,
            rewrite_logs: RewriteRules {
                extensions: normalize_extensions(config.rewrite_logs.extensions),
                from: config.rewrite_logs.from,
                to: config.rewrite_logs.to,
            },
            prune_docs: PruneRules {
                extensions: normalize_extensions(config.prune_docs.extensions),
                blocks: config.prune_docs.blocks,
            },
        })
    }

    /// Map a path to its source category by extension (case-insensitive)
    pub fn category_for(&self, path: &Path) -> Option<SourceCategory> {
        let ext = extension_of(path)?;
        self.categories
            .iter()
            .find(|c| c.extensions.contains(&ext))
            .map(|c| c.category)
    }

    /// Report name of a category as configured
    pub fn category_name(&self, category: SourceCategory) -> &str {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.name.as_str())
            .unwrap_or("other")
    }

    /// Union of all category extensions, the candidate set for `clean`
    pub fn clean_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .categories
            .iter()
            .flat_map(|c| c.extensions.iter().cloned())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// All logging patterns, platform by platform
    pub fn log_patterns(&self) -> impl Iterator<Item = &Regex> {
        self.categories.iter().flat_map(|c| c.log_patterns.iter())
    }
}

fn compile_category(category: SourceCategory, config: CategoryConfig) -> Result<CategoryRules> {
    let log_patterns = config
        .logs
        .iter()
        .map(|pattern| {
            // Logging calls may wrap their arguments over several lines
            Regex::new(&format!("(?s){}", pattern))
                .with_context(|| format!("Invalid log pattern for {}: {}", config.name, pattern))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CategoryRules {
        category,
        name: config.name,
        extensions: normalize_extensions(config.extensions),
        log_patterns,
    })
}

/// Lowercase and strip a leading dot so ".TS" and "ts" compare equal
fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect()
}

/// Lowercase extension of a path without the leading dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
