//! The text transforms a run can apply, and the two literal rewrites that sit
//! beside the cleaner.

use crate::rules::{PruneRules, RewriteRules};

/// A pure text-in, text-out transformation applied to each candidate file
pub trait Transform {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Lowercase extensions (without dot) of the files this transform visits
    fn extensions(&self) -> &[String];

    fn apply(&self, content: &str) -> String;
}

/// Rewrites bare `NSLog(@"` call sites to the project logger
pub struct LogRewriter {
    rules: RewriteRules,
}

impl LogRewriter {
    pub fn new(rules: &RewriteRules) -> Self {
        LogRewriter {
            rules: rules.clone(),
        }
    }
}

impl Transform for LogRewriter {
    fn name(&self) -> &str {
        "rewrite-logs"
    }

    fn extensions(&self) -> &[String] {
        &self.rules.extensions
    }

    fn apply(&self, content: &str) -> String {
        if self.rules.from.is_empty() {
            return content.to_string();
        }
        content.replace(&self.rules.from, &self.rules.to)
    }
}

/// Deletes known boilerplate documentation blocks verbatim
pub struct DocBlockPruner {
    rules: PruneRules,
}

impl DocBlockPruner {
    pub fn new(rules: &PruneRules) -> Self {
        DocBlockPruner {
            rules: rules.clone(),
        }
    }
}

impl Transform for DocBlockPruner {
    fn name(&self) -> &str {
        "prune-docs"
    }

    fn extensions(&self) -> &[String] {
        &self.rules.extensions
    }

    fn apply(&self, content: &str) -> String {
        self.rules
            .blocks
            .iter()
            .filter(|block| !block.is_empty())
            .fold(content.to_string(), |text, block| text.replace(block.as_str(), ""))
    }
}
