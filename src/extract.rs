//! Source-list extraction from cc_builder platform files.
//!
//! A platform file declares its sources as a Rust slice literal:
//!
//! ```text
//! sources: &[
//!     "crypto/fipsmodule/bcm.c",
//!     "generated-src/linux-x86_64/crypto/chacha/chacha-x86_64.S",
//! ],
//! ```
//!
//! [`extract_block`] locates the first such block and returns its quoted
//! tokens. [`SourceBlock::classify`] splits them into compiled and assembly
//! lists. [`extract_sources`] combines both and treats a missing block as two
//! empty lists.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Default prefix prepended to every retained path.
pub const DEFAULT_PATH_PREFIX: &str = "aws-lc/";
/// Default suffix of compiled-language sources.
pub const DEFAULT_COMPILED_SUFFIX: &str = ".c";
/// Default suffix of assembly sources.
pub const DEFAULT_ASSEMBLY_SUFFIX: &str = ".S";

// Matches `sources: &[ ... ],` across lines, stopping at the first `],`.
static SOURCES_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)sources:\s*&\[(.*?)\],").unwrap());

// Matches quoted strings: "crypto/foo.c"
static QUOTED_STRING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no `sources: &[ ... ],` block found")]
    BlockNotFound,
    #[error("unbalanced quotes in sources block ({count} quote characters)")]
    UnbalancedQuotes { count: usize },
}

/// How extracted tokens are classified and rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRules {
    pub path_prefix: String,
    pub compiled_suffix: String,
    pub assembly_suffix: String,
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            compiled_suffix: DEFAULT_COMPILED_SUFFIX.to_string(),
            assembly_suffix: DEFAULT_ASSEMBLY_SUFFIX.to_string(),
        }
    }
}

/// The quoted tokens of a located `sources` block, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBlock {
    pub tokens: Vec<String>,
    /// Number of `"` characters inside the block.
    pub quote_count: usize,
}

impl SourceBlock {
    /// Fails if the block holds an odd number of quote characters.
    pub fn check_quotes(&self) -> Result<(), ExtractError> {
        if self.quote_count % 2 == 0 {
            Ok(())
        } else {
            Err(ExtractError::UnbalancedQuotes {
                count: self.quote_count,
            })
        }
    }

    /// Split tokens into compiled and assembly lists, prefixing each path.
    ///
    /// Tokens matching neither suffix are dropped. Duplicates are kept.
    pub fn classify(&self, rules: &ClassifyRules) -> SourceLists {
        let mut lists = SourceLists::default();

        for token in &self.tokens {
            if token.ends_with(&rules.compiled_suffix) {
                lists
                    .compiled
                    .push(format!("{}{}", rules.path_prefix, token));
            } else if token.ends_with(&rules.assembly_suffix) {
                lists
                    .assembly
                    .push(format!("{}{}", rules.path_prefix, token));
            }
        }

        lists
    }
}

/// Compiled and assembly sources extracted from one platform file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLists {
    pub compiled: Vec<String>,
    pub assembly: Vec<String>,
}

impl SourceLists {
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty() && self.assembly.is_empty()
    }
}

/// Locate the first `sources: &[ ... ],` block and collect its quoted tokens.
pub fn extract_block(content: &str) -> Result<SourceBlock, ExtractError> {
    let captures = SOURCES_BLOCK_REGEX
        .captures(content)
        .ok_or(ExtractError::BlockNotFound)?;
    let body = captures.get(1).map_or("", |m| m.as_str());

    let tokens = QUOTED_STRING_REGEX
        .captures_iter(body)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect();

    Ok(SourceBlock {
        tokens,
        quote_count: body.matches('"').count(),
    })
}

/// Extract and classify sources, yielding empty lists when no block exists.
pub fn extract_sources(content: &str, rules: &ClassifyRules) -> SourceLists {
    match extract_block(content) {
        Ok(block) => block.classify(rules),
        Err(_) => SourceLists::default(),
    }
}
