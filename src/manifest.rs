//! Builds a [`SourceManifest`] from the configured cc_builder platform files.
//!
//! Platform files are read one at a time, in configuration order. The
//! universal (compiled) list always comes from the first platform; later
//! platforms are only compared against it according to the configured
//! [`DivergencePolicy`].

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, DivergencePolicy, PlatformConfig};
use crate::extract::{ClassifyRules, ExtractError, SourceLists, extract_block};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid sources block in {}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error(
        "Compiled sources of {platform} differ from {reference} ({added} added, {missing} missing)"
    )]
    Divergence {
        platform: String,
        reference: String,
        added: usize,
        missing: usize,
    },
}

/// A named list declaration in the generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedList {
    pub name: String,
    pub sources: Vec<String>,
}

/// Everything the renderer needs, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceManifest {
    pub header: String,
    pub universal: NamedList,
    pub platforms: Vec<NamedList>,
    /// Names of lists that are always emitted empty.
    pub placeholders: Vec<String>,
}

/// What extraction found in one platform file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSummary {
    pub name: String,
    pub path: PathBuf,
    /// False when the file had no `sources` block.
    pub block_found: bool,
    pub compiled_count: usize,
    pub assembly_count: usize,
    /// True when the compiled list differs from the first platform's.
    pub diverged: bool,
}

#[derive(Debug)]
pub struct ManifestBuild {
    pub manifest: SourceManifest,
    pub summaries: Vec<PlatformSummary>,
}

/// Read every configured platform file under `root` and assemble the manifest.
pub fn build_manifest(root: &Path, config: &Config) -> Result<ManifestBuild, ManifestError> {
    let rules = config.classify_rules();
    let mut universal: Option<(String, Vec<String>)> = None;
    let mut platforms = Vec::with_capacity(config.platforms.len());
    let mut summaries = Vec::with_capacity(config.platforms.len());

    for platform in &config.platforms {
        let path = config.platform_path(root, platform);
        debug!(platform = %platform.name, path = %path.display(), "reading cc_builder file");

        let content = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        let (lists, block_found) = extract_platform(&content, &path, &rules, config.strict)?;

        let diverged = match &universal {
            Some((reference, compiled)) => {
                check_divergence(platform, reference, compiled, &lists.compiled, config.divergence)?
            }
            None => false,
        };
        if universal.is_none() {
            universal = Some((platform.name.clone(), lists.compiled.clone()));
        }

        debug!(
            platform = %platform.name,
            compiled = lists.compiled.len(),
            assembly = lists.assembly.len(),
            "extracted sources"
        );

        summaries.push(PlatformSummary {
            name: platform.name.clone(),
            path,
            block_found,
            compiled_count: lists.compiled.len(),
            assembly_count: lists.assembly.len(),
            diverged,
        });
        platforms.push(NamedList {
            name: platform.name.clone(),
            sources: lists.assembly,
        });
    }

    let (_, universal_sources) = universal.unwrap_or_default();

    Ok(ManifestBuild {
        manifest: SourceManifest {
            header: config.header.clone(),
            universal: NamedList {
                name: config.universal_name.clone(),
                sources: universal_sources,
            },
            platforms,
            placeholders: config.placeholders.clone(),
        },
        summaries,
    })
}

/// Extract one platform file. Lenient mode turns a missing block into empty lists.
fn extract_platform(
    content: &str,
    path: &Path,
    rules: &ClassifyRules,
    strict: bool,
) -> Result<(SourceLists, bool), ManifestError> {
    let to_error = |source| ManifestError::Extract {
        path: path.to_path_buf(),
        source,
    };

    let block = match extract_block(content) {
        Ok(block) => block,
        Err(err) if strict => return Err(to_error(err)),
        Err(_) => {
            warn!(path = %path.display(), "no sources block found, platform contributes no sources");
            return Ok((SourceLists::default(), false));
        }
    };

    if let Err(err) = block.check_quotes() {
        if strict {
            return Err(to_error(err));
        }
        warn!(path = %path.display(), "{err}");
    }

    Ok((block.classify(rules), true))
}

/// Compare a later platform's compiled list with the reference one.
///
/// Returns whether the lists differ; errors only under [`DivergencePolicy::Error`].
fn check_divergence(
    platform: &PlatformConfig,
    reference: &str,
    expected: &[String],
    actual: &[String],
    policy: DivergencePolicy,
) -> Result<bool, ManifestError> {
    if expected == actual {
        return Ok(false);
    }

    let expected_set: HashSet<&String> = expected.iter().collect();
    let actual_set: HashSet<&String> = actual.iter().collect();
    let added = actual_set.difference(&expected_set).count();
    let missing = expected_set.difference(&actual_set).count();

    match policy {
        DivergencePolicy::Ignore => {}
        DivergencePolicy::Warn => warn!(
            platform = %platform.name,
            reference,
            added,
            missing,
            "compiled sources differ from the first platform, keeping the first platform's list"
        ),
        DivergencePolicy::Error => {
            return Err(ManifestError::Divergence {
                platform: platform.name.clone(),
                reference: reference.to_string(),
                added,
                missing,
            });
        }
    }

    Ok(true)
}
