use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Ok, Result, bail};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::{
    ClassifyRules, DEFAULT_ASSEMBLY_SUFFIX, DEFAULT_COMPILED_SUFFIX, DEFAULT_PATH_PREFIX,
};

pub const CONFIG_FILE_NAME: &str = ".srclistrc.json";

/// Extracted platforms, in output order: (list name, file relative to `baseDir`).
pub const DEFAULT_PLATFORMS: &[(&str, &str)] = &[
    (
        "APPLE_AARCH64_ASM",
        "builder/cc_builder/aarch64_apple_darwin.rs",
    ),
    ("APPLE_X86_64_ASM", "builder/cc_builder/x86_64_apple_darwin.rs"),
    (
        "LINUX_AARCH64_ASM",
        "builder/cc_builder/aarch64_unknown_linux_gnu.rs",
    ),
    (
        "LINUX_X86_64_ASM",
        "builder/cc_builder/x86_64_unknown_linux_gnu.rs",
    ),
];

/// Platforms without a cc_builder file; always emitted as empty lists.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &[
    "LINUX_X86_ASM",
    "LINUX_ARM_ASM",
    "WIN_X86_64_ASM",
    "WIN_AARCH64_ASM",
    "WIN_X86_ASM",
];

static LIST_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// What to do when a platform's compiled sources differ from the first platform's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DivergencePolicy {
    Ignore,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Name of the emitted assembly list.
    pub name: String,
    /// cc_builder file, relative to `baseDir`.
    pub file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    #[serde(default = "default_compiled_suffix")]
    pub compiled_suffix: String,
    #[serde(default = "default_assembly_suffix")]
    pub assembly_suffix: String,
    #[serde(default = "default_universal_name")]
    pub universal_name: String,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<PlatformConfig>,
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub divergence: DivergencePolicy,
}

fn default_base_dir() -> String {
    "aws-lc-rs/aws-lc-sys".to_string()
}

fn default_header() -> String {
    "# Auto-generated from aws-lc-sys cc_builder".to_string()
}

fn default_path_prefix() -> String {
    DEFAULT_PATH_PREFIX.to_string()
}

fn default_compiled_suffix() -> String {
    DEFAULT_COMPILED_SUFFIX.to_string()
}

fn default_assembly_suffix() -> String {
    DEFAULT_ASSEMBLY_SUFFIX.to_string()
}

fn default_universal_name() -> String {
    "UNIVERSAL_SRCS".to_string()
}

fn default_platforms() -> Vec<PlatformConfig> {
    DEFAULT_PLATFORMS
        .iter()
        .map(|(name, file)| PlatformConfig {
            name: name.to_string(),
            file: file.to_string(),
        })
        .collect()
}

fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            header: default_header(),
            path_prefix: default_path_prefix(),
            compiled_suffix: default_compiled_suffix(),
            assembly_suffix: default_assembly_suffix(),
            universal_name: default_universal_name(),
            platforms: default_platforms(),
            placeholders: default_placeholders(),
            strict: false,
            divergence: DivergencePolicy::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every list name must be a Starlark identifier and unique across the
    /// universal, platform and placeholder lists.
    pub fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            bail!("'platforms' must name at least one cc_builder file");
        }

        if !self.header.starts_with('#') || self.header.contains('\n') {
            bail!("'header' must be a single comment line starting with '#'");
        }

        if self.compiled_suffix.is_empty() || self.assembly_suffix.is_empty() {
            bail!("'compiledSuffix' and 'assemblySuffix' must not be empty");
        }
        if self.compiled_suffix == self.assembly_suffix {
            bail!(
                "'compiledSuffix' and 'assemblySuffix' must differ (both are \"{}\")",
                self.compiled_suffix
            );
        }

        let mut seen = HashSet::new();
        for name in self.list_names() {
            if !LIST_NAME_REGEX.is_match(name) {
                bail!("Invalid list name: \"{}\"", name);
            }
            if !seen.insert(name) {
                bail!("Duplicate list name: \"{}\"", name);
            }
        }

        for platform in &self.platforms {
            if platform.file.trim().is_empty() {
                bail!("Platform \"{}\" has an empty 'file'", platform.name);
            }
        }

        Ok(())
    }

    /// All emitted list names, in output order.
    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.universal_name.as_str())
            .chain(self.platforms.iter().map(|p| p.name.as_str()))
            .chain(self.placeholders.iter().map(String::as_str))
    }

    pub fn classify_rules(&self) -> ClassifyRules {
        ClassifyRules {
            path_prefix: self.path_prefix.clone(),
            compiled_suffix: self.compiled_suffix.clone(),
            assembly_suffix: self.assembly_suffix.clone(),
        }
    }

    /// Path of a platform file, resolved against `root` and `baseDir`.
    pub fn platform_path(&self, root: &Path, platform: &PlatformConfig) -> PathBuf {
        root.join(&self.base_dir).join(&platform.file)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

/// Load and validate a config file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: load_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
