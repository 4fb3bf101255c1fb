use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use super::super::{args::CommonArgs, report};
use crate::config::{Config, load_config, load_config_file};
use crate::manifest::build_manifest;
use crate::render::render_manifest;

/// Config plus the directory its `baseDir` is resolved against.
#[derive(Debug)]
pub struct Settings {
    pub root: PathBuf,
    pub config: Config,
}

/// Load the config (explicit, discovered, or default) and apply CLI overrides.
///
/// `baseDir` from a config file is relative to that file's directory; a
/// `--base-dir` flag is relative to `cwd`.
pub fn resolve_settings(common: &CommonArgs, cwd: &Path) -> Result<Settings> {
    let (mut config, config_path) = match &common.config {
        Some(path) => {
            let path = cwd.join(path);
            (load_config_file(&path)?, Some(path))
        }
        None => {
            let loaded = load_config(cwd)?;
            (loaded.config, loaded.path)
        }
    };

    let root = config_path
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    if let Some(base_dir) = &common.base_dir {
        let base_dir = cwd.join(base_dir);
        config.base_dir = base_dir
            .to_str()
            .with_context(|| format!("--base-dir is not valid UTF-8: {}", base_dir.display()))?
            .to_string();
    }
    if common.strict {
        config.strict = true;
    }
    if let Some(policy) = common.divergence {
        config.divergence = policy;
    }

    debug!(
        config = ?config_path,
        root = %root.display(),
        base_dir = %config.base_dir,
        strict = config.strict,
        "resolved settings"
    );

    Ok(Settings { root, config })
}

/// Resolve settings from the current directory, extract, and render.
pub fn generate_output(common: &CommonArgs) -> Result<String> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let settings = resolve_settings(common, &cwd)?;

    let build = build_manifest(&settings.root, &settings.config)?;
    if common.verbose {
        report::print_summaries(&build.summaries);
    }

    Ok(render_manifest(&build.manifest))
}
