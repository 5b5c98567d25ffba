//! Project configuration.
//!
//! A project is marked by a `fwhook.toml` file in its root directory:
//!
//! ```toml
//! [dirs]
//! data = "data"
//! build = ".pio/build/default"
//! include = "include"
//!
//! [options]
//! version = "1.2.3"
//! ```
//!
//! Every section and key is optional. Relative directories are resolved
//! against the project root. Options are free-form strings, looked up by name
//! with [`BuildEnv::project_option`].

use std::{collections::BTreeMap, path::{Path, PathBuf}};

use anyhow::{bail, Context as _};
use serde::Deserialize;

use crate::BuildEnv;

pub const CONFIG_FILE: &str = "fwhook.toml";

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub dirs: DirsConfig,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DirsConfig {
    pub data: PathBuf,
    pub build: PathBuf,
    pub include: PathBuf,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            data: "data".into(),
            build: ".pio/build/default".into(),
            include: "include".into(),
        }
    }
}

/// Values given on the command line (or through the orchestrator's
/// environment variables) that take precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub project_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub version: Option<String>,
}

impl Config {
    /// Reads `fwhook.toml` from the project root `root`.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = root.join(CONFIG_FILE);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("can't read config file at path: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("can't parse config file at path: {}", path.display()))
    }
}

/// Works out the build environment.
///
/// With an explicit project directory the config file there is optional.
/// Otherwise the project root is the nearest of `start` and its ancestors
/// holding a `fwhook.toml`.
pub fn resolve_env(start: impl AsRef<Path>, overrides: &Overrides) -> anyhow::Result<BuildEnv> {
    let (root, config) = match &overrides.project_dir {
        Some(root) if root.join(CONFIG_FILE).is_file() => (root.clone(), Config::load(root)?),
        Some(root) => (root.clone(), Config::default()),
        None => {
            let start = start.as_ref();
            let start = start.canonicalize()
                .with_context(|| format!("can't interpret path: {}", start.display()))?;
            let Some(root) = start.ancestors().find(|dir| dir.join(CONFIG_FILE).is_file()) else {
                bail!("no {CONFIG_FILE} in {} or any parent directory", start.display());
            };
            let config = Config::load(root)?;
            (root.to_path_buf(), config)
        }
    };

    Ok(env_from_config(root, config, overrides))
}

/// Applies `overrides` on top of `config` for the project at `root`.
pub fn env_from_config(root: PathBuf, config: Config, overrides: &Overrides) -> BuildEnv {
    let Config { dirs, mut options } = config;

    if let Some(version) = &overrides.version {
        options.insert("version".to_string(), version.clone());
    }

    BuildEnv {
        project_data_dir: overrides.data_dir.clone().unwrap_or_else(|| root.join(dirs.data)),
        build_dir: overrides.build_dir.clone().unwrap_or_else(|| root.join(dirs.build)),
        include_dir: root.join(dirs.include),
        project_dir: root,
        options,
    }
}
