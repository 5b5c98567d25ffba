//! Build hooks for firmware projects: embedding the web UI into a C header
//! before the main source is compiled, and reporting build metadata once the
//! firmware image exists.

pub mod config;
pub mod embed;
pub mod hooks;
pub mod report;
pub mod verbose;

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::anyhow;

/// Everything the hooks are allowed to know about the build in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildEnv {
    /// Root directory of the firmware project.
    pub project_dir: PathBuf,
    /// Directory holding filesystem assets, including `index.html`.
    pub project_data_dir: PathBuf,
    /// Output directory for the current build environment.
    pub build_dir: PathBuf,
    /// Directory for headers, where `html.h` is generated.
    pub include_dir: PathBuf,
    /// Named options from the project configuration.
    pub options: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Looks up a named project option, failing if the project doesn't
    /// declare it.
    pub fn project_option(&self, name: &str) -> anyhow::Result<&str> {
        self.options.get(name)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("project option `{name}` is not declared"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_option_is_found() {
        let mut env = BuildEnv::default();
        env.options.insert("version".to_string(), "0.4.1".to_string());
        assert_eq!(env.project_option("version").unwrap(), "0.4.1");
    }

    #[test]
    fn missing_option_names_the_option() {
        let env = BuildEnv::default();
        let e = env.project_option("version").unwrap_err();
        assert_eq!(e.to_string(), "project option `version` is not declared");
    }
}
