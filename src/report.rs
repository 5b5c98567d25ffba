use std::{fmt, io::Write, path::PathBuf};

use anyhow::Context as _;

use crate::BuildEnv;

/// The three facts printed once the firmware image has been produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub version: String,
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl BuildReport {
    /// Collects the report, failing if the project declares no `version`.
    pub fn from_env(env: &BuildEnv) -> anyhow::Result<Self> {
        let version = env.project_option("version")?;
        Ok(Self {
            version: version.to_string(),
            project_dir: env.project_dir.clone(),
            build_dir: env.build_dir.clone(),
        })
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "project dir: {}", self.project_dir.display())?;
        writeln!(f, "build: {}", self.build_dir.display())
    }
}

/// Prints the build report to `out`.
///
/// Nothing is written unless the whole report could be collected.
pub fn post_build(env: &BuildEnv, out: &mut impl Write) -> anyhow::Result<()> {
    let report = BuildReport::from_env(env)?;
    write!(out, "{report}").context("can't write build report")?;
    Ok(())
}
