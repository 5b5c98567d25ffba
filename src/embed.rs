//! Turns the project's `index.html` into `html.h`, a header declaring the
//! page as a raw string literal in program memory.
//!
//! The page is copied byte for byte. Nothing is escaped, so the page must not
//! contain the closing delimiter `)html"`; we don't check for it.

use std::{fs, io::Write as _, path::{Path, PathBuf}};

use anyhow::Context as _;

use crate::BuildEnv;

/// Text emitted before the page content.
pub const HEADER_PREFIX: &str = "const char html[] PROGMEM = R\"html(";
/// Text emitted after the page content.
pub const HEADER_SUFFIX: &str = "\n)html\";";

/// Name of the page under the project data directory.
pub const ASSET_NAME: &str = "index.html";
/// Name of the generated header under the include directory.
pub const HEADER_NAME: &str = "html.h";

/// What `embed_html` did, for callers that want to talk about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedOutcome {
    pub asset_path: PathBuf,
    pub header_path: PathBuf,
    /// Size of the page that got embedded, not of the header.
    pub content_len: usize,
}

pub fn asset_path(env: &BuildEnv) -> PathBuf {
    env.project_data_dir.join(ASSET_NAME)
}

pub fn header_path(env: &BuildEnv) -> PathBuf {
    env.include_dir.join(HEADER_NAME)
}

/// Frames `content` in the raw string literal declaration.
pub fn render_header(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_PREFIX.len() + content.len() + HEADER_SUFFIX.len());
    out.extend_from_slice(HEADER_PREFIX.as_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(HEADER_SUFFIX.as_bytes());
    out
}

/// Reads the page and (re)generates the header.
///
/// The page is read in full before the header is touched, and the header is
/// replaced by renaming a finished temporary file over it. An existing
/// `html.h` is therefore either left alone or replaced whole. The include
/// directory must already exist.
pub fn embed_html(env: &BuildEnv) -> anyhow::Result<EmbedOutcome> {
    let asset_path = asset_path(env);
    let header_path = header_path(env);

    let content = fs::read(&asset_path)
        .with_context(|| format!("can't read HTML asset at path: {}", asset_path.display()))?;

    write_replacing(&header_path, &render_header(&content))
        .with_context(|| format!("can't write header at path: {}", header_path.display()))?;

    Ok(EmbedOutcome {
        asset_path,
        header_path,
        content_len: content.len(),
    })
}

fn write_replacing(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("h.tmp");

    let result = fs::File::create(&tmp_path)
        .and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if result.is_err() {
        // Might not exist if creation is what failed.
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
