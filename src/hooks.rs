//! Which action runs at which point of the orchestrator's build graph.
//!
//! The orchestrator calls us with a stage (before or after a node is built)
//! and the node's name. It does this for plenty of nodes we don't care about,
//! so an unknown node simply runs nothing.

use std::{fmt, io::Write, path::{Component, Path}};

use crate::{embed, report, verbose, BuildEnv};

/// Build-graph node for the main source file's object.
pub const MAIN_OBJECT_NODE: &str = "$BUILD_DIR/src/main.cpp.o";
/// Build-graph node for the final firmware image.
pub const FIRMWARE_NODE: &str = "buildprog";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Pre,
    Post,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Stage::Pre => "pre",
            Stage::Post => "post",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    EmbedHtml,
    ReportBuild,
}

impl Action {
    pub fn run(self, env: &BuildEnv, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Action::EmbedHtml => {
                let outcome = embed::embed_html(env)?;
                verbose::note(format_args!(
                    "embedded {} ({} bytes) into {}",
                    outcome.asset_path.display(),
                    outcome.content_len,
                    outcome.header_path.display(),
                ));
                Ok(())
            }
            Action::ReportBuild => report::post_build(env, out),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Action::EmbedHtml => "embed-html",
            Action::ReportBuild => "report",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Registration {
    pub stage: Stage,
    pub node: String,
    pub action: Action,
}

#[derive(Clone, Debug, Default)]
pub struct HookTable {
    registrations: Vec<Registration>,
}

impl HookTable {
    /// The project's hooks: the page is embedded before `main.cpp` is
    /// compiled, and the report is printed once the firmware is built.
    pub fn standard() -> Self {
        let mut table = Self::default();
        table.add_pre_action(MAIN_OBJECT_NODE, Action::EmbedHtml);
        table.add_post_action(FIRMWARE_NODE, Action::ReportBuild);
        table
    }

    pub fn add_pre_action(&mut self, node: impl Into<String>, action: Action) {
        self.registrations.push(Registration { stage: Stage::Pre, node: node.into(), action });
    }

    pub fn add_post_action(&mut self, node: impl Into<String>, action: Action) {
        self.registrations.push(Registration { stage: Stage::Post, node: node.into(), action });
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Actions registered for `node` at `stage`, in registration order.
    pub fn actions_for(&self, stage: Stage, node: &str, env: &BuildEnv) -> Vec<Action> {
        self.registrations.iter()
            .filter(|r| r.stage == stage && node_matches(&r.node, node, &env.build_dir))
            .map(|r| r.action)
            .collect()
    }

    /// Runs every action for `node` at `stage`. Stops at the first failure.
    ///
    /// Returns how many actions ran.
    pub fn run(&self, stage: Stage, node: &str, env: &BuildEnv, out: &mut impl Write) -> anyhow::Result<usize> {
        let actions = self.actions_for(stage, node, env);
        for action in &actions {
            action.run(env, out)?;
        }
        Ok(actions.len())
    }
}

/// Compares a registered node name against the one the orchestrator gave us,
/// either literally or with `$BUILD_DIR` expanded. Expanded names compare as
/// paths, so `/b/`, `/b/.` and `/b` are the same build directory.
fn node_matches(registered: &str, given: &str, build_dir: &Path) -> bool {
    if registered == given {
        return true;
    }
    match registered.strip_prefix("$BUILD_DIR") {
        Some(rest) => {
            let expanded = build_dir.join(rest.trim_start_matches(['/', '\\']));
            path_parts(&expanded) == path_parts(Path::new(given))
        }
        None => false,
    }
}

fn path_parts(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}
