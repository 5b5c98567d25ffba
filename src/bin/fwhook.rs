use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use fwhook::{config::{self, Overrides}, embed, hooks::{HookTable, Stage}, report, verbose, BuildEnv};

/// Build hooks for the firmware project: generates `include/html.h` before
/// `main.cpp` is compiled and reports build metadata after linking.
#[derive(Parser)]
struct Tool {
    /// Project root. If not given, searched for upward from the current
    /// directory by looking for `fwhook.toml`.
    #[arg(long, global = true, env = "PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Directory holding `index.html`.
    #[arg(long, global = true, env = "PROJECT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Build output directory.
    #[arg(long, global = true, env = "BUILD_DIR")]
    build_dir: Option<PathBuf>,

    /// Use this version instead of the `version` option from `fwhook.toml`.
    #[arg(long, global = true)]
    version_option: Option<String>,

    /// Print the resolved environment and what each hook did, on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generates the HTML header from the project's `index.html`.
    EmbedHtml,
    /// Prints the version, project directory and build directory.
    Report,
    /// Runs the actions registered for a build-graph node.
    Hook {
        stage: StageArg,
        node: String,
        /// Source nodes as passed by the orchestrator. Ignored.
        #[arg(trailing_var_arg = true)]
        sources: Vec<String>,
    },
    /// Lists the registered hooks.
    Hooks,
}

#[derive(Copy, Clone, ValueEnum)]
enum StageArg {
    Pre,
    Post,
}

impl From<StageArg> for Stage {
    fn from(s: StageArg) -> Self {
        match s {
            StageArg::Pre => Stage::Pre,
            StageArg::Post => Stage::Post,
        }
    }
}

impl Tool {
    fn overrides(&self) -> Overrides {
        Overrides {
            project_dir: self.project_dir.clone(),
            data_dir: self.data_dir.clone(),
            build_dir: self.build_dir.clone(),
            version: self.version_option.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Tool::parse();
    verbose::set_enabled(args.verbose);

    let overrides = args.overrides();
    let table = HookTable::standard();
    let mut stdout = std::io::stdout().lock();

    match args.cmd {
        Cmd::EmbedHtml => {
            let env = load_env(&overrides)?;
            let outcome = embed::embed_html(&env)?;
            verbose::note(format_args!("wrote {}", outcome.header_path.display()));
        }
        Cmd::Report => {
            let env = load_env(&overrides)?;
            report::post_build(&env, &mut stdout)?;
        }
        Cmd::Hook { stage, node, sources: _ } => {
            let env = load_env(&overrides)?;
            let stage = Stage::from(stage);
            if verbose::enabled() {
                verbose::banner(format_args!("{stage}-action hooks for {node}"));
            }
            let count = table.run(stage, &node, &env, &mut stdout)?;
            verbose::note(format_args!("{count} action(s) ran"));
        }
        Cmd::Hooks => {
            for r in table.registrations() {
                writeln!(stdout, "{:<4} {:<28} {}", r.stage, r.node, r.action)?;
            }
        }
    }

    Ok(())
}

fn load_env(overrides: &Overrides) -> anyhow::Result<BuildEnv> {
    let cwd = std::env::current_dir()
        .context("can't get current directory?")?;
    let env = config::resolve_env(&cwd, overrides)?;
    if verbose::enabled() {
        verbose::show_env(&env);
    }
    Ok(env)
}
