//! Chatty output for `--verbose`.
//!
//! Everything here goes to stderr. Stdout belongs to the build report, which
//! the orchestrator shows as-is.

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{modifiers, presets, ContentArrangement, Table};

use crate::BuildEnv;

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_enabled(on: bool) {
    ENABLED.store(on, Ordering::Relaxed);
}

pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Prints a one-line note, if verbose output is on.
pub fn note(content: impl core::fmt::Display) {
    if enabled() {
        eprintln!("fwhook: {content}");
    }
}

fn rounded_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Prints `content` in a box, to mark the start of a step.
pub fn banner(content: impl core::fmt::Display) {
    let mut table = rounded_table();
    table.add_row([content.to_string()]);
    eprintln!("{table}");
}

/// Shows where the hooks will read and write, plus the project options.
pub fn show_env(env: &BuildEnv) {
    let mut table = rounded_table();
    table.apply_modifier(modifiers::UTF8_SOLID_INNER_BORDERS);

    for (what, dir) in [
        ("Project dir", &env.project_dir),
        ("Data dir", &env.project_data_dir),
        ("Include dir", &env.include_dir),
        ("Build dir", &env.build_dir),
    ] {
        table.add_row([what.to_string(), dir.display().to_string()]);
    }
    for (name, value) in &env.options {
        table.add_row([format!("option {name}"), value.clone()]);
    }

    eprintln!("{table}");
}
