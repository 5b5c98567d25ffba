//! Drives both hooks against a scratch project laid out like a firmware
//! project, configured through `fwhook.toml`.

use std::{fs, path::{Path, PathBuf}};

use fwhook::{
    config::{self, Overrides},
    hooks::{HookTable, Stage, FIRMWARE_NODE, MAIN_OBJECT_NODE},
};

fn scratch_project(name: &str, config_text: &str) -> PathBuf {
    let root = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("project-{name}"));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join("data")).unwrap();
    fs::create_dir_all(root.join("include")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join(config::CONFIG_FILE), config_text).unwrap();
    root
}

#[test]
fn pre_then_post_build() {
    let root = scratch_project("full", r#"
        [dirs]
        build = ".pio/build/esp32dev"

        [options]
        version = "1.2.3"
    "#);
    fs::write(root.join("data/index.html"), "<html><body>hi</body></html>").unwrap();

    let env = config::resolve_env(root.join("src"), &Overrides::default()).unwrap();
    let table = HookTable::standard();
    let mut out = vec![];

    let object = format!("{}/src/main.cpp.o", env.build_dir.display());
    assert_eq!(table.run(Stage::Pre, &object, &env, &mut out).unwrap(), 1);
    assert_eq!(
        fs::read_to_string(root.join("include/html.h")).unwrap(),
        "const char html[] PROGMEM = R\"html(<html><body>hi</body></html>\n)html\";",
    );
    // The embedder is silent on stdout.
    assert!(out.is_empty());

    assert_eq!(table.run(Stage::Post, FIRMWARE_NODE, &env, &mut out).unwrap(), 1);
    let root = root.canonicalize().unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "Version: 1.2.3\nproject dir: {}\nbuild: {}\n",
            root.display(),
            root.join(".pio/build/esp32dev").display(),
        ),
    );
}

#[test]
fn multiline_page_is_embedded_verbatim() {
    let root = scratch_project("multiline", "");
    let page = "<!DOCTYPE html>\n<html>\n  <script>let s = \"a\\n\";</script>\n</html>\n";
    fs::write(root.join("data/index.html"), page).unwrap();

    let env = config::resolve_env(&root, &Overrides::default()).unwrap();
    HookTable::standard().run(Stage::Pre, MAIN_OBJECT_NODE, &env, &mut Vec::<u8>::new()).unwrap();

    assert_eq!(
        fs::read_to_string(root.join("include/html.h")).unwrap(),
        format!("const char html[] PROGMEM = R\"html({page}\n)html\";"),
    );
}

#[test]
fn report_without_version_fails_quietly() {
    let root = scratch_project("no-version", "[options]\nboard = \"esp32dev\"\n");
    let env = config::resolve_env(&root, &Overrides::default()).unwrap();

    let mut out = vec![];
    let e = HookTable::standard().run(Stage::Post, FIRMWARE_NODE, &env, &mut out).unwrap_err();
    assert!(e.to_string().contains("`version`"), "{e:#}");
    assert!(out.is_empty());
}

#[test]
fn orchestrator_dirs_override_config() {
    let root = scratch_project("overrides", "[options]\nversion = \"0.9.0\"\n");
    let elsewhere = root.join("assets");
    fs::create_dir_all(&elsewhere).unwrap();
    fs::write(elsewhere.join("index.html"), "<p>moved</p>").unwrap();

    let overrides = Overrides {
        project_dir: Some(root.clone()),
        data_dir: Some(elsewhere),
        build_dir: Some("/proj/.pio/build/env".into()),
        version: None,
    };
    let env = config::resolve_env("/", &overrides).unwrap();
    let table = HookTable::standard();

    let mut out = vec![];
    table.run(Stage::Pre, "/proj/.pio/build/env/src/main.cpp.o", &env, &mut out).unwrap();
    table.run(Stage::Post, FIRMWARE_NODE, &env, &mut out).unwrap();

    assert!(fs::read_to_string(root.join("include/html.h")).unwrap().contains("<p>moved</p>"));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Version: 0.9.0\nproject dir: {}\nbuild: /proj/.pio/build/env\n", root.display()),
    );
}
