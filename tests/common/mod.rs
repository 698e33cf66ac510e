#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// A command rooted in `dir` with every ambient config source neutralised.
pub fn papertidy(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("papertidy");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("PAPERTIDY_CONFIG_PATH", dir.join("no-such-config.toml"))
        .env_remove("PAPERTIDY_MANIFEST_PATH")
        .env_remove("PAPERTIDY_PDF_DIR")
        .env_remove("PAPERTIDY_OUTPUT_PATH")
        .env_remove("PAPERTIDY_LOG");
    cmd
}

pub fn touch(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("write fixture");
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
