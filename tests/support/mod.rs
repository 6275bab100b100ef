use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

/// Get a Command for lettermerge
pub fn lettermerge() -> Command {
    cargo_bin_cmd!("lettermerge")
}

/// Get a Command for lettermerge rooted at `root`
pub fn lettermerge_at(root: &Path) -> Command {
    let mut cmd = lettermerge();
    cmd.arg("--root").arg(root);
    cmd
}

/// Write a file, creating parent directories
pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Two letters for 12345678 and one for 87654321, all in partition 20230518
#[allow(dead_code)]
pub fn create_scenario(root: &Path) {
    let input = root.join("Input");
    write_file(&input.join("Admission/20230518/admission-12345678.txt"), "A\n");
    write_file(
        &input.join("Scholarship/20230518/scholarship-12345678.txt"),
        "B\n",
    );
    write_file(&input.join("Admission/20230518/admission-87654321.txt"), "C\n");
}
