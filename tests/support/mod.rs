use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[allow(dead_code)]
pub fn registrar_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_registrar"))
}

#[allow(dead_code)]
pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

#[allow(dead_code)]
pub fn boilerplate_inputs() -> Vec<PathBuf> {
    vec![
        fixture("boilerplate/comac-boilerplate.c"),
        fixture("boilerplate/comac-boilerplate-pdf.c"),
        fixture("boilerplate/comac-boilerplate-script.c"),
    ]
}

/// Runs the binary with logging pinned to errors only
#[allow(dead_code)]
pub fn run_registrar<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(registrar_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env("REGISTRAR_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute registrar")
}

/// File names in `dir`, sorted
#[allow(dead_code)]
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
