use std::fs;
use std::path::Path;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    let version_file = Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("workspace root should exist")
        .join("VERSION");

    println!("cargo:rerun-if-changed={}", version_file.display());

    let version = fs::read_to_string(&version_file)
        .expect("workspace VERSION file should be readable")
        .trim()
        .to_string();
    assert!(!version.is_empty(), "workspace VERSION file is empty");

    println!("cargo:rustc-env=GAIT_LENS_VERSION={version}");
}
