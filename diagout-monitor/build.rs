// Copyright (c) 2026 ADNT Sarl <info@adnt.io>
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let version_file = Path::new(&manifest_dir).join("../VERSION");

    // Firmware and monitor share the project-root VERSION
    let version = fs::read_to_string(&version_file)
        .expect("Failed to read VERSION file")
        .trim()
        .to_string();
    let target = env::var("TARGET").unwrap();

    println!("cargo:rustc-env=DIAGOUT_VERSION={version}");
    println!("cargo:rustc-env=DIAGOUT_LONG_VERSION={version} ({target})");
    println!("cargo:rerun-if-changed={}", version_file.display());
    println!("cargo:rerun-if-changed=build.rs");
}
