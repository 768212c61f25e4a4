//! Bakes the bootstrap snippet into the launcher binaries.
//!
//! Inputs (all read at build time):
//! - `PYBOOTSTRAP_SOURCE`: inline Python source
//! - `PYBOOTSTRAP_MANIFEST`: TOML manifest, relative to this crate
//! - `PYBOOTSTRAP_EXIT_STATUS`: `always-success` or `propagate`

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pybootstrap_core::{BootstrapManifest, EmbeddedBootstrap};

const SOURCE_VAR: &str = "PYBOOTSTRAP_SOURCE";
const MANIFEST_VAR: &str = "PYBOOTSTRAP_MANIFEST";
const EXIT_STATUS_VAR: &str = "PYBOOTSTRAP_EXIT_STATUS";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    for var in [SOURCE_VAR, MANIFEST_VAR, EXIT_STATUS_VAR] {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    let manifest = match non_empty_var(MANIFEST_VAR) {
        Some(path) => {
            let path = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join(path);
            println!("cargo:rerun-if-changed={}", path.display());
            let manifest = BootstrapManifest::load(&path)
                .with_context(|| format!("Invalid bootstrap manifest {}", path.display()))?;
            Some(manifest)
        }
        None => None,
    };

    let embedded = EmbeddedBootstrap::resolve(
        non_empty_var(SOURCE_VAR),
        manifest.as_ref(),
        non_empty_var(EXIT_STATUS_VAR).as_deref(),
    )?;

    let out_path = PathBuf::from(env::var("OUT_DIR")?).join("bootstrap.rs");
    fs::write(&out_path, embedded.to_rust_source())
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    Ok(())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
