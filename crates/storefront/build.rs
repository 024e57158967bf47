//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served with
//! immutable caching. The hash is exposed as `CSS_HASH` and the file is copied
//! to `static/css/derived/main.<hash>.css`. Older fingerprinted copies are
//! removed.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
    let css_path = manifest_dir.join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash: String = digest.chars().take(HASH_LEN).collect();
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    let derived_dir = manifest_dir.join("static/css/derived");
    if let Err(e) = publish(&css_path, &derived_dir, &short_hash) {
        println!("cargo:warning=Could not write fingerprinted CSS: {e}");
    }
}

/// Copy the stylesheet under its fingerprinted name and drop stale copies.
fn publish(css_path: &Path, derived_dir: &Path, hash: &str) -> std::io::Result<()> {
    fs::create_dir_all(derived_dir)?;
    let current = format!("main.{hash}.css");

    for entry in fs::read_dir(derived_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("main.") && name.ends_with(".css") && name != current {
            fs::remove_file(entry.path())?;
        }
    }

    fs::copy(css_path, derived_dir.join(current))?;
    Ok(())
}
