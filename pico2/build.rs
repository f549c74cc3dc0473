//! Build script for pushbutton-pico2
//!
//! Copies `memory.x` into OUT_DIR so cortex-m-rt's `link.x` can INCLUDE it,
//! and adds the linker scripts for cortex-m-rt and defmt.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_src = manifest_dir.join("memory.x");
    fs::copy(&memory_src, out_dir.join("memory.x")).expect("copy memory.x -> OUT_DIR");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={}", memory_src.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
