fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();

    match cbindgen::generate(&crate_dir) {
        Ok(bindings) => {
            bindings.write_to_file("include/artsim.h");
        }
        Err(e) => {
            // Header generation failing should not break `cargo build` for
            // consumers without cbindgen support; surface it as a warning.
            println!("cargo:warning=cbindgen failed: {e}");
        }
    }

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");
}
