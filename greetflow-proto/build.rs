//! Build script for greetflow-proto
//!
//! The prost/tonic code for `proto/greetflow/api/v1/*.proto` is checked in
//! under `src/generated/`. It is regenerated with tonic-build only when the
//! `codegen` feature is enabled:
//!
//!     cargo build -p greetflow-proto --features codegen

fn main() {
    println!("cargo:rerun-if-changed=proto/greetflow/api/v1/service.proto");
    println!("cargo:rerun-if-changed=src/generated/greetflow.api.v1.rs");

    #[cfg(feature = "codegen")]
    codegen::generate();
}

#[cfg(feature = "codegen")]
mod codegen {
    use std::env;
    use std::path::PathBuf;

    pub fn generate() {
        let crate_root = match env::var("CARGO_MANIFEST_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(e) => panic!("CARGO_MANIFEST_DIR not set: {e}"),
        };
        let proto_root = crate_root.join("proto");
        let service = proto_root.join("greetflow/api/v1/service.proto");

        if let Err(e) = tonic_build::configure()
            .build_client(true)
            .build_server(false)
            .out_dir(crate_root.join("src/generated"))
            .compile_protos(&[service], &[proto_root])
        {
            panic!("Failed to compile protobuf files: {e}");
        }
    }
}
