use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.lock");

    let build_time = chrono::Utc::now().to_rfc3339();

    let cargo_lock = fs::read_to_string("Cargo.lock").unwrap_or_default();
    let version = cargo_lock
        .lines()
        .collect::<Vec<_>>()
        .windows(4)
        .find(|window| {
            window[0].trim() == "[[package]]"
                && window[1].trim() == "name = \"axum\""
                && window[2].trim().starts_with("version = ")
        })
        .and_then(|window| {
            window[2]
                .trim()
                .strip_prefix("version = ")
                .map(|v| v.trim_matches('"'))
        })
        .map(|v: &str| v.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rust_version = std::process::Command::new(rustc)
        .arg("--version")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let mut file = File::create(out_dir.join("build_info.rs")).expect("writable OUT_DIR");
    writeln!(file, "pub const BUILD_TIME: &str = {:?};", build_time).unwrap();
    writeln!(file, "pub const AXUM_VERSION: &str = \"axum {}\";", version).unwrap();
    writeln!(file, "pub const RUST_VERSION: &str = {:?};", rust_version).unwrap();
}
