fn main() {
    // include_dir! embeds the web form at compile time,
    // but cargo doesn't track non-Rust files automatically.
    println!("cargo:rerun-if-changed=static");
}
