//! Build script for the embedded migrations.
//!
//! `sqlx::migrate!` embeds the files under `migrations/` at compile time,
//! so the crate has to be rebuilt whenever one of them changes.

fn main() {
    println!("cargo:rerun-if-changed=migrations/");
}
