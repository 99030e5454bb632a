//! # Poster Tiler
//!
//! Binary entry point. All logic lives in the library crate so the
//! commands can be tested without spawning a process.
//!
//! ```text
//! $ poster-tiler suggest cat.jpg
//! Suggested grid: 3 x 2 (6 pages)
//!
//! $ poster-tiler render cat.jpg --cols 3 --rows 2 --out poster/
//! Wrote 7 files to poster/
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    poster_cli::run().await
}
