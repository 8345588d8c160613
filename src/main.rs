//! # drive-reaper CLI
//!
//! Command-line interface for the drive reaper.
//!
//! ## Usage
//! ```bash
//! drive-reaper scan catalog.json --page-size 1000
//! drive-reaper scan catalog.json --output json
//! ```

mod cli;

use drive_reaper::Result;

fn main() -> Result<()> {
    drive_reaper::init_tracing();
    cli::run()
}
