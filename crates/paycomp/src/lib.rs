//! Command-line front end for the compensation engine
//!
//! Loads a parameter file, runs one engine operation and renders the
//! structured result as text tables or JSON:
//! - `cli` - argument definitions
//! - `commands` - dispatch from a subcommand to an engine call
//! - `render` - text rendering of engine results
//! - `storage` - parameter files (JSON or YAML) and report output
//! - `logging` - file logging under the data directory

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod storage;
pub mod util;

pub use cli::{Cli, Command, OutputFormat};
pub use commands::{Report, run};
pub use logging::init_logging;
pub use storage::{StorageError, default_data_dir};
