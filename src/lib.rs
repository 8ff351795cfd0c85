//! **promptmend** - deterministic, idempotent rewriting of plain-text prompt files
//!
//! Strips lines carrying catalog markers, collapses the blank-line runs
//! that leaves behind, and injects a directive after the first line.
//! Running it twice changes nothing the second time.

/// Command-line interface with clap integration
pub mod cli;

/// Command handlers behind the CLI
pub mod cli_ext {
    pub mod mend_cmd;
}

/// Shell completion generation
pub mod completion;

/// Error taxonomy (fatal configuration vs per-file access errors)
pub mod error;

/// Core rewrite pipeline
pub mod core {
    /// Ordered literal marker catalog
    pub mod catalog;
    pub use catalog::MarkerCatalog;

    /// Line filter with first-match marker reporting
    pub mod filter;

    /// Blank-line run collapsing
    pub mod collapse;

    /// Idempotent directive injection
    pub mod inject;
    pub use inject::Directive;

    /// Pure filter → collapse → inject pipeline
    pub mod transform;
    pub use transform::{Rules, TransformResult, Transformed, transform};

    /// Per-file read/transform/write
    pub mod process;
    pub use process::{FileReport, ProcessOptions, process_file};

    /// Batch discovery and aggregation
    pub mod batch;
    pub use batch::{Batch, BatchReport, BatchSummary};

    /// Text rendering of batch results
    pub mod report;
}

/// Infrastructure - configuration, I/O, walking, logging
pub mod infra {
    /// Configuration management with TOML/YAML/JSON + env overrides
    pub mod config;
    pub use config::{Config, load_config};

    /// Whole-file text reads and atomic writes
    pub mod io;

    /// Flat, extension-filtered file discovery
    pub mod walk;
    pub use walk::{FileWalker, WalkOutcome};

    /// tracing-subscriber setup for the CLI
    pub mod logging;
}

pub use cli::{AppContext, Cli, Commands};
pub use self::core::{Batch, BatchReport, BatchSummary, Directive, MarkerCatalog, Rules, transform};
pub use error::MendError;
pub use infra::{Config, load_config};
