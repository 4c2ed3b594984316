//! # Projsnap
//!
//! `projsnap` walks a project directory and captures it as a single JSON
//! document: every retained file's relative path, extension, size, a binary flag
//! and its contents (decoded text inline, binary data as base64).
//!
//! Directories named in the excluded set are pruned during the walk and never
//! descended into. Binary detection looks only at the bytes, never at the
//! extension. Files can alternatively be discovered through git
//! ([`Source::Vcs`]), in which case every record is just a path and its decoded
//! text.
//!
//! # Features
//!
//! - `logging` (default): emits `tracing` events for pruned directories,
//!   skipped files, read failures and the output location.
//!
//! # Example
//!
//! ```no_run
//! use projsnap::{SnapshotBuilder, run};
//!
//! let options = SnapshotBuilder::new(".")
//!     .exclude("db/migrations")
//!     .max_file_size(Some(10 * 1024 * 1024)) // 10 MB
//!     .output_dir("snapshots")
//!     .build();
//!
//! let summary = run(&options).expect("Failed to write snapshot");
//! println!("{} files -> {}", summary.file_count, summary.output_path.display());
//! ```

pub mod content;
mod engine;
mod error;
pub mod exclude;
mod options;
pub mod output;
mod types;
pub mod vcs;

pub use content::BinaryHeuristic;
pub use engine::{Walker, walk};
pub use error::SnapshotError;
pub use exclude::ExcludeSet;
pub use options::{
    BinaryDetection, DEFAULT_EXCLUDED_DIRS, DEFAULT_OUTPUT_DIR, SnapshotBuilder, SnapshotOptions,
    Source,
};
pub use output::{capture, run, write_snapshot};
pub use types::{FileRecord, RunSummary, Snapshot};
