//! Command-line interface for projsnap.
//!
//! Walks a project directory and writes one timestamped JSON snapshot of its
//! files into the output directory.

use clap::{Parser, ValueEnum};
use projsnap::{
    BinaryDetection, SnapshotBuilder, SnapshotError, SnapshotOptions, Source, capture, output,
    write_snapshot,
};
use std::path::PathBuf;
use std::process::exit;

/// projsnap — capture a project directory as a single JSON document
#[derive(Parser)]
#[command(name = "projsnap", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    root: Option<PathBuf>,

    /// JSON file with base options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the file list comes from
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Additional excluded directory names or path prefixes (can be repeated)
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// Start from an empty excluded set instead of the built-in one
    #[arg(long)]
    no_default_excludes: bool,

    /// Match excluded prefixes only on whole path segments
    #[arg(long)]
    aligned_prefixes: bool,

    /// Glob patterns of files to leave out (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Record binary files without their base64 content
    #[arg(long)]
    no_binary: bool,

    /// Binary detection strategy
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// Honour .gitignore files during the walk
    #[arg(long)]
    respect_gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    no_hidden: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Keep filesystem enumeration order instead of sorting by path
    #[arg(long)]
    unsorted: bool,

    /// Output directory for the snapshot file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Single-line JSON instead of indented
    #[arg(long)]
    compact: bool,

    /// Print the snapshot to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Walk,
    Vcs,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "heuristic" => Ok(BinaryDetection::Heuristic),
        "inspector" => Ok(BinaryDetection::Inspector),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<(SnapshotOptions, bool), SnapshotError> {
        let base = match &self.config {
            Some(path) => SnapshotOptions::from_json_file(path)?,
            None => SnapshotOptions::default(),
        };
        let mut excluded = if self.no_default_excludes {
            Vec::new()
        } else {
            base.excluded_dirs.clone()
        };
        excluded.extend(self.exclude);
        let mut ignore_patterns = base.ignore_patterns.clone();
        ignore_patterns.extend(self.ignore_patterns);

        let mut builder = SnapshotBuilder::from(base)
            .excluded_dirs(excluded)
            .ignore_patterns(ignore_patterns);
        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(source) = self.source {
            builder = builder.source(match source {
                SourceArg::Walk => Source::Walk,
                SourceArg::Vcs => Source::Vcs,
            });
        }
        if self.aligned_prefixes {
            builder = builder.aligned_prefixes(true);
        }
        if self.max_file_size.is_some() {
            builder = builder.max_file_size(self.max_file_size);
        }
        if self.no_binary {
            builder = builder.include_binary(false);
        }
        if let Some(method) = self.binary_detection {
            builder = builder.binary_detection(method);
        }
        if self.respect_gitignore {
            builder = builder.respect_gitignore(true);
        }
        if self.no_hidden {
            builder = builder.include_hidden(false);
        }
        if self.follow_links {
            builder = builder.follow_links(true);
        }
        if self.max_depth.is_some() {
            builder = builder.max_depth(self.max_depth);
        }
        if self.unsorted {
            builder = builder.sort_by_path(false);
        }
        if let Some(dir) = self.output_dir {
            builder = builder.output_dir(dir);
        }
        if self.compact {
            builder = builder.pretty(false);
        }
        Ok((builder.build(), self.stdout))
    }
}

fn main() {
    let cli = Cli::parse();
    let (options, to_stdout) = cli.into_options().unwrap_or_else(|e| fail(e));
    let snapshot = capture(&options).unwrap_or_else(|e| fail(e));

    if to_stdout {
        let json = output::to_json(&snapshot, options.pretty).unwrap_or_else(|e| fail(e));
        println!("{}", json);
        return;
    }

    let path = write_snapshot(&snapshot, &options.output_dir, options.pretty)
        .unwrap_or_else(|e| fail(e));
    println!("Project snapshot created successfully");
    println!("JSON file: {}", path.display());
    println!("Total files captured: {}", snapshot.files.len());
}

fn fail(e: SnapshotError) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}
