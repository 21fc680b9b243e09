//! CLI entry point for lsf

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use lsf::output::{DEFAULT_FORMAT, DEFAULT_SEPARATOR};
use lsf::{
    ErrorCounter, FilterMode, FormatSpec, HashKind, ListConfig, LocalFs, LocalHasher,
    RenderConfig, WalkerConfig, list,
};

/// Fatal error: the listing could not start or its output failed
const EXIT_FATAL: i32 = 1;
/// Bad arguments or format string (clap uses the same code)
const EXIT_USAGE: i32 = 2;
/// The listing finished but some directories could not be read
const EXIT_PARTIAL: i32 = 3;

const LONG_ABOUT: &str = "\
List the contents of a path (directories and files) to standard output in a
form which is easy to parse by scripts. By default this is just the names of
the files and directories, one per line, with a / suffix on directories.

Use --format to control what gets listed:

    p - path
    s - size
    t - modification time
    h - hash

e.g. --format \"tsp\" gives modification time, size and path.

With \"h\" the MD5 hash is shown unless --hash asks for another. The hash is
empty for directories, \"ERROR\" if it could not be read and \"UNSUPPORTED\"
if that hash type is not available for the file.

Separators are not escaped inside paths, so putting the path last is a good
strategy. To emulate md5sum:

    lsf -R --hash MD5 --format hp --separator \"  \" --files-only .";

#[derive(Parser, Debug)]
#[command(name = "lsf")]
#[command(about = "List directories and files formatted for parsing by scripts")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
struct Args {
    /// Directory (or single file) to list
    path: PathBuf,

    /// Output format, any of p (path), t (time), s (size), h (hash)
    #[arg(short = 'F', long = "format", default_value = DEFAULT_FORMAT)]
    format: String,

    /// Separator between the fields of a line
    #[arg(short = 's', long = "separator", default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// Append a slash to directory names (--dir-slash=false to disable)
    #[arg(
        short = 'd',
        long = "dir-slash",
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    dir_slash: bool,

    /// Hash used for h in the format: MD5|SHA-1|DropboxHash|QuickXorHash
    #[arg(long = "hash", value_name = "TYPE", default_value = "MD5")]
    hash: HashKind,

    /// Only list files
    #[arg(long = "files-only", conflicts_with = "dirs_only")]
    files_only: bool,

    /// Only list directories
    #[arg(long = "dirs-only")]
    dirs_only: bool,

    /// Recurse into the listing
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Descend at most N levels (1 = the path itself). Overrides -R
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Skip files and directories whose name matches GLOB (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Only list files modified less than DURATION ago (e.g. 30s, 5m, 1h, 7d)
    #[arg(long = "max-age", value_name = "DURATION", value_parser = parse_duration_string)]
    max_age: Option<Duration>,

    /// Only list files modified more than DURATION ago
    #[arg(long = "min-age", value_name = "DURATION", value_parser = parse_duration_string)]
    min_age: Option<Duration>,

    /// Number of parallel workers for reading directories
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Print more diagnostics to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors to stderr
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

/// Parse a duration string like "1h", "7d", "2w" into a Duration.
fn parse_duration_string(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

/// Set up stderr logging. RUST_LOG overrides the level from the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// The moment `age` before `now`, clamped to the epoch.
fn age_cutoff(now: SystemTime, age: Duration) -> SystemTime {
    now.checked_sub(age).unwrap_or(UNIX_EPOCH)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let format = FormatSpec::compile(&args.format).unwrap_or_else(|e| {
        eprintln!("lsf: {}", e);
        process::exit(EXIT_USAGE);
    });

    let filter = FilterMode::from_flags(args.files_only, args.dirs_only).unwrap_or_else(|| {
        eprintln!("lsf: --files-only and --dirs-only cannot be used together");
        process::exit(EXIT_USAGE);
    });

    if format.has_hash() && !LocalHasher::supports(args.hash) {
        log::warn!(
            "hash type {} is not supported by the local filesystem",
            args.hash
        );
    }

    let now = SystemTime::now();
    let walker_config = WalkerConfig {
        exclude: args.exclude.clone(),
        newer_than: args.max_age.map(|age| age_cutoff(now, age)),
        older_than: args.min_age.map(|age| age_cutoff(now, age)),
        parallel_workers: args.jobs,
    };

    let source = LocalFs::new(&args.path, walker_config).unwrap_or_else(|e| {
        eprintln!("lsf: {}", e);
        process::exit(EXIT_FATAL);
    });
    log::info!("listing {}", source.root().display());

    let config = ListConfig {
        format,
        render: RenderConfig {
            separator: args.separator.clone(),
            dir_slash: args.dir_slash,
            hash: args.hash,
        },
        filter,
        recursive: args.recursive,
        max_depth: args.max_depth,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut errors = ErrorCounter::new();

    match list(&source, &config, &mut out, &mut errors) {
        Ok(summary) if summary.errors > 0 => {
            let noun = if summary.errors == 1 { "error" } else { "errors" };
            eprintln!("lsf: {} {} while listing", summary.errors, noun);
            process::exit(EXIT_PARTIAL);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("lsf: {}", e);
            process::exit(EXIT_FATAL);
        }
    }
}
