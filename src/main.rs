use anyhow::Result;
use clap::{Parser, Subcommand};
use codescrub::{Cleaner, DocBlockPruner, LogRewriter, Rules, Runner, Transform};
use std::path::PathBuf;
use tracing::{warn, Level};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Strip comments and logging calls from a mobile/web codebase, keeping copyright headers",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Actually modify files
    #[arg(long, global = true)]
    run: bool,

    /// Don't modify files (default; --run takes precedence)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Directory to process
    #[arg(long, global = true, default_value = "packages")]
    root: PathBuf,

    /// Load rules from a TOML file instead of the built-in rules
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

impl Args {
    fn is_dry_run(&self) -> bool {
        !self.run
    }
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Strip comments and logging calls, keeping copyright headers (default)
    #[default]
    Clean,
    /// Rewrite NSLog(@"...") call sites to RJLogInfo(@"...")
    RewriteLogs,
    /// Remove boilerplate documentation blocks from Objective-C sources
    PruneDocs,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.run && args.dry_run {
        warn!("--run given, ignoring --dry-run");
    }

    let rules = match &args.rules {
        Some(path) => Rules::from_file(path)?,
        None => Rules::embedded()?,
    };

    let transform: Box<dyn Transform> = match args.command.unwrap_or_default() {
        Command::Clean => Box::new(Cleaner::new(&rules)),
        Command::RewriteLogs => Box::new(LogRewriter::new(&rules.rewrite_logs)),
        Command::PruneDocs => Box::new(DocBlockPruner::new(&rules.prune_docs)),
    };

    Runner::new(&args.root, args.is_dry_run()).run(&rules, transform.as_ref())?;

    Ok(())
}
