use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use diffmerge::areas::comparison::Comparison;
use diffmerge::areas::options::CompareOptions;
use diffmerge::areas::settings::Settings;
use diffmerge::artifacts::core::OutputSink;
use diffmerge::artifacts::merge::step::MergeStep;
use diffmerge::commands::porcelain::diff::DiffViewOptions;
use diffmerge::commands::porcelain::merge::MergeOptions;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "diffmerge",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare two texts line by line and merge them",
    long_about = "This tool computes a line-based diff between two files, \
    classifying lines as unchanged, added, removed, modified or moved, \
    and lets you resolve the differences into a merged text step by step.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Log more details to stderr (repeatable)"
    )]
    verbose: u8,
    #[arg(long, global = true, value_name = "PATH", help = "Load limits and budgets from a settings file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[arg(short = 'i', long, help = "Ignore whitespace differences and letter case")]
    ignore_spaces_case: bool,
    #[arg(short = 'b', long, help = "Treat whitespace-only lines as empty")]
    ignore_blank: bool,
    #[arg(long, value_name = "PATTERN", help = "Strip matches of this regex before comparing")]
    regex: Option<String>,
}

impl From<&CompareArgs> for CompareOptions {
    fn from(args: &CompareArgs) -> Self {
        CompareOptions {
            ignore_spaces_case: args.ignore_spaces_case,
            ignore_blank: args.ignore_blank,
            regex: args.regex.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show the differences between two files",
        long_about = "This command compares two files line by line and prints a summary \
        followed by a unified view, a side-by-side view or the full result as JSON."
    )]
    Diff {
        #[arg(index = 1, help = "The original file")]
        original: PathBuf,
        #[arg(index = 2, help = "The changed file")]
        changed: PathBuf,
        #[command(flatten)]
        compare: CompareArgs,
        #[arg(short = 'y', long, help = "Show both sides next to each other")]
        side_by_side: bool,
        #[arg(short, long, help = "Hide unchanged lines")]
        collapse: bool,
        #[arg(long, help = "Print the comparison as JSON")]
        json: bool,
    },
    #[command(
        name = "blocks",
        about = "List the change blocks between two files",
        long_about = "This command prints every contiguous run of changed rows \
        as an inclusive START-END range of 1-based row numbers."
    )]
    Blocks {
        #[arg(index = 1, help = "The original file")]
        original: PathBuf,
        #[arg(index = 2, help = "The changed file")]
        changed: PathBuf,
        #[command(flatten)]
        compare: CompareArgs,
    },
    #[command(
        name = "merge",
        about = "Merge two files by applying accept steps",
        long_about = "This command compares two files, applies the given steps in order \
        and prints the merged text. A step is one of line:ROW:SIDE, block:START-END:SIDE, \
        all:SIDE, undo or redo, where SIDE is original or changed and rows are 1-based. \
        Rows nobody accepted keep the original side's line."
    )]
    Merge {
        #[arg(index = 1, help = "The original file")]
        original: PathBuf,
        #[arg(index = 2, help = "The changed file")]
        changed: PathBuf,
        #[command(flatten)]
        compare: CompareArgs,
        #[arg(short, long = "step", value_name = "STEP", help = "A merge step (repeatable)")]
        steps: Vec<MergeStep>,
        #[arg(short, long, help = "Write the merged text to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(
        name = "normalize",
        about = "Print the comparison key of every line",
        long_about = "This command shows the key each line of a file is compared by \
        under the given options. The displayed content of a diff is never normalized."
    )]
    Normalize {
        #[arg(index = 1, help = "The file to normalize")]
        file: PathBuf,
        #[command(flatten)]
        compare: CompareArgs,
    },
    #[command(
        name = "check-pattern",
        about = "Validate a strip pattern",
        long_about = "This command compiles a regex and runs it against a sample input \
        under the configured time budget, exactly as a comparison would before using it."
    )]
    CheckPattern {
        #[arg(index = 1, allow_hyphen_values = true, help = "The regex to validate")]
        pattern: String,
    },
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let mut comparison = Comparison::new(settings, OutputSink::detect());

    match &cli.command {
        Commands::Diff {
            original,
            changed,
            compare,
            side_by_side,
            collapse,
            json,
        } => {
            let view = DiffViewOptions {
                side_by_side: *side_by_side,
                collapse: *collapse,
                json: *json,
            };
            comparison
                .diff(original, changed, &compare.into(), view)
                .await?
        }
        Commands::Blocks {
            original,
            changed,
            compare,
        } => comparison.blocks(original, changed, &compare.into()).await?,
        Commands::Merge {
            original,
            changed,
            compare,
            steps,
            output,
        } => {
            let merge = MergeOptions {
                steps: steps.clone(),
                output: output.clone(),
            };
            comparison
                .merge(original, changed, &compare.into(), &merge)
                .await?
        }
        Commands::Normalize { file, compare } => {
            comparison.normalize(file, &compare.into()).await?
        }
        Commands::CheckPattern { pattern } => comparison.check_pattern(pattern).await?,
    }

    comparison.writer().finish()?;

    Ok(())
}
