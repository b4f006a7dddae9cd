use std::path::PathBuf;

use clap::Parser;

/// Compare two SQLite database files and browse the differences in a
/// two-pane viewer.
#[derive(Parser, Debug)]
#[command(name = "dbcompare", version, about)]
pub struct Cli {
    /// Path to the first database file. Prompted for interactively when
    /// omitted.
    pub left: Option<PathBuf>,

    /// Path to the second database file. Prompted for interactively when
    /// omitted.
    pub right: Option<PathBuf>,

    /// Print a plain-text report to stdout instead of opening the viewer.
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
