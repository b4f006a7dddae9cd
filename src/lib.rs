pub mod cli;
pub mod db;
pub mod report;
pub mod security;
pub mod tui;

use anyhow::bail;

use crate::db::comparator::compare_databases;
use crate::tui::App;

/// Initialize logging for the binary. `RUST_LOG` wins when set; otherwise
/// the verbosity flag picks the level.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Entry point shared by the binary: dispatch to the plain report or the
/// interactive viewer.
pub fn run(cli: cli::Cli) -> anyhow::Result<()> {
    if cli.plain {
        let (Some(left), Some(right)) = (&cli.left, &cli.right) else {
            bail!("--plain requires both database paths");
        };
        let result = compare_databases(left, right)?;
        print!("{}", report::render_report(&result));
        return Ok(());
    }

    let app = match (&cli.left, &cli.right) {
        (Some(left), Some(right)) => App::with_paths(left, right),
        _ => App::new(),
    };
    tui::run(app)
}
