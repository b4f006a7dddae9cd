use clap::Parser;

use dbcompare::cli::Cli;

fn main() {
    let cli = Cli::parse();

    dbcompare::init_logging(cli.verbose);

    if let Err(err) = dbcompare::run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
