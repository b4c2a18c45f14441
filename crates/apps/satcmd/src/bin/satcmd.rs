use clap::Parser;
use satcmd::cli::app::{exit_code, init_logging, run_cli, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run_cli(cli) {
        eprintln!("satcmd: {err:#}");
        std::process::exit(exit_code(&err));
    }
}
