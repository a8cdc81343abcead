mod cmd;
mod logging;

use crate::cmd::cli::Cli;
use crate::cmd::config::Config;

use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg: Config = cli.into_config();
    if let Err(e) = cfg.run() {
        eprintln!("{e}");
        process::exit(1);
    }
}
