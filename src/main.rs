use clap::Parser;
use std::process;
use sweep_bench::{cli::SweepArgs, run, Config};

fn main() {
    let args = SweepArgs::parse();
    let config = Config::build(args).unwrap_or_else(|err| {
        eprintln!("Problem parsing arguments: {err}");
        process::exit(1);
    });

    if let Err(e) = run(&config) {
        eprintln!("Application error: {e}");
        process::exit(1);
    }
}
