mod args;
mod report;

use clap::Parser;
use log::{debug, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = report::run_report(&args) {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
