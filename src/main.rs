mod args;
mod replay;

use clap::Parser;
use log::{info, warn, LevelFilter};
use snafu::ErrorCompat;

use ballot_state::error_message;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    info!("args: {:?}", args);

    if let Some(kind) = args.explain {
        println!("{}", error_message(kind.as_str()));
        return;
    }

    let input = match args.input {
        Some(x) => x,
        None => {
            eprintln!("No selections to replay: use --input (see --help)");
            std::process::exit(2);
        }
    };

    let res = replay::run_replay(args.config, input, args.out, args.reference);

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
