/// Quote: fetch one random quote and print it.
///
/// Usage: quote
use clap::Parser;
use micro_utopia::quote;
use std::process;

/// Fetch a random quote from the What Does Trump Think API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() {
    micro_utopia::logging::init();
    let _args = Args::parse();

    let code = quote::run(quote::fetch, &mut std::io::stdout(), &mut std::io::stderr()).unwrap_or(1);
    process::exit(code);
}
