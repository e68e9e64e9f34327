//! diagram-store CLI - run use-case diagram editing scripts

mod cli;
mod script;
mod session;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::DiagramStoreApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
