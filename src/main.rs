use clap::Parser;
use std::path::PathBuf;
use utilkit::cli::dispatcher::Dispatcher;
use utilkit::cli::main_types::Cli;
use utilkit::storage::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        println!("Verbose mode is enabled");
        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }
    }

    let dispatcher = Dispatcher::new(config, cli.verbose);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error: {}", e);
        // Absent external tools get a distinct exit code so scripts can
        // tell "install poppler" apart from a bad input.
        let code = if e.is_missing_dependency() { 127 } else { 1 };
        std::process::exit(code);
    }
}
