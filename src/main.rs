use clap::Parser;
use env_logger::Env;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        // No subcommand → launch TUI
        None => taskdeck::tui::run(cli.data_dir.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
