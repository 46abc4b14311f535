use brick::cli::{chat, extract, Cli, Commands, ConfigCommands};
use clap::Parser;
use std::process::ExitCode;

async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Commands::Serve(args) => return brick::cli::serve::run_serve(args).await,
        Commands::Completions(args) => {
            brick::cli::handle_completions(&args);
            return Ok(());
        }
        Commands::Chat(args) => chat::handle_chat(&args).await?,
        Commands::Extract(args) => extract::handle_extract(&args)?,
        Commands::Config(ConfigCommands::Init(args)) => brick::cli::handle_config_init(&args)?,
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
