use clap::Parser;
use dropgate::adapter::inbound::cli::command::{Cli, Commands};
use dropgate::adapter::inbound::cli::{check, output, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Check(args) => check::execute(args).await,
    };

    if let Err(e) = result {
        output::error(&e);
        std::process::exit(1);
    }
}
