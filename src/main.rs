use auth_chain::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => cli::check::run(args).await,
        Command::List(args) => cli::list::run(args).await,
        Command::Simulate(args) => cli::simulate::run(args).await,
    }
}
