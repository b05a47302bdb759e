use clap::Parser;
use surebet::adapter::inbound::cli::command::Cli;
use surebet::adapter::inbound::cli::dispatch;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    dispatch::run(cli).await
}
