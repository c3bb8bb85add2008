use clap::Parser;
use miette::Result;

use todo_server::{cli, trace};

#[derive(Debug, Parser)]
#[clap(name = "todo-server", version)]
struct Options {
    #[clap(subcommand)]
    command: cli::Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Options::parse();

    let _guard = trace::setup_tracing();

    cli::run(opts.command).await
}
