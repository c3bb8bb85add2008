mod run;

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the TODO API server
    Run(run::Options),
}

pub async fn run(cmd: Command) -> miette::Result<()> {
    match cmd {
        Command::Run(opts) => run::run(opts).await,
    }
}
