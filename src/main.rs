use anyhow::Result;
use clap::Parser;
use skyportal::{cli::Cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::sink_for(cli.log_file.as_deref(), cli.one_shot))?;
    cli.validate()?;
    skyportal::run(cli).await
}
