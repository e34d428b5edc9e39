use clap::Parser;
use paycomp::{Cli, default_data_dir, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &cli.log_level)?;

    if let Err(err) = run(&cli) {
        tracing::error!("{} failed: {err:#}", cli.command.name());
        return Err(err);
    }

    tracing::info!("{} finished", cli.command.name());
    Ok(())
}
