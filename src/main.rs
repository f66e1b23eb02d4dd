use clap::Parser;
use color_eyre::eyre::Result;

use foldtext::{
    infrastructure::{cli::Cli, config::Config, tui::Tui},
    integration::app_runner::{AppRunner, SAMPLE_TEXT},
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    args.apply(&mut config.fold);
    let text = args.read_text(SAMPLE_TEXT)?;

    let tui = Tui::new()?
        .tick_rate(args.tick_rate)
        .frame_rate(args.frame_rate)
        .mouse(true);
    let mut runner = AppRunner::new(&config, text, tui);
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
