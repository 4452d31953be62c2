use clap::Parser;
use color_eyre::Result;
use wallai::{Cli, init_logger, load_defaults, summary};
use wallai_engine::{Pollinations, TermuxWallpaper, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    init_logger(args.verbose);

    let defaults = load_defaults(args.config.as_deref())?;
    let config = args.into_run_config(defaults);
    let report = run(&config, &Pollinations::new(), &TermuxWallpaper::default()).await?;

    println!("{}", summary(&report));
    Ok(())
}
