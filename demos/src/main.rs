use clap::Parser;
use scenario::{ScenarioKind, ScenarioOptions};

mod scenario;

#[derive(clap::Parser)]
struct ProgramArgs {
    #[command(subcommand)]
    command: ScenarioKind,
    #[command(flatten)]
    options: ScenarioOptions,
    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value_t = log::LevelFilter::Debug)]
    log_level: log::LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = ProgramArgs::try_parse()?;
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level)
        .init();

    scenario::run(args.command, args.options)?;

    Ok(())
}
