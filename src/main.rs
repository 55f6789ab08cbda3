use anyhow::Result;
use powerrank::cli::{self, Cli, Commands};
use powerrank::commands::{plan::PlanConfig, score::ScoreConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let formatting = cli::formatting_config(cli.plain);

    match cli.command {
        Commands::Score { input, common } => {
            powerrank::commands::score::handle_score(ScoreConfig {
                input,
                config: common.config,
                format: common.format,
                output: common.output,
                formatting,
            })
        }
        Commands::Plan {
            goals,
            current,
            target_index,
            day,
            days_in_period,
            date,
            common,
        } => powerrank::commands::plan::handle_plan(PlanConfig {
            goals,
            current,
            target_index,
            day,
            days_in_period,
            date,
            config: common.config,
            format: common.format,
            output: common.output,
            formatting,
        }),
        Commands::Init { force } => powerrank::commands::init::init_config(force),
    }
}
