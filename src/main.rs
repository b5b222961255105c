mod activity;
mod age;
mod aggregate;
mod cmd;
mod config;
mod eligibility;
mod report;
mod stats;
mod svg;

use cmd::calculate::Outputs;
use cmd::{CommandLine, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    init_tracing(commands.verbose)?;

    match commands.command {
        Commands::Calculate {
            person,
            view,
            json,
            csv,
            svg_dir,
        } => cmd::calculate::calculate(
            &person,
            Outputs {
                view,
                json,
                csv: csv.as_deref(),
                svg_dir: svg_dir.as_deref(),
            },
        ),
        Commands::Budget { person } => cmd::budget::budget(&person),
        Commands::Categories => {
            print!("{}", report::categories_view());
            Ok(())
        }
    }
}
