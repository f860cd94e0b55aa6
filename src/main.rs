use clap::Parser;
use walkrs::cli::Cli;
use walkrs::drawing::WalkApp;
use walkrs::telemetry;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let interactive = cli.interactive;
    let mut config = cli.into_config();
    if interactive {
        config.prompt()?;
    }

    WalkApp::run(config)
}
