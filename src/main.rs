use anyhow::Result;
use clap::{Parser, Subcommand};

use stepwise::app::{App, AppOutcome};
use stepwise::config::Config;
use stepwise::logging;
use stepwise::ui::{install_panic_hook, keybindings};

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(about = "Multi-step wizard demo for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Step to open first (overrides config)
    #[arg(short, long)]
    start: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print keyboard shortcuts
    Keys,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(start) = cli.start {
        config.wizard.initial_position = start;
    }

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;
    if let Some(path) = &logging_handle.log_file_path {
        tracing::info!(path = %path.display(), "logging to file");
    }

    match cli.command {
        Some(Commands::Keys) => {
            print!("{}", keybindings::shortcut_table());
        }
        None => {
            install_panic_hook();
            let mut app = App::new(config)?;
            match app.run()? {
                AppOutcome::Finished(summary) => println!("{}", summary),
                AppOutcome::Cancelled => println!("Cancelled"),
            }
        }
    }

    Ok(())
}
