use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use edlist::format::OutputFormat;
use edlist::{EdlistConfig, LogEditObserver, RootView};

/// Education list: a form and a card list held in memory
///
/// Entries live only for the lifetime of the process. The form starts at
/// its configured defaults and the list at its seed entries.
///
/// CONFIGURATION:
///
///   edlist.toml in the working directory (or --config / EDLIST_CONFIG)
///   sets form defaults, the zone used for dates, seed entries, and a log
///   file for the terminal UI.
#[derive(Parser)]
#[command(name = "edlist")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'edlist <command> --help' for more information on a specific command.")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "EDLIST_CONFIG", default_value = edlist::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal UI
    ///
    /// Fill in the form, Save appends an entry, Reset restores the defaults.
    /// Selecting an entry requests an edit, which is only logged.
    #[cfg(feature = "tui")]
    #[command(name = "ui")]
    Ui,

    /// Print the page: draft values and entries, newest first
    List {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Fill the form, save once, and print the resulting page
    ///
    /// Dates go through the same parse-and-reformat as the date inputs, so
    /// loose shapes like 2022-6-1 or 06/01/2022 are accepted. Nothing is
    /// persisted.
    Add {
        /// School name
        #[arg(long)]
        name: String,

        /// Start date (form default when omitted)
        #[arg(long)]
        from: Option<String>,

        /// End date (form default when omitted)
        #[arg(long)]
        to: Option<String>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EdlistConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let _telemetry = edlist::telemetry::init(&config.log);

    let mut view = RootView::new(config.build_panel(Box::new(LogEditObserver)));

    match cli.command {
        #[cfg(feature = "tui")]
        Commands::Ui => {
            let view = edlist_tui::run(view)?;
            tracing::debug!(entries = view.panel().len(), "session ended");
            Ok(())
        }
        Commands::List { format } => print(&view, format),
        Commands::Add {
            name,
            from,
            to,
            format,
        } => {
            let panel = view.panel_mut();
            let form = panel.form_mut();
            form.set_name(name);
            if let Some(from) = from {
                form.set_from(&from);
            }
            if let Some(to) = to {
                form.set_to(&to);
            }
            panel.save_draft();
            print(&view, format)
        }
    }
}

fn print(view: &RootView, format: OutputFormat) -> Result<()> {
    let out = format.render(view)?;
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}
