// File: crates/bookdesk_console/src/bin/console.rs
//! Terminal front end for the admin console.
//!
//! Runs the page-load sequence against `console.api_base_url`, optionally
//! performs one action, and prints the rendered regions.

use bookdesk_common::logging;
use bookdesk_config::load_config;
use bookdesk_console::{
    ActionOutcome, AdminConsole, ConsoleError, HttpAdminApi, RenderedRegions, RuLocale,
    TerminalDialogs,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "bookdesk-console",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for the bookdesk schedule service",
    long_about = None
)]
struct Cli {
    /// Override `console.api_base_url`
    #[arg(global = true, long = "api")]
    api: Option<String>,

    /// Answer every confirmation with yes
    #[arg(global = true, short = 'y', long = "yes")]
    yes: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load dates and requests and print them (default)
    Show,

    /// Add the following week of dates
    AddWeek,

    /// Add the following month of dates
    AddMonth,

    /// Add one specific date
    AddDate {
        /// Date (YYYY-MM-DD)
        date: String,
        #[arg(long = "start", default_value = "09:00")]
        start: String,
        #[arg(long = "end", default_value = "17:00")]
        end: String,
        /// Slot length in minutes
        #[arg(long = "interval", default_value_t = 60)]
        interval: i64,
    },

    /// Delete one date
    Delete { id: String },

    /// Select several dates and delete them together
    DeleteMany {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Set which slots of a date are booked, by index
    Slots {
        date_id: String,
        /// Indexes of booked slots; all others become free
        #[arg(long = "booked", value_delimiter = ',')]
        booked: Vec<usize>,
    },
}

fn print_regions(regions: &RenderedRegions) {
    if !regions.notice.is_empty() {
        println!("== notice ==\n{}\n", regions.notice);
    }
    println!("== datesGrid ==\n{}\n", regions.dates_grid);
    if regions.modal_display == "block" {
        println!("== modalContent ==\n{}\n", regions.modal_content);
    }
    println!("== requestsList ==\n{}", regions.requests_list);
}

async fn run_command(
    console: &mut AdminConsole<HttpAdminApi, TerminalDialogs>,
    command: Command,
) -> Result<(), ConsoleError> {
    match command {
        Command::Show => Ok(()),
        Command::AddWeek => console.add_next_week().await,
        Command::AddMonth => console.add_next_month().await,
        Command::AddDate {
            date,
            start,
            end,
            interval,
        } => {
            let form = console.form_mut();
            form.date = date;
            form.start_time = start;
            form.end_time = end;
            form.interval = interval;
            console.add_custom_date().await
        }
        Command::Delete { id } => report(console.delete_date(&id).await?),
        Command::DeleteMany { ids } => {
            for id in &ids {
                console.toggle_date_selection(id, true);
            }
            report(console.delete_selected().await?)
        }
        Command::Slots { date_id, booked } => {
            console.edit_slots(&date_id).await?;
            let count = console
                .view()
                .editor
                .as_ref()
                .map(|editor| editor.checkboxes.len())
                .unwrap_or(0);
            for index in 0..count {
                console.set_slot_checked(index, booked.contains(&index));
            }
            console.save_slots(&date_id).await
        }
    }
}

fn report(outcome: ActionOutcome) -> Result<(), ConsoleError> {
    if outcome == ActionOutcome::Cancelled {
        eprintln!("Cancelled");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_name(&config.log_level);

    let mut console_config = config.console.clone();
    if let Some(api) = cli.api {
        console_config.api_base_url = api;
    }

    let api = match HttpAdminApi::from_config(&console_config) {
        Ok(api) => api,
        Err(e) => {
            logging::log_error(&e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let locale = match RuLocale::from_zone_name(&console_config.time_zone) {
        Ok(locale) => locale,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut console = AdminConsole::new(api, TerminalDialogs::new(cli.yes), locale);
    if let Err(e) = console.init().await {
        print_regions(&console.render());
        eprintln!("Initial load from {} failed: {}", console.api().base_url(), e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Some(command) => run_command(&mut console, command).await,
        None => Ok(()),
    };
    print_regions(&console.render());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
