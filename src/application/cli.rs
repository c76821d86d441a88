use crate::application::{CalendarViewResult, CalendarWidget, PickerApp, TextRenderer};
use crate::domain::{MacroKind, MonthKey};
use crate::infrastructure::{ControlBinding, ControlParser, ControlValue, FileControl, parse_date};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rangepicker")]
#[command(about = "A terminal date-range picker with quick-select presets")]
#[command(version)]
pub struct Cli {
    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a date range interactively (default)
    Pick,
    /// Pick a single date interactively
    Date,
    /// Apply a preset range and print it
    Macro {
        /// Preset name, e.g. this-week, last-30-days
        kind: MacroKind,
        /// Store the result as the current value
        #[arg(short, long)]
        save: bool,
    },
    /// Print a month grid with the stored selection
    Month {
        /// Month to print (YYYY-MM format, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Print the stored value
    Show,
}

fn parse_month(input: &str) -> anyhow::Result<MonthKey> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{}', expected YYYY-MM", input))?;
    MonthKey::containing(first).with_context(|| format!("month {} is out of range", input))
}

fn print_value(value: &ControlValue) -> anyhow::Result<()> {
    println!("{}", ControlParser::new().serialize(value)?);
    Ok(())
}

fn print_result(result: CalendarViewResult) -> anyhow::Result<()> {
    match result {
        CalendarViewResult::Submitted(value) => print_value(&value),
        CalendarViewResult::Closed => Ok(()),
    }
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let mut app = PickerApp::from_env();

        if let Some(today) = &cli.today {
            app.config_mut().today =
                parse_date(today).with_context(|| format!("invalid date '{}'", today))?;
        }

        app.init_logging()?;
        log::info!("starting with today = {}", app.config().today);

        match cli.command.unwrap_or(Commands::Pick) {
            Commands::Pick => {
                let mut picker = app.range_picker()?;
                let result = app.run_tui(&mut picker)?;
                print_result(result)?;
            }
            Commands::Date => {
                let mut picker = app.date_picker()?;
                let result = app.run_tui(&mut picker)?;
                print_result(result)?;
            }
            Commands::Macro { kind, save } => {
                let mut picker = app.range_picker()?;
                picker.apply_macro(kind);
                log::info!("applied macro {}", kind);

                if save {
                    match picker.submit()? {
                        Some(value) => print_value(&value)?,
                        None => println!("{}", picker.summary()),
                    }
                } else {
                    println!("{}", picker.summary());
                }
            }
            Commands::Month { month } => {
                let mut picker = app.range_picker()?;
                let key = match month {
                    Some(month) => parse_month(&month)?,
                    None => MonthKey::containing(app.config().today)
                        .context("today is out of range")?,
                };
                picker.show_month(key);
                print!("{}", TextRenderer::render_month(&picker));
            }
            Commands::Show => {
                let control = FileControl::new(&app.config().state_file);
                match control.read() {
                    Some(value) => print_value(&value)?,
                    None => println!("No value stored"),
                }
            }
        }

        Ok(())
    }
}
