//! `range-presets` - resolve and match preset date ranges from the shell.
//!
//! All output is JSON on stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use range_presets::{
    end_of_day, match_preset_with_options, parse_day, parse_instant, parse_timezone,
    resolve_preset_with_options, start_of_day, DateInterval, PresetId, ResolveOptions,
    WeekStartDay, CATALOG,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "range-presets")]
#[command(version, about = "Resolve and match preset date ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the preset catalog in search order
    List,

    /// Resolve a preset id to a concrete interval
    Resolve {
        /// Preset id (e.g. last7, thisWeek, lastMonth)
        id: String,

        #[command(flatten)]
        anchor: AnchorArgs,
    },

    /// Find the preset an interval corresponds to
    Match {
        /// Start day (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: String,

        /// End day (YYYY-MM-DD or RFC 3339); omit for an open interval
        #[arg(long)]
        to: Option<String>,

        #[command(flatten)]
        anchor: AnchorArgs,
    },
}

#[derive(Args, Debug)]
struct AnchorArgs {
    /// Reference instant (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<String>,

    /// IANA time zone for calendar arithmetic; defaults to the host zone
    #[arg(long)]
    tz: Option<String>,

    /// First day of the week
    #[arg(long, value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WeekStart {
    Sunday,
    Monday,
}

impl AnchorArgs {
    fn options(&self) -> ResolveOptions {
        let week_start = match self.week_start {
            WeekStart::Sunday => WeekStartDay::Sunday,
            WeekStart::Monday => WeekStartDay::Monday,
        };
        ResolveOptions { week_start }
    }

    fn now_in<Z: TimeZone>(&self, tz: &Z) -> Result<DateTime<Z>> {
        match &self.now {
            Some(s) => Ok(parse_instant(s, tz)?),
            None => Ok(Utc::now().with_timezone(tz)),
        }
    }
}

#[derive(Serialize)]
struct ResolveOutput {
    preset: PresetId,
    label: &'static str,
    from: String,
    to: Option<String>,
}

#[derive(Serialize)]
struct MatchOutput {
    preset: Option<PresetId>,
    label: Option<&'static str>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!(command = ?cli.command, "running");

    let tz_name = match &cli.command {
        Command::List => None,
        Command::Resolve { anchor, .. } | Command::Match { anchor, .. } => anchor.tz.as_deref(),
    };
    let output = match tz_name {
        Some(name) => execute(&cli.command, &parse_timezone(name)?)?,
        None => execute(&cli.command, &Local)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute<Z>(command: &Command, tz: &Z) -> Result<serde_json::Value>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    match command {
        Command::List => Ok(serde_json::to_value(CATALOG)?),
        Command::Resolve { id, anchor } => {
            let now = anchor.now_in(tz)?;
            let interval = resolve_preset_with_options(id, &now, &anchor.options())
                .with_context(|| format!("resolving preset '{id}'"))?;
            let preset: PresetId = id.parse()?;
            Ok(serde_json::to_value(ResolveOutput {
                preset,
                label: preset.label(),
                from: format_instant(&interval.from),
                to: interval.to.as_ref().map(format_instant),
            })?)
        }
        Command::Match { from, to, anchor } => {
            let now = anchor.now_in(tz)?;
            let from_day = parse_day(from, tz).context("parsing --from")?;
            let to_day = to
                .as_deref()
                .map(|s| parse_day(s, tz))
                .transpose()
                .context("parsing --to")?;
            let interval = DateInterval::new(
                start_of_day(tz, from_day),
                to_day.map(|day| end_of_day(tz, day)),
            );
            let preset = match_preset_with_options(&interval, &now, &anchor.options());
            Ok(serde_json::to_value(MatchOutput {
                preset,
                label: preset.map(PresetId::label),
            })?)
        }
    }
}

fn format_instant<Z>(dt: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Millis, false)
}
