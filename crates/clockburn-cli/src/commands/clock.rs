//! World clock display.

use std::future::Future;
use std::io::{IsTerminal, Write};
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use clockburn_core::error::Result;
use clockburn_core::stopwatch::{IntervalTicks, TickSource};
use clockburn_core::world_clock::common_zones;
use clockburn_core::{
    format_clock, ClockPrecision, ClockRow, Config, TimeZoneDraft, TimeZoneEntry, TimeZoneList,
    ValidationError,
};

#[derive(Args)]
pub struct ClockArgs {
    /// Extra zone for this run, as IDENTIFIER or IDENTIFIER=NAME
    #[arg(long = "zone", value_name = "ID[=NAME]")]
    zones: Vec<String>,
    /// Show only the zones given with --zone
    #[arg(long, requires = "zones")]
    only: bool,
    /// Show seconds
    #[arg(long, conflicts_with = "no_seconds")]
    seconds: bool,
    /// Hide seconds
    #[arg(long)]
    no_seconds: bool,
    /// Keep refreshing until interrupted
    #[arg(long, conflicts_with = "json")]
    watch: bool,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

/// Build an entry from `ID` or `ID=NAME` through the same draft the
/// add-zone form uses. Without a name the city part of the identifier is used.
fn parse_zone_arg(spec: &str) -> Result<TimeZoneEntry, ValidationError> {
    let (identifier, name) = match spec.split_once('=') {
        Some((id, name)) => (id.trim(), name.trim().to_string()),
        None => {
            let id = spec.trim();
            let city = id.rsplit('/').next().unwrap_or(id).replace('_', " ");
            (id, city)
        }
    };

    let mut draft = TimeZoneDraft::new();
    draft.select_identifier(identifier);
    draft.set_name(name);
    if draft.selected().is_none() {
        return Err(ValidationError::UnknownTimeZone(identifier.to_string()));
    }
    draft.confirm().ok_or(ValidationError::EmptyField {
        field: "name".into(),
    })
}

fn render_lines(rows: &[ClockRow], local: &str) -> Vec<String> {
    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(5);
    let mut lines = vec![format!("{:<width$}  {local}", "Local")];
    lines.extend(rows.iter().map(|r| format!("{:<width$}  {}", r.name, r.time)));
    lines
}

pub fn run(args: ClockArgs, config: &Config) -> Result<()> {
    let extra = args
        .zones
        .iter()
        .map(|spec| parse_zone_arg(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut list = if args.only {
        TimeZoneList::new()
    } else {
        TimeZoneList::with_entries(config.world_clock.zones.clone())
    };
    for entry in extra {
        list.add(entry);
    }

    let precision = if args.seconds {
        ClockPrecision::Seconds
    } else if args.no_seconds {
        ClockPrecision::Minutes
    } else {
        config.clock_precision()
    };

    if args.json {
        let now = Utc::now();
        let out = serde_json::json!({
            "local": format_clock(now, None, precision),
            "zones": list.render(now, precision),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !args.watch {
        let now = Utc::now();
        for line in render_lines(&list.render(now, precision), &format_clock(now, None, precision)) {
            println!("{line}");
        }
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut out = std::io::stdout();
        let redraw = out.is_terminal();
        let shutdown = async {
            // A failed listener just stops the display.
            let _ = tokio::signal::ctrl_c().await;
        };
        watch(&mut out, redraw, &list, precision, config.refresh_interval(), shutdown).await
    })?;
    Ok(())
}

/// Redraw the clock block every `period` until `shutdown` completes.
/// Returns the number of frames drawn.
async fn watch<W: Write>(
    out: &mut W,
    redraw: bool,
    list: &TimeZoneList,
    precision: ClockPrecision,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<usize> {
    let mut ticks = IntervalTicks::new(period);
    // One listener for the whole loop, so an interrupt during a redraw is kept.
    tokio::pin!(shutdown);
    let mut previous_lines = 0;
    let mut frames = 0;

    loop {
        let now = Utc::now();
        let lines = render_lines(&list.render(now, precision), &format_clock(now, None, precision));
        if redraw && previous_lines > 0 {
            // Move back to the top of the previous block.
            write!(out, "\x1b[{previous_lines}F")?;
        }
        for line in &lines {
            writeln!(out, "{line}\x1b[K")?;
        }
        if !redraw {
            writeln!(out)?;
        }
        out.flush()?;
        previous_lines = lines.len();
        frames += 1;

        tokio::select! {
            _ = ticks.next_tick() => {}
            _ = &mut shutdown => break,
        }
    }
    Ok(frames)
}

/// `zones` subcommand.
pub fn list_presets(json: bool) -> Result<()> {
    let presets = common_zones();
    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
    } else {
        for zone in presets {
            println!("{:<10}  {}", zone.name, zone.identifier);
        }
    }
    Ok(())
}
