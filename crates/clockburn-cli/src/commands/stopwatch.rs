//! Interactive stopwatch session.
//!
//! One select loop handles ticks and input lines strictly one at a time, so
//! the engine is never touched concurrently.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Args;
use clockburn_core::error::Result;
use clockburn_core::stopwatch::{Command, Control, IntervalTicks, StopwatchEngine, TickSource};
use clockburn_core::{format_elapsed, Config, Event};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct StopwatchArgs {
    /// Tick period in milliseconds (defaults to stopwatch.tick_interval_ms)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,
    /// Print the final state as JSON on exit
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Press(Control),
    Run(Command),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "s" => Input::Press(Control::Primary),
        "l" => Input::Press(Control::Secondary),
        // Named commands mean what they say, whatever the run state.
        "start" => Input::Run(Command::Start),
        "stop" => Input::Run(Command::Stop),
        "lap" => Input::Run(Command::RecordLap),
        "r" | "reset" => Input::Run(Command::Reset),
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

fn controls_hint(engine: &StopwatchEngine) -> String {
    let running = engine.is_running();
    format!(
        "[enter] {}  [l] {}  [q] Quit",
        Control::Primary.label(running),
        Control::Secondary.label(running)
    )
}

/// Text shown after an accepted command.
fn describe(event: &Event) -> String {
    let ms = Duration::from_millis;
    match event {
        Event::StopwatchStarted { elapsed_ms, .. } => {
            format!("started at {}", format_elapsed(ms(*elapsed_ms)))
        }
        Event::StopwatchStopped { elapsed_ms, .. } => {
            format!("stopped at {}", format_elapsed(ms(*elapsed_ms)))
        }
        Event::LapRecorded {
            number,
            elapsed_ms,
            split_ms,
            ..
        } => format!(
            "Lap {number:<3} {}  (+{})",
            format_elapsed(ms(*elapsed_ms)),
            format_elapsed(ms(*split_ms))
        ),
        Event::StopwatchReset { .. } => "reset".to_string(),
        Event::StateSnapshot { snapshot, .. } => format_elapsed(ms(snapshot.elapsed_ms)),
    }
}

fn lap_table(engine: &StopwatchEngine) -> Vec<String> {
    engine
        .lap_rows()
        .iter()
        .map(|lap| {
            format!(
                "Lap {:<3} {}  (+{})",
                lap.number,
                format_elapsed(lap.elapsed),
                format_elapsed(lap.split)
            )
        })
        .collect()
}

pub fn run(args: StopwatchArgs, config: &Config) -> Result<()> {
    let period = args
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_interval());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let engine = runtime.block_on(session(period));
    // The stdin reader blocks on a thread that cannot be cancelled.
    runtime.shutdown_background();
    let engine = engine?;

    println!("{}", format_elapsed(engine.elapsed()));
    for line in lap_table(&engine) {
        println!("{line}");
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot_event())?);
    }
    Ok(())
}

async fn session(period: Duration) -> Result<StopwatchEngine> {
    let mut engine = StopwatchEngine::new();
    let mut ticks = IntervalTicks::new(period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let live = std::io::stdout().is_terminal();

    tracing::debug!(period_ms = ticks.period().as_millis() as u64, "stopwatch session started");
    println!("{}", controls_hint(&engine));

    loop {
        tokio::select! {
            Some(interval) = ticks.next_tick() => {
                engine.tick(interval);
                if live && engine.is_running() {
                    let mut out = std::io::stdout().lock();
                    write!(out, "\r{}", format_elapsed(engine.elapsed()))?;
                    out.flush()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if live {
                    // Clear the live readout line before printing.
                    print!("\r\x1b[2K");
                }
                let command = match parse_input(&line) {
                    Input::Press(control) => Some(control.resolve(&engine)),
                    Input::Run(command) => Some(command),
                    Input::Help => {
                        println!("{}", controls_hint(&engine));
                        None
                    }
                    Input::Quit => break,
                    Input::Unknown(other) => {
                        println!("unknown input '{other}'; {}", controls_hint(&engine));
                        None
                    }
                };
                if let Some(command) = command {
                    match engine.apply(command) {
                        Some(event) => println!("{}", describe(&event)),
                        None => println!("{} ignored", command.label()),
                    }
                    println!("{}", controls_hint(&engine));
                }
            }
        }
    }

    if live {
        println!();
    }
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_maps_keys_to_controls() {
        assert_eq!(parse_input(""), Input::Press(Control::Primary));
        assert_eq!(parse_input(" S "), Input::Press(Control::Primary));
        assert_eq!(parse_input("l"), Input::Press(Control::Secondary));
        assert_eq!(parse_input("reset"), Input::Run(Command::Reset));
        assert_eq!(parse_input("stop"), Input::Run(Command::Stop));
        assert_eq!(parse_input("lap"), Input::Run(Command::RecordLap));
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input("?"), Input::Help);
        assert_eq!(parse_input("x"), Input::Unknown("x".into()));
    }

    #[test]
    fn hint_follows_run_state() {
        let mut engine = StopwatchEngine::new();
        assert_eq!(controls_hint(&engine), "[enter] Start  [l] Reset  [q] Quit");
        engine.start();
        assert_eq!(controls_hint(&engine), "[enter] Stop  [l] Lap  [q] Quit");
    }

    #[test]
    fn lap_lines_show_total_and_split() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        engine.tick(Duration::from_millis(2_500));
        engine.record_lap();
        engine.tick(Duration::from_millis(500));
        let event = engine.record_lap().unwrap();

        assert_eq!(describe(&event), "Lap 2   00:03.00  (+00:00.50)");
        assert_eq!(
            lap_table(&engine),
            ["Lap 1   00:02.50  (+00:02.50)", "Lap 2   00:03.00  (+00:00.50)"]
        );
    }
}
