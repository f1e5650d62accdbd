//! Interactive alarm list editor.
//!
//! The list lives for the duration of the session only.

use std::collections::HashSet;
use std::io::BufRead;

use clockburn_core::alarm::parse_time_of_day;
use clockburn_core::error::Result;
use clockburn_core::{AlarmList, ValidationError};

const HELP: &str = "commands: add HH:MM [label] | list | on N | off N | toggle N | rm N [N ...] | q";

/// Outcome of one input line.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Lines(Vec<String>),
    Quit,
}

fn render(alarms: &AlarmList) -> Vec<String> {
    if alarms.is_empty() {
        return vec!["no alarms".to_string()];
    }
    alarms
        .list()
        .iter()
        .enumerate()
        .map(|(i, alarm)| {
            let state = if alarm.enabled { "on" } else { "off" };
            format!("{:>2}. {}  [{state:<3}]  {}", i + 1, alarm.time_label(), alarm.label)
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Parse a 1-based display position.
fn position(alarms: &AlarmList, arg: &str) -> Result<uuid::Uuid, ValidationError> {
    let n: usize = arg.parse().map_err(|_| ValidationError::InvalidPosition {
        input: arg.to_string(),
    })?;
    n.checked_sub(1)
        .and_then(|i| alarms.id_at(i))
        .ok_or_else(|| ValidationError::OutOfBounds {
            collection: "alarms".into(),
            index: n,
            len: alarms.len(),
        })
}

fn handle(alarms: &mut AlarmList, line: &str) -> Result<Reply, ValidationError> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "" => Ok(Reply::Lines(Vec::new())),
        "q" | "quit" | "exit" => Ok(Reply::Quit),
        "help" | "?" => Ok(Reply::Lines(vec![HELP.to_string()])),
        "list" | "ls" => Ok(Reply::Lines(render(alarms))),
        "add" => {
            let (time, label) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let time = parse_time_of_day(time)?;
            alarms.add(time, label.trim());
            Ok(Reply::Lines(render(alarms)))
        }
        "on" | "off" | "toggle" => {
            let id = position(alarms, rest)?;
            let enabled = match cmd {
                "on" => true,
                "off" => false,
                _ => !alarms.get(id).map(|a| a.enabled).unwrap_or(false),
            };
            alarms.set_enabled(id, enabled);
            Ok(Reply::Lines(render(alarms)))
        }
        "rm" | "delete" => {
            // Resolve every position before removing anything.
            let ids = rest
                .split_whitespace()
                .map(|arg| position(alarms, arg))
                .collect::<Result<HashSet<_>, _>>()?;
            if ids.is_empty() {
                return Ok(Reply::Lines(vec![HELP.to_string()]));
            }
            alarms.remove_many(&ids);
            Ok(Reply::Lines(render(alarms)))
        }
        other => Ok(Reply::Lines(vec![format!("unknown command '{other}'"), HELP.to_string()])),
    }
}

pub fn run() -> Result<()> {
    let mut alarms = AlarmList::new();
    println!("{HELP}");

    for line in std::io::stdin().lock().lines() {
        match handle(&mut alarms, &line?) {
            Ok(Reply::Lines(lines)) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Ok(Reply::Quit) => break,
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
