//! Replay scripts for driving a mounted picker from the command line.
//!
//! A script is plain text with one command per line:
//!
//! ```text
//! # ms  phase  key
//! 0     down   p
//! 200   down   space
//! 350   up     space
//! click pen
//! click panel
//! disable
//! enable
//! ```
//!
//! Key events carry a millisecond offset from the start of the script; offsets
//! must never decrease. Blank lines and `#` comments are ignored, so the space
//! key is spelled `space`.

use crate::input::{
    InputSurface, Key, KeyEvent, MountedPicker, Tool, ToolHost, ToolPicker, ToolSlot,
};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors produced while parsing a replay script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },

    #[error("line {line}: expected 'down' or 'up', found '{found}'")]
    InvalidPhase { line: usize, found: String },

    #[error("line {line}: missing key name")]
    MissingKey { line: usize },

    #[error("line {line}: {message}")]
    InvalidTool { line: usize, message: String },

    #[error("line {line}: timestamp {at}ms is earlier than previous {previous}ms")]
    OutOfOrder { line: usize, at: u64, previous: u64 },

    #[error("line {line}: unrecognized command '{text}'")]
    UnknownCommand { line: usize, text: String },
}

/// A single replayable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    KeyDown { at_ms: u64, key: Key },
    KeyUp { at_ms: u64, key: Key },
    ClickTool(Tool),
    ClickPanel,
    DisableShortcuts,
    EnableShortcuts,
}

/// A command together with the script line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// Parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        let mut last_ms = 0u64;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let command = parse_command(line, content)?;
            if let Command::KeyDown { at_ms, .. } | Command::KeyUp { at_ms, .. } = command {
                if at_ms < last_ms {
                    return Err(ScriptError::OutOfOrder {
                        line,
                        at: at_ms,
                        previous: last_ms,
                    });
                }
                last_ms = at_ms;
            }

            steps.push(Step { line, command });
        }

        Ok(Self { steps })
    }
}

fn parse_command(line: usize, content: &str) -> Result<Command, ScriptError> {
    let mut parts = content.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(ScriptError::UnknownCommand {
            line,
            text: content.to_string(),
        });
    };

    match head.to_ascii_lowercase().as_str() {
        "click" => match parts.next() {
            Some(target) if target.eq_ignore_ascii_case("panel") => Ok(Command::ClickPanel),
            Some(target) => target
                .parse::<Tool>()
                .map(Command::ClickTool)
                .map_err(|message| ScriptError::InvalidTool { line, message }),
            None => Err(ScriptError::InvalidTool {
                line,
                message: "missing tool name".to_string(),
            }),
        },
        "disable" => Ok(Command::DisableShortcuts),
        "enable" => Ok(Command::EnableShortcuts),
        _ if head.starts_with(|c: char| c.is_ascii_digit()) => {
            let at_ms = head
                .parse::<u64>()
                .map_err(|_| ScriptError::InvalidTimestamp {
                    line,
                    value: head.to_string(),
                })?;
            let phase = parts.next().ok_or(ScriptError::MissingKey { line })?;
            let key_name = parts.next().ok_or(ScriptError::MissingKey { line })?;
            let key = Key::from_name(key_name);

            match phase.to_ascii_lowercase().as_str() {
                "down" => Ok(Command::KeyDown { at_ms, key }),
                "up" => Ok(Command::KeyUp { at_ms, key }),
                _ => Err(ScriptError::InvalidPhase {
                    line,
                    found: phase.to_string(),
                }),
            }
        }
        _ => Err(ScriptError::UnknownCommand {
            line,
            text: content.to_string(),
        }),
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub displayed: Tool,
    pub persisted: Tool,
    pub panel_open: bool,
}

/// Replays `script` through a freshly mounted picker, writing one status
/// line per step to `out`.
pub fn replay<W: Write>(
    script: &Script,
    picker: ToolPicker,
    host: ToolSlot,
    out: &mut W,
) -> io::Result<ReplaySummary> {
    let surface = InputSurface::new();
    let host = Rc::new(RefCell::new(host));
    let mounted = MountedPicker::mount(&surface, picker, Rc::clone(&host));
    let start = Instant::now();
    let at = |ms: u64| start + Duration::from_millis(ms);

    for step in &script.steps {
        match step.command {
            Command::KeyDown { at_ms, key } => {
                surface.dispatch(KeyEvent::down(key, at(at_ms)));
            }
            Command::KeyUp { at_ms, key } => {
                surface.dispatch(KeyEvent::up(key, at(at_ms)));
            }
            Command::ClickTool(tool) => {
                mounted.click_tool(tool);
            }
            Command::ClickPanel => {
                mounted.click_panel_toggle();
            }
            Command::DisableShortcuts => host.borrow_mut().shortcuts_disabled = true,
            Command::EnableShortcuts => host.borrow_mut().shortcuts_disabled = false,
        }

        writeln!(
            out,
            "{}: tool={} persisted={} panel={}",
            step.line,
            mounted.displayed_tool(),
            host.borrow().current_tool(),
            if mounted.panel_open() { "open" } else { "closed" },
        )?;
    }

    let summary = ReplaySummary {
        displayed: mounted.displayed_tool(),
        persisted: mounted.persisted_tool(),
        panel_open: mounted.panel_open(),
    };
    mounted.unmount();
    Ok(summary)
}
