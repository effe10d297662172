//! Replay of navigation menu event scripts.
//!
//! Each script line is `<ms> <action> <arguments>`:
//!
//! ```text
//! 0    click toggler
//! 120  key Escape
//! 300  resize 1024
//! 450  anchor #about 900 64
//! ```
//!
//! Click targets are `toggler`, `link`, `menu` and `outside`. An `anchor`
//! line takes the link's href, the target's top offset (`-` when no element
//! matches) and the header height. Blank lines and lines starting with `#`
//! are ignored.

use std::io::{BufRead, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::CliError;
use crate::domain::menu::{
    ClickTarget, MenuEvent, MenuState, ResizeDebouncer, anchor_scroll_target,
};

/// Problems with a single script line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The line has no action after its timestamp.
    #[error("expected `<ms> <action> <arguments>`")]
    MissingAction,
    /// The timestamp is not a whole number of milliseconds.
    #[error("invalid timestamp {raw:?}")]
    InvalidTimestamp {
        /// Timestamp text.
        raw: String,
    },
    /// The timestamp is earlier than the previous event.
    #[error("timestamp {at}ms is earlier than the previous event at {previous}ms")]
    OutOfOrder {
        /// Timestamp of this line in milliseconds.
        at: u64,
        /// Timestamp of the previous event in milliseconds.
        previous: u64,
    },
    /// The action is not one of `click`, `key`, `resize` or `anchor`.
    #[error("unknown action {raw:?}")]
    UnknownAction {
        /// Action text.
        raw: String,
    },
    /// The action was given the wrong number of arguments.
    #[error("`{action}` takes exactly {expected} argument(s)")]
    BadArgumentCount {
        /// Action text.
        action: String,
        /// Arguments the action takes.
        expected: usize,
    },
    /// The click target is not recognised.
    #[error("unknown click target {raw:?}")]
    UnknownTarget {
        /// Target text.
        raw: String,
    },
    /// The resize width is not a whole number of pixels.
    #[error("invalid width {raw:?}")]
    InvalidWidth {
        /// Width text.
        raw: String,
    },
    /// An anchor offset is neither whole pixels nor `-`.
    #[error("invalid offset {raw:?}")]
    InvalidOffset {
        /// Offset text.
        raw: String,
    },
}

/// What a script line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    /// An event applied immediately.
    Event(MenuEvent),
    /// A raw resize fed through the debouncer.
    Resize {
        /// Viewport width in CSS pixels.
        width: u32,
    },
    /// A click on an anchor link, resolved to a scroll position.
    Anchor {
        /// Link href.
        href: String,
        /// Top offset of the target element, if one exists.
        target_top: Option<u32>,
        /// Height of the fixed header in CSS pixels.
        header_height: u32,
    },
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// Offset from page start.
    pub at: Duration,
    /// Requested action.
    pub action: ScriptAction,
}

/// Parse one script line; comments and blank lines yield `None`.
///
/// # Errors
///
/// Returns a [`ScriptError`] describing the first problem on the line.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use coursework::domain::menu::{ClickTarget, MenuEvent};
/// use coursework::inbound::cli::{ScriptAction, parse_script_line};
///
/// let line = parse_script_line("40 click outside").expect("valid").expect("not blank");
/// assert_eq!(line.at, Duration::from_millis(40));
/// assert_eq!(line.action, ScriptAction::Event(MenuEvent::Click(ClickTarget::Outside)));
/// ```
pub fn parse_script_line(line: &str) -> Result<Option<ScriptLine>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let raw_at = words.next().ok_or(ScriptError::MissingAction)?;
    let millis = raw_at
        .parse::<u64>()
        .map_err(|_| ScriptError::InvalidTimestamp {
            raw: raw_at.to_owned(),
        })?;
    let action = words.next().ok_or(ScriptError::MissingAction)?;
    let arguments: Vec<&str> = words.collect();

    let action = match (action, arguments.as_slice()) {
        ("click", [target]) => ScriptAction::Event(MenuEvent::Click(parse_target(target)?)),
        ("key", [key]) => ScriptAction::Event(MenuEvent::KeyDown((*key).to_owned())),
        ("resize", [width]) => ScriptAction::Resize {
            width: width.parse().map_err(|_| ScriptError::InvalidWidth {
                raw: (*width).to_owned(),
            })?,
        },
        ("anchor", [href, top, header]) => ScriptAction::Anchor {
            href: (*href).to_owned(),
            target_top: match *top {
                "-" => None,
                raw => Some(parse_offset(raw)?),
            },
            header_height: parse_offset(header)?,
        },
        ("click" | "key" | "resize", _) => {
            return Err(ScriptError::BadArgumentCount {
                action: action.to_owned(),
                expected: 1,
            });
        }
        ("anchor", _) => {
            return Err(ScriptError::BadArgumentCount {
                action: action.to_owned(),
                expected: 3,
            });
        }
        (other, _) => {
            return Err(ScriptError::UnknownAction {
                raw: other.to_owned(),
            });
        }
    };

    Ok(Some(ScriptLine {
        at: Duration::from_millis(millis),
        action,
    }))
}

fn parse_target(raw: &str) -> Result<ClickTarget, ScriptError> {
    match raw {
        "toggler" => Ok(ClickTarget::Toggler),
        "link" => Ok(ClickTarget::NavLink),
        "menu" => Ok(ClickTarget::Menu),
        "outside" => Ok(ClickTarget::Outside),
        other => Err(ScriptError::UnknownTarget {
            raw: other.to_owned(),
        }),
    }
}

fn parse_offset(raw: &str) -> Result<u32, ScriptError> {
    raw.parse().map_err(|_| ScriptError::InvalidOffset {
        raw: raw.to_owned(),
    })
}

struct Replay<'a, W> {
    state: MenuState,
    debouncer: ResizeDebouncer,
    last_at: Duration,
    out: &'a mut W,
}

impl<W: Write> Replay<'_, W> {
    fn apply(&mut self, at: Duration, event: &MenuEvent) -> Result<(), CliError> {
        let next = self.state.apply(event);
        debug!(?event, open = next.is_open(), "menu event applied");
        if next != self.state {
            self.state = next;
            self.report(at)?;
        }
        Ok(())
    }

    fn settle_until(&mut self, now: Duration) -> Result<(), CliError> {
        if let Some(due) = self.debouncer.due_at()
            && let Some(event) = self.debouncer.poll(now)
        {
            self.apply(due, &event)?;
        }
        Ok(())
    }

    fn follow_anchor(
        &mut self,
        at: Duration,
        href: &str,
        target_top: Option<u32>,
        header_height: u32,
    ) -> Result<(), CliError> {
        match anchor_scroll_target(href, target_top, header_height) {
            Some(top) => {
                debug!(href, top, "smooth scroll to anchor");
                writeln!(self.out, "{}ms scroll to {top}px", at.as_millis())?;
            }
            None => writeln!(self.out, "{}ms navigate to {href}", at.as_millis())?,
        }
        Ok(())
    }

    fn report(&mut self, at: Duration) -> Result<(), CliError> {
        let presentation = self.state.presentation();
        let label = if self.state.is_open() {
            "menu open"
        } else {
            "menu closed"
        };
        writeln!(
            self.out,
            "{}ms {label} (active={}, aria-expanded={}, scroll-locked={})",
            at.as_millis(),
            presentation.active,
            presentation.aria_expanded,
            presentation.scroll_locked,
        )?;
        Ok(())
    }
}

/// Replay a menu event script from `input`, reporting state changes on `out`.
///
/// Settled resizes are applied in time order ahead of later events, and any
/// resize still pending at the end of the script settles last. Anchor lines
/// report either the offset scroll position or plain navigation. Malformed
/// lines are reported and skipped.
///
/// # Errors
///
/// Returns [`CliError::Io`] when reading or writing fails.
pub fn replay_menu_script<R, W>(input: R, out: &mut W) -> Result<MenuState, CliError>
where
    R: BufRead,
    W: Write,
{
    let mut replay = Replay {
        state: MenuState::closed(),
        debouncer: ResizeDebouncer::new(),
        last_at: Duration::ZERO,
        out,
    };

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let parsed = parse_script_line(&line).and_then(|parsed| match parsed {
            Some(parsed) if parsed.at < replay.last_at => Err(ScriptError::OutOfOrder {
                at: duration_millis(parsed.at),
                previous: duration_millis(replay.last_at),
            }),
            other => Ok(other),
        });
        let script_line = match parsed {
            Ok(Some(script_line)) => script_line,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = number, error = %err, "skipping menu script line");
                writeln!(replay.out, "line {number}: {err}")?;
                continue;
            }
        };

        replay.last_at = script_line.at;
        replay.settle_until(script_line.at)?;
        match script_line.action {
            ScriptAction::Event(event) => replay.apply(script_line.at, &event)?,
            ScriptAction::Resize { width } => replay.debouncer.record(script_line.at, width),
            ScriptAction::Anchor {
                href,
                target_top,
                header_height,
            } => replay.follow_anchor(script_line.at, &href, target_top, header_height)?,
        }
    }

    if let Some(due) = replay.debouncer.due_at()
        && let Some(event) = replay.debouncer.flush()
    {
        replay.apply(due, &event)?;
    }
    Ok(replay.state)
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use rstest::rstest;

    fn replay(script: &str) -> (MenuState, String) {
        let mut out = Vec::new();
        let state = replay_menu_script(Cursor::new(script.to_owned()), &mut out)
            .expect("replay completes");
        (state, String::from_utf8(out).expect("utf8 output"))
    }

    #[rstest]
    #[case::comment("# opening moves", None)]
    #[case::blank("   ", None)]
    #[case::toggler(
        "0 click toggler",
        Some(ScriptLine { at: Duration::ZERO, action: ScriptAction::Event(MenuEvent::Click(ClickTarget::Toggler)) })
    )]
    #[case::key(
        "15 key Escape",
        Some(ScriptLine { at: Duration::from_millis(15), action: ScriptAction::Event(MenuEvent::KeyDown("Escape".to_owned())) })
    )]
    #[case::resize(
        "900 resize 1280",
        Some(ScriptLine { at: Duration::from_millis(900), action: ScriptAction::Resize { width: 1280 } })
    )]
    #[case::anchor(
        "450 anchor #about 900 64",
        Some(ScriptLine { at: Duration::from_millis(450), action: ScriptAction::Anchor { href: "#about".to_owned(), target_top: Some(900), header_height: 64 } })
    )]
    #[case::anchor_without_target(
        "450 anchor #missing - 64",
        Some(ScriptLine { at: Duration::from_millis(450), action: ScriptAction::Anchor { href: "#missing".to_owned(), target_top: None, header_height: 64 } })
    )]
    fn parses_script_lines(#[case] line: &str, #[case] expected: Option<ScriptLine>) {
        assert_eq!(parse_script_line(line).expect("line parses"), expected);
    }

    #[rstest]
    #[case::no_action("10", ScriptError::MissingAction)]
    #[case::bad_time("soon click toggler", ScriptError::InvalidTimestamp { raw: "soon".to_owned() })]
    #[case::bad_action("10 hover menu", ScriptError::UnknownAction { raw: "hover".to_owned() })]
    #[case::no_argument("10 click", ScriptError::BadArgumentCount { action: "click".to_owned(), expected: 1 })]
    #[case::extra_argument("10 key a b", ScriptError::BadArgumentCount { action: "key".to_owned(), expected: 1 })]
    #[case::short_anchor("10 anchor #about 900", ScriptError::BadArgumentCount { action: "anchor".to_owned(), expected: 3 })]
    #[case::bad_offset("10 anchor #about top 64", ScriptError::InvalidOffset { raw: "top".to_owned() })]
    #[case::bad_header("10 anchor #about 900 tall", ScriptError::InvalidOffset { raw: "tall".to_owned() })]
    #[case::bad_target("10 click footer", ScriptError::UnknownTarget { raw: "footer".to_owned() })]
    #[case::bad_width("10 resize wide", ScriptError::InvalidWidth { raw: "wide".to_owned() })]
    fn rejects_malformed_lines(#[case] line: &str, #[case] expected: ScriptError) {
        assert_eq!(parse_script_line(line), Err(expected));
    }

    #[rstest]
    fn reports_each_state_change() {
        let (state, output) = replay("0 click toggler\n10 click menu\n20 key Escape\n");
        assert!(!state.is_open());
        assert_eq!(
            output,
            "0ms menu open (active=true, aria-expanded=true, scroll-locked=true)\n\
             20ms menu closed (active=false, aria-expanded=false, scroll-locked=false)\n"
        );
    }

    #[rstest]
    fn resize_bursts_settle_once_after_the_last_event() {
        let script = "0 click toggler\n100 resize 1000\n200 resize 500\n300 resize 1024\n";
        let (state, output) = replay(script);
        assert!(!state.is_open());
        assert!(output.ends_with("550ms menu closed (active=false, aria-expanded=false, scroll-locked=false)\n"));
    }

    #[rstest]
    fn settled_resizes_apply_before_later_events() {
        let script = "0 click toggler\n100 resize 1024\n400 click toggler\n";
        let (state, output) = replay(script);
        assert!(state.is_open());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("350ms menu closed"));
        assert!(lines[2].starts_with("400ms menu open"));
    }

    #[rstest]
    fn mobile_widths_never_close_the_menu() {
        let (state, _) = replay("0 click toggler\n100 resize 768\n");
        assert!(state.is_open());
    }

    #[rstest]
    fn malformed_lines_are_reported_and_skipped() {
        let (state, output) = replay("0 click toggler\n5 click nowhere\n8 click menu\n3 key Escape\n");
        assert!(state.is_open());
        assert!(output.contains("line 2: unknown click target \"nowhere\""));
        assert!(output.contains("line 4: timestamp 3ms is earlier than the previous event at 8ms"));
    }

    #[rstest]
    fn anchor_links_scroll_below_the_header() {
        let script = "0 click toggler\n10 click link\n10 anchor #about 900 64\n20 anchor #top 40 64\n";
        let (state, output) = replay(script);
        assert!(!state.is_open());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[2], "10ms scroll to 836px");
        assert_eq!(lines[3], "20ms scroll to 0px");
    }

    #[rstest]
    #[case::bare_hash("5 anchor # 900 64", "5ms navigate to #")]
    #[case::missing_target("5 anchor #gone - 64", "5ms navigate to #gone")]
    #[case::other_page("5 anchor /contact 900 64", "5ms navigate to /contact")]
    fn non_scrolling_anchors_fall_back_to_navigation(#[case] script: &str, #[case] expected: &str) {
        let (state, output) = replay(script);
        assert!(!state.is_open());
        assert_eq!(output, format!("{expected}\n"));
    }
}
