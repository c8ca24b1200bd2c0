//! Pause/resume control and the interactive reconfiguration menu.
//!
//! The run moves between two states:
//!
//! - **Running** → **Paused** when SIGINT arrives (see [`InterruptGuard`]).
//! - **Paused** → **Running** when the operator answers the pause menu with
//!   `c`, or sets a new throttle or stride.
//! - A second SIGINT while **Paused** falls through to the default handler.
//!
//! The menu is shown after the chunk that was in flight when the pause was
//! requested has been copied. An unrecognized answer keeps the run paused,
//! which does not hold back the next chunk: the menu simply returns after it.

mod console;
mod guard;

pub use console::StdioConsole;
pub use guard::InterruptGuard;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::traits::OperatorConsole;
use crate::error::Result;

/// Menu shown while paused.
pub const PAUSE_PROMPT: &str =
    "\nChunking is paused [c: continue, t: set throttle, s: set stride, ctrl+c: abort]: ";

/// Run state as seen between chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseState {
    Running,
    Paused,
}

/// Shared pause flag.
///
/// Written from the signal handler and the pause menu, read by the copy loop
/// between chunks. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> PauseState {
        if self.is_paused() {
            PauseState::Paused
        } else {
            PauseState::Running
        }
    }
}

/// Settings the operator can change while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunables {
    pub stride: i64,
    pub throttle_ms: u64,
}

/// What the pause menu did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    /// Resumed without changes.
    Continued,
    /// Throttle replaced, then resumed.
    ThrottleChanged { from: u64, to: u64 },
    /// Stride replaced, then resumed.
    StrideChanged { from: i64, to: i64 },
    /// Nothing changed; the menu returns after the next chunk.
    StillPaused,
}

/// Show the pause menu once and apply the operator's answer.
pub async fn handle_pause<C>(
    console: &mut C,
    flag: &PauseFlag,
    tunables: &mut Tunables,
) -> Result<PauseOutcome>
where
    C: OperatorConsole + ?Sized,
{
    let Some(reply) = console.prompt(PAUSE_PROMPT).await? else {
        warn!("Operator input closed while paused, resuming");
        flag.resume();
        return Ok(PauseOutcome::Continued);
    };

    let outcome = match reply.trim().to_lowercase().as_str() {
        "c" | "continue" => PauseOutcome::Continued,
        "t" | "throttle" => {
            let text = format!(
                "Set new throttle value in ms [current: {}]: ",
                tunables.throttle_ms
            );
            let value = read_number(console, &text).await?;
            let throttle_ms = u64::try_from(value).unwrap_or_else(|_| {
                warn!("Negative throttle {} clamped to 0", value);
                0
            });
            let from = tunables.throttle_ms;
            tunables.throttle_ms = throttle_ms;
            PauseOutcome::ThrottleChanged {
                from,
                to: throttle_ms,
            }
        }
        "s" | "stride" => {
            let text = format!("Set new stride value [current: {}]: ", tunables.stride);
            let value = read_number(console, &text).await?;
            if value < 1 {
                warn!(
                    "Ignoring stride {}: must be at least 1, still paused",
                    value
                );
                return Ok(PauseOutcome::StillPaused);
            }
            let from = tunables.stride;
            tunables.stride = value;
            PauseOutcome::StrideChanged { from, to: value }
        }
        other => {
            info!("Unrecognized reply {:?}, still paused", other);
            return Ok(PauseOutcome::StillPaused);
        }
    };

    flag.resume();
    info!("Chunking resumed ({:?})", outcome);
    Ok(outcome)
}

async fn read_number<C>(console: &mut C, text: &str) -> Result<i64>
where
    C: OperatorConsole + ?Sized,
{
    let line = console.prompt(text).await?.unwrap_or_default();
    match parse_leading_int(&line) {
        Some(value) => Ok(value),
        None => {
            warn!("{:?} is not a number, using 0", line.trim());
            Ok(0)
        }
    }
}

/// Parse the integer at the start of `input`, ignoring anything after it.
///
/// Leading whitespace and a sign are allowed, as are single underscores
/// between digits. Returns `None` when no digit is found; values out of
/// range saturate.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    let mut after_underscore = false;
    for b in digits.bytes() {
        match b {
            b'0'..=b'9' => {
                let d = i64::from(b - b'0');
                value = if negative {
                    value.saturating_mul(10).saturating_sub(d)
                } else {
                    value.saturating_mul(10).saturating_add(d)
                };
                seen_digit = true;
                after_underscore = false;
            }
            b'_' if seen_digit && !after_underscore => after_underscore = true,
            _ => break,
        }
    }

    seen_digit.then_some(value)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Console answering from a fixed script; `None` entries simulate EOF.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedConsole {
        pub replies: VecDeque<Option<String>>,
        pub prompts: Vec<String>,
    }

    impl ScriptedConsole {
        pub(crate) fn new(replies: &[&str]) -> Self {
            Self {
                replies: replies.iter().map(|r| Some(r.to_string())).collect(),
                prompts: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl OperatorConsole for ScriptedConsole {
        async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
            self.prompts.push(text.to_string());
            Ok(self.replies.pop_front().flatten())
        }
    }

    fn tunables() -> Tunables {
        Tunables {
            stride: 40_000,
            throttle_ms: 100,
        }
    }

    fn paused() -> PauseFlag {
        let flag = PauseFlag::new();
        flag.pause();
        flag
    }

    #[test]
    fn test_pause_flag_shared_between_clones() {
        let flag = PauseFlag::new();
        let handle = flag.clone();
        assert_eq!(flag.state(), PauseState::Running);
        handle.pause();
        assert_eq!(flag.state(), PauseState::Paused);
        flag.resume();
        assert!(!handle.is_paused());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("250"), Some(250));
        assert_eq!(parse_leading_int("  42\n"), Some(42));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("1_000"), Some(1000));
        assert_eq!(parse_leading_int("1__2"), Some(1));
        assert_eq!(parse_leading_int("_1"), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
    }


    #[tokio::test]
    async fn test_continue_resumes() {
        for reply in ["c", "continue", " C \n", "Continue"] {
            let mut console = ScriptedConsole::new(&[reply]);
            let flag = paused();
            let mut t = tunables();

            let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

            assert_eq!(outcome, PauseOutcome::Continued);
            assert!(!flag.is_paused());
            assert_eq!(t, tunables());
            assert_eq!(console.prompts, vec![PAUSE_PROMPT.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_throttle_prompt_echoes_current_and_updates() {
        let mut console = ScriptedConsole::new(&["t", "250"]);
        let flag = paused();
        let mut t = tunables();

        let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

        assert_eq!(outcome, PauseOutcome::ThrottleChanged { from: 100, to: 250 });
        assert_eq!(t.throttle_ms, 250);
        assert!(!flag.is_paused());
        assert_eq!(
            console.prompts[1],
            "Set new throttle value in ms [current: 100]: "
        );
    }

    #[tokio::test]
    async fn test_non_numeric_throttle_becomes_zero() {
        let mut console = ScriptedConsole::new(&["throttle", "slower"]);
        let flag = paused();
        let mut t = tunables();

        let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

        assert_eq!(outcome, PauseOutcome::ThrottleChanged { from: 100, to: 0 });
        assert_eq!(t.throttle_ms, 0);
        assert!(!flag.is_paused());
    }

    #[tokio::test]
    async fn test_negative_throttle_clamped() {
        let mut console = ScriptedConsole::new(&["t", "-20"]);
        let mut t = tunables();
        handle_pause(&mut console, &paused(), &mut t).await.unwrap();
        assert_eq!(t.throttle_ms, 0);
    }

    #[tokio::test]
    async fn test_stride_prompt_echoes_current_and_updates() {
        let mut console = ScriptedConsole::new(&["s", "5000"]);
        let flag = paused();
        let mut t = tunables();

        let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

        assert_eq!(
            outcome,
            PauseOutcome::StrideChanged {
                from: 40_000,
                to: 5000
            }
        );
        assert_eq!(t.stride, 5000);
        assert!(!flag.is_paused());
        assert_eq!(console.prompts[1], "Set new stride value [current: 40000]: ");
    }

    #[tokio::test]
    async fn test_unusable_stride_keeps_run_paused() {
        for answer in ["zero", "0", "-3"] {
            let mut console = ScriptedConsole::new(&["stride", answer]);
            let flag = paused();
            let mut t = tunables();

            let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

            assert_eq!(outcome, PauseOutcome::StillPaused);
            assert_eq!(t.stride, 40_000);
            assert!(flag.is_paused());
        }
    }

    #[tokio::test]
    async fn test_unrecognized_reply_stays_paused() {
        let mut console = ScriptedConsole::new(&["what?"]);
        let flag = paused();
        let mut t = tunables();

        let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

        assert_eq!(outcome, PauseOutcome::StillPaused);
        assert!(flag.is_paused());
        assert_eq!(t, tunables());
    }

    #[tokio::test]
    async fn test_closed_input_resumes() {
        let mut console = ScriptedConsole::default();
        let flag = paused();
        let mut t = tunables();

        let outcome = handle_pause(&mut console, &flag, &mut t).await.unwrap();

        assert_eq!(outcome, PauseOutcome::Continued);
        assert!(!flag.is_paused());
    }

    #[tokio::test]
    async fn test_closed_input_at_number_prompt_reads_zero() {
        let mut console = ScriptedConsole::new(&["t"]);
        let mut t = tunables();
        handle_pause(&mut console, &paused(), &mut t).await.unwrap();
        assert_eq!(t.throttle_ms, 0);
    }
}
