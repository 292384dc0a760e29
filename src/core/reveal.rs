//! Line-by-line reveal of a completed reply
//!
//! A reply is split into display lines and re-emitted as a growing prefix,
//! one line per tick. Each tick carries the generation of the exchange that
//! produced it so the receiver can drop ticks from superseded exchanges.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    /// Everything revealed so far, newline-joined.
    Tick(String),
    Finished,
}

/// Split a reply into display lines, dropping lines that are blank.
pub fn reveal_lines(reply: &str) -> Vec<String> {
    reply
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug)]
pub struct RevealCursor {
    lines: Vec<String>,
    next: usize,
    accumulated: String,
}

impl RevealCursor {
    /// Cursor over the non-blank lines of `reply`, or `None` if there are none.
    pub fn new(reply: &str) -> Option<Self> {
        Self::from_lines(reveal_lines(reply))
    }

    pub fn from_lines(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            lines,
            next: 0,
            accumulated: String::new(),
        })
    }

    /// Append the next line and return the accumulated text.
    pub fn advance(&mut self) -> Option<&str> {
        let line = self.lines.get(self.next)?;
        if !self.accumulated.is_empty() {
            self.accumulated.push('\n');
        }
        self.accumulated.push_str(line);
        self.next += 1;
        Some(&self.accumulated)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.lines.len()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.next
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A running reveal sequence. The first tick fires immediately, later ones
/// after each interval.
pub struct RevealTask {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
    generation: u64,
}

impl RevealTask {
    pub fn spawn(
        mut cursor: RevealCursor,
        interval: Duration,
        generation: u64,
        tx: mpsc::UnboundedSender<(RevealEvent, u64)>,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let handle = tokio::spawn(async move {
            while let Some(text) = cursor.advance().map(str::to_owned) {
                if token.is_cancelled() {
                    return;
                }
                if tx.send((RevealEvent::Tick(text), generation)).is_err() {
                    return;
                }
                if cursor.is_finished() {
                    break;
                }
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = token.cancelled() => return,
                }
            }
            let _ = tx.send((RevealEvent::Finished, generation));
        });

        Self {
            cancel_token,
            handle,
            generation,
        }
    }

    /// Stop the sequence. A tick already past the cancellation check on
    /// another worker can still arrive afterwards; receivers drop it by its
    /// stale generation.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
