use std::time::{Duration, Instant};

use thiserror::Error;

use crate::engine::{PracticeItem, PracticeSet};
use crate::session::stats::SessionStats;
use crate::speech::Speaker;

/// Dwell time after a correct answer before the next item is shown.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing typed yet; the clock has not started.
    Idle,
    Active,
    /// Current item answered; input is locked until the advance fires.
    AwaitingAdvance,
    Completed,
}

/// What a single edit of the input buffer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input is locked (awaiting advance or completed); nothing changed.
    Ignored,
    /// Buffer is empty; no counter moved.
    Cleared,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// Moved on to the item at this index.
    Next(usize),
    /// Every item has been answered. Emitted exactly once per run.
    Completed(SessionStats),
}

/// Identifies one scheduled advance. Tickets are never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceTicket(u64);

#[derive(Clone, Copy, Debug)]
struct PendingAdvance {
    ticket: AdvanceTicket,
    due: Instant,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot start a drill with no items")]
    EmptyPracticeSet,
}

/// One typing drill over a fixed practice set.
///
/// Time is passed in by the caller so the run loop and tests drive the same
/// code. The delayed advance is owned by the session: `reset` cancels it and
/// dropping the session discards it.
pub struct PracticeSession {
    set: PracticeSet,
    index: usize,
    input: String,
    phase: SessionPhase,
    started_at: Option<Instant>,
    correct: usize,
    incorrect: usize,
    pending: Option<PendingAdvance>,
    next_ticket: u64,
    final_stats: Option<SessionStats>,
    speaker: Box<dyn Speaker>,
}

impl PracticeSession {
    pub fn new(set: PracticeSet, speaker: Box<dyn Speaker>) -> Result<Self, SessionError> {
        if set.is_empty() {
            return Err(SessionError::EmptyPracticeSet);
        }
        Ok(Self {
            set,
            index: 0,
            input: String::new(),
            phase: SessionPhase::Idle,
            started_at: None,
            correct: 0,
            incorrect: 0,
            pending: None,
            next_ticket: 0,
            final_stats: None,
            speaker,
        })
    }

    pub fn set(&self) -> &PracticeSet {
        &self.set
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once the first edit has started the clock.
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_awaiting_advance(&self) -> bool {
        self.phase == SessionPhase::AwaitingAdvance
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, SessionPhase::Idle | SessionPhase::Active)
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect
    }

    pub fn current_item(&self) -> Option<&PracticeItem> {
        self.set.get(self.index)
    }

    /// Items answered so far, counting the one waiting on its advance.
    pub fn answered(&self) -> usize {
        self.index + usize::from(self.is_awaiting_advance())
    }

    /// Apply one edit of the input buffer.
    ///
    /// Every non-empty edit that does not equal the expected text counts as
    /// one incorrect event, including intermediate states while typing.
    pub fn update_input(&mut self, text: &str, now: Instant) -> InputOutcome {
        if !self.accepts_input() {
            return InputOutcome::Ignored;
        }
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::Active;
            self.started_at = Some(now);
        }

        self.input.clear();
        self.input.push_str(text);

        let Some(expected) = self.current_item().map(|item| item.expected_input().to_string())
        else {
            return InputOutcome::Ignored;
        };

        if text == expected {
            self.correct += 1;
            if let Err(err) = self.speaker.speak(&expected) {
                tracing::warn!(%err, text = %expected, "pronunciation playback failed");
            }
            self.phase = SessionPhase::AwaitingAdvance;
            self.schedule_advance(now);
            tracing::debug!(index = self.index, "item answered");
            InputOutcome::Correct
        } else if !text.is_empty() {
            self.incorrect += 1;
            InputOutcome::Incorrect
        } else {
            InputOutcome::Cleared
        }
    }

    fn schedule_advance(&mut self, now: Instant) {
        if self.pending.is_some() {
            return;
        }
        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(PendingAdvance {
            ticket,
            due: now + ADVANCE_DELAY,
        });
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Time left before the pending advance fires.
    pub fn advance_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|p| p.due.saturating_duration_since(now))
    }

    /// Fire the pending advance if its dwell delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Advance> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.fire_advance(pending.ticket, now)
    }

    /// Apply the advance identified by `ticket`. Stale tickets (from before a
    /// reset, or already fired) are ignored.
    pub fn fire_advance(&mut self, ticket: AdvanceTicket, now: Instant) -> Option<Advance> {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => return None,
        }
        self.pending = None;
        self.index += 1;
        self.input.clear();

        if self.index < self.set.len() {
            self.phase = SessionPhase::Active;
            return Some(Advance::Next(self.index));
        }

        let stats = SessionStats::compute(self.correct, self.incorrect, self.elapsed_secs(now));
        self.phase = SessionPhase::Completed;
        self.final_stats = Some(stats);
        tracing::info!(
            items = self.set.len(),
            correct = stats.correct,
            incorrect = stats.incorrect,
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            "practice completed"
        );
        Some(Advance::Completed(stats))
    }

    /// Back to the untouched starting state over the same practice set.
    pub fn reset(&mut self) {
        self.pending = None;
        self.index = 0;
        self.input.clear();
        self.phase = SessionPhase::Idle;
        self.started_at = None;
        self.correct = 0;
        self.incorrect = 0;
        self.final_stats = None;
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Statistics as of `now`; frozen once the session completes.
    pub fn live_stats(&self, now: Instant) -> SessionStats {
        self.final_stats.unwrap_or_else(|| {
            SessionStats::compute(self.correct, self.incorrect, self.elapsed_secs(now))
        })
    }

    pub fn final_stats(&self) -> Option<&SessionStats> {
        self.final_stats.as_ref()
    }
}
