pub mod practice;
pub mod stats;

pub use practice::{
    ADVANCE_DELAY, Advance, AdvanceTicket, InputOutcome, PracticeSession, SessionError,
    SessionPhase,
};
pub use stats::SessionStats;
