//! Core scorekeeping logic - pure, deterministic, and testable
//!
//! This crate holds the rules of Madani Estimation scoring and the session
//! state machine. It has **no dependencies** on terminal, storage or clock
//! plumbing beyond reading the wall clock to stamp round ids, which makes it:
//!
//! - **Deterministic**: totals are always re-derived from the round ledger
//! - **Testable**: every transition is a plain method returning `Result`
//! - **Portable**: the terminal frontend is only one possible caller
//!
//! # Module Structure
//!
//! - [`scoring`]: the score rule mapping (prediction, actual) to points and outcome
//! - [`capture`]: per-player entry buffer for the round being played
//! - [`ledger`]: completed rounds, append and undo-last only
//! - [`totals`]: projection of totals from the ledger plus manual offsets
//! - [`winner`]: first seat at or above the target
//! - [`standings`]: leaderboard order
//! - [`session`]: the [`GameSession`] state machine composing all of the above
//! - [`snapshot`]: the persisted record of a session
//!
//! # Rules
//!
//! - **Exact**: `10 * prediction`
//! - **Missed**: `-10 * prediction`
//! - **Over**: `10 * prediction + extra hands`
//! - The first player (in seat order) whose total reaches the target wins.
//!
//! # Example
//!
//! ```
//! use madani_core::GameSession;
//! use madani_types::{PlayerId, ResultShortcut};
//!
//! let mut session = GameSession::new();
//! session.start(&["Salwa", "Tariq"], 250).unwrap();
//!
//! let salwa = PlayerId::from_seat(0);
//! let tariq = PlayerId::from_seat(1);
//! session.record_prediction(&salwa, 5).unwrap();
//! session.record_shortcut_result(&salwa, ResultShortcut::Exact).unwrap();
//! session.record_prediction(&tariq, 6).unwrap();
//! session.record_over_result(&tariq, 8).unwrap();
//! session.complete_round().unwrap();
//!
//! assert_eq!(session.totals(), vec![50, 62]);
//! assert!(session.winner().is_none());
//! ```

pub mod capture;
pub mod error;
pub mod ledger;
pub mod player;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod standings;
pub mod totals;
pub mod winner;

pub use madani_types as types;

// Re-export commonly used types for convenience
pub use capture::{CaptureEntry, CapturedResult, RoundCapture};
pub use error::SessionError;
pub use ledger::{is_chronological, Round, RoundLedger, RoundResult};
pub use player::{build_roster, Player};
pub use scoring::{calculate_score, missed_actual, ScoreResult};
pub use session::{Celebration, GameSession, SessionPhase};
pub use snapshot::{SessionSnapshot, SNAPSHOT_VERSION};
pub use standings::{standings, Standing};
pub use totals::{checked_total, ensure_totals_fit, offset_for_total, project_total, project_totals};
pub use winner::{find_winner, find_winner_player};
