//! Profile scoring for builder-harvester.
//!
//! Heuristic scoring ([`classify_angel_signal`], [`calculate_operator_score`])
//! handles the clear cases. Profiles whose angel signal is inconclusive are
//! batched through a [`Judge`] by [`classify_borderline`].

pub mod classifier;
pub mod error;
pub mod http_judge;
pub mod judge;
pub mod operator;
pub mod signal;

mod retry;

pub use classifier::{classify_borderline, DEFAULT_BATCH_SIZE};
pub use error::JudgeError;
pub use http_judge::HttpJudge;
pub use judge::{Judge, Judgment};
pub use operator::{calculate_operator_score, RELEVANT_TOPICS};
pub use signal::{classify_angel_signal, AngelSignal, AUTO_NO_ANGEL_SCORE, AUTO_YES_ANGEL_SCORE};
