//! Question generation and answer adjudication for Quizforge.
//!
//! Two pure building blocks the session store is made of:
//!
//! 1. **Generation**: [`generate`] turns a [`Subject`], the player's age,
//!    and a caller-owned random source into a fresh [`Question`]. The same
//!    seed always yields the same questions.
//! 2. **Matching**: [`AnswerValue::matches`] decides whether free text
//!    typed by a player equals a reference answer, numerically (with a
//!    1e-5 tolerance) or textually (case and whitespace insensitive).
//!
//! Nothing in this crate holds state or takes locks.
//!
//! [`Subject`]: quizforge_protocol::Subject

mod answer;
mod catalog;
mod generator;
mod grade;
mod question;
mod subjects;

pub use answer::{normalize_text, parse_number, AnswerValue};
pub use generator::{generate, MAX_ATTEMPTS};
pub use grade::GradeTier;
pub use question::Question;
