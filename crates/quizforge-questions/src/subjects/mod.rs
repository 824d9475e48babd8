//! One generator per subject.
//!
//! Every generator has the same shape: `fn(GradeTier, &mut R) -> Draft`.
//! [`crate::generate`] picks one with a `match` on the subject tag, so a new
//! subject is a new variant, a new file here, and a new match arm.

mod maths;
mod sciences;
mod world;

pub(crate) use maths::maths;
pub(crate) use sciences::{astronomy, biology, chemistry, physics};
pub(crate) use world::{geography, history};

use rand::Rng;

/// Picks one element uniformly. `items` must be non-empty; every caller
/// passes a fixed, non-empty table.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}
