//! Dispatch from subject tag to generator, with duplicate avoidance.

use std::collections::HashSet;

use quizforge_protocol::Subject;
use rand::Rng;

use crate::question::Draft;
use crate::{subjects, GradeTier, Question};

/// How many draws to try before accepting a prompt the player has already
/// seen in this subject.
pub const MAX_ATTEMPTS: usize = 24;

/// Generates the next question for `subject`.
///
/// All randomness comes from `rng`: a fixed seed reproduces the exact same
/// question (id included). `used_prompts` is the session's set of prompts
/// already issued for this subject; the first draw not in it wins, and the
/// chosen prompt is added. If every attempt collides, the last draw is used
/// anyway, since a repeat is tolerated and never an error.
pub fn generate<R: Rng + ?Sized>(
    subject: Subject,
    age: u32,
    rng: &mut R,
    used_prompts: &mut HashSet<String>,
) -> Question {
    let tier = GradeTier::from_age(age);

    let mut draft = draw(subject, tier, rng);
    for _ in 1..MAX_ATTEMPTS {
        if !used_prompts.contains(&draft.prompt) {
            break;
        }
        draft = draw(subject, tier, rng);
    }

    used_prompts.insert(draft.prompt.clone());
    Question::issue(subject, draft, rng)
}

fn draw<R: Rng + ?Sized>(subject: Subject, tier: GradeTier, rng: &mut R) -> Draft {
    match subject {
        Subject::Maths => subjects::maths(tier, rng),
        Subject::Chemistry => subjects::chemistry(tier, rng),
        Subject::Biology => subjects::biology(tier, rng),
        Subject::Physics => subjects::physics(tier, rng),
        Subject::Astronomy => subjects::astronomy(tier, rng),
        Subject::Geography => subjects::geography(tier, rng),
        Subject::History => subjects::history(tier, rng),
    }
}
