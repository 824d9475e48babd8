//! The session store: a concurrent registry of every live run.
//!
//! Responsibilities:
//! - Validating and cleaning start requests
//! - Building and shuffling the question plan
//! - Looking sessions up and handing out snapshots
//! - Running the submit transition
//! - Evicting sessions idle past their TTL
//!
//! # Concurrency note
//!
//! Every operation takes one `Mutex` around the whole map, evicts stale
//! sessions first, and runs to completion before releasing it. Two
//! submissions for the same session are therefore serialized, never
//! interleaved. Nothing under the lock does I/O.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use quizforge_protocol::{QuestionId, SessionId, Subject};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{GameSession, Outcome, SessionConfig, SessionError};

/// Cleans a raw subject list: trim, lowercase, drop unknown keys, and
/// deduplicate while keeping the first occurrence's position.
///
/// ```rust
/// use quizforge_protocol::Subject;
/// use quizforge_session::clean_subjects;
///
/// let raw = ["  Maths", "poetry", "maths", "HISTORY"];
/// assert_eq!(clean_subjects(raw), vec![Subject::Maths, Subject::History]);
/// ```
pub fn clean_subjects<I, S>(raw: I) -> Vec<Subject>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|s| Subject::from_key(&s.as_ref().trim().to_lowercase()))
        .filter(|subject| seen.insert(*subject))
        .collect()
}

/// Owns every [`GameSession`], keyed by id.
///
/// ## Lifecycle
///
/// ```text
/// create_session() ──→ [Active] ──submit_answer()──→ [Active] ... ──→ [Finished]
///                          │                                              │
///                          └───────── idle > session_ttl ─────────────────┘
///                                              │
///                                              ▼
///                                          (evicted)
/// ```
///
/// Share one store across tasks with `Arc<SessionStore>`.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, GameSession>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts a run and returns a snapshot with the first question open.
    ///
    /// The session's random source is freshly seeded from the thread RNG.
    ///
    /// # Errors
    /// - [`SessionError::EmptyName`]: name is blank
    /// - [`SessionError::NoSubjects`]: subject list is empty
    /// - [`SessionError::AgeOutOfRange`]: age outside the configured range
    /// - [`SessionError::NoSupportedSubjects`]: nothing survived cleaning
    /// - [`SessionError::GenerationFailed`]: the plan came out empty
    pub fn create_session<S: AsRef<str>>(
        &self,
        name: &str,
        age: i64,
        subjects: &[S],
    ) -> Result<GameSession, SessionError> {
        let seed = rand::rng().random::<u64>();
        self.create_session_with_seed(name, age, subjects, seed)
    }

    /// Like [`create_session`](Self::create_session), but the plan shuffle
    /// and every generated question follow from `seed`.
    pub fn create_session_with_seed<S: AsRef<str>>(
        &self,
        name: &str,
        age: i64,
        subjects: &[S],
        seed: u64,
    ) -> Result<GameSession, SessionError> {
        let name: String = name.trim().chars().take(self.config.max_name_chars).collect();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if subjects.is_empty() {
            return Err(SessionError::NoSubjects);
        }
        let age = u32::try_from(age)
            .ok()
            .filter(|&age| self.config.is_valid_age(age))
            .ok_or(SessionError::AgeOutOfRange {
                age,
                min: self.config.min_age,
                max: self.config.max_age,
            })?;
        let subjects = clean_subjects(subjects);
        if subjects.is_empty() {
            return Err(SessionError::NoSupportedSubjects);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut plan: Vec<Subject> = subjects
            .iter()
            .flat_map(|&s| std::iter::repeat_n(s, self.config.questions_per_subject))
            .collect();
        plan.shuffle(&mut rng);

        let id = generate_session_id();
        let lives = self.config.lives_for(subjects.len());
        let mut session = GameSession::new(id.clone(), name, age, subjects, plan, lives, rng);
        if session.open_question().is_none() {
            return Err(SessionError::GenerationFailed(id));
        }

        let mut sessions = self.lock();
        self.evict_locked(&mut sessions);
        sessions.insert(id.clone(), session.clone());

        tracing::info!(
            session_id = %id,
            age,
            subjects = %session.subjects_display(),
            total_questions = session.total_questions,
            "session created"
        );
        Ok(session)
    }

    /// Returns a snapshot of the session and refreshes its idle timer.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the id is unknown or the
    /// session has been evicted.
    pub fn get_session(&self, session_id: &SessionId) -> Result<GameSession, SessionError> {
        let mut sessions = self.lock();
        self.evict_locked(&mut sessions);

        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;
        session.touch();
        Ok(session.clone())
    }

    /// Adjudicates an answer to the session's open question.
    ///
    /// Returns the outcome together with a post-transition snapshot. When
    /// `outcome.finished` is set the caller should hand the snapshot to the
    /// scoreboard; the store has released its lock by then.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`]: unknown or evicted session
    /// - [`SessionError::AlreadyFinished`]: the run is over
    /// - [`SessionError::NoOpenQuestion`]: nothing to answer
    /// - [`SessionError::QuestionMismatch`]: `question_id` is not the open one
    pub fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        answer: &str,
        elapsed_seconds: f64,
    ) -> Result<(Outcome, GameSession), SessionError> {
        let mut sessions = self.lock();
        self.evict_locked(&mut sessions);

        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;
        let outcome = session.submit(question_id, answer, elapsed_seconds, &self.config)?;

        tracing::debug!(
            %session_id,
            %question_id,
            correct = outcome.correct,
            timed_out = outcome.timed_out,
            lives = session.lives,
            "answer adjudicated"
        );
        if outcome.finished {
            tracing::info!(
                %session_id,
                score = session.score,
                total_questions = session.total_questions,
                "session finished"
            );
        }

        Ok((outcome, session.clone()))
    }

    /// Removes every session idle for longer than the TTL. Returns how many
    /// were removed.
    ///
    /// Every other operation already does this on entry; calling it directly
    /// is only useful to reclaim memory on a quiet server.
    pub fn evict_expired(&self) -> usize {
        let mut sessions = self.lock();
        self.evict_locked(&mut sessions)
    }

    /// Number of sessions currently held, expired ones included until the
    /// next eviction pass.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        // A panic while holding the lock can only happen between whole
        // transitions; the map itself is still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_locked(&self, sessions: &mut HashMap<SessionId, GameSession>) -> usize {
        let ttl = self.config.session_ttl;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.updated_at.elapsed() <= ttl;
            if !keep {
                tracing::debug!(session_id = %id, "session evicted after inactivity");
            }
            keep
        });
        before - sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Generates a random 32-character hex session id (128 bits).
fn generate_session_id() -> SessionId {
    let bytes: [u8; 16] = rand::rng().random();
    SessionId::new(bytes.iter().map(|b| format!("{b:02x}")).collect::<String>())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionStore`.
    //!
    //! Time-dependent behavior uses two configs:
    //!   - a 1 ms TTL plus a short sleep → sessions expire
    //!   - the default 6 h TTL → sessions never expire during a test

    use std::time::Duration;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn store() -> SessionStore {
        SessionStore::default()
    }

    fn store_with_instant_expiry() -> SessionStore {
        SessionStore::new(SessionConfig {
            session_ttl: Duration::from_millis(1),
            ..SessionConfig::default()
        })
    }

    // =====================================================================
    // clean_subjects()
    // =====================================================================

    #[test]
    fn test_clean_subjects_keeps_first_occurrence_order() {
        let cleaned = clean_subjects(["history", "Maths", " history ", "maths"]);
        assert_eq!(cleaned, vec![Subject::History, Subject::Maths]);
    }

    #[test]
    fn test_clean_subjects_drops_unknown_keys() {
        assert!(clean_subjects(["art", "", "music"]).is_empty());
    }

    // =====================================================================
    // create_session()
    // =====================================================================

    #[test]
    fn test_create_session_single_subject_builds_ten_question_plan() {
        let store = store();

        let session = store.create_session("Ava", 12, &["maths"]).expect("should succeed");

        assert_eq!(session.total_questions, 10);
        assert_eq!(session.plan.len(), 10);
        assert_eq!(session.lives, 3);
        assert_eq!(session.cursor, 0);
        assert!(!session.finished);
        assert_eq!(session.id.as_str().len(), 32);
        let question = session.current_question.as_ref().expect("first question");
        assert!(!question.prompt.is_empty());
        assert_eq!(question.subject, session.plan[0]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_session_plan_has_exact_counts_per_subject() {
        let store = store();

        let session = store
            .create_session("Ben", 15, &["physics", "history", "maths"])
            .expect("should succeed");

        assert_eq!(session.total_questions, 30);
        for subject in [Subject::Physics, Subject::History, Subject::Maths] {
            assert_eq!(session.plan.iter().filter(|&&s| s == subject).count(), 10);
        }
        assert_eq!(session.lives, 5);
    }

    #[test]
    fn test_create_session_same_seed_same_plan() {
        let store = store();
        let subjects = ["maths", "history", "biology"];

        let a = store.create_session_with_seed("A", 20, &subjects, 7).unwrap();
        let b = store.create_session_with_seed("B", 20, &subjects, 7).unwrap();

        assert_eq!(a.plan, b.plan);
        assert_eq!(
            a.current_question.as_ref().map(|q| &q.prompt),
            b.current_question.as_ref().map(|q| &q.prompt)
        );
        assert_ne!(a.id, b.id, "session ids never come from the seed");
    }

    #[test]
    fn test_create_session_trims_and_truncates_name() {
        let store = store();
        let long = format!("  {}  ", "x".repeat(50));

        let session = store.create_session(&long, 30, &["maths"]).unwrap();

        assert_eq!(session.name.chars().count(), 30);
    }

    #[test]
    fn test_create_session_blank_name_returns_error() {
        let result = store().create_session("   ", 12, &["maths"]);
        assert!(matches!(result, Err(SessionError::EmptyName)));
    }

    #[test]
    fn test_create_session_empty_subjects_returns_error() {
        let result = store().create_session::<&str>("Ava", 12, &[]);
        assert!(matches!(result, Err(SessionError::NoSubjects)));
    }

    #[test]
    fn test_create_session_age_out_of_range_returns_error() {
        let store = store();
        for age in [-3, 0, 7, 100, i64::from(u32::MAX) + 8] {
            let result = store.create_session("Ava", age, &["maths"]);
            assert!(matches!(result, Err(SessionError::AgeOutOfRange { .. })));
        }
        assert!(store.is_empty(), "failed creations must not store anything");
    }

    #[test]
    fn test_create_session_only_unknown_subjects_returns_error() {
        let result = store().create_session("Ava", 12, &["poetry", "art"]);
        assert!(matches!(result, Err(SessionError::NoSupportedSubjects)));
    }

    #[test]
    fn test_create_session_zero_questions_per_subject_fails_generation() {
        let store = SessionStore::new(SessionConfig {
            questions_per_subject: 0,
            ..SessionConfig::default()
        });

        let result = store.create_session("Ava", 12, &["maths"]);

        assert!(matches!(result, Err(SessionError::GenerationFailed(_))));
        assert!(store.is_empty());
    }

    // =====================================================================
    // get_session()
    // =====================================================================

    #[test]
    fn test_get_session_returns_snapshot() {
        let store = store();
        let created = store.create_session("Ava", 12, &["maths"]).unwrap();

        let mut snapshot = store.get_session(&created.id).expect("should exist");
        snapshot.score = 99;

        assert_eq!(store.get_session(&created.id).unwrap().score, 0);
    }

    #[test]
    fn test_get_session_unknown_id_returns_not_found() {
        let result = store().get_session(&SessionId::new("nope"));
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_get_session_after_ttl_returns_not_found_every_time() {
        let store = store_with_instant_expiry();
        let created = store.create_session("Ava", 12, &["maths"]).unwrap();

        std::thread::sleep(Duration::from_millis(20));

        for _ in 0..3 {
            assert!(matches!(
                store.get_session(&created.id),
                Err(SessionError::NotFound(_))
            ));
        }
        assert!(store.is_empty());
    }

    // =====================================================================
    // submit_answer()
    // =====================================================================

    #[test]
    fn test_submit_answer_unknown_session_returns_not_found() {
        let result = store().submit_answer(&SessionId::new("nope"), &QuestionId::new("q"), "1", 1.0);
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_submit_answer_returns_post_transition_snapshot() {
        let store = store();
        let created = store.create_session("Ava", 12, &["maths"]).unwrap();
        let question = created.current_question.as_ref().unwrap();

        let (outcome, snapshot) = store
            .submit_answer(&created.id, &question.id, &question.answer.format(), 1.0)
            .expect("should succeed");

        assert!(outcome.correct);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(store.get_session(&created.id).unwrap().score, 1);
    }

    #[test]
    fn test_submit_answer_stale_question_returns_conflict() {
        let store = store();
        let created = store.create_session("Ava", 12, &["maths"]).unwrap();
        let first = created.current_question.as_ref().unwrap().id.clone();
        store.submit_answer(&created.id, &first, "", 1.0).unwrap();

        let result = store.submit_answer(&created.id, &first, "", 1.0);

        assert!(matches!(result, Err(SessionError::QuestionMismatch { .. })));
        assert_eq!(store.get_session(&created.id).unwrap().answer_log.len(), 1);
    }

    // =====================================================================
    // evict_expired()
    // =====================================================================

    #[test]
    fn test_evict_expired_removes_idle_sessions() {
        let store = store_with_instant_expiry();
        store.create_session("A", 12, &["maths"]).unwrap();
        store.create_session("B", 12, &["history"]).unwrap();

        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(store.evict_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_expired_keeps_fresh_sessions() {
        let store = store();
        store.create_session("A", 12, &["maths"]).unwrap();

        assert_eq!(store.evict_expired(), 0);
        assert_eq!(store.len(), 1);
    }
}
