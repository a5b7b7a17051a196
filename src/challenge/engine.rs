//! Challenge session state machine
//!
//! Phases: Idle -> Presenting -> (complete | skip) -> Idle. The countdown is
//! state inside the active challenge, advanced by the driver's 1 Hz timer and
//! dropped on every exit path, so nothing can keep ticking after the dialog
//! closes.

use rand::Rng;
use serde::Serialize;

use super::data::{Challenge, random_challenge};
use super::progress::UserProgress;
use crate::sim::PlaygroundState;

/// Current engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengePhase {
    Idle,
    Presenting,
}

/// The challenge currently on screen, with its response buffer and countdown
#[derive(Debug, Clone)]
pub struct ActiveChallenge {
    pub challenge: &'static Challenge,
    pub response: String,
    /// Seconds remaining, if the challenge is timed
    pub seconds_left: Option<u32>,
}

impl ActiveChallenge {
    pub fn countdown_elapsed(&self) -> bool {
        self.seconds_left == Some(0)
    }

    /// Whether the text field is shown. The breathing exercise keeps it
    /// hidden until the countdown elapses.
    pub fn response_revealed(&self) -> bool {
        !self.challenge.is_time_gated() || self.countdown_elapsed()
    }

    /// Whether the text field no longer accepts input. Timed non-breathing
    /// prompts lock once their countdown hits zero.
    pub fn response_locked(&self) -> bool {
        !self.challenge.is_time_gated()
            && self.challenge.time_limit_secs.is_some()
            && self.countdown_elapsed()
    }

    /// Completion guard: a non-empty trimmed response, or an elapsed
    /// countdown on the breathing exercise.
    pub fn can_complete(&self) -> bool {
        !self.response.trim().is_empty()
            || (self.challenge.is_time_gated() && self.countdown_elapsed())
    }
}

/// Toast-style event for the driver to display
#[derive(Debug, Clone, Serialize)]
pub enum Notification {
    ChallengeCompleted {
        title: &'static str,
        reward: u32,
        streak_days: u32,
    },
    ChallengeSkipped,
}

impl Notification {
    pub fn message(&self) -> String {
        match self {
            Notification::ChallengeCompleted { title, reward, .. } => {
                let plural = if *reward == 1 { "" } else { "s" };
                format!("{title} complete! +{reward} Yimo{plural} \u{1F31F}")
            }
            Notification::ChallengeSkipped => {
                "Challenge skipped - maybe next time \u{1F499}".to_string()
            }
        }
    }
}

/// Wellness challenge engine: active session plus session progress
#[derive(Debug, Default)]
pub struct ChallengeEngine {
    active: Option<ActiveChallenge>,
    pub progress: UserProgress,
}

impl ChallengeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChallengePhase {
        if self.active.is_some() {
            ChallengePhase::Presenting
        } else {
            ChallengePhase::Idle
        }
    }

    pub fn active(&self) -> Option<&ActiveChallenge> {
        self.active.as_ref()
    }

    /// Pick a random challenge and present it
    pub fn start(&mut self, rng: &mut impl Rng) -> &'static Challenge {
        let challenge = random_challenge(rng);
        self.present(challenge);
        challenge
    }

    /// Present a specific challenge: empty response buffer, countdown armed
    /// at the time limit if there is one
    pub fn present(&mut self, challenge: &'static Challenge) {
        self.active = Some(ActiveChallenge {
            challenge,
            response: String::new(),
            seconds_left: challenge.time_limit_secs,
        });
        log::info!("Presenting challenge '{}'", challenge.id);
    }

    /// Mirror the text field into the response buffer
    pub fn set_response(&mut self, text: &str) {
        if let Some(active) = self.active.as_mut() {
            active.response.clear();
            active.response.push_str(text);
        }
    }

    /// Advance the countdown by one second, saturating at zero
    pub fn countdown_tick(&mut self) {
        if let Some(active) = self.active.as_mut()
            && let Some(secs) = active.seconds_left.as_mut()
        {
            *secs = secs.saturating_sub(1);
        }
    }

    /// Complete the active challenge.
    ///
    /// Refused (returns `None`, nothing changes) unless the guard in
    /// [`ActiveChallenge::can_complete`] holds. On success the reward Yimos
    /// are appended unconditionally through the shared factory, progress is
    /// updated, and the engine returns to Idle.
    pub fn complete(&mut self, sim: &mut PlaygroundState, now_ms: f64) -> Option<Notification> {
        let active = self.active.as_ref()?;
        if !active.can_complete() {
            return None;
        }

        let challenge = active.challenge;
        let response = active.response.clone();
        for _ in 0..challenge.yimo_reward {
            sim.spawn_yimo(None);
        }
        self.progress.record(challenge.id, response, now_ms);
        self.active = None;

        log::info!(
            "Challenge '{}' completed (+{} Yimos, streak {})",
            challenge.id,
            challenge.yimo_reward,
            self.progress.streak_days
        );
        Some(Notification::ChallengeCompleted {
            title: challenge.title,
            reward: challenge.yimo_reward,
            streak_days: self.progress.streak_days,
        })
    }

    /// Discard the active challenge: no spawns, no progress mutation
    pub fn skip(&mut self) -> Option<Notification> {
        self.active.take().map(|active| {
            log::info!("Challenge '{}' skipped", active.challenge.id);
            Notification::ChallengeSkipped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::data::CHALLENGES;
    use glam::Vec2;

    fn by_id(id: &str) -> &'static Challenge {
        CHALLENGES.iter().find(|c| c.id == id).unwrap()
    }

    fn sim() -> PlaygroundState {
        PlaygroundState::new(1, Vec2::new(800.0, 600.0))
    }

    const NOON: f64 = 1_000.5 * 86_400_000.0;

    #[test]
    fn test_start_presents_from_table() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(11);
        let mut engine = ChallengeEngine::new();

        let challenge = engine.start(&mut rng);
        assert!(CHALLENGES.iter().any(|c| c.id == challenge.id));
        assert_eq!(engine.phase(), ChallengePhase::Presenting);

        let active = engine.active().unwrap();
        assert!(active.response.is_empty());
        assert_eq!(active.seconds_left, challenge.time_limit_secs);
    }

    #[test]
    fn test_complete_spawns_reward_and_counts() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("mindfulness-1")); // grounding, reward 5
        engine.set_response("5 things I can see...");

        let note = engine.complete(&mut sim, NOON).unwrap();
        assert_eq!(sim.yimos.len(), 5);
        assert_eq!(engine.progress.total_completed, 1);
        assert_eq!(engine.phase(), ChallengePhase::Idle);
        assert!(matches!(
            note,
            Notification::ChallengeCompleted { reward: 5, streak_days: 1, .. }
        ));
    }

    #[test]
    fn test_empty_response_refused() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("gratitude-1"));

        assert!(engine.complete(&mut sim, NOON).is_none());
        engine.set_response("   \n\t ");
        assert!(engine.complete(&mut sim, NOON).is_none());

        // Guarded no-op: nothing spawned, nothing recorded, still presenting
        assert!(sim.yimos.is_empty());
        assert_eq!(engine.progress.total_completed, 0);
        assert_eq!(engine.phase(), ChallengePhase::Presenting);
    }

    #[test]
    fn test_breathing_gate() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("mindfulness-2")); // 60s breathing exercise

        let active = engine.active().unwrap();
        assert!(!active.response_revealed());
        assert!(engine.complete(&mut sim, NOON).is_none());

        for _ in 0..59 {
            engine.countdown_tick();
        }
        assert!(!engine.active().unwrap().response_revealed());
        assert!(engine.complete(&mut sim, NOON).is_none());

        engine.countdown_tick();
        let active = engine.active().unwrap();
        assert!(active.countdown_elapsed());
        assert!(active.response_revealed());

        // Elapsed breathing countdown validates even an empty response
        let note = engine.complete(&mut sim, NOON).unwrap();
        assert_eq!(sim.yimos.len(), 2);
        assert!(matches!(note, Notification::ChallengeCompleted { reward: 2, .. }));
    }

    #[test]
    fn test_countdown_saturates_at_zero() {
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("mindfulness-2"));

        for _ in 0..100 {
            engine.countdown_tick();
        }
        assert_eq!(engine.active().unwrap().seconds_left, Some(0));
    }

    #[test]
    fn test_timed_non_breathing_locks_but_still_completes() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("selfcare-1")); // 900s digital detox

        let active = engine.active().unwrap();
        assert!(active.response_revealed());
        assert!(!active.response_locked());

        engine.set_response("Went for a walk");
        for _ in 0..900 {
            engine.countdown_tick();
        }
        let active = engine.active().unwrap();
        assert!(active.response_locked());
        // Elapsed countdown is not a free pass here; the typed response is
        assert!(engine.complete(&mut sim, NOON).is_some());
        assert_eq!(sim.yimos.len(), 3);
    }

    #[test]
    fn test_elapsed_countdown_alone_only_passes_breathing() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("selfcare-1"));

        for _ in 0..900 {
            engine.countdown_tick();
        }
        assert!(engine.complete(&mut sim, NOON).is_none());
    }

    #[test]
    fn test_skip_discards_everything() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        engine.present(by_id("kindness-1"));
        engine.set_response("held the door");

        let note = engine.skip().unwrap();
        assert!(matches!(note, Notification::ChallengeSkipped));
        assert_eq!(engine.phase(), ChallengePhase::Idle);
        assert!(sim.yimos.is_empty());
        assert_eq!(engine.progress.total_completed, 0);

        // Skipping again is a no-op
        assert!(engine.skip().is_none());
    }

    #[test]
    fn test_complete_while_idle_is_refused() {
        let mut sim = sim();
        let mut engine = ChallengeEngine::new();
        assert!(engine.complete(&mut sim, NOON).is_none());
    }
}
