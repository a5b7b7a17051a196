//! The fixed wellness challenge table
//!
//! Ten prompts across five categories. Records are immutable; selection is
//! uniform over the whole table through the caller's RNG.

use rand::Rng;
use serde::Serialize;

use crate::sim::{ColorTag, Fill, GradientKind};

/// Challenge categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Gratitude,
    Mindfulness,
    Kindness,
    Selfcare,
    Affirmation,
}

/// A single wellness challenge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub kind: ChallengeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub icon: &'static str,
    pub color: Fill,
    /// Yimos spawned on completion
    pub yimo_reward: u32,
    /// Optional countdown, in seconds
    pub time_limit_secs: Option<u32>,
}

impl Challenge {
    /// The breathing exercise hides its text field until the countdown
    /// elapses; every other challenge shows it from the start.
    pub fn is_time_gated(&self) -> bool {
        self.kind == ChallengeKind::Mindfulness && self.time_limit_secs.is_some()
    }
}

pub static CHALLENGES: [Challenge; 10] = [
    // Gratitude
    Challenge {
        id: "gratitude-1",
        kind: ChallengeKind::Gratitude,
        title: "Three Good Things",
        description: "List three things you're grateful for today",
        prompt: "What are three things that made you smile or feel grateful today?",
        icon: "\u{1F64F}",
        color: Fill::Gradient(GradientKind::Cosmic),
        yimo_reward: 3,
        time_limit_secs: None,
    },
    Challenge {
        id: "gratitude-2",
        kind: ChallengeKind::Gratitude,
        title: "People Appreciation",
        description: "Think of someone who made your day better",
        prompt: "Who is someone in your life you appreciate? What did they do that made a difference?",
        icon: "\u{1F49D}",
        color: Fill::Solid(ColorTag::Pink),
        yimo_reward: 2,
        time_limit_secs: None,
    },
    // Mindfulness
    Challenge {
        id: "mindfulness-1",
        kind: ChallengeKind::Mindfulness,
        title: "5-4-3-2-1 Grounding",
        description: "Ground yourself using your senses",
        prompt: "Name: 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste",
        icon: "\u{1F9D8}",
        color: Fill::Solid(ColorTag::Green),
        yimo_reward: 5,
        time_limit_secs: None,
    },
    Challenge {
        id: "mindfulness-2",
        kind: ChallengeKind::Mindfulness,
        title: "Breathing Space",
        description: "Take 10 deep breaths mindfully",
        prompt: "Take 10 slow, deep breaths. Focus only on your breathing. How do you feel now?",
        icon: "\u{1F32C}\u{FE0F}",
        color: Fill::Solid(ColorTag::Blue),
        yimo_reward: 2,
        time_limit_secs: Some(60),
    },
    // Kindness
    Challenge {
        id: "kindness-1",
        kind: ChallengeKind::Kindness,
        title: "Random Act of Kindness",
        description: "Do something kind for someone else",
        prompt: "What kind act did you do today? It can be as simple as a smile or holding a door!",
        icon: "\u{1F496}",
        color: Fill::Gradient(GradientKind::Playful),
        yimo_reward: 4,
        time_limit_secs: None,
    },
    Challenge {
        id: "kindness-2",
        kind: ChallengeKind::Kindness,
        title: "Self-Compassion",
        description: "Be kind to yourself",
        prompt: "What would you say to comfort a good friend? Now say those same words to yourself.",
        icon: "\u{1F917}",
        color: Fill::Solid(ColorTag::Purple),
        yimo_reward: 3,
        time_limit_secs: None,
    },
    // Self-care
    Challenge {
        id: "selfcare-1",
        kind: ChallengeKind::Selfcare,
        title: "Digital Detox",
        description: "Take a 15-minute break from screens",
        prompt: "How did you spend your screen-free time? What did you notice?",
        icon: "\u{1F4F1}\u{274C}",
        color: Fill::Solid(ColorTag::Orange),
        yimo_reward: 3,
        time_limit_secs: Some(900),
    },
    Challenge {
        id: "selfcare-2",
        kind: ChallengeKind::Selfcare,
        title: "Move Your Body",
        description: "Do any physical activity for 5 minutes",
        prompt: "What movement did you do? How does your body feel now?",
        icon: "\u{1F3C3}\u{200D}\u{2640}\u{FE0F}",
        color: Fill::Solid(ColorTag::Yellow),
        yimo_reward: 2,
        time_limit_secs: None,
    },
    // Affirmation
    Challenge {
        id: "affirmation-1",
        kind: ChallengeKind::Affirmation,
        title: "Personal Strength",
        description: "Identify one of your strengths",
        prompt: "What is one thing you like about yourself? Describe a time when this strength helped you.",
        icon: "\u{1F4AA}",
        color: Fill::Gradient(GradientKind::Sunset),
        yimo_reward: 2,
        time_limit_secs: None,
    },
    Challenge {
        id: "affirmation-2",
        kind: ChallengeKind::Affirmation,
        title: "Progress Celebration",
        description: "Acknowledge your growth",
        prompt: "What is something you've improved at recently, no matter how small?",
        icon: "\u{1F31F}",
        color: Fill::Solid(ColorTag::Green),
        yimo_reward: 3,
        time_limit_secs: None,
    },
];

/// Uniformly pick one challenge from the table
pub fn random_challenge(rng: &mut impl Rng) -> &'static Challenge {
    &CHALLENGES[rng.random_range(0..CHALLENGES.len())]
}

/// All challenges of one category, in table order
pub fn challenges_of_kind(kind: ChallengeKind) -> impl Iterator<Item = &'static Challenge> {
    CHALLENGES.iter().filter(move |c| c.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_table_shape() {
        assert_eq!(CHALLENGES.len(), 10);

        let ids: HashSet<_> = CHALLENGES.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 10);

        for challenge in &CHALLENGES {
            assert!(challenge.yimo_reward > 0);
        }
    }

    #[test]
    fn test_time_limits() {
        let breathing = CHALLENGES.iter().find(|c| c.id == "mindfulness-2").unwrap();
        assert_eq!(breathing.time_limit_secs, Some(60));
        assert!(breathing.is_time_gated());

        let detox = CHALLENGES.iter().find(|c| c.id == "selfcare-1").unwrap();
        assert_eq!(detox.time_limit_secs, Some(900));
        // Timed but not the breathing exercise: text field stays visible
        assert!(!detox.is_time_gated());

        let grounding = CHALLENGES.iter().find(|c| c.id == "mindfulness-1").unwrap();
        assert!(!grounding.is_time_gated());
    }

    #[test]
    fn test_random_challenge_covers_table() {
        let mut rng = Pcg32::seed_from_u64(42);
        let table_ids: HashSet<_> = CHALLENGES.iter().map(|c| c.id).collect();

        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let challenge = random_challenge(&mut rng);
            assert!(table_ids.contains(challenge.id));
            seen.insert(challenge.id);
        }
        // Every entry is reachable
        assert_eq!(seen.len(), CHALLENGES.len());
    }

    #[test]
    fn test_challenges_of_kind() {
        let mindfulness: Vec<_> = challenges_of_kind(ChallengeKind::Mindfulness).collect();
        assert_eq!(mindfulness.len(), 2);
        assert!(mindfulness.iter().all(|c| c.kind == ChallengeKind::Mindfulness));
    }
}
