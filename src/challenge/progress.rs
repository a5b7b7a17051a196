//! Session progress: completion log, daily streak, badges
//!
//! Never persisted; lives only as long as the page. "Now" is always injected
//! by the caller as a millisecond timestamp so streak math is testable.

use serde::Serialize;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Whole UTC days since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DayStamp(pub i64);

impl DayStamp {
    pub fn from_ms(ms: f64) -> Self {
        Self((ms / MS_PER_DAY).floor() as i64)
    }

    pub fn days_since(self, earlier: DayStamp) -> i64 {
        self.0 - earlier.0
    }
}

/// One completed challenge
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRecord {
    pub challenge_id: &'static str,
    pub completed_at_ms: f64,
    pub response: String,
}

/// Per-session wellness progress
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProgress {
    pub total_completed: u32,
    pub streak_days: u32,
    pub last_completed_day: Option<DayStamp>,
    pub last_completed_ms: Option<f64>,
    /// Completion log, oldest first
    pub completed: Vec<CompletionRecord>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion at `now_ms` and recompute the streak.
    ///
    /// Same calendar day as the last completion: streak unchanged (already
    /// credited today). Exactly yesterday: streak + 1. Any other gap, or the
    /// first completion ever: streak resets to 1.
    pub fn record(&mut self, challenge_id: &'static str, response: String, now_ms: f64) {
        let today = DayStamp::from_ms(now_ms);
        self.streak_days = match self.last_completed_day {
            Some(last) if last == today => self.streak_days,
            Some(last) if today.days_since(last) == 1 => self.streak_days + 1,
            _ => 1,
        };
        self.last_completed_day = Some(today);
        self.last_completed_ms = Some(now_ms);
        self.total_completed += 1;
        self.completed.push(CompletionRecord {
            challenge_id,
            completed_at_ms: now_ms,
            response,
        });
    }
}

/// Streak marker shown next to the day count
pub fn streak_emoji(streak: u32) -> &'static str {
    if streak >= 30 {
        "\u{1F525}\u{1F525}\u{1F525}"
    } else if streak >= 14 {
        "\u{1F525}\u{1F525}"
    } else if streak >= 7 {
        "\u{1F525}"
    } else if streak >= 3 {
        "\u{2B50}"
    } else if streak >= 1 {
        "\u{2728}"
    } else {
        "\u{1F331}"
    }
}

/// Earned streak badges, lowest tier first
pub fn badges(streak: u32) -> Vec<&'static str> {
    let mut earned = Vec::new();
    if streak >= 7 {
        earned.push("\u{1F31F} Week Warrior");
    }
    if streak >= 14 {
        earned.push("\u{1F48E} Mindful Master");
    }
    if streak >= 30 {
        earned.push("\u{1F3C6} Wellness Champion");
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_ms(day: i64) -> f64 {
        day as f64 * MS_PER_DAY + 12.0 * 3_600_000.0 // noon UTC
    }

    #[test]
    fn test_first_completion_starts_streak_at_one() {
        let mut progress = UserProgress::new();
        progress.record("gratitude-1", "the sun".into(), day_ms(100));

        assert_eq!(progress.total_completed, 1);
        assert_eq!(progress.streak_days, 1);
        assert_eq!(progress.last_completed_day, Some(DayStamp(100)));
        assert_eq!(progress.completed.len(), 1);
    }

    #[test]
    fn test_consecutive_days_increment_by_one() {
        let mut progress = UserProgress::new();
        progress.record("gratitude-1", "a".into(), day_ms(100));
        progress.record("kindness-1", "b".into(), day_ms(101));
        progress.record("selfcare-2", "c".into(), day_ms(102));

        assert_eq!(progress.streak_days, 3);
        assert_eq!(progress.total_completed, 3);
    }

    #[test]
    fn test_same_day_repeat_keeps_streak() {
        let mut progress = UserProgress::new();
        progress.record("gratitude-1", "a".into(), day_ms(100));
        progress.record("gratitude-2", "b".into(), day_ms(100) + 3_600_000.0);

        assert_eq!(progress.streak_days, 1);
        // Still counted and logged
        assert_eq!(progress.total_completed, 2);
        assert_eq!(progress.completed.len(), 2);
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let mut progress = UserProgress::new();
        progress.record("gratitude-1", "a".into(), day_ms(100));
        progress.record("kindness-1", "b".into(), day_ms(101));
        assert_eq!(progress.streak_days, 2);

        // Skipped day 102 entirely
        progress.record("affirmation-1", "c".into(), day_ms(103));
        assert_eq!(progress.streak_days, 1);
    }

    #[test]
    fn test_day_stamp_boundaries() {
        // 23:59:59.999 and 00:00:00.000 of the next day differ by one
        let late = DayStamp::from_ms(day_ms(100) + 12.0 * 3_600_000.0 - 1.0);
        let midnight = DayStamp::from_ms(101.0 * MS_PER_DAY);
        assert_eq!(late, DayStamp(100));
        assert_eq!(midnight, DayStamp(101));
        assert_eq!(midnight.days_since(late), 1);
    }

    #[test]
    fn test_streak_emoji_tiers() {
        assert_eq!(streak_emoji(0), "\u{1F331}");
        assert_eq!(streak_emoji(1), "\u{2728}");
        assert_eq!(streak_emoji(3), "\u{2B50}");
        assert_eq!(streak_emoji(7), "\u{1F525}");
        assert_eq!(streak_emoji(14), "\u{1F525}\u{1F525}");
        assert_eq!(streak_emoji(30), "\u{1F525}\u{1F525}\u{1F525}");
    }

    #[test]
    fn test_badges_accumulate() {
        assert!(badges(6).is_empty());
        assert_eq!(badges(7).len(), 1);
        assert_eq!(badges(14).len(), 2);
        assert_eq!(badges(30).len(), 3);
    }
}
