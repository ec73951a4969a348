//! Mock health data shown on the fit-data screen.
//!
//! Nothing here talks to a real health platform. [`MockHealthProvider`] hands
//! out a fixed snapshot with workout timestamps relative to "now".

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

/// One recorded workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    /// Minutes.
    pub duration: u32,
    pub calories: u32,
    /// Category label such as "Yoga" or "HIIT".
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
}

/// Daily snapshot plus recent workouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    pub steps: u32,
    pub step_goal: u32,
    pub calories: u32,
    /// Beats per minute.
    pub heart_rate: u32,
    pub active_minutes: u32,
    pub workouts: Vec<Workout>,
}

impl HealthData {
    /// Fraction of the step goal reached, clamped to `0.0..=1.0`.
    pub fn step_progress(&self) -> f64 {
        if self.step_goal == 0 {
            return 0.0;
        }
        (f64::from(self.steps) / f64::from(self.step_goal)).clamp(0.0, 1.0)
    }
}

/// A video shown under "Recent Videos" on the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVideo {
    pub title: &'static str,
    pub minutes: u32,
    pub completed: bool,
}

/// Supplier of display-only health records.
pub trait HealthDataProvider {
    /// Current snapshot, with timestamps computed against `now`.
    fn snapshot(&self, now: DateTime<Utc>) -> HealthData;
}

/// Fixed sample data.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockHealthProvider;

impl HealthDataProvider for MockHealthProvider {
    fn snapshot(&self, now: DateTime<Utc>) -> HealthData {
        let workout = |id: &str, name: &str, duration, calories, kind: &str, hours_ago| Workout {
            id: id.to_string(),
            name: name.to_string(),
            duration,
            calories,
            kind: kind.to_string(),
            timestamp: now - Duration::hours(hours_ago),
        };

        HealthData {
            steps: 8247,
            step_goal: 10_000,
            calories: 2156,
            heart_rate: 72,
            active_minutes: 45,
            workouts: vec![
                workout("1", "Morning Yoga Flow", 30, 120, "Yoga", 2),
                workout("2", "HIIT Cardio Blast", 20, 180, "HIIT", 24),
                workout("3", "Evening Walk", 45, 150, "Walking", 48),
            ],
        }
    }
}

/// Videos listed on the main screen.
pub fn recent_videos() -> Vec<RecentVideo> {
    vec![
        RecentVideo {
            title: "Morning Yoga Flow",
            minutes: 30,
            completed: true,
        },
        RecentVideo {
            title: "HIIT Cardio Blast",
            minutes: 20,
            completed: true,
        },
    ]
}

/// Relative age of a workout: "Just now", "5h ago", "2d ago".
pub fn format_workout_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", hours / 24)
    }
}

/// Wall-clock "HH:MM" in local time for the last-synced line.
pub fn format_sync_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

/// Thousands separators for step counts ("8,247").
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
