//! Health permission toggles and the target health platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One category of health data the bridge app asks to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKind {
    Steps,
    Calories,
    HeartRate,
    Workouts,
    Sleep,
}

impl PermissionKind {
    /// All kinds in display order.
    pub const ALL: [PermissionKind; 5] = [
        PermissionKind::Steps,
        PermissionKind::Calories,
        PermissionKind::HeartRate,
        PermissionKind::Workouts,
        PermissionKind::Sleep,
    ];

    /// Stable key name (`steps`, `calories`, `heartRate`, `workouts`, `sleep`).
    pub fn key(&self) -> &'static str {
        match self {
            PermissionKind::Steps => "steps",
            PermissionKind::Calories => "calories",
            PermissionKind::HeartRate => "heartRate",
            PermissionKind::Workouts => "workouts",
            PermissionKind::Sleep => "sleep",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PermissionKind::Steps => "Steps",
            PermissionKind::Calories => "Calories Burned",
            PermissionKind::HeartRate => "Heart Rate",
            PermissionKind::Workouts => "Workouts",
            PermissionKind::Sleep => "Sleep",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PermissionKind::Steps => "Daily step count and distance",
            PermissionKind::Calories => "Active and resting energy",
            PermissionKind::HeartRate => "Heart rate measurements",
            PermissionKind::Workouts => "Exercise sessions and activities",
            PermissionKind::Sleep => "Sleep duration and quality",
        }
    }

    fn index(self) -> usize {
        match self {
            PermissionKind::Steps => 0,
            PermissionKind::Calories => 1,
            PermissionKind::HeartRate => 2,
            PermissionKind::Workouts => 3,
            PermissionKind::Sleep => 4,
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five boolean flags, one per [`PermissionKind`]. All start off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSet {
    flags: [bool; 5],
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every permission granted.
    pub fn all_granted() -> Self {
        Self { flags: [true; 5] }
    }

    pub fn is_granted(&self, kind: PermissionKind) -> bool {
        self.flags[kind.index()]
    }

    pub fn set(&mut self, kind: PermissionKind, granted: bool) {
        self.flags[kind.index()] = granted;
    }

    /// Flip one flag, returning its new value.
    pub fn toggle(&mut self, kind: PermissionKind) -> bool {
        let flag = &mut self.flags[kind.index()];
        *flag = !*flag;
        *flag
    }

    pub fn all(&self) -> bool {
        self.flags.iter().all(|granted| *granted)
    }

    pub fn granted_count(&self) -> usize {
        self.flags.iter().filter(|granted| **granted).count()
    }

    /// Kinds still switched off, in display order.
    pub fn missing(&self) -> Vec<PermissionKind> {
        PermissionKind::ALL
            .into_iter()
            .filter(|kind| !self.is_granted(*kind))
            .collect()
    }
}

/// Health platform the bridge app presents itself for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn store_name(&self) -> &'static str {
        match self {
            Platform::Android => "Android Health Connect",
            Platform::Ios => "Apple HealthKit",
        }
    }

    pub fn other(&self) -> Platform {
        match self {
            Platform::Android => Platform::Ios,
            Platform::Ios => Platform::Android,
        }
    }
}
