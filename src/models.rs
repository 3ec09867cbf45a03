// ABOUTME: Core data models for the Trailfit fitness tracker
// ABOUTME: Defines User, FitnessProfile, Workout, HealthMetric, HikingSession and Notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Persisted record kinds for the Trailfit server. Every non-user entity is
//! owned by a user row and carries its owner's id; ownership is always derived
//! from the authenticated caller, never from a request body.
//!
//! Physical measurements (weight, height, distance, elevation) use fixed-point
//! [`Decimal`] values rather than floats, and calendar-day fields are date-only.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workout muscle-group / modality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Chest-focused strength session
    Chest,
    /// Leg-focused strength session
    Legs,
    /// Back-focused strength session
    Back,
    /// Arm-focused strength session
    Arms,
    /// Cardiovascular session
    Cardio,
    /// Whole-body session
    #[default]
    FullBody,
    /// Scheduled rest day
    Rest,
}

impl WorkoutType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Legs => "legs",
            Self::Back => "back",
            Self::Arms => "arms",
            Self::Cardio => "cardio",
            Self::FullBody => "full_body",
            Self::Rest => "rest",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "chest" => Self::Chest,
            "legs" => Self::Legs,
            "back" => Self::Back,
            "arms" => Self::Arms,
            "cardio" => Self::Cardio,
            "rest" => Self::Rest,
            _ => Self::FullBody,
        }
    }
}

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Reminder for an upcoming scheduled workout
    WorkoutReminder,
    /// Motivational message
    #[default]
    Motivational,
    /// Achievement unlocked
    Achievement,
}

impl NotificationType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutReminder => "workout_reminder",
            Self::Motivational => "motivational",
            Self::Achievement => "achievement",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "workout_reminder" => Self::WorkoutReminder,
            "achievement" => Self::Achievement,
            _ => Self::Motivational,
        }
    }
}

/// Fitness goal declared on a user's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Lose body weight
    WeightLoss,
    /// Build muscle mass
    MuscleGain,
    /// Improve endurance
    Endurance,
    /// Maintain general health
    #[default]
    GeneralHealth,
}

impl FitnessGoal {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Endurance => "endurance",
            Self::GeneralHealth => "general_health",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "weight_loss" => Self::WeightLoss,
            "muscle_gain" => Self::MuscleGain,
            "endurance" => Self::Endurance,
            _ => Self::GeneralHealth,
        }
    }
}

/// Self-reported experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// New to structured training
    #[default]
    Beginner,
    /// Regular training history
    Intermediate,
    /// Extensive training history
    Advanced,
}

impl FitnessLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// A user account, synced from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (assigned by the identity provider)
    pub id: Uuid,
    /// Email address, unique across users
    pub email: String,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Avatar URL
    pub profile_image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last sync timestamp
    pub updated_at: DateTime<Utc>,
}

/// Identity fields carried by an upsert from the identity gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUser {
    /// Unique identifier
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Avatar URL
    pub profile_image_url: Option<String>,
}

/// A user's fitness profile
///
/// Logically one per user; lookups return the most recent row when more than
/// one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Self-reported gender
    pub gender: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    /// Body weight in kilograms
    pub weight_kg: Option<Decimal>,
    /// Height in centimeters
    pub height_cm: Option<Decimal>,
    /// Declared fitness goal
    pub fitness_goal: Option<FitnessGoal>,
    /// Declared experience level
    pub fitness_level: Option<FitnessLevel>,
    /// Free-text training preferences
    pub preferences: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A scheduled or completed workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Workout classification
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Optional description
    pub description: Option<String>,
    /// Exercise list as an opaque text blob
    pub exercises: Option<String>,
    /// Planned duration in minutes
    pub duration_minutes: Option<i32>,
    /// Calendar day the workout is scheduled for
    pub scheduled_date: Option<NaiveDate>,
    /// Whether the workout has been completed (one-way transition)
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A health metric reading, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day the reading belongs to
    pub date: NaiveDate,
    /// Resting heart rate before activity (bpm)
    pub heart_rate_pre: Option<i32>,
    /// Heart rate after activity (bpm)
    pub heart_rate_post: Option<i32>,
    /// Step count
    pub steps: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Workout this reading is attached to, if any; nulled if that workout is deleted
    pub workout_id: Option<Uuid>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A logged hiking session, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HikingSession {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day of the hike
    pub date: NaiveDate,
    /// Distance covered in kilometers
    pub distance_km: Option<Decimal>,
    /// Elevation gained in meters
    pub elevation_gain_m: Option<Decimal>,
    /// Duration in minutes
    pub duration_minutes: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Route or trail name
    pub route_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A notification delivered to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Notification category
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// Whether the notification has been read (one-way transition)
    pub read: bool,
    /// When the notification is scheduled to be shown
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
