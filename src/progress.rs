// ABOUTME: Progress reporting aggregation over workouts, health metrics and hikes
// ABOUTME: Computes summary totals, the 7-day activity window and achievement flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Progress Reporting
//!
//! Linear reductions over a user's fetched collections. Nothing here is
//! persisted: achievement flags are threshold predicates recomputed on every
//! request, so the report is always consistent with the underlying rows.

use crate::models::{HealthMetric, HikingSession, Workout};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed workouts needed for the Workout Warrior achievement
const WORKOUT_WARRIOR_THRESHOLD: u32 = 5;
/// Cumulative steps needed for the Step Master achievement
const STEP_MASTER_THRESHOLD: i64 = 50_000;
/// Hikes needed for the Mountain Explorer achievement
const MOUNTAIN_EXPLORER_THRESHOLD: u32 = 3;
/// Days covered by the trailing activity window, today inclusive
const ACTIVITY_WINDOW_DAYS: i64 = 7;

/// Aggregated steps and calories for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Calendar day
    pub date: NaiveDate,
    /// Steps summed over the day's metric rows
    pub steps: i64,
    /// Calories summed over the day's metric rows
    pub calories_burned: i64,
}

/// An achievement badge with its unlock state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Unlock criterion, user-facing
    pub description: &'static str,
    /// Whether the criterion is currently met
    pub unlocked: bool,
}

/// Aggregated progress report for a user
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    /// Total workouts on record
    pub total_workouts: u32,
    /// Workouts marked completed
    pub completed_workouts: u32,
    /// Total hiking sessions on record
    pub total_hikes: u32,
    /// Steps summed over all metric rows
    pub total_steps: i64,
    /// Calories summed over all metric rows
    pub total_calories_burned: i64,
    /// Mean heart rate per reading (post-activity, falling back to pre), 0 when no readings
    pub average_heart_rate: i32,
    /// Workout counts grouped by type string
    pub workouts_by_type: BTreeMap<String, u32>,
    /// Trailing 7-day activity, oldest day first, zero-filled
    pub weekly_activity: Vec<DailyActivity>,
    /// Achievement badges with unlock state
    pub achievements: Vec<Achievement>,
}

/// Build the progress report for a user's fetched collections
///
/// `today` anchors the trailing window; callers pass the current calendar
/// date so the computation stays deterministic under test.
#[must_use]
pub fn build_report(
    workouts: &[Workout],
    metrics: &[HealthMetric],
    hikes: &[HikingSession],
    today: NaiveDate,
) -> ProgressReport {
    let total_workouts = u32::try_from(workouts.len()).unwrap_or(u32::MAX);
    let completed_workouts =
        u32::try_from(workouts.iter().filter(|w| w.completed).count()).unwrap_or(u32::MAX);
    let total_hikes = u32::try_from(hikes.len()).unwrap_or(u32::MAX);

    let total_steps: i64 = metrics.iter().map(|m| i64::from(m.steps.unwrap_or(0))).sum();
    let total_calories_burned: i64 = metrics
        .iter()
        .map(|m| i64::from(m.calories_burned.unwrap_or(0)))
        .sum();

    let average_heart_rate = average_heart_rate(metrics);

    let mut workouts_by_type: BTreeMap<String, u32> = BTreeMap::new();
    for workout in workouts {
        *workouts_by_type
            .entry(workout.workout_type.as_str().to_owned())
            .or_insert(0) += 1;
    }

    let weekly_activity = weekly_activity(metrics, today);

    let achievements = vec![
        Achievement {
            id: "workout_warrior",
            title: "Workout Warrior",
            description: "Completed 5+ workouts",
            unlocked: completed_workouts >= WORKOUT_WARRIOR_THRESHOLD,
        },
        Achievement {
            id: "step_master",
            title: "Step Master",
            description: "Walked 50,000+ steps",
            unlocked: total_steps >= STEP_MASTER_THRESHOLD,
        },
        Achievement {
            id: "mountain_explorer",
            title: "Mountain Explorer",
            description: "Completed 3+ hikes",
            unlocked: total_hikes >= MOUNTAIN_EXPLORER_THRESHOLD,
        },
    ];

    ProgressReport {
        total_workouts,
        completed_workouts,
        total_hikes,
        total_steps,
        total_calories_burned,
        average_heart_rate,
        workouts_by_type,
        weekly_activity,
        achievements,
    }
}

/// Mean heart rate across readings, preferring the post-activity value
#[allow(clippy::cast_possible_truncation)]
fn average_heart_rate(metrics: &[HealthMetric]) -> i32 {
    if metrics.is_empty() {
        return 0;
    }
    let sum: i64 = metrics
        .iter()
        .map(|m| i64::from(m.heart_rate_post.or(m.heart_rate_pre).unwrap_or(0)))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / metrics.len() as f64;
    mean.round() as i32
}

/// Bucket metrics into the trailing window, one entry per day, oldest first
///
/// Days with no metric rows contribute zero rather than being skipped.
fn weekly_activity(metrics: &[HealthMetric], today: NaiveDate) -> Vec<DailyActivity> {
    (0..ACTIVITY_WINDOW_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (steps, calories_burned) = metrics
                .iter()
                .filter(|m| m.date == date)
                .fold((0i64, 0i64), |(steps, calories), m| {
                    (
                        steps + i64::from(m.steps.unwrap_or(0)),
                        calories + i64::from(m.calories_burned.unwrap_or(0)),
                    )
                });
            DailyActivity {
                date,
                steps,
                calories_burned,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutType;
    use chrono::Utc;
    use uuid::Uuid;

    fn workout(completed: bool, workout_type: WorkoutType) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "test".into(),
            workout_type,
            description: None,
            exercises: None,
            duration_minutes: None,
            scheduled_date: None,
            completed,
            created_at: Utc::now(),
        }
    }

    fn metric(date: NaiveDate, steps: i32, calories: i32) -> HealthMetric {
        HealthMetric {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date,
            heart_rate_pre: None,
            heart_rate_post: None,
            steps: Some(steps),
            calories_burned: Some(calories),
            workout_id: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn hike(date: NaiveDate) -> HikingSession {
        HikingSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date,
            distance_km: None,
            elevation_gain_m: None,
            duration_minutes: None,
            calories_burned: None,
            route_name: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_empty_report_is_all_zero() {
        let report = build_report(&[], &[], &[], today());
        assert_eq!(report.total_workouts, 0);
        assert_eq!(report.completed_workouts, 0);
        assert_eq!(report.total_hikes, 0);
        assert_eq!(report.total_steps, 0);
        assert_eq!(report.total_calories_burned, 0);
        assert_eq!(report.average_heart_rate, 0);
        assert!(report.workouts_by_type.is_empty());
        assert!(report.achievements.iter().all(|a| !a.unlocked));
        // Window stays fully populated even with no data
        assert_eq!(report.weekly_activity.len(), 7);
        assert!(report.weekly_activity.iter().all(|d| d.steps == 0));
    }

    #[test]
    fn test_workout_warrior_unlocks_at_five_completed() {
        let four: Vec<Workout> = (0..4).map(|_| workout(true, WorkoutType::Legs)).collect();
        let report = build_report(&four, &[], &[], today());
        assert!(!report.achievements[0].unlocked);

        let five: Vec<Workout> = (0..5).map(|_| workout(true, WorkoutType::Legs)).collect();
        let report = build_report(&five, &[], &[], today());
        assert_eq!(report.completed_workouts, 5);
        let warrior = report
            .achievements
            .iter()
            .find(|a| a.id == "workout_warrior")
            .unwrap();
        assert!(warrior.unlocked);
    }

    #[test]
    fn test_step_master_boundary() {
        let below = vec![metric(today(), 49_999, 0)];
        let report = build_report(&[], &below, &[], today());
        let step_master = report
            .achievements
            .iter()
            .find(|a| a.id == "step_master")
            .unwrap();
        assert!(!step_master.unlocked);

        let exact = vec![metric(today(), 25_000, 0), metric(today(), 25_000, 0)];
        let report = build_report(&[], &exact, &[], today());
        let step_master = report
            .achievements
            .iter()
            .find(|a| a.id == "step_master")
            .unwrap();
        assert_eq!(report.total_steps, 50_000);
        assert!(step_master.unlocked);
    }

    #[test]
    fn test_mountain_explorer_unlocks_at_three_hikes() {
        let hikes = vec![hike(today()), hike(today()), hike(today())];
        let report = build_report(&[], &[], &hikes, today());
        let explorer = report
            .achievements
            .iter()
            .find(|a| a.id == "mountain_explorer")
            .unwrap();
        assert!(explorer.unlocked);
    }

    #[test]
    fn test_weekly_window_buckets_by_day() {
        let metrics = vec![
            metric(today(), 1000, 100),
            metric(today(), 500, 50),
            metric(today() - Duration::days(3), 2000, 200),
            // Outside the window, must not appear in buckets
            metric(today() - Duration::days(9), 9999, 999),
        ];
        let report = build_report(&[], &metrics, &[], today());

        assert_eq!(report.weekly_activity.len(), 7);
        assert_eq!(report.weekly_activity[0].date, today() - Duration::days(6));
        assert_eq!(report.weekly_activity[6].date, today());
        // Same-day rows are summed
        assert_eq!(report.weekly_activity[6].steps, 1500);
        assert_eq!(report.weekly_activity[6].calories_burned, 150);
        assert_eq!(report.weekly_activity[3].steps, 2000);
        // Empty days are zero-filled
        assert_eq!(report.weekly_activity[1].steps, 0);
        // Totals still include out-of-window rows
        assert_eq!(report.total_steps, 1000 + 500 + 2000 + 9999);
    }

    #[test]
    fn test_workouts_grouped_by_type() {
        let workouts = vec![
            workout(false, WorkoutType::Legs),
            workout(true, WorkoutType::Legs),
            workout(false, WorkoutType::Cardio),
        ];
        let report = build_report(&workouts, &[], &[], today());
        assert_eq!(report.workouts_by_type.get("legs"), Some(&2));
        assert_eq!(report.workouts_by_type.get("cardio"), Some(&1));
        assert_eq!(report.workouts_by_type.get("chest"), None);
    }

    #[test]
    fn test_average_heart_rate_prefers_post() {
        let mut first = metric(today(), 0, 0);
        first.heart_rate_pre = Some(60);
        first.heart_rate_post = Some(120);
        let mut second = metric(today(), 0, 0);
        second.heart_rate_pre = Some(80);
        let report = build_report(&[], &[first, second], &[], today());
        // (120 + 80) / 2
        assert_eq!(report.average_heart_rate, 100);
    }
}
