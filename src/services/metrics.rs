//! Product metrics derived from raw analytics and session events.

use crate::models::*;
use chrono::{Duration, NaiveDate, Timelike};
use std::collections::{BTreeMap, HashSet};

fn by_name(events: &[AnalyticsEvent], name: AnalyticsEventName) -> impl Iterator<Item = &AnalyticsEvent> {
    events.iter().filter(move |event| event.name == name)
}

/// Share of new users who start or complete a focus session within 24h of
/// registering.
pub fn first_day_session_completion_rate(events: &[AnalyticsEvent]) -> PercentageMetric {
    let signups: Vec<&AnalyticsEvent> = by_name(events, AnalyticsEventName::UserRegistered).collect();
    if signups.is_empty() {
        return PercentageMetric::zero();
    }

    let sessions: Vec<&AnalyticsEvent> = events
        .iter()
        .filter(|e| {
            matches!(
                e.name,
                AnalyticsEventName::SessionStart | AnalyticsEventName::SessionComplete
            )
        })
        .collect();

    let converted = signups
        .iter()
        .filter(|signup| {
            let cutoff = signup.occurred_at + Duration::hours(24);
            sessions.iter().any(|session| {
                session.user_id == signup.user_id
                    && signup.occurred_at <= session.occurred_at
                    && session.occurred_at <= cutoff
            })
        })
        .count();

    PercentageMetric::of(converted, signups.len())
}

/// Day-N retention: a session start in `[signup + N days, signup + N + 1 days)`.
pub fn session_retention_rate(events: &[AnalyticsEvent], day: i64) -> PercentageMetric {
    let signups: Vec<&AnalyticsEvent> = by_name(events, AnalyticsEventName::UserRegistered).collect();
    if signups.is_empty() {
        return PercentageMetric::zero();
    }

    let starts: Vec<&AnalyticsEvent> = by_name(events, AnalyticsEventName::SessionStart).collect();

    let retained = signups
        .iter()
        .filter(|signup| {
            let window_start = signup.occurred_at + Duration::days(day);
            let window_end = window_start + Duration::days(1);
            starts.iter().any(|start| {
                start.user_id == signup.user_id
                    && start.occurred_at >= window_start
                    && start.occurred_at < window_end
            })
        })
        .count();

    PercentageMetric::of(retained, signups.len())
}

/// Registered → deposited → deposited and started a session.
pub fn onboarding_funnel(events: &[AnalyticsEvent]) -> OnboardingFunnel {
    let signups: Vec<&AnalyticsEvent> = by_name(events, AnalyticsEventName::UserRegistered).collect();
    let depositors: HashSet<&str> = by_name(events, AnalyticsEventName::DepositSuccess)
        .map(|e| e.user_id.as_str())
        .collect();
    let starters: HashSet<&str> = by_name(events, AnalyticsEventName::SessionStart)
        .map(|e| e.user_id.as_str())
        .collect();

    let total = signups.len();
    let deposited = signups
        .iter()
        .filter(|s| depositors.contains(s.user_id.as_str()))
        .count();
    let first_session = signups
        .iter()
        .filter(|s| depositors.contains(s.user_id.as_str()) && starters.contains(s.user_id.as_str()))
        .count();

    OnboardingFunnel {
        onboarded: PercentageMetric::of(total, total),
        deposited: PercentageMetric::of(deposited, total),
        first_session: PercentageMetric::of(first_session, total),
    }
}

pub fn admin_analytics(events: &[AnalyticsEvent]) -> AdminAnalyticsPage {
    AdminAnalyticsPage {
        first_day_session_completion: first_day_session_completion_rate(events),
        day1_retention: session_retention_rate(events, 1),
        day7_retention: session_retention_rate(events, 7),
        funnel: onboarding_funnel(events),
        event_count: events.len(),
    }
}

/// Per-day counts, newest day first, bucketed by session start (UTC).
pub fn daily_session_metrics(sessions: &[SessionEvent]) -> Vec<DailySessionMetrics> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&SessionEvent>> = BTreeMap::new();
    for session in sessions {
        by_day
            .entry(session.start_time.date_naive())
            .or_default()
            .push(session);
    }

    by_day
        .into_iter()
        .rev()
        .map(|(date, day)| {
            let completed = day
                .iter()
                .filter(|s| s.status == SessionStatus::Completed)
                .count();
            let total_minutes: f64 = day.iter().map(|s| s.duration_minutes()).sum();
            DailySessionMetrics {
                date,
                sessions_started: day.len(),
                sessions_completed: completed,
                sessions_failed_or_abandoned: day.len() - completed,
                average_duration_minutes: (total_minutes / day.len() as f64 * 10.0).round() / 10.0,
            }
        })
        .collect()
}

/// Sessions per start hour; only hours with activity, busiest first.
pub fn peak_hours(sessions: &[SessionEvent]) -> Vec<PeakHourBucket> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.start_time.hour()).or_default() += 1;
    }

    let mut buckets: Vec<PeakHourBucket> = counts
        .into_iter()
        .map(|(hour, sessions)| PeakHourBucket {
            hour,
            hour_label: format!("{:02}:00", hour),
            sessions,
        })
        .collect();
    buckets.sort_by(|a, b| b.sessions.cmp(&a.sessions).then(a.hour.cmp(&b.hour)));
    buckets
}

pub fn session_analytics(sessions: &[SessionEvent], recent_limit: usize) -> SessionAnalyticsPage {
    let mut recent = sessions.to_vec();
    recent.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    recent.truncate(recent_limit);

    SessionAnalyticsPage {
        daily: daily_session_metrics(sessions),
        peak_hours: peak_hours(sessions),
        recent,
    }
}

pub fn subject_analytics(subjects: &[SubjectSummary]) -> SubjectAnalyticsPage {
    let mut categories: BTreeMap<SubjectCategory, usize> = BTreeMap::new();
    let mut quadrants: BTreeMap<Quadrant, usize> =
        Quadrant::ALL.iter().map(|q| (*q, 0)).collect();

    for subject in subjects {
        *categories.entry(subject.category).or_default() += 1;
        *quadrants.entry(subject.quadrant).or_default() += 1;
    }

    SubjectAnalyticsPage {
        total_subjects: subjects.len(),
        by_category: categories
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        eisenhower: quadrants
            .into_iter()
            .map(|(quadrant, count)| QuadrantCount {
                quadrant,
                label: quadrant.label(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
    }

    fn event(name: AnalyticsEventName, user: &str, hours: i64) -> AnalyticsEvent {
        AnalyticsEvent {
            id: format!("{:?}-{}-{}", name, user, hours),
            name,
            user_id: user.to_string(),
            device: DeviceType::Ios,
            app_version: "1.4.2".to_string(),
            occurred_at: t0() + Duration::hours(hours),
            session_id: None,
            subject_id: None,
            duration_seconds: None,
            wallet_balance_snapshot_in_rupees: None,
            properties: serde_json::Value::Null,
        }
    }

    fn sample() -> Vec<AnalyticsEvent> {
        use AnalyticsEventName::*;
        vec![
            event(UserRegistered, "a", 0),
            event(UserRegistered, "b", 0),
            event(UserRegistered, "c", 0),
            event(SessionStart, "a", 2),
            event(SessionStart, "a", 30),
            event(SessionComplete, "b", 23),
            event(SessionStart, "c", 24 * 7 + 1),
            event(DepositSuccess, "a", 1),
            event(DepositSuccess, "c", 1),
        ]
    }

    #[test]
    fn first_day_completion() {
        let metric = first_day_session_completion_rate(&sample());
        assert_eq!(metric.numerator, 2);
        assert_eq!(metric.denominator, 3);
        assert_eq!(metric.percentage, 66.67);
    }

    #[test]
    fn retention_windows() {
        let d1 = session_retention_rate(&sample(), 1);
        assert_eq!((d1.numerator, d1.denominator), (1, 3));
        assert_eq!(d1.percentage, 33.33);

        let d7 = session_retention_rate(&sample(), 7);
        assert_eq!(d7.numerator, 1);
    }

    #[test]
    fn funnel_requires_deposit_before_session_stage() {
        let funnel = onboarding_funnel(&sample());
        assert_eq!(funnel.onboarded.percentage, 100.0);
        assert_eq!(funnel.deposited.numerator, 2);
        assert_eq!(funnel.first_session.numerator, 2);
    }

    #[test]
    fn no_signups_means_zero() {
        let events = vec![event(AnalyticsEventName::SessionStart, "a", 0)];
        assert_eq!(first_day_session_completion_rate(&events), PercentageMetric::zero());
        assert_eq!(session_retention_rate(&events, 1), PercentageMetric::zero());
        let funnel = onboarding_funnel(&events);
        assert_eq!(funnel.onboarded, PercentageMetric::zero());
        assert_eq!(funnel.deposited.percentage, 0.0);
    }

    fn session(id: &str, hours: i64, minutes: i64, status: SessionStatus) -> SessionEvent {
        let start = t0() + Duration::hours(hours);
        SessionEvent {
            id: id.to_string(),
            user_id: "usr_01".to_string(),
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            status,
            distance_earned_km: 1.0,
        }
    }

    #[test]
    fn daily_and_peak_hour_metrics() {
        let sessions = vec![
            session("s1", 0, 30, SessionStatus::Completed),
            session("s2", 0, 60, SessionStatus::Failed),
            session("s3", 24, 45, SessionStatus::Completed),
        ];

        let daily = daily_session_metrics(&sessions);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(daily[1].sessions_started, 2);
        assert_eq!(daily[1].sessions_failed_or_abandoned, 1);
        assert_eq!(daily[1].average_duration_minutes, 45.0);

        let peaks = peak_hours(&sessions);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].hour_label, "09:00");
        assert_eq!(peaks[0].sessions, 3);

        assert_eq!(session_analytics(&sessions, 2).recent[0].id, "s3");
    }

    #[test]
    fn subject_distribution_lists_every_quadrant() {
        let subjects = vec![SubjectSummary {
            id: "sub_001".to_string(),
            user_id: "usr_01".to_string(),
            name: "Exam prep".to_string(),
            category: SubjectCategory::Study,
            quadrant: Quadrant::UrgentImportant,
        }];
        let page = subject_analytics(&subjects);
        assert_eq!(page.eisenhower.len(), 4);
        assert_eq!(page.eisenhower[0].count, 1);
        assert_eq!(page.by_category.len(), 1);
    }
}
