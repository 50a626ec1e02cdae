use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::meeting::meeting_models::Meeting;

/// A non-fatal data defect found while scanning, e.g. an unparseable date.
/// The meeting is skipped for the cycle and re-evaluated on the next one.
#[derive(Debug, Clone)]
pub struct Anomaly {
    pub meeting_id: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct ImminentMeeting {
    pub meeting: Meeting,
    pub starts_at: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct Evaluation {
    pub imminent: Vec<ImminentMeeting>,
    pub anomalies: Vec<Anomaly>,
}

/// Parses a meeting's `date` + `time` strings into its start instant.
/// Accepts `HH:MM:SS` and `HH:MM` times.
pub fn parse_start_instant(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{date}': {e}"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|e| format!("invalid time '{time}': {e}"))?;
    Ok(date.and_time(time))
}

/// Returns the meetings whose start instant `T` satisfies `0 <= T - now <= window`,
/// both bounds inclusive. Pure and stateless; meetings that fail to parse are
/// reported as anomalies instead of failing the batch.
pub fn evaluate(now: NaiveDateTime, window: Duration, meetings: Vec<Meeting>) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for meeting in meetings {
        match parse_start_instant(&meeting.date, &meeting.time) {
            Ok(starts_at) => {
                let until_start = starts_at - now;
                if until_start >= Duration::zero() && until_start <= window {
                    evaluation.imminent.push(ImminentMeeting { meeting, starts_at });
                }
            }
            Err(reason) => evaluation.anomalies.push(Anomaly {
                meeting_id: meeting.id,
                reason,
            }),
        }
    }

    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::store::testing::meeting;

    fn window() -> Duration {
        Duration::minutes(5)
    }

    fn instant(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn includes_meeting_exactly_at_start() {
        let now = instant("2025-08-15 10:00:00");
        let result = evaluate(now, window(), vec![meeting("m1", "2025-08-15", "10:00:00", &["u1"])]);
        assert_eq!(result.imminent.len(), 1);
    }

    #[test]
    fn includes_meeting_exactly_at_window_edge() {
        let now = instant("2025-08-15 10:00:00");
        let result = evaluate(now, window(), vec![meeting("m1", "2025-08-15", "10:05:00", &["u1"])]);
        assert_eq!(result.imminent.len(), 1);
    }

    #[test]
    fn excludes_meeting_one_millisecond_past_window() {
        // T - now = 5min + 1ms
        let now = instant("2025-08-15 09:59:59.999");
        let result = evaluate(now, window(), vec![meeting("m1", "2025-08-15", "10:05:00", &["u1"])]);
        assert!(result.imminent.is_empty());
    }

    #[test]
    fn excludes_meeting_already_started() {
        let now = instant("2025-08-15 10:00:01");
        let result = evaluate(now, window(), vec![meeting("m1", "2025-08-15", "10:00:00", &["u1"])]);
        assert!(result.imminent.is_empty());
    }

    #[test]
    fn excludes_meeting_far_in_future() {
        let now = instant("2025-08-15 10:00:00");
        let result = evaluate(now, window(), vec![meeting("m1", "2025-08-16", "10:00:00", &["u1"])]);
        assert!(result.imminent.is_empty());
    }

    #[test]
    fn malformed_date_is_skipped_with_anomaly_while_valid_ones_match() {
        let now = instant("2025-08-15 10:00:00");
        let result = evaluate(
            now,
            window(),
            vec![
                meeting("bad", "not-a-date", "10:03:00", &["u1"]),
                meeting("good", "2025-08-15", "10:03:00", &["u1"]),
            ],
        );
        assert_eq!(result.imminent.len(), 1);
        assert_eq!(result.imminent[0].meeting.id, "good");
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.anomalies[0].meeting_id, "bad");
        assert!(result.anomalies[0].reason.contains("not-a-date"));
    }

    #[test]
    fn accepts_time_without_seconds() {
        assert_eq!(
            parse_start_instant("2025-08-15", "10:03").unwrap(),
            instant("2025-08-15 10:03:00")
        );
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(parse_start_instant("2025-08-15", "quarter past").is_err());
    }
}
