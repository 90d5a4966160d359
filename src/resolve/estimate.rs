//! Time estimate aggregation and ROI payoff.

use std::sync::LazyLock;

use regex::Regex;

use crate::duration::{parse_time_duration, TimeSpan};
use crate::error::ParseError;
use crate::models::TimeRoi;

/// Inline annotation at the end of a task: `"mow lawn (45m)"`, `"paint (1.5h)"`.
/// Only hours may be fractional.
static RE_TASK_ESTIMATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+m|\d+(?:\.\d+)?h)\)$").expect("valid task estimate regex")
});

/// Minutes annotated on a single task, if any.
pub fn task_minutes(task: &str) -> Result<Option<u32>, ParseError> {
    match RE_TASK_ESTIMATE.captures(task.trim_end()) {
        Some(caps) => parse_time_duration(&caps[1]).map(Some),
        None => Ok(None),
    }
}

/// Sums task annotations, falling back to the explicit estimate.
///
/// Unannotated tasks are excluded from the sum. The result is always
/// re-rendered in canonical form.
pub fn aggregate_time_estimate(
    tasks: &[String],
    explicit: Option<&TimeSpan>,
) -> Result<Option<TimeSpan>, ParseError> {
    let mut annotated = false;
    let mut total: u32 = 0;
    for task in tasks {
        if let Some(minutes) = task_minutes(task)? {
            annotated = true;
            total = total.saturating_add(minutes);
        }
    }

    if annotated {
        return Ok(Some(TimeSpan::from_minutes(total)));
    }
    Ok(explicit.map(TimeSpan::normalized))
}

/// Annualized minutes saved divided by the estimate; 0 when either is missing.
pub fn time_roi_payoff(roi: &TimeRoi, estimate: Option<&TimeSpan>) -> f64 {
    let Some(yearly) = roi.yearly_minutes() else {
        return 0.0;
    };
    match estimate.map(TimeSpan::minutes) {
        Some(minutes) if minutes > 0 => yearly as f64 / f64::from(minutes),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn span(s: &str) -> TimeSpan {
        TimeSpan::parse(s).unwrap()
    }

    #[test]
    fn test_task_minutes() {
        assert_eq!(task_minutes("mow (45m)"), Ok(Some(45)));
        assert_eq!(task_minutes("paint (1.5h)"), Ok(Some(90)));
        assert_eq!(task_minutes("paint (2h) "), Ok(Some(120)));
        assert_eq!(task_minutes("call (about 5m) later"), Ok(None));
        assert_eq!(task_minutes("(30m) at the start"), Ok(None));
        assert_eq!(task_minutes("plain"), Ok(None));
    }

    #[test]
    fn test_fractional_minutes_not_an_estimate() {
        assert_eq!(task_minutes("call (1.5m)"), Ok(None));
        let t = tasks(&["call (1.5m)", "write (20m)"]);
        let est = aggregate_time_estimate(&t, None).unwrap();
        assert_eq!(est, Some(TimeSpan::from_minutes(20)));
    }

    #[test]
    fn test_sum_skips_unannotated() {
        let t = tasks(&["a (30m)", "b", "c (1h)"]);
        let est = aggregate_time_estimate(&t, Some(&span("10h"))).unwrap();
        assert_eq!(est, Some(TimeSpan::from_minutes(90)));
        assert_eq!(est.unwrap().as_str(), "1h 30m");
    }

    #[test]
    fn test_falls_back_to_explicit() {
        let t = tasks(&["a", "b"]);
        let est = aggregate_time_estimate(&t, Some(&span("60m"))).unwrap();
        assert_eq!(est.unwrap().as_str(), "1h");
        assert_eq!(aggregate_time_estimate(&[], None).unwrap(), None);
    }

    #[test]
    fn test_payoff() {
        let daily = TimeRoi {
            daily: Some(span("1m")),
            ..Default::default()
        };
        assert_eq!(time_roi_payoff(&daily, Some(&span("365m"))), 1.0);

        let weekly = TimeRoi {
            weekly: Some(span("30m")),
            ..Default::default()
        };
        assert_eq!(time_roi_payoff(&weekly, Some(&span("1h"))), 26.0);

        let yearly = TimeRoi {
            yearly: Some(span("10h")),
            ..Default::default()
        };
        assert_eq!(time_roi_payoff(&yearly, Some(&span("2h"))), 5.0);
    }

    #[test]
    fn test_payoff_defaults_zero() {
        let daily = TimeRoi {
            daily: Some(span("5m")),
            ..Default::default()
        };
        assert_eq!(time_roi_payoff(&daily, None), 0.0);
        assert_eq!(time_roi_payoff(&daily, Some(&span("0m"))), 0.0);
        assert_eq!(time_roi_payoff(&TimeRoi::default(), Some(&span("1h"))), 0.0);
    }
}
