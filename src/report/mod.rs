//! Weekly roundup and draft report building.
//!
//! Everything except [`service`] is pure: functions take domain types from
//! [`crate::espn`] and return serializable rows for templates, JSON and the
//! LLM prompt.

pub mod awards;
pub mod draft;
pub mod incentives;
pub mod performances;
pub mod prompt;
pub mod scoreboard;
pub mod service;
pub mod standings;

pub use service::{ReportService, WeeklyReport};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format points the way they read in prose: shortest form, always with a
/// decimal part (`112.0`, `31.4`, `3.42`).
pub fn fmt_points(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round1(31.449), 31.4);
        assert_eq!(round1(31.45), 31.5);
        assert_eq!(round2(3.41999), 3.42);
    }

    #[test]
    fn test_fmt_points() {
        assert_eq!(fmt_points(112.0), "112.0");
        assert_eq!(fmt_points(31.4), "31.4");
        assert_eq!(fmt_points(3.42), "3.42");
        assert_eq!(fmt_points(0.0), "0.0");
    }
}
