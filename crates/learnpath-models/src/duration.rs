//! Video length and view-count formatting.
//!
//! The platform reports lengths as compact duration codes such as `PT1H2M3S`.
//! Any component may be absent; long videos may also carry a day component
//! (`P1DT2H`).

use std::sync::LazyLock;

use regex::Regex;

static DURATION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration pattern is valid")
});

/// Components of a decoded duration code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    /// Parse a duration code. Malformed codes decode to all zeros.
    pub fn parse(code: &str) -> Self {
        let Some(caps) = DURATION_CODE.captures(code.trim()) else {
            return Self::default();
        };

        let part = |idx: usize| -> u64 {
            caps.get(idx)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        Self {
            hours: part(1) * 24 + part(2),
            minutes: part(3),
            seconds: part(4),
        }
    }

    pub fn total_minutes(&self) -> f64 {
        self.hours as f64 * 60.0 + self.minutes as f64 + self.seconds as f64 / 60.0
    }
}

/// Decode a duration code into minutes. Malformed codes yield `0.0`.
///
/// # Examples
/// ```
/// use learnpath_models::duration::decode_duration;
/// assert_eq!(decode_duration("PT45M"), 45.0);
/// assert_eq!(decode_duration("garbage"), 0.0);
/// ```
pub fn decode_duration(code: &str) -> f64 {
    DurationParts::parse(code).total_minutes()
}

/// Format a duration code as `H:MM:SS` when hours are present, else `M:SS`.
///
/// # Examples
/// ```
/// use learnpath_models::duration::format_duration;
/// assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
/// assert_eq!(format_duration("PT4M5S"), "4:05");
/// ```
pub fn format_duration(code: &str) -> String {
    let parts = DurationParts::parse(code);
    if parts.hours > 0 {
        format!("{}:{:02}:{:02}", parts.hours, parts.minutes, parts.seconds)
    } else {
        format!("{}:{:02}", parts.minutes, parts.seconds)
    }
}

/// Human-readable view count: `2.3M views`, `1.5K views`, `999 views`.
pub fn format_view_count(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M views", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K views", views as f64 / 1_000.0)
    } else {
        format!("{} views", views)
    }
}
