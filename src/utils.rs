use chrono::NaiveTime;

/// Parses a `HH:MM:SS` clock-of-day string. Returns `None` for anything the
/// upstream data ships malformed (empty, truncated, out-of-range fields).
pub fn parse_hms(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").ok()
}

pub fn format_hms(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Formats a duration given in minutes as `Xh Ym`.
pub fn format_duration(minutes: f64) -> String {
    let h = (minutes / 60.0).floor() as i64;
    let m = (minutes % 60.0).floor() as i64;
    format!("{h}h {m}m")
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub fn create_time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
