use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Wait substituted when either clock time is unparseable. Legacy behavior
/// of the upstream data pipeline, kept as defined output.
pub const FALLBACK_WAIT_HOURS: f64 = 1.0;

/// Wait in hours between arriving at a junction and boarding the next
/// segment, both clock-of-day times anchored on the travel date.
///
/// A departure earlier than the arrival is taken to be on the next day, so
/// a 22:00 arrival connecting to a 02:00 departure waits 4 hours. The clock
/// never reasons beyond that single rollover.
pub fn wait_hours(
    arrival: Option<NaiveTime>,
    departure: Option<NaiveTime>,
    travel_date: NaiveDate,
) -> f64 {
    let (Some(arrival), Some(departure)) = (arrival, departure) else {
        return FALLBACK_WAIT_HOURS;
    };

    let arrival_at = NaiveDateTime::new(travel_date, arrival);
    let mut departure_at = NaiveDateTime::new(travel_date, departure);

    if departure_at < arrival_at {
        departure_at = match departure_at.checked_add_days(Days::new(1)) {
            Some(rolled) => rolled,
            None => return FALLBACK_WAIT_HOURS,
        };
    }

    let wait = (departure_at - arrival_at).num_seconds() as f64 / 3600.0;
    wait.max(0.0)
}
