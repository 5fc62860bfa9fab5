//! Resolves the configured timezone name into today's local date.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone, timezones};

use crate::Error;

/// The calendar date right now in `canonical_timezone`, e.g. "America/Sao_Paulo".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the name is not a known canonical timezone.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let timezone = timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    let now = OffsetDateTime::now_utc();
    let offset = timezone.get_offset_utc(&now).to_utc();

    Ok(now.to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::Error;

    use super::local_today;

    #[test]
    fn utc_today_matches_system_clock() {
        let before = OffsetDateTime::now_utc().date();
        let today = local_today("Etc/UTC").unwrap();
        let after = OffsetDateTime::now_utc().date();

        assert!(today == before || today == after);
    }

    #[test]
    fn today_is_within_a_day_of_utc() {
        let utc_today = OffsetDateTime::now_utc().date();

        for timezone in ["America/Sao_Paulo", "Pacific/Auckland", "Pacific/Honolulu"] {
            let today = local_today(timezone).unwrap();
            let days_apart = (today - utc_today).whole_days().abs();
            assert!(days_apart <= 1, "{timezone} is {days_apart} days from UTC");
        }
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            local_today("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}
