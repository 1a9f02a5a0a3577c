use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use dialclock_proto::config::TimeFormat;
use icu::{
    calendar::{Date, Gregorian},
    datetime::{TypedDateFormatter, options::length},
    locid::{Locale, locale},
};
use log::{debug, warn};

fn fallback_locale() -> Locale {
    locale!("en-US")
}

/// Formats a wall-clock reading for the digital face.
///
/// 12-hour output maps hour 0 to 12, leaves the hour unpadded and appends an
/// `AM`/`PM` suffix. 24-hour output zero-pads every component to width 2.
///
/// # Examples
///
/// ```
/// use dialclock_core::clock::format_digital;
/// use dialclock_proto::config::TimeFormat;
///
/// assert_eq!(format_digital(13, 5, 9, TimeFormat::Hour24), "13:05:09");
/// assert_eq!(format_digital(13, 5, 9, TimeFormat::Hour12), "1:05:09 PM");
/// ```
pub fn format_digital(hours: u32, minutes: u32, seconds: u32, format: TimeFormat) -> String {
    match format {
        TimeFormat::Hour24 => format!("{hours:02}:{minutes:02}:{seconds:02}"),
        TimeFormat::Hour12 => {
            let period = if hours >= 12 { "PM" } else { "AM" };
            let display_hours = match hours % 12 {
                0 => 12,
                h => h,
            };

            format!("{display_hours}:{minutes:02}:{seconds:02} {period}")
        }
    }
}

/// Formats the time component of `time` for the digital face.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>, format: TimeFormat) -> String {
    format_digital(time.hour(), time.minute(), time.second(), format)
}

/// Full-length date (weekday, day, month and year) in the word order and
/// punctuation of one locale.
pub struct LongDateFormatter {
    locale:    Locale,
    formatter: Option<TypedDateFormatter<Gregorian>>,
}

impl LongDateFormatter {
    pub fn new(locale: &Locale) -> Self {
        let formatter = TypedDateFormatter::try_new_with_length(&locale.into(), length::Date::Full)
            .map_err(|err| warn!("No long date format for '{locale}': {err}"))
            .ok();

        Self {
            locale: locale.clone(),
            formatter,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn format<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> String {
        let date = Date::try_new_gregorian_date(time.year(), time.month() as u8, time.day() as u8);

        match (&self.formatter, date) {
            (Some(formatter), Ok(date)) => formatter.format_to_string(&date),
            _ => format!("{:04}-{:02}-{:02}", time.year(), time.month(), time.day()),
        }
    }
}

impl fmt::Debug for LongDateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongDateFormatter")
            .field("locale", &self.locale)
            .field("loaded", &self.formatter.is_some())
            .finish()
    }
}

/// Resolves the configured locale name, or the host locale when none is
/// configured. Falls back to `en-US` when neither can be parsed.
pub fn resolve_locale(name: Option<&str>) -> Locale {
    match name {
        Some(name) => parse_locale(name).unwrap_or_else(|| {
            let fallback = fallback_locale();
            warn!("Unknown locale '{name}', falling back to {fallback}");
            fallback
        }),
        None => host_locale(sys_locale::get_locale()),
    }
}

fn host_locale(name: Option<String>) -> Locale {
    let locale = name.as_deref().and_then(parse_locale);
    debug!("Host locale {name:?} resolved to {locale:?}");
    locale.unwrap_or_else(fallback_locale)
}

/// Parses POSIX (`fr_FR.UTF-8@euro`) and BCP 47 (`fr-FR`) names. The `C` and
/// `POSIX` pseudo locales carry no language and yield `None`.
fn parse_locale(name: &str) -> Option<Locale> {
    let name = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");

    if name.is_empty() || name.eq_ignore_ascii_case("c") || name.eq_ignore_ascii_case("posix") {
        return None;
    }

    name.parse().ok()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    #[test]
    fn formats_24_hour_with_padding() {
        assert_eq!(format_digital(13, 5, 9, TimeFormat::Hour24), "13:05:09");
        assert_eq!(format_digital(0, 0, 0, TimeFormat::Hour24), "00:00:00");
        assert_eq!(format_digital(23, 59, 59, TimeFormat::Hour24), "23:59:59");
    }

    #[test]
    fn formats_12_hour_with_period() {
        assert_eq!(format_digital(13, 5, 9, TimeFormat::Hour12), "1:05:09 PM");
        assert_eq!(format_digital(0, 0, 0, TimeFormat::Hour12), "12:00:00 AM");
        assert_eq!(format_digital(12, 30, 0, TimeFormat::Hour12), "12:30:00 PM");
        assert_eq!(format_digital(11, 59, 59, TimeFormat::Hour12), "11:59:59 AM");
    }

    fn format_date(time: &DateTime<FixedOffset>, locale: &Locale) -> String {
        LongDateFormatter::new(locale).format(time)
    }

    fn date(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(year, month, day, 8, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn formats_long_date() {
        let time = date(2026, 10, 19);

        assert_eq!(format_date(&time, &locale!("en-US")), "Monday, October 19, 2026");
        assert_eq!(format_time(&time, TimeFormat::Hour24), "08:00:00");
    }

    #[test]
    fn long_date_follows_locale_word_order() {
        let time = date(2026, 10, 19);

        assert_eq!(format_date(&time, &locale!("fr-FR")), "lundi 19 octobre 2026");
        assert_eq!(format_date(&time, &locale!("de-DE")), "Montag, 19. Oktober 2026");
    }

    #[test]
    fn formatter_is_reusable() {
        let formatter = LongDateFormatter::new(&locale!("de-DE"));

        assert_eq!(formatter.format(&date(2026, 1, 1)), "Donnerstag, 1. Januar 2026");
        assert_eq!(formatter.format(&date(2026, 10, 19)), "Montag, 19. Oktober 2026");
        assert_eq!(formatter.locale(), &locale!("de-DE"));
    }

    #[test]
    fn configured_locale_names_resolve() {
        assert_eq!(resolve_locale(Some("de_DE")), locale!("de-DE"));
        assert_eq!(resolve_locale(Some("fr-FR")), locale!("fr-FR"));
        assert_eq!(resolve_locale(Some("pt_BR.UTF-8")), locale!("pt-BR"));
        assert_eq!(resolve_locale(Some("not a locale")), fallback_locale());
    }

    #[test]
    fn host_locale_is_used_when_unconfigured() {
        assert_eq!(host_locale(Some("fr_FR.UTF-8".to_owned())), locale!("fr-FR"));
        assert_eq!(host_locale(Some("de-DE".to_owned())), locale!("de-DE"));
        assert_eq!(host_locale(Some("C".to_owned())), fallback_locale());
        assert_eq!(host_locale(Some("POSIX".to_owned())), fallback_locale());
        assert_eq!(host_locale(None), fallback_locale());
    }
}
