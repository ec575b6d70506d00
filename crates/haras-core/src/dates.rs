// Date display and normalization (pt-BR).
//
// The backend answers with ISO dates (`2024-03-05`, `2024-03-05T10:00:00`);
// forms are typed as `05/03/2024 10:00`. Both shapes are accepted
// everywhere. Times are taken as wall-clock values, no zone conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn parse_br(s: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = match s.split_once(' ') {
        Some((d, t)) => (d, Some(t.trim())),
        None => (s, None),
    };
    let date = NaiveDate::parse_from_str(date_part, "%d/%m/%Y").ok()?;
    let time = match time_part {
        Some(t) if !t.is_empty() => parse_time(t)?,
        _ => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

/// Parse either accepted shape into a wall-clock timestamp.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.contains('/') {
        parse_br(s)
    } else if s.contains('-') {
        parse_iso(s)
    } else {
        None
    }
}

/// `DD/MM/YYYY`; `"N/A"` for empty input; unparseable input unchanged.
pub fn format_date(s: &str) -> String {
    if s.is_empty() {
        return "N/A".into();
    }
    parse(s).map_or_else(|| s.to_owned(), |dt| dt.format("%d/%m/%Y").to_string())
}

/// `DD/MM/YYYY HH:MM:SS`; `"N/A"` for empty input; unparseable input
/// unchanged.
pub fn format_date_time(s: &str) -> String {
    if s.is_empty() {
        return "N/A".into();
    }
    parse(s).map_or_else(
        || s.to_owned(),
        |dt| dt.format("%d/%m/%Y %H:%M:%S").to_string(),
    )
}

/// `YYYY-MM-DDTHH:MM` as expected by datetime inputs; `""` when the value
/// cannot be read.
pub fn format_date_for_input(s: &str) -> String {
    parse(s).map_or_else(String::new, |dt| dt.format("%Y-%m-%dT%H:%M").to_string())
}

/// Rewrite `DD/MM/YYYY[ HH:MM[:SS]]` as `YYYY-MM-DDTHH:MM:SS`.
///
/// ISO input is returned as is and anything else unchanged; `None` only
/// for empty input. Day and month are zero-padded but not validated.
pub fn convert_to_iso(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    if !s.contains('/') {
        return Some(s.to_owned());
    }

    let (date_part, time_part) = match s.split_once(' ') {
        Some((d, t)) => (d, Some(t)),
        None => (s, None),
    };
    let mut parts = date_part.split('/');
    let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
        return Some(s.to_owned());
    };

    let mut iso = format!("{year}-{month:0>2}-{day:0>2}");
    match time_part.filter(|t| !t.is_empty()) {
        Some(time) => {
            iso.push('T');
            iso.push_str(time);
            if time.split(':').count() == 2 {
                iso.push_str(":00");
            }
        }
        None => iso.push_str("T00:00:00"),
    }
    Some(iso)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_shapes_format_to_the_same_date() {
        assert_eq!(format_date("2024-03-05"), "05/03/2024");
        assert_eq!(format_date("05/03/2024"), "05/03/2024");
        assert_eq!(format_date("2024-03-05T14:30:00"), "05/03/2024");
        assert_eq!(format_date("5/3/2024 08:15"), "05/03/2024");
    }

    #[test]
    fn invalid_dates_are_returned_unchanged() {
        assert_eq!(format_date("amanhã"), "amanhã");
        assert_eq!(format_date("31/02/2024"), "31/02/2024");
        assert_eq!(format_date_time("2024-13-01"), "2024-13-01");
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date_time(""), "N/A");
    }

    #[test]
    fn date_time_display() {
        assert_eq!(
            format_date_time("2024-03-05T14:30:15.250"),
            "05/03/2024 14:30:15"
        );
        assert_eq!(format_date_time("05/03/2024 14:30"), "05/03/2024 14:30:00");
        assert_eq!(format_date_time("2024-03-05"), "05/03/2024 00:00:00");
        assert_eq!(
            format_date_time("2024-03-05T14:30:00-03:00"),
            "05/03/2024 14:30:00"
        );
    }

    #[test]
    fn input_format() {
        assert_eq!(format_date_for_input("05/03/2024 09:05"), "2024-03-05T09:05");
        assert_eq!(format_date_for_input("2024-03-05"), "2024-03-05T00:00");
        assert_eq!(format_date_for_input("ontem"), "");
        assert_eq!(format_date_for_input(""), "");
    }

    #[test]
    fn iso_conversion() {
        assert_eq!(convert_to_iso(""), None);
        assert_eq!(
            convert_to_iso("2024-03-05T10:00:00").as_deref(),
            Some("2024-03-05T10:00:00")
        );
        assert_eq!(
            convert_to_iso("05/03/2024").as_deref(),
            Some("2024-03-05T00:00:00")
        );
        assert_eq!(
            convert_to_iso("5/3/2024 14:30").as_deref(),
            Some("2024-03-05T14:30:00")
        );
        assert_eq!(
            convert_to_iso("05/03/2024 14:30:45").as_deref(),
            Some("2024-03-05T14:30:45")
        );
        assert_eq!(convert_to_iso("hoje").as_deref(), Some("hoje"));
    }
}
