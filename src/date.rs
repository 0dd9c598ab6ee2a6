// Serde helpers for calendar dates on the wire

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp, or a date-time without offset.
/// Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// `Option<NaiveDate>` as an optional `YYYY-MM-DD` string. `null` and an
/// empty string both read as `None`.
pub mod optional {
    use super::{DATE_FORMAT, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        parse_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, with = "optional", skip_serializing_if = "Option::is_none")]
        date: Option<NaiveDate>,
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_date("1990-01-01"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("1990-01-01T00:00:00"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("1990-01-01T08:30:00.123"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("1990-01-01T23:00:00+02:00"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("1990-01-01T10:00:00Z"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("01/01/1990"), None);
        assert_eq!(parse_date("1990-02-30"), None);
    }

    #[test]
    fn test_deserialize_absent_and_empty() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(holder.date, None);

        let holder: Holder = serde_json::from_str(r#"{"date": null}"#).unwrap();
        assert_eq!(holder.date, None);

        let holder: Holder = serde_json::from_str(r#"{"date": ""}"#).unwrap();
        assert_eq!(holder.date, None);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Holder>(r#"{"date": "yesterday"}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"date": 19900101}"#).is_err());
    }

    #[test]
    fn test_serialize_as_date() {
        let holder: Holder = serde_json::from_str(r#"{"date": "1990-01-01T12:00:00"}"#).unwrap();
        assert_eq!(serde_json::to_string(&holder).unwrap(), r#"{"date":"1990-01-01"}"#);
        assert_eq!(serde_json::to_string(&Holder { date: None }).unwrap(), "{}");
    }
}
