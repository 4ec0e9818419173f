//! Time handling for forecast cycles and record timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WaveError, WaveResult};

/// Model run cycles (GFS Wave runs 4x daily).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelCycle {
    /// 00Z run
    Z00,
    /// 06Z run
    Z06,
    /// 12Z run
    Z12,
    /// 18Z run
    Z18,
}

impl ModelCycle {
    /// Parse the two-digit form used in request bodies and upstream paths.
    pub fn from_two_digit(s: &str) -> WaveResult<Self> {
        match s {
            "00" => Ok(ModelCycle::Z00),
            "06" => Ok(ModelCycle::Z06),
            "12" => Ok(ModelCycle::Z12),
            "18" => Ok(ModelCycle::Z18),
            _ => Err(WaveError::InvalidHour(s.to_string())),
        }
    }

    pub fn hour(&self) -> u32 {
        match self {
            ModelCycle::Z00 => 0,
            ModelCycle::Z06 => 6,
            ModelCycle::Z12 => 12,
            ModelCycle::Z18 => 18,
        }
    }

    /// "00", "06", "12" or "18"
    pub fn two_digit(&self) -> String {
        format!("{:02}", self.hour())
    }
}

/// One forecast run: a calendar date plus its cycle hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastCycle {
    pub date: NaiveDate,
    pub cycle: ModelCycle,
}

impl ForecastCycle {
    pub fn new(date: NaiveDate, cycle: ModelCycle) -> Self {
        Self { date, cycle }
    }

    /// Parse a trigger request: date as `YYYYMMDD`, hour as `00|06|12|18`.
    pub fn parse(date: &str, hour: &str) -> WaveResult<Self> {
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WaveError::InvalidDate(date.to_string(), "YYYYMMDD"));
        }
        let date = NaiveDate::parse_from_str(date, "%Y%m%d")
            .map_err(|_| WaveError::InvalidDate(date.to_string(), "YYYYMMDD"))?;
        let cycle = ModelCycle::from_two_digit(hour)?;
        Ok(Self { date, cycle })
    }

    /// `YYYYMMDD`, as used in upstream archive paths.
    pub fn date_compact(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// Cycle start as a UTC datetime.
    pub fn datetime(&self) -> DateTime<Utc> {
        let naive = self
            .date
            .and_hms_opt(self.cycle.hour(), 0, 0)
            .unwrap_or_else(|| self.date.and_time(chrono::NaiveTime::MIN));
        Utc.from_utc_datetime(&naive)
    }

    /// ISO-8601 record timestamp: `YYYY-MM-DDThh:00:00Z`.
    pub fn timestamp(&self) -> String {
        format!(
            "{}T{}:00:00Z",
            self.date.format("%Y-%m-%d"),
            self.cycle.two_digit()
        )
    }
}

/// Parse a stored record timestamp.
///
/// Accepts RFC 3339 and, assuming UTC, the bare `YYYY-MM-DDThh:mm:ss` form.
pub fn parse_timestamp(s: &str) -> WaveResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    Err(WaveError::InvalidTimestamp(s.to_string()))
}

/// Expand a `YYYY-MM-DD` query filter into the inclusive range covering that
/// whole UTC day, `00:00:00` through `23:59:59`.
pub fn day_range(date: &str) -> WaveResult<(DateTime<Utc>, DateTime<Utc>)> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| WaveError::InvalidDate(date.to_string(), "YYYY-MM-DD"))?;

    let start = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| WaveError::InvalidDate(date.to_string(), "YYYY-MM-DD"))?;
    let end = day
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| WaveError::InvalidDate(date.to_string(), "YYYY-MM-DD"))?;

    Ok((Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_cycle_timestamp() {
        let cycle = ForecastCycle::parse("20250617", "06").unwrap();
        assert_eq!(cycle.timestamp(), "2025-06-17T06:00:00Z");
        assert_eq!(cycle.date_compact(), "20250617");
        assert_eq!(cycle.datetime().hour(), 6);
    }

    #[test]
    fn test_cycle_rejects_bad_hour() {
        assert!(matches!(
            ForecastCycle::parse("20250617", "03"),
            Err(WaveError::InvalidHour(_))
        ));
        assert!(matches!(
            ForecastCycle::parse("20250617", "6"),
            Err(WaveError::InvalidHour(_))
        ));
    }

    #[test]
    fn test_cycle_rejects_bad_date() {
        assert!(ForecastCycle::parse("2025-06-17", "00").is_err());
        assert!(ForecastCycle::parse("20251317", "00").is_err());
    }

    #[test]
    fn test_timestamp_roundtrips_through_parse() {
        let cycle = ForecastCycle::parse("20240115", "18").unwrap();
        let dt = parse_timestamp(&cycle.timestamp()).unwrap();
        assert_eq!(dt, cycle.datetime());
    }

    #[test]
    fn test_day_range() {
        let (start, end) = day_range("2024-01-15").unwrap();
        assert_eq!(start.day(), 15);
        assert_eq!((start.hour(), start.minute()), (0, 0));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert!(day_range("20240115").is_err());
    }
}
