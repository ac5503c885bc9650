//! Reminder-settings validators.

use chrono::NaiveTime;
use validator::ValidationError;

use crate::constants::ERR_INVALID_TIME;

/// Parse a `HH:MM` 24h time of day.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Custom validator for the scheduler time of day.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    match parse_time_of_day(value) {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("invalid_time");
            error.message = Some(ERR_INVALID_TIME.into());
            Err(error)
        }
    }
}
