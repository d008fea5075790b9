//! Request field checks shared by the services.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{RefId, RentType},
};

pub const MISSING_FIELDS: &str = "Missing required fields";

/// A string field counts as missing when absent or empty.
pub fn required(field: Option<String>) -> AppResult<String> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::bad_request(MISSING_FIELDS))
}

pub fn rent_type(raw: &str) -> AppResult<RentType> {
    raw.parse()
        .map_err(|_| AppError::bad_request("Invalid rent type"))
}

pub fn ref_id(raw: &str, field: &str) -> AppResult<RefId> {
    RefId::parse(raw).ok_or_else(|| AppError::bad_request(format!("Invalid {field}")))
}

/// A JSON number strictly greater than zero.
pub fn positive_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| *number > 0.0 && number.is_finite())
}

/// A JSON integer greater than zero. Whole floats such as `2.0` count.
pub fn positive_integer(value: &Value) -> Option<i64> {
    let number = match value.as_i64() {
        Some(number) => number,
        None => {
            let float = value.as_f64()?;
            if float.fract() != 0.0 || float >= i64::MAX as f64 {
                return None;
            }
            float as i64
        }
    };
    (number > 0).then_some(number)
}

/// A JSON number greater than or equal to zero.
pub fn non_negative_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| *number >= 0.0 && number.is_finite())
}

pub fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Parses an optional timestamp. Empty strings count as absent.
pub fn timestamp(raw: Option<&str>, field: &str) -> AppResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(parsed.and_utc()));
    }
    if let Some(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(parsed.and_utc()));
    }

    Err(AppError::bad_request(format!("Invalid date for {field}")))
}
