//! Time-zone resolution for company settings.

use crate::db::sqlite::SettingsStorage;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Company whose settings drive the application clock.
pub const PRIMARY_COMPANY_ID: i64 = 1;

/// Resolve an IANA zone name and return the current time in it.
pub fn resolve(name: &str) -> Result<DateTime<Tz>, CoreError> {
    if name.is_empty() {
        return Err(CoreError::InvalidTimeZone(name.to_string()));
    }
    let tz: Tz = name
        .parse()
        .map_err(|_| CoreError::InvalidTimeZone(name.to_string()))?;
    Ok(Utc::now().with_timezone(&tz))
}

/// Current local time of a company, per its stored time zone.
pub async fn company_now(
    storage: &SettingsStorage,
    company_id: i64,
) -> Result<DateTime<Tz>, CoreError> {
    let zone = storage.company_time_zone(company_id).await?;
    resolve(&zone)
}
