//! Settings as exchanged over the HTTP API.
//!
//! The logo crosses this boundary as base64 text and is stored as raw bytes.
//! `SettingPayload` only carries the text form and `Setting` only the bytes,
//! so the two can never disagree.

use crate::db::filter::SettingFilter;
use crate::db::models::Setting;
use crate::db::sqlite::SettingsStorage;
use crate::error::CoreError;
use crate::service::codec::{base64_to_bytes, bytes_to_base64};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingPayload {
    #[serde(rename = "CompanyID", default)]
    pub company_id: i64,
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    /// Base64 of the logo bytes; empty when there is no logo.
    #[serde(rename = "CompanyLogo", default)]
    pub company_logo: String,
    #[serde(rename = "CompanyAddress", default)]
    pub company_address: String,
    #[serde(rename = "TimeZone")]
    pub time_zone: String,
    #[serde(rename = "ThemeID", default)]
    pub theme_id: i64,
}

impl From<Setting> for SettingPayload {
    fn from(s: Setting) -> Self {
        Self {
            company_logo: bytes_to_base64(&s.company_logo),
            company_id: s.company_id,
            company_name: s.company_name,
            company_address: s.company_address,
            time_zone: s.time_zone,
            theme_id: s.theme_id,
        }
    }
}

impl TryFrom<SettingPayload> for Setting {
    type Error = CoreError;

    fn try_from(p: SettingPayload) -> Result<Self, Self::Error> {
        Ok(Setting {
            company_logo: base64_to_bytes(&p.company_logo)?,
            company_id: p.company_id,
            company_name: p.company_name,
            company_address: p.company_address,
            time_zone: p.time_zone,
            theme_id: p.theme_id,
        })
    }
}

#[derive(Clone)]
pub struct SettingsApi {
    storage: SettingsStorage,
}

impl SettingsApi {
    pub fn new(storage: SettingsStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &SettingsStorage {
        &self.storage
    }

    pub async fn list(&self, filter: &SettingFilter) -> Result<Vec<SettingPayload>, CoreError> {
        let rows = self.storage.list(filter).await?;
        Ok(rows.into_iter().map(SettingPayload::from).collect())
    }

    /// Decode and insert. Malformed base64 aborts before the store is touched.
    pub async fn create(&self, payload: SettingPayload) -> Result<i64, CoreError> {
        let setting = Setting::try_from(payload)?;
        self.storage.create(&setting).await
    }

    pub async fn read_for_api(&self, company_id: i64) -> Result<SettingPayload, CoreError> {
        let setting = self.storage.read(company_id).await?;
        Ok(setting.into())
    }

    /// Decode and update. Malformed base64 aborts before the store is touched.
    pub async fn update_for_api(&self, payload: SettingPayload) -> Result<(), CoreError> {
        let setting = Setting::try_from(payload)?;
        self.storage.update(&setting).await
    }

    pub async fn delete(&self, company_id: i64) -> Result<(), CoreError> {
        self.storage.delete(company_id).await
    }
}
