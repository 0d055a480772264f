pub mod settings_api;

pub use settings_api::{SettingPayload, SettingsApi};
