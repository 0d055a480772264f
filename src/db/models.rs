/// One settings row per company. The logo is raw image bytes; its text form
/// only exists on [`crate::api::settings_api::SettingPayload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Setting {
    /// Zero means not yet persisted.
    pub company_id: i64,
    pub company_name: String,
    /// Empty means no logo.
    pub company_logo: Vec<u8>,
    pub company_address: String,
    pub time_zone: String,
    /// Soft reference into the theme catalog; not checked here.
    pub theme_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub user_full_name: String,
    pub user_photo: Option<Vec<u8>>,
}
