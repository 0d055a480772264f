use crate::api::SettingsApi;
use crate::db::sqlite::{SettingsStorage, SqlitePool};
use crate::handlers::settings::{
    company_clock, create_setting, delete_setting, get_setting, list_settings, update_setting,
};
use axum::{Router, routing::get};

#[derive(Clone)]
pub struct CoreState {
    pub settings: SettingsApi,
}

impl CoreState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            settings: SettingsApi::new(SettingsStorage::new(pool)),
        }
    }
}

pub fn core_router(state: CoreState) -> Router {
    Router::new()
        .route("/settings", get(list_settings).post(create_setting))
        .route(
            "/settings/{id}",
            get(get_setting).put(update_setting).delete(delete_setting),
        )
        .route("/clock", get(company_clock))
        .with_state(state)
}
