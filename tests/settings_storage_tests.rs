mod common;

use common::TempDb;
use company_core::CoreError;
use company_core::api::{SettingPayload, SettingsApi};
use company_core::db::{Comparison, Setting, SettingColumn, SettingFilter, SettingsStorage};
use company_core::service::timezone::{PRIMARY_COMPANY_ID, company_now};

fn acme() -> Setting {
    Setting {
        company_name: "Acme".to_string(),
        time_zone: "UTC".to_string(),
        theme_id: 1,
        ..Setting::default()
    }
}

#[tokio::test]
async fn create_then_read_round_trips() {
    let db = TempDb::installed("roundtrip").await;
    let storage = SettingsStorage::new(db.pool.clone());

    let original = Setting {
        company_name: "Globex".to_string(),
        company_logo: vec![0x89, b'P', b'N', b'G', 0, 1, 2],
        company_address: "42 Industrial Way".to_string(),
        time_zone: "Europe/Berlin".to_string(),
        theme_id: 3,
        ..Setting::default()
    };
    let id = storage.create(&original).await.unwrap();
    assert_ne!(id, 0);

    let read = storage.read(id).await.unwrap();
    assert_eq!(
        read,
        Setting {
            company_id: id,
            ..original
        }
    );

    db.close().await;
}

#[tokio::test]
async fn empty_logo_round_trips_through_create_and_api() {
    let db = TempDb::installed("empty-logo").await;
    let api = SettingsApi::new(SettingsStorage::new(db.pool.clone()));

    let created = Setting {
        company_logo: vec![],
        ..acme()
    };
    let id = api.storage().create(&created).await.unwrap();
    let read = api.storage().read(id).await.unwrap();
    assert_eq!(
        read,
        Setting {
            company_id: id,
            ..created
        }
    );

    let payload = api.read_for_api(id).await.unwrap();
    assert_eq!(payload.company_logo, "");
    api.update_for_api(payload).await.unwrap();
    assert!(api.storage().read(id).await.unwrap().company_logo.is_empty());

    db.close().await;
}

#[tokio::test]
async fn store_assigns_identity_in_sequence() {
    let db = TempDb::installed("sequence").await;
    let storage = SettingsStorage::new(db.pool.clone());

    // The install script seeds company 1; fill 2..=6 so Acme lands on 7.
    for n in 2..=6 {
        let filler = Setting {
            company_name: format!("Filler {n}"),
            ..acme()
        };
        assert_eq!(storage.create(&filler).await.unwrap(), n);
    }

    let id = storage.create(&acme()).await.unwrap();
    assert_eq!(id, 7);
    let read = storage.read(7).await.unwrap();
    assert_eq!(
        read,
        Setting {
            company_id: 7,
            company_name: "Acme".to_string(),
            company_logo: Vec::new(),
            company_address: String::new(),
            time_zone: "UTC".to_string(),
            theme_id: 1,
        }
    );

    storage.delete(7).await.unwrap();
    assert!(matches!(
        storage.read(7).await,
        Err(CoreError::NotFound { id: 7, .. })
    ));

    db.close().await;
}

#[tokio::test]
async fn zero_identity_is_rejected_without_store_access() {
    // No schema at all: any store access would fail with a database error.
    let db = TempDb::empty("zero-id").await;
    let storage = SettingsStorage::new(db.pool.clone());

    assert!(matches!(
        storage.read(0).await,
        Err(CoreError::IdentityRequired("CompanyID"))
    ));
    assert!(matches!(
        storage.delete(0).await,
        Err(CoreError::IdentityRequired("CompanyID"))
    ));

    db.close().await;
}

#[tokio::test]
async fn update_with_bad_time_zone_leaves_row_untouched() {
    let db = TempDb::installed("bad-tz").await;
    let storage = SettingsStorage::new(db.pool.clone());

    let id = storage.create(&acme()).await.unwrap();
    let before = storage.read(id).await.unwrap();

    for zone in ["", "Atlantis/Capital"] {
        let changed = Setting {
            company_name: "Renamed".to_string(),
            time_zone: zone.to_string(),
            ..before.clone()
        };
        assert!(matches!(
            storage.update(&changed).await,
            Err(CoreError::InvalidTimeZone(_))
        ));
    }

    assert_eq!(storage.read(id).await.unwrap(), before);
    db.close().await;
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let db = TempDb::installed("update").await;
    let storage = SettingsStorage::new(db.pool.clone());

    let id = storage
        .create(&Setting {
            company_logo: vec![9, 9, 9],
            company_address: "Old Road".to_string(),
            ..acme()
        })
        .await
        .unwrap();

    let next = Setting {
        company_id: id,
        company_name: "Acme Holdings".to_string(),
        company_logo: Vec::new(),
        company_address: String::new(),
        time_zone: "America/New_York".to_string(),
        theme_id: 4,
    };
    storage.update(&next).await.unwrap();
    assert_eq!(storage.read(id).await.unwrap(), next);

    db.close().await;
}

#[tokio::test]
async fn update_and_delete_of_missing_row_report_not_found() {
    let db = TempDb::installed("missing").await;
    let storage = SettingsStorage::new(db.pool.clone());

    let ghost = Setting {
        company_id: 999,
        ..acme()
    };
    assert!(matches!(
        storage.update(&ghost).await,
        Err(CoreError::NotFound { id: 999, .. })
    ));
    assert!(matches!(
        storage.delete(999).await,
        Err(CoreError::NotFound { id: 999, .. })
    ));

    db.close().await;
}

#[tokio::test]
async fn create_propagates_store_errors() {
    let db = TempDb::empty("no-table").await;
    let storage = SettingsStorage::new(db.pool.clone());

    assert!(matches!(
        storage.create(&acme()).await,
        Err(CoreError::Database(_))
    ));

    db.close().await;
}

#[tokio::test]
async fn list_applies_structured_filter() {
    let db = TempDb::installed("list").await;
    let storage = SettingsStorage::new(db.pool.clone());

    storage.create(&acme()).await.unwrap();
    storage
        .create(&Setting {
            company_name: "Initech".to_string(),
            theme_id: 2,
            ..acme()
        })
        .await
        .unwrap();

    let all = storage.list(&SettingFilter::new()).await.unwrap();
    let names: Vec<_> = all.iter().map(|s| s.company_name.as_str()).collect();
    assert_eq!(names, ["core-test", "Acme", "Initech"]);

    let filtered = storage
        .list(&SettingFilter::new().and(SettingColumn::ThemeId, Comparison::Eq, 2_i64))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].company_name, "Initech");

    let injected = storage
        .list(&SettingFilter::new().and(
            SettingColumn::CompanyName,
            Comparison::Eq,
            "x' OR '1'='1",
        ))
        .await
        .unwrap();
    assert!(injected.is_empty());

    let newest = storage
        .list(
            &SettingFilter::new()
                .order_by(SettingColumn::CompanyId, true)
                .limit(1),
        )
        .await
        .unwrap();
    assert_eq!(newest[0].company_name, "Initech");

    db.close().await;
}

#[tokio::test]
async fn api_round_trip_preserves_logo_bytes() {
    let db = TempDb::installed("api").await;
    let api = SettingsApi::new(SettingsStorage::new(db.pool.clone()));

    let logo: Vec<u8> = (0u8..=255).collect();
    let id = api
        .storage()
        .create(&Setting {
            company_logo: logo.clone(),
            ..acme()
        })
        .await
        .unwrap();

    let payload = api.read_for_api(id).await.unwrap();
    assert!(!payload.company_logo.is_empty());
    api.update_for_api(payload.clone()).await.unwrap();

    assert_eq!(api.storage().read(id).await.unwrap().company_logo, logo);
    assert_eq!(api.read_for_api(id).await.unwrap(), payload);

    db.close().await;
}

#[tokio::test]
async fn api_rejects_malformed_logo_before_writing() {
    let db = TempDb::installed("api-decode").await;
    let api = SettingsApi::new(SettingsStorage::new(db.pool.clone()));

    let before = api.read_for_api(PRIMARY_COMPANY_ID).await.unwrap();
    let bad = SettingPayload {
        company_name: "Changed".to_string(),
        company_logo: "***not base64***".to_string(),
        ..before.clone()
    };
    assert!(matches!(
        api.update_for_api(bad).await,
        Err(CoreError::Decode(_))
    ));
    assert_eq!(api.read_for_api(PRIMARY_COMPANY_ID).await.unwrap(), before);

    assert!(matches!(
        api.read_for_api(0).await,
        Err(CoreError::IdentityRequired(_))
    ));

    db.close().await;
}

#[tokio::test]
async fn company_clock_follows_stored_zone() {
    let db = TempDb::installed("clock").await;
    let storage = SettingsStorage::new(db.pool.clone());

    let mut primary = storage.read(PRIMARY_COMPANY_ID).await.unwrap();
    assert_eq!(
        company_now(&storage, PRIMARY_COMPANY_ID).await.unwrap().timezone(),
        chrono_tz::Tz::UTC
    );

    primary.time_zone = "Asia/Tokyo".to_string();
    storage.update(&primary).await.unwrap();
    assert_eq!(
        storage.company_time_zone(PRIMARY_COMPANY_ID).await.unwrap(),
        "Asia/Tokyo"
    );
    assert_eq!(
        company_now(&storage, PRIMARY_COMPANY_ID).await.unwrap().timezone(),
        chrono_tz::Tz::Asia__Tokyo
    );

    db.close().await;
}
