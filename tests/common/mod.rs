#![allow(dead_code)]

use company_core::config::Config;
use company_core::db::{SchemaInstaller, SqlitePool, open_pool};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct TempDb {
    pub path: PathBuf,
    pub pool: SqlitePool,
}

impl TempDb {
    /// Empty database file, no schema.
    pub async fn empty(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "company-core-{}-{}-{}.sqlite",
            tag,
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let pool = open_pool(&database_url).await.expect("failed to open pool");
        Self { path, pool }
    }

    /// Database with the bundled install script applied.
    pub async fn installed(tag: &str) -> Self {
        let db = Self::empty(tag).await;
        SchemaInstaller::new(db.pool.clone())
            .install_from(&install_script(), "core-test", 1)
            .await
            .expect("install script failed");
        db
    }

    pub async fn close(self) {
        self.pool.close().await;
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn manifest_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

pub fn install_script() -> PathBuf {
    manifest_path("sql/core.sql")
}

pub fn test_config() -> Config {
    Config {
        app_name: "core-test".to_string(),
        install_script: install_script(),
        seed_photo: manifest_path("assets/default-avatar.png"),
        ..Config::default()
    }
}
