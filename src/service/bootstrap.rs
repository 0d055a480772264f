//! One-shot startup gate.
//!
//! Probes for the seed administrator; when absent, runs the install script,
//! probes again and stores the default photo on the seed user. Every failure
//! is returned to the caller, and `main` decides to exit.

use crate::config::Config;
use crate::db::models::User;
use crate::db::sqlite::{SchemaInstaller, SqlitePool, UserStorage};
use crate::error::CoreError;
use crate::service::asset::FsAssets;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unverified,
    Probing,
    Verified,
    Installing,
    Reprobing,
    Seeding,
    Ready,
}

/// Read/write access to the seed user.
pub trait SeedProbe {
    fn read_user(&self, user_id: i64) -> impl Future<Output = Result<User, CoreError>> + Send;
    fn update_user(&self, user: &User) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait SchemaInstall {
    fn install(
        &self,
        script: &Path,
        app_name: &str,
        seed_user_id: i64,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait AssetSource {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>, CoreError>> + Send;
}

impl SeedProbe for UserStorage {
    async fn read_user(&self, user_id: i64) -> Result<User, CoreError> {
        self.read(user_id).await
    }

    async fn update_user(&self, user: &User) -> Result<(), CoreError> {
        self.update(user).await
    }
}

impl SchemaInstall for SchemaInstaller {
    async fn install(
        &self,
        script: &Path,
        app_name: &str,
        seed_user_id: i64,
    ) -> Result<(), CoreError> {
        self.install_from(script, app_name, seed_user_id).await
    }
}

/// Outcome of a completed run; `path` lists every state visited in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub path: Vec<BootstrapState>,
}

impl BootstrapReport {
    pub fn installed(&self) -> bool {
        self.path.contains(&BootstrapState::Installing)
    }
}

pub struct Bootstrap<'a, P, I, A> {
    config: &'a Config,
    probe: &'a P,
    installer: &'a I,
    assets: &'a A,
    path: Vec<BootstrapState>,
}

impl<'a, P, I, A> Bootstrap<'a, P, I, A>
where
    P: SeedProbe,
    I: SchemaInstall,
    A: AssetSource,
{
    pub fn new(config: &'a Config, probe: &'a P, installer: &'a I, assets: &'a A) -> Self {
        Self {
            config,
            probe,
            installer,
            assets,
            path: vec![BootstrapState::Unverified],
        }
    }

    fn enter(&mut self, state: BootstrapState) {
        info!(?state, "bootstrap");
        self.path.push(state);
    }

    pub async fn run(mut self) -> Result<BootstrapReport, CoreError> {
        let seed_id = self.config.seed_user_id;

        self.enter(BootstrapState::Probing);
        match self.probe.read_user(seed_id).await {
            Ok(_) => {
                self.enter(BootstrapState::Verified);
            }
            Err(e) => {
                warn!(error = %e, seed_user_id = seed_id, "database not found; installing core schema");
                self.enter(BootstrapState::Installing);
                self.installer
                    .install(&self.config.install_script, &self.config.app_name, seed_id)
                    .await
                    .map_err(|e| CoreError::Bootstrap(format!("schema install failed: {e}")))?;

                self.enter(BootstrapState::Reprobing);
                let mut seed = self.probe.read_user(seed_id).await.map_err(|e| {
                    CoreError::Bootstrap(format!(
                        "seed user {seed_id} missing after install: {e}"
                    ))
                })?;

                self.enter(BootstrapState::Seeding);
                let photo_path = &self.config.seed_photo;
                let photo = self.assets.read(photo_path).await.map_err(|e| {
                    CoreError::Bootstrap(format!(
                        "cannot read seed photo {}: {e}",
                        photo_path.display()
                    ))
                })?;
                seed.user_photo = Some(photo);
                self.probe
                    .update_user(&seed)
                    .await
                    .map_err(|e| CoreError::Bootstrap(format!("seeding user photo failed: {e}")))?;
            }
        }

        self.enter(BootstrapState::Ready);
        Ok(BootstrapReport { path: self.path })
    }
}

/// Run the startup gate against the real database and filesystem.
pub async fn run_startup(config: &Config, pool: &SqlitePool) -> Result<BootstrapReport, CoreError> {
    let users = UserStorage::new(pool.clone());
    let installer = SchemaInstaller::new(pool.clone());
    Bootstrap::new(config, &users, &installer, &FsAssets).run().await
}
