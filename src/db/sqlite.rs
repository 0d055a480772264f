use crate::db::filter::SettingFilter;
use crate::db::models::{Setting, User};
use crate::db::schema::{ScriptVars, prepare_script};
use crate::error::CoreError;
use crate::service::timezone;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, QueryBuilder, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

const SETTING_COLUMNS: &str =
    "SELECT CompanyID, CompanyName, CompanyLogo, CompanyAddress, TimeZone, ThemeID FROM core_setting";

const SETTING_BY_ID: &str = "SELECT CompanyID, CompanyName, CompanyLogo, CompanyAddress, TimeZone, ThemeID FROM core_setting WHERE CompanyID = ?";

/// Open the pool used by every storage handle. The database file is created
/// when missing so that the install script can populate it.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, CoreError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

/// CRUD over `core_setting`.
///
/// Each call checks out one pooled connection and returns it on every exit path.
/// Nothing is retried and no transaction spans more than one statement.
#[derive(Clone)]
pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All rows matching `filter`, in the order the store returns them.
    pub async fn list(&self, filter: &SettingFilter) -> Result<Vec<Setting>, CoreError> {
        let mut conn = self.pool.acquire().await?;
        let mut qb = QueryBuilder::<Sqlite>::new(SETTING_COLUMNS);
        filter.push_clauses(&mut qb);
        let rows = qb.build().fetch_all(&mut *conn).await?;
        debug!(rows = rows.len(), filtered = !filter.is_empty(), "settings listed");
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Insert every field but the identity. Returns the id assigned by the store.
    pub async fn create(&self, data: &Setting) -> Result<i64, CoreError> {
        timezone::resolve(&data.time_zone)?;
        let mut conn = self.pool.acquire().await?;
        let res = sqlx::query(
            r#"INSERT INTO core_setting (CompanyName, CompanyLogo, CompanyAddress, TimeZone, ThemeID)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&data.company_name)
        .bind(Self::logo_column(&data.company_logo))
        .bind(&data.company_address)
        .bind(&data.time_zone)
        .bind(data.theme_id)
        .execute(&mut *conn)
        .await?;
        let id = res.last_insert_rowid();
        debug!(company_id = id, "setting created");
        Ok(id)
    }

    pub async fn read(&self, company_id: i64) -> Result<Setting, CoreError> {
        if company_id == 0 {
            return Err(CoreError::IdentityRequired("CompanyID"));
        }
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query(SETTING_BY_ID)
            .bind(company_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| CoreError::not_found_or(e, "setting", company_id))?;
        debug!(company_id, "setting read");
        Self::row_to_model(row)
    }

    /// Overwrite all non-identity fields. The time zone is resolved before the
    /// store is touched; an id matching no row is reported as `NotFound`.
    pub async fn update(&self, data: &Setting) -> Result<(), CoreError> {
        timezone::resolve(&data.time_zone)?;
        if data.company_id == 0 {
            return Err(CoreError::IdentityRequired("CompanyID"));
        }
        let mut conn = self.pool.acquire().await?;
        let res = sqlx::query(
            r#"UPDATE core_setting SET
                CompanyName = ?,
                CompanyLogo = ?,
                CompanyAddress = ?,
                TimeZone = ?,
                ThemeID = ?
              WHERE CompanyID = ?"#,
        )
        .bind(&data.company_name)
        .bind(Self::logo_column(&data.company_logo))
        .bind(&data.company_address)
        .bind(&data.time_zone)
        .bind(data.theme_id)
        .bind(data.company_id)
        .execute(&mut *conn)
        .await?;
        if res.rows_affected() == 0 {
            return Err(CoreError::NotFound {
                entity: "setting",
                id: data.company_id,
            });
        }
        debug!(company_id = data.company_id, "setting updated");
        Ok(())
    }

    pub async fn delete(&self, company_id: i64) -> Result<(), CoreError> {
        if company_id == 0 {
            return Err(CoreError::IdentityRequired("CompanyID"));
        }
        let mut conn = self.pool.acquire().await?;
        let res = sqlx::query("DELETE FROM core_setting WHERE CompanyID = ?")
            .bind(company_id)
            .execute(&mut *conn)
            .await?;
        if res.rows_affected() == 0 {
            return Err(CoreError::NotFound {
                entity: "setting",
                id: company_id,
            });
        }
        debug!(company_id, "setting deleted");
        Ok(())
    }

    /// Stored time zone name of a company, without resolving it.
    pub async fn company_time_zone(&self, company_id: i64) -> Result<String, CoreError> {
        if company_id == 0 {
            return Err(CoreError::IdentityRequired("CompanyID"));
        }
        let mut conn = self.pool.acquire().await?;
        let rec: (String,) = sqlx::query_as("SELECT TimeZone FROM core_setting WHERE CompanyID = ?")
            .bind(company_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| CoreError::not_found_or(e, "setting", company_id))?;
        Ok(rec.0)
    }

    // No logo is stored as NULL and read back as empty.
    fn logo_column(logo: &[u8]) -> Option<&[u8]> {
        (!logo.is_empty()).then_some(logo)
    }

    fn row_to_model(row: SqliteRow) -> Result<Setting, CoreError> {
        let logo: Option<Vec<u8>> = row.try_get("CompanyLogo")?;
        Ok(Setting {
            company_id: row.try_get("CompanyID")?,
            company_name: row.try_get("CompanyName")?,
            company_logo: logo.unwrap_or_default(),
            company_address: row.try_get("CompanyAddress")?,
            time_zone: row.try_get("TimeZone")?,
            theme_id: row.try_get("ThemeID")?,
        })
    }
}

/// Minimal access to `core_user`: enough to probe for and seed the administrator.
#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn read(&self, user_id: i64) -> Result<User, CoreError> {
        if user_id == 0 {
            return Err(CoreError::IdentityRequired("UserID"));
        }
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query(
            "SELECT UserID, UserName, UserFullName, UserPhoto FROM core_user WHERE UserID = ?",
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| CoreError::not_found_or(e, "user", user_id))?;
        debug!(user_id, "user read");

        Ok(User {
            user_id: row.try_get("UserID")?,
            user_name: row.try_get("UserName")?,
            user_full_name: row.try_get("UserFullName")?,
            user_photo: row.try_get("UserPhoto")?,
        })
    }

    pub async fn update(&self, user: &User) -> Result<(), CoreError> {
        if user.user_id == 0 {
            return Err(CoreError::IdentityRequired("UserID"));
        }
        let mut conn = self.pool.acquire().await?;
        let res = sqlx::query(
            "UPDATE core_user SET UserName = ?, UserFullName = ?, UserPhoto = ? WHERE UserID = ?",
        )
        .bind(&user.user_name)
        .bind(&user.user_full_name)
        .bind(user.user_photo.as_deref())
        .bind(user.user_id)
        .execute(&mut *conn)
        .await?;
        if res.rows_affected() == 0 {
            return Err(CoreError::NotFound {
                entity: "user",
                id: user.user_id,
            });
        }
        debug!(user_id = user.user_id, "user updated");
        Ok(())
    }
}

/// Runs the install script against the database.
#[derive(Clone)]
pub struct SchemaInstaller {
    pool: SqlitePool,
}

impl SchemaInstaller {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Execute every statement of `script` in a single transaction, with the
    /// application name and seed user id substituted.
    pub async fn install_from(
        &self,
        script: &Path,
        app_name: &str,
        seed_user_id: i64,
    ) -> Result<(), CoreError> {
        let raw = tokio::fs::read_to_string(script).await?;
        let statements = prepare_script(
            &raw,
            ScriptVars {
                app_name,
                seed_user_id,
            },
        );

        let mut tx = self.pool.begin().await?;
        for stmt in &statements {
            sqlx::query(stmt).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        info!(
            script = %script.display(),
            statements = statements.len(),
            "install script applied"
        );
        Ok(())
    }
}
