//! Helpers for running the SQL install script.
//! The script itself lives on disk (`install_script` in the configuration);
//! the copy shipped with the crate is `sql/core.sql`.

/// Placeholder substituted with the configured application name.
pub const APP_NAME_PLACEHOLDER: &str = "${APP_NAME}";

/// Placeholder substituted with the configured seed user id.
pub const SEED_USER_ID_PLACEHOLDER: &str = "${SEED_USER_ID}";

/// Values substituted into each statement of the install script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptVars<'a> {
    pub app_name: &'a str,
    pub seed_user_id: i64,
}

/// Substitute placeholders in one statement. The application name is quoted
/// for use inside SQL string literals.
pub fn render_statement(stmt: &str, vars: ScriptVars<'_>) -> String {
    stmt.replace(APP_NAME_PLACEHOLDER, &vars.app_name.replace('\'', "''"))
        .replace(SEED_USER_ID_PLACEHOLDER, &vars.seed_user_id.to_string())
}

/// Split a script into individual statements.
/// Line comments are dropped first so that comment-only chunks are not executed
/// (sqlx runs one statement per query). Must run before substitution: values
/// may contain `;`.
pub fn split_statements(script: &str) -> Vec<String> {
    let stripped: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    stripped
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split then substitute.
pub fn prepare_script(script: &str, vars: ScriptVars<'_>) -> Vec<String> {
    split_statements(script)
        .iter()
        .map(|stmt| render_statement(stmt, vars))
        .collect()
}
