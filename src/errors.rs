use thiserror::Error;

/// All possible `jisho_results` [Error] paths
#[derive(Error, Debug)]
pub enum JishoError {
    #[error("(-)[<jisho_error::table>] -> \n{0}")]
    Table(#[from] TableError),
    #[error("(-)[<jisho_error::query>] -> \n{0}")]
    Query(#[from] QueryError),
    #[error("(-)[<jisho_error::settings>] -> \n{0}")]
    Settings(#[from] SettingsError),
}

/// Errors decoding a reference table or a search response.
///
/// These never reach the processing path: a failed load leaves the
/// previously adopted table in place.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to deserialize {table} table\nreason: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{table} table fetch failed: {reason}")]
    Fetch { table: &'static str, reason: String },
}

impl TableError {
    pub fn json(table: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| TableError::Json { table, source }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown search mode: `{0}`\n[help]: expected one of exact, any, both, en_exact, en_any")]
    UnknownMode(String),
    #[error("query is empty after trimming")]
    Empty,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid options json: {0}")]
    Json(#[from] serde_json::Error),
}
