//! Root, schema and database diagnostic endpoints

use super::handlers::AppState;
use crate::core::collection::Collection;
use crate::core::store::DocumentStore;
use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};

pub const SERVICE_MESSAGE: &str = "Hantverkar Dashboard Backend";

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": SERVICE_MESSAGE }))
}

/// `GET /schema`
pub async fn schema() -> Json<Value> {
    let collections: Vec<&str> = Collection::ALL.iter().map(|c| c.name()).collect();
    Json(json!({ "collections": collections }))
}

/// Reachability and configuration report served by `GET /test`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticReport {
    /// Probe the store. A failing probe is reported in `database`, never
    /// returned as an error.
    pub async fn probe(store: &dyn DocumentStore, url_set: bool, name_set: bool) -> Self {
        let (database, collections) = match store.collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                ("✅ Connected & Working".to_string(), names)
            }
            Err(e) => {
                tracing::warn!(backend = store.backend_name(), error = %e, "database probe failed");
                (
                    format!("⚠️  Connected but Error: {}", truncate(&e.to_string())),
                    Vec::new(),
                )
            }
        };

        Self {
            backend: "✅ Running".to_string(),
            database,
            database_url: flag(url_set),
            database_name: flag(name_set),
            connection_status: "Connected".to_string(),
            collections,
        }
    }
}

fn flag(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

/// `GET /test`
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let report = DiagnosticReport::probe(
        state.store.as_ref(),
        state.config.database_url_set(),
        state.config.database_name_set(),
    )
    .await;
    Json(report)
}
