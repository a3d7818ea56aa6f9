use std::sync::Arc;

use qr_engine::{QrParams, QrSymbol};
use qr_store::{Database, HistoryStore};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    db: Database,
    /// Recently generated values, persisted on every change
    history: Mutex<HistoryStore>,
    /// QR code currently shown on the page, if any
    current: RwLock<Option<QrSymbol>>,
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Create shared state from an already-opened database and loaded config.
    pub fn new(db: Database, config: AppConfig) -> Result<Self, anyhow::Error> {
        let history = HistoryStore::load(db.clone())?;
        Ok(Self {
            inner: Arc::new(SharedStateInner {
                config,
                db,
                history: Mutex::new(history),
                current: RwLock::new(None),
                shutdown_token: CancellationToken::new(),
            }),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn history(&self) -> &Mutex<HistoryStore> {
        &self.inner.history
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    /// Parameters of the current QR code, or the configured defaults for `value`.
    pub async fn params_for(&self, value: &str) -> QrParams {
        match self.inner.current.read().await.as_ref() {
            Some(symbol) => QrParams {
                value: value.to_string(),
                ..symbol.params().clone()
            },
            None => QrParams::new(value)
                .with_size(self.inner.config.default_size)
                .with_corner(self.inner.config.default_corner),
        }
    }

    pub async fn current(&self) -> Option<QrSymbol> {
        self.inner.current.read().await.clone()
    }

    pub async fn set_current(&self, symbol: Option<QrSymbol>) {
        *self.inner.current.write().await = symbol;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_engine::CornerStyle;

    fn test_state() -> SharedState {
        let db = Database::open_in_memory().unwrap();
        let config = AppConfig {
            default_size: 300,
            default_corner: CornerStyle::Rounded,
            ..AppConfig::default()
        };
        SharedState::new(db, config).unwrap()
    }

    #[tokio::test]
    async fn params_for_uses_config_defaults_without_current() {
        let state = test_state();
        let params = state.params_for("hi").await;
        assert_eq!(params.value, "hi");
        assert_eq!(params.size, 300);
        assert_eq!(params.corner, CornerStyle::Rounded);
    }

    #[tokio::test]
    async fn params_for_keeps_current_visual_settings() {
        let state = test_state();
        let params = QrParams::new("old").with_size(128);
        state
            .set_current(Some(QrSymbol::generate(&params).unwrap()))
            .await;

        let next = state.params_for("new").await;
        assert_eq!(next.value, "new");
        assert_eq!(next.size, 128);
        assert_eq!(next.corner, CornerStyle::Square);
    }

    #[tokio::test]
    async fn history_is_loaded_from_database() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(qr_store::HISTORY_KEY, r#"["x","y"]"#).unwrap();
        let state = SharedState::new(db, AppConfig::default()).unwrap();
        assert_eq!(state.history().lock().await.entries(), ["x", "y"]);
    }
}
