//! Cached JSON views per page
//!
//! Admin reads are cached under the page that displays them. Handlers that
//! change backend state invalidate the page so the next read goes back to
//! the backend.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Page showing the admin dashboard
pub const ADMIN_PAGE: &str = "/admin";

#[derive(Debug, Default)]
pub struct PageCache {
    pages: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, page: &str, key: &str) -> Option<Value> {
        self.pages.read().await.get(page)?.get(key).cloned()
    }

    pub async fn put(&self, page: &str, key: &str, value: Value) {
        self.pages
            .write()
            .await
            .entry(page.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Drop every cached view of `page`
    pub async fn invalidate(&self, page: &str) {
        self.pages.write().await.remove(page);
    }

    #[cfg(test)]
    pub(crate) async fn len(&self, page: &str) -> usize {
        self.pages.read().await.get(page).map(HashMap::len).unwrap_or(0)
    }
}
