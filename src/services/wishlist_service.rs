use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use validator::Validate;

use crate::dto::wishlist_dto::AddWishlistItemPayload;
use crate::error::{Error, Result};
use crate::models::wishlist_item::WishlistItem;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn KeyValueStore>,
    max_items: usize,
    // Read-modify-write on a user's list must not interleave.
    write_lock: Arc<Mutex<()>>,
}

fn storage_key(user_id: i64) -> String {
    format!("wishlist:{}", user_id)
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl WishlistService {
    pub fn new(store: Arc<dyn KeyValueStore>, max_items: usize) -> Self {
        Self {
            store,
            max_items: max_items.max(1),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self, user_id: i64) -> Result<Vec<WishlistItem>> {
        match self.store.get(&storage_key(user_id)).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, user_id: i64, items: &[WishlistItem]) -> Result<()> {
        let key = storage_key(user_id);
        if items.is_empty() {
            self.store.delete(&key).await?;
        } else {
            self.store.set(&key, serde_json::to_value(items)?).await?;
        }
        Ok(())
    }

    /// Newest first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<WishlistItem>> {
        self.load(user_id).await
    }

    pub async fn tobacco_ids(&self, user_id: i64) -> Result<HashSet<String>> {
        Ok(self
            .load(user_id)
            .await?
            .into_iter()
            .map(|item| item.tobacco_id)
            .collect())
    }

    pub async fn contains(&self, user_id: i64, tobacco_id: &str) -> Result<bool> {
        Ok(self
            .load(user_id)
            .await?
            .iter()
            .any(|item| item.tobacco_id == tobacco_id.trim()))
    }

    /// Returns the stored item and whether it was newly added.
    pub async fn add(
        &self,
        user_id: i64,
        payload: AddWishlistItemPayload,
    ) -> Result<(WishlistItem, bool)> {
        payload.validate()?;
        let tobacco_id = payload.tobacco_id.trim().to_string();
        if tobacco_id.is_empty() {
            return Err(Error::BadRequest("tobaccoId must not be blank".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut items = self.load(user_id).await?;

        if let Some(existing) = items.iter().find(|item| item.tobacco_id == tobacco_id) {
            return Ok((existing.clone(), false));
        }
        if items.len() >= self.max_items {
            return Err(Error::BadRequest(format!(
                "Wishlist is limited to {} items",
                self.max_items
            )));
        }

        let item = WishlistItem {
            tobacco_id,
            brand: clean(payload.brand),
            name: clean(payload.name),
            note: clean(payload.note),
            added_at: crate::utils::time::now(),
        };
        items.insert(0, item.clone());
        self.save(user_id, &items).await?;

        tracing::info!(user_id, tobacco_id = %item.tobacco_id, "Added wishlist item");
        Ok((item, true))
    }

    pub async fn remove(&self, user_id: i64, tobacco_id: &str) -> Result<WishlistItem> {
        let tobacco_id = tobacco_id.trim();
        let _guard = self.write_lock.lock().await;
        let mut items = self.load(user_id).await?;

        let Some(index) = items.iter().position(|item| item.tobacco_id == tobacco_id) else {
            return Err(Error::NotFound(format!(
                "Tobacco {} is not on the wishlist",
                tobacco_id
            )));
        };
        let removed = items.remove(index);
        self.save(user_id, &items).await?;

        tracing::info!(user_id, tobacco_id, "Removed wishlist item");
        Ok(removed)
    }

    /// Returns how many items were removed.
    pub async fn clear(&self, user_id: i64) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let count = self.load(user_id).await?.len();
        if count > 0 {
            self.save(user_id, &[]).await?;
            tracing::info!(user_id, count, "Cleared wishlist");
        }
        Ok(count)
    }
}
