use crate::models::{FreshnessStatus, InventoryItem};
use chrono::{Duration, NaiveDate, Utc};
use std::sync::RwLock;
use uuid::Uuid;

/// Freshness from days to expiry
pub fn compute_status(days_left: i64) -> FreshnessStatus {
    if days_left <= 0 {
        FreshnessStatus::Expired
    } else if days_left <= 2 {
        FreshnessStatus::Expiring
    } else {
        FreshnessStatus::Fresh
    }
}

/// Repository interface for the grocery inventory. Keeps the analysis and
/// recipe logic decoupled from storage lifetime; the default implementation
/// is volatile and process-local.
pub trait InventoryStore: Send + Sync {
    /// All items with days-left and freshness recomputed as of today
    fn list(&self) -> Vec<InventoryItem>;

    /// Add an item expiring `shelf_life_days` from today
    fn add(&self, name: String, category: String, quantity: u32, shelf_life_days: i64)
        -> InventoryItem;

    /// Remove by id; false when the id was not present
    fn remove(&self, id: Uuid) -> bool;

    /// Case-insensitive lookup by name, freshness recomputed
    fn find(&self, name: &str) -> Option<InventoryItem>;
}

/// In-memory inventory; resets when the server restarts
pub struct MemoryInventory {
    items: RwLock<Vec<InventoryItem>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn refresh(item: &mut InventoryItem, today: NaiveDate) {
        item.days_left = (item.expiry_date - today).num_days();
        item.status = compute_status(item.days_left);
    }
}

impl Default for MemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore for MemoryInventory {
    fn list(&self) -> Vec<InventoryItem> {
        let today = Self::today();
        let mut items = self.items.write().expect("inventory lock poisoned");

        for item in items.iter_mut() {
            Self::refresh(item, today);
        }

        items.clone()
    }

    fn add(
        &self,
        name: String,
        category: String,
        quantity: u32,
        shelf_life_days: i64,
    ) -> InventoryItem {
        let today = Self::today();
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name,
            category,
            quantity,
            expiry_date: today + Duration::days(shelf_life_days),
            status: compute_status(shelf_life_days),
            days_left: shelf_life_days,
        };

        self.items
            .write()
            .expect("inventory lock poisoned")
            .push(item.clone());

        item
    }

    fn remove(&self, id: Uuid) -> bool {
        let mut items = self.items.write().expect("inventory lock poisoned");
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() < before
    }

    fn find(&self, name: &str) -> Option<InventoryItem> {
        let today = Self::today();
        let items = self.items.read().expect("inventory lock poisoned");

        items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .map(|item| {
                let mut found = item.clone();
                Self::refresh(&mut found, today);
                found
            })
    }
}
