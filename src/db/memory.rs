//! In-process store for tests and local runs without PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::UserStore;
use crate::error::{AppError, Result};
use crate::models::{ActivityEntry, NewActivityEntry, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, UserRecord>,
    history: Vec<ActivityEntry>,
    next_entry_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    tables: Mutex<Tables>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("memory store lock poisoned")))
    }

    /// Register a record. Stands in for the external registration path.
    pub fn insert_user(&self, user: UserRecord) -> Result<()> {
        self.lock()?.users.insert(user.uuid.clone(), user);
        Ok(())
    }

    /// Current stored state of a record, bypassing any cache
    pub fn get_user(&self, uuid: &str) -> Result<Option<UserRecord>> {
        Ok(self.lock()?.users.get(uuid).cloned())
    }

    /// Number of activity entries across all users
    pub fn history_len(&self) -> Result<usize> {
        Ok(self.lock()?.history.len())
    }

    fn update(tables: &mut Tables, user: &UserRecord) -> Result<()> {
        let stored = tables
            .users
            .get_mut(&user.uuid)
            .ok_or(AppError::UserNotFound)?;
        let created_at = stored.created_at;
        *stored = user.clone();
        stored.created_at = created_at;
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user(&self, uuid: &str) -> Result<Option<UserRecord>> {
        self.get_user(uuid)
    }

    async fn save_user(&self, user: &UserRecord) -> Result<()> {
        let mut tables = self.lock()?;
        Self::update(&mut tables, user)
    }

    async fn save_activity(&self, user: &UserRecord, entry: &NewActivityEntry) -> Result<()> {
        let mut tables = self.lock()?;
        Self::update(&mut tables, user)?;

        tables.next_entry_id += 1;
        let id = tables.next_entry_id;
        tables.history.push(ActivityEntry {
            id,
            uuid: entry.uuid.clone(),
            activity: entry.activity,
            activity_date: entry.activity_date,
        });
        Ok(())
    }

    async fn top_users_by_money(&self, country: &str, limit: i64) -> Result<Vec<UserRecord>> {
        let tables = self.lock()?;
        let mut users: Vec<UserRecord> = tables
            .users
            .values()
            .filter(|u| u.country == country)
            .cloned()
            .collect();
        users.sort_by(|a, b| b.money.cmp(&a.money).then_with(|| a.uuid.cmp(&b.uuid)));
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn count_users_created_since(&self, country: &str, since: DateTime<Utc>) -> Result<i64> {
        let tables = self.lock()?;
        let count = tables
            .users
            .values()
            .filter(|u| u.country == country && u.created_at >= since)
            .count();
        Ok(count as i64)
    }

    async fn activity_history(
        &self,
        uuid: &str,
        since: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>> {
        let tables = self.lock()?;
        let mut entries: Vec<ActivityEntry> = tables
            .history
            .iter()
            .filter(|e| e.uuid == uuid && e.activity_date >= since)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.activity_date
                .cmp(&a.activity_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        entries.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(entries)
    }

    async fn ping(&self) -> Result<()> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(uuid: &str, country: &str, money: i64) -> UserRecord {
        let mut record = UserRecord::new(uuid, country, Utc::now());
        record.money = money;
        record
    }

    #[tokio::test]
    async fn test_save_user_keeps_created_at() {
        let store = MemoryUserStore::new();
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store
            .insert_user(UserRecord::new("u1", "US", created))
            .unwrap();

        let mut changed = store.find_user("u1").await.unwrap().unwrap();
        changed.money = 50;
        changed.created_at = Utc::now();
        store.save_user(&changed).await.unwrap();

        let stored = store.get_user("u1").unwrap().unwrap();
        assert_eq!(stored.money, 50);
        assert_eq!(stored.created_at, created);
    }

    #[tokio::test]
    async fn test_save_unknown_user_fails() {
        let store = MemoryUserStore::new();
        let result = store.save_user(&user("ghost", "US", 1)).await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_top_users_ordering_and_limit() {
        let store = MemoryUserStore::new();
        store.insert_user(user("a", "US", 300)).unwrap();
        store.insert_user(user("b", "US", 100)).unwrap();
        store.insert_user(user("c", "US", 200)).unwrap();
        store.insert_user(user("d", "DE", 999)).unwrap();

        let top = store.top_users_by_money("US", 2).await.unwrap();
        let money: Vec<i64> = top.iter().map(|u| u.money).collect();
        assert_eq!(money, vec![300, 200]);
    }

    #[tokio::test]
    async fn test_activity_history_filters_and_orders() {
        let store = MemoryUserStore::new();
        let record = user("u1", "US", 0);
        store.insert_user(record.clone()).unwrap();

        for (day, amount) in [(1, 5), (3, 7), (2, 9)] {
            let entry = NewActivityEntry {
                uuid: "u1".to_string(),
                activity: amount,
                activity_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            };
            store.save_activity(&record, &entry).await.unwrap();
        }

        let since = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let history = store.activity_history("u1", since, 10).await.unwrap();
        let amounts: Vec<i64> = history.iter().map(|e| e.activity).collect();
        assert_eq!(amounts, vec![7, 9]);
        assert_eq!(store.history_len().unwrap(), 3);
    }
}
