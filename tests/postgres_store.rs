//! Query tests for the PostgreSQL user store
//!
//! Each test gets a fresh database from `#[sqlx::test]`, so `DATABASE_URL`
//! must point at a server where the test user may create databases.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::PgPool;

use game_sync_server::db::PgUserStore;
use game_sync_server::models::NewActivityEntry;
use game_sync_server::UserStore;

/// Insert a row the way the external registration path would
async fn seed_user(
    pool: &PgPool,
    uuid: &str,
    country: &str,
    money: i64,
    created_at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO user_data (uuid, money, country, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(uuid)
    .bind(money)
    .bind(country)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn registered() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_top_users_ordered_and_limited(pool: PgPool) {
    seed_user(&pool, "a", "US", 300, registered()).await;
    seed_user(&pool, "b", "US", 100, registered()).await;
    seed_user(&pool, "c", "US", 200, registered()).await;
    seed_user(&pool, "d", "DE", 999, registered()).await;
    let store = PgUserStore::new(pool);

    let top = store.top_users_by_money("US", 2).await.unwrap();
    let uuids: Vec<&str> = top.iter().map(|u| u.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["a", "c"]);

    let all = store.top_users_by_money("US", 10).await.unwrap();
    assert_eq!(all.len(), 3);

    assert!(store.top_users_by_money("FR", 5).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_new_user_count_starts_at_midnight(pool: PgPool) {
    let midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
    seed_user(&pool, "before", "US", 0, midnight - chrono::Duration::milliseconds(1)).await;
    seed_user(&pool, "at", "US", 0, midnight).await;
    seed_user(&pool, "after", "US", 0, midnight + chrono::Duration::hours(5)).await;
    seed_user(&pool, "elsewhere", "DE", 0, midnight).await;
    let store = PgUserStore::new(pool);

    assert_eq!(store.count_users_created_since("US", midnight).await.unwrap(), 2);
    assert_eq!(store.count_users_created_since("DE", midnight).await.unwrap(), 1);
    assert_eq!(store.count_users_created_since("FR", midnight).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_activity_history_filters_and_orders(pool: PgPool) {
    seed_user(&pool, "u1", "US", 0, registered()).await;
    seed_user(&pool, "u2", "US", 0, registered()).await;
    let store = PgUserStore::new(pool);
    let user = store.find_user("u1").await.unwrap().unwrap();

    for (d, amount) in [(1, 5), (3, 7), (2, 9), (3, 11)] {
        let entry = NewActivityEntry {
            uuid: "u1".to_string(),
            activity: amount,
            activity_date: day(d),
        };
        store.save_activity(&user, &entry).await.unwrap();
    }
    let other = store.find_user("u2").await.unwrap().unwrap();
    let entry = NewActivityEntry {
        uuid: "u2".to_string(),
        activity: 1,
        activity_date: day(3),
    };
    store.save_activity(&other, &entry).await.unwrap();

    let history = store.activity_history("u1", day(2), 10).await.unwrap();
    let amounts: Vec<i64> = history.iter().map(|e| e.activity).collect();
    // Newest date first, later insert first within a date
    assert_eq!(amounts, vec![11, 7, 9]);
    assert!(history.iter().all(|e| e.uuid == "u1"));

    let limited = store.activity_history("u1", day(1), 2).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].activity, 11);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_user_never_rewrites_created_at(pool: PgPool) {
    seed_user(&pool, "u1", "US", 5, registered()).await;
    let store = PgUserStore::new(pool);

    let mut changed = store.find_user("u1").await.unwrap().unwrap();
    changed.money = 50;
    changed.country = "DE".to_string();
    changed.sync_count = 3;
    changed.created_at = Utc::now();
    store.save_user(&changed).await.unwrap();

    let entry = NewActivityEntry {
        uuid: "u1".to_string(),
        activity: 4,
        activity_date: day(2),
    };
    store.save_activity(&changed, &entry).await.unwrap();

    let stored = store.find_user("u1").await.unwrap().unwrap();
    assert_eq!(stored.money, 50);
    assert_eq!(stored.country, "DE");
    assert_eq!(stored.sync_count, 3);
    assert_eq!(stored.created_at, registered());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_unknown_user_is_none(pool: PgPool) {
    let store = PgUserStore::new(pool);
    assert!(store.find_user("ghost").await.unwrap().is_none());
    store.ping().await.unwrap();
}
