use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quota::{DailyQuota, QuotaKind};
use crate::constants::{COUNTRY_CODE_MAX_LEN, ERR_INVALID_JSON};
use crate::error::{AppError, Result};

/// Per-player record, one row per uuid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Client-assigned identifier
    pub uuid: String,
    /// Last value received from a sync
    pub money: i64,
    /// Last country code received from a sync
    pub country: String,
    /// Sum of all activity reports
    pub activity_total: i64,
    /// Syncs and reads in the current window
    pub sync_count: i32,
    /// Activity reports in the current window
    pub stat_count: i32,
    /// Epoch milliseconds of the last sync or read
    pub last_sync_time: i64,
    /// Epoch milliseconds of the last activity report
    pub last_stat_time: i64,
    /// Set once when the row is first persisted
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// A record as it looks right after registration
    pub fn new(
        uuid: impl Into<String>,
        country: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            money: 0,
            country: country.into(),
            activity_total: 0,
            sync_count: 0,
            stat_count: 0,
            last_sync_time: 0,
            last_stat_time: 0,
            created_at,
        }
    }

    /// Counter shared by syncs and reads
    pub fn sync_quota(&mut self) -> DailyQuota<'_> {
        DailyQuota {
            count: &mut self.sync_count,
            last_touch: &mut self.last_sync_time,
        }
    }

    /// Counter for activity reports
    pub fn stat_quota(&mut self) -> DailyQuota<'_> {
        DailyQuota {
            count: &mut self.stat_count,
            last_touch: &mut self.last_stat_time,
        }
    }

    /// Charge one request of `kind` against the matching counter
    pub fn consume(&mut self, kind: QuotaKind, now: i64) -> Result<()> {
        match kind {
            QuotaKind::Sync | QuotaKind::Read => self.sync_quota().check_and_increment(kind, now),
            QuotaKind::Activity => self.stat_quota().check_and_increment(kind, now),
        }
    }

    /// Overwrite the client-owned fields from a sync
    pub fn apply_sync(&mut self, payload: SyncPayload) {
        self.money = payload.money;
        self.country = payload.country;
    }
}

/// Body of a sync submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub money: i64,
    pub country: String,
}

impl SyncPayload {
    /// Parse and validate a raw sync body
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let payload: SyncPayload = serde_json::from_slice(raw).map_err(|e| {
            tracing::debug!("Sync payload rejected: {}", e);
            AppError::InvalidPayload(ERR_INVALID_JSON.to_string())
        })?;

        if !Self::validate_country(&payload.country) {
            return Err(AppError::InvalidPayload(format!(
                "Country must be 1 to {} characters",
                COUNTRY_CODE_MAX_LEN
            )));
        }

        Ok(payload)
    }

    /// Validate a country code: non-blank, at most three characters
    pub fn validate_country(country: &str) -> bool {
        !country.trim().is_empty() && country.chars().count() <= COUNTRY_CODE_MAX_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_payload() {
        let payload = SyncPayload::parse(br#"{"money": 100, "country": "US"}"#).unwrap();
        assert_eq!(payload.money, 100);
        assert_eq!(payload.country, "US");
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        let cases: [&[u8]; 7] = [
            b"not json",
            &[0xff, 0xfe, b'{'],
            br#"{"money": "lots", "country": "US"}"#,
            br#"{"country": "US"}"#,
            br#"{"money": 1}"#,
            br#"{"money": 1, "country": ""}"#,
            br#"{"money": 1, "country": "USAX"}"#,
        ];
        for raw in cases {
            assert!(
                matches!(SyncPayload::parse(raw), Err(AppError::InvalidPayload(_))),
                "{:?} should be rejected",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let created = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = UserRecord::new("abc", "US", created);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["uuid"], "abc");
        assert_eq!(value["activityTotal"], 0);
        assert_eq!(value["syncCount"], 0);
        assert_eq!(value["lastStatTime"], 0);
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_read_and_sync_share_a_counter() {
        let mut record = UserRecord::new("abc", "US", Utc::now());
        record.consume(QuotaKind::Sync, 1_000).unwrap();
        assert!(matches!(
            record.consume(QuotaKind::Read, 2_000),
            Err(AppError::ReadLimitExceeded)
        ));
        assert_eq!(record.sync_count, 1);
        assert_eq!(record.stat_count, 0);
    }
}
