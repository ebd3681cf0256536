use crate::constants::{
    MAX_READS_PER_DAY, MAX_STATS_PER_DAY, MAX_SYNCS_PER_DAY, QUOTA_WINDOW_MILLIS,
};
use crate::error::{AppError, Result};

/// Operation kinds that consume a per-user daily quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaKind {
    /// State sync, counted against the sync counter
    Sync,
    /// User-data read, counted against the sync counter with a cap of one
    Read,
    /// Activity report, counted against the stat counter
    Activity,
}

impl QuotaKind {
    /// Cap of the counter for this operation within one window
    pub fn cap(self) -> i32 {
        match self {
            QuotaKind::Sync => MAX_SYNCS_PER_DAY,
            QuotaKind::Read => MAX_READS_PER_DAY,
            QuotaKind::Activity => MAX_STATS_PER_DAY,
        }
    }

    fn exceeded(self) -> AppError {
        match self {
            QuotaKind::Sync => AppError::SyncLimitExceeded,
            QuotaKind::Read => AppError::ReadLimitExceeded,
            QuotaKind::Activity => AppError::ActivityLimitExceeded,
        }
    }
}

/// Mutable view over one counter and its last-touch timestamp
#[derive(Debug)]
pub struct DailyQuota<'a> {
    pub count: &'a mut i32,
    pub last_touch: &'a mut i64,
}

impl DailyQuota<'_> {
    /// Whether the window has passed since the last touch
    pub fn is_stale(&self, now: i64) -> bool {
        now - *self.last_touch > QUOTA_WINDOW_MILLIS
    }

    /// Reset the counter if the window has passed. Returns true if reset.
    pub fn reset_if_stale(&mut self, now: i64) -> bool {
        if self.is_stale(now) {
            *self.count = 0;
            return true;
        }
        false
    }

    /// Apply the window reset, enforce the cap, then count this request
    /// Returns Ok(()) if allowed, the kind's limit error if not
    pub fn check_and_increment(&mut self, kind: QuotaKind, now: i64) -> Result<()> {
        // Reset always runs first so a stale counter never blocks a request
        self.reset_if_stale(now);

        if *self.count >= kind.cap() {
            tracing::warn!(
                "{:?} quota would be exceeded: {}/{}",
                kind,
                self.count,
                kind.cap()
            );
            return Err(kind.exceeded());
        }

        *self.count += 1;
        *self.last_touch = now;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn quota<'a>(count: &'a mut i32, last: &'a mut i64) -> DailyQuota<'a> {
        DailyQuota {
            count,
            last_touch: last,
        }
    }

    #[test]
    fn test_check_and_increment_success() {
        let (mut count, mut last) = (0, 0);
        assert!(quota(&mut count, &mut last)
            .check_and_increment(QuotaKind::Sync, NOW)
            .is_ok());
        assert_eq!(count, 1);
        assert_eq!(last, NOW);
    }

    #[test]
    fn test_sync_cap() {
        let (mut count, mut last) = (0, 0);
        for _ in 0..MAX_SYNCS_PER_DAY {
            assert!(quota(&mut count, &mut last)
                .check_and_increment(QuotaKind::Sync, NOW)
                .is_ok());
        }

        assert!(matches!(
            quota(&mut count, &mut last).check_and_increment(QuotaKind::Sync, NOW),
            Err(AppError::SyncLimitExceeded)
        ));
        assert_eq!(count, MAX_SYNCS_PER_DAY);
    }

    #[test]
    fn test_read_cap_is_one() {
        let (mut count, mut last) = (0, 0);
        assert!(quota(&mut count, &mut last)
            .check_and_increment(QuotaKind::Read, NOW)
            .is_ok());
        assert!(matches!(
            quota(&mut count, &mut last).check_and_increment(QuotaKind::Read, NOW + 1),
            Err(AppError::ReadLimitExceeded)
        ));
    }

    #[test]
    fn test_activity_cap() {
        let (mut count, mut last) = (MAX_STATS_PER_DAY, NOW);
        assert!(matches!(
            quota(&mut count, &mut last).check_and_increment(QuotaKind::Activity, NOW),
            Err(AppError::ActivityLimitExceeded)
        ));
        assert_eq!(last, NOW);
    }

    #[test]
    fn test_reset_requires_strictly_more_than_a_day() {
        let (mut count, mut last) = (MAX_SYNCS_PER_DAY, NOW);

        // Exactly one window later is still inside it
        assert!(matches!(
            quota(&mut count, &mut last)
                .check_and_increment(QuotaKind::Sync, NOW + QUOTA_WINDOW_MILLIS),
            Err(AppError::SyncLimitExceeded)
        ));

        let later = NOW + QUOTA_WINDOW_MILLIS + 1;
        assert!(quota(&mut count, &mut last)
            .check_and_increment(QuotaKind::Sync, later)
            .is_ok());
        assert_eq!(count, 1);
        assert_eq!(last, later);
    }

    #[test]
    fn test_reset_if_stale_leaves_fresh_counter() {
        let (mut count, mut last) = (7, NOW);
        assert!(!quota(&mut count, &mut last).reset_if_stale(NOW + 1000));
        assert_eq!(count, 7);

        assert!(quota(&mut count, &mut last).reset_if_stale(NOW + QUOTA_WINDOW_MILLIS + 1));
        assert_eq!(count, 0);
        // Reset alone does not touch the timestamp
        assert_eq!(last, NOW);
    }
}
