//! Shared database time conversion helpers.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub(super) fn unix_timestamp_seconds(now: SystemTime) -> Result<u64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to compute backup timestamp from system clock: {}",
                err
            ))
        })
}

/// Milliseconds since the epoch, clamped at zero for pre-epoch values.
pub(crate) fn timestamp_millis(at: DateTime<Utc>) -> u64 {
    at.timestamp_millis().max(0) as u64
}

/// Index key component that sorts newer timestamps first in ascending scans.
pub(crate) fn reverse_timestamp_key(at: DateTime<Utc>) -> u64 {
    u64::MAX.saturating_sub(timestamp_millis(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn reverse_key_orders_newer_first() {
        let older = Utc::now();
        let newer = older + Duration::milliseconds(5);
        assert!(reverse_timestamp_key(newer) < reverse_timestamp_key(older));
    }

    #[test]
    fn pre_epoch_timestamps_clamp_to_zero() {
        let pre_epoch = DateTime::<Utc>::from_timestamp(-10, 0).expect("timestamp");
        assert_eq!(timestamp_millis(pre_epoch), 0);
        assert_eq!(reverse_timestamp_key(pre_epoch), u64::MAX);
    }
}
