//! Write-transaction runner for multi-table review writes.

use super::Database;
use crate::error::AppError;
use crate::repository::TransactionRunner;

/// Named points inside a review write where tests can force a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionFailpoint {
    /// After the review row and its index rows are written.
    ReviewAfterRowInsertOnce,
    /// After menu links are written, before file links.
    ReviewAfterMenuLinksOnce,
}

#[cfg(test)]
thread_local! {
    static ARMED_FAILPOINT: std::cell::Cell<Option<TransactionFailpoint>> =
        const { std::cell::Cell::new(None) };
}

/// Arm (or clear) a failpoint for the current test thread.
#[cfg(test)]
pub(crate) fn set_transaction_failpoint(point: Option<TransactionFailpoint>) {
    ARMED_FAILPOINT.with(|slot| slot.set(point));
}

/// Fail once if `point` is armed on this thread.
#[cfg(test)]
pub(crate) fn fail_if_armed(point: TransactionFailpoint) -> Result<(), AppError> {
    ARMED_FAILPOINT.with(|slot| {
        if slot.get() == Some(point) {
            slot.set(None);
            return Err(AppError::StorageMessage(format!(
                "Injected transaction failpoint: {:?}",
                point
            )));
        }
        Ok(())
    })
}

#[cfg(not(test))]
#[inline]
pub(crate) fn fail_if_armed(_point: TransactionFailpoint) -> Result<(), AppError> {
    Ok(())
}

impl TransactionRunner for Database {
    type Tx = redb::WriteTransaction;

    fn start_transaction<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&Self::Tx) -> Result<T, AppError>,
    {
        let write_txn = self.db.begin_write()?;
        match work(&write_txn) {
            Ok(value) => {
                write_txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = write_txn.abort() {
                    tracing::error!("Failed to abort write transaction: {}", abort_err);
                }
                Err(err)
            }
        }
    }
}
