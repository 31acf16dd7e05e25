//! Reconciliation of the contact mirror against the remote directory.
//!
//! The remote is authoritative for existence and field values. A pass
//! deletes local rows the remote no longer has, overwrites rows whose
//! fields drifted, and inserts rows the mirror lacks, all inside one
//! transaction. Must not run concurrently with itself; the scheduler that
//! launches the batch is responsible for single-instance execution.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use crate::directory::{DirectoryClient, DirectoryContact};
use crate::entities::contacts;
use crate::error::AppError;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Size of the remote set, which the mirror matches after the pass.
    pub total: usize,
}

/// Run one reconciliation pass. Running it twice against an unchanged
/// remote is a no-op on the second run.
///
/// The remote fetch happens before the transaction opens so a slow remote
/// never holds a write transaction; on any write failure the transaction
/// rolls back and the mirror keeps its last good state.
pub async fn synchronize(
    directory: &dyn DirectoryClient,
    db: &DatabaseConnection,
) -> Result<SyncReport, AppError> {
    let remote = directory.fetch_contacts().await?;
    info!(total = remote.len(), "fetched remote contact set");

    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::sync_failed(format!("failed to open transaction: {e}")))?;

    let report = match apply_remote(&txn, &remote).await {
        Ok(report) => report,
        Err(e) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            return Err(e);
        }
    };

    txn.commit()
        .await
        .map_err(|e| AppError::sync_failed(format!("commit failed: {e}")))?;

    info!(
        inserted = report.inserted,
        updated = report.updated,
        deleted = report.deleted,
        total = report.total,
        "contact mirror reconciled"
    );

    Ok(report)
}

async fn apply_remote(
    txn: &DatabaseTransaction,
    remote: &[DirectoryContact],
) -> Result<SyncReport, AppError> {
    let local: HashMap<i64, contacts::Model> = contacts::Entity::find()
        .all(txn)
        .await
        .map_err(|e| AppError::sync_failed(format!("failed to scan mirror: {e}")))?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();

    let remote_ids: HashSet<i64> = remote.iter().map(|record| record.id).collect();

    // Rows the remote no longer has go first, in one batch.
    let to_delete: Vec<i64> = local
        .keys()
        .copied()
        .filter(|id| !remote_ids.contains(id))
        .collect();
    let deleted = to_delete.len();
    if !to_delete.is_empty() {
        contacts::Entity::delete_many()
            .filter(contacts::Column::Id.is_in(to_delete))
            .exec(txn)
            .await
            .map_err(|e| AppError::sync_failed(format!("failed to delete stale rows: {e}")))?;
    }

    let mut inserted = 0;
    let mut updated = 0;
    for record in remote {
        match local.get(&record.id) {
            Some(existing) if unchanged(existing, record) => {}
            Some(existing) => {
                // Remote wins on every field; no merge or conflict detection.
                let mut active: contacts::ActiveModel = existing.clone().into();
                active.name = Set(record.name.clone());
                active.email = Set(record.email.clone());
                active.phone = Set(record.phone.clone());
                active
                    .update(txn)
                    .await
                    .map_err(|e| AppError::sync_failed(format!("failed to update row: {e}")))?;
                updated += 1;
            }
            None => {
                contacts::ActiveModel {
                    id: Set(record.id),
                    name: Set(record.name.clone()),
                    email: Set(record.email.clone()),
                    phone: Set(record.phone.clone()),
                }
                .insert(txn)
                .await
                .map_err(|e| AppError::sync_failed(format!("failed to insert row: {e}")))?;
                inserted += 1;
            }
        }
    }

    Ok(SyncReport {
        inserted,
        updated,
        deleted,
        total: remote.len(),
    })
}

fn unchanged(existing: &contacts::Model, record: &DirectoryContact) -> bool {
    existing.name == record.name && existing.email == record.email && existing.phone == record.phone
}
