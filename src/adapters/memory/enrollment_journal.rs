//! In-memory enrollment journal.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, JournalEntryId};
use crate::ports::{EnrollmentJournal, JournalEntry, JournalStatus};

#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollmentJournal {
    entries: Arc<RwLock<Vec<JournalEntry>>>,
    resolved: Arc<RwLock<HashSet<JournalEntryId>>>,
}

impl InMemoryEnrollmentJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EnrollmentJournal for InMemoryEnrollmentJournal {
    async fn record(&self, entries: &[JournalEntry]) -> Result<(), DomainError> {
        self.entries.write().await.extend_from_slice(entries);
        Ok(())
    }

    async fn pending_failures(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        let resolved = self.resolved.read().await;
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.status == JournalStatus::Failed && !resolved.contains(&e.id))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn entries_for_order(&self, order_id: &str) -> Result<Vec<JournalEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn resolve(&self, ids: &[JournalEntryId]) -> Result<(), DomainError> {
        let entries = self.entries.read().await;
        let mut resolved = self.resolved.write().await;
        for id in ids {
            if entries
                .iter()
                .any(|e| e.id == *id && e.status == JournalStatus::Failed)
            {
                resolved.insert(*id);
            }
        }
        Ok(())
    }
}
