//! Single-document authority: the revision log a collaboration server keeps.
//!
//! ```text
//!   client A ──(rev 3, op)──┐
//!                           ▼
//!   ┌───────────────────────────────────────────┐
//!   │ Authority                                 │
//!   │  history: r1 ◂─ r2 ◂─ r3 ◂─ r4 ◂─ r5      │
//!   │                         └─ rebase op ──▸  │
//!   │  document @ r5  ──apply──▸ document @ r6  │
//!   └───────────────────────────────────────────┘
//!                           │
//!                           ▼ broadcast (r6, op')
//! ```
//!
//! An operation made at revision `r` is transformed through every revision
//! after `r` before it is applied. Already-applied operations win insert ties.
//! Transport, persistence and fan-out are the caller's concern.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OtError, Result};
use crate::operation::Operation;
use crate::transform::transform;

/// Authority configuration.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Number of applied revisions kept for rebasing. Operations made against
    /// an older revision are rejected. Default: 1024.
    pub max_history: usize,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self { max_history: 1024 }
    }
}

impl AuthorityConfig {
    /// Small history so pruning is easy to exercise.
    pub fn for_testing() -> Self {
        Self { max_history: 8 }
    }
}

/// One applied revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Revision number this operation produced (first edit is 1).
    pub number: u64,
    /// Peer that submitted the operation.
    pub author: Uuid,
    /// The operation as applied, i.e. after rebasing.
    pub operation: Operation,
}

/// Authoritative state of one document.
pub struct Authority {
    document: String,
    revision: u64,
    history: VecDeque<Revision>,
    config: AuthorityConfig,
}

impl Authority {
    pub fn new(document: impl Into<String>) -> Self {
        Self::with_config(document, AuthorityConfig::default())
    }

    pub fn with_config(document: impl Into<String>, config: AuthorityConfig) -> Self {
        Self {
            document: document.into(),
            revision: 0,
            history: VecDeque::with_capacity(config.max_history.min(1024)),
            config,
        }
    }

    #[inline]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Oldest revision an incoming operation may still be based on.
    pub fn oldest_revision(&self) -> u64 {
        self.revision - self.history.len() as u64
    }

    /// Accept `operation`, made by `author` against `revision`.
    ///
    /// Returns the operation as applied at the new head revision, ready to be
    /// broadcast to every peer (including the author, as acknowledgement).
    pub fn receive(&mut self, author: Uuid, revision: u64, operation: Operation) -> Result<Operation> {
        let concurrent = self.revisions_after(revision).inspect_err(|e| {
            log::warn!("Rejected operation from {author}: {e}");
        })?;

        let mut rebased = operation;
        for entry in concurrent {
            rebased = transform(&entry.operation, &rebased, false)
                .map_err(|e| match e {
                    // The op does not fit the document at `revision`.
                    OtError::BaseLengthMismatch { left, right } => OtError::LengthMismatch {
                        expected: right,
                        actual: left,
                    },
                    other => other,
                })
                .inspect_err(|e| {
                    log::warn!("Operation from {author} does not fit revision {revision}: {e}");
                })?;
            log::trace!("Rebased operation from {author} over revision {}", entry.number);
        }

        self.document = rebased.apply(&self.document).inspect_err(|e| {
            log::warn!("Operation from {author} does not fit revision {}: {e}", self.revision);
        })?;
        self.revision += 1;
        self.history.push_back(Revision {
            number: self.revision,
            author,
            operation: rebased.clone(),
        });

        while self.history.len() > self.config.max_history {
            if let Some(pruned) = self.history.pop_front() {
                log::debug!("Pruned revision {} from history", pruned.number);
            }
        }

        log::debug!(
            "Applied revision {} from {author} (based on {revision}): {rebased}",
            self.revision
        );
        Ok(rebased)
    }

    /// Revisions applied after `revision`, for catching up a reconnecting
    /// peer.
    pub fn operations_since(&self, revision: u64) -> Result<Vec<Revision>> {
        Ok(self.revisions_after(revision)?.cloned().collect())
    }

    fn revisions_after(&self, revision: u64) -> Result<impl Iterator<Item = &Revision>> {
        if revision > self.revision {
            return Err(OtError::UnknownRevision {
                requested: revision,
                current: self.revision,
            });
        }

        let oldest = self.oldest_revision();
        if revision < oldest {
            return Err(OtError::RevisionPruned {
                requested: revision,
                oldest,
            });
        }

        Ok(self.history.iter().skip((revision - oldest) as usize))
    }
}
