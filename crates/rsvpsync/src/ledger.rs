//! Store-backed RSVP ledger.
//!
//! The whole ledger is one document under [`LEDGER_KEY`]. Every append is a
//! read-modify-write of that document. With conditional writes the write is
//! a compare-and-swap that retries on conflict; without them, two concurrent
//! appends to the same document can lose one update.

use std::sync::Arc;

use rsvpsync_core::error::ServiceError;
use rsvpsync_core::ledger::{
    parse_ledger, serialize_ledger, validate_rsvp, AppendOutcome, LedgerDocument, LedgerError,
    Rsvp,
};
use rsvpsync_core::store::{CasOutcome, KvStore, LEDGER_KEY};

/// How the updated document is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Plain overwrite. Last writer wins.
    Unconditional,
    /// Compare-and-swap against the bytes that were read, retried up to
    /// `max_attempts` times.
    Conditional { max_attempts: u32 },
}

pub struct Ledger {
    store: Arc<dyn KvStore>,
    mode: WriteMode,
}

impl Ledger {
    /// Creates a ledger over `store`.
    ///
    /// Conditional writes are used only when requested and supported by the
    /// store.
    pub fn new(store: Arc<dyn KvStore>, conditional_writes: bool, max_attempts: u32) -> Self {
        let mode = match (conditional_writes, store.supports_conditional_writes()) {
            (true, true) => WriteMode::Conditional {
                max_attempts: max_attempts.max(1),
            },
            (true, false) => {
                tracing::warn!("Store has no conditional writes, ledger updates may be lost");
                WriteMode::Unconditional
            }
            (false, _) => WriteMode::Unconditional,
        };

        Self { store, mode }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Reads and validates the current document. An absent document is empty.
    pub async fn snapshot(&self) -> Result<LedgerDocument, ServiceError> {
        let (document, _) = self.read().await?;
        Ok(document)
    }

    /// Records `raw_name` for `event_id` unless it is already listed.
    pub async fn append(
        &self,
        event_id: Option<&str>,
        raw_name: Option<&str>,
    ) -> Result<AppendOutcome, ServiceError> {
        let rsvp = validate_rsvp(event_id, raw_name)?;

        let outcome = match self.mode {
            WriteMode::Unconditional => self.append_unconditional(&rsvp).await?,
            WriteMode::Conditional { max_attempts } => {
                self.append_conditional(&rsvp, max_attempts).await?
            }
        };

        tracing::info!(
            event_id = %rsvp.event_id(),
            added = outcome.is_added(),
            "RSVP recorded"
        );
        Ok(outcome)
    }

    async fn append_unconditional(&self, rsvp: &Rsvp) -> Result<AppendOutcome, ServiceError> {
        let (mut document, _) = self.read().await?;

        let outcome = document.append(rsvp);
        if outcome.is_added() {
            let bytes = serialize_ledger(&document)?;
            self.store.put(LEDGER_KEY, &bytes).await?;
        }

        Ok(outcome)
    }

    async fn append_conditional(
        &self,
        rsvp: &Rsvp,
        max_attempts: u32,
    ) -> Result<AppendOutcome, ServiceError> {
        for attempt in 1..=max_attempts {
            let (mut document, current) = self.read().await?;

            let outcome = document.append(rsvp);
            if !outcome.is_added() {
                return Ok(outcome);
            }

            let bytes = serialize_ledger(&document)?;
            match self
                .store
                .compare_and_swap(LEDGER_KEY, current.as_deref(), &bytes)
                .await?
            {
                CasOutcome::Swapped => return Ok(outcome),
                CasOutcome::Conflict => {
                    tracing::debug!(attempt, max_attempts, "Ledger write conflict, retrying");
                }
            }
        }

        tracing::error!(max_attempts, "Ledger write abandoned after repeated conflicts");
        Err(LedgerError::Contention(max_attempts).into())
    }

    async fn read(&self) -> Result<(LedgerDocument, Option<Vec<u8>>), ServiceError> {
        let bytes = self.store.get(LEDGER_KEY).await?;

        let document = match &bytes {
            Some(bytes) => parse_ledger(bytes).map_err(|e| {
                tracing::error!(error = %e, "Stored ledger failed validation");
                e
            })?,
            None => LedgerDocument::new(),
        };

        Ok((document, bytes))
    }
}
