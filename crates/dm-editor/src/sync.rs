//! Coordinate sync port.
//!
//! A committed drag produces a `PositionChange` that is queued in the
//! `SyncOutbox`. The editor never waits on persistence: the host drains the
//! outbox, stamps the changes, sends them through a `CoordinateSync`
//! implementation and reports each result back. Failures are recorded and
//! logged, never retried.

use dm_core::{DeskId, NormPos};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

// ─── Wire Types ──────────────────────────────────────────────────────────

/// A desk moved to a new normalized position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionChange {
    pub desk_id: DeskId,
    #[serde(rename = "xN")]
    pub x_n: f64,
    #[serde(rename = "yN")]
    pub y_n: f64,
}

impl PositionChange {
    pub fn new(desk_id: DeskId, pos: NormPos) -> Self {
        Self {
            desk_id,
            x_n: pos.x_n,
            y_n: pos.y_n,
        }
    }

    pub fn position(&self) -> NormPos {
        NormPos::new(self.x_n, self.y_n)
    }
}

/// A position change stamped with the time it was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateUpdate {
    pub desk_id: DeskId,
    #[serde(rename = "xN")]
    pub x_n: f64,
    #[serde(rename = "yN")]
    pub y_n: f64,
    /// ISO-8601, supplied by the host.
    pub timestamp: String,
}

impl CoordinateUpdate {
    pub fn stamped(change: PositionChange, timestamp: &str) -> Self {
        Self {
            desk_id: change.desk_id,
            x_n: change.x_n,
            y_n: change.y_n,
            timestamp: timestamp.to_string(),
        }
    }
}

/// Several updates sent in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCoordinateUpdate {
    pub updates: Vec<CoordinateUpdate>,
    pub timestamp: String,
}

impl BatchCoordinateUpdate {
    pub fn new(changes: impl IntoIterator<Item = PositionChange>, timestamp: &str) -> Self {
        Self {
            updates: changes
                .into_iter()
                .map(|c| CoordinateUpdate::stamped(c, timestamp))
                .collect(),
            timestamp: timestamp.to_string(),
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The coordinate endpoint does not exist (HTTP 404).
    #[error("coordinate endpoint not found")]
    EndpointMissing,
    #[error("update rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Map an HTTP status to a sync result. Only 2xx counts as success.
pub fn classify_response(status: u16, reason: &str) -> Result<(), SyncError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(SyncError::EndpointMissing),
        _ => Err(SyncError::Rejected {
            status,
            reason: reason.to_string(),
        }),
    }
}

// ─── Port ────────────────────────────────────────────────────────────────

/// Persistence backend for desk coordinates.
pub trait CoordinateSync {
    fn update(&mut self, update: &CoordinateUpdate) -> Result<(), SyncError>;

    /// Send several updates. Defaults to one `update` per entry, stopping at
    /// the first failure.
    fn batch_update(&mut self, batch: &BatchCoordinateUpdate) -> Result<(), SyncError> {
        for update in &batch.updates {
            self.update(update)?;
        }
        Ok(())
    }
}

// ─── Outbox ──────────────────────────────────────────────────────────────

/// Last known sync result for a desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SyncOutcome {
    Synced,
    Failed(String),
}

/// Queue of committed position changes awaiting persistence.
#[derive(Debug, Default)]
pub struct SyncOutbox {
    pending: VecDeque<PositionChange>,
    outcomes: HashMap<DeskId, SyncOutcome>,
}

impl SyncOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: PositionChange) {
        log::trace!("queued sync for {}", change.desk_id);
        self.pending.push_back(change);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PositionChange> {
        self.pending.iter()
    }

    /// Take every pending change, oldest first.
    pub fn drain(&mut self) -> Vec<PositionChange> {
        self.pending.drain(..).collect()
    }

    /// Take every pending change, stamped with `timestamp`.
    pub fn take_stamped(&mut self, timestamp: &str) -> Vec<CoordinateUpdate> {
        self.drain()
            .into_iter()
            .map(|c| CoordinateUpdate::stamped(c, timestamp))
            .collect()
    }

    /// Record the result of sending a desk's update.
    pub fn record(&mut self, desk_id: DeskId, result: Result<(), SyncError>) {
        let outcome = match result {
            Ok(()) => SyncOutcome::Synced,
            Err(err) => {
                log::warn!("failed to sync coordinates for {desk_id}: {err}");
                SyncOutcome::Failed(err.to_string())
            }
        };
        self.outcomes.insert(desk_id, outcome);
    }

    pub fn outcome(&self, desk_id: DeskId) -> Option<&SyncOutcome> {
        self.outcomes.get(&desk_id)
    }

    /// Desks whose last sync attempt failed.
    pub fn failures(&self) -> impl Iterator<Item = (DeskId, &str)> {
        self.outcomes.iter().filter_map(|(id, outcome)| match outcome {
            SyncOutcome::Failed(msg) => Some((*id, msg.as_str())),
            SyncOutcome::Synced => None,
        })
    }

    /// Send every pending change through `sync`, one request per change.
    /// Returns how many succeeded.
    pub fn flush_with(&mut self, sync: &mut dyn CoordinateSync, timestamp: &str) -> usize {
        let mut synced = 0;
        for update in self.take_stamped(timestamp) {
            let result = sync.update(&update);
            if result.is_ok() {
                synced += 1;
            }
            self.record(update.desk_id, result);
        }
        synced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<CoordinateUpdate>,
        fail_for: Option<DeskId>,
    }

    impl CoordinateSync for Recorder {
        fn update(&mut self, update: &CoordinateUpdate) -> Result<(), SyncError> {
            if Some(update.desk_id) == self.fail_for {
                return classify_response(404, "Not Found");
            }
            self.sent.push(update.clone());
            Ok(())
        }
    }

    fn change(id: &str, x: f64, y: f64) -> PositionChange {
        PositionChange::new(DeskId::intern(id), NormPos::new(x, y))
    }

    #[test]
    fn classify_statuses() {
        assert_eq!(classify_response(200, "OK"), Ok(()));
        assert_eq!(classify_response(204, ""), Ok(()));
        assert_eq!(classify_response(404, "Not Found"), Err(SyncError::EndpointMissing));
        assert_eq!(
            classify_response(500, "Internal Server Error"),
            Err(SyncError::Rejected {
                status: 500,
                reason: "Internal Server Error".into()
            })
        );
    }

    #[test]
    fn update_json_wire_names() {
        let update = CoordinateUpdate::stamped(change("MZ001", 0.25, 0.5), "2024-01-01T00:00:00Z");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["deskId"], "MZ001");
        assert_eq!(json["xN"], 0.25);
        assert_eq!(json["yN"], 0.5);
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn batch_stamps_every_update() {
        let batch = BatchCoordinateUpdate::new(
            vec![change("b1", 0.1, 0.1), change("b2", 0.2, 0.2)],
            "t0",
        );
        assert_eq!(batch.updates.len(), 2);
        assert!(batch.updates.iter().all(|u| u.timestamp == "t0"));
    }

    #[test]
    fn flush_records_outcomes() {
        let mut outbox = SyncOutbox::new();
        outbox.push(change("ok1", 0.1, 0.2));
        outbox.push(change("bad1", 0.3, 0.4));
        let mut backend = Recorder {
            fail_for: Some(DeskId::intern("bad1")),
            ..Default::default()
        };

        let synced = outbox.flush_with(&mut backend, "now");
        assert_eq!(synced, 1);
        assert!(outbox.is_empty());
        assert_eq!(backend.sent.len(), 1);
        assert_eq!(outbox.outcome(DeskId::intern("ok1")), Some(&SyncOutcome::Synced));
        assert!(matches!(
            outbox.outcome(DeskId::intern("bad1")),
            Some(SyncOutcome::Failed(_))
        ));
        let failures: Vec<DeskId> = outbox.failures().map(|(id, _)| id).collect();
        assert_eq!(failures, vec![DeskId::intern("bad1")]);
    }

    #[test]
    fn default_batch_stops_at_first_failure() {
        let mut backend = Recorder {
            fail_for: Some(DeskId::intern("stop")),
            ..Default::default()
        };
        let batch = BatchCoordinateUpdate::new(
            vec![change("go", 0.1, 0.1), change("stop", 0.2, 0.2), change("never", 0.3, 0.3)],
            "t",
        );
        assert_eq!(backend.batch_update(&batch), Err(SyncError::EndpointMissing));
        assert_eq!(backend.sent.len(), 1);
    }
}
