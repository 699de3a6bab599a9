//! Outcome types for engine write operations.

/// Completed engine response to a single-document write or delete.
///
/// Only requests that completed produce a `WriteAck`; requests that never
/// completed surface as [`crate::SearchError::TransportError`] instead. The
/// distinction drives the retry policy: rejected acks are retried, transport
/// errors are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAck {
    /// The document was created (HTTP 201).
    Created,
    /// The request completed with HTTP 200 (replaced or deleted).
    Ok,
    /// The request completed with any other status.
    Rejected {
        /// HTTP status code reported by the engine.
        status: u16,
        /// Raw response body, kept for logging.
        body: String,
    },
}

impl WriteAck {
    /// Returns true for the acknowledged statuses.
    pub fn is_success(&self) -> bool {
        matches!(self, WriteAck::Created | WriteAck::Ok)
    }
}

/// Aggregate result of one batched write or delete request.
///
/// `status_ok` is the caller-visible verdict: the top-level HTTP status of
/// the batch response. The engine may still report individual sub-operation
/// failures inside a nominally successful batch; those are counted in
/// `failed_items` so they can be logged, but they do not change the verdict.
/// A successful outcome is not an atomicity guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Whether the top-level batch response status was a success.
    pub status_ok: bool,
    /// Number of sub-operations the engine reported as failed.
    pub failed_items: usize,
}

impl BulkOutcome {
    /// A fully successful outcome.
    pub fn ok() -> Self {
        Self {
            status_ok: true,
            failed_items: 0,
        }
    }

    /// Returns true if any sub-operation failed.
    pub fn has_failures(&self) -> bool {
        self.failed_items > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ack_success() {
        assert!(WriteAck::Created.is_success());
        assert!(WriteAck::Ok.is_success());
        assert!(!WriteAck::Rejected {
            status: 429,
            body: String::new()
        }
        .is_success());
    }

    #[test]
    fn test_bulk_outcome() {
        assert!(!BulkOutcome::ok().has_failures());
        let outcome = BulkOutcome {
            status_ok: true,
            failed_items: 2,
        };
        assert!(outcome.has_failures());
        assert!(outcome.status_ok);
    }
}
