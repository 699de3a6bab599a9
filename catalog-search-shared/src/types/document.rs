//! Document identifier capability for indexable types.

use serde::Serialize;

/// A record that can be stored in the search engine.
///
/// Implementors supply the identifier used as the engine document id, so
/// repeated writes with the same identifier overwrite rather than duplicate.
/// The serialized form of the implementor must carry the same identifier it
/// reports here.
pub trait SearchDocument: Serialize {
    /// Identifier used as the engine document id.
    fn document_id(&self) -> String;
}
