//! Inbound port: the view of a candidate message.

use shared_types::SubspaceId;

/// A message presented to an authorization for acceptance.
pub trait ScopedMsg {
    /// Fully qualified type URL of the message.
    fn type_url(&self) -> &str;

    /// The single subspace the message targets.
    ///
    /// `None` means the message cannot be scoped to a subspace.
    fn scoped_subspace_id(&self) -> Option<SubspaceId> {
        None
    }
}
