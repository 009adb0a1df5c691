use super::*;

/// A request/response exchange that has been initiated but not completed.
///
/// The target selector is captured at initiation time; it is resolved against
/// the document only when the response arrives, so swaps tolerate markup that
/// changed in between.
#[derive(Debug, Clone)]
pub(crate) struct PendingExchange {
    pub(crate) origin: NodeId,
    pub(crate) target: String,
}
