//! Handler chain result type.

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; the update has been handled.
    Stop,
    /// Skip this handler, try next.
    Ignore,
}
