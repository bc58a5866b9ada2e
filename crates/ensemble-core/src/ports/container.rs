//! Container port - the mount surface an application renders into.

/// A mount container (the DOM-node stand-in).
///
/// Exclusively owned by whichever application is currently mounted into
/// it; the orchestrator guarantees it is empty before the next `mount`
/// begins.
pub trait Container: Send + Sync {
    /// The selector descriptors refer to this container by.
    fn selector(&self) -> &str;

    /// Replace the rendered content.
    fn set_content(&self, content: &str);

    /// Current rendered content.
    fn content(&self) -> String;

    /// Remove all content.
    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.content().is_empty()
    }
}
