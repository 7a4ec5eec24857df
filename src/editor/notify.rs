use crate::document::BlockKey;

/// Part of the document the host must re-render after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderScope {
    /// The top-level block sequence changed.
    Document,
    /// Only the given block and its descendants changed.
    Subtree(BlockKey),
}

/// Host hooks invoked after every successful mutation.
///
/// Nothing is called when an operation is refused.
pub trait ChangeNotifier {
    fn partial_render(&mut self, scope: &RenderScope);

    fn dispatch_change(&mut self);

    fn dispatch_selection_change(&mut self);
}

/// Notifier for sessions without a rendering host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn partial_render(&mut self, _scope: &RenderScope) {}

    fn dispatch_change(&mut self) {}

    fn dispatch_selection_change(&mut self) {}
}

/// A hook call recorded by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Render(RenderScope),
    Change,
    SelectionChange,
}

/// Notifier that records every hook call in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingNotifier {
    events: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Notification] {
        &self.events
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.events)
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn partial_render(&mut self, scope: &RenderScope) {
        self.events.push(Notification::Render(scope.clone()));
    }

    fn dispatch_change(&mut self) {
        self.events.push(Notification::Change);
    }

    fn dispatch_selection_change(&mut self) {
        self.events.push(Notification::SelectionChange);
    }
}
