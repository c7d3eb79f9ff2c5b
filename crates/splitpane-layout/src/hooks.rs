//! Lifecycle notifications consumed by the host.

/// Callbacks fired by [`crate::SplitPaneEngine`].
///
/// Every method has a no-op default, so hosts implement only what they use.
/// Slices are borrowed for the duration of the call; clone them to keep them.
pub trait SplitPaneHooks {
    /// A drag session opened.
    fn on_drag_started(&mut self) {}

    /// Extents visible to the renderer changed. During a drag these are the
    /// in-progress extents.
    fn on_change(&mut self, _extents: &[f64]) {}

    /// A drag committed; `extents` are the new committed extents.
    fn on_save_sizes(&mut self, _extents: &[f64]) {}

    /// Collapse state changed. One entry per pane: the stored pre-collapse
    /// extent for collapsed panes, `None` otherwise.
    fn on_collapse(&mut self, _collapsed: &[Option<f64>]) {}
}

impl SplitPaneHooks for () {}

impl<H: SplitPaneHooks + ?Sized> SplitPaneHooks for &mut H {
    fn on_drag_started(&mut self) {
        (**self).on_drag_started();
    }

    fn on_change(&mut self, extents: &[f64]) {
        (**self).on_change(extents);
    }

    fn on_save_sizes(&mut self, extents: &[f64]) {
        (**self).on_save_sizes(extents);
    }

    fn on_collapse(&mut self, collapsed: &[Option<f64>]) {
        (**self).on_collapse(collapsed);
    }
}

impl<H: SplitPaneHooks + ?Sized> SplitPaneHooks for Box<H> {
    fn on_drag_started(&mut self) {
        (**self).on_drag_started();
    }

    fn on_change(&mut self, extents: &[f64]) {
        (**self).on_change(extents);
    }

    fn on_save_sizes(&mut self, extents: &[f64]) {
        (**self).on_save_sizes(extents);
    }

    fn on_collapse(&mut self, collapsed: &[Option<f64>]) {
        (**self).on_collapse(collapsed);
    }
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    DragStarted,
    Change(Vec<f64>),
    SaveSizes(Vec<f64>),
    Collapse(Vec<Option<f64>>),
}

/// Hooks that keep every notification in order. Useful for tests and for
/// hosts that drain notifications after each dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedHooks {
    pub events: Vec<HookEvent>,
}

impl RecordedHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<HookEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recent extents reported through `on_change`.
    #[must_use]
    pub fn last_change(&self) -> Option<&[f64]> {
        self.events.iter().rev().find_map(|event| match event {
            HookEvent::Change(extents) => Some(extents.as_slice()),
            _ => None,
        })
    }
}

impl SplitPaneHooks for RecordedHooks {
    fn on_drag_started(&mut self) {
        self.events.push(HookEvent::DragStarted);
    }

    fn on_change(&mut self, extents: &[f64]) {
        self.events.push(HookEvent::Change(extents.to_vec()));
    }

    fn on_save_sizes(&mut self, extents: &[f64]) {
        self.events.push(HookEvent::SaveSizes(extents.to_vec()));
    }

    fn on_collapse(&mut self, collapsed: &[Option<f64>]) {
        self.events.push(HookEvent::Collapse(collapsed.to_vec()));
    }
}
