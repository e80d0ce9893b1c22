//! Modal open/close lifecycle.
//!
//! Closing is not immediate: the modal stays rendered in `Closing` while the
//! host plays its close animation, and only reaches `Closed` once the host
//! reports `animation_finished`.

use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
    Closing,
}

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalLifecycle {
    state: ModalState,
}

impl ModalLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened() -> Self {
        ModalLifecycle {
            state: ModalState::Open,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    /// Whether the host should render the modal at all.
    pub fn is_rendered(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Apply the caller's open flag. Only a change from open to not-open
    /// starts the close animation; repeating `false` does nothing.
    pub fn set_open(&mut self, open: bool) {
        let next = match (self.state, open) {
            (_, true) => ModalState::Open,
            (ModalState::Open, false) => ModalState::Closing,
            (state, false) => state,
        };
        self.transition(next);
    }

    pub fn request_close(&mut self) {
        self.set_open(false);
    }

    pub fn handle_key(&mut self, key: Key) {
        if key == Key::Escape && self.is_open() {
            self.request_close();
        }
    }

    /// The host's close animation has ended.
    pub fn animation_finished(&mut self) {
        if self.state == ModalState::Closing {
            self.transition(ModalState::Closed);
        }
    }

    fn transition(&mut self, next: ModalState) {
        if next != self.state {
            trace!(from = ?self.state, to = ?next, "modal transition");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_unrendered() {
        let modal = ModalLifecycle::new();
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_rendered());
    }

    #[test]
    fn close_waits_for_animation() {
        let mut modal = ModalLifecycle::new();
        modal.set_open(true);
        assert!(modal.is_open());

        modal.set_open(false);
        assert_eq!(modal.state(), ModalState::Closing);
        assert!(modal.is_rendered());

        modal.animation_finished();
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_rendered());
    }

    #[test]
    fn closing_is_edge_triggered() {
        let mut modal = ModalLifecycle::new();
        modal.set_open(false);
        assert_eq!(modal.state(), ModalState::Closed);

        modal.set_open(true);
        modal.set_open(false);
        modal.animation_finished();
        modal.set_open(false);
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut modal = ModalLifecycle::opened();
        modal.handle_key(Key::Other);
        assert!(modal.is_open());

        modal.handle_key(Key::Escape);
        assert_eq!(modal.state(), ModalState::Closing);

        modal.handle_key(Key::Escape);
        assert_eq!(modal.state(), ModalState::Closing);
    }

    #[test]
    fn reopening_during_close_animation() {
        let mut modal = ModalLifecycle::opened();
        modal.request_close();
        modal.set_open(true);
        assert!(modal.is_open());

        // A stale animation-end from the aborted close is ignored.
        modal.animation_finished();
        assert!(modal.is_open());
    }

    #[test]
    fn animation_end_while_open_is_ignored() {
        let mut modal = ModalLifecycle::opened();
        modal.animation_finished();
        assert!(modal.is_open());
    }
}
