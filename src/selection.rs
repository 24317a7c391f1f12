//! Hover-driven selection of the active record.

/// Which record is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing hovered
    #[default]
    Idle,
    /// Record at this index is hovered
    Active(usize),
}

impl SelectionState {
    /// Index of the active record, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Active(index) => Some(*index),
        }
    }
}

/// Events that drive the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Pointer entered the record at this index
    HoverEnter(usize),
    /// Pointer left the hovered record
    HoverLeave,
    /// The record list was replaced or cleared
    DataReloaded,
}

impl From<Option<usize>> for SelectionEvent {
    /// Hover streams yield `Some(index)` or `None`.
    fn from(hovered: Option<usize>) -> Self {
        match hovered {
            Some(index) => SelectionEvent::HoverEnter(index),
            None => SelectionEvent::HoverLeave,
        }
    }
}

/// Selection state machine.
///
/// Out-of-range hover requests are ignored rather than reported; the
/// controller never points past the end of the current record list.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Index of the active record, if any.
    pub fn active(&self) -> Option<usize> {
        self.state.index()
    }

    /// Apply an event given the current record count.
    ///
    /// Returns `true` if the state changed.
    pub fn apply(&mut self, event: SelectionEvent, record_count: usize) -> bool {
        let next = match event {
            SelectionEvent::HoverEnter(index) if index < record_count => {
                SelectionState::Active(index)
            }
            SelectionEvent::HoverEnter(index) => {
                log::trace!(
                    "Ignoring hover on index {} ({} records)",
                    index,
                    record_count
                );
                self.state
            }
            SelectionEvent::HoverLeave | SelectionEvent::DataReloaded => SelectionState::Idle,
        };

        let changed = next != self.state;
        if changed {
            log::debug!("Selection {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let controller = SelectionController::new();
        assert_eq!(controller.state(), SelectionState::Idle);
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn test_hover_then_leave_returns_to_idle() {
        let mut controller = SelectionController::new();
        assert!(controller.apply(SelectionEvent::HoverEnter(1), 3));
        assert_eq!(controller.state(), SelectionState::Active(1));
        assert!(controller.apply(SelectionEvent::HoverLeave, 3));
        assert_eq!(controller.state(), SelectionState::Idle);
    }

    #[test]
    fn test_out_of_range_hover_is_ignored() {
        let mut controller = SelectionController::new();
        assert!(!controller.apply(SelectionEvent::HoverEnter(3), 3));
        assert_eq!(controller.state(), SelectionState::Idle);

        controller.apply(SelectionEvent::HoverEnter(0), 3);
        assert!(!controller.apply(SelectionEvent::HoverEnter(7), 3));
        assert_eq!(controller.state(), SelectionState::Active(0));
    }

    #[test]
    fn test_hover_on_empty_list_is_ignored() {
        let mut controller = SelectionController::new();
        assert!(!controller.apply(SelectionEvent::HoverEnter(0), 0));
        assert_eq!(controller.active(), None);
    }

    #[test]
    fn test_direct_switch_between_records() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::HoverEnter(0), 2);
        assert!(controller.apply(SelectionEvent::HoverEnter(1), 2));
        assert_eq!(controller.active(), Some(1));
        assert!(!controller.apply(SelectionEvent::HoverEnter(1), 2));
    }

    #[test]
    fn test_reload_forces_idle() {
        let mut controller = SelectionController::new();
        controller.apply(SelectionEvent::HoverEnter(1), 2);
        assert!(controller.apply(SelectionEvent::DataReloaded, 5));
        assert_eq!(controller.state(), SelectionState::Idle);
        assert!(!controller.apply(SelectionEvent::DataReloaded, 5));
    }

    #[test]
    fn test_hover_stream_conversion() {
        assert_eq!(SelectionEvent::from(Some(4)), SelectionEvent::HoverEnter(4));
        assert_eq!(SelectionEvent::from(None), SelectionEvent::HoverLeave);
    }
}
