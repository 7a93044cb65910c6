/// Keyboard accessibility for the project dialog
///
/// While the dialog is open the contract holds two key listeners (one for
/// Escape, one for the Tab focus trap) and a ring of focusable elements.
/// Listener handles are RAII guards: going back to `Idle`, or dropping the
/// contract, releases them.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::content::{FocusTarget, ModalContent};

/// Keys the dialog reacts to, already decoded from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Tab,
    /// Shift+Tab
    BackTab,
    Left,
    Right,
    /// Enter or Space
    Activate,
    Other,
}

/// What a listener is installed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Escape,
    FocusTrap,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    installed: BTreeMap<u64, ListenerKind>,
}

/// The process-wide set of key listeners.
///
/// Cloning shares the same table. The event loop only subscribes to
/// keyboard input while this set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener; it stays installed until the guard is dropped
    pub fn attach(&self, kind: ListenerKind) -> ListenerGuard {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = table.next_id;
        table.installed.insert(id, kind);
        ListenerGuard {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of installed listeners of one kind
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.table
            .borrow()
            .installed
            .values()
            .filter(|installed| **installed == kind)
            .count()
    }
}

/// Handle to an installed listener; removes it on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    table: Weak<RefCell<ListenerTable>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().installed.remove(&self.id);
        }
    }
}

/// Token for the delayed initial focus.
///
/// Delivered back to [`KeyboardContract::apply_initial_focus`] after the
/// entry delay; stale tokens do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    generation: u64,
}

/// Result of feeding a key to the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Escape: the dialog asks its host to close
    Close,
    /// Focus moved within the trap
    Focus(FocusTarget),
    Ignored,
}

#[derive(Debug)]
struct ActiveTrap {
    _escape: ListenerGuard,
    _focus_trap: ListenerGuard,
    focusables: Vec<FocusTarget>,
    focused: Option<usize>,
    generation: u64,
}

/// Two-state machine: `Idle` (no listeners) and `Active` (listeners
/// installed, focus trapped inside the dialog).
#[derive(Debug)]
pub struct KeyboardContract {
    listeners: KeyListeners,
    active: Option<ActiveTrap>,
    generation: u64,
}

impl KeyboardContract {
    pub fn new(listeners: KeyListeners) -> Self {
        Self {
            listeners,
            active: None,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// `Idle -> Active`.
    ///
    /// Needs the rendered dialog to discover focusable elements; without it
    /// nothing is installed. Returns the token for the delayed initial focus.
    /// Calling this while already active only rediscovers the focusables.
    pub fn activate(&mut self, dialog: Option<&ModalContent<'_>>) -> Option<FocusRequest> {
        let Some(dialog) = dialog else {
            tracing::debug!("dialog not rendered, keyboard contract stays idle");
            return None;
        };

        if self.active.is_some() {
            self.refresh(dialog);
            return None;
        }

        self.generation += 1;
        self.active = Some(ActiveTrap {
            _escape: self.listeners.attach(ListenerKind::Escape),
            _focus_trap: self.listeners.attach(ListenerKind::FocusTrap),
            focusables: dialog.focusables(),
            focused: None,
            generation: self.generation,
        });
        tracing::debug!(
            generation = self.generation,
            escape = self.listeners.count(ListenerKind::Escape),
            focus_trap = self.listeners.count(ListenerKind::FocusTrap),
            "keyboard contract active"
        );

        Some(FocusRequest {
            generation: self.generation,
        })
    }

    /// Rediscover focusable elements after the dialog content changed.
    ///
    /// Focus stays on the same element when it still exists.
    pub fn refresh(&mut self, dialog: &ModalContent<'_>) {
        if let Some(trap) = self.active.as_mut() {
            let previous = trap.focused.and_then(|index| trap.focusables.get(index).copied());
            trap.focusables = dialog.focusables();
            trap.focused =
                previous.and_then(|target| trap.focusables.iter().position(|t| *t == target));
        }
    }

    /// `Active -> Idle`: drops the listener guards. No-op when idle.
    pub fn deactivate(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("keyboard contract idle");
        }
    }

    /// Move focus to the first focusable element, unless the request is
    /// stale (contract went idle or was re-activated in the meantime).
    pub fn apply_initial_focus(&mut self, request: FocusRequest) -> Option<FocusTarget> {
        let trap = self.active.as_mut()?;
        if trap.generation != request.generation || trap.focusables.is_empty() {
            return None;
        }
        trap.focused = Some(0);
        Some(trap.focusables[0])
    }

    /// Focus a specific element, e.g. after it was clicked
    pub fn focus(&mut self, target: FocusTarget) {
        if let Some(trap) = self.active.as_mut() {
            if let Some(index) = trap.focusables.iter().position(|t| *t == target) {
                trap.focused = Some(index);
            }
        }
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        let trap = self.active.as_ref()?;
        trap.focused.and_then(|index| trap.focusables.get(index).copied())
    }

    /// Escape and Tab handling. Other keys are not this contract's concern.
    pub fn handle_key(&mut self, key: ModalKey) -> KeyOutcome {
        let Some(trap) = self.active.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key {
            ModalKey::Escape => KeyOutcome::Close,
            ModalKey::Tab | ModalKey::BackTab => {
                let len = trap.focusables.len();
                if len == 0 {
                    return KeyOutcome::Ignored;
                }
                let next = match (key, trap.focused) {
                    (ModalKey::Tab, None) => 0,
                    (ModalKey::Tab, Some(index)) if index + 1 >= len => 0,
                    (ModalKey::Tab, Some(index)) => index + 1,
                    (_, None) => len - 1,
                    (_, Some(0)) => len - 1,
                    (_, Some(index)) => (index - 1).min(len - 1),
                };
                trap.focused = Some(next);
                KeyOutcome::Focus(trap.focusables[next])
            }
            _ => KeyOutcome::Ignored,
        }
    }
}
