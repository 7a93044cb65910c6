/// Page-level selection state for the project modal
///
/// The page owns "which project is selected" and "is the modal open".
/// Closing happens in two phases: the modal is hidden at once, but the
/// selected project is kept until the exit transition has finished and
/// the matching [`CloseTicket`] comes back.
use std::sync::Arc;

use super::data::Project;

/// Token for a pending "clear the selection" timer.
///
/// Only the ticket issued by the latest close request can finish a close;
/// older ones are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTicket(u64);

/// Where the host is in the open/close cycle
#[derive(Debug, Clone, PartialEq)]
pub enum HostPhase {
    /// Nothing selected
    Closed,
    /// Modal visible for this project
    Open(Arc<Project>),
    /// Modal hidden, project retained until the ticket fires
    Closing {
        project: Arc<Project>,
        ticket: CloseTicket,
    },
}

/// Holds the current selection and drives the two-phase close
#[derive(Debug)]
pub struct ModalHost {
    phase: HostPhase,
    next_ticket: u64,
}

impl Default for ModalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalHost {
    pub fn new() -> Self {
        Self {
            phase: HostPhase::Closed,
            next_ticket: 0,
        }
    }

    /// Select a project and open the modal.
    ///
    /// Opening while a previous close is pending cancels that close: its
    /// ticket becomes stale.
    pub fn open(&mut self, project: Arc<Project>) {
        tracing::debug!(id = project.id, "modal open");
        self.phase = HostPhase::Open(project);
    }

    /// Hide the modal and start the deferred clear.
    ///
    /// Returns the ticket the caller must hand back to [`finish_close`]
    /// once the exit delay has elapsed. Returns `None` when the modal was
    /// not open (nothing to close, no timer needed).
    ///
    /// [`finish_close`]: ModalHost::finish_close
    pub fn request_close(&mut self) -> Option<CloseTicket> {
        let project = match &self.phase {
            HostPhase::Open(project) => Arc::clone(project),
            HostPhase::Closing { .. } | HostPhase::Closed => return None,
        };

        self.next_ticket += 1;
        let ticket = CloseTicket(self.next_ticket);
        tracing::debug!(id = project.id, "modal closing");
        self.phase = HostPhase::Closing { project, ticket };
        Some(ticket)
    }

    /// Second phase of a close: drop the selection if `ticket` is current.
    ///
    /// Returns true when the selection was actually cleared.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        match &self.phase {
            HostPhase::Closing { ticket: pending, .. } if *pending == ticket => {
                tracing::debug!("modal closed, selection released");
                self.phase = HostPhase::Closed;
                true
            }
            _ => false,
        }
    }

    /// Abrupt teardown: release everything immediately, whatever the phase.
    ///
    /// Any outstanding ticket becomes stale.
    pub fn teardown(&mut self) {
        self.phase = HostPhase::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, HostPhase::Open(_))
    }

    /// The selected project, kept alive through the closing phase
    pub fn selected(&self) -> Option<&Arc<Project>> {
        match &self.phase {
            HostPhase::Open(project) | HostPhase::Closing { project, .. } => Some(project),
            HostPhase::Closed => None,
        }
    }
}
