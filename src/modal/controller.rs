use std::sync::Arc;

use crate::state::data::Project;

use super::content::{FocusTarget, ModalContent};
use super::gallery::GalleryCursor;
use super::keyboard::{FocusRequest, KeyListeners, KeyOutcome, KeyboardContract, ModalKey};

/// Signals the dialog sends to its host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Backdrop click, close control or Escape
    Close,
    /// A link action was activated; the URL is passed through verbatim
    OpenLink(String),
}

/// Where a pointer press landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

/// The project detail dialog.
///
/// A pure function of `(project, is_open)` plus the gallery cursor; the
/// host calls [`sync`](ProjectModal::sync) after every change to either
/// input so the cursor and the keyboard contract follow along.
#[derive(Debug)]
pub struct ProjectModal {
    gallery: GalleryCursor,
    shown: Option<Arc<Project>>,
    keyboard: KeyboardContract,
}

impl ProjectModal {
    pub fn new(listeners: KeyListeners) -> Self {
        Self {
            gallery: GalleryCursor::new(),
            shown: None,
            keyboard: KeyboardContract::new(listeners),
        }
    }

    /// Follow the host's inputs.
    ///
    /// A different project (by identity) resets the gallery, whether or
    /// not the dialog is open. Becoming visible activates the keyboard
    /// contract and returns the delayed-focus token; becoming hidden
    /// releases the listeners immediately.
    pub fn sync(&mut self, project: Option<&Arc<Project>>, is_open: bool) -> Option<FocusRequest> {
        let changed = match (&self.shown, project) {
            (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        };
        if changed {
            self.gallery.reset();
            self.shown = project.cloned();
        }

        match self.render(project.map(Arc::as_ref), is_open) {
            Some(content) => self.keyboard.activate(Some(&content)),
            None => {
                self.keyboard.deactivate();
                None
            }
        }
    }

    /// The dialog's content, or `None` when nothing should be shown
    pub fn render<'a>(&self, project: Option<&'a Project>, is_open: bool) -> Option<ModalContent<'a>> {
        match project {
            Some(project) if is_open => Some(ModalContent::build(project, self.gallery)),
            _ => None,
        }
    }

    /// Pointer press on the overlay
    pub fn click(&self, target: ClickTarget) -> Option<ModalAction> {
        match target {
            ClickTarget::Backdrop if self.keyboard.is_active() => Some(ModalAction::Close),
            _ => None,
        }
    }

    /// Gallery indicator picked
    pub fn select_image(&mut self, index: usize) {
        let len = self.gallery_len();
        if self.gallery.select(index, len) {
            self.refresh_focusables();
        }
    }

    /// Activate a focusable element (click or Enter)
    pub fn activate(&mut self, target: FocusTarget) -> Option<ModalAction> {
        if !self.keyboard.is_active() {
            return None;
        }
        self.keyboard.focus(target);
        match target {
            FocusTarget::CloseButton => Some(ModalAction::Close),
            FocusTarget::Indicator(index) => {
                self.select_image(index);
                None
            }
            FocusTarget::Link(kind) => {
                let project = self.shown.as_ref()?;
                ModalContent::build(project, self.gallery)
                    .link_url(kind)
                    .map(|url| ModalAction::OpenLink(url.to_string()))
            }
        }
    }

    /// Keyboard input while the dialog is open
    pub fn handle_key(&mut self, key: ModalKey) -> Option<ModalAction> {
        if !self.keyboard.is_active() {
            return None;
        }
        match key {
            ModalKey::Left => {
                let len = self.gallery_len();
                self.gallery.previous(len);
                self.refresh_focusables();
                None
            }
            ModalKey::Right => {
                let len = self.gallery_len();
                self.gallery.next(len);
                self.refresh_focusables();
                None
            }
            ModalKey::Activate => {
                let target = self.keyboard.focused()?;
                self.activate(target)
            }
            _ => match self.keyboard.handle_key(key) {
                KeyOutcome::Close => Some(ModalAction::Close),
                KeyOutcome::Focus(_) | KeyOutcome::Ignored => None,
            },
        }
    }

    /// Delayed initial focus; stale or late requests do nothing
    pub fn apply_initial_focus(&mut self, request: FocusRequest) -> Option<FocusTarget> {
        self.keyboard.apply_initial_focus(request)
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.keyboard.focused()
    }

    pub fn gallery_index(&self) -> usize {
        self.gallery.index()
    }

    fn gallery_len(&self) -> usize {
        self.shown.as_ref().map_or(0, |project| project.gallery.len())
    }

    fn refresh_focusables(&mut self) {
        if let Some(project) = self.shown.as_ref() {
            let content = ModalContent::build(project, self.gallery);
            self.keyboard.refresh(&content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::keyboard::ListenerKind;
    use crate::state::data::{fixtures, LinkKind, StatusTreatment};
    use crate::state::host::ModalHost;
    use std::collections::HashMap;

    fn modal() -> (ProjectModal, KeyListeners) {
        let listeners = KeyListeners::new();
        (ProjectModal::new(listeners.clone()), listeners)
    }

    #[test]
    fn test_closed_or_absent_renders_nothing_and_installs_nothing() {
        let (mut modal, listeners) = modal();
        let project = Arc::new(fixtures::project(1, &["a"]));

        for _ in 0..5 {
            assert!(modal.sync(None, true).is_none());
            assert!(modal.render(None, true).is_none());
            assert!(modal.sync(Some(&project), false).is_none());
            assert!(modal.render(Some(&project), false).is_none());
        }
        assert!(listeners.is_empty());
        assert_eq!(modal.handle_key(ModalKey::Escape), None);
        assert_eq!(modal.click(ClickTarget::Backdrop), None);
    }

    #[test]
    fn test_project_change_resets_gallery() {
        let (mut modal, _) = modal();
        let first = Arc::new(fixtures::project(1, &["a", "b", "c"]));
        let second = Arc::new(fixtures::project(2, &["x", "y"]));

        modal.sync(Some(&first), true);
        modal.select_image(2);
        assert_eq!(modal.gallery_index(), 2);

        modal.sync(Some(&second), true);
        let content = modal.render(Some(&second), true).unwrap();
        assert_eq!(content.image_index, 0);
        assert_eq!(content.image, Some("x"));
    }

    #[test]
    fn test_project_change_resets_gallery_while_closed() {
        let (mut modal, _) = modal();
        let first = Arc::new(fixtures::project(1, &["a", "b"]));
        let second = Arc::new(fixtures::project(2, &["x", "y"]));

        modal.sync(Some(&first), true);
        modal.select_image(1);
        modal.sync(Some(&first), false);
        assert_eq!(modal.gallery_index(), 1);

        modal.sync(Some(&second), false);
        assert_eq!(modal.gallery_index(), 0);
    }

    #[test]
    fn test_backdrop_closes_content_does_not() {
        let (mut modal, _) = modal();
        let project = Arc::new(fixtures::project(1, &[]));
        modal.sync(Some(&project), true);

        assert_eq!(modal.click(ClickTarget::Backdrop), Some(ModalAction::Close));
        assert_eq!(modal.click(ClickTarget::Content), None);
    }

    #[test]
    fn test_escape_closes_other_keys_do_not() {
        let (mut modal, _) = modal();
        let project = Arc::new(fixtures::project(1, &["a", "b"]));
        modal.sync(Some(&project), true);

        assert_eq!(modal.handle_key(ModalKey::Escape), Some(ModalAction::Close));
        for key in [ModalKey::Other, ModalKey::Tab, ModalKey::BackTab, ModalKey::Left, ModalKey::Right] {
            assert_eq!(modal.handle_key(key), None);
        }
    }

    #[test]
    fn test_arrow_keys_step_gallery() {
        let (mut modal, _) = modal();
        let project = Arc::new(fixtures::project(1, &["a", "b", "c"]));
        modal.sync(Some(&project), true);

        modal.handle_key(ModalKey::Left);
        assert_eq!(modal.gallery_index(), 2);
        modal.handle_key(ModalKey::Right);
        assert_eq!(modal.gallery_index(), 0);
    }

    #[test]
    fn test_enter_activates_focused_element() {
        let (mut modal, _) = modal();
        let project = Arc::new(fixtures::project(1, &["a", "b"]));
        let request = modal.sync(Some(&project), true).unwrap();
        modal.apply_initial_focus(request);

        modal.handle_key(ModalKey::Tab);
        modal.handle_key(ModalKey::Tab);
        assert_eq!(modal.focused(), Some(FocusTarget::Indicator(1)));
        assert_eq!(modal.handle_key(ModalKey::Activate), None);
        assert_eq!(modal.gallery_index(), 1);

        modal.handle_key(ModalKey::Tab);
        assert_eq!(
            modal.handle_key(ModalKey::Activate),
            Some(ModalAction::OpenLink("https://github.com/x".to_string()))
        );

        modal.handle_key(ModalKey::Tab);
        assert_eq!(modal.handle_key(ModalKey::Activate), Some(ModalAction::Close));
    }

    #[test]
    fn test_released_project_end_to_end() {
        let (mut modal, listeners) = modal();
        let mut project = fixtures::project(1, &[]);
        project.links = HashMap::from([
            ("github".to_string(), "g".to_string()),
            ("demo".to_string(), "d".to_string()),
        ]);
        project.challenges.clear();
        let project = Arc::new(project);

        modal.sync(Some(&project), true);
        let content = modal.render(Some(&project), true).unwrap();

        assert_eq!(listeners.count(ListenerKind::Escape), 1);
        assert_eq!(content.status, StatusTreatment::Released);
        assert_eq!(content.links, vec![(LinkKind::Github, "g"), (LinkKind::Demo, "d")]);
        assert!(content.challenges.is_none());
        assert!(content.achievements.is_some());
    }

    #[test]
    fn test_close_sequence_with_host() {
        let (mut modal, listeners) = modal();
        let mut host = ModalHost::new();
        let project = Arc::new(fixtures::project(1, &["a", "b"]));

        host.open(Arc::clone(&project));
        let request = modal.sync(host.selected(), host.is_open());
        assert!(request.is_some());
        assert_eq!(listeners.len(), 2);

        // Escape -> host close request
        assert_eq!(modal.handle_key(ModalKey::Escape), Some(ModalAction::Close));
        let ticket = host.request_close().unwrap();
        modal.sync(host.selected(), host.is_open());

        // Listeners gone at once, project retained for the exit transition
        assert!(listeners.is_empty());
        assert!(host.selected().is_some());
        assert!(modal.render(host.selected().map(Arc::as_ref), host.is_open()).is_none());

        // Late focus timer firing after close is harmless
        assert_eq!(modal.apply_initial_focus(request.unwrap()), None);

        assert!(host.finish_close(ticket));
        modal.sync(host.selected(), host.is_open());
        assert!(host.selected().is_none());
        assert!(listeners.is_empty());

        // Reopening installs exactly one fresh set
        host.open(project);
        modal.sync(host.selected(), host.is_open());
        assert_eq!(listeners.len(), 2);
    }
}
