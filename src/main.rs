use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{canvas, container, scrollable, stack};
use iced::{event, mouse, Event, Length, Point, Subscription};
use iced::{Element, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod assets;
mod config;
mod logging;
mod modal;
mod state;
mod ui;

use assets::AssetResolver;
use config::Settings;
use modal::{ClickTarget, FocusRequest, FocusTarget, KeyListeners, ModalAction, ModalKey, ProjectModal};
use state::catalog::Catalog;
use state::host::{CloseTicket, ModalHost};

/// Background animation rate
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Main application state
struct Portfolio {
    settings: Settings,
    /// Read-only project catalog, loaded once at startup
    catalog: Catalog,
    assets: AssetResolver,
    /// Generated card thumbnails by project ID
    thumbnails: HashMap<u32, PathBuf>,
    /// Page-level selection (which project, is the modal open)
    host: ModalHost,
    /// The detail dialog and its keyboard contract
    modal: ProjectModal,
    /// Installed key listeners; keyboard events are only subscribed to
    /// while this is non-empty
    listeners: KeyListeners,
    background: ui::background::ParticleField,
    /// Startup time, for the hero entrance
    started: Instant,
    /// Latest animation frame
    now: Instant,
    /// When the dialog last opened, for its entrance
    opened_at: Option<Instant>,
    /// Message shown under the hero when something went wrong at startup
    status: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A project card was pressed
    ProjectSelected(u32),
    /// Press on the dimmed area around the dialog
    BackdropPressed,
    /// Press inside the dialog panel
    DialogPressed,
    /// Close control, gallery indicator or link action pressed
    FocusTargetPressed(FocusTarget),
    /// Key delivered by the modal's listeners
    ModalKeyPressed(ModalKey),
    /// The entry delay of an opened dialog has elapsed
    InitialFocusDue(FocusRequest),
    /// The exit transition has finished; the selection may be dropped
    CloseDelayElapsed(CloseTicket),
    /// Outbound link outside the dialog (contact section)
    OpenLink(String),
    /// Background thumbnail generation finished
    ThumbnailsReady(Vec<(u32, PathBuf)>),
    /// Animation frame for the background
    Tick(Instant),
    PointerMoved(Point),
}

impl Portfolio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        let (catalog, status) = match Catalog::load(&settings.catalog_path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                // The page still renders, just without projects
                tracing::error!(error = %e, "could not load the project catalog");
                (Catalog::default(), Some(format!("⚠️ {}", e)))
            }
        };

        let app = Self::with_catalog(settings, catalog, status);
        tracing::info!(
            "🎨 Portfolio initialized with {} projects and {} particles",
            app.catalog.len(),
            app.background.len()
        );

        let thumbnail_jobs: Vec<(u32, PathBuf)> = app
            .catalog
            .projects()
            .iter()
            .filter_map(|project| {
                let reference = Some(project.image.as_str()).filter(|r| !r.is_empty())?;
                let path = app.assets.to_path(reference).filter(|path| path.is_file())?;
                Some((project.id, path))
            })
            .collect();

        let task = if thumbnail_jobs.is_empty() {
            Task::none()
        } else {
            Task::perform(
                assets::thumbnail::generate_thumbnails(
                    thumbnail_jobs,
                    Settings::thumbnail_cache_dir(),
                    app.settings.thumbnail_size,
                ),
                Message::ThumbnailsReady,
            )
        };

        (app, task)
    }

    /// Application state around an already loaded catalog
    fn with_catalog(settings: Settings, catalog: Catalog, status: Option<String>) -> Self {
        let assets = AssetResolver::new(&settings.asset_root, &settings.placeholder);
        let listeners = KeyListeners::new();
        let now = Instant::now();

        Portfolio {
            background: ui::background::ParticleField::new(settings.particle_count),
            modal: ProjectModal::new(listeners.clone()),
            listeners,
            settings,
            catalog,
            assets,
            thumbnails: HashMap::new(),
            host: ModalHost::new(),
            started: now,
            now,
            opened_at: None,
            status,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ProjectSelected(id) => {
                let Some(project) = self.catalog.get(id).map(Arc::clone) else {
                    tracing::warn!(id, "selected project is not in the catalog");
                    return Task::none();
                };
                self.host.open(project);
                self.opened_at = Some(self.now);
                self.sync_modal()
            }
            Message::BackdropPressed => {
                let action = self.modal.click(ClickTarget::Backdrop);
                self.perform(action)
            }
            Message::DialogPressed => {
                let action = self.modal.click(ClickTarget::Content);
                self.perform(action)
            }
            Message::FocusTargetPressed(target) => {
                let action = self.modal.activate(target);
                self.perform(action)
            }
            Message::ModalKeyPressed(key) => {
                let action = self.modal.handle_key(key);
                self.perform(action)
            }
            Message::InitialFocusDue(request) => {
                // May arrive after the dialog closed; then nothing happens
                if let Some(target) = self.modal.apply_initial_focus(request) {
                    tracing::debug!(?target, "initial focus");
                }
                Task::none()
            }
            Message::CloseDelayElapsed(ticket) => {
                if self.host.finish_close(ticket) {
                    self.sync_modal()
                } else {
                    Task::none()
                }
            }
            Message::OpenLink(url) => {
                ui::open_url(&url);
                Task::none()
            }
            Message::ThumbnailsReady(generated) => {
                self.thumbnails.extend(generated);
                Task::none()
            }
            Message::Tick(now) => {
                self.now = now;
                self.background.tick(now);
                Task::none()
            }
            Message::PointerMoved(position) => {
                self.background.pointer_moved(position);
                Task::none()
            }
        }
    }

    /// Carry out what the dialog asked for
    fn perform(&mut self, action: Option<ModalAction>) -> Task<Message> {
        match action {
            Some(ModalAction::Close) => self.close_modal(),
            Some(ModalAction::OpenLink(url)) => {
                ui::open_url(&url);
                Task::none()
            }
            None => Task::none(),
        }
    }

    /// First phase of closing: hide the dialog and drop its listeners now,
    /// keep the project until the exit delay has passed.
    fn close_modal(&mut self) -> Task<Message> {
        let Some(ticket) = self.host.request_close() else {
            return Task::none();
        };
        let sync = self.sync_modal();
        Task::batch([
            sync,
            delay(self.settings.close_delay(), Message::CloseDelayElapsed(ticket)),
        ])
    }

    /// Push the host's selection into the dialog; schedules the delayed
    /// initial focus when the dialog has just opened.
    fn sync_modal(&mut self) -> Task<Message> {
        match self.modal.sync(self.host.selected(), self.host.is_open()) {
            Some(request) => delay(self.settings.focus_delay(), Message::InitialFocusDue(request)),
            None => Task::none(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page = ui::page::view(
            &self.catalog,
            &self.thumbnails,
            &self.assets,
            self.status.as_deref(),
            self.entrance(Some(self.started), ui::HERO_ENTRANCE),
        );

        let base: Element<Message> = container(stack![
            canvas(&self.background)
                .width(Length::Fill)
                .height(Length::Fill),
            scrollable(page).width(Length::Fill).height(Length::Fill),
        ])
        .style(|_theme| container::Style {
            background: Some(ui::BACKGROUND.into()),
            ..container::Style::default()
        })
        .into();

        let selected = self.host.selected().map(Arc::as_ref);
        match self.modal.render(selected, self.host.is_open()) {
            Some(content) => {
                let entrance = self.entrance(self.opened_at, ui::DIALOG_ENTRANCE);
                ui::modal::overlay(
                    base,
                    ui::modal::view(&content, self.modal.focused(), &self.assets, entrance),
                    entrance,
                )
            }
            None => base,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            iced::time::every(FRAME_INTERVAL).map(Message::Tick),
            event::listen_with(pointer_moved),
        ];

        if self.wants_keys() {
            subscriptions.push(keyboard::on_key_press(modal_key));
        }

        Subscription::batch(subscriptions)
    }

    /// Key listeners exist only while the dialog's contract is active
    fn wants_keys(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Entrance progress of something shown at `since`
    fn entrance(&self, since: Option<Instant>, span: Duration) -> f32 {
        since.map_or(1.0, |since| {
            ui::reveal(self.now.saturating_duration_since(since), span)
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl Drop for Portfolio {
    fn drop(&mut self) {
        // Pending timers die with the runtime; release the selection and listeners now
        self.host.teardown();
        self.modal.sync(None, false);
    }
}

/// Deliver `message` after `duration`
fn delay(duration: Duration, message: Message) -> Task<Message> {
    Task::perform(tokio::time::sleep(duration), move |()| message.clone())
}

/// Decode a key press for the dialog
fn modal_key(key: Key, modifiers: Modifiers) -> Option<Message> {
    let key = match key.as_ref() {
        Key::Named(key::Named::Escape) => ModalKey::Escape,
        Key::Named(key::Named::Tab) if modifiers.shift() => ModalKey::BackTab,
        Key::Named(key::Named::Tab) => ModalKey::Tab,
        Key::Named(key::Named::ArrowLeft) => ModalKey::Left,
        Key::Named(key::Named::ArrowRight) => ModalKey::Right,
        Key::Named(key::Named::Enter | key::Named::Space) => ModalKey::Activate,
        _ => ModalKey::Other,
    };
    Some(Message::ModalKeyPressed(key))
}

fn pointer_moved(event: Event, _status: event::Status, _window: iced::window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::PointerMoved(position)),
        _ => None,
    }
}

fn main() -> iced::Result {
    logging::init_logging();

    iced::application("Portfolio", Portfolio::update, Portfolio::view)
        .subscription(Portfolio::subscription)
        .theme(Portfolio::theme)
        .centered()
        .run_with(Portfolio::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures;

    fn portfolio() -> Portfolio {
        let catalog = Catalog::from_parts(
            vec![fixtures::project(1, &["/a.png", "/b.png"]), fixtures::project(2, &[])],
            Default::default(),
        );
        Portfolio::with_catalog(Settings::default(), catalog, None)
    }

    /// Timers are created on the tokio runtime, so updates run inside one
    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    #[test]
    fn test_opening_installs_key_listeners() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = portfolio();
        assert!(!app.wants_keys());

        let _ = app.update(Message::ProjectSelected(1));

        assert!(app.host.is_open());
        assert!(app.wants_keys());
        assert_eq!(app.host.selected().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_escape_releases_listeners_and_keeps_project_while_closing() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = portfolio();
        let _ = app.update(Message::ProjectSelected(1));

        let _ = app.update(Message::ModalKeyPressed(ModalKey::Escape));

        assert!(!app.host.is_open());
        assert!(!app.wants_keys());
        assert!(app.listeners.is_empty());
        // Still selected until the close delay elapses
        assert_eq!(app.host.selected().map(|p| p.id), Some(1));
        // Further keys are ignored
        let _ = app.update(Message::ModalKeyPressed(ModalKey::Escape));
        assert!(app.listeners.is_empty());
    }

    #[test]
    fn test_dialog_press_keeps_modal_open_backdrop_closes_it() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = portfolio();
        let _ = app.update(Message::ProjectSelected(2));

        let _ = app.update(Message::DialogPressed);
        assert!(app.host.is_open());

        let _ = app.update(Message::BackdropPressed);
        assert!(!app.host.is_open());
        assert!(!app.wants_keys());
    }

    #[test]
    fn test_unknown_project_is_ignored() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = portfolio();

        let _ = app.update(Message::ProjectSelected(99));

        assert!(!app.host.is_open());
        assert!(!app.wants_keys());
    }

    #[test]
    fn test_dialog_entrance_ramps_with_ticks() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = portfolio();
        let _ = app.update(Message::ProjectSelected(1));
        assert_eq!(app.entrance(app.opened_at, ui::DIALOG_ENTRANCE), 0.0);

        let later = app.now + ui::DIALOG_ENTRANCE;
        let _ = app.update(Message::Tick(later));
        assert_eq!(app.entrance(app.opened_at, ui::DIALOG_ENTRANCE), 1.0);
    }
}
