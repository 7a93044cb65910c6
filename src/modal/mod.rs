/// Project detail dialog
///
/// - `gallery.rs` - bounded cursor over a project's gallery
/// - `content.rs` - what the dialog shows for one project
/// - `keyboard.rs` - Escape/Tab handling and the listener guards
/// - `controller.rs` - ties the three together behind `(project, is_open)`

pub mod content;
pub mod controller;
pub mod gallery;
pub mod keyboard;

pub use content::{FocusTarget, ModalContent};
pub use controller::{ClickTarget, ModalAction, ProjectModal};
pub use keyboard::{FocusRequest, KeyListeners, ModalKey};
