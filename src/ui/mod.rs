/// User interface
///
/// - `page.rs` - hero, project grid, about, contact and footer
/// - `modal.rs` - project detail dialog drawn over the page
/// - `background.rs` - floating particle canvas behind everything
///
/// Shared colors and small building blocks live here.

pub mod background;
pub mod modal;
pub mod page;

use iced::widget::{container, image, text, Space};
use iced::{Border, Color, ContentFit, Element, Length};
use std::time::Duration;

use crate::assets::AssetResolver;
use crate::state::data::StatusTreatment;
use crate::Message;

pub const BACKGROUND: Color = Color { r: 0.059, g: 0.090, b: 0.165, a: 1.0 };
pub const SURFACE: Color = Color { r: 0.118, g: 0.161, b: 0.231, a: 1.0 };
pub const OUTLINE: Color = Color { r: 0.200, g: 0.255, b: 0.333, a: 1.0 };
pub const ACCENT: Color = Color { r: 0.659, g: 0.333, b: 0.969, a: 1.0 };
pub const ACCENT_SOFT: Color = Color { r: 0.847, g: 0.706, b: 0.996, a: 1.0 };
pub const TEXT: Color = Color::WHITE;
pub const TEXT_MUTED: Color = Color { r: 0.796, g: 0.835, b: 0.882, a: 1.0 };
pub const TEXT_FAINT: Color = Color { r: 0.580, g: 0.639, b: 0.722, a: 1.0 };
pub const RELEASED: Color = Color { r: 0.086, g: 0.639, b: 0.290, a: 1.0 };
pub const IN_PROGRESS: Color = Color { r: 0.918, g: 0.345, b: 0.047, a: 1.0 };
pub const FOCUS_RING: Color = Color { r: 0.400, g: 0.910, b: 0.976, a: 1.0 };

/// Hero fade and slide at startup
pub const HERO_ENTRANCE: Duration = Duration::from_millis(800);
/// Backdrop and panel fade when the dialog opens
pub const DIALOG_ENTRANCE: Duration = Duration::from_millis(300);

/// Entrance progress, 0 when just shown and 1 once `span` has passed
pub fn reveal(elapsed: Duration, span: Duration) -> f32 {
    if span.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / span.as_secs_f32()).clamp(0.0, 1.0)
}

/// `color` with its alpha scaled by `progress`
pub fn faded(color: Color, progress: f32) -> Color {
    Color {
        a: color.a * progress,
        ..color
    }
}

/// Badge color for a project status
pub fn status_color(treatment: StatusTreatment) -> Color {
    match treatment {
        StatusTreatment::Released => RELEASED,
        StatusTreatment::InProgress => IN_PROGRESS,
    }
}

/// Rounded status label
pub fn status_badge<'a>(label: &'a str, treatment: StatusTreatment) -> Element<'a, Message> {
    let color = status_color(treatment);
    container(text(label).size(13).color(TEXT))
        .padding([3, 10])
        .style(move |_theme| container::Style {
            background: Some(color.into()),
            border: Border {
                radius: 10.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

/// Outlined chip, used for technologies and the project type
pub fn chip<'a>(label: &'a str, color: Color) -> Element<'a, Message> {
    container(text(label).size(13).color(color))
        .padding([2, 8])
        .style(move |_theme| container::Style {
            border: Border {
                color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Image for a catalog reference, or an empty frame when no file exists
pub fn picture<'a>(
    assets: &AssetResolver,
    reference: Option<&str>,
    height: f32,
) -> Element<'a, Message> {
    match assets.resolve(reference) {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fill, Length::Fixed(height)))
            .style(|_theme| container::Style {
                background: Some(OUTLINE.into()),
                ..container::Style::default()
            })
            .into(),
    }
}

/// Open a URL with the platform's default handler
pub fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = std::process::Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    match command.arg(url).spawn() {
        Ok(_) => tracing::info!(url, "opened link"),
        Err(e) => tracing::warn!(url, error = %e, "failed to open link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_ramps_and_clamps() {
        let span = Duration::from_millis(400);
        assert_eq!(reveal(Duration::ZERO, span), 0.0);
        assert!((reveal(Duration::from_millis(100), span) - 0.25).abs() < 1e-6);
        assert_eq!(reveal(Duration::from_secs(5), span), 1.0);
        assert_eq!(reveal(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_faded_scales_alpha_only() {
        let color = faded(Color { a: 0.8, ..ACCENT }, 0.5);
        assert_eq!((color.r, color.g, color.b), (ACCENT.r, ACCENT.g, ACCENT.b));
        assert!((color.a - 0.4).abs() < f32::EPSILON);
    }
}
