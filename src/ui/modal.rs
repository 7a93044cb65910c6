/// Project detail dialog
///
/// Draws a [`ModalContent`] over the page. The backdrop reports presses as
/// `BackdropPressed`; the dialog itself is opaque so presses on it never
/// reach the backdrop.
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, scrollable,
    stack, text, Column, Space,
};
use iced::{Border, Color, Element, Length, Theme};
use iced_aw::Wrap;

use crate::assets::AssetResolver;
use crate::modal::{FocusTarget, ModalContent};
use crate::state::data::LinkKind;
use crate::Message;

use super::{
    chip, faded, picture, status_badge, ACCENT, ACCENT_SOFT, FOCUS_RING, IN_PROGRESS, OUTLINE, RELEASED,
    SURFACE, TEXT, TEXT_FAINT, TEXT_MUTED,
};

const GALLERY_HEIGHT: f32 = 340.0;
const DIALOG_WIDTH: f32 = 960.0;

const BACKDROP: Color = Color {
    a: 0.8,
    ..Color::BLACK
};

/// Put `dialog` on top of `base` behind a dimmed backdrop
///
/// The backdrop darkens as `entrance` goes from 0 to 1.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    dialog: Element<'a, Message>,
    entrance: f32,
) -> Element<'a, Message> {
    let dialog = mouse_area(dialog).on_press(Message::DialogPressed);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(move |_theme| container::Style {
                background: Some(faded(BACKDROP, entrance).into()),
                ..container::Style::default()
            }))
            .on_press(Message::BackdropPressed)
        )
    ]
    .into()
}

/// The dialog panel for one project
pub fn view<'a>(
    content: &ModalContent<'a>,
    focused: Option<FocusTarget>,
    assets: &AssetResolver,
    entrance: f32,
) -> Element<'a, Message> {
    let project = content.project;

    let mut body = Column::new()
        .spacing(24)
        .padding(24)
        .push(gallery(content, focused, assets))
        .push(header(content))
        .push(technologies(content));

    if let Some(challenges) = content.challenges {
        body = body.push(bullet_section("Technical Challenges", challenges, IN_PROGRESS));
    }
    if let Some(achievements) = content.achievements {
        body = body.push(bullet_section("Key Achievements", achievements, RELEASED));
    }
    if !content.links.is_empty() {
        body = body.push(links(&content.links, focused));
    }

    let top_bar = row![
        status_badge(&project.status, content.status),
        horizontal_space(),
        focusable_button(
            text("✕").size(18).color(TEXT),
            FocusTarget::CloseButton,
            focused,
        )
        .on_press(Message::FocusTargetPressed(FocusTarget::CloseButton)),
    ]
    .padding([12, 24]);

    container(column![top_bar, scrollable(body)])
        .max_width(DIALOG_WIDTH)
        .max_height(720.0)
        .style(move |_theme| container::Style {
            background: Some(faded(SURFACE, 0.6 + 0.4 * entrance).into()),
            border: Border {
                color: faded(OUTLINE, entrance),
                width: 1.0,
                radius: 12.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn gallery<'a>(
    content: &ModalContent<'a>,
    focused: Option<FocusTarget>,
    assets: &AssetResolver,
) -> Element<'a, Message> {
    let image = picture(assets, content.image, GALLERY_HEIGHT);

    if content.indicators.is_empty() {
        return image;
    }

    let dots = content.indicators.iter().fold(row![].spacing(8), |dots, dot| {
        let target = FocusTarget::Indicator(dot.index);
        let fill = if dot.current {
            Color::WHITE
        } else {
            Color {
                a: 0.5,
                ..Color::WHITE
            }
        };
        let is_focused = focused == Some(target);
        dots.push(
            button(Space::new(Length::Fixed(12.0), Length::Fixed(12.0)))
                .padding(0)
                .style(move |_theme: &Theme, _status| button::Style {
                    background: Some(fill.into()),
                    border: Border {
                        color: if is_focused { FOCUS_RING } else { Color::TRANSPARENT },
                        width: 2.0,
                        radius: 6.0.into(),
                    },
                    ..button::Style::default()
                })
                .on_press(Message::FocusTargetPressed(target)),
        )
    });

    column![
        image,
        text(format!(
            "Image {} of {}",
            content.image_index + 1,
            content.indicators.len()
        ))
        .size(12)
        .color(TEXT_FAINT),
        dots,
    ]
    .spacing(8)
    .align_x(iced::Alignment::Center)
    .into()
}

fn header<'a>(content: &ModalContent<'a>) -> Element<'a, Message> {
    let project = content.project;

    column![
        row![
            text(project.title.as_str()).size(30).color(TEXT),
            horizontal_space(),
            chip(&project.kind, ACCENT_SOFT),
        ],
        row![
            text(format!("📅 {} • {}", project.year, project.duration))
                .size(14)
                .color(TEXT_FAINT),
            text(format!("👥 {}", project.team)).size(14).color(TEXT_FAINT),
        ]
        .spacing(16),
        text(project.detailed_description.as_str()).size(16).color(TEXT_MUTED),
    ]
    .spacing(10)
    .into()
}

fn technologies<'a>(content: &ModalContent<'a>) -> Element<'a, Message> {
    let entries: Vec<Element<'a, Message>> = content
        .technologies
        .iter()
        .map(|entry| {
            let mut card = Column::new()
                .push(text(entry.name).size(15).color(ACCENT_SOFT))
                .width(Length::Fixed(420.0));
            if let Some(detail) = entry.detail {
                card = card.push(text(detail).size(13).color(TEXT_FAINT));
            }
            container(card)
                .padding(12)
                .style(|_theme| container::Style {
                    background: Some(Color { a: 0.5, ..OUTLINE }.into()),
                    border: Border {
                        radius: 8.0.into(),
                        ..Border::default()
                    },
                    ..container::Style::default()
                })
                .into()
        })
        .collect();

    column![
        text("Technologies Used").size(20).color(TEXT),
        Wrap::with_elements(entries).spacing(12.0).line_spacing(12.0),
    ]
    .spacing(12)
    .into()
}

fn bullet_section<'a>(title: &'a str, items: &'a [String], bullet: Color) -> Element<'a, Message> {
    let list = items.iter().fold(Column::new().spacing(8), |list, item| {
        list.push(row![text("•").color(bullet), text(item.as_str()).color(TEXT_MUTED)].spacing(8))
    });

    column![text(title).size(20).color(TEXT), list]
        .spacing(12)
        .into()
}

fn links<'a>(links: &[(LinkKind, &'a str)], focused: Option<FocusTarget>) -> Element<'a, Message> {
    let buttons = links.iter().fold(row![].spacing(12), |buttons, (kind, _url)| {
        let target = FocusTarget::Link(*kind);
        buttons.push(
            focusable_button(text(kind.label()).size(15), target, focused)
                .padding([8, 16])
                .on_press(Message::FocusTargetPressed(target)),
        )
    });

    container(buttons)
        .padding([16, 0])
        .style(|_theme| container::Style {
            border: Border {
                color: OUTLINE,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Button with the keyboard focus ring when `target` holds focus
fn focusable_button<'a>(
    label: impl Into<Element<'a, Message>>,
    target: FocusTarget,
    focused: Option<FocusTarget>,
) -> button::Button<'a, Message> {
    let is_focused = focused == Some(target);
    let accent = matches!(target, FocusTarget::Link(LinkKind::Demo));

    button(label).style(move |theme: &Theme, status| {
        let mut style = if accent {
            button::primary(theme, status)
        } else {
            button::secondary(theme, status)
        };
        if accent {
            style.background = Some(ACCENT.into());
        }
        style.border = Border {
            color: if is_focused { FOCUS_RING } else { OUTLINE },
            width: if is_focused { 2.0 } else { 1.0 },
            radius: 8.0.into(),
        };
        style
    })
}
