/// The scrolling page: hero, project grid, about, contact, footer
use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::{button, column, container, image, row, text, Column, Row};
use iced::{Alignment, Border, ContentFit, Element, Length, Padding, Theme};
use iced_aw::Wrap;

use crate::assets::AssetResolver;
use crate::state::catalog::Catalog;
use crate::state::data::{Contact, Profile, Project};
use crate::Message;

use super::{
    chip, faded, picture, status_badge, ACCENT, ACCENT_SOFT, OUTLINE, SURFACE, TEXT, TEXT_FAINT,
    TEXT_MUTED,
};

const CARD_WIDTH: f32 = 340.0;
const CARD_IMAGE_HEIGHT: f32 = 190.0;
/// Technology chips shown on a card before "+N"
const CARD_TECH_LIMIT: usize = 3;

/// Whole page, top to bottom
///
/// `entrance` runs from 0 to 1 while the hero fades and slides in.
pub fn view<'a>(
    catalog: &'a Catalog,
    thumbnails: &HashMap<u32, PathBuf>,
    assets: &AssetResolver,
    status: Option<&'a str>,
    entrance: f32,
) -> Element<'a, Message> {
    let profile = catalog.profile();

    let mut page = Column::new()
        .spacing(80)
        .padding([60, 40])
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .push(hero(profile, entrance));

    if let Some(status) = status {
        page = page.push(text(status).size(14).color(TEXT_FAINT));
    }

    page.push(projects(catalog, thumbnails, assets))
        .push(about(profile))
        .push(contact(&profile.contact))
        .push(footer(profile))
        .into()
}

/// Pixels the hero rises while it fades in
const HERO_SLIDE: f32 = 30.0;

fn hero(profile: &Profile, entrance: f32) -> Element<'_, Message> {
    column![
        text(profile.name.as_str()).size(64).color(faded(TEXT, entrance)),
        text(profile.headline.as_str())
            .size(26)
            .color(faded(ACCENT_SOFT, entrance)),
        text(profile.summary.as_str())
            .size(18)
            .color(faded(TEXT_MUTED, entrance)),
    ]
    .spacing(20)
    .padding(Padding {
        top: (1.0 - entrance) * HERO_SLIDE,
        ..Padding::ZERO
    })
    .max_width(900)
    .align_x(Alignment::Center)
    .into()
}

fn section_title<'a>(title: &'a str, subtitle: &'a str) -> Element<'a, Message> {
    column![
        text(title).size(40).color(TEXT),
        text(subtitle).size(18).color(TEXT_MUTED),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

fn projects<'a>(
    catalog: &'a Catalog,
    thumbnails: &HashMap<u32, PathBuf>,
    assets: &AssetResolver,
) -> Element<'a, Message> {
    let grid: Element<'a, Message> = if catalog.is_empty() {
        text("No projects to show yet.").size(16).color(TEXT_FAINT).into()
    } else {
        let cards: Vec<Element<'a, Message>> = catalog
            .projects()
            .iter()
            .map(|project| card(project, thumbnails.get(&project.id), assets))
            .collect();
        Wrap::with_elements(cards)
            .spacing(24.0)
            .line_spacing(24.0)
            .into()
    };

    column![
        section_title(
            "Featured Projects",
            "A showcase of my latest work in VR, game development and interactive experiences",
        ),
        grid,
    ]
    .spacing(40)
    .align_x(Alignment::Center)
    .into()
}

/// One clickable project card
fn card<'a>(
    project: &'a Project,
    thumbnail: Option<&PathBuf>,
    assets: &AssetResolver,
) -> Element<'a, Message> {
    // Prefer the generated thumbnail; fall back to the full image
    let cover: Element<'a, Message> = match thumbnail {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fixed(CARD_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => picture(assets, Some(project.image.as_str()), CARD_IMAGE_HEIGHT),
    };

    let mut chips = Row::new().spacing(6);
    for tech in project.technologies.iter().take(CARD_TECH_LIMIT) {
        chips = chips.push(chip(tech, ACCENT_SOFT));
    }
    if project.technologies.len() > CARD_TECH_LIMIT {
        chips = chips.push(chip_owned(
            format!("+{}", project.technologies.len() - CARD_TECH_LIMIT),
        ));
    }

    let body = column![
        row![
            status_badge(&project.status, project.status_treatment()),
            iced::widget::horizontal_space(),
            text(project.year.as_str()).size(14).color(ACCENT_SOFT),
        ]
        .align_y(Alignment::Center),
        text(project.title.as_str()).size(22).color(TEXT),
        text(project.short_description.as_str()).size(15).color(TEXT_MUTED),
        chips,
    ]
    .spacing(10)
    .padding(16);

    button(column![cover, body])
        .width(Length::Fixed(CARD_WIDTH))
        .padding(0)
        .style(|_theme: &Theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(SURFACE.into()),
                text_color: TEXT,
                border: Border {
                    color: if hovered { ACCENT } else { OUTLINE },
                    width: 1.0,
                    radius: 10.0.into(),
                },
                ..button::Style::default()
            }
        })
        .on_press(Message::ProjectSelected(project.id))
        .into()
}

fn chip_owned<'a>(label: String) -> Element<'a, Message> {
    container(text(label).size(13).color(TEXT_FAINT))
        .padding([2, 8])
        .into()
}

fn about(profile: &Profile) -> Element<'_, Message> {
    let paragraphs = profile.about.iter().fold(Column::new().spacing(16), |col, paragraph| {
        col.push(text(paragraph.as_str()).size(17).color(TEXT_MUTED))
    });

    let skills = profile.skills.iter().fold(Row::new().spacing(40), |skills, group| {
        let list = group.skills.iter().fold(
            Column::new()
                .spacing(4)
                .push(text(group.title.as_str()).size(18).color(ACCENT_SOFT)),
            |list, skill| list.push(text(format!("• {}", skill)).size(15).color(TEXT_MUTED)),
        );
        skills.push(list)
    });

    column![
        section_title("About Me", "Passionate about creating immersive digital experiences"),
        paragraphs.max_width(900),
        text("Core Skills").size(24).color(TEXT),
        skills,
    ]
    .spacing(28)
    .align_x(Alignment::Center)
    .into()
}

fn contact(contact: &Contact) -> Element<'_, Message> {
    let mut entries = Column::new().spacing(12).align_x(Alignment::Center);

    if let Some(email) = &contact.email {
        entries = entries.push(link_button(
            format!("✉ {}", email),
            format!("mailto:{}", email),
        ));
    }
    if let Some(location) = &contact.location {
        entries = entries.push(text(format!("📍 {}", location)).size(16).color(TEXT_MUTED));
    }

    let mut socials = Row::new().spacing(16);
    if let Some(github) = &contact.github {
        socials = socials.push(link_button("GitHub".to_string(), github.clone()));
    }
    if let Some(linkedin) = &contact.linkedin {
        socials = socials.push(link_button("LinkedIn".to_string(), linkedin.clone()));
    }

    column![
        section_title(
            "Let's Work Together",
            "Have a project in mind? Let's create something amazing together.",
        ),
        entries,
        socials,
    ]
    .spacing(28)
    .align_x(Alignment::Center)
    .into()
}

fn link_button<'a>(label: String, url: String) -> Element<'a, Message> {
    button(text(label).size(16))
        .padding([8, 20])
        .style(button::secondary)
        .on_press(Message::OpenLink(url))
        .into()
}

fn footer(profile: &Profile) -> Element<'_, Message> {
    container(
        text(format!("© {} · All rights reserved", profile.name))
            .size(14)
            .color(TEXT_FAINT),
    )
    .padding([24, 0])
    .into()
}
