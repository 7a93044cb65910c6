use crate::state::data::{LinkKind, Project, StatusTreatment};

use super::gallery::GalleryCursor;

/// An element of the dialog that can take keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    CloseButton,
    /// Gallery navigation dot at this position
    Indicator(usize),
    Link(LinkKind),
}

/// One gallery navigation dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub current: bool,
}

/// A technology with its optional detail line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechnologyEntry<'a> {
    pub name: &'a str,
    pub detail: Option<&'a str>,
}

/// Everything the detail dialog shows for one project.
///
/// Built fresh on every render from the project and the gallery cursor;
/// optional sections are `None` when their source list is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalContent<'a> {
    pub project: &'a Project,
    /// Image reference to show, before placeholder resolution
    pub image: Option<&'a str>,
    /// Zero-based position of the displayed image
    pub image_index: usize,
    pub indicators: Vec<Indicator>,
    pub status: StatusTreatment,
    pub technologies: Vec<TechnologyEntry<'a>>,
    pub challenges: Option<&'a [String]>,
    pub achievements: Option<&'a [String]>,
    pub links: Vec<(LinkKind, &'a str)>,
}

impl<'a> ModalContent<'a> {
    pub fn build(project: &'a Project, cursor: GalleryCursor) -> Self {
        let indicators = (0..project.gallery.len())
            .map(|index| Indicator {
                index,
                current: index == cursor.index(),
            })
            .collect();

        let technologies = project
            .technologies
            .iter()
            .map(|name| TechnologyEntry {
                name: name.as_str(),
                detail: project.tech_detail(name),
            })
            .collect();

        ModalContent {
            project,
            image: cursor.displayed(project),
            image_index: cursor.index(),
            indicators,
            status: project.status_treatment(),
            technologies,
            challenges: non_empty(&project.challenges),
            achievements: non_empty(&project.achievements),
            links: project.link_actions(),
        }
    }

    /// Focusable elements in document order: close control, gallery
    /// indicators, then link actions.
    pub fn focusables(&self) -> Vec<FocusTarget> {
        std::iter::once(FocusTarget::CloseButton)
            .chain(self.indicators.iter().map(|dot| FocusTarget::Indicator(dot.index)))
            .chain(self.links.iter().map(|(kind, _)| FocusTarget::Link(*kind)))
            .collect()
    }

    /// URL behind a link action, if rendered
    pub fn link_url(&self, kind: LinkKind) -> Option<&'a str> {
        self.links
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, url)| *url)
    }
}

fn non_empty(items: &[String]) -> Option<&[String]> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
