/// Shared data structures for the application state
///
/// These structs represent the catalog document as it is read from disk
/// and handed (read-only) to the UI layer.
use serde::Deserialize;
use std::collections::HashMap;

/// Literal status value that selects the "released" visual treatment
pub const RELEASED_STATUS: &str = "Released";

/// Represents a single portfolio entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique catalog ID, also the stable sort key
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub detailed_description: String,
    /// Technologies in display order
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Optional detail line per technology (missing entries are legal)
    #[serde(default)]
    pub tech_details: HashMap<String, String>,
    /// Category label (e.g. "VR Game")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Primary thumbnail reference
    #[serde(default)]
    pub image: String,
    /// Gallery image references, may be empty
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Free-text status; only "Released" is special
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Outbound links keyed by kind; only the keys of [`LinkKind`] are used
    #[serde(default)]
    pub links: HashMap<String, String>,
}

impl Project {
    /// Visual treatment selected by the free-text status
    pub fn status_treatment(&self) -> StatusTreatment {
        StatusTreatment::from_status(&self.status)
    }

    /// Detail line for a technology, if the catalog provides one
    pub fn tech_detail(&self, technology: &str) -> Option<&str> {
        self.tech_details
            .get(technology)
            .map(String::as_str)
            .filter(|detail| !detail.is_empty())
    }

    /// Recognized links in display order. Unknown keys are skipped.
    pub fn link_actions(&self) -> Vec<(LinkKind, &str)> {
        LinkKind::ALL
            .iter()
            .filter_map(|kind| {
                self.links
                    .get(kind.key())
                    .filter(|url| !url.is_empty())
                    .map(|url| (*kind, url.as_str()))
            })
            .collect()
    }
}

/// Released vs. everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTreatment {
    Released,
    InProgress,
}

impl StatusTreatment {
    pub fn from_status(status: &str) -> Self {
        if status == RELEASED_STATUS {
            StatusTreatment::Released
        } else {
            StatusTreatment::InProgress
        }
    }
}

/// The fixed set of link keys the modal knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Github,
    Demo,
    Store,
    Trailer,
}

impl LinkKind {
    /// Display order of link actions
    pub const ALL: [LinkKind; 4] = [
        LinkKind::Github,
        LinkKind::Demo,
        LinkKind::Store,
        LinkKind::Trailer,
    ];

    /// Key used in the catalog's `links` object
    pub fn key(self) -> &'static str {
        match self {
            LinkKind::Github => "github",
            LinkKind::Demo => "demo",
            LinkKind::Store => "store",
            LinkKind::Trailer => "trailer",
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Github => "GitHub",
            LinkKind::Demo => "Live Demo",
            LinkKind::Store => "Store Page",
            LinkKind::Trailer => "Trailer",
        }
    }
}

/// Owner of the portfolio: hero, about and contact copy
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub summary: String,
    /// About-section paragraphs
    pub about: Vec<String>,
    pub skills: Vec<SkillGroup>,
    pub contact: Contact,
}

/// A titled list of skills in the about section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<String>,
}

/// Contact details; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub location: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A fully populated project used across the test modules
    pub fn project(id: u32, gallery: &[&str]) -> Project {
        Project {
            id,
            title: format!("Project {}", id),
            short_description: "Short".to_string(),
            detailed_description: "Detailed".to_string(),
            technologies: vec!["Unity".to_string(), "C#".to_string()],
            tech_details: HashMap::from([("Unity".to_string(), "2022 LTS".to_string())]),
            kind: "VR Game".to_string(),
            image: format!("/images/p{}.png", id),
            gallery: gallery.iter().map(|s| s.to_string()).collect(),
            status: RELEASED_STATUS.to_string(),
            year: "2024".to_string(),
            duration: "6 months".to_string(),
            team: "Solo".to_string(),
            challenges: vec!["Hand tracking latency".to_string()],
            achievements: vec!["10k downloads".to_string()],
            links: HashMap::from([("github".to_string(), "https://github.com/x".to_string())]),
        }
    }
}
