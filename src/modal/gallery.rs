use crate::state::data::Project;

/// Cursor over a project's gallery.
///
/// The index is only meaningful relative to the project it was last reset
/// for; lookups never panic, whatever the gallery length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryCursor {
    index: usize,
}

impl GalleryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Back to the first image
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Jump to indicator `index`. Out-of-range picks are ignored.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Step forward, wrapping at the end
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Step back, wrapping at the start
    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Image reference to display for `project`.
    ///
    /// Falls back to the primary image when the gallery is empty or the
    /// index is out of range; `None` when neither is available.
    pub fn displayed<'a>(&self, project: &'a Project) -> Option<&'a str> {
        project
            .gallery
            .get(self.index)
            .map(String::as_str)
            .filter(|image| !image.is_empty())
            .or_else(|| Some(project.image.as_str()).filter(|image| !image.is_empty()))
    }
}
