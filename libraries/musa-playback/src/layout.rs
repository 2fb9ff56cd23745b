//! Panel visibility
//!
//! The sidebar and the playlist panel share one column: the playlist panel
//! is only shown next to a visible sidebar, and showing it from a fully
//! collapsed layout brings the sidebar back.

use serde::{Deserialize, Serialize};

/// Visibility of the side panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutState {
    pub sidebar: bool,
    pub playlist: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            sidebar: true,
            playlist: false,
        }
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show, hide (`Some`) or flip (`None`) the sidebar
    ///
    /// The playlist panel is hidden whenever the sidebar is requested
    /// visible or is currently visible.
    pub fn toggle_sidebar(&mut self, visible: Option<bool>) {
        if (visible == Some(true) || self.sidebar) && self.playlist {
            self.playlist = false;
        }
        self.sidebar = visible.unwrap_or(!self.sidebar);
    }

    /// Show, hide (`Some`) or flip (`None`) the playlist panel
    pub fn toggle_playlist(&mut self, visible: Option<bool>) {
        if !self.sidebar && !self.playlist {
            self.toggle_sidebar(Some(true));
        }
        self.playlist = visible.unwrap_or(!self.playlist);
    }
}
