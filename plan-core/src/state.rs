//! Viewer display state.

use serde::{Deserialize, Serialize};

use crate::FloorLayout;

/// Message shown by hosts while no layout is bound.
pub const EMPTY_PLACEHOLDER: &str = "Generate a floor plan to see it here";

/// Whether the viewer has anything to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    /// No layout bound. The host shows a placeholder and no surface exists.
    Empty,
    /// A layout is bound and every state change redraws it.
    Rendered,
}

impl DisplayState {
    /// State implied by the bound layout.
    ///
    /// A layout with zero rooms still counts as rendered; it paints a bare
    /// grid and title.
    #[must_use]
    pub fn for_layout(layout: Option<&FloorLayout>) -> Self {
        if layout.is_some() {
            Self::Rendered
        } else {
            Self::Empty
        }
    }

    /// Placeholder text for the host, if one should be shown.
    #[must_use]
    pub fn placeholder_message(self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(EMPTY_PLACEHOLDER),
            Self::Rendered => None,
        }
    }
}
