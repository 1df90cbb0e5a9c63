//! Main-button configuration pushed to the host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Host main-button state. Unset fields are omitted on the wire and left unchanged by merges.
pub struct MainButtonOptions {
    /// Whether the button is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Whether the button accepts presses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Whether the button shows a progress indicator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_progress_visible: Option<bool>,
    /// Button label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Background color, as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Label color, as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl MainButtonOptions {
    /// Sets the label.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = Some(visible);
        self
    }

    /// Sets whether the button is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Sets progress-indicator visibility.
    pub fn with_progress_visible(mut self, visible: bool) -> Self {
        self.is_progress_visible = Some(visible);
        self
    }

    /// Sets the background color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the label color.
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Shallow-merges `patch` into `self`: every field set in `patch` overwrites the held value.
    ///
    /// A field cannot be cleared through a merge. Unset fields in `patch`, including fields
    /// decoded from an explicit `null`, leave the held value in place.
    pub fn merge(&mut self, patch: &MainButtonOptions) {
        merge_field(&mut self.is_visible, &patch.is_visible);
        merge_field(&mut self.is_active, &patch.is_active);
        merge_field(&mut self.is_progress_visible, &patch.is_progress_visible);
        merge_field(&mut self.text, &patch.text);
        merge_field(&mut self.color, &patch.color);
        merge_field(&mut self.text_color, &patch.text_color);
    }
}

fn merge_field<T: Clone>(slot: &mut Option<T>, patch: &Option<T>) {
    if let Some(value) = patch {
        *slot = Some(value.clone());
    }
}
