/// Presentation state shared by everything drawn over the globe
#[derive(Debug, Clone)]
pub struct OverlayProperties {
    pub id: String,
    /// Human readable label; defaults to the id
    pub label: String,
    /// Target opacity in [0, 1]
    pub opacity: f32,
    /// Whether a renderer should draw the overlay at all
    pub shown: bool,
    pub interactive: bool,
    /// Free-form data for click handlers
    pub metadata: serde_json::Value,
}

impl OverlayProperties {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            opacity: 1.0,
            shown: true,
            interactive: true,
            metadata: serde_json::Value::Null,
        }
    }

    /// Clamps into [0, 1]; fully transparent overlays are no longer shown
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.shown = self.opacity > 0.0;
    }
}
