use crate::{
    animation::easing::EasingType,
    core::{config::FadeConfig, constants::MARKER_ICON_SIZE, geo::LatLng},
    layers::base::OverlayProperties,
    prelude::{Duration, Instant},
};

/// What a marker handle must expose to the visibility updater
pub trait MarkerHandle {
    fn id(&self) -> &str;

    fn position(&self) -> LatLng;

    fn element(&self) -> &MarkerElement;

    /// Opacity the marker is showing or fading towards
    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32, fade: &FadeConfig);

    fn is_interactive(&self) -> bool;

    /// Non-interactive markers must not receive clicks
    fn set_interactive(&mut self, interactive: bool);
}

impl<T: MarkerHandle + ?Sized> MarkerHandle for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn position(&self) -> LatLng {
        (**self).position()
    }

    fn element(&self) -> &MarkerElement {
        (**self).element()
    }

    fn opacity(&self) -> f32 {
        (**self).opacity()
    }

    fn set_opacity(&mut self, opacity: f32, fade: &FadeConfig) {
        (**self).set_opacity(opacity, fade)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn set_interactive(&mut self, interactive: bool) {
        (**self).set_interactive(interactive)
    }
}

/// Description of the on-screen element a renderer creates for a marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    pub size: (u32, u32),
    /// Shown on hover; the launch name for launch markers
    pub tooltip: Option<String>,
    pub class_name: String,
}

impl Default for MarkerElement {
    fn default() -> Self {
        Self {
            size: MARKER_ICON_SIZE,
            tooltip: None,
            class_name: "marker".to_string(),
        }
    }
}

/// An opacity change in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub easing: EasingType,
    pub started: Instant,
}

impl Fade {
    /// Opacity after `elapsed` time
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(t) as f32;
        self.from + (self.to - self.from) * eased
    }
}

pub struct Marker {
    properties: OverlayProperties,
    position: LatLng,
    element: MarkerElement,
    fade: Option<Fade>,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = OverlayProperties::new(id);
        Self {
            properties,
            position,
            element: MarkerElement::default(),
            fade: None,
        }
    }

    pub fn with_tooltip(mut self, text: String) -> Self {
        self.properties.label = text.clone();
        self.element.tooltip = Some(text);
        self
    }

    /// Arbitrary metadata a click handler can read back
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.properties.metadata = metadata;
        self
    }

    pub fn properties(&self) -> &OverlayProperties {
        &self.properties
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    /// Eased opacity a renderer should draw right now
    pub fn current_opacity(&self) -> f32 {
        match &self.fade {
            Some(fade) => fade.opacity_at(fade.started.elapsed()),
            None => self.properties.opacity,
        }
    }
}

impl MarkerHandle for Marker {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn position(&self) -> LatLng {
        self.position
    }

    fn element(&self) -> &MarkerElement {
        &self.element
    }

    fn opacity(&self) -> f32 {
        self.properties.opacity
    }

    fn set_opacity(&mut self, opacity: f32, fade: &FadeConfig) {
        let from = self.current_opacity();
        self.properties.set_opacity(opacity);
        self.fade = Some(Fade {
            from,
            to: self.properties.opacity,
            duration: fade.duration(),
            easing: fade.easing,
            started: Instant::now(),
        });
    }

    fn is_interactive(&self) -> bool {
        self.properties.interactive
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.properties.interactive = interactive;
    }
}
