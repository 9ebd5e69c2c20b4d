use crate::{
    data::launch::Launch,
    layers::marker::{Marker, MarkerHandle},
    prelude::HashMap,
    Result,
};

/// Owns the launch markers shown on the globe
///
/// The set is rebuilt wholesale whenever the launch list changes; marker ids
/// are the launch ids.
#[derive(Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    index: HashMap<String, usize>,
    revision: u64,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every marker and create one per launch
    ///
    /// Bad coordinates are warned about but not filtered; the visibility
    /// pass reports and hides those markers.
    pub fn rebuild(&mut self, launches: &[Launch]) -> Result<usize> {
        let mut markers = Vec::with_capacity(launches.len());
        let mut index = HashMap::default();

        for launch in launches {
            if index.contains_key(&launch.id) {
                log::warn!("duplicate launch id '{}', keeping the first", launch.id);
                continue;
            }
            let position = launch.position().unwrap_or_else(|err| {
                log::warn!("{err}; marker kept hidden");
                launch.lat_lng()
            });
            let marker = Marker::new(launch.id.clone(), position)
                .with_tooltip(launch.name.clone())
                .with_metadata(serde_json::to_value(launch)?);
            index.insert(launch.id.clone(), markers.len());
            markers.push(marker);
        }

        self.markers = markers;
        self.index = index;
        self.revision += 1;
        log::debug!(
            "marker set rebuilt: {} markers (revision {})",
            self.markers.len(),
            self.revision
        );
        Ok(self.markers.len())
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.index.clear();
        self.revision += 1;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut [Marker] {
        &mut self.markers
    }

    pub fn get(&self, id: &str) -> Option<&Marker> {
        self.index.get(id).map(|&idx| &self.markers[idx])
    }

    /// The launch a marker was built from, for click handlers
    pub fn launch(&self, id: &str) -> Option<Launch> {
        let marker = self.get(id)?;
        serde_json::from_value(marker.properties().metadata.clone()).ok()
    }

    /// Ids of markers currently accepting clicks
    pub fn interactive_ids(&self) -> Vec<&str> {
        self.markers
            .iter()
            .filter(|marker| marker.is_interactive())
            .map(|marker| marker.id())
            .collect()
    }

    /// Increments on every rebuild or clear
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
