//! Items: the images of a labeling session.

use image::RgbaImage;

use super::label::LabelId;

/// One image in the session's ordered item list.
///
/// The item only records which labels belong to it; the session owns the
/// labels themselves.
#[derive(Debug, Clone)]
pub struct Item {
    index: usize,
    url: String,
    labels: Vec<LabelId>,
    ready: bool,
    pixels: Option<RgbaImage>,
}

impl Item {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            labels: Vec::new(),
            ready: false,
            pixels: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Member label ids in creation order, soft-deleted ones included.
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }

    pub(crate) fn add_label(&mut self, id: LabelId) {
        if !self.labels.contains(&id) {
            self.labels.push(id);
        }
    }

    pub(crate) fn set_labels(&mut self, labels: Vec<LabelId>) {
        self.labels = labels;
    }

    /// Whether the source asset finished loading.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Decoded pixels handed over by the host, if any.
    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.pixels.as_ref()
    }

    /// Size of the decoded image in pixels.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.pixels.as_ref().map(|p| p.dimensions())
    }

    pub(crate) fn mark_loaded(&mut self, pixels: Option<RgbaImage>) {
        self.ready = true;
        if pixels.is_some() {
            self.pixels = pixels;
        }
    }
}
