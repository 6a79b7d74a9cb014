//! Raster targets for drawing labels and color-coded picking.
//!
//! Every redraw paints into two equally sized images: the visible surface the
//! user sees, and a hidden surface where each label body and resize handle is
//! filled with a color that encodes `(label id, handle)`. Picking reads back a
//! single hidden pixel, so a query costs one lookup no matter how many labels
//! overlap. The hidden surface is only valid for the geometry of the last
//! redraw: callers must redraw after every edit before picking again.
//!
//! Channel layout of a covered hidden pixel:
//! - red: low byte of `id + 1` (0 together with blue 0 means background)
//! - green: `handle + 1`
//! - blue: high byte of `id + 1`
//! - alpha: 255

use image::{Rgba, RgbaImage, imageops};

use crate::constants::{MAX_PICKABLE_LABEL_ID, PICK_COVERAGE_ALPHA, SELECTED_LINE_FACTOR};
use crate::letterbox::PadBox;
use crate::model::{Handle, LabelId, Point};

/// Which of the two surfaces a draw call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Visible,
    Hidden,
}

/// Label and handle found under a canvas pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickResult {
    pub label: LabelId,
    pub handle: Handle,
}

/// Per-label drawing parameters resolved by the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub label: LabelId,
    pub color: [u8; 3],
    pub selected: bool,
    /// The label is the target of an active resize.
    pub resizing: bool,
    /// Handle under the pointer, when the pointer is over this label.
    pub hovered: Option<Handle>,
    pub line_width: f32,
    pub handle_radius: f32,
    pub hidden_handle_radius: f32,
}

impl DrawStyle {
    pub fn visible_color(&self) -> Rgba<u8> {
        let [r, g, b] = self.color;
        Rgba([r, g, b, 255])
    }

    pub fn effective_line_width(&self) -> f32 {
        if self.selected || self.resizing {
            self.line_width * SELECTED_LINE_FACTOR
        } else {
            self.line_width
        }
    }

    pub fn shows_handles(&self) -> bool {
        self.selected || self.resizing || self.hovered.is_some()
    }
}

/// Encode a label body or handle as a picking color.
///
/// Returns `None` for ids that do not fit the two id channels.
pub fn encode_pick(label: LabelId, handle: Handle) -> Option<Rgba<u8>> {
    if label > MAX_PICKABLE_LABEL_ID {
        return None;
    }
    let code = label + 1;
    let low = (code & 0xFF) as u8;
    let high = ((code >> 8) & 0xFF) as u8;
    Some(Rgba([low, handle.index() + 1, high, PICK_COVERAGE_ALPHA]))
}

/// Decode a picking color. Background and partially covered pixels decode
/// to `None`.
pub fn decode_pick(pixel: Rgba<u8>) -> Option<PickResult> {
    let [low, handle, high, alpha] = pixel.0;
    if alpha != PICK_COVERAGE_ALPHA {
        return None;
    }
    let code = u64::from(low) | (u64::from(high) << 8);
    if code == 0 {
        return None;
    }
    let handle = Handle::from_index(handle.checked_sub(1)?)?;
    Some(PickResult {
        label: code - 1,
        handle,
    })
}

/// Pixel range covered by the span `start..start + len`, clipped to `0..limit`.
fn pixel_span(start: f32, len: f32, limit: u32) -> std::ops::Range<u32> {
    let (lo, hi) = if len < 0.0 { (start + len, start) } else { (start, start + len) };
    let clip = |v: f32| v.round().max(0.0).min(limit as f32) as u32;
    clip(lo)..clip(hi)
}

/// Resample decoded pixels to the size of the padding box.
///
/// Returns `None` when either side is empty.
pub fn scale_to_pad(pixels: &RgbaImage, pad: &PadBox) -> Option<RgbaImage> {
    let w = pad.w.round() as u32;
    let h = pad.h.round() as u32;
    if w == 0 || h == 0 || pixels.width() == 0 || pixels.height() == 0 {
        return None;
    }
    Some(imageops::resize(pixels, w, h, imageops::FilterType::Triangle))
}

/// The visible and hidden raster targets of one canvas.
#[derive(Debug, Clone)]
pub struct Surfaces {
    visible: RgbaImage,
    hidden: RgbaImage,
}

impl Surfaces {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            visible: RgbaImage::new(width, height),
            hidden: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.visible.width()
    }

    pub fn height(&self) -> u32 {
        self.visible.height()
    }

    /// Reallocate both surfaces for a new canvas size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width(), self.height()) {
            log::debug!("Resizing surfaces to {}x{}", width, height);
            *self = Self::new(width, height);
        }
    }

    pub fn visible(&self) -> &RgbaImage {
        &self.visible
    }

    pub fn hidden(&self) -> &RgbaImage {
        &self.hidden
    }

    /// Clear both surfaces to transparent.
    pub fn clear(&mut self) {
        for pixel in self.visible.pixels_mut().chain(self.hidden.pixels_mut()) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn target(&mut self, layer: Layer) -> &mut RgbaImage {
        match layer {
            Layer::Visible => &mut self.visible,
            Layer::Hidden => &mut self.hidden,
        }
    }

    /// Fill an axis-aligned rectangle given in canvas pixels.
    ///
    /// Pixels are overwritten, never blended, so picking colors stay exact.
    pub fn fill_rect(&mut self, layer: Layer, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let xs = pixel_span(x, w, self.width());
        let ys = pixel_span(y, h, self.height());
        let target = self.target(layer);
        for py in ys {
            for px in xs.clone() {
                target.put_pixel(px, py, color);
            }
        }
    }

    /// Fill a square of half-size `radius` centered on `center`.
    pub fn fill_square(&mut self, layer: Layer, center: Point, radius: f32, color: Rgba<u8>) {
        self.fill_rect(layer, center.x - radius, center.y - radius, radius * 2.0, radius * 2.0, color);
    }

    /// Outline a rectangle; the stroke is centered on the rectangle edges.
    #[expect(clippy::too_many_arguments, reason = "mirrors the canvas strokeRect call plus layer and style")]
    pub fn stroke_rect(
        &mut self,
        layer: Layer,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        line_width: f32,
        color: Rgba<u8>,
    ) {
        let half = line_width / 2.0;
        self.fill_rect(layer, x - half, y - half, w + line_width, line_width, color);
        self.fill_rect(layer, x - half, y + h - half, w + line_width, line_width, color);
        self.fill_rect(layer, x - half, y - half, line_width, h + line_width, color);
        self.fill_rect(layer, x + w - half, y - half, line_width, h + line_width, color);
    }

    /// Draw decoded image pixels scaled into the padding box of the visible surface.
    pub fn draw_image(&mut self, pixels: &RgbaImage, pad: &PadBox) {
        if let Some(scaled) = scale_to_pad(pixels, pad) {
            self.blit_image(&scaled, pad);
        }
    }

    /// Copy an image already scaled to the padding box onto the visible surface.
    pub fn blit_image(&mut self, scaled: &RgbaImage, pad: &PadBox) {
        imageops::overlay(&mut self.visible, scaled, pad.x.round() as i64, pad.y.round() as i64);
    }

    /// Label and handle under a canvas point, from the last redraw.
    pub fn pick(&self, canvas: Point) -> Option<PickResult> {
        if canvas.x.is_nan() || canvas.y.is_nan() || canvas.x < 0.0 || canvas.y < 0.0 {
            return None;
        }
        let (px, py) = (canvas.x.floor() as u32, canvas.y.floor() as u32);
        if px >= self.width() || py >= self.height() {
            return None;
        }
        decode_pick(*self.hidden.get_pixel(px, py))
    }
}
