//! Letterbox mapping between canvas pixels and image pixels.
//!
//! The image is drawn as large as possible inside the canvas while keeping its
//! aspect ratio, centered along the axis with spare room. Label geometry is
//! stored in image pixels; pointer events and the picking surface use canvas
//! pixels. [`PadBox`] converts between the two.

use crate::model::Point;

/// Rectangle of the canvas covered by the image, plus the image size it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub image_width: f32,
    pub image_height: f32,
}

impl PadBox {
    /// Compute the padding box of an image inside a canvas.
    ///
    /// Without an image size (asset not loaded yet) the image is assumed to
    /// match the canvas, so the mapping is the identity.
    pub fn compute(image_size: Option<(u32, u32)>, canvas_width: u32, canvas_height: u32) -> Self {
        let canvas_w = canvas_width as f32;
        let canvas_h = canvas_height as f32;

        let (image_w, image_h) = match image_size {
            Some((w, h)) if w > 0 && h > 0 => (w as f32, h as f32),
            _ => return Self::identity(canvas_width, canvas_height),
        };
        if canvas_w <= 0.0 || canvas_h <= 0.0 {
            return Self::identity(canvas_width, canvas_height);
        }

        let x_ratio = image_w / canvas_w;
        let y_ratio = image_h / canvas_h;

        let (x, y, w, h) = if x_ratio >= y_ratio {
            // Image is relatively wider: full width, bars above and below.
            let y = 0.5 * (canvas_h - canvas_w * image_h / image_w);
            (0.0, y, canvas_w, canvas_h - 2.0 * y)
        } else {
            let x = 0.5 * (canvas_w - canvas_h * image_w / image_h);
            (x, 0.0, canvas_w - 2.0 * x, canvas_h)
        };

        Self {
            x,
            y,
            w,
            h,
            image_width: image_w,
            image_height: image_h,
        }
    }

    /// Padding box covering the whole canvas with a 1:1 mapping.
    pub fn identity(canvas_width: u32, canvas_height: u32) -> Self {
        let w = canvas_width as f32;
        let h = canvas_height as f32;
        Self {
            x: 0.0,
            y: 0.0,
            w,
            h,
            image_width: w,
            image_height: h,
        }
    }

    /// Image pixels per canvas pixel.
    pub fn scale(&self) -> f32 {
        if self.w > 0.0 { self.image_width / self.w } else { 1.0 }
    }

    /// Whether a canvas point lies strictly inside the drawn image.
    pub fn contains(&self, canvas: Point) -> bool {
        self.x < canvas.x && canvas.x < self.x + self.w && self.y < canvas.y && canvas.y < self.y + self.h
    }

    /// Convert a canvas point into image pixels.
    pub fn to_image(&self, canvas: Point) -> Point {
        let scale = self.scale();
        Point::new((canvas.x - self.x) * scale, (canvas.y - self.y) * scale)
    }

    /// Convert an image point into canvas pixels.
    pub fn to_canvas(&self, image: Point) -> Point {
        let scale = self.scale();
        Point::new(image.x / scale + self.x, image.y / scale + self.y)
    }

    /// Convert an image-space length into canvas pixels.
    pub fn length_to_canvas(&self, length: f32) -> f32 {
        length / self.scale()
    }

    /// Clamp an image point onto the image bounds.
    pub fn clamp_to_image(&self, image: Point) -> Point {
        Point::new(
            image.x.max(0.0).min(self.image_width),
            image.y.max(0.0).min(self.image_height),
        )
    }
}
