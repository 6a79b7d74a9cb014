//! Label geometry: points, boxes, resize handles and the shape capability.

use serde::{Deserialize, Serialize};

use crate::letterbox::PadBox;
use crate::record::ShapeRecord;
use crate::surface::{DrawStyle, Layer, Surfaces, encode_pick};

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Interactive region of a drawn box.
///
/// Indices match the green channel of the picking surface minus one:
/// 0 is the body, 1..=8 walk clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Body,
    TopLeft,
    TopMiddle,
    TopRight,
    RightMiddle,
    BottomRight,
    BottomMiddle,
    BottomLeft,
    LeftMiddle,
}

impl Handle {
    /// The eight resize handles, in index order.
    pub const RESIZE: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopMiddle,
        Handle::TopRight,
        Handle::RightMiddle,
        Handle::BottomRight,
        Handle::BottomMiddle,
        Handle::BottomLeft,
        Handle::LeftMiddle,
    ];

    pub fn index(self) -> u8 {
        match self {
            Handle::Body => 0,
            Handle::TopLeft => 1,
            Handle::TopMiddle => 2,
            Handle::TopRight => 3,
            Handle::RightMiddle => 4,
            Handle::BottomRight => 5,
            Handle::BottomMiddle => 6,
            Handle::BottomLeft => 7,
            Handle::LeftMiddle => 8,
        }
    }

    pub fn from_index(index: u8) -> Option<Handle> {
        match index {
            0 => Some(Handle::Body),
            i => Handle::RESIZE.get(usize::from(i) - 1).copied(),
        }
    }

    pub fn is_resize(self) -> bool {
        self != Handle::Body
    }

    /// Pointer cursor to show while hovering this handle.
    pub fn cursor(self) -> Cursor {
        match self {
            Handle::Body => Cursor::Move,
            Handle::TopLeft | Handle::BottomRight => Cursor::NwseResize,
            Handle::TopRight | Handle::BottomLeft => Cursor::NeswResize,
            Handle::TopMiddle | Handle::BottomMiddle => Cursor::NsResize,
            Handle::RightMiddle | Handle::LeftMiddle => Cursor::EwResize,
        }
    }
}

/// Pointer cursor styles the editor asks the host to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Crosshair,
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
}

impl Cursor {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
        }
    }
}

/// An axis-aligned box in image pixels.
///
/// Width and height may go negative while a resize drags an edge past the
/// opposite one; [`LabelShape::normalize`] restores the invariant on release.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Box2d {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Box2d {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Zero-sized box anchored at `point`, as created by a click.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Copy with non-negative width and height covering the same area.
    pub fn normalized(&self) -> Self {
        let mut b = *self;
        if b.w < 0.0 {
            b.x += b.w;
            b.w = -b.w;
        }
        if b.h < 0.0 {
            b.y += b.h;
            b.h = -b.h;
        }
        b
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Position of a handle on the raw (possibly flipped) box.
    pub fn handle_position(&self, handle: Handle) -> Point {
        let (left, top) = (self.x, self.y);
        let (right, bottom) = (self.x + self.w, self.y + self.h);
        let (mid_x, mid_y) = (self.x + self.w / 2.0, self.y + self.h / 2.0);
        match handle {
            Handle::Body => self.center(),
            Handle::TopLeft => Point::new(left, top),
            Handle::TopMiddle => Point::new(mid_x, top),
            Handle::TopRight => Point::new(right, top),
            Handle::RightMiddle => Point::new(right, mid_y),
            Handle::BottomRight => Point::new(right, bottom),
            Handle::BottomMiddle => Point::new(mid_x, bottom),
            Handle::BottomLeft => Point::new(left, bottom),
            Handle::LeftMiddle => Point::new(left, mid_y),
        }
    }

    fn drag_left(&mut self, x: f32) {
        self.w += self.x - x;
        self.x = x;
    }

    fn drag_top(&mut self, y: f32) {
        self.h += self.y - y;
        self.y = y;
    }

    fn drag_right(&mut self, x: f32) {
        self.w = x - self.x;
    }

    fn drag_bottom(&mut self, y: f32) {
        self.h = y - self.y;
    }
}

/// Capability shared by every label shape kind.
pub trait LabelShape {
    /// Handle a freshly created shape is resized by during the creating drag.
    fn initial_handle(&self) -> Handle;

    /// Anchor used as the origin of a move gesture.
    fn current_position(&self) -> Point;

    /// Drag `handle` to the image point `pos`, clamped to the image.
    fn resize(&mut self, pos: Point, handle: Handle, pad: &PadBox);

    /// Translate so the shape sits at `origin + (pos - click)`, kept inside the image.
    fn move_by(&mut self, origin: Point, click: Point, pos: Point, pad: &PadBox);

    /// Flip negative extents so the stored size is non-negative.
    fn normalize(&mut self);

    fn is_below_minimum_size(&self, min_size: f32) -> bool;

    /// Paint onto the visible surface and the picking surface.
    fn redraw(&self, surfaces: &mut Surfaces, pad: &PadBox, style: &DrawStyle);

    fn to_record(&self) -> ShapeRecord;
}

impl LabelShape for Box2d {
    fn initial_handle(&self) -> Handle {
        Handle::BottomRight
    }

    fn current_position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn resize(&mut self, pos: Point, handle: Handle, pad: &PadBox) {
        let pos = pad.clamp_to_image(pos);
        match handle {
            Handle::Body => {}
            Handle::TopLeft => {
                self.drag_left(pos.x);
                self.drag_top(pos.y);
            }
            Handle::TopMiddle => self.drag_top(pos.y),
            Handle::TopRight => {
                self.drag_right(pos.x);
                self.drag_top(pos.y);
            }
            Handle::RightMiddle => self.drag_right(pos.x),
            Handle::BottomRight => {
                self.drag_right(pos.x);
                self.drag_bottom(pos.y);
            }
            Handle::BottomMiddle => self.drag_bottom(pos.y),
            Handle::BottomLeft => {
                self.drag_left(pos.x);
                self.drag_bottom(pos.y);
            }
            Handle::LeftMiddle => self.drag_left(pos.x),
        }
    }

    fn move_by(&mut self, origin: Point, click: Point, pos: Point, pad: &PadBox) {
        let target = origin + (pos - click);
        let size = self.normalized();
        // max after min so an oversized box pins to the top-left corner
        self.x = target.x.min(pad.image_width - size.w).max(0.0);
        self.y = target.y.min(pad.image_height - size.h).max(0.0);
    }

    fn normalize(&mut self) {
        *self = self.normalized();
    }

    fn is_below_minimum_size(&self, min_size: f32) -> bool {
        let b = self.normalized();
        b.w < min_size || b.h < min_size
    }

    fn redraw(&self, surfaces: &mut Surfaces, pad: &PadBox, style: &DrawStyle) {
        let body = self.normalized();
        let top_left = pad.to_canvas(body.current_position());
        let w = pad.length_to_canvas(body.w);
        let h = pad.length_to_canvas(body.h);

        let color = style.visible_color();
        let line_width = style.effective_line_width();
        surfaces.stroke_rect(Layer::Visible, top_left.x, top_left.y, w, h, line_width, color);

        if style.shows_handles() {
            for handle in Handle::RESIZE {
                let center = pad.to_canvas(self.handle_position(handle));
                let radius = if style.hovered == Some(handle) {
                    style.handle_radius * 1.5
                } else {
                    style.handle_radius
                };
                surfaces.fill_square(Layer::Visible, center, radius, color);
            }
        }

        let Some(body_code) = encode_pick(style.label, Handle::Body) else {
            log::warn!("Label {} cannot be encoded on the picking surface", style.label);
            return;
        };
        surfaces.fill_rect(Layer::Hidden, top_left.x, top_left.y, w, h, body_code);
        for handle in Handle::RESIZE {
            if let Some(code) = encode_pick(style.label, handle) {
                let center = pad.to_canvas(self.handle_position(handle));
                surfaces.fill_square(Layer::Hidden, center, style.hidden_handle_radius, code);
            }
        }
    }

    fn to_record(&self) -> ShapeRecord {
        ShapeRecord::Box2d(self.normalized())
    }
}

/// Closed set of shape kinds a label can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box2d(Box2d),
}

impl Shape {
    /// The box geometry, if this is a box.
    pub fn as_box2d(&self) -> Option<&Box2d> {
        match self {
            Shape::Box2d(b) => Some(b),
        }
    }
}

impl From<ShapeRecord> for Shape {
    fn from(record: ShapeRecord) -> Self {
        match record {
            ShapeRecord::Box2d(b) => Shape::Box2d(b),
        }
    }
}

impl LabelShape for Shape {
    fn initial_handle(&self) -> Handle {
        match self {
            Shape::Box2d(b) => b.initial_handle(),
        }
    }

    fn current_position(&self) -> Point {
        match self {
            Shape::Box2d(b) => b.current_position(),
        }
    }

    fn resize(&mut self, pos: Point, handle: Handle, pad: &PadBox) {
        match self {
            Shape::Box2d(b) => b.resize(pos, handle, pad),
        }
    }

    fn move_by(&mut self, origin: Point, click: Point, pos: Point, pad: &PadBox) {
        match self {
            Shape::Box2d(b) => b.move_by(origin, click, pos, pad),
        }
    }

    fn normalize(&mut self) {
        match self {
            Shape::Box2d(b) => b.normalize(),
        }
    }

    fn is_below_minimum_size(&self, min_size: f32) -> bool {
        match self {
            Shape::Box2d(b) => b.is_below_minimum_size(min_size),
        }
    }

    fn redraw(&self, surfaces: &mut Surfaces, pad: &PadBox, style: &DrawStyle) {
        match self {
            Shape::Box2d(b) => b.redraw(surfaces, pad, style),
        }
    }

    fn to_record(&self) -> ShapeRecord {
        match self {
            Shape::Box2d(b) => b.to_record(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> PadBox {
        PadBox::identity(640, 480)
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_handle_index_round_trip() {
        for index in 0..=8u8 {
            let handle = Handle::from_index(index).expect("valid handle index");
            assert_eq!(handle.index(), index);
        }
        assert_eq!(Handle::from_index(9), None);
        assert_eq!(Handle::from_index(255), None);
    }

    #[test]
    fn test_handle_cursors() {
        assert_eq!(Handle::Body.cursor(), Cursor::Move);
        assert_eq!(Handle::BottomRight.cursor().css_name(), "nwse-resize");
        assert_eq!(Handle::BottomLeft.cursor().css_name(), "nesw-resize");
        assert_eq!(Handle::LeftMiddle.cursor().css_name(), "ew-resize");
    }

    #[test]
    fn test_resize_from_creation_anchor() {
        let mut b = Box2d::at(Point::new(100.0, 100.0));
        b.resize(Point::new(150.0, 130.0), b.initial_handle(), &pad());
        assert_eq!(b, Box2d::new(100.0, 100.0, 50.0, 30.0));
    }

    #[test]
    fn test_resize_past_opposite_corner_normalizes() {
        let mut b = Box2d::new(100.0, 100.0, 20.0, 20.0);
        b.resize(Point::new(130.0, 130.0), Handle::TopLeft, &pad());
        assert_eq!(b, Box2d::new(130.0, 130.0, -10.0, -10.0));

        b.normalize();
        assert_eq!(b, Box2d::new(120.0, 120.0, 10.0, 10.0));
    }

    #[test]
    fn test_edge_handles_keep_other_axis() {
        let mut b = Box2d::new(10.0, 10.0, 40.0, 40.0);
        b.resize(Point::new(999.0, 70.0), Handle::BottomMiddle, &pad());
        assert_eq!(b, Box2d::new(10.0, 10.0, 40.0, 60.0));

        b.resize(Point::new(0.0, 999.0), Handle::LeftMiddle, &pad());
        assert_eq!(b, Box2d::new(0.0, 10.0, 50.0, 60.0));
    }

    #[test]
    fn test_resize_clamps_to_image() {
        let mut b = Box2d::new(600.0, 400.0, 10.0, 10.0);
        b.resize(Point::new(700.0, 500.0), Handle::BottomRight, &pad());
        assert_eq!(b, Box2d::new(600.0, 400.0, 40.0, 80.0));
    }

    #[test]
    fn test_move_translates_and_clamps() {
        let mut b = Box2d::new(10.0, 10.0, 40.0, 20.0);
        let origin = b.current_position();
        b.move_by(origin, Point::new(20.0, 20.0), Point::new(45.0, 30.0), &pad());
        assert_eq!(b, Box2d::new(35.0, 20.0, 40.0, 20.0));

        b.move_by(origin, Point::new(20.0, 20.0), Point::new(2000.0, -500.0), &pad());
        assert_eq!(b, Box2d::new(600.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_minimum_size() {
        assert!(Box2d::new(0.0, 0.0, 4.0, 50.0).is_below_minimum_size(5.0));
        assert!(Box2d::new(0.0, 0.0, 50.0, -4.0).is_below_minimum_size(5.0));
        assert!(!Box2d::new(0.0, 0.0, -6.0, 6.0).is_below_minimum_size(5.0));
    }

    #[test]
    fn test_record_is_normalized() {
        let shape = Shape::Box2d(Box2d::new(50.0, 50.0, -20.0, 10.0));
        assert_eq!(shape.to_record(), ShapeRecord::Box2d(Box2d::new(30.0, 50.0, 20.0, 10.0)));
    }
}
