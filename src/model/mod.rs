//! Data models for the labeling session.

mod item;
mod label;
mod shape;

pub use item::Item;
pub use label::{Label, LabelAttributes, LabelId, OCCLUDED_ATTRIBUTE, TRUNCATED_ATTRIBUTE};
pub use shape::{Box2d, Cursor, Handle, LabelShape, Point, Shape};
