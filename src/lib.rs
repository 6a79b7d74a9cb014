//! SAT label - interactive box labeling kernel
//!
//! A pointer-driven editor for 2D bounding-box labels over session items,
//! with color-coded hidden-surface picking, a letterboxed image mapping, an
//! audit event log and submission records. The 3D translation gizmo units
//! live in the companion crate, re-exported as [`gizmo`].

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod letterbox;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod model;
pub mod record;
pub mod session;
pub mod surface;

pub use config::{ConfigError, EditorConfig, LogLevel, Preferences};
pub use editor::{ChromeState, Editor, EditorObserver, EditorState};
pub use error::SessionError;
pub use letterbox::PadBox;
pub use model::{Box2d, Cursor, Handle, Item, Label, LabelAttributes, LabelId, LabelShape, Point, Shape};
pub use record::{AssignmentRecord, ItemRecord, LabelRecord, ShapeRecord, SubmissionRecord};
pub use session::{Event, EventAction, Session};
pub use surface::{PickResult, Surfaces};

pub use sat_gizmo as gizmo;
