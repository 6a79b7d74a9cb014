//! Pointer-driven 2D box editor.
//!
//! The editor turns pointer events into label edits on the session's current
//! item. It owns the visible and hidden surfaces, repaints both after every
//! event, and resolves hits through the hidden surface only.
//!
//! State machine:
//! - `Free` + down on a resize handle -> `Resize`
//! - `Free` + down on a body -> `Move`
//! - `Free` + down on background -> new label, `Resize` on its initial handle
//! - `Resize`/`Move` + move -> geometry update
//! - `Resize`/`Move` + up -> normalize, drop if too small, back to `Free`

use image::RgbaImage;

use crate::config::{EditorConfig, Preferences};
use crate::constants::DEFAULT_CANVAS_SIZE;
use crate::letterbox::PadBox;
use crate::model::{Cursor, Handle, LabelAttributes, LabelId, LabelShape, Point};
use crate::session::{EventAction, Session};
use crate::surface::{DrawStyle, PickResult, Surfaces, scale_to_pad};

/// Current gesture of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Free,
    /// Dragging one handle of a label
    Resize { label: LabelId, handle: Handle },
    /// Dragging a whole label. `origin` is the label position and `click`
    /// the pointer position when the drag started, both in image pixels.
    Move {
        label: LabelId,
        origin: Point,
        click: Point,
    },
}

impl EditorState {
    pub fn is_free(&self) -> bool {
        matches!(self, EditorState::Free)
    }

    /// Label being edited by the gesture.
    pub fn label(&self) -> Option<LabelId> {
        match *self {
            EditorState::Free => None,
            EditorState::Resize { label, .. } | EditorState::Move { label, .. } => Some(label),
        }
    }
}

/// Category and flag selection shown by the host UI.
///
/// New labels are created with these values; selecting a label overwrites
/// them with the label's own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChromeState {
    pub category: String,
    pub occluded: bool,
    pub truncated: bool,
}

/// Receives UI sync requests from the editor.
pub trait EditorObserver {
    /// A label was selected; the host should show its category and flags.
    fn selection_changed(&mut self, chrome: &ChromeState);
}

impl<F> EditorObserver for F
where
    F: FnMut(&ChromeState),
{
    fn selection_changed(&mut self, chrome: &ChromeState) {
        self(chrome)
    }
}

/// Item pixels already resampled to the padding box.
struct Backdrop {
    /// Item index, source size and scaled size the pixels were built for
    key: (usize, (u32, u32), (u32, u32)),
    pixels: RgbaImage,
}

/// The 2D label editor bound to one canvas.
pub struct Editor {
    prefs: Preferences,
    surfaces: Surfaces,
    /// Client position of the canvas top-left corner
    canvas_origin: Point,
    pad: PadBox,
    state: EditorState,
    selected: Option<LabelId>,
    hover: Option<PickResult>,
    chrome: ChromeState,
    observer: Option<Box<dyn EditorObserver>>,
    backdrop: Option<Backdrop>,
}

impl Default for Editor {
    fn default() -> Self {
        let (w, h) = DEFAULT_CANVAS_SIZE;
        Self::new(w, h, &EditorConfig::default())
    }
}

impl Editor {
    pub fn new(canvas_width: u32, canvas_height: u32, config: &EditorConfig) -> Self {
        Self {
            prefs: config.preferences.clone(),
            surfaces: Surfaces::new(canvas_width, canvas_height),
            canvas_origin: Point::default(),
            pad: PadBox::identity(canvas_width, canvas_height),
            state: EditorState::Free,
            selected: None,
            hover: None,
            chrome: ChromeState {
                category: config.default_category().to_string(),
                occluded: false,
                truncated: false,
            },
            observer: None,
            backdrop: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl EditorObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Where the canvas sits in client coordinates.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// Reallocate the surfaces for a new canvas size and repaint.
    pub fn resize_canvas(&mut self, session: &Session, width: u32, height: u32) {
        self.surfaces.resize(width, height);
        self.redraw(session);
    }

    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    /// Replace the UI selection without touching any label.
    pub fn set_chrome(&mut self, chrome: ChromeState) {
        self.chrome = chrome;
    }

    /// Reset the editor for the session's current item and repaint.
    pub fn activate(&mut self, session: &Session) {
        self.state = EditorState::Free;
        self.selected = None;
        self.hover = None;
        self.backdrop = None;
        self.redraw(session);
        log::debug!(
            "Editor active on item {:?}, pad box {:?}",
            session.current_index(),
            self.pad
        );
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn selected(&self) -> Option<LabelId> {
        self.selected
    }

    /// Label and handle under the pointer as of the last pointer move.
    pub fn hover(&self) -> Option<PickResult> {
        self.hover
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn pad_box(&self) -> PadBox {
        self.pad
    }

    /// Cursor the host should show.
    pub fn cursor(&self) -> Cursor {
        match self.state {
            EditorState::Resize { .. } => Cursor::Crosshair,
            EditorState::Move { .. } => Cursor::Move,
            EditorState::Free => self.hover.map_or(Cursor::Crosshair, |hit| hit.handle.cursor()),
        }
    }

    /// Convert a client position into canvas pixels.
    pub fn canvas_position(&self, client: Point) -> Point {
        client - self.canvas_origin
    }

    /// Whether a canvas point lies inside the drawn image.
    pub fn is_within_frame(&self, canvas: Point) -> bool {
        self.pad.contains(canvas)
    }

    /// Label and handle under a canvas point, per the last redraw.
    pub fn pick(&self, canvas: Point) -> Option<PickResult> {
        self.surfaces.pick(canvas)
    }

    // ------------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------------

    pub fn on_pointer_down(&mut self, session: &mut Session, client: Point) {
        let canvas = self.canvas_position(client);
        if !self.state.is_free() {
            log::warn!("Pointer down during {:?}, finishing that gesture first", self.state);
            self.finish_gesture(session);
            self.redraw(session);
        }

        let image_pos = self.pad.to_image(canvas);
        match self.pick(canvas) {
            Some(hit) => {
                self.select(session, hit.label);
                if hit.handle.is_resize() {
                    self.state = EditorState::Resize {
                        label: hit.label,
                        handle: hit.handle,
                    };
                } else if let Some(label) = session.label(hit.label) {
                    self.state = EditorState::Move {
                        label: hit.label,
                        origin: label.shape.current_position(),
                        click: image_pos,
                    };
                }
                log::debug!("Pointer down on label {} -> {:?}", hit.label, self.state);
            }
            None => {
                let attributes = LabelAttributes {
                    category: self.chrome.category.clone(),
                    occluded: self.chrome.occluded,
                    truncated: self.chrome.truncated,
                    position: self.pad.clamp_to_image(image_pos),
                };
                let id = session.new_label(attributes);
                let handle = session
                    .label(id)
                    .map_or(Handle::BottomRight, |l| l.shape.initial_handle());
                self.selected = Some(id);
                self.state = EditorState::Resize { label: id, handle };
                log::debug!("Pointer down on background, new label {}", id);
            }
        }
        self.redraw(session);
    }

    /// Pointer moved. `button_held` tells whether the primary button is
    /// still down; a gesture without it lost its pointer-up and ends here.
    pub fn on_pointer_move(&mut self, session: &mut Session, client: Point, button_held: bool) {
        let canvas = self.canvas_position(client);
        if !self.state.is_free() && !button_held {
            log::warn!("Pointer-up was lost, ending {:?}", self.state);
            self.finish_gesture(session);
            self.redraw(session);
        }

        self.hover = self.pick(canvas);
        let image_pos = self.pad.to_image(canvas);
        match self.state {
            EditorState::Free => {}
            EditorState::Resize { label, handle } => {
                if let Some(label) = session.label_mut(label) {
                    label.shape.resize(image_pos, handle, &self.pad);
                }
            }
            EditorState::Move { label, origin, click } => {
                if let Some(label) = session.label_mut(label) {
                    label.shape.move_by(origin, click, image_pos, &self.pad);
                }
            }
        }
        self.redraw(session);
    }

    /// Pointer released, inside the canvas or not.
    pub fn on_pointer_up(&mut self, session: &mut Session) {
        self.finish_gesture(session);
        self.redraw(session);
    }

    fn finish_gesture(&mut self, session: &mut Session) {
        let (id, action) = match std::mem::take(&mut self.state) {
            EditorState::Free => return,
            EditorState::Resize { label, .. } => (label, EventAction::ResizeLabel),
            EditorState::Move { label, .. } => (label, EventAction::MoveLabel),
        };
        let Some(label) = session.label_mut(id) else {
            return;
        };

        label.shape.normalize();
        let too_small = label.shape.is_below_minimum_size(self.prefs.min_box_size);
        let position = label.shape.current_position();

        if too_small {
            log::debug!("Label {} below minimum size, dropping it", id);
            self.delete_label(session, id);
        } else {
            session.add_event(action, session.current_index(), Some(id), Some(position));
        }
    }

    // ------------------------------------------------------------------------
    // Selection edits
    // ------------------------------------------------------------------------

    fn select(&mut self, session: &Session, id: LabelId) {
        self.selected = Some(id);
        let Some(label) = session.label(id) else {
            return;
        };
        self.chrome = ChromeState {
            category: label.name.clone(),
            occluded: label.occluded,
            truncated: label.truncated,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.selection_changed(&self.chrome);
        }
    }

    fn delete_label(&mut self, session: &mut Session, id: LabelId) {
        let deleted = session.delete_label(id);
        if deleted > 0 {
            log::info!("Deleted label {} ({} with cascade)", id, deleted);
            session.add_event(EventAction::DeleteLabel, session.current_index(), Some(id), None);
        }
        if self.selected.is_some_and(|s| session.label(s).is_none_or(|l| !l.valid)) {
            self.selected = None;
        }
        if self.hover.is_some_and(|h| session.label(h.label).is_none_or(|l| !l.valid)) {
            self.hover = None;
        }
    }

    /// Delete the selected label. Returns false when nothing was selected.
    pub fn remove_selected(&mut self, session: &mut Session) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        self.state = EditorState::Free;
        self.delete_label(session, id);
        self.selected = None;
        self.redraw(session);
        true
    }

    /// Change the UI category and the selected label's category with it.
    pub fn set_category(&mut self, session: &mut Session, category: &str) {
        self.chrome.category = category.to_string();
        let Some(id) = self.selected else {
            return;
        };
        let Some(label) = session.label_mut(id) else {
            return;
        };
        label.name = category.to_string();
        session.add_event(EventAction::ChangeCategory, session.current_index(), Some(id), None);
        self.redraw(session);
    }

    pub fn set_occluded(&mut self, session: &mut Session, occluded: bool) {
        self.chrome.occluded = occluded;
        let Some(id) = self.selected else {
            return;
        };
        let Some(label) = session.label_mut(id) else {
            return;
        };
        label.occluded = occluded;
        session.add_event(EventAction::ToggleOccluded, session.current_index(), Some(id), None);
        self.redraw(session);
    }

    pub fn set_truncated(&mut self, session: &mut Session, truncated: bool) {
        self.chrome.truncated = truncated;
        let Some(id) = self.selected else {
            return;
        };
        let Some(label) = session.label_mut(id) else {
            return;
        };
        label.truncated = truncated;
        session.add_event(EventAction::ToggleTruncated, session.current_index(), Some(id), None);
        self.redraw(session);
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Clear both surfaces and repaint the current item and its labels.
    ///
    /// Must run after every geometry change before the next pick.
    pub fn redraw(&mut self, session: &Session) {
        self.surfaces.clear();
        let Some(item) = session.current_item() else {
            return;
        };

        self.pad = PadBox::compute(item.image_size(), self.surfaces.width(), self.surfaces.height());
        if let Some(pixels) = item.pixels() {
            let scaled_size = (self.pad.w.round() as u32, self.pad.h.round() as u32);
            let key = (item.index(), pixels.dimensions(), scaled_size);
            if self.backdrop.as_ref().is_none_or(|b| b.key != key) {
                log::debug!("Rescaling item {} to {:?}", item.index(), scaled_size);
                self.backdrop = scale_to_pad(pixels, &self.pad).map(|pixels| Backdrop { key, pixels });
            }
            if let Some(backdrop) = &self.backdrop {
                self.surfaces.blit_image(&backdrop.pixels, &self.pad);
            }
        }

        let resizing = match self.state {
            EditorState::Resize { label, .. } => Some(label),
            _ => None,
        };
        for label in session.visible_labels(item.index()) {
            let style = DrawStyle {
                label: label.id,
                color: session.color_of(label.id),
                selected: self.selected == Some(label.id),
                resizing: resizing == Some(label.id),
                hovered: self.hover.filter(|h| h.label == label.id).map(|h| h.handle),
                line_width: self.prefs.line_width,
                handle_radius: self.prefs.handle_radius,
                hidden_handle_radius: self.prefs.hidden_handle_radius,
            };
            label.shape.redraw(&mut self.surfaces, &self.pad, &style);
        }
    }
}
