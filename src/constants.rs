//! Global constants for the labeling kernel

/// Boxes narrower or shorter than this (image pixels) are dropped on release
pub const DEFAULT_MIN_BOX_SIZE: f32 = 5.0;

/// Radius of the visible resize handle squares (canvas pixels)
pub const DEFAULT_HANDLE_RADIUS: f32 = 4.0;

/// Radius of the resize handle squares painted on the picking surface (canvas pixels)
pub const DEFAULT_HIDDEN_HANDLE_RADIUS: f32 = 6.0;

/// Outline width of an unselected box (canvas pixels)
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Outline width multiplier for the selected box
pub const SELECTED_LINE_FACTOR: f32 = 2.0;

/// Default canvas size used when no configuration says otherwise
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1280, 720);

/// Alpha marking a covered pixel on the picking surface
pub const PICK_COVERAGE_ALPHA: u8 = 255;

/// Largest label id the picking surface can encode (red + blue channels)
pub const MAX_PICKABLE_LABEL_ID: u64 = 0xFFFF - 1;

/// Categorical base palette, indexed by root label id
pub const COLOR_PALETTE: [[u8; 3]; 20] = [
    [31, 119, 180],
    [174, 199, 232],
    [255, 127, 14],
    [255, 187, 120],
    [44, 160, 44],
    [152, 223, 138],
    [214, 39, 40],
    [255, 152, 150],
    [148, 103, 189],
    [197, 176, 213],
    [140, 86, 75],
    [196, 156, 148],
    [227, 119, 194],
    [247, 182, 210],
    [127, 127, 127],
    [199, 199, 199],
    [188, 189, 34],
    [219, 219, 141],
    [23, 190, 207],
    [158, 218, 229],
];

/// Blend ratio toward white for the second palette cycle
pub const TINT_RATIO: f32 = 0.4;

/// Blend ratio toward black for the third palette cycle
pub const SHADE_RATIO: f32 = 0.2;
