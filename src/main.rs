//! Scripted demo: replays pointer input against an assignment and prints the
//! resulting submission as JSON.
//!
//! Usage: `sat-label-demo <assignment.json> [script.json] [snapshot.png]`

use std::path::Path;

use image::RgbaImage;
use serde::Deserialize;

use sat_label::logging;
use sat_label::{AssignmentRecord, Editor, EditorConfig, Point, Session, SessionError};

/// One step of a pointer script.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptStep {
    Down { x: f32, y: f32 },
    Move {
        x: f32,
        y: f32,
        #[serde(default = "default_held")]
        held: bool,
    },
    Up,
    Goto { index: isize },
    Category { name: String },
    Occluded { value: bool },
    Truncated { value: bool },
    Remove,
}

fn default_held() -> bool {
    true
}

/// Decode PNG or JPEG bytes into RGBA pixels.
fn decode_pixels(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Hand decoded pixels to the session for items whose url is a local file.
fn load_items(session: &mut Session) {
    let urls: Vec<String> = session.items().iter().map(|i| i.url().to_string()).collect();
    for (index, url) in urls.iter().enumerate() {
        let pixels = if Path::new(url).is_file() {
            match std::fs::read(url).map_err(image::ImageError::IoError).and_then(|b| decode_pixels(&b)) {
                Ok(pixels) => Some(pixels),
                Err(e) => {
                    log::warn!("Failed to decode {}: {}", url, e);
                    None
                }
            }
        } else {
            None
        };
        session.item_loaded(index, pixels);
    }
}

fn replay(editor: &mut Editor, session: &mut Session, steps: &[ScriptStep]) {
    for step in steps {
        match step {
            ScriptStep::Down { x, y } => editor.on_pointer_down(session, Point::new(*x, *y)),
            ScriptStep::Move { x, y, held } => editor.on_pointer_move(session, Point::new(*x, *y), *held),
            ScriptStep::Up => editor.on_pointer_up(session),
            ScriptStep::Goto { index } => {
                if session.goto_item(*index).is_some() {
                    editor.activate(session);
                }
            }
            ScriptStep::Category { name } => editor.set_category(session, name),
            ScriptStep::Occluded { value } => editor.set_occluded(session, *value),
            ScriptStep::Truncated { value } => editor.set_truncated(session, *value),
            ScriptStep::Remove => {
                editor.remove_selected(session);
            }
        }
    }
}

fn run(args: &[String], config: &EditorConfig) -> Result<(), SessionError> {
    let Some(assignment_path) = args.get(1) else {
        eprintln!("Usage: sat-label-demo <assignment.json> [script.json] [snapshot.png]");
        return Ok(());
    };

    let assignment = AssignmentRecord::from_json(&std::fs::read_to_string(assignment_path)?)?;
    let mut session = Session::from_assignment(&assignment);
    load_items(&mut session);

    let (width, height) = sat_label::constants::DEFAULT_CANVAS_SIZE;
    let mut editor = Editor::new(width, height, config);
    editor.set_observer(|chrome: &sat_label::ChromeState| {
        log::info!(
            "Selection: {} (occluded: {}, truncated: {})",
            chrome.category,
            chrome.occluded,
            chrome.truncated
        );
    });
    editor.activate(&session);

    if let Some(script_path) = args.get(2) {
        let steps: Vec<ScriptStep> = serde_json::from_str(&std::fs::read_to_string(script_path)?)?;
        log::info!("Replaying {} script steps", steps.len());
        replay(&mut editor, &mut session, &steps);
    }

    if let Some(snapshot_path) = args.get(3) {
        match editor.surfaces().visible().save(snapshot_path) {
            Ok(()) => log::info!("Saved canvas snapshot to {}", snapshot_path),
            Err(e) => log::warn!("Failed to save snapshot {}: {}", snapshot_path, e),
        }
    }

    println!("{}", session.submit().to_json()?);
    Ok(())
}

fn main() {
    let config = EditorConfig::load_from_default_path().unwrap_or_default();
    logging::init(config.preferences.log_level);

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args, &config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 6, Rgb([200, 40, 40]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).expect("encodes");
        bytes.into_inner()
    }

    #[test]
    fn test_decode_jpeg_and_png() {
        for format in [ImageFormat::Jpeg, ImageFormat::Png] {
            let pixels = decode_pixels(&encoded(format)).expect("decodes");
            assert_eq!(pixels.dimensions(), (8, 6));
        }
    }

    #[test]
    fn test_decoded_item_is_letterboxed() {
        let mut session = Session::new();
        session.new_item("photo.jpg");
        let pixels = decode_pixels(&encoded(ImageFormat::Jpeg)).expect("decodes");
        session.item_loaded(0, Some(pixels));

        let mut editor = Editor::new(400, 100, &EditorConfig::default());
        editor.activate(&session);
        let pad = editor.pad_box();
        assert_eq!(pad.image_width, 8.0);
        assert!(pad.x > 0.0);
    }

    #[test]
    fn test_script_steps_parse() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[{"op":"down","x":1,"y":2},{"op":"move","x":3,"y":4},{"op":"up"},{"op":"goto","index":-1}]"#,
        )
        .expect("parses");
        assert!(matches!(steps[1], ScriptStep::Move { held: true, .. }));
        assert!(matches!(steps[3], ScriptStep::Goto { index: -1 }));
    }
}
