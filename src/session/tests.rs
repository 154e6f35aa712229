use super::store::write_atomically;
use super::*;
use crate::config::{Config, StorageConfig};
use crate::draw::color::{BACKGROUND, RED};
use crate::draw::{Rgba, Shape};
use crate::input::{ControllerSettings, PointerEvent, Region, SurfaceController, Tool};
use fs2::FileExt;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn drawn_controller() -> SurfaceController {
    let mut controller = SurfaceController::new(ControllerSettings::default());
    controller
        .init_surface(Region::sized(60.0, 40.0), 1.0)
        .unwrap();
    controller.set_tool(Tool::Rectangle);
    controller.set_color(RED);
    controller.on_pointer_down(&PointerEvent::mouse(10.0, 10.0, 1));
    controller.on_pointer_up(&PointerEvent::mouse(50.0, 30.0, 0));
    controller
}

fn record_with_width(width: u32) -> DrawingRecord {
    DrawingRecord {
        saved_at: format!("2024-01-01T00:00:{:02}+00:00", width % 60),
        width,
        height: 10,
        background: BACKGROUND,
        shapes: Vec::new(),
    }
}

#[test]
fn record_requires_recorded_strokes() {
    let mut controller = SurfaceController::new(ControllerSettings::default());
    assert!(record_from_controller(&controller).is_none());

    controller
        .init_surface(Region::sized(20.0, 20.0), 1.0)
        .unwrap();
    assert!(record_from_controller(&controller).is_none());
}

#[test]
fn record_captures_size_background_and_strokes() {
    let controller = drawn_controller();
    let record = record_from_controller(&controller).unwrap();

    assert_eq!((record.width, record.height), (60, 40));
    assert_eq!(record.background, BACKGROUND);
    assert_eq!(record.shapes.len(), 1);
    assert!(matches!(record.shapes[0], Shape::Outline { .. }));
    assert!(chrono::DateTime::parse_from_rfc3339(&record.saved_at).is_ok());
}

#[test]
fn load_without_store_is_empty() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().join("missing"));
    assert!(load_drawings(&options).unwrap().is_empty());
}

#[test]
fn save_appends_and_load_returns_in_order() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().to_path_buf());

    let record = record_from_controller(&drawn_controller()).unwrap();
    assert_eq!(save_drawing(record.clone(), &options).unwrap(), 1);
    assert_eq!(save_drawing(record_with_width(7), &options).unwrap(), 2);

    let loaded = load_drawings(&options).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], record);
    assert_eq!(loaded[1].width, 7);

    let raw = fs::read_to_string(options.drawings_file_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert!(value["drawings"].is_array());
    assert!(!options.base_dir.join("drawings.json.tmp").exists());
}

#[test]
fn oldest_records_are_evicted() {
    let temp = TempDir::new().unwrap();
    let mut options = StoreOptions::new(temp.path().to_path_buf());
    options.max_records = 2;

    for width in 1..=4 {
        save_drawing(record_with_width(width), &options).unwrap();
    }

    let widths: Vec<u32> = load_drawings(&options)
        .unwrap()
        .iter()
        .map(|r| r.width)
        .collect();
    assert_eq!(widths, vec![3, 4]);
}

#[test]
fn zero_limit_keeps_everything() {
    let temp = TempDir::new().unwrap();
    let mut options = StoreOptions::new(temp.path().to_path_buf());
    options.max_records = 0;

    for width in 1..=5 {
        save_drawing(record_with_width(width), &options).unwrap();
    }
    assert_eq!(load_drawings(&options).unwrap().len(), 5);
}

#[test]
fn corrupt_store_reports_path() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().to_path_buf());
    fs::write(options.drawings_file_path(), "{ not json").unwrap();

    let err = load_drawings(&options).unwrap_err();
    assert!(format!("{err:#}").contains("drawings.json"));
}

#[test]
fn clear_removes_drawings_and_keeps_lock_file() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().to_path_buf());

    assert!(!clear_drawings(&options).unwrap());

    save_drawing(record_with_width(3), &options).unwrap();
    assert!(clear_drawings(&options).unwrap());
    assert!(!options.drawings_file_path().exists());
    assert!(options.lock_file_path().exists());
    assert!(load_drawings(&options).unwrap().is_empty());
}

#[test]
fn clear_without_store_directory_is_noop() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().join("missing"));

    assert!(!clear_drawings(&options).unwrap());
    assert!(!options.base_dir.exists());
}

#[test]
fn clear_waits_for_store_lock() {
    let temp = TempDir::new().unwrap();
    let options = StoreOptions::new(temp.path().to_path_buf());
    save_drawing(record_with_width(3), &options).unwrap();

    let held = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(options.lock_file_path())
        .unwrap();
    held.lock_exclusive().unwrap();

    let (tx, rx) = mpsc::channel();
    let clearing = options.clone();
    let worker = thread::spawn(move || {
        tx.send(clear_drawings(&clearing).unwrap()).unwrap();
    });

    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert!(options.drawings_file_path().exists());

    held.unlock().unwrap();
    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    worker.join().unwrap();

    assert!(!options.drawings_file_path().exists());
    assert!(options.lock_file_path().exists());
}

#[test]
fn failed_write_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("drawings.json");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("occupied"), "x").unwrap();

    let err = write_atomically(&target, b"{}").unwrap_err();
    assert!(format!("{err:#}").contains("failed to move temporary drawing file"));
    assert!(!temp.path().join("drawings.json.tmp").exists());
    assert!(target.join("occupied").exists());
}

#[test]
fn loaded_record_matches_live_surface() {
    let mut controller = drawn_controller();
    let record = record_from_controller(&controller).unwrap();

    let mut loaded = SurfaceController::new(ControllerSettings::default());
    loaded.load_record(&record).unwrap();
    let rendered = loaded.surface_mut().unwrap();
    assert_eq!(rendered.logical_size(), (60, 40));

    let live = controller.surface_mut().unwrap();
    for (x, y) in [(10, 20), (50, 20), (30, 30), (30, 20), (0, 0)] {
        assert_eq!(rendered.pixel(x, y), live.pixel(x, y), "pixel ({x}, {y})");
    }
    assert_eq!(rendered.pixel(10, 20), Some(Rgba::from_color(RED)));
}

#[test]
fn options_follow_storage_config() {
    let storage = StorageConfig {
        directory: Some(PathBuf::from("/tmp/inkboard-drawings")),
        max_records: 7,
    };
    let options = options_from_config(&storage, &PathBuf::from("/unused")).unwrap();
    assert_eq!(options.base_dir, PathBuf::from("/tmp/inkboard-drawings"));
    assert_eq!(options.max_records, 7);
    assert_eq!(
        options.drawings_file_path(),
        PathBuf::from("/tmp/inkboard-drawings/drawings.json")
    );
}

#[test]
fn default_directory_is_named_after_the_app() {
    let config = Config::default();
    let options = options_from_config(&config.storage, &PathBuf::from("/cfg")).unwrap();
    assert!(options.base_dir.ends_with("inkboard"));
    assert_eq!(options.max_records, 100);
}
