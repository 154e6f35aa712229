use super::options::StoreOptions;
use crate::draw::{Color, Shape};
use crate::input::SurfaceController;
use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

/// One saved drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    /// RFC 3339 timestamp of the save
    pub saved_at: String,
    /// Logical surface width at save time
    pub width: u32,
    /// Logical surface height at save time
    pub height: u32,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DrawingsFile {
    version: u32,
    #[serde(default)]
    drawings: Vec<DrawingRecord>,
}

/// Builds a record from the controller's committed strokes.
///
/// Returns `None` when there is no surface or nothing has been recorded.
pub fn record_from_controller(controller: &SurfaceController) -> Option<DrawingRecord> {
    let surface = controller.surface()?;
    let frame = controller.frame();
    if frame.is_empty() {
        return None;
    }

    let (width, height) = surface.logical_size();
    Some(DrawingRecord {
        saved_at: Utc::now().to_rfc3339(),
        width,
        height,
        background: surface.background(),
        shapes: frame.shapes.clone(),
    })
}

/// Appends `record` to the store.
///
/// The oldest records are evicted beyond `max_records`. Returns the number of
/// records kept.
pub fn save_drawing(record: DrawingRecord, options: &StoreOptions) -> Result<usize> {
    fs::create_dir_all(&options.base_dir).with_context(|| {
        format!(
            "failed to create drawing store directory {}",
            options.base_dir.display()
        )
    })?;

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock drawing store {}", lock_path.display()))?;

    let result = save_drawing_inner(record, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing store {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_drawing_inner(record: DrawingRecord, options: &StoreOptions) -> Result<usize> {
    let drawings_path = options.drawings_file_path();
    let mut drawings = if drawings_path.exists() {
        read_drawings(&drawings_path)?
    } else {
        Vec::new()
    };

    drawings.push(record);
    enforce_record_limit(&mut drawings, options.max_records);

    let payload = DrawingsFile {
        version: CURRENT_VERSION,
        drawings,
    };
    let json_bytes =
        serde_json::to_vec_pretty(&payload).context("failed to serialise drawing store")?;

    write_atomically(&drawings_path, &json_bytes)?;

    info!(
        "Saved drawing to {} ({} records, {} bytes)",
        drawings_path.display(),
        payload.drawings.len(),
        json_bytes.len()
    );

    Ok(payload.drawings.len())
}

/// Loads every saved drawing, oldest first.
///
/// A missing store yields an empty list.
pub fn load_drawings(options: &StoreOptions) -> Result<Vec<DrawingRecord>> {
    let drawings_path = options.drawings_file_path();
    if !drawings_path.exists() {
        debug!(
            "No drawing store at {}, nothing to load",
            drawings_path.display()
        );
        return Ok(Vec::new());
    }

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = read_drawings(&drawings_path);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing store {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

/// Removes every saved drawing.
///
/// Runs under the exclusive store lock so it never races a concurrent save.
/// The lock file itself is kept. Returns whether a store file was removed.
pub fn clear_drawings(options: &StoreOptions) -> Result<bool> {
    if !options.base_dir.is_dir() {
        return Ok(false);
    }

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock drawing store {}", lock_path.display()))?;

    let result = remove_file_if_exists(&options.drawings_file_path());

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing store {}: {}",
            lock_path.display(),
            err
        )
    });

    let removed = result?;
    if removed {
        info!("Cleared drawing store in {}", options.base_dir.display());
    }
    Ok(removed)
}

/// Writes `bytes` to a sibling temp file, syncs it, and renames it over `target`.
///
/// The temp file is removed again when any step fails.
pub(super) fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_path(target);
    let result = write_and_rename(&tmp_path, target, bytes);
    if result.is_err() && tmp_path.exists() {
        if let Err(err) = fs::remove_file(&tmp_path) {
            warn!(
                "failed to remove temporary drawing file {}: {}",
                tmp_path.display(),
                err
            );
        }
    }
    result
}

fn write_and_rename(tmp_path: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary drawing file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(bytes)
            .context("failed to write drawing store")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary drawing file")?;
    }

    fs::rename(tmp_path, target).with_context(|| {
        format!(
            "failed to move temporary drawing file {} -> {}",
            tmp_path.display(),
            target.display()
        )
    })
}

fn read_drawings(path: &Path) -> Result<Vec<DrawingRecord>> {
    let mut contents = String::new();
    File::open(path)
        .with_context(|| format!("failed to open drawing store {}", path.display()))?
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read drawing store {}", path.display()))?;

    let file: DrawingsFile = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse drawing store {}", path.display()))?;

    if file.version > CURRENT_VERSION {
        warn!(
            "Drawing store {} has version {} (newer than {}); reading anyway",
            path.display(),
            file.version,
            CURRENT_VERSION
        );
    }

    Ok(file.drawings)
}

fn enforce_record_limit(drawings: &mut Vec<DrawingRecord>, max_records: usize) {
    if max_records == 0 || drawings.len() <= max_records {
        return;
    }

    let excess = drawings.len() - max_records;
    warn!(
        "Drawing store holds more than {} records; dropping the {} oldest",
        max_records, excess
    );
    drawings.drain(..excess);
}

fn open_lock_file(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open drawing lock file {}", lock_path.display()))
}

fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{counter}"));
    }
    candidate
}
