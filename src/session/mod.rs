//! Saved drawing storage.
//!
//! Keeps a list of drawing records in `drawings.json`, written atomically
//! under an advisory file lock so concurrent processes never interleave.

mod options;
mod store;

pub use options::{StoreOptions, options_from_config};
pub use store::{
    DrawingRecord, clear_drawings, load_drawings, record_from_controller,
    save_drawing,
};

#[cfg(test)]
mod tests;
