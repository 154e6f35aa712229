//! Library exports for the inkboard whiteboard.
//!
//! The drawing surface controller, its configuration, the drawing store and
//! gesture scripts are exposed so hosts and tools (the CLI, the schema dumper,
//! integration tests) share one implementation.

pub mod config;
pub mod draw;
pub mod input;
pub mod script;
pub mod session;
pub mod ui;
pub mod util;

pub use config::Config;
pub use input::SurfaceController;
