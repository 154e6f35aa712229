mod actions;
mod core;
mod pointer;

pub use self::core::{
    ControllerSettings, DrawingState, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, Region, SurfaceController,
};
