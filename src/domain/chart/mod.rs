//! Chart aggregate: configuration, layout, estimation and lifecycle.

pub mod bar_width;
pub mod config;
pub mod crosshair;
pub mod lifecycle;
pub mod panes;
pub mod value_objects;

pub use config::*;
pub use crosshair::*;
pub use lifecycle::*;
pub use panes::*;
pub use value_objects::*;
