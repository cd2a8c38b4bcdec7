pub mod candle_renderer;
pub mod canvas_painter;
pub mod line_renderer;
pub mod surface;
pub mod volume_renderer;

// Re-exports for convenient access
pub use canvas_painter::CanvasPainter;
pub use surface::BitmapSurface;
pub use volume_renderer::{VolumeBarRect, VolumePaneRenderer, VolumeRenderOptions};
