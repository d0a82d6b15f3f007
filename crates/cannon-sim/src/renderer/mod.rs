pub mod buffer;
pub mod camera;
pub mod sink;

// Re-export key types for convenient access
pub use buffer::{DrawBuffer, DrawInstance, OutlineVertex};
pub use sink::{CirclePrimitive, Color, RectPrimitive, RenderSink};
