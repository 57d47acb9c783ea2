pub mod controls;
pub mod viewer;

pub use controls::TransformControls;
pub use viewer::FreeScaleViewer;
