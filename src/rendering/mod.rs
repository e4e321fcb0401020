pub mod cell;
pub mod renderer;

pub use cell::{CellRenderer, PivotSegments};
pub use renderer::{FrameRenderer, RendererError};
