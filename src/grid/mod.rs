mod buffer;
mod cell;
mod dataset;
mod frame;
mod index;

use index::EnvelopeIndex;
pub(crate) use buffer::check_radius;
pub use buffer::{buffer_shape, BufferedCells};
pub use cell::{CellId, GridCell};
pub(crate) use dataset::validate_geometry;
pub use dataset::GridDataset;
