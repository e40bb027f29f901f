//! Loading and writing labeled pixel sample files for huetree.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::SampleSet;
pub use error::IoError;
pub use reader::SampleReader;
pub use writer::SampleWriter;
