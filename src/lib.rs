pub mod app;
pub mod bitrows;
pub mod error;
pub mod image;
pub mod imgproc;

pub use error::{Error, Result};
