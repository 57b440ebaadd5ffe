pub mod engine;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{NormalizeResult, PlaceDetails};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
