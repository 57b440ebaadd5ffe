pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::policy::TransformPolicy;
pub use crate::core::{engine::NormalizeEngine, pipeline::PlacePipeline};
pub use domain::model::{CanonicalPlace, PlaceDetails, PlaceFormat, PlaceResult};
pub use utils::error::{PlacekitError, Result};
