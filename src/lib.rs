pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, content_config::ContentConfig, CliConfig};
pub use crate::core::{engine::SiteEngine, pipeline::PortfolioPipeline};
pub use domain::model::{AnimationPayload, Page, ProfileImage, Section, SectionKind};
pub use utils::error::{Result, SiteError};
