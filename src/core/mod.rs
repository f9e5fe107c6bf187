pub mod animation;
pub mod compose;
pub mod engine;
pub mod html;
pub mod markup;
pub mod mask;
pub mod pipeline;

pub use crate::domain::model::{AnimationPayload, Assets, Page, ProfileImage, Section};
pub use crate::domain::ports::{SitePipeline, Storage};
pub use crate::utils::error::Result;
