use crate::config::content_config::ContentConfig;
use crate::core::compose::compose_page;
use crate::core::html::HtmlRenderer;
use crate::core::{AnimationPayload, Assets, Page, ProfileImage, SitePipeline, Storage};
use crate::utils::error::Result;

pub struct PortfolioPipeline<S: Storage> {
    storage: S,
    config: ContentConfig,
    renderer: HtmlRenderer,
}

impl<S: Storage> PortfolioPipeline<S> {
    pub fn new(storage: S, config: ContentConfig) -> Result<Self> {
        Ok(Self {
            storage,
            config,
            renderer: HtmlRenderer::new()?,
        })
    }
}

impl<S: Storage> SitePipeline for PortfolioPipeline<S> {
    fn load_assets(&self) -> Result<Assets> {
        let image_path = self.config.profile_image_path();
        tracing::debug!("Loading profile image from: {}", image_path.display());
        let profile_image = ProfileImage::load(&image_path)?;
        tracing::info!(
            "🖼️ Profile image {}x{} masked",
            profile_image.width,
            profile_image.height
        );

        let animation_path = self.config.animation_path();
        tracing::debug!("Loading animation from: {}", animation_path.display());
        let animation = AnimationPayload::load(&animation_path)?;
        let summary = &animation.summary;
        tracing::info!(
            "🎞️ Animation '{}' loaded ({}x{}, {})",
            summary.name.as_deref().unwrap_or("unnamed"),
            summary.width.map(|w| w.to_string()).unwrap_or_else(|| "?".to_string()),
            summary.height.map(|h| h.to_string()).unwrap_or_else(|| "?".to_string()),
            summary
                .duration_seconds()
                .map(|d| format!("{:.1}s", d))
                .unwrap_or_else(|| "unknown duration".to_string())
        );

        Ok(Assets {
            profile_image,
            animation,
        })
    }

    fn compose(&self, assets: Assets) -> Result<Page> {
        Ok(compose_page(&self.config, assets))
    }

    fn render(&self, page: &Page) -> Result<String> {
        self.renderer.render(page)
    }

    fn publish(&self, document: &str) -> Result<String> {
        self.storage
            .write_file(self.config.output_file_name(), document.as_bytes())
    }
}
