use crate::core::SitePipeline;
use crate::utils::error::Result;

pub struct SiteEngine<P: SitePipeline> {
    pipeline: P,
}

impl<P: SitePipeline> SiteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 讀取素材、組頁、輸出 HTML，不寫檔
    pub fn build(&self) -> Result<String> {
        // Load assets
        tracing::info!("Loading assets...");
        let assets = self.pipeline.load_assets()?;

        // Compose
        tracing::info!("Composing page...");
        let page = self.pipeline.compose(assets)?;
        tracing::info!("Composed {} sections", page.sections.len());

        // Render
        tracing::info!("Rendering page...");
        let document = self.pipeline.render(&page)?;
        tracing::debug!("Rendered {} bytes", document.len());

        Ok(document)
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting portfolio build...");

        let document = self.build()?;

        // Publish
        tracing::info!("Publishing page...");
        let output_path = self.pipeline.publish(&document)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose::tests::sample_assets;
    use crate::core::{Assets, Page};
    use crate::domain::model::PageMeta;
    use crate::utils::error::SiteError;
    use std::cell::RefCell;

    /// 記錄各階段呼叫順序，可指定在載入素材時失敗
    struct RecordingPipeline {
        calls: RefCell<Vec<&'static str>>,
        fail_assets: bool,
    }

    impl RecordingPipeline {
        fn new(fail_assets: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_assets,
            }
        }
    }

    impl SitePipeline for &RecordingPipeline {
        fn load_assets(&self) -> Result<Assets> {
            self.calls.borrow_mut().push("load_assets");
            if self.fail_assets {
                return Err(SiteError::ImageNotFound {
                    path: "logo.jpg".to_string(),
                });
            }
            Ok(sample_assets())
        }

        fn compose(&self, _assets: Assets) -> Result<Page> {
            self.calls.borrow_mut().push("compose");
            Ok(Page {
                meta: PageMeta {
                    title: "t".to_string(),
                    icon: None,
                    custom_css: None,
                    lottie_player_url: "https://example.com/lottie.js".to_string(),
                },
                sections: Vec::new(),
                footer: None,
            })
        }

        fn render(&self, _page: &Page) -> Result<String> {
            self.calls.borrow_mut().push("render");
            Ok("<html></html>".to_string())
        }

        fn publish(&self, _document: &str) -> Result<String> {
            self.calls.borrow_mut().push("publish");
            Ok("memory://index.html".to_string())
        }
    }

    #[test]
    fn test_run_calls_phases_in_order() {
        let pipeline = RecordingPipeline::new(false);
        let engine = SiteEngine::new(&pipeline);

        assert_eq!(engine.run().unwrap(), "memory://index.html");
        assert_eq!(
            *pipeline.calls.borrow(),
            vec!["load_assets", "compose", "render", "publish"]
        );
    }

    #[test]
    fn test_build_does_not_publish() {
        let pipeline = RecordingPipeline::new(false);
        let engine = SiteEngine::new(&pipeline);

        assert_eq!(engine.build().unwrap(), "<html></html>");
        assert!(!pipeline.calls.borrow().contains(&"publish"));
    }

    #[test]
    fn test_asset_failure_stops_the_build() {
        let pipeline = RecordingPipeline::new(true);
        let engine = SiteEngine::new(&pipeline);

        assert!(matches!(engine.run(), Err(SiteError::ImageNotFound { .. })));
        assert_eq!(*pipeline.calls.borrow(), vec!["load_assets"]);
    }
}
