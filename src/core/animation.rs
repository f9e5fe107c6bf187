use crate::domain::model::{AnimationPayload, AnimationSummary};
use crate::utils::error::{Result, SiteError};
use std::io::ErrorKind;
use std::path::Path;

impl AnimationPayload {
    /// 讀取 Lottie JSON。內容只當成一般 JSON 物件，實際播放交給瀏覽器端的 player。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SiteError::AnimationNotFound {
                path: path_str.clone(),
            },
            _ => SiteError::AnimationRead {
                path: path_str.clone(),
                source: e,
            },
        })?;

        Self::from_json_str(path, &content)
    }

    pub fn from_json_str<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let data: serde_json::Value =
            serde_json::from_str(content).map_err(|source| SiteError::AnimationParse {
                path: path_str.clone(),
                source,
            })?;

        if !data.is_object() {
            return Err(SiteError::InvalidAnimation {
                path: path_str,
                reason: "top-level value must be a JSON object".to_string(),
            });
        }

        // 檔頭欄位型別不對時不視為錯誤，只是沒有摘要
        let summary = serde_json::from_value::<AnimationSummary>(data.clone()).unwrap_or_else(|e| {
            tracing::warn!("Animation header of {} not recognised: {}", path_str, e);
            AnimationSummary::default()
        });

        Ok(Self {
            source_path: path.to_path_buf(),
            data,
            summary,
        })
    }

    /// 可直接放進 `<script type="application/json">` 的字串
    pub fn to_embedded_json(&self) -> Result<String> {
        let json = serde_json::to_string(&self.data)?;
        Ok(json.replace("</", "<\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorCategory, ErrorSeverity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LOTTIE: &str = r#"{"v":"5.7.4","nm":"coding","fr":30,"ip":0,"op":120,"w":512,"h":512,"layers":[]}"#;

    #[test]
    fn test_parse_summary() {
        let payload = AnimationPayload::from_json_str("coding.json", LOTTIE).unwrap();

        assert_eq!(payload.summary.name.as_deref(), Some("coding"));
        assert_eq!(payload.summary.width, Some(512));
        assert_eq!(payload.summary.duration_seconds(), Some(4.0));
        assert!(payload.data.get("layers").is_some());
    }

    #[test]
    fn test_unrecognised_header_still_loads() {
        let payload =
            AnimationPayload::from_json_str("odd.json", r#"{"w":"wide","layers":[]}"#).unwrap();
        assert_eq!(payload.summary, AnimationSummary::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOTTIE.as_bytes()).unwrap();

        let payload = AnimationPayload::load(file.path()).unwrap();
        assert_eq!(payload.source_path, file.path());
        assert_eq!(payload.summary.frame_rate, Some(30.0));
    }

    #[test]
    fn test_missing_file() {
        let err = AnimationPayload::load("nowhere/coding.json").unwrap_err();
        assert!(matches!(err, SiteError::AnimationNotFound { .. }));
    }

    #[test]
    fn test_unreadable_file_is_asset_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x7b, 0x7d]).unwrap();

        let err = AnimationPayload::load(file.path()).unwrap_err();
        assert!(matches!(err, SiteError::AnimationRead { .. }));
        assert_eq!(err.category(), ErrorCategory::Asset);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let dir = tempfile::TempDir::new().unwrap();
        let err = AnimationPayload::load(dir.path()).unwrap_err();
        assert!(matches!(err, SiteError::AnimationRead { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = AnimationPayload::from_json_str("bad.json", "{not json").unwrap_err();
        assert!(matches!(err, SiteError::AnimationParse { .. }));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = AnimationPayload::from_json_str("list.json", "[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SiteError::InvalidAnimation { .. }));
    }

    #[test]
    fn test_embedded_json_cannot_close_script() {
        let payload =
            AnimationPayload::from_json_str("x.json", r#"{"nm":"</script><b>"}"#).unwrap();
        let embedded = payload.to_embedded_json().unwrap();

        assert!(!embedded.contains("</script>"));
        assert!(embedded.contains(r"<\/script>"));
    }
}
