use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Profile image not found: {path}")]
    ImageNotFound { path: String },

    #[error("Failed to decode profile image '{path}': {source}")]
    ImageDecode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Image encoding error: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("Animation file not found: {path}")]
    AnimationNotFound { path: String },

    #[error("Failed to read animation '{path}': {source}")]
    AnimationRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse animation '{path}': {source}")]
    AnimationParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid animation '{path}': {reason}")]
    InvalidAnimation { path: String, reason: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Asset,
    Configuration,
    Render,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ImageNotFound { .. }
            | SiteError::ImageDecode { .. }
            | SiteError::AnimationNotFound { .. }
            | SiteError::AnimationRead { .. }
            | SiteError::AnimationParse { .. }
            | SiteError::InvalidAnimation { .. } => ErrorCategory::Asset,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SiteError::ImageEncode(_)
            | SiteError::PatternError(_)
            | SiteError::SerializationError(_) => ErrorCategory::Render,
            SiteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 素材與設定錯誤都會中止建置
            ErrorCategory::Asset | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Render | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::ImageNotFound { path } => format!(
                "Check that '{}' exists, or point --image at the profile picture",
                path
            ),
            SiteError::ImageDecode { .. } => {
                "Re-export the profile picture as PNG or JPEG".to_string()
            }
            SiteError::AnimationNotFound { path } => format!(
                "Check that '{}' exists, or point --animation at a Lottie JSON file",
                path
            ),
            SiteError::AnimationRead { path, .. } => format!(
                "Make sure '{}' is a readable UTF-8 file, not a directory",
                path
            ),
            SiteError::AnimationParse { .. } | SiteError::InvalidAnimation { .. } => {
                "Make sure the animation file is a Lottie JSON object".to_string()
            }
            SiteError::ConfigValidationError { .. } => {
                "Check the content file syntax (TOML)".to_string()
            }
            SiteError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the content file", field)
            }
            SiteError::MissingConfigError { field } => {
                format!("Add '{}' to the content file", field)
            }
            SiteError::IoError(_) => {
                "Check permissions and free space of the output directory".to_string()
            }
            SiteError::ImageEncode(_)
            | SiteError::PatternError(_)
            | SiteError::SerializationError(_) => {
                "This is an internal rendering failure, please report it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Asset => format!("Could not load page assets: {}", self),
            ErrorCategory::Configuration => format!("Invalid content file: {}", self),
            ErrorCategory::Render => format!("Could not render the page: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_errors_are_high_severity() {
        let err = SiteError::ImageNotFound {
            path: "logo.jpg".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Asset);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("logo.jpg"));
        assert!(err.user_friendly_message().contains("logo.jpg"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = SiteError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
