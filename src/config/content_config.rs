use crate::domain::model::{FormField, Project, SkillGroup};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "ico"];
pub const DEFAULT_LOTTIE_PLAYER_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/lottie-web/5.12.2/lottie.min.js";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub page: PageConfig,
    pub assets: AssetsConfig,
    pub header: HeaderConfig,
    #[serde(default)]
    pub tabs: TabsConfig,
    pub about: AboutConfig,
    pub skills: SkillsConfig,
    pub projects: ProjectsConfig,
    pub contact: ContactConfig,
    pub footer: Option<FooterConfig>,
    #[serde(default)]
    pub output: OutputConfig,

    /// 內容檔所在目錄，相對路徑的素材以此為基準
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub icon: Option<String>,
    pub custom_css: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub profile_image: String,
    pub animation: String,
    pub lottie_player_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    pub name: String,
    pub headline: String,
    pub tagline: String,
    pub image_width: Option<u32>,
    pub animation_height: Option<u32>,
    pub animation_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabsConfig {
    pub about: String,
    pub skills: String,
    pub projects: String,
    pub contact: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            about: "About".to_string(),
            skills: "Skills".to_string(),
            projects: "Projects".to_string(),
            contact: "Contact".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutConfig {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub heading: String,
    #[serde(default)]
    pub groups: Vec<SkillGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    pub heading: String,
    #[serde(default)]
    pub featured: Vec<Project>,
    pub more_label: Option<String>,
    #[serde(default)]
    pub more: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub heading: String,
    pub form_action: String,
    pub submit_label: Option<String>,
    pub fields: Vec<FormField>,
    pub closing: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterConfig {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./site".to_string(),
            file_name: "index.html".to_string(),
        }
    }
}

impl ContentConfig {
    /// 從 TOML 檔案載入內容
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(SiteError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// 從 TOML 字串解析內容
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTACT_EMAIL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證內容的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("page.title", &self.page.title)?;

        validation::validate_path("assets.profile_image", &self.assets.profile_image)?;
        validation::validate_file_extension(
            "assets.profile_image",
            &self.assets.profile_image,
            &IMAGE_EXTENSIONS,
        )?;
        validation::validate_path("assets.animation", &self.assets.animation)?;
        validation::validate_file_extension("assets.animation", &self.assets.animation, &["json"])?;
        if let Some(url) = &self.assets.lottie_player_url {
            validation::validate_url("assets.lottie_player_url", url)?;
        }

        validation::validate_non_empty_string("header.name", &self.header.name)?;
        validation::validate_positive_number("header.image_width", self.image_width(), 1)?;
        validation::validate_positive_number(
            "header.animation_height",
            self.animation_height(),
            1,
        )?;

        for (i, group) in self.skills.groups.iter().enumerate() {
            validation::validate_non_empty_string(&format!("skills.groups[{}].title", i), &group.title)?;
        }

        for (list, projects) in [
            ("featured", &self.projects.featured),
            ("more", &self.projects.more),
        ] {
            for (i, project) in projects.iter().enumerate() {
                validation::validate_non_empty_string(
                    &format!("projects.{}[{}].title", list, i),
                    &project.title,
                )?;
                if let Some(repository) = &project.repository {
                    validation::validate_url(
                        &format!("projects.{}[{}].repository", list, i),
                        repository,
                    )?;
                }
            }
        }

        validation::validate_url("contact.form_action", &self.contact.form_action)?;
        if self.contact.fields.is_empty() {
            return Err(SiteError::MissingConfigError {
                field: "contact.fields".to_string(),
            });
        }
        for (i, field) in self.contact.fields.iter().enumerate() {
            validation::validate_non_empty_string(&format!("contact.fields[{}].name", i), &field.name)?;
        }
        validation::validate_unique(
            "contact.fields",
            self.contact.fields.iter().map(|f| f.name.as_str()),
        )?;

        validation::validate_path("output.path", &self.output.path)?;
        if !self.output.file_name.ends_with(".html") {
            return Err(SiteError::InvalidConfigValueError {
                field: "output.file_name".to_string(),
                value: self.output.file_name.clone(),
                reason: "Output file must end with .html".to_string(),
            });
        }

        Ok(())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// 取得大頭照路徑
    pub fn profile_image_path(&self) -> PathBuf {
        self.resolve(&self.assets.profile_image)
    }

    /// 取得動畫路徑
    pub fn animation_path(&self) -> PathBuf {
        self.resolve(&self.assets.animation)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output.path)
    }

    pub fn output_file_name(&self) -> &str {
        &self.output.file_name
    }

    pub fn image_width(&self) -> u32 {
        self.header.image_width.unwrap_or(200)
    }

    pub fn animation_height(&self) -> u32 {
        self.header.animation_height.unwrap_or(200)
    }

    pub fn animation_key(&self) -> &str {
        self.header.animation_key.as_deref().unwrap_or("animation")
    }

    pub fn lottie_player_url(&self) -> &str {
        self.assets
            .lottie_player_url
            .as_deref()
            .unwrap_or(DEFAULT_LOTTIE_PLAYER_URL)
    }

    pub fn more_projects_label(&self) -> &str {
        self.projects
            .more_label
            .as_deref()
            .unwrap_or("See more projects")
    }

    pub fn submit_label(&self) -> &str {
        self.contact.submit_label.as_deref().unwrap_or("Send")
    }

    /// 設定摘要，只看設定本身，不碰素材檔
    pub fn config_summary(&self, dry_run: bool) -> String {
        let mut out = String::from("📋 Configuration Summary:\n");
        out.push_str(&format!("  Page: {}\n", self.page.title));
        out.push_str(&format!(
            "  Profile image: {}\n",
            self.profile_image_path().display()
        ));
        out.push_str(&format!("  Animation: {}\n", self.animation_path().display()));
        out.push_str(&format!(
            "  Output: {}\n",
            self.output_path().join(self.output_file_name()).display()
        ));
        if dry_run {
            out.push_str("  🔍 DRY RUN MODE ENABLED\n");
        }
        out
    }

    /// Dry run 報告：頁面結構與聯絡表單
    pub fn dry_run_summary(&self) -> String {
        let mut out = String::from("🔍 Dry Run Analysis:\n\n🧭 Sections:\n");
        out.push_str(&format!(
            "  Header: {} - {}\n",
            self.header.name, self.header.headline
        ));
        out.push_str(&format!(
            "  Tabs: {}, {}, {}, {}\n",
            self.tabs.about, self.tabs.skills, self.tabs.projects, self.tabs.contact
        ));
        out.push_str(&format!("  Skill groups: {}\n", self.skills.groups.len()));
        out.push_str(&format!(
            "  Projects: {} featured, {} under \"{}\"\n",
            self.projects.featured.len(),
            self.projects.more.len(),
            self.more_projects_label()
        ));

        out.push_str("\n📨 Contact Form:\n");
        out.push_str(&format!("  Action: {}\n", self.contact.form_action));
        for field in &self.contact.fields {
            out.push_str(&format!(
                "  {} ({}){}\n",
                field.name,
                field.kind.as_str(),
                if field.required { " required" } else { "" }
            ));
        }

        out.push_str(
            "\n✅ Dry run analysis complete. Use --verbose for more details during actual run.\n",
        );
        out
    }
}

impl Validate for ContentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
