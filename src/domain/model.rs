use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 已套用橢圓遮罩的大頭照，建立後不再修改
#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub source_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

/// Lottie 檔頭中常見的欄位，全部都是選填
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationSummary {
    #[serde(rename = "v")]
    pub version: Option<String>,
    #[serde(rename = "nm")]
    pub name: Option<String>,
    #[serde(rename = "w")]
    pub width: Option<u32>,
    #[serde(rename = "h")]
    pub height: Option<u32>,
    #[serde(rename = "fr")]
    pub frame_rate: Option<f64>,
    #[serde(rename = "ip")]
    pub in_point: Option<f64>,
    #[serde(rename = "op")]
    pub out_point: Option<f64>,
}

impl AnimationSummary {
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.frame_rate, self.in_point, self.out_point) {
            (Some(fr), Some(ip), Some(op)) if fr > 0.0 && op >= ip => Some((op - ip) / fr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationPayload {
    pub source_path: PathBuf,
    pub data: serde_json::Value,
    pub summary: AnimationSummary,
}

/// `load_assets` 階段的產出
#[derive(Debug, Clone)]
pub struct Assets {
    pub profile_image: ProfileImage,
    pub animation: AnimationPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub icon: Option<String>,
    pub custom_css: Option<String>,
    pub lottie_player_url: String,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub meta: PageMeta,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionKind {
    pub fn slug(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::About => "about",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Section {
    Header(HeaderSection),
    About(AboutSection),
    Skills(SkillsSection),
    Projects(ProjectsSection),
    Contact(ContactSection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Header(_) => SectionKind::Header,
            Section::About(_) => SectionKind::About,
            Section::Skills(_) => SectionKind::Skills,
            Section::Projects(_) => SectionKind::Projects,
            Section::Contact(_) => SectionKind::Contact,
        }
    }

    /// Header 不在分頁裡，沒有標籤
    pub fn tab_label(&self) -> Option<&str> {
        match self {
            Section::Header(_) => None,
            Section::About(s) => Some(&s.tab_label),
            Section::Skills(s) => Some(&s.tab_label),
            Section::Projects(s) => Some(&s.tab_label),
            Section::Contact(s) => Some(&s.tab_label),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderSection {
    pub name: String,
    pub headline: String,
    pub tagline: String,
    pub image: ProfileImage,
    pub image_width: u32,
    pub animation: AnimationPayload,
    pub animation_key: String,
    pub animation_height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutSection {
    pub tab_label: String,
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsSection {
    pub tab_label: String,
    pub heading: String,
    pub groups: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub tech_stack: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub repository: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectsSection {
    pub tab_label: String,
    pub heading: String,
    pub featured: Vec<Project>,
    pub more_label: String,
    pub more: Vec<Project>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub placeholder: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub action: String,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSection {
    pub tab_label: String,
    pub heading: String,
    pub form: ContactForm,
    pub closing: Option<String>,
}
