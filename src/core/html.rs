use crate::core::markup::{html_escape, Markup};
use crate::domain::model::{
    AboutSection, ContactSection, FieldKind, HeaderSection, Page, PageMeta, Project,
    ProjectsSection, Section, SkillsSection,
};
use crate::utils::error::Result;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};

const REPOSITORY_LABEL: &str = "GitHub Repository";
const MORE_PROJECT_COLUMNS: [f64; 3] = [1.0, 0.5, 0.5];
const HEADER_COLUMNS: [f64; 2] = [2.0, 3.0];

const BASE_CSS: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", -apple-system, "Segoe UI", sans-serif; }
main { max-width: 1200px; margin: 0 auto; padding: 2rem 1rem; }
h1, h2, h3 { color: #0E5EC5; }
p, li { color: #5A5A5A; }
.columns { display: flex; gap: 1.5rem; align-items: flex-start; }
.column { min-width: 0; }
.profile { border-radius: 50%; height: auto; }
.tab-toggle, .tab-panel { display: none; }
.tab-labels { display: flex; gap: 1.5rem; border-bottom: 1px solid #ddd; margin: 2rem 0 1rem; }
.tab-labels label { cursor: pointer; padding: 0.5rem 0; border-bottom: 2px solid transparent; }
.more-projects { margin-top: 1rem; }
.more-projects summary { cursor: pointer; }
input, textarea { border-radius: 8px; padding: 8px; width: 100%; box-sizing: border-box; margin-bottom: 1rem; }
button { background-color: #0E5EC5; color: white; border: none; border-radius: 10px; padding: 0.5rem 1.25rem; }
footer { text-align: center; }
"#;

const LOTTIE_INIT: &str = r#"document.querySelectorAll('.lottie').forEach(function (el) {
  var data = document.getElementById(el.id + '-data');
  lottie.loadAnimation({ container: el, renderer: 'svg', loop: true, autoplay: true, animationData: JSON.parse(data.textContent) });
});"#;

/// 單次、線性地把 `Page` 轉成完整的 HTML 文件；相同輸入必定產生相同位元組
pub struct HtmlRenderer {
    markup: Markup,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markup: Markup::new()?,
        })
    }

    pub fn render(&self, page: &Page) -> Result<String> {
        let tabbed: Vec<&Section> = page
            .sections
            .iter()
            .filter(|s| s.tab_label().is_some())
            .collect();

        let mut out = String::new();
        self.render_head(&mut out, &page.meta, &tabbed);

        out.push_str("<body>\n<main>\n");
        for section in page.sections.iter() {
            if let Section::Header(header) = section {
                self.render_header(&mut out, header)?;
            }
        }
        self.render_tabs(&mut out, &tabbed);
        if let Some(footer) = &page.footer {
            out.push_str(&format!(
                "<hr>\n<footer><p>{}</p></footer>\n",
                self.markup.inline(footer)
            ));
        }
        out.push_str("</main>\n");

        out.push_str(&format!(
            "<script src=\"{}\"></script>\n<script>\n{}\n</script>\n",
            html_escape(&page.meta.lottie_player_url),
            LOTTIE_INIT
        ));
        out.push_str("</body>\n</html>\n");

        Ok(out)
    }

    fn render_head(&self, out: &mut String, meta: &PageMeta, tabbed: &[&Section]) {
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&meta.title)));

        if let Some(icon) = &meta.icon {
            let svg = format!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\"><text y=\".9em\" font-size=\"90\">{}</text></svg>",
                html_escape(icon)
            );
            out.push_str(&format!(
                "<link rel=\"icon\" href=\"data:image/svg+xml;base64,{}\">\n",
                BASE64_STANDARD.encode(svg)
            ));
        }

        out.push_str("<style>");
        out.push_str(BASE_CSS);
        // 每個分頁各自一組 :checked 規則，不需要任何腳本
        for section in tabbed {
            let slug = section.kind().slug();
            out.push_str(&format!(
                "#tab-{0}:checked ~ #panel-{0} {{ display: block; }}\n\
                 #tab-{0}:checked ~ .tab-labels label[for=\"tab-{0}\"] {{ border-bottom-color: #0E5EC5; font-weight: 600; }}\n",
                slug
            ));
        }
        out.push_str("</style>\n");

        if let Some(css) = &meta.custom_css {
            out.push_str(&format!("<style>\n{}\n</style>\n", css.trim()));
        }

        out.push_str("</head>\n");
    }

    fn render_header(&self, out: &mut String, header: &HeaderSection) -> Result<()> {
        let image = format!(
            "<img class=\"profile\" src=\"{}\" width=\"{}\" alt=\"{}\">",
            header.image.to_data_uri()?,
            header.image_width,
            html_escape(&header.name)
        );

        let key = slugify(&header.animation_key);
        let mut intro = format!(
            "<h1>{}</h1>\n<h3 class=\"subheader\">{}</h3>\n<p>{}</p>\n",
            html_escape(&header.name),
            html_escape(&header.headline),
            self.markup.inline(&header.tagline)
        );
        intro.push_str(&format!(
            "<div class=\"lottie\" id=\"lottie-{0}\" style=\"height: {1}px\"></div>\n\
             <script type=\"application/json\" id=\"lottie-{0}-data\">{2}</script>",
            key,
            header.animation_height,
            header.animation.to_embedded_json()?
        ));

        out.push_str("<header class=\"page-header\">\n");
        push_columns(out, &HEADER_COLUMNS, &[image, intro]);
        out.push_str("</header>\n");
        Ok(())
    }

    fn render_tabs(&self, out: &mut String, tabbed: &[&Section]) {
        out.push_str("<div class=\"tabs\">\n");

        for (i, section) in tabbed.iter().enumerate() {
            out.push_str(&format!(
                "<input class=\"tab-toggle\" type=\"radio\" name=\"tabs\" id=\"tab-{}\"{}>\n",
                section.kind().slug(),
                if i == 0 { " checked" } else { "" }
            ));
        }

        out.push_str("<nav class=\"tab-labels\">");
        for section in tabbed {
            let label = section.tab_label().unwrap_or_default();
            out.push_str(&format!(
                "<label for=\"tab-{}\">{}</label>",
                section.kind().slug(),
                html_escape(label)
            ));
        }
        out.push_str("</nav>\n");

        for section in tabbed {
            out.push_str(&format!(
                "<section class=\"tab-panel\" id=\"panel-{}\">\n",
                section.kind().slug()
            ));
            match section {
                Section::Header(_) => {}
                Section::About(about) => self.render_about(out, about),
                Section::Skills(skills) => self.render_skills(out, skills),
                Section::Projects(projects) => self.render_projects(out, projects),
                Section::Contact(contact) => self.render_contact(out, contact),
            }
            out.push_str("</section>\n");
        }

        out.push_str("</div>\n");
    }

    fn render_about(&self, out: &mut String, about: &AboutSection) {
        out.push_str(&format!("<h2>{}</h2>\n", html_escape(&about.heading)));
        out.push_str(&self.markup.block(&about.body));
        out.push('\n');
    }

    fn render_skills(&self, out: &mut String, skills: &SkillsSection) {
        out.push_str(&format!("<h2>{}</h2>\n", html_escape(&skills.heading)));

        let cells: Vec<String> = skills
            .groups
            .iter()
            .map(|group| {
                format!(
                    "<h3>{}</h3>\n{}",
                    html_escape(&group.title),
                    self.markup.list(&group.items)
                )
            })
            .collect();
        push_columns(out, &vec![1.0; cells.len()], &cells);
    }

    fn render_projects(&self, out: &mut String, projects: &ProjectsSection) {
        out.push_str(&format!("<h2>{}</h2>\n", html_escape(&projects.heading)));

        let cells: Vec<String> = projects
            .featured
            .iter()
            .map(|p| self.project_card(p))
            .collect();
        push_columns(out, &vec![1.0; cells.len()], &cells);

        if projects.more.is_empty() {
            return;
        }

        out.push_str(&format!(
            "<details class=\"more-projects\">\n<summary>{}</summary>\n",
            html_escape(&projects.more_label)
        ));
        for project in &projects.more {
            let cells = [self.project_card(project), String::new(), String::new()];
            push_columns(out, &MORE_PROJECT_COLUMNS, &cells);
        }
        out.push_str("</details>\n");
    }

    fn project_card(&self, project: &Project) -> String {
        let mut card = format!(
            "<h3>{}</h3>\n<p><strong>Tech Stack</strong>: {}</p>\n{}",
            html_escape(&project.title),
            self.markup.inline(&project.tech_stack),
            self.markup.list(&project.highlights)
        );
        if let Some(repository) = &project.repository {
            card.push_str(&format!(
                "\n<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></p>",
                html_escape(repository),
                REPOSITORY_LABEL
            ));
        }
        card
    }

    fn render_contact(&self, out: &mut String, contact: &ContactSection) {
        out.push_str(&format!("<h2>{}</h2>\n", html_escape(&contact.heading)));

        // 表單只負責送出，成功與否由外部服務處理
        out.push_str(&format!(
            "<form class=\"contact-form\" action=\"{}\" method=\"POST\">\n",
            html_escape(&contact.form.action)
        ));
        for field in &contact.form.fields {
            let required = if field.required { " required" } else { "" };
            let name = html_escape(&field.name);
            let placeholder = html_escape(&field.placeholder);
            let control = match field.kind {
                FieldKind::Text | FieldKind::Email => format!(
                    "<input type=\"{}\" name=\"{}\" placeholder=\"{}\"{}>\n",
                    field.kind.as_str(),
                    name,
                    placeholder,
                    required
                ),
                FieldKind::Textarea => format!(
                    "<textarea name=\"{}\" placeholder=\"{}\"{}></textarea>\n",
                    name, placeholder, required
                ),
            };
            out.push_str(&control);
        }
        out.push_str(&format!(
            "<button type=\"submit\">{}</button>\n</form>\n",
            html_escape(&contact.form.submit_label)
        ));

        if let Some(closing) = &contact.closing {
            out.push_str(&format!("<p>{}</p>\n", self.markup.inline(closing)));
        }
    }
}

fn push_columns(out: &mut String, ratios: &[f64], cells: &[String]) {
    out.push_str("<div class=\"columns\">\n");
    for (ratio, cell) in ratios.iter().zip(cells) {
        out.push_str(&format!(
            "<div class=\"column\" style=\"flex: {}\">\n{}\n</div>\n",
            ratio, cell
        ));
    }
    out.push_str("</div>\n");
}

fn slugify(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::content_config::{tests::BASIC_CONTENT, ContentConfig};
    use crate::core::compose::{compose_page, tests::sample_assets};

    fn render(content: &str) -> String {
        let config = ContentConfig::from_toml_str(content).unwrap();
        let page = compose_page(&config, sample_assets());
        HtmlRenderer::new().unwrap().render(&page).unwrap()
    }

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle)
            .unwrap_or_else(|| panic!("missing {}", needle))
    }

    #[test]
    fn test_sections_render_in_order() {
        let html = render(BASIC_CONTENT);

        let header = position(&html, "<header class=\"page-header\">");
        let about = position(&html, "id=\"panel-about\"");
        let skills = position(&html, "id=\"panel-skills\"");
        let projects = position(&html, "id=\"panel-projects\"");
        let contact = position(&html, "id=\"panel-contact\"");

        assert!(header < about && about < skills && skills < projects && projects < contact);
    }

    #[test]
    fn test_first_tab_checked_only() {
        let html = render(BASIC_CONTENT);

        assert!(html.contains("id=\"tab-about\" checked>"));
        assert!(html.contains("id=\"tab-skills\">"));
        assert_eq!(html.matches(" checked>").count(), 1);
    }

    #[test]
    fn test_header_embeds_assets() {
        let html = render(BASIC_CONTENT);

        assert!(html.contains("src=\"data:image/png;base64,"));
        assert!(html.contains("width=\"200\""));
        assert!(html.contains("id=\"lottie-coding\" style=\"height: 200px\""));
        assert!(html.contains("<script type=\"application/json\" id=\"lottie-coding-data\">{"));
        assert!(html.contains("lottie.min.js"));
    }

    #[test]
    fn test_contact_form_markup() {
        let html = render(BASIC_CONTENT);

        assert!(html.contains(
            "<form class=\"contact-form\" action=\"https://formsubmit.co/jane@example.com\" method=\"POST\">"
        ));
        assert!(html.contains("<input type=\"text\" name=\"name\" placeholder=\"Your Name\" required>"));
        assert!(html.contains(
            "<textarea name=\"message\" placeholder=\"Your Message Here\" required></textarea>"
        ));
        assert!(html.contains("<button type=\"submit\">Send</button>"));
    }

    #[test]
    fn test_more_projects_in_expander() {
        let content = BASIC_CONTENT.replace(
            "[contact]",
            "[[projects.more]]\ntitle = \"Lakehouse\"\ntech_stack = \"Delta Lake\"\n\n[contact]",
        );
        let html = render(&content);

        let details = position(&html, "<details class=\"more-projects\">");
        assert!(details < position(&html, "<h3>Lakehouse</h3>"));
        assert!(html.contains("<summary>See more projects</summary>"));
        assert!(html.contains("style=\"flex: 0.5\""));
    }

    #[test]
    fn test_no_expander_without_more_projects() {
        let html = render(BASIC_CONTENT);
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_text_is_escaped() {
        let content = BASIC_CONTENT.replace("Jane Doe", "Jane <b>Doe</b>");
        let html = render(&content);

        assert!(html.contains("<h1>Jane &lt;b&gt;Doe&lt;/b&gt;</h1>"));
        assert!(!html.contains("<b>Doe</b>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(BASIC_CONTENT), render(BASIC_CONTENT));
    }

    #[test]
    fn test_document_line_layout() {
        let html = render(BASIC_CONTENT);

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>Data Engineer Portfolio</title>\n<link rel=\"icon\""));
        assert!(html.contains("<section class=\"tab-panel\" id=\"panel-about\">\n<h2>About Me</h2>\n"));
        assert!(html.contains("<button type=\"submit\">Send</button>\n</form>\n</section>\n"));
        assert!(html.ends_with("</script>\n</body>\n</html>\n"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Coding Anim"), "coding-anim");
        assert_eq!(slugify("a_b-c"), "a_b-c");
    }
}
