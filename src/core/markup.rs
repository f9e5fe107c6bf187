use crate::utils::error::Result;
use regex::{Captures, Regex};
use url::Url;

/// 連結只接受這些 scheme，其餘原樣當文字輸出
const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 內容檔中文字區塊的極簡標記：`**粗體**`、`[文字](網址)`、`- ` 開頭的清單
pub struct Markup {
    bold: Regex,
    link: Regex,
}

impl Markup {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bold: Regex::new(r"\*\*(.+?)\*\*")?,
            // 網址可含一層括號，例如 wiki 條目
            link: Regex::new(r"\[([^\]]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)")?,
        })
    }

    /// 先跳脫 HTML 再套用行內標記，所以內容檔無法注入標籤
    pub fn inline(&self, text: &str) -> String {
        let escaped = html_escape(text.trim());
        let linked = self.link.replace_all(&escaped, |caps: &Captures| {
            let href = &caps[2];
            match Url::parse(href) {
                Ok(url) if LINK_SCHEMES.contains(&url.scheme()) => format!(
                    r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                    href, &caps[1]
                ),
                _ => caps[0].to_string(),
            }
        });
        self.bold
            .replace_all(&linked, "<strong>$1</strong>")
            .into_owned()
    }

    /// 空行分段；連續的 `- ` 行組成清單
    pub fn block(&self, text: &str) -> String {
        let mut html = String::new();
        let mut paragraph: Vec<&str> = Vec::new();
        let mut list: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim) {
            if let Some(item) = line.strip_prefix("- ") {
                self.flush_paragraph(&mut html, &mut paragraph);
                list.push(item);
            } else if line.is_empty() {
                self.flush_paragraph(&mut html, &mut paragraph);
                self.flush_list(&mut html, &mut list);
            } else {
                self.flush_list(&mut html, &mut list);
                paragraph.push(line);
            }
        }
        self.flush_paragraph(&mut html, &mut paragraph);
        self.flush_list(&mut html, &mut list);

        html
    }

    pub fn list<S: AsRef<str>>(&self, items: &[S]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut html = String::from("<ul>");
        for item in items {
            html.push_str("<li>");
            html.push_str(&self.inline(item.as_ref()));
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        html
    }

    fn flush_paragraph(&self, html: &mut String, paragraph: &mut Vec<&str>) {
        if paragraph.is_empty() {
            return;
        }
        html.push_str("<p>");
        html.push_str(&self.inline(&paragraph.join(" ")));
        html.push_str("</p>");
        paragraph.clear();
    }

    fn flush_list(&self, html: &mut String, list: &mut Vec<&str>) {
        if list.is_empty() {
            return;
        }
        html.push_str(&self.list(list.as_slice()));
        list.clear();
    }
}
