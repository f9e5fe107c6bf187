use crate::config::content_config::ContentConfig;
use crate::domain::model::{
    AboutSection, Assets, ContactForm, ContactSection, HeaderSection, Page, PageMeta,
    ProjectsSection, Section, SkillsSection,
};

/// 依固定順序組出頁面：header → about → skills → projects → contact
pub fn compose_page(config: &ContentConfig, assets: Assets) -> Page {
    let Assets {
        profile_image,
        animation,
    } = assets;

    let header = HeaderSection {
        name: config.header.name.clone(),
        headline: config.header.headline.clone(),
        tagline: config.header.tagline.clone(),
        image: profile_image,
        image_width: config.image_width(),
        animation,
        animation_key: config.animation_key().to_string(),
        animation_height: config.animation_height(),
    };

    let about = AboutSection {
        tab_label: config.tabs.about.clone(),
        heading: config.about.heading.clone(),
        body: config.about.body.clone(),
    };

    let skills = SkillsSection {
        tab_label: config.tabs.skills.clone(),
        heading: config.skills.heading.clone(),
        groups: config.skills.groups.clone(),
    };

    let projects = ProjectsSection {
        tab_label: config.tabs.projects.clone(),
        heading: config.projects.heading.clone(),
        featured: config.projects.featured.clone(),
        more_label: config.more_projects_label().to_string(),
        more: config.projects.more.clone(),
    };

    let contact = ContactSection {
        tab_label: config.tabs.contact.clone(),
        heading: config.contact.heading.clone(),
        form: ContactForm {
            action: config.contact.form_action.clone(),
            fields: config.contact.fields.clone(),
            submit_label: config.submit_label().to_string(),
        },
        closing: config.contact.closing.clone(),
    };

    Page {
        meta: PageMeta {
            title: config.page.title.clone(),
            icon: config.page.icon.clone(),
            custom_css: config.page.custom_css.clone(),
            lottie_player_url: config.lottie_player_url().to_string(),
        },
        sections: vec![
            Section::Header(header),
            Section::About(about),
            Section::Skills(skills),
            Section::Projects(projects),
            Section::Contact(contact),
        ],
        footer: config.footer.as_ref().map(|f| f.text.clone()),
    }
}
