//! Site settings: one nested document holding the editable content of every
//! public page plus the category list.
//!
//! Updates are partial. Each named section is merged one level deep (fields
//! absent from the request survive); the category list is replaced wholesale
//! whenever the request carries one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub site: SiteSection,
    pub homepage: HomepageSection,
    pub about: PageSection,
    pub story: PageSection,
    pub contact: ContactSection,
    pub footer: FooterSection,
    pub categories: Vec<Category>,
}

impl SettingsDocument {
    /// Apply a partial update: sections merge field by field, categories
    /// replace as a whole.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(site) = update.site {
            site.apply(&mut self.site);
        }
        if let Some(homepage) = update.homepage {
            homepage.apply(&mut self.homepage);
        }
        if let Some(about) = update.about {
            about.apply(&mut self.about);
        }
        if let Some(story) = update.story {
            story.apply(&mut self.story);
        }
        if let Some(contact) = update.contact {
            contact.apply(&mut self.contact);
        }
        if let Some(footer) = update.footer {
            footer.apply(&mut self.footer);
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
    }
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            homepage: HomepageSection::default(),
            about: PageSection {
                title: "About us".to_string(),
                content: "We supply branded merchandise and promotional products \
                          to businesses of every size."
                    .to_string(),
                image: "/images/about.jpg".to_string(),
            },
            story: PageSection {
                title: "Our story".to_string(),
                content: "What started as a two-person print shop has grown into \
                          a full-service promotional products studio."
                    .to_string(),
                image: "/images/story.jpg".to_string(),
            },
            contact: ContactSection::default(),
            footer: FooterSection::default(),
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub name: String,
    pub tagline: String,
    pub logo: String,
    pub favicon: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Spotlight Promotions".to_string(),
            tagline: "Specialists in promotional products and branded gifts".to_string(),
            logo: "/images/logo.png".to_string(),
            favicon: "/images/favicon.ico".to_string(),
            email: "info@example.com".to_string(),
            phone: "+1 555 010 0000".to_string(),
            whatsapp: "15550100000".to_string(),
            address: "1 Market Street".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageSection {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: String,
    pub show_best_sellers: bool,
    pub show_categories: bool,
    pub show_advantages: bool,
}

impl Default for HomepageSection {
    fn default() -> Self {
        Self {
            hero_title: "Professional promotional products for your business".to_string(),
            hero_subtitle: "A wide range of branded office gear, employee gifts \
                            and promotional merchandise"
                .to_string(),
            hero_image: "/images/hero-bg.jpg".to_string(),
            show_best_sellers: true,
            show_categories: true,
            show_advantages: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSection {
    pub title: String,
    pub content: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSection {
    pub title: String,
    pub subtitle: String,
    pub map_embed: String,
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            title: "Contact us".to_string(),
            subtitle: "We would love to hear from you".to_string(),
            map_embed: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSection {
    pub copyright: String,
    pub social_links: SocialLinks,
}

impl Default for FooterSection {
    fn default() -> Self {
        Self {
            copyright: "© Spotlight Promotions. All rights reserved.".to_string(),
            social_links: SocialLinks::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

fn default_categories() -> Vec<Category> {
    let category = |id: &str, name: &str, icon: &str, color: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    };
    vec![
        category("writing", "Writing instruments", "Pen", "#ec4899"),
        category("office", "Office essentials", "Briefcase", "#8b5cf6"),
        category("promo", "Promotional items", "Gift", "#06b6d4"),
        category("gifts", "Employee gifts", "Heart", "#f59e0b"),
        category("tech", "Tech & gadgets", "Smartphone", "#10b981"),
    ]
}

// ---------------------------------------------------------------------------
// Partial update types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SettingsUpdate {
    pub site: Option<SiteSectionUpdate>,
    pub homepage: Option<HomepageSectionUpdate>,
    pub about: Option<PageSectionUpdate>,
    pub story: Option<PageSectionUpdate>,
    pub contact: Option<ContactSectionUpdate>,
    pub footer: Option<FooterSectionUpdate>,
    pub categories: Option<Vec<Category>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteSectionUpdate {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
}

impl SiteSectionUpdate {
    fn apply(self, section: &mut SiteSection) {
        if let Some(name) = self.name {
            section.name = name;
        }
        if let Some(tagline) = self.tagline {
            section.tagline = tagline;
        }
        if let Some(logo) = self.logo {
            section.logo = logo;
        }
        if let Some(favicon) = self.favicon {
            section.favicon = favicon;
        }
        if let Some(email) = self.email {
            section.email = email;
        }
        if let Some(phone) = self.phone {
            section.phone = phone;
        }
        if let Some(whatsapp) = self.whatsapp {
            section.whatsapp = whatsapp;
        }
        if let Some(address) = self.address {
            section.address = address;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageSectionUpdate {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image: Option<String>,
    pub show_best_sellers: Option<bool>,
    pub show_categories: Option<bool>,
    pub show_advantages: Option<bool>,
}

impl HomepageSectionUpdate {
    fn apply(self, section: &mut HomepageSection) {
        if let Some(hero_title) = self.hero_title {
            section.hero_title = hero_title;
        }
        if let Some(hero_subtitle) = self.hero_subtitle {
            section.hero_subtitle = hero_subtitle;
        }
        if let Some(hero_image) = self.hero_image {
            section.hero_image = hero_image;
        }
        if let Some(show_best_sellers) = self.show_best_sellers {
            section.show_best_sellers = show_best_sellers;
        }
        if let Some(show_categories) = self.show_categories {
            section.show_categories = show_categories;
        }
        if let Some(show_advantages) = self.show_advantages {
            section.show_advantages = show_advantages;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageSectionUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl PageSectionUpdate {
    fn apply(self, section: &mut PageSection) {
        if let Some(title) = self.title {
            section.title = title;
        }
        if let Some(content) = self.content {
            section.content = content;
        }
        if let Some(image) = self.image {
            section.image = image;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSectionUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub map_embed: Option<String>,
}

impl ContactSectionUpdate {
    fn apply(self, section: &mut ContactSection) {
        if let Some(title) = self.title {
            section.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            section.subtitle = subtitle;
        }
        if let Some(map_embed) = self.map_embed {
            section.map_embed = map_embed;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSectionUpdate {
    pub copyright: Option<String>,
    /// Social links replace as a unit; they are a leaf of the footer section.
    pub social_links: Option<SocialLinks>,
}

impl FooterSectionUpdate {
    fn apply(self, section: &mut FooterSection) {
        if let Some(copyright) = self.copyright {
            section.copyright = copyright;
        }
        if let Some(social_links) = self.social_links {
            section.social_links = social_links;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_site_update_preserves_sibling_fields_and_sections() {
        let mut doc = SettingsDocument::default();
        let original_phone = doc.site.phone.clone();
        let original_hero = doc.homepage.hero_title.clone();

        let update: SettingsUpdate =
            serde_json::from_value(serde_json::json!({ "site": { "name": "X" } })).unwrap();
        doc.apply(update);

        assert_eq!(doc.site.name, "X");
        assert_eq!(doc.site.phone, original_phone);
        assert_eq!(doc.homepage.hero_title, original_hero);
        assert_eq!(doc.categories, SettingsDocument::default().categories);
    }

    #[test]
    fn empty_update_is_identity() {
        let mut doc = SettingsDocument::default();
        let before = serde_json::to_value(&doc).unwrap();

        doc.apply(SettingsUpdate::default());

        assert_eq!(serde_json::to_value(&doc).unwrap(), before);
    }

    #[test]
    fn categories_replace_wholesale() {
        let mut doc = SettingsDocument::default();
        assert!(!doc.categories.is_empty());

        let update: SettingsUpdate =
            serde_json::from_value(serde_json::json!({ "categories": [] })).unwrap();
        doc.apply(update);

        assert!(doc.categories.is_empty());
    }

    #[test]
    fn boolean_flags_can_be_switched_off() {
        let mut doc = SettingsDocument::default();
        assert!(doc.homepage.show_best_sellers);

        let update: SettingsUpdate = serde_json::from_value(
            serde_json::json!({ "homepage": { "showBestSellers": false } }),
        )
        .unwrap();
        doc.apply(update);

        assert!(!doc.homepage.show_best_sellers);
        assert!(doc.homepage.show_categories);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_value(SettingsDocument::default()).unwrap();
        assert!(json["homepage"].get("heroTitle").is_some());
        assert!(json["contact"].get("mapEmbed").is_some());
        assert!(json["footer"].get("socialLinks").is_some());
    }
}
