//! Site-wide constants, overridable from the page.
//!
//! The defaults are the production values. A page can replace any subset of
//! them with a JSON block:
//!
//! ```html
//! <script type="application/json" id="siteConfig">
//!   { "galleryUrl": "/gallery.json" }
//! </script>
//! ```

use serde::Deserialize;

/// Element id of the optional override block.
pub const CONFIG_ELEMENT_ID: &str = "siteConfig";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Remote JSON document listing the gallery designs.
    pub gallery_url: String,
    /// Number used in `https://wa.me/<number>` links.
    pub whatsapp_number: String,
    pub contact_email: String,
    /// Greeting target in every outbound message.
    pub business_name: String,
    pub placeholder_image: String,
    pub placeholder_alt: String,
    /// Label the modal category badge carries while hidden.
    pub default_category: String,
    /// Characters of description shown on a card before the ellipsis.
    pub summary_length: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            gallery_url: "https://raw.githubusercontent.com/AdieleSolomon/Image-Gallery/main/gallery.json"
                .into(),
            whatsapp_number: "+234816262854".into(),
            contact_email: "Abrahamuwaoma71@gmail.com".into(),
            business_name: "Pure Pleasure Building and Interior Concept".into(),
            placeholder_image: "https://images.unsplash.com/photo-1615529328331-f8917597711f?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80"
                .into(),
            placeholder_alt: "Image not available".into(),
            default_category: "Interior Design".into(),
            summary_length: 100,
        }
    }
}

impl SiteConfig {
    /// Parse an override block; fields it omits keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Defaults, or the override block when it is present and well-formed.
    pub fn from_override(text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring malformed #{CONFIG_ELEMENT_ID} block: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl SiteConfig {
    /// Read the override block from `document`, if the page ships one.
    pub fn from_document(document: &web_sys::Document) -> Self {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        Self::from_override(text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = SiteConfig::from_json(r#"{ "galleryUrl": "/gallery.json", "summaryLength": 40 }"#).unwrap();
        assert_eq!(cfg.gallery_url, "/gallery.json");
        assert_eq!(cfg.summary_length, 40);
        assert_eq!(cfg.contact_email, SiteConfig::default().contact_email);
    }

    #[test]
    fn malformed_override_falls_back_to_defaults() {
        assert_eq!(SiteConfig::from_override(Some("{ not json")), SiteConfig::default());
        assert_eq!(SiteConfig::from_override(Some("   ")), SiteConfig::default());
        assert_eq!(SiteConfig::from_override(None), SiteConfig::default());
    }
}
