//! Gallery entries as delivered by the remote document, and their card form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::SiteConfig;

const FALLBACK_IMAGE_BASE: &str =
    "https://raw.githubusercontent.com/AdieleSolomon/Image-Gallery/main/images";

/// One gallery item.
///
/// Decoding never fails on a field: nulls and wrongly typed values read as
/// absent, numbers and booleans in text fields are kept as their text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Design {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

/// Top-level shape of the remote gallery JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient_designs")]
    pub designs: Option<Vec<Design>>,
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(de)?))
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(de)?).unwrap_or_default())
}

/// Integer ids, whole floats and numeric strings; anything else is absent.
fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Entries that are not objects are skipped; a `designs` value that is not
/// a list counts as missing.
fn lenient_designs<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<Design>>, D::Error> {
    let Value::Array(items) = Value::deserialize(de)? else {
        return Ok(None);
    };
    let designs = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(_) => serde_json::from_value(item).ok(),
            other => {
                log::warn!("skipping gallery entry {i}: not an object ({other})");
                None
            }
        })
        .collect();
    Ok(Some(designs))
}

/// Whether a failed image load should switch to the placeholder. Once the
/// placeholder itself is showing, further failures are left alone.
pub fn needs_placeholder(current_src: &str, placeholder: &str) -> bool {
    current_src != placeholder
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl Design {
    /// Identifier shown on the card; positional (1-based) when absent.
    pub fn display_id(&self, index: usize) -> i64 {
        self.id.unwrap_or(index as i64 + 1)
    }

    pub fn category(&self) -> Option<&str> {
        present(&self.category)
    }

    pub fn date(&self) -> Option<&str> {
        present(&self.date)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Image URL to hand to the browser, or the placeholder when the entry's
    /// URL is blank or cannot be loaded as an image source.
    pub fn image_src<'a>(&'a self, config: &'a SiteConfig) -> &'a str {
        let raw = self.image.trim();
        if raw.is_empty() {
            return &config.placeholder_image;
        }
        match url::Url::parse(raw) {
            Ok(u) if matches!(u.scheme(), "http" | "https" | "data") => raw,
            // Relative paths resolve against the page.
            Err(url::ParseError::RelativeUrlWithoutBase) => raw,
            _ => &config.placeholder_image,
        }
    }
}

/// First `limit` characters of `text`, with `...` appended only if something
/// was cut.
pub fn summary(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Render model for one gallery card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub image_src: String,
    pub alt: String,
    pub title: String,
    pub summary: String,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl Card {
    pub fn new(design: &Design, index: usize, config: &SiteConfig) -> Self {
        Self {
            id: design.display_id(index),
            image_src: design.image_src(config).to_string(),
            alt: design.title.clone(),
            title: design.title.clone(),
            summary: summary(design.description(), config.summary_length),
            category: design.category().map(str::to_string),
            date: design.date().map(str::to_string),
        }
    }
}

/// Entries shown when the remote document cannot be loaded.
pub fn fallback_designs() -> Vec<Design> {
    [
        (
            "Window Blind & Curtain",
            "Luxury window blind and curtain design for modern interiors.",
        ),
        (
            "Window Treatment Solution",
            "Professional window treatment solution combining blinds and curtains.",
        ),
        (
            "Modern Curtain Installation",
            "Modern curtain installation with custom tracks and premium fabric.",
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, description), id)| Design {
        id: Some(id),
        title: title.into(),
        image: format!("{FALLBACK_IMAGE_BASE}/design{id}.jpg"),
        description: Some(description.into()),
        category: Some("Interior Decoration".into()),
        date: Some("2024-01-15".into()),
    })
    .collect()
}
