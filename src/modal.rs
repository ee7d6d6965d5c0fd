//! Design detail overlay.

use crate::config::SiteConfig;
use crate::contact::{design_email_link, design_inquiry_message, whatsapp_link};
use crate::design::Design;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub visible: bool,
}

/// Everything the overlay shows for one design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub description: String,
    pub category: Badge,
    pub date: Badge,
    pub whatsapp_href: String,
    pub email_href: String,
}

impl ModalContent {
    pub fn for_design(design: &Design, config: &SiteConfig) -> Self {
        let title = design.title.clone();
        Self {
            image_src: design.image_src(config).to_string(),
            image_alt: title.clone(),
            description: design.description().to_string(),
            category: Badge {
                text: design.category().unwrap_or(&config.default_category).to_string(),
                visible: design.category().is_some(),
            },
            date: Badge {
                text: design.date().unwrap_or_default().to_string(),
                visible: design.date().is_some(),
            },
            whatsapp_href: whatsapp_link(config, &design_inquiry_message(config, &title)),
            email_href: design_email_link(config, &title),
            title,
        }
    }
}

pub trait ModalView {
    fn populate(&self, content: &ModalContent);
    fn set_visible(&self, visible: bool);
    /// Stop (or resume) scrolling of the page behind the overlay.
    fn set_scroll_locked(&self, locked: bool);
}

pub struct ModalController<V> {
    view: V,
    config: SiteConfig,
}

impl<V: ModalView> ModalController<V> {
    pub fn new(view: V, config: SiteConfig) -> Self {
        Self { view, config }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn open(&self, design: &Design) {
        self.view.populate(&ModalContent::for_design(design, &self.config));
        self.view.set_visible(true);
        self.view.set_scroll_locked(true);
    }

    pub fn close(&self) {
        self.view.set_visible(false);
        self.view.set_scroll_locked(false);
    }

    /// Window click handler. Only a click landing on the overlay root itself
    /// (the backdrop) closes it; clicks inside the content bubble up with a
    /// different target.
    pub fn backdrop_click(&self, target_is_root: bool) -> bool {
        if target_is_root {
            self.close();
        }
        target_is_root
    }
}
