//! Browser implementations of the gallery, modal, nav and contact form views.

use std::rc::Rc;

use anyhow::{Context as _, Result, anyhow, bail};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlElement, HtmlFormElement,
    HtmlImageElement, HtmlInputElement, HtmlTextAreaElement, Window,
};

use crate::config::SiteConfig;
use crate::contact::{ContactFormView, ContactSubmission};
use crate::design::{Card, needs_placeholder};
use crate::gallery::{GalleryView, ViewState};
use crate::modal::{ModalContent, ModalView};
use crate::nav::{NAV_OPEN_CLASS, NavView};

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| anyhow!("no `window` in this context"))
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or_else(|| anyhow!("no `document` on window"))
}

pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}

/// Element the page cannot work without.
pub fn required<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    doc.get_element_by_id(id)
        .with_context(|| format!("missing element #{id}"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("#{id} is not the expected element type"))
}

/// Element the page works without; absence is logged, not fatal.
pub fn optional<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    let el = doc.get_element_by_id(id);
    if el.is_none() {
        log::debug!("optional element #{id} not present");
    }
    el?.dyn_into::<T>().ok()
}

/// Every element matching `selector`, in document order.
pub fn select_all(doc: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = doc.query_selector_all(selector).map_err(js_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attach `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(js_err)?;
    callback.forget();
    Ok(())
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("could not set {property}={value}: {e:?}");
    }
}

fn set_display(el: &HtmlElement, value: &str) {
    set_style(el, "display", value);
}

/// Swap in the placeholder whenever the image fails to load. A failing
/// placeholder is left alone.
pub fn install_image_fallback(img: &HtmlImageElement, config: &SiteConfig) {
    let target = img.clone();
    let src = config.placeholder_image.clone();
    let alt = config.placeholder_alt.clone();
    let onerror = Closure::<dyn FnMut()>::new(move || {
        if needs_placeholder(&target.src(), &src) {
            target.set_src(&src);
            target.set_alt(&alt);
        }
    });
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
}

/// The gallery section: loading/error/empty placeholders, the card grid and
/// the footer's last-updated field.
pub struct DomGalleryView {
    document: Document,
    config: SiteConfig,
    loading: Option<HtmlElement>,
    error: Option<HtmlElement>,
    empty: Option<HtmlElement>,
    container: Option<HtmlElement>,
    last_updated: Option<HtmlElement>,
    /// Called with the position of the clicked card in the gallery state.
    on_select: Rc<dyn Fn(usize)>,
}

impl DomGalleryView {
    pub fn new(document: &Document, config: SiteConfig, on_select: Rc<dyn Fn(usize)>) -> Self {
        Self {
            document: document.clone(),
            config,
            loading: optional(document, "galleryLoading"),
            error: optional(document, "galleryError"),
            empty: optional(document, "galleryEmpty"),
            container: optional(document, "designGallery"),
            last_updated: optional(document, "lastUpdatedDate"),
            on_select,
        }
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element> {
        let el = self.document.create_element(tag).map_err(js_err)?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        Ok(el)
    }

    fn text_element(&self, tag: &str, class: &str, text: &str) -> Result<Element> {
        let el = self.element(tag, class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    fn build_card(&self, card: &Card, index: usize) -> Result<Element> {
        let root = self.element("div", "design-card")?;
        root.set_attribute("data-id", &card.id.to_string()).map_err(js_err)?;

        let frame = self.element("div", "design-img-container")?;
        let img: HtmlImageElement = self
            .element("img", "design-img")?
            .dyn_into()
            .map_err(|_| anyhow!("<img> is not an HtmlImageElement"))?;
        img.set_attribute("loading", "lazy").map_err(js_err)?;
        install_image_fallback(&img, &self.config);
        img.set_alt(&card.alt);
        img.set_src(&card.image_src);
        frame.append_child(&img).map_err(js_err)?;

        let info = self.element("div", "design-info")?;
        info.append_child(&self.text_element("h3", "", &card.title)?).map_err(js_err)?;
        info.append_child(&self.text_element("p", "", &card.summary)?).map_err(js_err)?;
        if let Some(category) = &card.category {
            info.append_child(&self.text_element("span", "design-category", category)?)
                .map_err(js_err)?;
        }
        if let Some(date) = &card.date {
            info.append_child(&self.text_element("span", "design-date", date)?)
                .map_err(js_err)?;
        }

        root.append_child(&frame).map_err(js_err)?;
        root.append_child(&info).map_err(js_err)?;

        let on_select = Rc::clone(&self.on_select);
        listen(&root, "click", move |_| on_select(index))?;

        Ok(root)
    }
}

impl GalleryView for DomGalleryView {
    fn show_state(&self, state: ViewState) {
        let shown = |on: bool| if on { "block" } else { "none" };
        let areas = [
            (&self.loading, state == ViewState::Loading),
            (&self.error, matches!(state, ViewState::Error | ViewState::Fallback)),
            (&self.empty, state == ViewState::Empty),
        ];
        for (el, on) in areas {
            if let Some(el) = el {
                set_display(el, shown(on));
            }
        }
        if let Some(grid) = &self.container {
            let grid_on = matches!(state, ViewState::Content | ViewState::Fallback);
            set_display(grid, if grid_on { "grid" } else { "none" });
        }
    }

    fn clear_cards(&self) {
        match &self.container {
            Some(grid) => grid.set_inner_html(""),
            None => log::error!("Gallery container not found!"),
        }
    }

    fn append_card(&self, card: &Card, index: usize) {
        let Some(grid) = &self.container else {
            return;
        };
        let appended = self
            .build_card(card, index)
            .and_then(|el| grid.append_child(&el).map_err(js_err));
        if let Err(e) = appended {
            log::error!("could not render card {}: {e:#}", card.id);
        }
    }

    fn set_last_updated(&self, text: &str) {
        if let Some(el) = &self.last_updated {
            el.set_text_content(Some(text));
        }
    }
}

/// `#designModal` and its fields.
pub struct DomModalView {
    root: HtmlElement,
    body: Option<HtmlElement>,
    title: HtmlElement,
    image: HtmlImageElement,
    description: HtmlElement,
    category: Option<HtmlElement>,
    date: Option<HtmlElement>,
    whatsapp: HtmlAnchorElement,
    email: HtmlAnchorElement,
}

impl DomModalView {
    pub fn new(document: &Document, config: &SiteConfig) -> Result<Self> {
        let image: HtmlImageElement = required(document, "modalImage")?;
        install_image_fallback(&image, config);
        Ok(Self {
            root: required(document, "designModal")?,
            body: document.body(),
            title: required(document, "modalTitle")?,
            image,
            description: required(document, "modalDescription")?,
            category: optional(document, "modalCategory"),
            date: optional(document, "modalDate"),
            whatsapp: required(document, "whatsappLink")?,
            email: required(document, "emailLink")?,
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }
}

impl ModalView for DomModalView {
    fn populate(&self, content: &ModalContent) {
        self.title.set_text_content(Some(&content.title));
        self.image.set_src(&content.image_src);
        self.image.set_alt(&content.image_alt);
        self.description.set_text_content(Some(&content.description));

        for (el, badge) in [(&self.category, &content.category), (&self.date, &content.date)] {
            if let Some(el) = el {
                el.set_text_content(Some(&badge.text));
                set_display(el, if badge.visible { "inline-block" } else { "none" });
            }
        }

        self.whatsapp.set_href(&content.whatsapp_href);
        self.email.set_href(&content.email_href);
    }

    fn set_visible(&self, visible: bool) {
        set_display(&self.root, if visible { "flex" } else { "none" });
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = &self.body {
            set_style(body, "overflow", if locked { "hidden" } else { "auto" });
        }
    }
}

/// `.nav-links`; open while it carries the `active` class.
pub struct DomNavView {
    links: Element,
}

impl DomNavView {
    pub fn new(links: Element) -> Self {
        Self { links }
    }
}

impl NavView for DomNavView {
    fn is_open(&self) -> bool {
        self.links.class_list().contains(NAV_OPEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        if let Err(e) = self.links.class_list().toggle_with_force(NAV_OPEN_CLASS, open) {
            log::warn!("menu toggle failed: {e:?}");
        }
    }
}

/// `#contactForm` and its four fields.
pub struct DomContactForm {
    window: Window,
    document: Document,
    form: HtmlFormElement,
}

impl DomContactForm {
    pub fn new(window: &Window, document: &Document, form: HtmlFormElement) -> Self {
        Self {
            window: window.clone(),
            document: document.clone(),
            form,
        }
    }

    fn field(&self, id: &str) -> Result<String> {
        let el = self
            .document
            .get_element_by_id(id)
            .with_context(|| format!("missing form field #{id}"))?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(area.value());
        }
        bail!("#{id} is not a text field")
    }
}

impl ContactFormView for DomContactForm {
    fn read(&self) -> Result<ContactSubmission> {
        Ok(ContactSubmission {
            name: self.field("name")?,
            email: self.field("email")?,
            phone: self.field("phone")?,
            message: self.field("message")?,
        })
    }

    fn open(&self, url: &str, target: &str) -> Result<()> {
        self.window
            .open_with_url_and_target(url, target)
            .map_err(js_err)?;
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<()> {
        self.window.alert_with_message(message).map_err(js_err)
    }

    fn reset(&self) {
        self.form.reset();
    }
}
