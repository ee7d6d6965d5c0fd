//! Page wiring: looks up the markup and attaches every handler.
//!
//! Order matters. A required element that is missing stops the wiring at that
//! point and the features registered after it are left inert.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::SiteConfig;
use crate::contact::submit_contact;
use crate::dom::{
    DomContactForm, DomGalleryView, DomModalView, DomNavView, document, js_err, listen, optional,
    select_all, window,
};
use crate::gallery::{GalleryState, LoadSequence, load_gallery};
use crate::http::BrowserFetcher;
use crate::modal::ModalController;
use crate::nav::NavMenu;
use crate::scroll::scroll_target;

struct Gallery {
    config: SiteConfig,
    view: DomGalleryView,
    fetcher: BrowserFetcher,
    loads: LoadSequence,
    /// Designs behind the rendered cards; card clicks index into it.
    state: Rc<RefCell<GalleryState>>,
}

impl Gallery {
    /// Kick off a load in the background. Retries while a load is pending are
    /// allowed; only the last one started renders.
    fn reload(self: &Rc<Self>) {
        log::debug!(
            "loading gallery ({} designs currently shown)",
            self.state.borrow().designs.len()
        );
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = load_gallery(&this.fetcher, &this.config, &this.view, &this.loads).await;
            if let Some(state) = loaded {
                *this.state.borrow_mut() = state;
            }
        });
    }
}

/// Wire the page once the DOM is ready.
pub fn start() -> Result<()> {
    let doc = document()?;
    if doc.ready_state() == "loading" {
        listen(&doc, "DOMContentLoaded", |_| {
            if let Err(e) = run() {
                log::error!("page setup failed: {e:#}");
            }
        })
    } else {
        run()
    }
}

fn run() -> Result<()> {
    let win = window()?;
    let doc = document()?;
    let config = SiteConfig::from_document(&doc);

    wire_navigation(&doc)?;

    let modal = Rc::new(ModalController::new(
        DomModalView::new(&doc, &config)?,
        config.clone(),
    ));
    let state = Rc::new(RefCell::new(GalleryState::default()));
    let on_select: Rc<dyn Fn(usize)> = {
        let (modal, state) = (Rc::clone(&modal), Rc::clone(&state));
        Rc::new(move |index: usize| {
            // Clone out so the borrow ends before the modal runs.
            let design = state.borrow().designs.get(index).cloned();
            match design {
                Some(design) => modal.open(&design),
                None => log::warn!("no design at position {index}"),
            }
        })
    };
    let gallery = Rc::new(Gallery {
        view: DomGalleryView::new(&doc, config.clone(), on_select),
        config: config.clone(),
        fetcher: BrowserFetcher,
        loads: LoadSequence::default(),
        state,
    });

    set_current_year(&doc);
    wire_modal_close(&win, &doc, &modal)?;
    wire_contact_form(&win, &doc, config)?;

    if let Some(retry) = optional::<HtmlElement>(&doc, "retryLoadGallery") {
        let gallery = Rc::clone(&gallery);
        listen(&retry, "click", move |_| gallery.reload())?;
    }

    wire_anchor_scroll(&win, &doc)?;

    gallery.reload();
    log::info!("page wired");
    Ok(())
}

fn wire_navigation(doc: &Document) -> Result<()> {
    let toggle = doc
        .query_selector(".menu-toggle")
        .map_err(js_err)?
        .context("missing .menu-toggle")?;
    let links = doc
        .query_selector(".nav-links")
        .map_err(js_err)?
        .context("missing .nav-links")?;

    let nav = Rc::new(NavMenu::new(DomNavView::new(links)));

    let menu = Rc::clone(&nav);
    listen(&toggle, "click", move |_| menu.toggle())?;

    for link in select_all(doc, ".nav-links a")? {
        let menu = Rc::clone(&nav);
        listen(&link, "click", move |_| menu.link_clicked())?;
    }
    Ok(())
}

fn set_current_year(doc: &Document) {
    if let Some(el) = optional::<HtmlElement>(doc, "currentYear") {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

fn wire_modal_close(
    win: &Window,
    doc: &Document,
    modal: &Rc<ModalController<DomModalView>>,
) -> Result<()> {
    let mut triggers = select_all(doc, ".close-btn")?;
    triggers.extend(optional::<Element>(doc, "backToGallery"));
    for trigger in triggers {
        let modal = Rc::clone(modal);
        listen(&trigger, "click", move |_| modal.close())?;
    }

    let modal = Rc::clone(modal);
    listen(win, "click", move |event| {
        let root: &JsValue = modal.view().root().as_ref();
        let on_backdrop = event
            .target()
            .is_some_and(|target| JsValue::from(target) == *root);
        modal.backdrop_click(on_backdrop);
    })
}

fn wire_contact_form(win: &Window, doc: &Document, config: SiteConfig) -> Result<()> {
    let Some(form) = optional::<HtmlFormElement>(doc, "contactForm") else {
        return Ok(());
    };

    let view = DomContactForm::new(win, doc, form.clone());
    listen(&form, "submit", move |event| {
        event.prevent_default();
        if let Err(e) = submit_contact(&view, &config) {
            log::error!("contact form: {e:#}");
        }
    })
}

fn header_height(doc: &Document) -> f64 {
    doc.query_selector("header")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |header| f64::from(header.offset_height()))
}

fn wire_anchor_scroll(win: &Window, doc: &Document) -> Result<()> {
    for anchor in select_all(doc, "a[href^=\"#\"]")? {
        let (win, doc, link) = (win.clone(), doc.clone(), anchor.clone());
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let top = scroll_target(&href, header_height(&doc), |id| {
                doc.get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .map(|el| f64::from(el.offset_top()))
            });
            if let Some(top) = top {
                let opts = ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&opts);
            }
        })?;
    }
    Ok(())
}
