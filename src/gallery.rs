//! Gallery loading and rendering.
//!
//! The page surface and the network are both injected: [`GalleryView`] is what
//! the renderer draws into, [`GalleryFetcher`] is what the loader reads from.

use std::cell::Cell;

use crate::config::SiteConfig;
use crate::design::{Card, Design, GalleryDocument, fallback_designs};
use crate::error::GalleryError;

/// Footer text when the document carries no `lastUpdated`.
pub const LAST_UPDATED_DEFAULT: &str = "Recently";

/// Which of the gallery's placeholder areas is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error,
    Empty,
    Content,
    /// Cards from fallback data, with the error banner still showing.
    Fallback,
}

pub trait GalleryView {
    fn show_state(&self, state: ViewState);
    fn clear_cards(&self);
    /// Append one card; a click on it opens `GalleryState::designs[index]`.
    fn append_card(&self, card: &Card, index: usize);
    fn set_last_updated(&self, text: &str);
}

/// Raw HTTP result handed back by a fetcher.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait GalleryFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, GalleryError>;
}

/// The in-memory gallery; only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub designs: Vec<Design>,
    pub last_updated: String,
    pub from_fallback: bool,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            designs: Vec::new(),
            last_updated: LAST_UPDATED_DEFAULT.to_string(),
            from_fallback: false,
        }
    }
}

impl From<GalleryDocument> for GalleryState {
    fn from(doc: GalleryDocument) -> Self {
        let GalleryDocument { last_updated, designs } = doc;
        let last_updated = last_updated
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| LAST_UPDATED_DEFAULT.to_string());
        Self {
            designs: designs.unwrap_or_default(),
            last_updated,
            from_fallback: false,
        }
    }
}

impl GalleryState {
    pub fn fallback() -> Self {
        Self {
            designs: fallback_designs(),
            from_fallback: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(GalleryState),
    Fallback { state: GalleryState, error: GalleryError },
}

/// GET `url`, check the status and decode the gallery document.
pub async fn fetch_gallery<F: GalleryFetcher>(
    fetcher: &F,
    url: &str,
) -> Result<GalleryDocument, GalleryError> {
    let resp = fetcher.get(url).await?;
    if !resp.ok() {
        return Err(GalleryError::Status(resp.status));
    }
    Ok(serde_json::from_str(&resp.body)?)
}

/// Remote data when it loads, fallback data (with the reason) when it does not.
pub async fn load_with_fallback<F: GalleryFetcher>(fetcher: &F, url: &str) -> LoadOutcome {
    match fetch_gallery(fetcher, url).await {
        Ok(doc) => LoadOutcome::Loaded(doc.into()),
        Err(error) => LoadOutcome::Fallback {
            state: GalleryState::fallback(),
            error,
        },
    }
}

/// Clear the card list and rebuild it from `state`.
pub fn render<V: GalleryView>(state: &GalleryState, view: &V, config: &SiteConfig) {
    view.clear_cards();

    if state.designs.is_empty() {
        view.show_state(ViewState::Empty);
        return;
    }

    view.show_state(if state.from_fallback {
        ViewState::Fallback
    } else {
        ViewState::Content
    });

    for (index, design) in state.designs.iter().enumerate() {
        view.append_card(&Card::new(design, index, config), index);
    }
}

/// Tickets for in-flight loads. Only the most recently started load may
/// publish its result.
#[derive(Debug, Default)]
pub struct LoadSequence {
    latest: Cell<u64>,
}

impl LoadSequence {
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

/// Full load cycle: loading state, fetch, footer update, render.
///
/// Returns the state that was rendered, or `None` when a later load started
/// while this one was waiting on the network.
pub async fn load_gallery<F, V>(
    fetcher: &F,
    config: &SiteConfig,
    view: &V,
    loads: &LoadSequence,
) -> Option<GalleryState>
where
    F: GalleryFetcher,
    V: GalleryView,
{
    let ticket = loads.begin();
    view.show_state(ViewState::Loading);

    let outcome = load_with_fallback(fetcher, &config.gallery_url).await;
    if !loads.is_current(ticket) {
        log::debug!("gallery load #{ticket} superseded, dropping result");
        return None;
    }

    let state = match outcome {
        LoadOutcome::Loaded(state) => {
            log::info!("gallery loaded ({} designs)", state.designs.len());
            view.set_last_updated(&state.last_updated);
            state
        }
        LoadOutcome::Fallback { state, error } => {
            log::error!("Error loading gallery: {error}");
            view.show_state(ViewState::Error);
            state
        }
    };
    render(&state, view, config);
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeView {
        states: RefCell<Vec<ViewState>>,
        cards: RefCell<Vec<Card>>,
        indices: RefCell<Vec<usize>>,
        last_updated: RefCell<Option<String>>,
    }

    impl FakeView {
        fn state(&self) -> Option<ViewState> {
            self.states.borrow().last().copied()
        }

        fn titles(&self) -> Vec<String> {
            self.cards.borrow().iter().map(|c| c.title.clone()).collect()
        }
    }

    impl GalleryView for FakeView {
        fn show_state(&self, state: ViewState) {
            self.states.borrow_mut().push(state);
        }
        fn clear_cards(&self) {
            self.cards.borrow_mut().clear();
            self.indices.borrow_mut().clear();
        }
        fn append_card(&self, card: &Card, index: usize) {
            self.cards.borrow_mut().push(card.clone());
            self.indices.borrow_mut().push(index);
        }
        fn set_last_updated(&self, text: &str) {
            *self.last_updated.borrow_mut() = Some(text.to_string());
        }
    }

    enum FakeFetcher {
        Respond(u16, &'static str),
        Offline,
    }

    impl GalleryFetcher for FakeFetcher {
        async fn get(&self, _url: &str) -> Result<FetchResponse, GalleryError> {
            match self {
                Self::Respond(status, body) => Ok(FetchResponse {
                    status: *status,
                    body: body.to_string(),
                }),
                Self::Offline => Err(GalleryError::Network("offline".into())),
            }
        }
    }

    /// Starts another load while its own request is in flight.
    struct RacingFetcher<'a> {
        loads: &'a LoadSequence,
    }

    impl GalleryFetcher for RacingFetcher<'_> {
        async fn get(&self, _url: &str) -> Result<FetchResponse, GalleryError> {
            self.loads.begin();
            Ok(FetchResponse {
                status: 200,
                body: r#"{"designs": [{"title": "stale"}]}"#.into(),
            })
        }
    }

    const THREE: &str = r#"{
        "lastUpdated": "2024-02-01",
        "designs": [
            {"id": 7, "title": "A", "image": "https://x.io/a.jpg"},
            {"title": "B", "image": "https://x.io/b.jpg", "category": "Blinds"},
            {"title": "C", "image": "https://x.io/c.jpg", "date": "2024-01-01"}
        ]
    }"#;

    fn run(fetcher: &FakeFetcher) -> (FakeView, Option<GalleryState>) {
        let view = FakeView::default();
        let loads = LoadSequence::default();
        let state = block_on(load_gallery(fetcher, &SiteConfig::default(), &view, &loads));
        (view, state)
    }

    #[test]
    fn renders_one_card_per_design_in_order() {
        let (view, state) = run(&FakeFetcher::Respond(200, THREE));
        assert_eq!(view.titles(), ["A", "B", "C"]);
        assert_eq!(*view.indices.borrow(), [0, 1, 2]);
        assert_eq!(view.cards.borrow()[0].id, 7);
        assert_eq!(view.cards.borrow()[1].id, 2);
        assert_eq!(view.state(), Some(ViewState::Content));
        assert_eq!(view.states.borrow()[0], ViewState::Loading);
        assert_eq!(view.last_updated.borrow().as_deref(), Some("2024-02-01"));
        assert_eq!(state.unwrap().designs.len(), 3);
    }

    #[test]
    fn missing_last_updated_reads_recently() {
        let (view, _) = run(&FakeFetcher::Respond(200, r#"{"designs": [{"title": "A"}]}"#));
        assert_eq!(view.last_updated.borrow().as_deref(), Some(LAST_UPDATED_DEFAULT));
    }

    #[test]
    fn loose_entries_still_render_the_remote_gallery() {
        for body in [
            r#"{"designs": [{"title": "A", "image": null}, {"title": "B"}]}"#,
            r#"{"designs": [{"id": "1", "title": "A"}, {"title": "B"}]}"#,
            r#"{"lastUpdated": 20240201, "designs": [{"title": "A"}, {"title": "B", "id": 2.5}]}"#,
        ] {
            let (view, state) = run(&FakeFetcher::Respond(200, body));
            assert_eq!(view.titles(), ["A", "B"], "{body}");
            assert_eq!(view.state(), Some(ViewState::Content));
            assert!(!state.unwrap().from_fallback);
        }

        let (view, _) = run(&FakeFetcher::Respond(200, r#"{"designs": [{"title": null}]}"#));
        assert_eq!(view.titles(), [""]);
        assert_eq!(view.state(), Some(ViewState::Content));
    }

    #[test]
    fn empty_document_shows_empty_state() {
        let (view, state) = run(&FakeFetcher::Respond(200, r#"{"designs": []}"#));
        assert!(view.cards.borrow().is_empty());
        assert_eq!(view.state(), Some(ViewState::Empty));
        assert!(state.unwrap().designs.is_empty());

        let (view, _) = run(&FakeFetcher::Respond(200, "{}"));
        assert_eq!(view.state(), Some(ViewState::Empty));
    }

    #[test]
    fn every_failure_renders_the_fallback_with_error_banner() {
        for fetcher in [
            FakeFetcher::Offline,
            FakeFetcher::Respond(404, "not found"),
            FakeFetcher::Respond(500, THREE),
            FakeFetcher::Respond(200, "<html>nope</html>"),
        ] {
            let (view, state) = run(&fetcher);
            assert_eq!(view.cards.borrow().len(), 3);
            assert_eq!(view.titles()[0], "Window Blind & Curtain");
            assert!(view.states.borrow().contains(&ViewState::Error));
            assert_eq!(view.state(), Some(ViewState::Fallback));
            assert!(view.last_updated.borrow().is_none());
            assert!(state.unwrap().from_fallback);
        }
    }

    #[test]
    fn classifies_failures() {
        let err = |f: FakeFetcher| match block_on(load_with_fallback(&f, "u")) {
            LoadOutcome::Fallback { error, .. } => error,
            LoadOutcome::Loaded(_) => panic!("expected fallback"),
        };
        assert!(matches!(err(FakeFetcher::Respond(503, "")), GalleryError::Status(503)));
        assert!(matches!(err(FakeFetcher::Offline), GalleryError::Network(_)));
        assert!(matches!(err(FakeFetcher::Respond(200, "{")), GalleryError::Parse(_)));
    }

    #[test]
    fn rerender_replaces_stale_cards() {
        let cfg = SiteConfig::default();
        let view = FakeView::default();
        render(&GalleryState::fallback(), &view, &cfg);
        assert_eq!(view.cards.borrow().len(), 3);

        let doc: GalleryDocument = serde_json::from_str(r#"{"designs": [{"title": "only"}]}"#).unwrap();
        render(&doc.into(), &view, &cfg);
        assert_eq!(view.titles(), ["only"]);
    }

    #[test]
    fn superseded_load_renders_nothing() {
        let loads = LoadSequence::default();
        let view = FakeView::default();
        let fetcher = RacingFetcher { loads: &loads };
        let result = block_on(load_gallery(&fetcher, &SiteConfig::default(), &view, &loads));
        assert!(result.is_none());
        assert!(view.cards.borrow().is_empty());
        assert_eq!(*view.states.borrow(), [ViewState::Loading]);
    }

    #[test]
    fn tickets_track_the_latest_load() {
        let loads = LoadSequence::default();
        let first = loads.begin();
        assert!(loads.is_current(first));
        let second = loads.begin();
        assert!(!loads.is_current(first));
        assert!(loads.is_current(second));
    }
}
