//! The top-level program model.
//!
//! [`App`] wires the search form, the gallery, the notice bar and the
//! pagination buttons together. Searches run as commands on the program's
//! runtime and come back as [`SearchResultMsg`]; everything else happens on
//! the update loop.

use std::sync::Arc;

use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use tracing::{debug, info, warn};

use crate::config::{self, Config};
use crate::error::SearchError;
use crate::form::{self, PasteErrMsg, SubmitMsg};
use crate::gallery;
use crate::help;
use crate::host::{Container, Host};
use crate::key::{self, KeyMap};
use crate::notify;
use crate::pagination::{self, PageChangedMsg};
use crate::search::{ImageSearch, PixabayClient, SearchPage, SearchQuery};
use crate::Component;

/// Shown for blank queries and searches without hits.
pub const NO_RESULTS: &str =
    "Sorry, there are no images matching your search query. Please try again.";
/// Shown when the last page of results is displayed.
pub const END_OF_RESULTS: &str = "We're sorry, but you've reached the end of search results.";

/// Lines used by everything except the gallery.
const CHROME_HEIGHT: usize = 8;

/// A finished search.
#[derive(Debug)]
pub struct SearchResultMsg {
    /// Sequence number of the request.
    pub seq: u64,
    /// True for the first page of a newly submitted query.
    pub fresh: bool,
    /// The query that was sent.
    pub query: SearchQuery,
    /// What came back.
    pub result: Result<SearchPage, SearchError>,
}

/// The part of the screen receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// The search form.
    Form,
    /// The card grid.
    Gallery,
    /// The pagination buttons.
    Pagination,
}

/// Program-wide key bindings.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Focus the next pane.
    pub next_pane: key::Binding,
    /// Focus the previous pane.
    pub prev_pane: key::Binding,
    /// Return to the search form.
    pub back: key::Binding,
    /// Toggle full help.
    pub help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            next_pane: key::new_binding(vec![
                key::with_keys_str(&["tab"]),
                key::with_help("tab", "next pane"),
            ]),
            prev_pane: key::new_binding(vec![
                key::with_keys_str(&["shift+tab"]),
                key::with_help("shift+tab", "prev pane"),
            ]),
            back: key::new_binding(vec![
                key::with_keys_str(&["esc"]),
                key::with_help("esc", "search"),
            ]),
            help: key::new_binding(vec![
                key::with_keys_str(&["?"]),
                key::with_help("?", "more"),
            ]),
            quit: key::new_binding(vec![
                key::with_keys_str(&["ctrl+c"]),
                key::with_help("ctrl+c", "quit"),
            ]),
        }
    }
}

impl KeyMap for AppKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.next_pane, &self.back, &self.help, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.next_pane, &self.prev_pane, &self.back, &self.help, &self.quit]]
    }
}

/// Bindings shown in the help line: the focused pane's followed by the app's.
struct ActiveKeys<'a> {
    pane: Vec<Vec<&'a key::Binding>>,
    app: &'a AppKeyMap,
}

impl KeyMap for ActiveKeys<'_> {
    fn short_help(&self) -> Vec<&key::Binding> {
        let mut bindings: Vec<&key::Binding> = self.pane.first().cloned().unwrap_or_default();
        bindings.extend(self.app.short_help());
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        let mut groups = self.pane.clone();
        groups.extend(self.app.full_help());
        groups
    }
}

/// The image search gallery.
pub struct App {
    config: Config,
    search: Arc<dyn ImageSearch>,
    form: form::Model,
    gallery: gallery::Model,
    notices: notify::Model,
    help: help::Model,
    pagination: Option<pagination::Model>,
    host: Container,
    query: Option<SearchQuery>,
    seq: u64,
    pane: Pane,
    /// Program-wide key bindings.
    pub keymap: AppKeyMap,
}

impl App {
    /// Creates an app searching through `search`.
    pub fn with_search(config: Config, search: Arc<dyn ImageSearch>) -> Self {
        let mut form = form::Model::new();
        form.focus();
        Self {
            notices: notify::Model::new(config.notice_timeout),
            config,
            search,
            form,
            gallery: gallery::Model::new(80, 20),
            help: help::Model::new(),
            pagination: None,
            host: Container::new(),
            query: None,
            seq: 0,
            pane: Pane::Form,
            keymap: AppKeyMap::default(),
        }
    }

    /// The pane receiving keys.
    pub fn pane(&self) -> Pane {
        self.pane
    }

    /// The search form.
    pub fn form(&self) -> &form::Model {
        &self.form
    }

    /// The card grid.
    pub fn gallery(&self) -> &gallery::Model {
        &self.gallery
    }

    /// The notice bar.
    pub fn notices(&self) -> &notify::Model {
        &self.notices
    }

    /// The pagination buttons of the current query.
    pub fn pagination(&self) -> Option<&pagination::Model> {
        self.pagination.as_ref()
    }

    /// The host the pagination buttons are attached to.
    pub fn host(&self) -> &Container {
        &self.host
    }

    /// The last query sent.
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// Submits `text` as a new query.
    ///
    /// Blank text only raises a notice. Otherwise the grid is cleared and page
    /// 1 is requested.
    pub fn submit(&mut self, text: &str) -> Option<Cmd> {
        let query = match SearchQuery::new(text, self.config.per_page) {
            Ok(query) => query,
            Err(err) => {
                debug!(error = %err, "rejected query");
                return Some(self.notices.failure(NO_RESULTS));
            }
        };
        self.gallery.clear();
        Some(self.fetch(query, true))
    }

    fn fetch(&mut self, query: SearchQuery, fresh: bool) -> Cmd {
        self.seq += 1;
        let seq = self.seq;
        debug!(seq, query = query.text(), page = query.page, "requesting page");
        self.query = Some(query.clone());

        let search = Arc::clone(&self.search);
        Box::pin(async move {
            let result = search.search(&query).await;
            Some(Box::new(SearchResultMsg {
                seq,
                fresh,
                query,
                result,
            }) as Msg)
        })
    }

    fn change_page(&mut self, page: u32) -> Option<Cmd> {
        let query = self.query.clone()?.with_page(page);
        debug!(page, "page changed");
        Some(self.fetch(query, false))
    }

    fn on_result(&mut self, msg: SearchResultMsg) -> Option<Cmd> {
        if msg.seq != self.seq {
            debug!(seq = msg.seq, latest = self.seq, "dropping stale response");
            return None;
        }
        // The old widget belongs to the previous query, whatever the outcome.
        if msg.fresh {
            self.drop_pagination();
        }
        let page = match msg.result {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, query = msg.query.text(), "search failed");
                return Some(self.notices.failure(err.to_string()));
            }
        };
        let total_pages = page.total_pages(self.config.per_page);
        info!(
            query = msg.query.text(),
            page = msg.query.page,
            total_hits = page.total_hits,
            hits = page.hits.len(),
            "search results"
        );

        if msg.fresh {
            if page.hits.is_empty() || total_pages == 0 {
                return Some(self.notices.failure(NO_RESULTS));
            }
            self.mount_pagination(total_pages);
        }
        self.gallery.set_hits(page.hits);

        if msg.query.page >= total_pages {
            Some(self.notices.failure(END_OF_RESULTS))
        } else if msg.fresh {
            Some(
                self.notices
                    .success(format!("Hooray! We found {} images.", page.total_hits)),
            )
        } else {
            None
        }
    }

    fn mount_pagination(&mut self, total_pages: u32) {
        let mut buttons = match pagination::Model::new(total_pages, self.config.max_visible, 1) {
            Ok(buttons) => buttons,
            Err(err) => {
                warn!(error = %err, total_pages, "could not build pagination");
                return;
            }
        };
        if let Err(err) = buttons.render(&mut self.host) {
            warn!(error = %err, "could not attach pagination");
            return;
        }
        self.pagination = Some(buttons);
    }

    fn drop_pagination(&mut self) {
        if let Some(old) = self.pagination.take() {
            old.detach(&mut self.host);
        }
        if self.pane == Pane::Pagination {
            self.set_pane(Pane::Form);
        }
    }

    fn panes(&self) -> Vec<Pane> {
        let mut panes = vec![Pane::Form];
        if !self.gallery.is_empty() {
            panes.push(Pane::Gallery);
        }
        if self.pagination.is_some() {
            panes.push(Pane::Pagination);
        }
        panes
    }

    fn cycle_pane(&mut self, forward: bool) -> Option<Cmd> {
        let panes = self.panes();
        let at = panes.iter().position(|p| *p == self.pane).unwrap_or(0);
        let next = if forward {
            (at + 1) % panes.len()
        } else {
            (at + panes.len() - 1) % panes.len()
        };
        self.set_pane(panes[next])
    }

    fn set_pane(&mut self, pane: Pane) -> Option<Cmd> {
        self.form.blur();
        self.gallery.blur();
        if let Some(buttons) = self.pagination.as_mut() {
            buttons.blur();
        }
        self.pane = pane;
        match pane {
            Pane::Form => self.form.focus(),
            Pane::Gallery => self.gallery.focus(),
            Pane::Pagination => self.pagination.as_mut().and_then(|b| b.focus()),
        }
    }

    /// Handles program-wide keys. `None` lets the key through to the panes.
    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Option<Cmd>> {
        if self.keymap.quit.matches(key_msg) {
            return Some(Some(bubbletea_rs::quit()));
        }
        if self.pane == Pane::Gallery && self.gallery.lightbox.is_open() {
            return None;
        }
        if self.keymap.next_pane.matches(key_msg) {
            return Some(self.cycle_pane(true));
        }
        if self.keymap.prev_pane.matches(key_msg) {
            return Some(self.cycle_pane(false));
        }
        if self.pane != Pane::Form {
            if self.keymap.back.matches(key_msg) {
                return Some(self.set_pane(Pane::Form));
            }
            if self.keymap.help.matches(key_msg) {
                self.help.show_all = !self.help.show_all;
                return Some(None);
            }
        }
        None
    }

    fn active_keys(&self) -> ActiveKeys<'_> {
        let pane = match self.pane {
            Pane::Form => self.form.keymap.full_help(),
            Pane::Gallery => self.gallery.keymap.full_help(),
            Pane::Pagination => match &self.pagination {
                Some(buttons) => buttons.keymap.full_help(),
                None => Vec::new(),
            },
        };
        ActiveKeys {
            pane,
            app: &self.keymap,
        }
    }

    fn batch(cmds: Vec<Cmd>) -> Option<Cmd> {
        match cmds.len() {
            0 => None,
            1 => cmds.into_iter().next(),
            _ => Some(bubbletea_rs::batch(cmds)),
        }
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let config = config::current();
        let search: Arc<dyn ImageSearch> = Arc::new(PixabayClient::from_config(&config));
        let initial = config.initial_query.clone();
        let mut app = Self::with_search(config, search);
        let cmd = match initial {
            Some(text) => {
                app.form.set_value(&text);
                app.submit(&text)
            }
            None => None,
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<SearchResultMsg>() {
            Ok(result) => return self.on_result(*result),
            Err(msg) => msg,
        };

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            let width = size.width as usize;
            let height = (size.height as usize).saturating_sub(CHROME_HEIGHT);
            self.gallery.set_size(width, height);
            self.help.width = width;
            return None;
        }
        if let Some(submit) = msg.downcast_ref::<SubmitMsg>() {
            return self.submit(&submit.0);
        }
        if let Some(changed) = msg.downcast_ref::<PageChangedMsg>() {
            let current = self.pagination.as_ref().map(|b| b.id());
            if current != Some(changed.id) {
                debug!(page = changed.page, "ignoring change from a dropped widget");
                return None;
            }
            return self.change_page(changed.page);
        }
        if let Some(err) = msg.downcast_ref::<PasteErrMsg>() {
            warn!(error = %err.0, "clipboard read failed");
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if let Some(cmd) = self.handle_key(key_msg) {
                return cmd;
            }
        }

        self.notices.update(&msg);
        let mut cmds = Vec::new();
        cmds.extend(self.form.update(&msg));
        cmds.extend(self.gallery.update(&msg));
        if let Some(buttons) = self.pagination.as_mut() {
            cmds.extend(buttons.update(&msg));
        }
        Self::batch(cmds)
    }

    fn view(&self) -> String {
        let mut sections = vec![self.form.view(), self.notices.view(), String::new()];

        let grid = self.gallery.view();
        if !grid.is_empty() {
            sections.push(grid);
            sections.push(String::new());
        }
        if let Some(buttons) = &self.pagination {
            if self.host.contains(buttons.id()) {
                sections.push(buttons.view());
                sections.push(String::new());
            }
        }
        sections.push(self.help.view(&self.active_keys()));
        sections.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Hit;
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use lipgloss_extras::lipgloss;
    use std::sync::Mutex;

    /// Serves `total_hits` hits, `per_page` at a time, and records each query.
    struct FakeSearch {
        total_hits: u64,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl FakeSearch {
        fn new(total_hits: u64) -> Arc<Self> {
            Arc::new(Self {
                total_hits,
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ImageSearch for FakeSearch {
        async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
            self.queries.lock().unwrap().push(query.clone());
            let first = u64::from(query.page - 1) * u64::from(query.per_page);
            let last = (first + u64::from(query.per_page)).min(self.total_hits);
            let hits = (first..last)
                .map(|i| Hit {
                    id: i + 1,
                    webformat_url: format!("https://cdn.example/{i}_640.jpg"),
                    large_image_url: format!("https://cdn.example/{i}_1280.jpg"),
                    tags: format!("{} {}", query.text(), i),
                    likes: 1,
                    views: 2,
                    comments: 3,
                    downloads: 4,
                })
                .collect();
            Ok(SearchPage {
                total: self.total_hits,
                total_hits: self.total_hits,
                hits,
            })
        }
    }

    fn config() -> Config {
        Config {
            api_key: "test".to_string(),
            per_page: 10,
            max_visible: 5,
            ..Config::default()
        }
    }

    fn app(total_hits: u64) -> (App, Arc<FakeSearch>) {
        let search = FakeSearch::new(total_hits);
        let app = App::with_search(config(), search.clone());
        (app, search)
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    /// Runs a search command and feeds its result back.
    async fn run(app: &mut App, cmd: Option<Cmd>) -> Option<Cmd> {
        let msg = cmd.expect("command").await.expect("message");
        app.update(msg)
    }

    fn notice(app: &App) -> Option<(notify::Level, String)> {
        app.notices()
            .current()
            .map(|n| (n.level, n.message.clone()))
    }

    #[test]
    fn test_blank_query_only_notifies() {
        let (mut app, search) = app(100);
        assert!(app.submit("   ").is_some());
        assert_eq!(notice(&app), Some((notify::Level::Failure, NO_RESULTS.to_string())));
        assert!(app.query().is_none());
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_page_builds_pagination() {
        let (mut app, search) = app(25);
        let cmd = app.submit(" owls ");
        run(&mut app, cmd).await;

        let buttons = app.pagination().expect("pagination");
        assert_eq!(buttons.total_pages(), 3);
        assert_eq!(buttons.current_page(), 1);
        assert!(app.host().contains(buttons.id()));
        assert_eq!(app.gallery().hits().len(), 10);
        assert_eq!(
            notice(&app),
            Some((notify::Level::Success, "Hooray! We found 25 images.".to_string()))
        );

        let sent = search.queries.lock().unwrap();
        assert_eq!(sent[0].text(), "owls");
        assert_eq!(sent[0].page, 1);
    }

    #[tokio::test]
    async fn test_zero_hits() {
        let (mut app, _) = app(0);
        let cmd = app.submit("nothing");
        run(&mut app, cmd).await;

        assert!(app.pagination().is_none());
        assert!(app.host().is_empty());
        assert!(app.gallery().is_empty());
        assert_eq!(notice(&app), Some((notify::Level::Failure, NO_RESULTS.to_string())));
    }

    #[tokio::test]
    async fn test_page_change_fetches_that_page() {
        let (mut app, search) = app(25);
        let cmd = app.submit("owls");
        run(&mut app, cmd).await;

        let id = app.pagination().unwrap().id();
        let cmd = app.update(Box::new(PageChangedMsg { id, page: 3 }) as Msg);
        run(&mut app, cmd).await;

        assert_eq!(search.queries.lock().unwrap().last().unwrap().page, 3);
        assert_eq!(app.gallery().hits().len(), 5);
        assert_eq!(
            notice(&app),
            Some((notify::Level::Failure, END_OF_RESULTS.to_string()))
        );
        // The widget itself is kept for page changes.
        assert_eq!(app.pagination().unwrap().id(), id);
    }

    #[tokio::test]
    async fn test_new_query_replaces_pagination() {
        let (mut app, _) = app(25);
        let cmd = app.submit("owls");
        run(&mut app, cmd).await;
        let old = app.pagination().unwrap().id();

        let cmd = app.submit("larks");
        run(&mut app, cmd).await;
        let new = app.pagination().unwrap().id();

        assert_ne!(old, new);
        assert!(!app.host().contains(old));
        assert_eq!(app.host().len(), 1);

        // A late change from the dropped widget is ignored.
        assert!(app
            .update(Box::new(PageChangedMsg { id: old, page: 2 }) as Msg)
            .is_none());
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let (mut app, _) = app(25);
        let first = app.submit("owls");
        let second = app.submit("larks");

        let late = first.unwrap().await.unwrap();
        assert!(app.update(late).is_none());
        assert!(app.pagination().is_none());

        run(&mut app, second).await;
        assert!(app.gallery().hits()[0].tags.starts_with("larks"));
    }

    #[tokio::test]
    async fn test_single_page_reports_end() {
        let (mut app, _) = app(4);
        let cmd = app.submit("moths");
        run(&mut app, cmd).await;
        assert_eq!(app.pagination().unwrap().total_pages(), 1);
        assert_eq!(
            notice(&app),
            Some((notify::Level::Failure, END_OF_RESULTS.to_string()))
        );
    }

    #[tokio::test]
    async fn test_search_error_becomes_notice() {
        struct Failing;

        #[async_trait]
        impl ImageSearch for Failing {
            async fn search(&self, _: &SearchQuery) -> Result<SearchPage, SearchError> {
                Err(SearchError::Status {
                    status: 429,
                    body: "rate limited".to_string(),
                })
            }
        }

        let mut app = App::with_search(config(), Arc::new(Failing));
        let cmd = app.submit("owls");
        run(&mut app, cmd).await;

        let (level, message) = notice(&app).unwrap();
        assert_eq!(level, notify::Level::Failure);
        assert!(message.contains("429"));
    }

    #[tokio::test]
    async fn test_failed_new_search_drops_old_pagination() {
        /// Fails every query with the given text.
        struct FailOn {
            text: &'static str,
            inner: Arc<FakeSearch>,
        }

        #[async_trait]
        impl ImageSearch for FailOn {
            async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
                if query.text() == self.text {
                    return Err(SearchError::Status {
                        status: 500,
                        body: "boom".to_string(),
                    });
                }
                self.inner.search(query).await
            }
        }

        let search = Arc::new(FailOn {
            text: "x",
            inner: FakeSearch::new(500),
        });
        let mut app = App::with_search(config(), search);
        let cmd = app.submit("dogs");
        run(&mut app, cmd).await;
        let old = app.pagination().unwrap().id();
        assert_eq!(app.pagination().unwrap().total_pages(), 50);

        let cmd = app.submit("x");
        run(&mut app, cmd).await;

        assert!(app.pagination().is_none());
        assert!(!app.host().contains(old));
        assert!(app.host().is_empty());
        assert!(app.gallery().is_empty());
        // A change from the dropped widget does not fetch pages of "x".
        assert!(app
            .update(Box::new(PageChangedMsg { id: old, page: 50 }) as Msg)
            .is_none());
    }

    #[tokio::test]
    async fn test_tab_cycles_available_panes() {
        let (mut app, _) = app(25);
        app.update(key(KeyCode::Tab));
        assert_eq!(app.pane(), Pane::Form);

        let cmd = app.submit("owls");
        run(&mut app, cmd).await;

        app.update(key(KeyCode::Tab));
        assert_eq!(app.pane(), Pane::Gallery);
        assert!(app.gallery().focused());
        assert!(!app.form().focused());

        app.update(key(KeyCode::Tab));
        assert_eq!(app.pane(), Pane::Pagination);
        assert!(app.pagination().unwrap().focused());

        app.update(key(KeyCode::Esc));
        assert_eq!(app.pane(), Pane::Form);
        assert!(app.form().focused());
    }

    #[tokio::test]
    async fn test_pagination_keys_reach_widget() {
        let (mut app, _) = app(25);
        let cmd = app.submit("owls");
        run(&mut app, cmd).await;

        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        let cmd = app.update(key(KeyCode::PageDown));
        assert_eq!(app.pagination().unwrap().current_page(), 2);

        // The widget's PageChangedMsg leads to a fetch of page 2.
        let changed = cmd.unwrap().await.unwrap();
        let fetch = app.update(changed);
        run(&mut app, fetch).await;
        assert_eq!(app.query().unwrap().page, 2);
    }

    #[test]
    fn test_view_lists_form_and_help() {
        let (app, _) = app(0);
        let view = lipgloss::strip_ansi(&app.view());
        assert!(view.contains("Search:"));
        assert!(view.contains("enter search"));
        assert!(view.contains("ctrl+c quit"));
    }

    #[tokio::test]
    async fn test_view_shows_pagination_once_rendered() {
        let (mut app, _) = app(25);
        let cmd = app.submit("owls");
        run(&mut app, cmd).await;
        let view = lipgloss::strip_ansi(&app.view());
        assert!(view.contains("owls 0"));
        assert!(view.contains("Start"));
        assert!(view.contains("End"));
    }
}
