use crate::pipeline::{LoadError, ViewData, ViewKind};

pub const PAGE_SIZE: u16 = 10;

/// What a single tab currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Never loaded yet
    #[default]
    Idle,
    /// A pipeline run is in progress; earlier data is not shown
    Loading,
    Loaded(ViewData),
    Failed(LoadError),
}

pub struct TuiApp {
    pub active_view: ViewKind,
    pub views: [ViewState; 3],
    pub scroll: [u16; 3],
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_view: ViewKind::Feed,
            views: Default::default(),
            scroll: [0; 3],
            should_quit: false,
            status_message: None,
        }
    }

    pub fn state(&self, view: ViewKind) -> &ViewState {
        &self.views[view.index()]
    }

    pub fn active_state(&self) -> &ViewState {
        self.state(self.active_view)
    }

    pub fn active_scroll(&self) -> u16 {
        self.scroll[self.active_view.index()]
    }

    /// A tab loads the first time it is shown.
    pub fn needs_load(&self) -> bool {
        matches!(self.active_state(), ViewState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.active_state(), ViewState::Loading)
    }

    pub fn begin_load(&mut self, view: ViewKind) {
        self.views[view.index()] = ViewState::Loading;
        self.scroll[view.index()] = 0;
    }

    pub fn finish_load(&mut self, view: ViewKind, result: Result<ViewData, LoadError>) {
        let state = match result {
            Ok(data) => {
                self.set_status(format!("{} loaded", view));
                ViewState::Loaded(data)
            }
            Err(e) => ViewState::Failed(e),
        };
        self.views[view.index()] = state;
    }

    pub fn show(&mut self, view: ViewKind) {
        self.active_view = view;
        self.clear_status();
    }

    pub fn next_view(&mut self) {
        self.show(self.active_view.next());
    }

    pub fn prev_view(&mut self) {
        self.show(self.active_view.prev());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let scroll = &mut self.scroll[self.active_view.index()];
        *scroll = scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let scroll = &mut self.scroll[self.active_view.index()];
        *scroll = scroll.saturating_add(lines);
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
