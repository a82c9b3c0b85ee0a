// TUI application state and key handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use storefront_core::{
    Action, CatalogAction, FavoritesAction, FilterAction, Product, ProductId, Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Listing,
    Detail,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating
    Searching, // Typing in the search box
}

/// What the event loop has to do after a key press
///
/// Keeps all the async/timer business in the runner so the app itself stays
/// plain state you can poke at in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Buffer changed, restart the debounce timer with this text
    Search(String),
    /// Search was committed or reset directly; drop any pending debounce
    CancelSearch,
    FetchProduct(ProductId),
    ReloadProducts,
}

pub struct App {
    pub store: Store,
    pub screen: Screen,
    pub input_mode: InputMode,
    // Raw keystrokes; only reaches the filters through the debouncer
    pub search_input: String,
    pub selected_index: usize,
    pub list_state: ListState,
    pub favorites_index: usize,
    pub favorites_state: ListState,
    pub detail_id: Option<ProductId>,
    pub detail_return: Screen,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            screen: Screen::Listing,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            selected_index: 0,
            list_state: ListState::default(),
            favorites_index: 0,
            favorites_state: ListState::default(),
            detail_id: None,
            detail_return: Screen::Listing,
            should_quit: false,
        }
    }

    /// Dispatch into the store and keep the cursors in range
    pub fn apply(&mut self, action: impl Into<Action>) {
        self.store.dispatch(action);
        self.clamp_selection();
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.store.visible_products().get(self.selected_index)
    }

    pub fn selected_favorite(&self) -> Option<&Product> {
        self.store.favorites().items().get(self.favorites_index)
    }

    /// "" (all categories) followed by whatever the store told us
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.store.catalog().categories().iter().cloned())
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Effect::Quit;
        }

        let effect = match (self.input_mode, self.screen) {
            (InputMode::Searching, _) => self.handle_search_key(key),
            (InputMode::Normal, Screen::Listing) => self.handle_listing_key(key),
            (InputMode::Normal, Screen::Detail) => self.handle_detail_key(key),
            (InputMode::Normal, Screen::Favorites) => self.handle_favorites_key(key),
        };

        if effect == Effect::Quit {
            self.should_quit = true;
        }
        effect
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Effect::Search(self.search_input.clone())
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Effect::Search(self.search_input.clone())
            }
            KeyCode::Enter => {
                // Skip the wait, apply now
                self.apply(FilterAction::SetSearchQuery(self.search_input.clone()));
                self.input_mode = InputMode::Normal;
                Effect::CancelSearch
            }
            KeyCode::Esc | KeyCode::Down => {
                self.input_mode = InputMode::Normal;
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Char('q') => Effect::Quit,
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Searching;
                Effect::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.next_result();
                Effect::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous_result();
                Effect::None
            }
            KeyCode::Enter => match self.selected_product().map(|p| p.id) {
                Some(id) => self.open_detail(id, Screen::Listing),
                None => Effect::None,
            },
            KeyCode::Char('c') => {
                self.cycle_category();
                Effect::None
            }
            KeyCode::Char('s') => {
                let next = self.store.filters().sort_by().next();
                self.apply(FilterAction::SetSortBy(next));
                Effect::None
            }
            KeyCode::Char('x') => self.reset_filters(),
            KeyCode::Char('f') => {
                if let Some(product) = self.selected_product().cloned() {
                    self.apply(FavoritesAction::Toggle(product));
                }
                Effect::None
            }
            KeyCode::Char('F') | KeyCode::Tab => {
                self.screen = Screen::Favorites;
                self.clamp_selection();
                Effect::None
            }
            KeyCode::Char('r') => {
                let catalog = self.store.catalog();
                if catalog.products_error().is_some() && !catalog.is_loading_products() {
                    Effect::ReloadProducts
                } else {
                    Effect::None
                }
            }
            _ => Effect::None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Char('q') => Effect::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.close_detail();
                Effect::None
            }
            KeyCode::Char('f') => {
                if let Some(product) = self.store.catalog().selected_product().cloned() {
                    self.apply(FavoritesAction::Toggle(product));
                }
                Effect::None
            }
            KeyCode::Char('r') => match self.detail_id {
                Some(id) if self.store.catalog().product_error().is_some() => {
                    Effect::FetchProduct(id)
                }
                _ => Effect::None,
            },
            _ => Effect::None,
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Char('q') => Effect::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.store.favorites_count();
                if len > 0 {
                    self.favorites_index = (self.favorites_index + 1).min(len - 1);
                    self.favorites_state.select(Some(self.favorites_index));
                }
                Effect::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.favorites_index = self.favorites_index.saturating_sub(1);
                self.clamp_selection();
                Effect::None
            }
            KeyCode::Enter => match self.selected_favorite().map(|p| p.id) {
                Some(id) => self.open_detail(id, Screen::Favorites),
                None => Effect::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_favorite().map(|p| p.id) {
                    self.apply(FavoritesAction::Remove(id));
                }
                Effect::None
            }
            KeyCode::Char('C') => {
                self.apply(FavoritesAction::Clear);
                Effect::None
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('F') | KeyCode::Tab => {
                self.screen = Screen::Listing;
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn open_detail(&mut self, id: ProductId, from: Screen) -> Effect {
        self.detail_id = Some(id);
        self.detail_return = from;
        self.screen = Screen::Detail;
        Effect::FetchProduct(id)
    }

    fn close_detail(&mut self) {
        // Also forgets the in-flight request so a late answer is ignored
        self.apply(CatalogAction::ClearSelectedProduct);
        self.detail_id = None;
        self.screen = self.detail_return;
    }

    fn cycle_category(&mut self) {
        let options = self.category_options();
        let current = self.store.filters().selected_category();
        let next = match options.iter().position(|c| c == current) {
            Some(pos) => options[(pos + 1) % options.len()].clone(),
            None => String::new(),
        };
        self.apply(FilterAction::SetSelectedCategory(next));
    }

    fn reset_filters(&mut self) -> Effect {
        if !self.store.filters().is_active() && self.search_input.is_empty() {
            return Effect::None;
        }
        self.search_input.clear();
        self.apply(FilterAction::Reset);
        Effect::CancelSearch
    }

    pub fn next_result(&mut self) {
        let len = self.store.visible_products().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn clamp_selection(&mut self) {
        let visible = self.store.visible_products().len();
        if visible == 0 {
            self.selected_index = 0;
            self.list_state.select(None);
        } else {
            self.selected_index = self.selected_index.min(visible - 1);
            self.list_state.select(Some(self.selected_index));
        }

        let favorites = self.store.favorites_count();
        if favorites == 0 {
            self.favorites_index = 0;
            self.favorites_state.select(None);
        } else {
            self.favorites_index = self.favorites_index.min(favorites - 1);
            self.favorites_state.select(Some(self.favorites_index));
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
