//! Application state and event routing
//!
//! Two-layer navigation: screen level cycles the tab bar, within-screen
//! hands events to the active screen. The header owns its menus and
//! modals and is consulted first; an open dialog or search capture on a
//! screen keeps navigation keys away from the tab bar.

use crate::components::header::{HeaderResponse, HeaderState};
use crate::components::navigation::number_key_to_screen;
use crate::data::store::DataStore;
use crate::error::Error;
use crate::events::Event;
use crate::screens::{
    DashboardState, EventsScreenState, GamesScreenState, PackagesScreenState, PromosScreenState,
    ScreenResponse, SettingsScreenState, ShopScreenState, UsersScreenState,
};

/// Top-level screens in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Events,
    Games,
    Promos,
    Shop,
    Users,
    Packages,
    Settings,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Events,
            Screen::Games,
            Screen::Promos,
            Screen::Shop,
            Screen::Users,
            Screen::Packages,
            Screen::Settings,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Events => "Event Management",
            Screen::Games => "Game Management",
            Screen::Promos => "Promo Codes",
            Screen::Shop => "Shop",
            Screen::Users => "Users",
            Screen::Packages => "Aura Packages",
            Screen::Settings => "Video Call Settings",
        }
    }

    pub fn next(&self) -> Screen {
        let all = Self::all();
        let index = all.iter().position(|s| s == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    pub fn previous(&self) -> Screen {
        let all = Self::all();
        let index = all.iter().position(|s| s == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }
}

/// Which layer owns navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Tab bar focus; Tab and number keys switch screens
    ScreenLevel,
    /// Screen content focus; keys go to the active screen
    WithinScreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// One status-bar message.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            text: "Welcome to Aura Admin".to_string(),
            level: StatusLevel::Info,
        }
    }
}

pub struct AppState {
    pub current_screen: Screen,
    pub navigation_mode: NavigationMode,
    pub status: StatusMessage,
    pub should_quit: bool,
    pub header: HeaderState,
    pub dashboard: DashboardState,
    pub events_screen: EventsScreenState,
    pub games_screen: GamesScreenState,
    pub promos_screen: PromosScreenState,
    pub shop_screen: ShopScreenState,
    pub users_screen: UsersScreenState,
    pub packages_screen: PackagesScreenState,
    pub settings_screen: SettingsScreenState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Dashboard,
            navigation_mode: NavigationMode::ScreenLevel,
            status: StatusMessage::default(),
            should_quit: false,
            header: HeaderState::default(),
            dashboard: DashboardState::default(),
            events_screen: EventsScreenState::default(),
            games_screen: GamesScreenState::default(),
            promos_screen: PromosScreenState::default(),
            shop_screen: ShopScreenState::default(),
            users_screen: UsersScreenState::default(),
            packages_screen: PackagesScreenState::default(),
            settings_screen: SettingsScreenState::default(),
        }
    }
}

pub struct App {
    pub state: AppState,
    pub store: DataStore,
}

impl App {
    pub fn new() -> Self {
        let store = DataStore::seeded();
        let mut state = AppState::default();
        state.settings_screen.load(&store);
        Self { state, store }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.state.status = StatusMessage {
            text: text.into(),
            level,
        };
    }

    /// Whether the active screen is holding input away from navigation
    /// (an open dialog, or the user search capture).
    pub fn screen_captures_input(&self) -> bool {
        match self.state.current_screen {
            Screen::Events => self.state.events_screen.modal_open(),
            Screen::Games => self.state.games_screen.modal_open(),
            Screen::Promos => self.state.promos_screen.modal_open(),
            Screen::Shop => self.state.shop_screen.modal_open(),
            Screen::Users => {
                self.state.users_screen.modal_open() || self.state.users_screen.capturing()
            }
            Screen::Packages => self.state.packages_screen.modal_open(),
            Screen::Dashboard | Screen::Settings => false,
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.state.current_screen = screen;
        self.set_status(screen.title(), StatusLevel::Info);
    }

    fn dispatch_to_screen(&mut self, event: &Event) -> ScreenResponse {
        let store = &mut self.store;
        match self.state.current_screen {
            Screen::Dashboard => self.state.dashboard.handle_event(event, store),
            Screen::Events => self.state.events_screen.handle_event(event, store),
            Screen::Games => self.state.games_screen.handle_event(event, store),
            Screen::Promos => self.state.promos_screen.handle_event(event, store),
            Screen::Shop => self.state.shop_screen.handle_event(event, store),
            Screen::Users => self.state.users_screen.handle_event(event, store),
            Screen::Packages => self.state.packages_screen.handle_event(event, store),
            Screen::Settings => self.state.settings_screen.handle_event(event, store),
        }
    }

    fn apply_screen_response(&mut self, response: ScreenResponse) -> bool {
        match response {
            ScreenResponse::NotHandled => false,
            ScreenResponse::Handled => true,
            ScreenResponse::Status(level, text) => {
                self.set_status(text, level);
                true
            }
        }
    }

    fn apply_header_response(&mut self, response: HeaderResponse) -> bool {
        match response {
            HeaderResponse::NotHandled => false,
            HeaderResponse::Handled => true,
            HeaderResponse::OpenSettings => {
                self.switch_screen(Screen::Settings);
                self.state.navigation_mode = NavigationMode::WithinScreen;
                true
            }
            HeaderResponse::LoggedOut => {
                self.set_status("Logged out", StatusLevel::Info);
                self.state.should_quit = true;
                true
            }
        }
    }

    /// Route one event. Returns true when the application should exit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool, Error> {
        if event == Event::Quit {
            self.state.should_quit = true;
            return Ok(true);
        }

        // Header menus and modals take priority over everything below
        let header_response = self.state.header.handle_event(&event, &mut self.store);
        if self.apply_header_response(header_response) {
            return Ok(self.state.should_quit);
        }
        // Keys an open header menu did not recognize stop here rather
        // than reaching the tab bar underneath it
        if self.state.header.has_capture() {
            return Ok(false);
        }

        // An open dialog or search capture owns the keyboard
        if self.screen_captures_input() {
            let response = self.dispatch_to_screen(&event);
            self.apply_screen_response(response);
            return Ok(false);
        }

        match self.state.navigation_mode {
            NavigationMode::ScreenLevel => self.handle_screen_level(event),
            NavigationMode::WithinScreen => self.handle_within_screen(event),
        }
        Ok(self.state.should_quit)
    }

    fn handle_screen_level(&mut self, event: Event) {
        match event {
            Event::Tab | Event::Right => {
                self.switch_screen(self.state.current_screen.next());
            }
            Event::BackTab | Event::Left => {
                self.switch_screen(self.state.current_screen.previous());
            }
            Event::Char(c) if number_key_to_screen(c).is_some() => {
                if let Some(screen) = number_key_to_screen(c) {
                    self.switch_screen(screen);
                }
            }
            Event::Enter | Event::Down => {
                self.state.navigation_mode = NavigationMode::WithinScreen;
            }
            Event::Char('q') => {
                self.state.should_quit = true;
            }
            Event::Click { .. } => {
                // Clicks reach the screen even from tab mode and shift
                // focus into it when they land
                let response = self.dispatch_to_screen(&event);
                if self.apply_screen_response(response) {
                    self.state.navigation_mode = NavigationMode::WithinScreen;
                }
            }
            _ => {}
        }
    }

    fn handle_within_screen(&mut self, event: Event) {
        // The screen gets first refusal; Settings uses this to discard
        // edits on Escape before the mode flips back
        let response = self.dispatch_to_screen(&event);
        if self.apply_screen_response(response) {
            return;
        }
        match event {
            Event::Escape => {
                self.state.navigation_mode = NavigationMode::ScreenLevel;
            }
            Event::Tab => {
                self.switch_screen(self.state.current_screen.next());
            }
            Event::BackTab => {
                self.switch_screen(self.state.current_screen.previous());
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
