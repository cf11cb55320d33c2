//! Dashboard application state and key handling
//!
//! Every store action awaits the sync layer to completion on the UI task;
//! the screen only ever renders server-confirmed snapshots.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use farmstand_client::{ClientError, NetworkHttpClient, StoreSync, view};
use ratatui::widgets::TableState;
use shared::models::{Customer, InventoryItem};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::TuiWidgetState;

/// Which screen is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    /// Initial load failed; the store is unreachable
    Unreachable,
}

/// Focused input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Username,
    Password,
    ItemName,
    ItemQty,
    ItemSearch,
    CustomerName,
    CustomerNote,
    CustomerSearch,
}

const DASHBOARD_FOCUS_ORDER: [Focus; 6] = [
    Focus::ItemName,
    Focus::ItemQty,
    Focus::ItemSearch,
    Focus::CustomerName,
    Focus::CustomerNote,
    Focus::CustomerSearch,
];

pub struct App {
    pub sync: StoreSync<NetworkHttpClient>,
    pub base_url: String,
    pub screen: Screen,
    pub focus: Focus,
    pub should_quit: bool,
    pub show_logs: bool,

    // Login form
    pub username: Input,
    pub password: Input,
    pub login_error: Option<String>,

    // Inventory panel
    pub item_name: Input,
    pub item_qty: Input,
    pub item_search: Input,
    pub item_form_error: Option<String>,
    pub inventory_state: TableState,

    // Queue panel
    pub customer_name: Input,
    pub customer_note: Input,
    pub customer_search: Input,
    pub queue_form_error: Option<String>,

    /// Section-level message for failed store requests
    pub banner: Option<String>,
    /// Why the store could not be reached, on the unreachable screen
    pub unreachable_error: Option<String>,
    pub logger_state: TuiWidgetState,
}

impl App {
    pub fn new(sync: StoreSync<NetworkHttpClient>, base_url: String) -> Self {
        Self {
            sync,
            base_url,
            screen: Screen::Login,
            focus: Focus::Username,
            should_quit: false,
            show_logs: false,
            username: Input::default(),
            password: Input::default(),
            login_error: None,
            item_name: Input::default(),
            item_qty: Input::default(),
            item_search: Input::default(),
            item_form_error: None,
            inventory_state: TableState::default(),
            customer_name: Input::default(),
            customer_note: Input::default(),
            customer_search: Input::default(),
            queue_form_error: None,
            banner: None,
            unreachable_error: None,
            logger_state: TuiWidgetState::new(),
        }
    }

    /// Inventory as displayed: filtered by the search field, sorted by name
    pub fn inventory_view(&self) -> Vec<InventoryItem> {
        view::filter_sort_inventory(self.sync.items(), self.item_search.value())
    }

    /// Queue as displayed: filtered by the search field, arrival order kept
    pub fn queue_view(&self) -> Vec<Customer> {
        view::filter_queue(self.sync.queue(), self.customer_search.value())
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Login => self.handle_login_key(key).await,
            Screen::Dashboard => self.handle_dashboard_key(key).await,
            Screen::Unreachable => self.handle_unreachable_key(key).await,
        }
    }

    // ========== Login screen ==========

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Username => Focus::Password,
                    _ => Focus::Username,
                };
            }
            KeyCode::Enter => match self.focus {
                Focus::Username => self.focus = Focus::Password,
                _ => self.attempt_login().await,
            },
            _ => {
                self.focused_input_mut().handle_event(&Event::Key(key));
            }
        }
    }

    async fn attempt_login(&mut self) {
        self.login_error = None;
        let username = self.username.value().to_string();
        let password = self.password.value().to_string();

        match self.sync.login(&username, &password).await {
            Ok(_) => {
                self.password.reset();
                self.enter_dashboard().await;
            }
            Err(e) => {
                tracing::warn!("login failed: {}", e);
                self.login_error = Some(e.to_string());
            }
        }
    }

    /// Initial load after login; either fetch failing lands on the
    /// unreachable screen instead of an empty-looking dashboard.
    async fn enter_dashboard(&mut self) {
        match self.sync.load().await {
            Ok(()) => {
                self.screen = Screen::Dashboard;
                self.focus = Focus::ItemName;
                self.banner = None;
            }
            Err(e) => {
                self.unreachable_error = Some(e.to_string());
                self.screen = Screen::Unreachable;
            }
        }
    }

    // ========== Unreachable screen ==========

    async fn handle_unreachable_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.enter_dashboard().await,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    // ========== Dashboard ==========

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('s') => self.submit_set_quantity().await,
                KeyCode::Char('x') => self.delete_selected_item().await,
                KeyCode::Char('n') => self.serve_next().await,
                KeyCode::Char('l') => self.clear_queue().await,
                KeyCode::Char('r') => self.refresh().await,
                KeyCode::Char('g') => self.show_logs = !self.show_logs,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.logout().await,
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => match self.focus {
                Focus::ItemName | Focus::ItemQty => self.submit_add_or_increment().await,
                Focus::CustomerName | Focus::CustomerNote => self.submit_enqueue().await,
                _ => {}
            },
            _ => {
                self.focused_input_mut().handle_event(&Event::Key(key));
            }
        }
    }

    fn cycle_focus(&mut self, step: isize) {
        let pos = DASHBOARD_FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0) as isize;
        let len = DASHBOARD_FOCUS_ORDER.len() as isize;
        let next = (pos + step).rem_euclid(len) as usize;
        self.focus = DASHBOARD_FOCUS_ORDER[next];
    }

    fn move_selection(&mut self, step: isize) {
        let len = self.inventory_view().len();
        if len == 0 {
            self.inventory_state.select(None);
            return;
        }
        let current = self.inventory_state.selected().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len as isize) as usize;
        self.inventory_state.select(Some(next));
    }

    async fn refresh(&mut self) {
        match self.sync.load().await {
            Ok(()) => self.banner = None,
            Err(e) => self.report_remote(e),
        }
    }

    async fn logout(&mut self) {
        self.sync.logout().await;
        self.item_name.reset();
        self.item_qty.reset();
        self.item_search.reset();
        self.customer_name.reset();
        self.customer_note.reset();
        self.customer_search.reset();
        self.inventory_state.select(None);
        self.banner = None;
        self.item_form_error = None;
        self.queue_form_error = None;
        self.screen = Screen::Login;
        self.focus = Focus::Username;
    }

    // ========== Inventory actions ==========

    async fn submit_add_or_increment(&mut self) {
        self.item_form_error = None;
        // Unparseable quantity falls back to 1, like the increment default
        let amount = self.item_qty.value().trim().parse::<u32>().unwrap_or(1);
        match self
            .sync
            .add_or_increment(&self.item_name.value().to_string(), amount)
            .await
        {
            Ok(()) => {
                self.item_name.reset();
                self.item_qty.reset();
                self.banner = None;
            }
            Err(ClientError::Validation(msg)) => self.item_form_error = Some(msg),
            Err(e) => self.report_remote(e),
        }
    }

    async fn submit_set_quantity(&mut self) {
        self.item_form_error = None;
        let qty = self.item_qty.value().trim().parse::<u32>().unwrap_or(0);
        match self
            .sync
            .set_quantity(&self.item_name.value().to_string(), qty)
            .await
        {
            Ok(()) => {
                self.item_name.reset();
                self.item_qty.reset();
                self.banner = None;
            }
            Err(ClientError::Validation(msg)) => self.item_form_error = Some(msg),
            Err(e) => self.report_remote(e),
        }
    }

    async fn delete_selected_item(&mut self) {
        let view = self.inventory_view();
        let Some(selected) = self.inventory_state.selected() else {
            return;
        };
        let Some(item) = view.get(selected) else {
            return;
        };
        let name = item.name.clone();
        match self.sync.delete_item(&name).await {
            Ok(()) => {
                self.banner = None;
                let remaining = self.inventory_view().len();
                if remaining == 0 {
                    self.inventory_state.select(None);
                } else if selected >= remaining {
                    self.inventory_state.select(Some(remaining - 1));
                }
            }
            Err(ClientError::Validation(msg)) => self.item_form_error = Some(msg),
            Err(e) => self.report_remote(e),
        }
    }

    // ========== Queue actions ==========

    async fn submit_enqueue(&mut self) {
        self.queue_form_error = None;
        let name = self.customer_name.value().to_string();
        let note = self.customer_note.value().to_string();
        match self.sync.enqueue(&name, &note).await {
            Ok(()) => {
                self.customer_name.reset();
                self.customer_note.reset();
                self.banner = None;
            }
            Err(ClientError::Validation(msg)) => self.queue_form_error = Some(msg),
            Err(e) => self.report_remote(e),
        }
    }

    async fn serve_next(&mut self) {
        // Serving is disabled while the confirmed queue is empty
        if self.sync.queue().is_empty() {
            return;
        }
        match self.sync.dequeue().await {
            Ok(served) => {
                if let Some(customer) = served {
                    tracing::info!(name = %customer.name, "served customer");
                }
                self.banner = None;
            }
            Err(e) => self.report_remote(e),
        }
    }

    async fn clear_queue(&mut self) {
        match self.sync.clear_queue().await {
            Ok(()) => self.banner = None,
            Err(e) => self.report_remote(e),
        }
    }

    // ========== Helpers ==========

    fn report_remote(&mut self, err: ClientError) {
        tracing::error!("store request failed: {}", err);
        self.banner = Some(err.to_string());
    }

    fn focused_input_mut(&mut self) -> &mut Input {
        match self.focus {
            Focus::Username => &mut self.username,
            Focus::Password => &mut self.password,
            Focus::ItemName => &mut self.item_name,
            Focus::ItemQty => &mut self.item_qty,
            Focus::ItemSearch => &mut self.item_search,
            Focus::CustomerName => &mut self.customer_name,
            Focus::CustomerNote => &mut self.customer_note,
            Focus::CustomerSearch => &mut self.customer_search,
        }
    }
}
