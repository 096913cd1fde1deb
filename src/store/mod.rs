//! Domain store - the in-memory source of truth for one client session.
//!
//! The store holds the four entity collections, the signed-in identity, the
//! current wedding and the active tab. Mutators are synchronous and never fail;
//! they never talk to the backend either (see [`crate::planner`] for that).
//! The identity/navigation subset is written to a [`StateStorage`] on every
//! change when one is attached.

/// Id-keyed record lists
pub mod collection;
/// Partial updates and the `Record` trait
pub mod patch;
/// Local persistence of the identity subset
pub mod persist;
/// Derived totals and counts
pub mod stats;
/// Filtering, searching and sorting for the pages
pub mod views;

pub use collection::{AddOutcome, Collection};
pub use patch::{BudgetCategoryPatch, CalendarEventPatch, GuestPatch, Record, TodoPatch};
pub use persist::{FileStateStorage, MemoryStateStorage, PersistedState, StateStorage};
pub use stats::{BudgetHealth, CategorySummary, DashboardStats};

use crate::entities::{
    BudgetCategoryModel, CalendarEventModel, GuestModel, TodoModel, WeddingModel,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Identity handed over by the authentication service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user id
    pub id: String,
    /// Sign-in email
    pub email: String,
    /// Display name, if the provider gave one
    pub name: Option<String>,
}

/// Top-level page the user is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    /// Summary cards
    #[default]
    Dashboard,
    /// Budget categories
    Budget,
    /// Task list
    Todos,
    /// Guest list
    Guests,
    /// Calendar
    Calendar,
}

/// In-memory state container for one session.
#[derive(Debug, Default)]
pub struct AppStore {
    current_user: Option<CurrentUser>,
    current_wedding: Option<WeddingModel>,
    is_loading: bool,
    budget_categories: Collection<BudgetCategoryModel>,
    todos: Collection<TodoModel>,
    guests: Collection<GuestModel>,
    calendar_events: Collection<CalendarEventModel>,
    active_tab: ActiveTab,
    storage: Option<Box<dyn StateStorage>>,
}

impl AppStore {
    /// Empty store without local persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that writes its persisted subset to `storage`. Nothing is
    /// read from `storage`; use [`AppStore::restore`] for that.
    #[must_use]
    pub fn with_storage(storage: Box<dyn StateStorage>) -> Self {
        Self {
            storage: Some(storage),
            ..Self::default()
        }
    }

    /// Store pre-populated from whatever `storage` holds. Unreadable state is
    /// logged and ignored.
    #[must_use]
    pub fn restore(storage: Box<dyn StateStorage>) -> Self {
        let restored = match storage.load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring unreadable persisted state: {}", e);
                None
            }
        };

        let mut store = Self::with_storage(storage);
        if let Some(state) = restored {
            info!(
                "Restored persisted state (tab: {:?}, wedding: {:?})",
                state.active_tab,
                state.current_wedding.as_ref().map(|w| w.id.as_str())
            );
            store.current_user = state.user;
            store.current_wedding = state.current_wedding;
            store.active_tab = state.active_tab;
        }
        store
    }

    /// Snapshot of the subset that survives a restart.
    #[must_use]
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            user: self.current_user.clone(),
            current_wedding: self.current_wedding.clone(),
            active_tab: self.active_tab,
        }
    }

    fn persist(&mut self) {
        let state = self.persisted_state();
        if let Some(storage) = self.storage.as_mut() {
            if let Err(e) = storage.save(&state) {
                warn!("Failed to persist local state: {}", e);
            }
        }
    }

    // --- Identity and navigation ---

    /// The signed-in user, if any
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// The wedding being planned, if any
    #[must_use]
    pub const fn current_wedding(&self) -> Option<&WeddingModel> {
        self.current_wedding.as_ref()
    }

    /// Page currently shown
    #[must_use]
    pub const fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    /// Whether a backend hydration is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replace the signed-in user. Persisted.
    pub fn set_user(&mut self, user: Option<CurrentUser>) {
        debug!("Current user set to {:?}", user.as_ref().map(|u| &u.id));
        self.current_user = user;
        self.persist();
    }

    /// Replace the current wedding. Persisted.
    pub fn set_current_wedding(&mut self, wedding: Option<WeddingModel>) {
        debug!("Current wedding set to {:?}", wedding.as_ref().map(|w| &w.id));
        self.current_wedding = wedding;
        self.persist();
    }

    /// Switch page. Persisted.
    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
        self.persist();
    }

    /// Mark a backend load as in flight or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Back to the initial state (signed out, empty collections, dashboard).
    /// The attached storage is kept and receives the cleared subset.
    pub fn clear(&mut self) {
        let storage = self.storage.take();
        *self = Self {
            storage,
            ..Self::default()
        };
        self.persist();
    }

    // --- Collection snapshots ---

    /// Budget categories in insertion order
    #[must_use]
    pub fn budget_categories(&self) -> &[BudgetCategoryModel] {
        self.budget_categories.as_slice()
    }

    /// Tasks in insertion order
    #[must_use]
    pub fn todos(&self) -> &[TodoModel] {
        self.todos.as_slice()
    }

    /// Guests in insertion order
    #[must_use]
    pub fn guests(&self) -> &[GuestModel] {
        self.guests.as_slice()
    }

    /// Calendar events in insertion order
    #[must_use]
    pub fn calendar_events(&self) -> &[CalendarEventModel] {
        self.calendar_events.as_slice()
    }

    /// Look up a category by id.
    #[must_use]
    pub fn budget_category(&self, id: &str) -> Option<&BudgetCategoryModel> {
        self.budget_categories.get(id)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn todo(&self, id: &str) -> Option<&TodoModel> {
        self.todos.get(id)
    }

    /// Look up a guest by id.
    #[must_use]
    pub fn guest(&self, id: &str) -> Option<&GuestModel> {
        self.guests.get(id)
    }

    /// Look up an event by id.
    #[must_use]
    pub fn calendar_event(&self, id: &str) -> Option<&CalendarEventModel> {
        self.calendar_events.get(id)
    }

    // --- Hydration ---

    /// Replace every category.
    pub fn set_budget_categories(&mut self, categories: Vec<BudgetCategoryModel>) {
        self.budget_categories = Collection::from_records(categories);
    }

    /// Replace every task.
    pub fn set_todos(&mut self, todos: Vec<TodoModel>) {
        self.todos = Collection::from_records(todos);
    }

    /// Replace every guest.
    pub fn set_guests(&mut self, guests: Vec<GuestModel>) {
        self.guests = Collection::from_records(guests);
    }

    /// Replace every event.
    pub fn set_calendar_events(&mut self, events: Vec<CalendarEventModel>) {
        self.calendar_events = Collection::from_records(events);
    }

    // --- Budget categories ---

    /// Insert a category, replacing one with the same id.
    pub fn add_budget_category(&mut self, category: BudgetCategoryModel) -> AddOutcome {
        self.budget_categories.add(category)
    }

    /// Patch a category. Returns false when the id is unknown.
    pub fn update_budget_category(&mut self, id: &str, patch: BudgetCategoryPatch) -> bool {
        self.budget_categories.update(id, patch)
    }

    /// Remove a category, returning it if it was held.
    pub fn delete_budget_category(&mut self, id: &str) -> Option<BudgetCategoryModel> {
        self.budget_categories.remove(id)
    }

    // --- Todos ---

    /// Insert a task, replacing one with the same id.
    pub fn add_todo(&mut self, todo: TodoModel) -> AddOutcome {
        self.todos.add(todo)
    }

    /// Patch a task. Returns false when the id is unknown.
    pub fn update_todo(&mut self, id: &str, patch: TodoPatch) -> bool {
        self.todos.update(id, patch)
    }

    /// Remove a task, returning it if it was held.
    pub fn delete_todo(&mut self, id: &str) -> Option<TodoModel> {
        self.todos.remove(id)
    }

    /// Flips the completion flag and returns the new value, or `None` when
    /// there is no such todo.
    pub fn toggle_todo(&mut self, id: &str) -> Option<bool> {
        let completed = !self.todos.get(id)?.completed;
        self.todos.update(id, TodoPatch::completed(completed));
        Some(completed)
    }

    // --- Guests ---

    /// Insert a guest, replacing one with the same id.
    pub fn add_guest(&mut self, guest: GuestModel) -> AddOutcome {
        self.guests.add(guest)
    }

    /// Patch a guest. Returns false when the id is unknown.
    pub fn update_guest(&mut self, id: &str, patch: GuestPatch) -> bool {
        self.guests.update(id, patch)
    }

    /// Remove a guest, returning it if it was held.
    pub fn delete_guest(&mut self, id: &str) -> Option<GuestModel> {
        self.guests.remove(id)
    }

    // --- Calendar events ---

    /// Insert an event, replacing one with the same id.
    pub fn add_calendar_event(&mut self, event: CalendarEventModel) -> AddOutcome {
        self.calendar_events.add(event)
    }

    /// Patch an event. Returns false when the id is unknown.
    pub fn update_calendar_event(&mut self, id: &str, patch: CalendarEventPatch) -> bool {
        self.calendar_events.update(id, patch)
    }

    /// Remove an event, returning it if it was held.
    pub fn delete_calendar_event(&mut self, id: &str) -> Option<CalendarEventModel> {
        self.calendar_events.remove(id)
    }
}
