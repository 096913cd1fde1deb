//! Planner - sequences backend calls and store mutations.
//!
//! Every mutation goes to the backend first. The store only changes once the
//! backend has confirmed, and then receives exactly the row the backend
//! returned, so ids and timestamps are always the backend's. A failed call
//! leaves the store untouched.

use crate::{
    core::{
        budget::{self, NewBudgetCategory},
        calendar::{self, NewCalendarEvent},
        guest::{self, NewGuest},
        todo::{self, NewTodo},
        wedding::{self, NewWedding},
    },
    entities::{
        BudgetCategoryModel, CalendarEventModel, GuestModel, RsvpStatus, TodoModel, WeddingModel,
    },
    errors::{Error, Result},
    store::{
        ActiveTab, AppStore, BudgetCategoryPatch, CalendarEventPatch, CurrentUser, GuestPatch,
        Record, TodoPatch,
    },
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument, warn};

/// The four collections of one wedding, as returned by the backend.
#[derive(Debug)]
struct Loaded {
    budget_categories: Vec<BudgetCategoryModel>,
    todos: Vec<TodoModel>,
    guests: Vec<GuestModel>,
    calendar_events: Vec<CalendarEventModel>,
}

/// Owns the backend connection and the session's store.
#[derive(Debug)]
pub struct Planner {
    db: DatabaseConnection,
    store: AppStore,
}

impl Planner {
    /// Wrap a backend connection and a (possibly restored) store.
    #[must_use]
    pub const fn new(db: DatabaseConnection, store: AppStore) -> Self {
        Self { db, store }
    }

    /// Read access to the store for rendering.
    #[must_use]
    pub const fn store(&self) -> &AppStore {
        &self.store
    }

    /// The backend connection
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn wedding_id(&self) -> Result<String> {
        self.store
            .current_wedding()
            .map(|w| w.id.clone())
            .ok_or(Error::NoActiveWedding)
    }

    fn user_id(&self) -> Result<String> {
        self.store
            .current_user()
            .map(|u| u.id.clone())
            .ok_or_else(|| Error::validation("user_id", "no user is signed in"))
    }

    // --- Session ---

    /// Records the signed-in identity and opens the user's default wedding.
    ///
    /// Returns the opened wedding, or `None` when the user has none yet; the
    /// collections are then left empty. The active tab survives when the same
    /// user signs in again. Nothing changes if the backend fails.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn sign_in(&mut self, user: CurrentUser) -> Result<Option<WeddingModel>> {
        let opened = match wedding::get_default_wedding(&self.db, &user.id).await? {
            Some(wedding) => {
                let loaded = self.load(&wedding.id).await?;
                Some((wedding, loaded))
            }
            None => None,
        };

        let same_user = self.store.current_user().is_some_and(|u| u.id == user.id);
        let tab = self.store.active_tab();
        self.store.clear();
        self.store.set_user(Some(user));
        if same_user {
            self.store.set_active_tab(tab);
        }

        match opened {
            Some((wedding, loaded)) => {
                self.open(wedding.clone(), loaded);
                Ok(Some(wedding))
            }
            None => {
                info!("User has no wedding yet");
                Ok(None)
            }
        }
    }

    /// Picks up a session restored from local state: reloads the remembered
    /// wedding from the backend and hydrates. A wedding that no longer exists,
    /// or that belongs to someone other than the restored user, is forgotten.
    pub async fn resume(&mut self) -> Result<Option<WeddingModel>> {
        let Some(remembered) = self.store.current_wedding().map(|w| w.id.clone()) else {
            return Ok(None);
        };

        let Some(wedding) = wedding::get_wedding_by_id(&self.db, &remembered).await? else {
            warn!("Remembered wedding {remembered} no longer exists");
            self.store.set_current_wedding(None);
            return Ok(None);
        };

        let owner_matches = self
            .store
            .current_user()
            .is_some_and(|user| user.id == wedding.user_id);
        if !owner_matches {
            warn!("Remembered wedding {remembered} does not belong to the restored user");
            self.store.set_current_wedding(None);
            return Ok(None);
        }

        self.select_wedding(wedding.clone()).await?;
        Ok(Some(wedding))
    }

    /// Forgets identity, wedding and all collections.
    pub fn sign_out(&mut self) {
        info!("Signing out");
        self.store.clear();
    }

    /// Weddings of the signed-in user, newest first.
    pub async fn weddings(&self) -> Result<Vec<WeddingModel>> {
        let user_id = self.user_id()?;
        wedding::get_user_weddings(&self.db, &user_id).await
    }

    /// Creates a wedding for the signed-in user and opens it.
    pub async fn create_wedding(&mut self, new: NewWedding) -> Result<WeddingModel> {
        let user_id = self.user_id()?;
        let wedding = wedding::create_wedding(&self.db, NewWedding { user_id, ..new }).await?;
        self.select_wedding(wedding.clone()).await?;
        Ok(wedding)
    }

    /// Makes `wedding` current and loads its collections.
    ///
    /// The current wedding and collections switch together once every list
    /// has loaded; on failure the store keeps the previous wedding and rows.
    pub async fn select_wedding(&mut self, wedding: WeddingModel) -> Result<()> {
        info!("Opening wedding {} ({})", wedding.title, wedding.id);
        let loaded = self.load(&wedding.id).await?;
        self.open(wedding, loaded);
        Ok(())
    }

    /// Replaces all four collections with the backend's rows for the current
    /// wedding. On failure the store keeps its previous rows.
    #[instrument(skip(self))]
    pub async fn hydrate(&mut self) -> Result<()> {
        let wedding_id = self.wedding_id()?;
        let loaded = self.load(&wedding_id).await?;
        self.fill(loaded);
        Ok(())
    }

    /// Fetches all four collections of `wedding_id` without touching the
    /// collections. The store is flagged as loading while the queries run.
    async fn load(&mut self, wedding_id: &str) -> Result<Loaded> {
        self.store.set_loading(true);
        let loaded = tokio::try_join!(
            budget::list_budget_categories(&self.db, wedding_id),
            todo::list_todos(&self.db, wedding_id),
            guest::list_guests(&self.db, wedding_id),
            calendar::list_calendar_events(&self.db, wedding_id),
        );
        self.store.set_loading(false);

        let (budget_categories, todos, guests, calendar_events) = loaded?;
        Ok(Loaded {
            budget_categories,
            todos,
            guests,
            calendar_events,
        })
    }

    fn open(&mut self, wedding: WeddingModel, loaded: Loaded) {
        self.store.set_current_wedding(Some(wedding));
        self.fill(loaded);
    }

    fn fill(&mut self, loaded: Loaded) {
        debug!(
            "Hydrated {} categories, {} todos, {} guests, {} events",
            loaded.budget_categories.len(),
            loaded.todos.len(),
            loaded.guests.len(),
            loaded.calendar_events.len()
        );
        self.store.set_budget_categories(loaded.budget_categories);
        self.store.set_todos(loaded.todos);
        self.store.set_guests(loaded.guests);
        self.store.set_calendar_events(loaded.calendar_events);
    }

    /// Records the page the user is looking at.
    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.store.set_active_tab(tab);
    }

    // --- Budget categories ---

    /// Creates a category in the current wedding.
    pub async fn add_budget_category(
        &mut self,
        new: NewBudgetCategory,
    ) -> Result<BudgetCategoryModel> {
        let wedding_id = self.wedding_id()?;
        let category =
            budget::create_budget_category(&self.db, NewBudgetCategory { wedding_id, ..new })
                .await?;
        self.store.add_budget_category(category.clone());
        Ok(category)
    }

    /// Update a category in the backend, then mirror the stored row.
    pub async fn update_budget_category(
        &mut self,
        id: &str,
        patch: BudgetCategoryPatch,
    ) -> Result<BudgetCategoryModel> {
        let category = budget::update_budget_category(&self.db, id, patch).await?;
        if !self.store.update_budget_category(id, category.clone().into()) {
            not_in_store::<BudgetCategoryModel>(id);
        }
        Ok(category)
    }

    /// Deletes a category; `Ok(false)` when the backend had no such row.
    pub async fn delete_budget_category(&mut self, id: &str) -> Result<bool> {
        let deleted = budget::delete_budget_category(&self.db, id).await?;
        self.store.delete_budget_category(id);
        Ok(deleted)
    }

    // --- Todos ---

    /// Creates a task in the current wedding.
    pub async fn add_todo(&mut self, new: NewTodo) -> Result<TodoModel> {
        let wedding_id = self.wedding_id()?;
        let todo = todo::create_todo(&self.db, NewTodo { wedding_id, ..new }).await?;
        self.store.add_todo(todo.clone());
        Ok(todo)
    }

    /// Update a task in the backend, then mirror the stored row.
    pub async fn update_todo(&mut self, id: &str, patch: TodoPatch) -> Result<TodoModel> {
        let todo = todo::update_todo(&self.db, id, patch).await?;
        if !self.store.update_todo(id, todo.clone().into()) {
            not_in_store::<TodoModel>(id);
        }
        Ok(todo)
    }

    /// Flips a task's completion flag, starting from the backend's value.
    pub async fn toggle_todo(&mut self, id: &str) -> Result<TodoModel> {
        let current = todo::get_todo_by_id(&self.db, id)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: TodoModel::KIND,
                id: id.to_string(),
            })?;
        self.update_todo(id, TodoPatch::completed(!current.completed))
            .await
    }

    /// Delete a task in the backend, then drop it from the store.
    pub async fn delete_todo(&mut self, id: &str) -> Result<bool> {
        let deleted = todo::delete_todo(&self.db, id).await?;
        self.store.delete_todo(id);
        Ok(deleted)
    }

    // --- Guests ---

    /// Adds a guest to the current wedding.
    pub async fn add_guest(&mut self, new: NewGuest) -> Result<GuestModel> {
        let wedding_id = self.wedding_id()?;
        let guest = guest::create_guest(&self.db, NewGuest { wedding_id, ..new }).await?;
        self.store.add_guest(guest.clone());
        Ok(guest)
    }

    /// Update a guest in the backend, then mirror the stored row.
    pub async fn update_guest(&mut self, id: &str, patch: GuestPatch) -> Result<GuestModel> {
        let guest = guest::update_guest(&self.db, id, patch).await?;
        if !self.store.update_guest(id, guest.clone().into()) {
            not_in_store::<GuestModel>(id);
        }
        Ok(guest)
    }

    /// Records a guest's answer. Any status may follow any other.
    pub async fn set_rsvp(&mut self, id: &str, status: RsvpStatus) -> Result<GuestModel> {
        self.update_guest(id, GuestPatch::rsvp(status)).await
    }

    /// Delete a guest in the backend, then drop it from the store.
    pub async fn delete_guest(&mut self, id: &str) -> Result<bool> {
        let deleted = guest::delete_guest(&self.db, id).await?;
        self.store.delete_guest(id);
        Ok(deleted)
    }

    // --- Calendar events ---

    /// Creates an event in the current wedding.
    pub async fn add_calendar_event(&mut self, new: NewCalendarEvent) -> Result<CalendarEventModel> {
        let wedding_id = self.wedding_id()?;
        let event =
            calendar::create_calendar_event(&self.db, NewCalendarEvent { wedding_id, ..new })
                .await?;
        self.store.add_calendar_event(event.clone());
        Ok(event)
    }

    /// Update an event in the backend, then mirror the stored row.
    pub async fn update_calendar_event(
        &mut self,
        id: &str,
        patch: CalendarEventPatch,
    ) -> Result<CalendarEventModel> {
        let event = calendar::update_calendar_event(&self.db, id, patch).await?;
        if !self.store.update_calendar_event(id, event.clone().into()) {
            not_in_store::<CalendarEventModel>(id);
        }
        Ok(event)
    }

    /// Delete an event in the backend, then drop it from the store.
    pub async fn delete_calendar_event(&mut self, id: &str) -> Result<bool> {
        let deleted = calendar::delete_calendar_event(&self.db, id).await?;
        self.store.delete_calendar_event(id);
        Ok(deleted)
    }
}

fn not_in_store<T: Record>(id: &str) {
    warn!("{} {} updated in the backend but not loaded in the store", T::KIND, id);
}
