//! Application controller: navigation lifecycle and render cycle.
//!
//! # Responsibility
//! - Resolve the current location, render the matched view and keep the
//!   navigation bar's active marks in step.
//! - Route user actions to the current view, re-rendering after each one.
//! - Tag reference-page loads with the render generation that issued them.
//!
//! # Invariants
//! - Every render increments `generation`.
//! - A fetch completion is applied only when its ticket carries the current
//!   generation; stale completions are discarded.
//! - Render or mutation failures degrade to a placeholder screen and never
//!   stop later navigation.

use crate::clock::{SharedClock, SystemClock};
use crate::config::ShellConfig;
use crate::db::{open_db, DbResult};
use crate::id::IdGenerator;
use crate::modal::{Modal, ModalController, SaveOutcome};
use crate::nav::NavBar;
use crate::reference::{DirectoryReferenceLoader, ReferenceError, ReferenceLoader};
use crate::repo::kv_repo::SqliteKvRepository;
use crate::router::{normalize_location, resolve, Resolved, ViewId};
use crate::store::{Store, StoreError};
use crate::view::registry::ViewRegistry;
use crate::view::{
    reference, ActionContext, Effect, FormValues, RenderContext, Screen, UiAction, ViewState,
};
use chrono::Datelike;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::Arc;

const FAILURE_MESSAGE: &str = "Something went wrong. Your last change was not saved.";

/// Identifies one in-flight reference load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub name: String,
}

/// Everything a host needs to draw the current state.
#[derive(Debug, Serialize)]
pub struct ShellView<'a> {
    pub location: &'a str,
    pub generation: u64,
    pub screen: &'a Screen,
    pub modal: Option<&'a Modal>,
    pub nav: &'a NavBar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_fetch: Option<&'a FetchTicket>,
    /// Footer copyright year.
    pub year: i32,
}

pub struct AppController {
    store: Store,
    ids: IdGenerator,
    clock: SharedClock,
    registry: ViewRegistry,
    loader: Box<dyn ReferenceLoader + Send>,
    nav: NavBar,
    modal: ModalController,
    state: ViewState,
    listening: bool,
    location: String,
    resolved: Resolved,
    generation: u64,
    screen: Screen,
    pending: Option<FetchTicket>,
}

impl AppController {
    /// Builds a controller with the built-in views and navigation links.
    pub fn new(
        store: Store,
        loader: Box<dyn ReferenceLoader + Send>,
        clock: SharedClock,
    ) -> Self {
        Self::with_registry(store, loader, clock, ViewRegistry::with_builtin_views())
    }

    /// Production wiring: SQLite store, reference directory and system clock.
    ///
    /// # Errors
    /// - Returns a database error when the store file cannot be opened or
    ///   migrated.
    pub fn from_config(config: &ShellConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path)?;
        let clock: SharedClock = Arc::new(SystemClock);
        let store = Store::new(Box::new(SqliteKvRepository::new(conn)), clock.clone());
        let loader = DirectoryReferenceLoader::new(config.reference_dir.clone());
        Ok(Self::new(store, Box::new(loader), clock))
    }

    pub fn with_registry(
        store: Store,
        loader: Box<dyn ReferenceLoader + Send>,
        clock: SharedClock,
        registry: ViewRegistry,
    ) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
            clock,
            registry,
            loader,
            nav: NavBar::default(),
            modal: ModalController::new(),
            state: ViewState::default(),
            listening: false,
            location: "/".to_string(),
            resolved: resolve("/"),
            generation: 0,
            screen: Screen::new(ViewId::Dashboard, ""),
            pending: None,
        }
    }

    /// Starts listening for location changes and renders `initial_location`.
    ///
    /// A second call is a no-op: the listener is wired once.
    pub fn start(&mut self, initial_location: &str) -> &Screen {
        if self.listening {
            warn!("event=app_start module=app status=skipped reason=already_listening");
            return &self.screen;
        }
        self.listening = true;
        info!("event=app_start module=app status=ok");
        self.navigate_to(initial_location);
        &self.screen
    }

    /// Location-change listener: re-resolves and re-renders.
    pub fn on_location_change(&mut self, location: &str) -> &Screen {
        if !self.listening {
            warn!("event=location_change module=app status=ignored reason=not_started");
            return &self.screen;
        }
        self.navigate_to(location);
        &self.screen
    }

    /// Applies one user interaction and returns the effects the host must
    /// perform.
    pub fn dispatch(&mut self, action: UiAction) -> Vec<Effect> {
        match action {
            UiAction::SaveModal { values } => self.save_modal(&values),
            UiAction::CloseModal => {
                self.modal.close();
                Vec::new()
            }
            action => self.run_view_action(action),
        }
    }

    /// The reference load the current screen is waiting on, if any.
    pub fn pending_fetch(&self) -> Option<&FetchTicket> {
        self.pending.as_ref()
    }

    /// Delivers a settled reference load.
    ///
    /// Returns `false` and changes nothing when the ticket is stale, i.e. a
    /// newer render happened after the load was issued.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<String, ReferenceError>,
    ) -> bool {
        if ticket.generation != self.generation || self.pending.as_ref() != Some(ticket) {
            info!(
                "event=fetch_discarded module=app status=stale ticket_generation={} current_generation={}",
                ticket.generation, self.generation
            );
            return false;
        }

        match &result {
            Ok(_) => debug!("event=fetch_complete module=app status=ok name={}", ticket.name),
            Err(err) => warn!(
                "event=fetch_complete module=app status=error name={} error={}",
                ticket.name, err
            ),
        }
        reference::settle(&mut self.screen, result);
        self.pending = None;
        true
    }

    /// Loads the pending reference page with the configured loader.
    ///
    /// Returns whether a completion was applied.
    pub fn settle_pending_fetch(&mut self) -> bool {
        let Some(ticket) = self.pending.clone() else {
            return false;
        };
        let result = self.loader.load(&ticket.name);
        self.complete_fetch(&ticket, result)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.current()
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn current_view(&self) -> ViewId {
        self.resolved.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Serializable snapshot of the current display state.
    pub fn view(&self) -> ShellView<'_> {
        ShellView {
            location: &self.location,
            generation: self.generation,
            screen: &self.screen,
            modal: self.modal.current(),
            nav: &self.nav,
            pending_fetch: self.pending.as_ref(),
            year: self.clock.now().year(),
        }
    }

    fn navigate_to(&mut self, location: &str) {
        self.location = normalize_location(location).to_string();
        self.resolved = resolve(&self.location);
        self.state = ViewState::default();
        self.modal.close();
        debug!(
            "event=route_resolve module=app status=ok view={:?}",
            self.resolved.view
        );
        self.render();
    }

    fn render(&mut self) {
        self.generation += 1;
        let ctx = RenderContext {
            store: &self.store,
            params: &self.resolved.params,
            state: &self.state,
            now: self.clock.now(),
        };
        let mut screen = self.registry.render(self.resolved.view, &ctx);
        self.pending = screen.fetch.take().map(|name| FetchTicket {
            generation: self.generation,
            name,
        });
        self.screen = screen;
        self.nav.mark_active(&self.location);
        info!(
            "event=render module=app status=ok view={:?} generation={}",
            self.resolved.view, self.generation
        );
    }

    fn run_view_action(&mut self, action: UiAction) -> Vec<Effect> {
        if let Some(kind) = action.kind() {
            if !self.screen.accepts(kind) {
                debug!(
                    "event=action_ignored module=app status=skipped view={:?} action={kind:?}",
                    self.resolved.view
                );
                return Vec::new();
            }
        }

        let result = {
            let mut ctx = ActionContext {
                store: &self.store,
                ids: &self.ids,
                modal: &mut self.modal,
                state: &mut self.state,
                params: &self.resolved.params,
                now: self.clock.now(),
            };
            self.registry.handle(self.resolved.view, &mut ctx, action)
        };

        match result {
            Ok(effects) => {
                let redirect = effects.iter().find_map(|effect| match effect {
                    Effect::Navigate { path } => Some(path.clone()),
                    _ => None,
                });
                match redirect {
                    Some(path) => self.navigate_to(&path),
                    None => self.render(),
                }
                effects
            }
            Err(err) => {
                self.degrade(&err);
                Vec::new()
            }
        }
    }

    fn save_modal(&mut self, values: &FormValues) -> Vec<Effect> {
        let Some(handler) = self.modal.save_handler() else {
            debug!("event=modal_save module=app status=skipped reason=no_handler");
            return Vec::new();
        };

        match handler.apply(&self.store, &self.ids, values, self.clock.now()) {
            Ok(SaveOutcome::Saved(id)) => {
                info!("event=modal_save module=app status=ok handler={handler:?} id={id}");
                self.modal.close();
                self.render();
                Vec::new()
            }
            Ok(SaveOutcome::Rejected(message)) => {
                debug!("event=modal_save module=app status=rejected handler={handler:?}");
                vec![Effect::alert(message)]
            }
            Err(err) => {
                self.modal.close();
                self.degrade(&err);
                Vec::new()
            }
        }
    }

    fn degrade(&mut self, err: &StoreError) {
        error!(
            "event=mutation module=app status=error view={:?} error={}",
            self.resolved.view, err
        );
        self.generation += 1;
        self.pending = None;
        self.screen = Screen::placeholder(self.resolved.view, "Error", FAILURE_MESSAGE);
        self.nav.mark_active(&self.location);
    }
}
