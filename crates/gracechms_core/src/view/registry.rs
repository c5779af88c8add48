//! View registry: view id to render function and action handler.

use crate::router::ViewId;
use crate::store::StoreResult;
use crate::view::{
    attendance, backgrounds, dashboard, events, giving, groups, members, pages, reference,
    reports, volunteers, ActionContext, Effect, RenderContext, Screen, UiAction,
};
use log::debug;
use std::collections::BTreeMap;

pub type RenderFn = fn(&RenderContext<'_>) -> Screen;
pub type ActionFn = fn(&mut ActionContext<'_>, UiAction) -> StoreResult<Vec<Effect>>;

#[derive(Clone, Copy)]
pub struct ViewEntry {
    pub render: RenderFn,
    pub handle: Option<ActionFn>,
}

impl ViewEntry {
    pub fn new(render: RenderFn) -> Self {
        Self {
            render,
            handle: None,
        }
    }

    pub fn with_handler(render: RenderFn, handle: ActionFn) -> Self {
        Self {
            render,
            handle: Some(handle),
        }
    }
}

#[derive(Default)]
pub struct ViewRegistry {
    entries: BTreeMap<ViewId, ViewEntry>,
}

impl ViewRegistry {
    /// Empty registry; unregistered views render a placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in church-management view.
    pub fn with_builtin_views() -> Self {
        let mut registry = Self::new();
        registry.register(ViewId::Dashboard, ViewEntry::new(dashboard::render));
        registry.register(
            ViewId::Members,
            ViewEntry::with_handler(members::render, members::handle),
        );
        registry.register(
            ViewId::Attendance,
            ViewEntry::with_handler(attendance::render, attendance::handle),
        );
        registry.register(
            ViewId::Events,
            ViewEntry::with_handler(events::render_list, events::handle_list),
        );
        registry.register(
            ViewId::EventDetail,
            ViewEntry::with_handler(events::render_detail, events::handle_detail),
        );
        registry.register(
            ViewId::Groups,
            ViewEntry::with_handler(groups::render, groups::handle),
        );
        registry.register(
            ViewId::Volunteers,
            ViewEntry::with_handler(volunteers::render, volunteers::handle),
        );
        registry.register(
            ViewId::Service,
            ViewEntry::with_handler(pages::render_service, pages::handle_service),
        );
        registry.register(
            ViewId::Reports,
            ViewEntry::with_handler(reports::render, reports::handle),
        );
        registry.register(
            ViewId::Giving,
            ViewEntry::with_handler(giving::render, giving::handle),
        );
        registry.register(ViewId::Profile, ViewEntry::new(pages::render_profile));
        registry.register(
            ViewId::Kiosk,
            ViewEntry::with_handler(pages::render_kiosk, pages::handle_kiosk),
        );
        registry.register(
            ViewId::Login,
            ViewEntry::with_handler(pages::render_login, pages::handle_login),
        );
        registry.register(ViewId::Settings, ViewEntry::new(pages::render_settings));
        registry.register(ViewId::Backgrounds, ViewEntry::new(backgrounds::render));
        registry.register(ViewId::Reference, ViewEntry::new(reference::render));
        registry
    }

    /// Registers or replaces the entry for `view`.
    pub fn register(&mut self, view: ViewId, entry: ViewEntry) {
        self.entries.insert(view, entry);
    }

    pub fn render(&self, view: ViewId, ctx: &RenderContext<'_>) -> Screen {
        match self.entries.get(&view) {
            Some(entry) => (entry.render)(ctx),
            None => Screen::placeholder(view, "Not available", "This page is not available."),
        }
    }

    /// Runs the view's handler; views without one ignore every action.
    pub fn handle(
        &self,
        view: ViewId,
        ctx: &mut ActionContext<'_>,
        action: UiAction,
    ) -> StoreResult<Vec<Effect>> {
        match self.entries.get(&view).and_then(|entry| entry.handle) {
            Some(handle) => handle(ctx, action),
            None => {
                debug!("event=action_ignored module=view status=skipped view={view:?}");
                Ok(Vec::new())
            }
        }
    }
}
