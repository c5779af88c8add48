//! Mostly static pages: service planner, profile, login, settings, kiosk.

use crate::model::records::Member;
use crate::router::ViewId;
use crate::store::StoreResult;
use crate::view::members::or_dash;
use crate::view::{
    ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, RenderContext, Screen,
    UiAction,
};

pub fn render_service(_ctx: &RenderContext<'_>) -> Screen {
    Screen::new(ViewId::Service, "Service Planner")
        .block(Block::muted("Plan upcoming services."))
        .action(ActionKind::NewServicePlan, "New plan")
}

pub fn handle_service(_ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    Ok(match action {
        UiAction::NewServicePlan => vec![Effect::alert(
            "Create service plan — backend required for full functionality",
        )],
        _ => Vec::new(),
    })
}

/// Shows the first member as the signed-in profile.
pub fn render_profile(ctx: &RenderContext<'_>) -> Screen {
    let members = ctx.store.get::<Member>();
    let screen = Screen::new(ViewId::Profile, "Profile");
    match members.first() {
        Some(me) => screen
            .block(Block::heading(me.full_name()))
            .block(Block::text(format!("Email: {}", or_dash(&me.email))))
            .block(Block::text(format!("Phone: {}", or_dash(&me.phone)))),
        None => screen
            .block(Block::heading("User"))
            .block(Block::text("Email: —"))
            .block(Block::text("Phone: —")),
    }
}

pub fn render_login(_ctx: &RenderContext<'_>) -> Screen {
    Screen::new(ViewId::Login, "Sign in")
        .block(Block::Form {
            form: FormSpec::new("Sign in", "Sign in")
                .field("email", "Email", FieldKind::Email)
                .field("password", "Password", FieldKind::Password),
        })
        .action(ActionKind::Login, "Sign in")
}

/// Accepts any credentials and returns to the dashboard.
pub fn handle_login(_ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    Ok(match action {
        UiAction::Login { .. } => vec![
            Effect::alert("Login simulated (no auth)"),
            Effect::Navigate {
                path: "/".to_string(),
            },
        ],
        _ => Vec::new(),
    })
}

pub fn render_settings(_ctx: &RenderContext<'_>) -> Screen {
    Screen::new(ViewId::Settings, "Settings").block(Block::muted(
        "Data is stored on this device only.",
    ))
}

pub fn render_kiosk(_ctx: &RenderContext<'_>) -> Screen {
    Screen::new(ViewId::Kiosk, "Check-in Kiosk")
        .block(Block::muted("Tap to check in."))
        .action(ActionKind::KioskCheckIn, "Check in")
}

pub fn handle_kiosk(_ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    Ok(match action {
        UiAction::KioskCheckIn => vec![Effect::alert("Kiosk check-in simulated")],
        _ => Vec::new(),
    })
}
