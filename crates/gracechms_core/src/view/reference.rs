//! Reference pages loaded from an external content source.
//!
//! Rendering only names the page; the application controller tags the load
//! with the render generation and splices the result in when it settles.

use crate::reference::ReferenceError;
use crate::router::ViewId;
use crate::view::{Block, RenderContext, Screen};

pub const LOADING_MESSAGE: &str = "Loading…";
pub const UNSPECIFIED_MESSAGE: &str = "Reference page not specified.";

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let name = ctx.params.get("name");
    if name.is_empty() {
        return Screen::placeholder(ViewId::Reference, "Reference", UNSPECIFIED_MESSAGE);
    }
    let mut screen = Screen::placeholder(ViewId::Reference, name, LOADING_MESSAGE);
    screen.fetch = Some(name.to_string());
    screen
}

/// Replaces the loading placeholder with the settled content.
pub fn settle(screen: &mut Screen, result: Result<String, ReferenceError>) {
    screen.blocks = vec![match result {
        Ok(html) => Block::Markup { html },
        Err(err) => Block::Placeholder {
            message: err.placeholder(),
        },
    }];
}
