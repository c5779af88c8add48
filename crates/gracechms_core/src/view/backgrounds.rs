//! Background check status per member.

use crate::model::records::{find_member, BackgroundCheck, Member};
use crate::router::ViewId;
use crate::view::{Block, ListItem, RenderContext, Screen};

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let checks = ctx.store.get::<BackgroundCheck>();
    let members = ctx.store.get::<Member>();
    let items = checks
        .iter()
        .map(|check| {
            let name = find_member(&members, &check.member_id)
                .map(Member::full_name)
                .unwrap_or_else(|| "Unknown".to_string());
            ListItem::new(&check.id, name).subtitle(format!("Status: {}", check.status))
        })
        .collect();

    Screen::new(ViewId::Backgrounds, "Background Checks").block(Block::list("background-list", items))
}
