//! Small groups with leader display resolved against the member directory.

use crate::id::IdGenerator;
use crate::modal::{Modal, SaveHandler, SaveOutcome};
use crate::model::records::{find_member, Group, Member};
use crate::router::ViewId;
use crate::store::{Store, StoreResult};
use crate::view::{
    matches_query, ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, FormValues,
    ListItem, RenderContext, Screen, UiAction,
};

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let groups = ctx.store.get::<Group>();
    let members = ctx.store.get::<Member>();
    let items = groups
        .iter()
        .filter(|group| matches_query(&group.name, &ctx.state.query))
        .map(|group| {
            ListItem::new(&group.id, &group.name)
                .subtitle(format!("Leader: {}", leader_label(&members, &group.leader)))
        })
        .collect();

    Screen::new(ViewId::Groups, "Groups")
        .block(Block::search("Search groups", &ctx.state.query))
        .block(Block::list("groups-list", items))
        .action(ActionKind::Filter, "Search")
        .action(ActionKind::OpenCreate, "New Group")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    match action {
        UiAction::Filter { query } => ctx.state.query = query,
        UiAction::OpenCreate => ctx.modal.open(
            Modal::Form {
                form: FormSpec::new("New Group", "Save")
                    .field("name", "Name", FieldKind::Text)
                    .field("leader", "Leader ID", FieldKind::Text),
            },
            Some(SaveHandler::NewGroup),
        ),
        _ => {}
    }
    Ok(Vec::new())
}

pub fn save_group(store: &Store, ids: &IdGenerator, values: &FormValues) -> StoreResult<SaveOutcome> {
    store.update::<Group, _>(|groups| {
        let id = ids.new_record_id(groups);
        groups.push(Group {
            id: id.clone(),
            name: values.get("name").to_string(),
            leader: values.get("leader").to_string(),
        });
        SaveOutcome::Saved(id)
    })
}

/// `—` for no leader, `Unknown` for a dangling id, else the member's name.
fn leader_label(members: &[Member], leader: &str) -> String {
    if leader.is_empty() {
        return "—".to_string();
    }
    find_member(members, leader)
        .map(Member::full_name)
        .unwrap_or_else(|| "Unknown".to_string())
}
