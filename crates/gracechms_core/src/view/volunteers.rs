//! Volunteer roster.

use crate::id::IdGenerator;
use crate::modal::{Modal, SaveHandler, SaveOutcome};
use crate::model::records::{find_member, Member, Volunteer};
use crate::router::ViewId;
use crate::store::{Store, StoreResult};
use crate::view::{
    matches_query, ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, FormValues,
    ListItem, RenderContext, Screen, UiAction,
};

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let volunteers = ctx.store.get::<Volunteer>();
    let members = ctx.store.get::<Member>();
    let query = ctx.state.query.as_str();

    let items = volunteers
        .iter()
        .filter_map(|volunteer| {
            let member = find_member(&members, &volunteer.member_id);
            let name_matches = member.is_some_and(|member| matches_query(&member.full_name(), query));
            if !name_matches && !matches_query(&volunteer.role, query) {
                return None;
            }
            let item = match member {
                Some(member) => ListItem::new(&volunteer.id, member.full_name())
                    .avatar(member.initials()),
                None => ListItem::new(&volunteer.id, "Unknown").avatar(""),
            };
            Some(item.subtitle(format!("Role: {}", volunteer.role)))
        })
        .collect();

    Screen::new(ViewId::Volunteers, "Volunteers")
        .block(Block::search("Search volunteers", query))
        .block(Block::list("vols-list", items))
        .action(ActionKind::Filter, "Search")
        .action(ActionKind::OpenCreate, "Add Volunteer")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    match action {
        UiAction::Filter { query } => ctx.state.query = query,
        UiAction::OpenCreate => ctx.modal.open(
            Modal::Form {
                form: FormSpec::new("Add Volunteer", "Save")
                    .field("member_id", "Member ID", FieldKind::Text)
                    .field("role", "Role", FieldKind::Text),
            },
            Some(SaveHandler::AddVolunteer),
        ),
        _ => {}
    }
    Ok(Vec::new())
}

pub fn save_volunteer(
    store: &Store,
    ids: &IdGenerator,
    values: &FormValues,
) -> StoreResult<SaveOutcome> {
    store.update::<Volunteer, _>(|volunteers| {
        let id = ids.new_record_id(volunteers);
        volunteers.push(Volunteer {
            id: id.clone(),
            member_id: values.get("member_id").to_string(),
            role: values.get("role").to_string(),
        });
        SaveOutcome::Saved(id)
    })
}
