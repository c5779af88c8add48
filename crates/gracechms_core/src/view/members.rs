//! Member directory: live search, add, detail and CSV round trip.

use crate::export::{members_to_csv, parse_member_import};
use crate::id::IdGenerator;
use crate::modal::{Modal, SaveHandler, SaveOutcome};
use crate::model::records::Member;
use crate::router::ViewId;
use crate::store::{Store, StoreResult};
use crate::view::{
    matches_query, ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, FormValues,
    ListItem, RenderContext, Screen, UiAction,
};
use log::info;
use std::collections::BTreeSet;

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let members = ctx.store.get::<Member>();
    let items = members
        .iter()
        .filter(|member| matches_query(&search_text(member), &ctx.state.query))
        .map(|member| {
            ListItem::new(&member.id, format!("{} {}", member.first_name, member.last_name))
                .subtitle(format!("{} {}", member.email, member.phone).trim().to_string())
                .avatar(member.initials())
                .detail(&member.id)
        })
        .collect();

    Screen::new(ViewId::Members, "Members")
        .block(Block::search("Search members", &ctx.state.query))
        .block(Block::list("members-list", items))
        .action(ActionKind::Filter, "Search")
        .action(ActionKind::OpenCreate, "Add Member")
        .action(ActionKind::ShowDetail, "View")
        .action(ActionKind::ExportCsv, "Export CSV")
        .action(ActionKind::ImportCsv, "Import CSV")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    match action {
        UiAction::Filter { query } => ctx.state.query = query,
        UiAction::OpenCreate => ctx.modal.open(
            Modal::Form {
                form: add_member_form(),
            },
            Some(SaveHandler::AddMember),
        ),
        UiAction::ShowDetail { id } => {
            let members = ctx.store.get::<Member>();
            ctx.modal.open(detail_modal(&members, &id), None);
        }
        UiAction::ExportCsv => {
            let members = ctx.store.get::<Member>();
            return Ok(vec![Effect::csv_download(
                "members.csv",
                members_to_csv(&members),
            )]);
        }
        UiAction::ImportCsv { text } => {
            let imported = import_members(ctx.store, ctx.ids, &text)?;
            info!("event=members_import module=view status=ok records={imported}");
        }
        _ => {}
    }
    Ok(Vec::new())
}

/// Appends a member built from the add-member form.
pub fn save_member(store: &Store, ids: &IdGenerator, values: &FormValues) -> StoreResult<SaveOutcome> {
    store.update::<Member, _>(|members| {
        let id = ids.new_record_id(members);
        members.push(Member {
            id: id.clone(),
            first_name: values.get("first_name").to_string(),
            last_name: values.get("last_name").to_string(),
            phone: values.get("phone").to_string(),
            email: values.get("email").to_string(),
            tags: BTreeSet::new(),
        });
        SaveOutcome::Saved(id)
    })
}

/// Appends one member per import row and returns how many were added.
pub fn import_members(store: &Store, ids: &IdGenerator, text: &str) -> StoreResult<usize> {
    let rows = parse_member_import(text);
    store.update::<Member, _>(|members| {
        for row in &rows {
            let id = ids.new_record_id(members);
            members.push(Member {
                id,
                first_name: row.first_name.clone(),
                last_name: row.last_name.clone(),
                phone: row.phone.clone(),
                email: row.email.clone(),
                tags: BTreeSet::new(),
            });
        }
        rows.len()
    })
}

fn add_member_form() -> FormSpec {
    FormSpec::new("Add Member", "Save")
        .field("first_name", "First name", FieldKind::Text)
        .field("last_name", "Last name", FieldKind::Text)
        .field("email", "Email", FieldKind::Email)
        .field("phone", "Phone", FieldKind::Tel)
}

fn detail_modal(members: &[Member], id: &str) -> Modal {
    match members.iter().find(|member| member.id == id) {
        Some(member) => Modal::Detail {
            title: format!("{} {}", member.first_name, member.last_name),
            rows: vec![
                ("Email".to_string(), or_dash(&member.email)),
                ("Phone".to_string(), or_dash(&member.phone)),
            ],
        },
        None => Modal::Detail {
            title: "Member not found".to_string(),
            rows: Vec::new(),
        },
    }
}

fn search_text(member: &Member) -> String {
    let tags = member.tags.iter().cloned().collect::<Vec<_>>().join(" ");
    format!(
        "{} {} {} {} {tags}",
        member.first_name, member.last_name, member.email, member.phone
    )
}

pub(crate) fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}
