//! Today's check-ins and the check-in-by-search flow.

use crate::model::calendar::{format_local_time, is_same_calendar_day};
use crate::model::records::{find_member, Attendance, Member};
use crate::router::ViewId;
use crate::store::StoreResult;
use crate::view::{ActionContext, ActionKind, Block, Effect, ListItem, RenderContext, Screen, UiAction};
use chrono::Utc;

const GUEST_NAME: &str = "Guest";
const CHECK_IN_METHOD: &str = "kiosk";

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let members = ctx.store.get::<Member>();
    let attendance = ctx.store.get::<Attendance>();

    let items = attendance
        .iter()
        .filter(|record| is_same_calendar_day(&record.checked_in_at, &ctx.now))
        .map(|record| {
            let name = record
                .member_id
                .as_deref()
                .and_then(|member_id| find_member(&members, member_id))
                .map(Member::full_name)
                .unwrap_or_else(|| GUEST_NAME.to_string());
            ListItem::new(&record.id, format!(
                "{name} — {}",
                format_local_time(&record.checked_in_at, &ctx.now)
            ))
        })
        .collect();

    Screen::new(ViewId::Attendance, "Attendance")
        .block(Block::search("Name, phone or email", ""))
        .block(Block::list("attendance-list", items))
        .action(ActionKind::CheckIn, "Check in")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    if let UiAction::CheckIn { query } = action {
        let members = ctx.store.get::<Member>();
        let member_id = match_member(&members, &query).map(|member| member.id.clone());
        let checked_in_at = ctx.now.with_timezone(&Utc);
        ctx.store.update::<Attendance, _>(|attendance| {
            let id = ctx.ids.new_record_id(attendance);
            attendance.push(Attendance {
                id,
                member_id,
                checked_in_at,
                method: CHECK_IN_METHOD.to_string(),
            });
        })?;
    }
    Ok(Vec::new())
}

/// First member whose name, phone or email contains `query`.
///
/// A blank query matches nobody and records a guest.
pub fn match_member<'a>(members: &'a [Member], query: &str) -> Option<&'a Member> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    members.iter().find(|member| {
        format!(
            "{} {} {} {}",
            member.first_name, member.last_name, member.phone, member.email
        )
        .to_lowercase()
        .contains(&query)
    })
}
