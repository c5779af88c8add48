//! Landing dashboard: headline counts and the next events.

use crate::model::calendar::{format_local_datetime, is_same_calendar_day, weekday_badge};
use crate::model::money::{format_cents, total_cents};
use crate::model::records::{Attendance, Donation, Event, Group, Member};
use crate::router::ViewId;
use crate::view::events::sorted_by_start;
use crate::view::{Block, ListItem, RenderContext, Screen};
use log::warn;

const UPCOMING_LIMIT: usize = 5;
const UNAVAILABLE: &str = "—";

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let members = ctx.store.get::<Member>();
    let attendance = ctx.store.get::<Attendance>();
    let donations = ctx.store.get::<Donation>();
    let groups = ctx.store.get::<Group>();
    let events = ctx.store.get::<Event>();

    let today = attendance
        .iter()
        .filter(|record| is_same_calendar_day(&record.checked_in_at, &ctx.now))
        .count();
    let giving_total = match total_cents(donations.iter().map(|donation| donation.amount)) {
        Some(total) => format_cents(total),
        None => {
            warn!("event=giving_total module=view status=overflow donations={}", donations.len());
            UNAVAILABLE.to_string()
        }
    };

    let upcoming = sorted_by_start(&events)
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|event| {
            let campus = &event.campus;
            ListItem::new(&event.id, &event.title)
                .subtitle(format!(
                    "{} • {campus}",
                    format_local_datetime(&event.start, &ctx.now)
                ))
                .badge(weekday_badge(&event.start, &ctx.now))
                .link(format!("/event/{}", event.id))
        })
        .collect();

    Screen::new(ViewId::Dashboard, "Dashboard")
        .block(Block::stat("members-count", "Members", members.len().to_string()))
        .block(Block::stat("attendance-count", "Checked in today", today.to_string()))
        .block(Block::stat("giving-total", "Giving", giving_total))
        .block(Block::stat("groups-count", "Groups", groups.len().to_string()))
        .block(Block::heading("Upcoming events"))
        .block(Block::list("upcoming-events", upcoming))
}
