//! Event list and event detail, both read from the events collection.

use crate::id::IdGenerator;
use crate::modal::{Modal, SaveHandler, SaveOutcome};
use crate::model::calendar::{format_local_datetime, parse_local_datetime};
use crate::model::records::Event;
use crate::router::ViewId;
use crate::store::{Store, StoreResult};
use crate::view::{
    matches_query, ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, FormValues,
    ListItem, RenderContext, Screen, UiAction,
};
use chrono::{DateTime, FixedOffset};

const DEFAULT_CAMPUS: &str = "Main";

/// Events ordered by start time; equal starts keep insertion order.
pub fn sorted_by_start(events: &[Event]) -> Vec<&Event> {
    let mut sorted = events.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|event| event.start);
    sorted
}

pub fn render_list(ctx: &RenderContext<'_>) -> Screen {
    let events = ctx.store.get::<Event>();
    let items = sorted_by_start(&events)
        .into_iter()
        .filter(|event| {
            matches_query(
                &format!("{} {} {}", event.title, event.desc, event.campus),
                &ctx.state.query,
            )
        })
        .map(|event| {
            ListItem::new(&event.id, &event.title)
                .subtitle(format!(
                    "{} — {}",
                    format_local_datetime(&event.start, &ctx.now),
                    event.campus
                ))
                .link(format!("/event/{}", event.id))
        })
        .collect();

    Screen::new(ViewId::Events, "Events")
        .block(Block::search("Search events", &ctx.state.query))
        .block(Block::list("events-list", items))
        .action(ActionKind::Filter, "Search")
        .action(ActionKind::OpenCreate, "New Event")
}

pub fn handle_list(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    match action {
        UiAction::Filter { query } => ctx.state.query = query,
        UiAction::OpenCreate => ctx.modal.open(
            Modal::Form {
                form: new_event_form(),
            },
            Some(SaveHandler::NewEvent),
        ),
        _ => {}
    }
    Ok(Vec::new())
}

pub fn render_detail(ctx: &RenderContext<'_>) -> Screen {
    let id = ctx.params.get("id");
    let events = ctx.store.get::<Event>();
    let Some(event) = events.iter().find(|event| event.id == id) else {
        return Screen::placeholder(ViewId::EventDetail, "Event", "Event not found");
    };

    let mut screen = Screen::new(ViewId::EventDetail, event.title.clone())
        .block(Block::heading(&event.title))
        .block(Block::text(&event.desc))
        .block(Block::muted(format!(
            "{} • {}",
            format_local_datetime(&event.start, &ctx.now),
            event.campus
        )));
    if let Some(capacity) = event.capacity {
        screen = screen.block(Block::muted(format!("Capacity: {capacity}")));
    }
    screen.action(ActionKind::Register, "Register")
}

pub fn handle_detail(_ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    if action == UiAction::Register {
        return Ok(vec![Effect::alert(
            "Registration simulated — connect to backend to enable real registration",
        )]);
    }
    Ok(Vec::new())
}

/// Appends an event from the new-event form.
///
/// The start date is the one validated field: blank or unparsable input is
/// rejected. A blank campus defaults to `Main`.
pub fn save_event(
    store: &Store,
    ids: &IdGenerator,
    values: &FormValues,
    now: DateTime<FixedOffset>,
) -> StoreResult<SaveOutcome> {
    let Some(start) = parse_local_datetime(values.get("start"), &now) else {
        return Ok(SaveOutcome::Rejected("Enter a valid date".to_string()));
    };
    let campus = match values.get("campus") {
        "" => DEFAULT_CAMPUS.to_string(),
        campus => campus.to_string(),
    };

    store.update::<Event, _>(|events| {
        let id = ids.new_record_id(events);
        events.push(Event {
            id: id.clone(),
            title: values.get("title").to_string(),
            desc: values.get("desc").to_string(),
            start,
            campus,
            capacity: None,
        });
        SaveOutcome::Saved(id)
    })
}

fn new_event_form() -> FormSpec {
    FormSpec::new("New Event", "Save")
        .field("title", "Title", FieldKind::Text)
        .field("start", "Date", FieldKind::DateTimeLocal)
        .field("campus", "Campus", FieldKind::Text)
        .field("desc", "Description", FieldKind::TextArea)
}
