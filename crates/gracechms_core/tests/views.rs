use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use gracechms_core::view::{Block, ListItem, ReportKind};
use gracechms_core::{
    AppController, Attendance, BackgroundCheck, Clock, DirectoryReferenceLoader, Effect, Event,
    FixedClock, Group, Member, MemoryKvRepository, Modal, SharedClock, Store, UiAction,
};
use std::sync::Arc;

fn clock_at(hour: u32, minute: u32, second: u32) -> SharedClock {
    let now = FixedOffset::east_opt(-5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 15, hour, minute, second)
        .unwrap();
    Arc::new(FixedClock(now))
}

fn app_with(repo: &MemoryKvRepository, clock: SharedClock) -> AppController {
    let store = Store::new(Box::new(repo.clone()), clock.clone());
    AppController::new(
        store,
        Box::new(DirectoryReferenceLoader::new(std::env::temp_dir())),
        clock,
    )
}

fn store_over(repo: &MemoryKvRepository) -> Store {
    Store::new(Box::new(repo.clone()), clock_at(9, 0, 0))
}

fn list<'a>(app: &'a AppController, id: &str) -> &'a [ListItem] {
    app.screen()
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::List {
                id: list_id, items, ..
            } if list_id == id => Some(items.as_slice()),
            _ => None,
        })
        .expect("list block should exist")
}

fn event(id: &str, start: DateTime<Utc>) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        desc: String::new(),
        start,
        campus: "Main".to_string(),
        capacity: None,
    }
}

#[test]
fn today_filter_compares_calendar_days_not_elapsed_time() {
    let clock = clock_at(23, 59, 59);
    let now = clock.now().with_timezone(&Utc);
    let repo = MemoryKvRepository::new();
    store_over(&repo)
        .put(&[
            Attendance {
                id: "a_late".to_string(),
                member_id: None,
                checked_in_at: now,
                method: "kiosk".to_string(),
            },
            Attendance {
                id: "a_prev_day".to_string(),
                member_id: None,
                checked_in_at: now - Duration::hours(24),
                method: "kiosk".to_string(),
            },
        ])
        .unwrap();

    let mut app = app_with(&repo, clock_at(0, 0, 30));
    app.start("#/attendance");
    let keys = list(&app, "attendance-list")
        .iter()
        .map(|item| item.key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["a_late"]);

    let mut late_app = app_with(&repo, clock);
    late_app.start("#/attendance");
    assert_eq!(list(&late_app, "attendance-list").len(), 1);
}

#[test]
fn dashboard_lists_five_earliest_events_with_stable_ties() {
    let repo = MemoryKvRepository::new();
    let base = Utc.with_ymd_and_hms(2026, 11, 1, 15, 0, 0).unwrap();
    store_over(&repo)
        .put(&[
            event("e_late", base + Duration::days(9)),
            event("e_tie_a", base + Duration::days(2)),
            event("e_first", base),
            event("e_tie_b", base + Duration::days(2)),
            event("e_mid", base + Duration::days(3)),
            event("e_later", base + Duration::days(5)),
            event("e_second", base + Duration::days(1)),
        ])
        .unwrap();

    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/");
    let upcoming = list(&app, "upcoming-events");
    let keys = upcoming.iter().map(|item| item.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["e_first", "e_second", "e_tie_a", "e_tie_b", "e_mid"]);
    assert_eq!(upcoming[0].link.as_deref(), Some("/event/e_first"));
    assert_eq!(
        upcoming[0].badge,
        Some(("Sun".to_string(), "1".to_string()))
    );
}

#[test]
fn group_leaders_fall_back_for_blank_and_dangling_ids() {
    let repo = MemoryKvRepository::new();
    store_over(&repo)
        .put(&[
            Group {
                id: "g_1".to_string(),
                name: "North".to_string(),
                leader: "m_1".to_string(),
            },
            Group {
                id: "g_2".to_string(),
                name: "South".to_string(),
                leader: String::new(),
            },
            Group {
                id: "g_3".to_string(),
                name: "East".to_string(),
                leader: "m_gone".to_string(),
            },
        ])
        .unwrap();

    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/groups");
    let subtitles = list(&app, "groups-list")
        .iter()
        .map(|item| item.subtitle.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        subtitles,
        vec!["Leader: Alice Johnson", "Leader: —", "Leader: Unknown"]
    );

    app.dispatch(UiAction::Filter {
        query: "sou".to_string(),
    });
    assert_eq!(list(&app, "groups-list").len(), 1);
}

#[test]
fn volunteer_filter_matches_role_or_member_name() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/volunteers");
    assert_eq!(list(&app, "vols-list").len(), 1);

    app.dispatch(UiAction::Filter {
        query: "USHER".to_string(),
    });
    assert_eq!(list(&app, "vols-list").len(), 1);

    app.dispatch(UiAction::Filter {
        query: "alice".to_string(),
    });
    assert_eq!(list(&app, "vols-list")[0].title, "Alice Johnson");

    app.dispatch(UiAction::Filter {
        query: "choir".to_string(),
    });
    assert!(list(&app, "vols-list").is_empty());
}

#[test]
fn filter_state_resets_on_navigation() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/members");
    app.dispatch(UiAction::Filter {
        query: "zzz".to_string(),
    });
    assert!(list(&app, "members-list").is_empty());

    app.on_location_change("#/groups");
    app.on_location_change("#/members");
    assert_eq!(list(&app, "members-list").len(), 3);
}

#[test]
fn member_tags_are_searchable() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/members");

    app.dispatch(UiAction::Filter {
        query: "volunteer".to_string(),
    });

    let items = list(&app, "members-list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].avatar.as_deref(), Some("AJ"));
}

#[test]
fn member_detail_falls_back_when_id_is_unknown() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/members");

    app.dispatch(UiAction::ShowDetail {
        id: "m_missing".to_string(),
    });

    assert_eq!(
        app.modal(),
        Some(&Modal::Detail {
            title: "Member not found".to_string(),
            rows: Vec::new(),
        })
    );
    app.dispatch(UiAction::CloseModal);
    assert!(app.modal().is_none());
}

#[test]
fn member_csv_export_and_import() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/members");

    let effects = app.dispatch(UiAction::ExportCsv);
    let Effect::Download {
        filename, contents, ..
    } = &effects[0]
    else {
        panic!("export should download a file");
    };
    assert_eq!(filename, "members.csv");
    assert!(contents.starts_with("\"first_name\",\"last_name\",\"email\",\"phone\"\n"));
    assert!(contents.contains("\"Alice\",\"Johnson\""));

    app.dispatch(UiAction::ImportCsv {
        text: "first_name,last_name,email,phone\nEve,Stone,eve@example.org,555-0199\n\n".to_string(),
    });

    let members = app.store().get::<Member>();
    assert_eq!(members.len(), 4);
    assert_eq!(members[3].email, "eve@example.org");
    assert_eq!(list(&app, "members-list").len(), 4);
}

#[test]
fn reports_without_data_alert_instead_of_downloading() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/reports");

    let effects = app.dispatch(UiAction::ExportReport {
        report: ReportKind::Giving,
    });
    assert_eq!(effects, vec![Effect::alert("No data")]);
}

#[test]
fn attendance_report_downloads_check_ins() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/attendance");
    app.dispatch(UiAction::CheckIn {
        query: String::new(),
    });
    app.on_location_change("#/reports");

    let effects = app.dispatch(UiAction::ExportReport {
        report: ReportKind::Attendance,
    });

    let Effect::Download {
        filename,
        mime,
        contents,
    } = &effects[0]
    else {
        panic!("report should download a file");
    };
    assert_eq!(filename, "attendance.csv");
    assert_eq!(mime, "text/csv");
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("\"kiosk\""));
}

#[test]
fn background_checks_tolerate_dangling_member() {
    let repo = MemoryKvRepository::new();
    store_over(&repo)
        .put(&[BackgroundCheck {
            id: "b_9".to_string(),
            member_id: "m_gone".to_string(),
            status: "pending".to_string(),
        }])
        .unwrap();

    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/backgrounds");
    let items = list(&app, "background-list");
    assert_eq!(items[0].title, "Unknown");
    assert_eq!(items[0].subtitle, "Status: pending");
}

#[test]
fn profile_without_members_shows_placeholder_user() {
    let repo = MemoryKvRepository::new();
    store_over(&repo).put::<Member>(&[]).unwrap();

    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/profile");
    assert!(app.screen().blocks.contains(&Block::Heading {
        text: "User".to_string()
    }));
}

#[test]
fn event_detail_shows_capacity_and_simulates_registration() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/event/e_1");

    assert!(app.screen().blocks.contains(&Block::Text {
        text: "Capacity: 200".to_string(),
        muted: true,
    }));
    let effects = app.dispatch(UiAction::Register);
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::Alert { message } if message.starts_with("Registration simulated")));
}

#[test]
fn new_event_defaults_campus_and_sorts_into_list() {
    let repo = MemoryKvRepository::new();
    let mut app = app_with(&repo, clock_at(9, 0, 0));
    app.start("#/events");
    app.dispatch(UiAction::OpenCreate);

    app.dispatch(UiAction::SaveModal {
        values: [("title", "Early Prayer"), ("start", "2020-01-05T07:00")]
            .into_iter()
            .collect(),
    });

    let events = app.store().get::<Event>();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].campus, "Main");
    assert_eq!(list(&app, "events-list")[0].title, "Early Prayer");
}
