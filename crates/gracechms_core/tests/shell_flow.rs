use chrono::{Duration, FixedOffset, TimeZone, Utc};
use gracechms_core::db::open_db;
use gracechms_core::model::collection::Collection;
use gracechms_core::view::{Block, FormValues, ListItem};
use gracechms_core::{
    AppController, Attendance, Clock, DirectoryReferenceLoader, Donation, Effect, FixedClock, Member,
    SharedClock, SqliteKvRepository, Store, UiAction, ViewId,
};
use std::path::Path;
use std::sync::Arc;

fn clock() -> SharedClock {
    let now = FixedOffset::east_opt(-5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 15, 10, 30, 0)
        .unwrap();
    Arc::new(FixedClock(now))
}

fn sqlite_store(path: &Path) -> Store {
    let conn = open_db(path).unwrap();
    Store::new(Box::new(SqliteKvRepository::new(conn)), clock())
}

fn app_at(db_path: &Path, reference_dir: &Path) -> AppController {
    let loader = DirectoryReferenceLoader::new(reference_dir);
    AppController::new(sqlite_store(db_path), Box::new(loader), clock())
}

fn stat_value(app: &AppController, id: &str) -> String {
    app.screen()
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::Stat {
                id: stat_id, value, ..
            } if stat_id == id => Some(value.clone()),
            _ => None,
        })
        .expect("stat block should exist")
}

fn list_items<'a>(app: &'a AppController, id: &str) -> &'a [ListItem] {
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

#[test]
fn donation_flows_into_dashboard_total() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/giving");

    let effects = app.dispatch(UiAction::Donate {
        values: FormValues::new().with("amount", "25.50").with("fund", "General"),
    });
    assert_eq!(
        effects,
        vec![Effect::alert("Donation simulated — receipt saved")]
    );

    let donations = app.store().get::<Donation>();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].amount, 2550);
    assert_eq!(donations[0].donor_name, "Anonymous");

    app.on_location_change("#/");
    assert_eq!(stat_value(&app, "giving-total"), "$25.50");

    app.on_location_change("#/giving");
    let receipts = list_items(&app, "donation-receipts");
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].title.starts_with("$25.50"));
    assert!(receipts[0].title.ends_with("General"));
}

#[test]
fn donations_at_the_cap_keep_the_dashboard_total_exact() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/giving");

    for _ in 0..2 {
        let effects = app.dispatch(UiAction::Donate {
            values: FormValues::new().with("amount", "1000000000"),
        });
        assert_eq!(
            effects,
            vec![Effect::alert("Donation simulated — receipt saved")]
        );
    }
    let effects = app.dispatch(UiAction::Donate {
        values: FormValues::new().with("amount", "1000000000.01"),
    });
    assert_eq!(effects, vec![Effect::alert("Enter amount")]);
    assert_eq!(app.store().get::<Donation>().len(), 2);

    app.on_location_change("#/");
    assert_eq!(stat_value(&app, "giving-total"), "$2000000000.00");
}

#[test]
fn stored_totals_beyond_i64_render_as_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shell.db");
    let store = sqlite_store(&db_path);
    let now = clock().now().with_timezone(&Utc);
    let huge = |id: &str| Donation {
        id: id.to_string(),
        amount: i64::MAX / 2 + 1,
        donor_name: "Anonymous".to_string(),
        fund: "General".to_string(),
        created_at: now,
    };
    store.put(&[huge("d_1"), huge("d_2")]).unwrap();
    drop(store);

    let mut app = app_at(&db_path, dir.path());
    app.start("#/");
    assert_eq!(app.current_view(), ViewId::Dashboard);
    assert_eq!(stat_value(&app, "giving-total"), "—");
}

#[test]
fn invalid_amount_is_refused_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/giving");

    let effects = app.dispatch(UiAction::Donate {
        values: FormValues::new().with("amount", "abc"),
    });

    assert_eq!(effects, vec![Effect::alert("Enter amount")]);
    assert!(app.store().get::<Donation>().is_empty());
}

#[test]
fn dashboard_counts_only_todays_check_ins() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shell.db");
    let store = sqlite_store(&db_path);
    let now = clock().now().with_timezone(&Utc);
    store
        .put(&[
            Attendance {
                id: "a_yesterday".to_string(),
                member_id: Some("m_1".to_string()),
                checked_in_at: now - Duration::days(1),
                method: "kiosk".to_string(),
            },
            Attendance {
                id: "a_today".to_string(),
                member_id: None,
                checked_in_at: now,
                method: "kiosk".to_string(),
            },
        ])
        .unwrap();
    drop(store);

    let mut app = app_at(&db_path, dir.path());
    app.start("#/");
    assert_eq!(stat_value(&app, "attendance-count"), "1");

    app.on_location_change("#/attendance");
    let items = list_items(&app, "attendance-list");
    assert_eq!(items.len(), 1);
    assert!(items[0].title.starts_with("Guest"));
}

#[test]
fn check_in_matches_member_by_email() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/attendance");
    let target = app.store().get::<Member>()[0].clone();

    app.dispatch(UiAction::CheckIn {
        query: target.email.to_uppercase(),
    });

    let attendance = app.store().get::<Attendance>();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].member_id.as_deref(), Some(target.id.as_str()));
    assert!(list_items(&app, "attendance-list")[0]
        .title
        .starts_with(&target.full_name()));
}

#[test]
fn member_added_through_modal_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shell.db");
    let mut app = app_at(&db_path, dir.path());
    app.start("#/members");
    let seeded = Member::seed(clock().now().with_timezone(&Utc));
    let before = app.store().get::<Member>().len();
    assert_eq!(before, seeded.len());

    app.dispatch(UiAction::OpenCreate);
    app.dispatch(UiAction::SaveModal {
        values: FormValues::new()
            .with("first_name", "Ruth")
            .with("last_name", "Okafor")
            .with("email", "ruth@example.com"),
    });
    drop(app);

    let mut restarted = app_at(&db_path, dir.path());
    restarted.start("#/members");
    let members = restarted.store().get::<Member>();
    assert_eq!(members.len(), before + 1);
    assert_eq!(members[..before], seeded[..]);
    let added = members.last().unwrap();
    assert!(added.id.starts_with("m_"));
    assert_eq!(added.full_name(), "Ruth Okafor");
    assert_eq!(list_items(&restarted, "members-list").len(), before + 1);
}

#[test]
fn unknown_event_id_renders_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/event/nope");

    assert_eq!(app.current_view(), ViewId::EventDetail);
    assert_eq!(
        app.screen().blocks,
        vec![Block::Placeholder {
            message: "Event not found".to_string()
        }]
    );
}

#[test]
fn reference_page_body_is_extracted_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("member_directory.html"),
        "<html><head><title>x</title></head><body class=\"p\"><h1>Directory</h1></body></html>",
    )
    .unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());
    app.start("#/reference/member_directory");

    assert!(app.pending_fetch().is_some());
    assert!(app.settle_pending_fetch());
    assert_eq!(
        app.screen().blocks,
        vec![Block::Markup {
            html: "<h1>Directory</h1>".to_string()
        }]
    );
}

#[test]
fn late_reference_load_does_not_overwrite_newer_view() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("slow.html"), "<body>slow</body>").unwrap();
    let mut app = app_at(&dir.path().join("shell.db"), dir.path());

    app.start("#/ref/slow");
    let ticket = app.pending_fetch().cloned().unwrap();
    app.on_location_change("#/groups");

    assert!(!app.complete_fetch(&ticket, Ok("slow".to_string())));
    assert_eq!(app.current_view(), ViewId::Groups);
    assert!(app.pending_fetch().is_none());
}
