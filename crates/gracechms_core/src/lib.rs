//! Core engine for the GraceCHMS church-management shell.
//! Hosts drive [`AppController`] and draw the [`Screen`]s it produces.

pub mod app;
pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod id;
pub mod logging;
pub mod modal;
pub mod model;
pub mod nav;
pub mod reference;
pub mod repo;
pub mod router;
pub mod store;
pub mod view;

pub use app::{AppController, FetchTicket, ShellView};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use config::ShellConfig;
pub use id::IdGenerator;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use modal::{Modal, ModalController, SaveHandler, SaveOutcome};
pub use model::records::{
    Attendance, BackgroundCheck, Donation, Event, Group, Member, Volunteer,
};
pub use nav::{NavBar, NavGroup, NavLink};
pub use reference::{DirectoryReferenceLoader, ReferenceError, ReferenceLoader};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use router::{resolve, Resolved, RouteParams, ViewId};
pub use store::{Store, StoreError, StoreResult};
pub use view::{Effect, Screen, UiAction};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
