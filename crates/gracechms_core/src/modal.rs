//! Single transient overlay shared by the create and detail flows.
//!
//! # Invariants
//! - At most one modal is open; `open` while open replaces the content.
//! - `close` drops the save handler together with the content.
//! - Save input is not validated for text fields; blanks persist as `""`.

use crate::id::IdGenerator;
use crate::store::{Store, StoreResult};
use crate::view::{events, groups, members, volunteers, FormSpec, FormValues};
use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::Serialize;

/// Overlay content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modal {
    Form { form: FormSpec },
    /// Read-only record view; `rows` are label/value pairs.
    Detail {
        title: String,
        rows: Vec<(String, String)>,
    },
}

/// Collection append performed when a modal form is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveHandler {
    AddMember,
    NewEvent,
    NewGroup,
    AddVolunteer,
}

/// Result of applying a save handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Record appended; carries the new id.
    Saved(String),
    /// Input refused; the modal stays open and the message is shown.
    Rejected(String),
}

impl SaveHandler {
    pub fn apply(
        self,
        store: &Store,
        ids: &IdGenerator,
        values: &FormValues,
        now: DateTime<FixedOffset>,
    ) -> StoreResult<SaveOutcome> {
        match self {
            Self::AddMember => members::save_member(store, ids, values),
            Self::NewEvent => events::save_event(store, ids, values, now),
            Self::NewGroup => groups::save_group(store, ids, values),
            Self::AddVolunteer => volunteers::save_volunteer(store, ids, values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenModal {
    content: Modal,
    on_save: Option<SaveHandler>,
}

#[derive(Debug, Default)]
pub struct ModalController {
    open: Option<OpenModal>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `content`, replacing whatever was open.
    pub fn open(&mut self, content: Modal, on_save: Option<SaveHandler>) {
        if self.open.is_some() {
            debug!("event=modal_open module=modal status=replaced");
        }
        self.open = Some(OpenModal { content, on_save });
    }

    /// Hides the overlay and detaches its save handler.
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&Modal> {
        self.open.as_ref().map(|open| &open.content)
    }

    pub fn save_handler(&self) -> Option<SaveHandler> {
        self.open.as_ref().and_then(|open| open.on_save)
    }
}
