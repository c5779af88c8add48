//! View-model and render cycle building blocks.
//!
//! # Responsibility
//! - Describe what a view displays as a plain tree ([`Screen`] of [`Block`]s)
//!   plus the named actions it accepts.
//! - Carry interactions in ([`UiAction`]) and host side effects out
//!   ([`Effect`]).
//!
//! # Invariants
//! - Views read collections only through the [`Store`](crate::store::Store)
//!   and never write; the only write a render can cause is the store seeding
//!   an absent collection on first access.
//! - Every mutation is load, modify, put, re-render; there is no pending state.
//! - Hosts reconcile `Screen` with their display target; nothing here knows
//!   about DOM nodes.

pub mod attendance;
pub mod backgrounds;
pub mod dashboard;
pub mod events;
pub mod giving;
pub mod groups;
pub mod members;
pub mod pages;
pub mod reference;
pub mod registry;
pub mod reports;
pub mod volunteers;

use crate::id::IdGenerator;
use crate::modal::ModalController;
use crate::router::{RouteParams, ViewId};
use crate::store::Store;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendered output of one view invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub view: ViewId,
    pub title: String,
    pub blocks: Vec<Block>,
    pub actions: Vec<ActionSpec>,
    /// Reference page the host still has to load into this screen.
    #[serde(skip)]
    pub fetch: Option<String>,
}

impl Screen {
    pub fn new(view: ViewId, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            blocks: Vec::new(),
            actions: Vec::new(),
            fetch: None,
        }
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn action(mut self, kind: ActionKind, label: impl Into<String>) -> Self {
        self.actions.push(ActionSpec {
            kind,
            label: label.into(),
            arg: None,
        });
        self
    }

    /// Adds an action whose payload the host fills from `arg`.
    pub fn action_with(mut self, kind: ActionKind, label: impl Into<String>, arg: &str) -> Self {
        self.actions.push(ActionSpec {
            kind,
            label: label.into(),
            arg: Some(arg.to_string()),
        });
        self
    }

    /// Screen consisting of a single placeholder message.
    pub fn placeholder(view: ViewId, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(view, title).block(Block::Placeholder {
            message: message.into(),
        })
    }

    pub fn accepts(&self, kind: ActionKind) -> bool {
        self.actions.iter().any(|action| action.kind == kind)
    }
}

/// One display element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        text: String,
    },
    Text {
        text: String,
        muted: bool,
    },
    Stat {
        id: String,
        label: String,
        value: String,
    },
    /// Live filter input bound to [`UiAction::Filter`].
    Search {
        placeholder: String,
        query: String,
    },
    List {
        id: String,
        items: Vec<ListItem>,
    },
    Form {
        form: FormSpec,
    },
    /// Externally supplied markup spliced in verbatim.
    Markup {
        html: String,
    },
    Placeholder {
        message: String,
    },
}

impl Block {
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            muted: false,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            muted: true,
        }
    }

    pub fn stat(id: &str, label: &str, value: impl Into<String>) -> Self {
        Self::Stat {
            id: id.to_string(),
            label: label.to_string(),
            value: value.into(),
        }
    }

    pub fn search(placeholder: &str, query: &str) -> Self {
        Self::Search {
            placeholder: placeholder.to_string(),
            query: query.to_string(),
        }
    }

    pub fn list(id: &str, items: Vec<ListItem>) -> Self {
        Self::List {
            id: id.to_string(),
            items,
        }
    }
}

/// Row inside a [`Block::List`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Short weekday and day-of-month shown beside dated rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<(String, String)>,
    /// Location the row navigates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Record id passed to [`UiAction::ShowDetail`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ListItem {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn avatar(mut self, initials: impl Into<String>) -> Self {
        self.avatar = Some(initials.into());
        self
    }

    pub fn badge(mut self, badge: (String, String)) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn link(mut self, location: impl Into<String>) -> Self {
        self.link = Some(location.into());
        self
    }

    pub fn detail(mut self, record_id: impl Into<String>) -> Self {
        self.detail = Some(record_id.into());
        self
    }
}

/// Form description rendered inline or inside the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSpec {
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

impl FormSpec {
    pub fn new(title: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            submit_label: submit_label.into(),
        }
    }

    pub fn field(mut self, name: &str, label: &str, kind: FieldKind) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Password,
    Number,
    DateTimeLocal,
    TextArea,
}

/// Submitted form input keyed by field name.
///
/// Missing fields read as empty strings; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Names of the interactions a screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Filter,
    OpenCreate,
    ShowDetail,
    CheckIn,
    Donate,
    Register,
    NewServicePlan,
    KioskCheckIn,
    Login,
    ExportCsv,
    ImportCsv,
    ExportReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

/// Report downloads offered by the reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Attendance,
    Giving,
}

/// User interaction delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiAction {
    Filter { query: String },
    OpenCreate,
    ShowDetail { id: String },
    SaveModal { values: FormValues },
    CloseModal,
    CheckIn { query: String },
    Donate { values: FormValues },
    Register,
    NewServicePlan,
    KioskCheckIn,
    Login { values: FormValues },
    ExportCsv,
    ImportCsv { text: String },
    ExportReport { report: ReportKind },
}

impl UiAction {
    /// Screen action this interaction belongs to; `None` for modal controls.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::Filter { .. } => Some(ActionKind::Filter),
            Self::OpenCreate => Some(ActionKind::OpenCreate),
            Self::ShowDetail { .. } => Some(ActionKind::ShowDetail),
            Self::SaveModal { .. } | Self::CloseModal => None,
            Self::CheckIn { .. } => Some(ActionKind::CheckIn),
            Self::Donate { .. } => Some(ActionKind::Donate),
            Self::Register => Some(ActionKind::Register),
            Self::NewServicePlan => Some(ActionKind::NewServicePlan),
            Self::KioskCheckIn => Some(ActionKind::KioskCheckIn),
            Self::Login { .. } => Some(ActionKind::Login),
            Self::ExportCsv => Some(ActionKind::ExportCsv),
            Self::ImportCsv { .. } => Some(ActionKind::ImportCsv),
            Self::ExportReport { .. } => Some(ActionKind::ExportReport),
        }
    }
}

/// Side effect only the host can perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Alert {
        message: String,
    },
    Download {
        filename: String,
        mime: String,
        contents: String,
    },
    /// The controller already navigated; the host only updates its address.
    Navigate {
        path: String,
    },
}

impl Effect {
    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
        }
    }

    pub fn csv_download(filename: &str, contents: String) -> Self {
        Self::Download {
            filename: filename.to_string(),
            mime: "text/csv".to_string(),
            contents,
        }
    }
}

/// Transient per-render state; cleared on navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
}

/// Inputs available to a render function.
pub struct RenderContext<'a> {
    pub store: &'a Store,
    pub params: &'a RouteParams,
    pub state: &'a ViewState,
    pub now: DateTime<FixedOffset>,
}

/// Inputs available to an action handler.
pub struct ActionContext<'a> {
    pub store: &'a Store,
    pub ids: &'a IdGenerator,
    pub modal: &'a mut ModalController,
    pub state: &'a mut ViewState,
    pub params: &'a RouteParams,
    pub now: DateTime<FixedOffset>,
}

/// Case-insensitive substring match used by every live filter.
pub(crate) fn matches_query(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}
