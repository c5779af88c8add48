//! Location-fragment routing.
//!
//! # Responsibility
//! - Map a location fragment to a view id plus parameters.
//!
//! # Invariants
//! - Resolution is a pure function of the input string.
//! - `/` matches only on equality; every other route matches by prefix, in
//!   the fixed table order below. `/event/<id>` is checked before `/events`.
//! - Unmatched locations fall back to the dashboard; routing never fails.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference page shown for `/online-giving`.
pub const ONLINE_GIVING_REFERENCE: &str = "online_giving_portal_member";

/// Identifier of a registered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Dashboard,
    Members,
    Attendance,
    EventDetail,
    Events,
    Groups,
    Volunteers,
    Service,
    Reports,
    Giving,
    Profile,
    Kiosk,
    Login,
    Settings,
    Backgrounds,
    Reference,
}

/// Named parameters extracted from the location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams(BTreeMap<&'static str, String>);

impl RouteParams {
    fn with(name: &'static str, value: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert(name, value.into());
        Self(params)
    }

    /// Returns the parameter value, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// Result of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub view: ViewId,
    pub params: RouteParams,
}

impl Resolved {
    fn bare(view: ViewId) -> Self {
        Self {
            view,
            params: RouteParams::default(),
        }
    }

    /// Canonical location that resolves back to `self`.
    pub fn path(&self) -> String {
        let fixed = match self.view {
            ViewId::Dashboard => "/",
            ViewId::Members => "/members",
            ViewId::Attendance => "/attendance",
            ViewId::EventDetail => return format!("/event/{}", self.params.get("id")),
            ViewId::Events => "/events",
            ViewId::Groups => "/groups",
            ViewId::Volunteers => "/volunteers",
            ViewId::Service => "/service",
            ViewId::Reports => "/reports",
            ViewId::Giving => "/giving",
            ViewId::Profile => "/profile",
            ViewId::Kiosk => "/kiosk",
            ViewId::Login => "/login",
            ViewId::Settings => "/settings",
            ViewId::Backgrounds => "/backgrounds",
            ViewId::Reference => return format!("/reference/{}", self.params.get("name")),
        };
        fixed.to_string()
    }
}

/// What a matched prefix resolves to.
#[derive(Debug, Clone, Copy)]
enum Target {
    View(ViewId),
    /// View whose named parameter is the remainder after the prefix.
    Remainder(ViewId, &'static str),
    /// Reference page with a fixed name.
    FixedReference(&'static str),
}

/// Route table in matching order; `/` is handled before it.
const ROUTE_TABLE: &[(&str, Target)] = &[
    ("/members", Target::View(ViewId::Members)),
    ("/attendance", Target::View(ViewId::Attendance)),
    ("/event/", Target::Remainder(ViewId::EventDetail, "id")),
    ("/events", Target::View(ViewId::Events)),
    ("/groups", Target::View(ViewId::Groups)),
    ("/volunteers", Target::View(ViewId::Volunteers)),
    ("/service", Target::View(ViewId::Service)),
    ("/reports", Target::View(ViewId::Reports)),
    ("/giving", Target::View(ViewId::Giving)),
    ("/profile", Target::View(ViewId::Profile)),
    ("/kiosk", Target::View(ViewId::Kiosk)),
    ("/online-giving", Target::FixedReference(ONLINE_GIVING_REFERENCE)),
    ("/login", Target::View(ViewId::Login)),
    ("/settings", Target::View(ViewId::Settings)),
    ("/backgrounds", Target::View(ViewId::Backgrounds)),
    ("/reference/", Target::Remainder(ViewId::Reference, "name")),
    ("/ref/", Target::Remainder(ViewId::Reference, "name")),
];

/// Normalizes a raw location or hash into a route path.
///
/// Strips one leading `#`; empty input becomes `/`.
pub fn normalize_location(raw: &str) -> &str {
    let path = raw.strip_prefix('#').unwrap_or(raw);
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Resolves a location fragment to a view and its parameters.
pub fn resolve(location: &str) -> Resolved {
    let path = normalize_location(location);
    if path == "/" {
        return Resolved::bare(ViewId::Dashboard);
    }

    for (prefix, target) in ROUTE_TABLE {
        let Some(rest) = path.strip_prefix(prefix) else {
            continue;
        };
        return match *target {
            Target::View(view) => Resolved::bare(view),
            Target::Remainder(view, param) => Resolved {
                view,
                params: RouteParams::with(param, rest),
            },
            Target::FixedReference(name) => Resolved {
                view: ViewId::Reference,
                params: RouteParams::with("name", name),
            },
        };
    }

    Resolved::bare(ViewId::Dashboard)
}
