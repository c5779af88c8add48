//! Active-navigation marking.
//!
//! A link is active when its href equals the current location or is a prefix
//! of it. The root link `/` is active only on exact match, otherwise it would
//! prefix every location.

use crate::router::normalize_location;
use serde::Serialize;

/// Which menu a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavGroup {
    Main,
    /// Links inside the reference-pages dropdown.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub group: NavGroup,
    pub active: bool,
}

/// Navigation links plus the reference dropdown toggle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub links: Vec<NavLink>,
    /// True iff one of the reference dropdown links is active.
    pub reference_expanded: bool,
}

const MAIN_LINKS: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("Members", "/members"),
    ("Attendance", "/attendance"),
    ("Events", "/events"),
    ("Groups", "/groups"),
    ("Volunteers", "/volunteers"),
    ("Service", "/service"),
    ("Giving", "/giving"),
    ("Reports", "/reports"),
    ("Background Checks", "/backgrounds"),
    ("Settings", "/settings"),
];

const REFERENCE_LINKS: &[(&str, &str)] = &[
    ("Landing Page", "/reference/gracechms_landing_page"),
    ("Member Directory", "/reference/member_directory"),
    ("Attendance Admin", "/reference/attendance_tracking_admin"),
    ("Event Management", "/reference/event_creation_and_management"),
    ("Giving Reports", "/reference/giving_and_financial_reports"),
    ("Member Profile", "/reference/individual_member_profile"),
    ("Child Check-in Kiosk", "/reference/child_check_in_kiosk"),
    ("Online Giving", "/online-giving"),
];

impl Default for NavBar {
    fn default() -> Self {
        let links = MAIN_LINKS
            .iter()
            .map(|(label, href)| (label, href, NavGroup::Main))
            .chain(
                REFERENCE_LINKS
                    .iter()
                    .map(|(label, href)| (label, href, NavGroup::Reference)),
            )
            .map(|(label, href, group)| NavLink {
                label: label.to_string(),
                href: href.to_string(),
                group,
                active: false,
            })
            .collect();
        Self {
            links,
            reference_expanded: false,
        }
    }
}

impl NavBar {
    /// Recomputes every link's active flag for `location`.
    pub fn mark_active(&mut self, location: &str) {
        let location = normalize_location(location);
        for link in &mut self.links {
            link.active = is_link_active(&link.href, location);
        }
        self.reference_expanded = self
            .links
            .iter()
            .any(|link| link.group == NavGroup::Reference && link.active);
    }

    pub fn active_hrefs(&self) -> Vec<&str> {
        self.links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.href.as_str())
            .collect()
    }
}

/// Returns whether a link with `href` is active for `location`.
pub fn is_link_active(href: &str, location: &str) -> bool {
    let href = normalize_location(href);
    let location = normalize_location(location);
    if href == "/" {
        return location == "/";
    }
    location.starts_with(href)
}
