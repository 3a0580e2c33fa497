//! Declarative navigation tree and its per-role filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Role;

/// One entry of the main navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavLink>,
    /// Roles allowed to see this link. `None` means unrestricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<Role>>,
}

impl NavLink {
    pub fn new(title: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            route: Some(route.into()),
            children: Vec::new(),
            roles: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn child(mut self, link: NavLink) -> Self {
        self.children.push(link);
        self
    }

    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.as_ref().is_none_or(|allowed| allowed.contains(&role))
    }
}

/// Keep the links (and, recursively, the children) visible to `role`.
///
/// A hidden parent hides its whole subtree. An absent role sees nothing.
pub fn filter_nav_links(role: Option<Role>, links: &[NavLink]) -> Vec<NavLink> {
    let Some(role) = role else {
        return Vec::new();
    };
    filter_for(role, links)
}

fn filter_for(role: Role, links: &[NavLink]) -> Vec<NavLink> {
    links
        .iter()
        .filter(|link| link.is_visible_to(role))
        .map(|link| NavLink {
            children: filter_for(role, &link.children),
            ..link.clone()
        })
        .collect()
}

/// The application's main menu.
pub fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Dashboard", "/app/dashboard")
            .icon("home-outline")
            .roles(Role::ALL),
        NavLink::new("Buildings", "/app/buildings")
            .icon("business-outline")
            .roles([Role::Admin, Role::Professor]),
        NavLink::new("Classrooms", "/app/classrooms")
            .icon("cube-outline")
            .roles([Role::Admin, Role::Professor]),
        NavLink::new("Reservations", "/app/reservations")
            .icon("calendar-outline")
            .roles(Role::ALL),
        NavLink::new("Users", "/app/users")
            .icon("people-outline")
            .roles([Role::Admin]),
    ]
}
