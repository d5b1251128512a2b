//! Static route tables.
//!
//! The console's navigation is driven by three tables, mirroring the
//! web shell's component map: path → screen, path → title, and the menu
//! item lists for the sidebar and the in-page section strips.

use crate::masters::MasterEntity;

/// Presentational icon reference. Registry and navigation logic never
/// inspect it; the renderer maps it to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Shield,
    MapPin,
    Building,
    Wrench,
    Ship,
    AlertTriangle,
    Cpu,
    HardDrive,
    AlertOctagon,
    PlayCircle,
    Package,
    Box,
    Layers,
    Users,
    UserCheck,
    Gauge,
    Anchor,
    Clipboard,
    Wind,
    Pen,
    FileText,
    /// Factory default for tabs synthesized from a raw URL change.
    Placeholder,
}

impl Icon {
    /// Single-cell glyph for the tab strip and sidebar.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Shield => "⛨",
            Icon::MapPin => "◎",
            Icon::Building => "⌂",
            Icon::Wrench => "🔧",
            Icon::Ship => "⚓",
            Icon::AlertTriangle => "⚠",
            Icon::Cpu => "▦",
            Icon::HardDrive => "▤",
            Icon::AlertOctagon => "⛔",
            Icon::PlayCircle => "▶",
            Icon::Package => "▣",
            Icon::Box => "□",
            Icon::Layers => "≡",
            Icon::Users => "👥",
            Icon::UserCheck => "✓",
            Icon::Gauge => "◔",
            Icon::Anchor => "⚓",
            Icon::Clipboard => "📋",
            Icon::Wind => "≋",
            Icon::Pen => "✎",
            Icon::FileText => "▭",
            Icon::Placeholder => "·",
        }
    }
}

/// What a route renders in the main content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    DockyardPlans,
    Surveys,
    HvacTrial,
    Drawing,
    Reports,
    Master(MasterEntity),
    ManageUsers,
    ManageRoles,
}

/// One clickable destination in the sidebar or a section strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub url: &'static str,
    pub icon: Icon,
}

/// Top-level sidebar destinations.
pub const SIDEBAR_ITEMS: [MenuItem; 8] = [
    MenuItem {
        title: "Dashboard",
        url: "/dashboards",
        icon: Icon::Gauge,
    },
    MenuItem {
        title: "Dockyard Plans",
        url: "/dockyard-plans",
        icon: Icon::Anchor,
    },
    MenuItem {
        title: "Quarterly Hull Survey",
        url: "/surveys",
        icon: Icon::Clipboard,
    },
    MenuItem {
        title: "HVAC Trial",
        url: "/hvac-trial",
        icon: Icon::Wind,
    },
    MenuItem {
        title: "Interactive Drawing",
        url: "/drawing",
        icon: Icon::Pen,
    },
    MenuItem {
        title: "Reports",
        url: "/reports",
        icon: Icon::FileText,
    },
    MenuItem {
        title: "Global Masters",
        url: "/masters/units",
        icon: Icon::Shield,
    },
    MenuItem {
        title: "Users & Roles",
        url: "/users/manage-users",
        icon: Icon::Users,
    },
];

/// Section strip shown on every `/masters/*` screen.
pub const MASTER_SECTION_ITEMS: [MenuItem; 14] = [
    MenuItem {
        title: "Units",
        url: "/masters/units",
        icon: Icon::Shield,
    },
    MenuItem {
        title: "Commands",
        url: "/masters/commands",
        icon: Icon::MapPin,
    },
    MenuItem {
        title: "Dockyards",
        url: "/masters/dockyards",
        icon: Icon::Building,
    },
    MenuItem {
        title: "Vessel Types",
        url: "/masters/vessel-types",
        icon: Icon::Wrench,
    },
    MenuItem {
        title: "Class of Vessels",
        url: "/masters/class-of-vessels",
        icon: Icon::Ship,
    },
    MenuItem {
        title: "Vessels",
        url: "/masters/vessels",
        icon: Icon::Ship,
    },
    MenuItem {
        title: "Damage Types",
        url: "/masters/damage-types",
        icon: Icon::AlertTriangle,
    },
    MenuItem {
        title: "Systems",
        url: "/masters/systems",
        icon: Icon::Cpu,
    },
    MenuItem {
        title: "Equipments",
        url: "/masters/equipments",
        icon: Icon::HardDrive,
    },
    MenuItem {
        title: "Severities",
        url: "/masters/severities",
        icon: Icon::AlertOctagon,
    },
    MenuItem {
        title: "Operational Status",
        url: "/masters/operationalstatuses",
        icon: Icon::PlayCircle,
    },
    MenuItem {
        title: "Compartments",
        url: "/masters/compartments",
        icon: Icon::Package,
    },
    MenuItem {
        title: "Modules",
        url: "/masters/modules",
        icon: Icon::Box,
    },
    MenuItem {
        title: "Sub-Modules",
        url: "/masters/sub-modules",
        icon: Icon::Layers,
    },
];

/// Section strip shown on every `/users/*` screen.
pub const USERS_SECTION_ITEMS: [MenuItem; 2] = [
    MenuItem {
        title: "Manage Users",
        url: "/users/manage-users",
        icon: Icon::Users,
    },
    MenuItem {
        title: "Manage Roles",
        url: "/users/manage-roles",
        icon: Icon::UserCheck,
    },
];

/// Resolve a path against the static path → screen map. `None` means the
/// route is unknown and renders the not-found view.
pub fn resolve_screen(path: &str) -> Option<Screen> {
    match path {
        "/dashboards" => Some(Screen::Dashboard),
        "/dockyard-plans" => Some(Screen::DockyardPlans),
        "/surveys" => Some(Screen::Surveys),
        "/hvac-trial" => Some(Screen::HvacTrial),
        "/drawing" => Some(Screen::Drawing),
        "/reports" => Some(Screen::Reports),
        "/users/manage-users" => Some(Screen::ManageUsers),
        "/users/manage-roles" => Some(Screen::ManageRoles),
        _ => {
            let slug = path.strip_prefix("/masters/")?;
            MasterEntity::from_slug(slug).map(Screen::Master)
        }
    }
}

/// Title for a path, falling back to the last URL segment when the path
/// has no entry in the static table.
pub fn title_for_path(path: &str) -> String {
    let known = match path {
        "/dashboards" => Some("Dashboard"),
        "/dockyard-plans" => Some("Dockyard Plans"),
        "/surveys" => Some("Quarterly Hull Survey"),
        "/reports" => Some("Reports"),
        "/hvac-trial" => Some("HVAC Trial"),
        "/drawing" => Some("Interactive Drawing"),
        "/users/manage-users" => Some("Manage Users"),
        "/users/manage-roles" => Some("Manage Roles"),
        _ => path
            .strip_prefix("/masters/")
            .and_then(MasterEntity::from_slug)
            .map(|e| e.title()),
    };
    match known {
        Some(title) => title.to_string(),
        None => path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("Page")
            .to_string(),
    }
}

/// Icon for a tab synthesized from a raw URL change (browser
/// back/forward or a deep link). The web shell used a placeholder factory
/// here rather than looking the real icon up; preserved.
pub fn icon_for_path(_path: &str) -> Icon {
    Icon::Placeholder
}

/// Last path segment, used to key section strips.
pub fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sidebar_item_resolves() {
        for item in SIDEBAR_ITEMS {
            assert!(
                resolve_screen(item.url).is_some(),
                "sidebar route {} does not resolve",
                item.url
            );
        }
    }

    #[test]
    fn test_every_section_item_resolves() {
        for item in MASTER_SECTION_ITEMS.iter().chain(USERS_SECTION_ITEMS.iter()) {
            assert!(
                resolve_screen(item.url).is_some(),
                "section route {} does not resolve",
                item.url
            );
        }
    }

    #[test]
    fn test_all_masters_have_routes() {
        for entity in MasterEntity::ALL {
            let path = format!("/masters/{}", entity.slug());
            assert_eq!(resolve_screen(&path), Some(Screen::Master(entity)));
        }
    }

    #[test]
    fn test_unknown_paths_do_not_resolve() {
        assert_eq!(resolve_screen("/unknown"), None);
        assert_eq!(resolve_screen("/masters/frigates"), None);
        assert_eq!(resolve_screen("/"), None);
        assert_eq!(resolve_screen(""), None);
    }

    #[test]
    fn test_title_lookup_and_fallback() {
        assert_eq!(title_for_path("/masters/units"), "Units");
        assert_eq!(title_for_path("/surveys"), "Quarterly Hull Survey");
        assert_eq!(title_for_path("/masters/operationalstatuses"), "Operational Status");
        // Unknown paths fall back to the last segment.
        assert_eq!(title_for_path("/some/strange/route"), "route");
        assert_eq!(title_for_path("/"), "Page");
    }

    #[test]
    fn test_final_segment() {
        assert_eq!(final_segment("/masters/sub-modules"), "sub-modules");
        assert_eq!(final_segment("/users/manage-roles"), "manage-roles");
        assert_eq!(final_segment(""), "");
    }

    #[test]
    fn test_synthesized_icon_is_placeholder() {
        assert_eq!(icon_for_path("/masters/units"), Icon::Placeholder);
    }
}
