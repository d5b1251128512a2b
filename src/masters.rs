//! Master-data catalog.
//!
//! The fourteen reference entities (units, commands, vessels, ...) plus
//! the user-administration screens are all the same generic CRUD screen;
//! what differs is captured here as data: endpoint, write style, form
//! descriptor, details view and table columns.

use crate::form::{FieldDescriptor, FormDescriptor, ViewDescriptor, ViewKind};
use crate::screen::{Column, CrudResource, EndpointStyle, RelationSpec};

/// The master-data entities administered under `/masters/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterEntity {
    Units,
    Commands,
    Dockyards,
    VesselTypes,
    ClassOfVessels,
    Vessels,
    DamageTypes,
    Systems,
    Equipments,
    Severities,
    OperationalStatuses,
    Compartments,
    Modules,
    SubModules,
}

impl MasterEntity {
    pub const ALL: [MasterEntity; 14] = [
        MasterEntity::Units,
        MasterEntity::Commands,
        MasterEntity::Dockyards,
        MasterEntity::VesselTypes,
        MasterEntity::ClassOfVessels,
        MasterEntity::Vessels,
        MasterEntity::DamageTypes,
        MasterEntity::Systems,
        MasterEntity::Equipments,
        MasterEntity::Severities,
        MasterEntity::OperationalStatuses,
        MasterEntity::Compartments,
        MasterEntity::Modules,
        MasterEntity::SubModules,
    ];

    /// Final route segment, e.g. `/masters/vessel-types`.
    pub fn slug(&self) -> &'static str {
        match self {
            MasterEntity::Units => "units",
            MasterEntity::Commands => "commands",
            MasterEntity::Dockyards => "dockyards",
            MasterEntity::VesselTypes => "vessel-types",
            MasterEntity::ClassOfVessels => "class-of-vessels",
            MasterEntity::Vessels => "vessels",
            MasterEntity::DamageTypes => "damage-types",
            MasterEntity::Systems => "systems",
            MasterEntity::Equipments => "equipments",
            MasterEntity::Severities => "severities",
            MasterEntity::OperationalStatuses => "operationalstatuses",
            MasterEntity::Compartments => "compartments",
            MasterEntity::Modules => "modules",
            MasterEntity::SubModules => "sub-modules",
        }
    }

    /// API collection name. The backend drops the hyphens the routes keep.
    fn api_slug(&self) -> String {
        self.slug().replace('-', "")
    }

    pub fn endpoint(&self) -> String {
        format!("master/{}/", self.api_slug())
    }

    pub fn title(&self) -> &'static str {
        match self {
            MasterEntity::Units => "Units",
            MasterEntity::Commands => "Commands",
            MasterEntity::Dockyards => "Dockyards",
            MasterEntity::VesselTypes => "Vessel Types",
            MasterEntity::ClassOfVessels => "Class of Vessels",
            MasterEntity::Vessels => "Vessels",
            MasterEntity::DamageTypes => "Damage Types",
            MasterEntity::Systems => "Systems",
            MasterEntity::Equipments => "Equipments",
            MasterEntity::Severities => "Severities",
            MasterEntity::OperationalStatuses => "Operational Status",
            MasterEntity::Compartments => "Compartments",
            MasterEntity::Modules => "Modules",
            MasterEntity::SubModules => "Sub-Modules",
        }
    }

    /// Singular label used in dialog titles.
    fn singular(&self) -> &'static str {
        match self {
            MasterEntity::Units => "Unit",
            MasterEntity::Commands => "Command",
            MasterEntity::Dockyards => "Dockyard",
            MasterEntity::VesselTypes => "Vessel Type",
            MasterEntity::ClassOfVessels => "Class of Vessel",
            MasterEntity::Vessels => "Vessel",
            MasterEntity::DamageTypes => "Damage Type",
            MasterEntity::Systems => "System",
            MasterEntity::Equipments => "Equipment",
            MasterEntity::Severities => "Severity",
            MasterEntity::OperationalStatuses => "Operational Status",
            MasterEntity::Compartments => "Compartment",
            MasterEntity::Modules => "Module",
            MasterEntity::SubModules => "Sub-Module",
        }
    }

    pub fn from_slug(slug: &str) -> Option<MasterEntity> {
        Self::ALL.into_iter().find(|e| e.slug() == slug)
    }

    /// Build the full screen definition for this entity.
    pub fn resource(&self) -> CrudResource {
        match self {
            MasterEntity::Vessels => self.vessel_resource(),
            _ => self.name_code_resource(),
        }
    }

    /// The common shape shared by almost every master: a name, an
    /// uppercase code and an active flag, with audit columns in the view.
    fn name_code_resource(&self) -> CrudResource {
        let singular = self.singular();
        let (name_min, name_max) = match self {
            MasterEntity::Commands => (3, 100),
            _ => (2, 50),
        };
        let form = FormDescriptor::new(singular, &format!("Manage {} information", singular.to_lowercase()))
            .section_order(&["Basic Information"])
            .field(
                FieldDescriptor::text("name", &format!("{singular} Name"))
                    .required()
                    .length(name_min, name_max)
                    .section("Basic Information")
                    .message(&format!(
                        "Name must be between {name_min}-{name_max} characters"
                    )),
            )
            .field(
                FieldDescriptor::text("code", &format!("{singular} Code"))
                    .required()
                    .pattern("^[A-Z0-9]+$")
                    .section("Basic Information")
                    .message("Code must be alphanumeric uppercase"),
            )
            .field(FieldDescriptor::checkbox("active", "Active Status").section("Basic Information"));

        let view = ViewDescriptor::new(
            &format!("{singular} Details"),
            &format!("View {} information", singular.to_lowercase()),
        )
        .field("name", &format!("{singular} Name"), ViewKind::Text)
        .field("code", &format!("{singular} Code"), ViewKind::Text)
        .field("active", "Active Status", ViewKind::Boolean)
        .field("created_on", "Created On", ViewKind::Date)
        .field("modified_on", "Modified On", ViewKind::Date)
        .section("Basic Information", &["name", "code", "active"])
        .section("Audit Information", &["created_on", "modified_on"]);

        CrudResource {
            key: self.slug(),
            title: self.title().to_string(),
            endpoint: self.endpoint(),
            style: EndpointStyle::MasterPost,
            form,
            view,
            columns: vec![
                Column::new("name", "Name", 3),
                Column::new("code", "Code", 2),
                Column::new("active", "Active", 1),
            ],
            relations: Vec::new(),
        }
    }

    /// Vessels reference four other masters; those fields render as
    /// selects whose options are fetched from the related endpoints.
    fn vessel_resource(&self) -> CrudResource {
        let form = FormDescriptor::new("Vessel", "Manage vessel information")
            .section_order(&["Basic Information", "Classification"])
            .field(
                FieldDescriptor::text("name", "Vessel Name")
                    .required()
                    .length(3, 100)
                    .placeholder("e.g., INS Vikrant")
                    .section("Basic Information"),
            )
            .field(
                FieldDescriptor::select("vesseltype", "Vessel Type", Vec::new())
                    .required()
                    .section("Classification"),
            )
            .field(
                FieldDescriptor::select("classofvessel", "Class of Vessel", Vec::new())
                    .required()
                    .section("Classification"),
            )
            .field(
                FieldDescriptor::select("yard", "Dockyard", Vec::new())
                    .required()
                    .section("Classification"),
            )
            .field(
                FieldDescriptor::select("command", "Command", Vec::new())
                    .required()
                    .section("Classification"),
            )
            .field(
                FieldDescriptor::text("year_of_build", "Year of Build")
                    .pattern(r"^\d{4}$")
                    .placeholder("e.g., 2013")
                    .section("Basic Information")
                    .message("Enter a four-digit year"),
            )
            .field(
                FieldDescriptor::text("year_of_delivery", "Year of Delivery")
                    .pattern(r"^\d{4}$")
                    .placeholder("e.g., 2022")
                    .section("Basic Information")
                    .message("Enter a four-digit year"),
            )
            .field(FieldDescriptor::checkbox("active", "Active Status").section("Basic Information"));

        let view = ViewDescriptor::new("Vessel Details", "View vessel information")
            .field("name", "Vessel Name", ViewKind::Text)
            .field("year_of_build", "Year of Build", ViewKind::Number)
            .field("year_of_delivery", "Year of Delivery", ViewKind::Number)
            .field("active", "Active Status", ViewKind::Boolean)
            .field("created_on", "Created On", ViewKind::Date)
            .field("modified_on", "Modified On", ViewKind::Date)
            .section(
                "Basic Information",
                &["name", "year_of_build", "year_of_delivery", "active"],
            )
            .section("Audit Information", &["created_on", "modified_on"]);

        CrudResource {
            key: self.slug(),
            title: self.title().to_string(),
            endpoint: self.endpoint(),
            style: EndpointStyle::MasterPost,
            form,
            view,
            columns: vec![
                Column::new("name", "Name", 3),
                Column::new("year_of_build", "Built", 1),
                Column::new("year_of_delivery", "Delivered", 1),
                Column::new("active", "Active", 1),
            ],
            relations: vec![
                RelationSpec {
                    field: "vesseltype".to_string(),
                    endpoint: "master/vesseltypes/".to_string(),
                    label_key: "name".to_string(),
                },
                RelationSpec {
                    field: "classofvessel".to_string(),
                    endpoint: "master/classofvessels/".to_string(),
                    label_key: "name".to_string(),
                },
                RelationSpec {
                    field: "yard".to_string(),
                    endpoint: "master/dockyards/".to_string(),
                    label_key: "name".to_string(),
                },
                RelationSpec {
                    field: "command".to_string(),
                    endpoint: "master/commands/".to_string(),
                    label_key: "name".to_string(),
                },
            ],
        }
    }
}

/// Screen definition for `api/auth/users/` (plain REST semantics).
pub fn users_resource() -> CrudResource {
    let form = FormDescriptor::new("User", "Manage user account")
        .section_order(&["Account", "Profile"])
        .field(
            FieldDescriptor::text("loginname", "Login Name")
                .required()
                .length(3, 50)
                .section("Account"),
        )
        .field(
            FieldDescriptor::text("password", "Password")
                .length(8, 128)
                .section("Account")
                .message("Password must be at least 8 characters"),
        )
        .field(FieldDescriptor::text("first_name", "First Name").section("Profile"))
        .field(FieldDescriptor::text("last_name", "Last Name").section("Profile"))
        .field(FieldDescriptor::email("email", "Email").section("Profile"))
        .field(FieldDescriptor::checkbox("is_active", "Active").section("Account"));

    let view = ViewDescriptor::new("User Details", "View user account")
        .field("loginname", "Login Name", ViewKind::Text)
        .field("first_name", "First Name", ViewKind::Text)
        .field("last_name", "Last Name", ViewKind::Text)
        .field("email", "Email", ViewKind::Text)
        .field("is_active", "Active", ViewKind::Boolean)
        .section(
            "Account",
            &["loginname", "email", "is_active"],
        )
        .section("Profile", &["first_name", "last_name"]);

    CrudResource {
        key: "manage-users",
        title: "Manage Users".to_string(),
        endpoint: "api/auth/users/".to_string(),
        style: EndpointStyle::Rest,
        form,
        view,
        columns: vec![
            Column::new("loginname", "Login", 2),
            Column::new("email", "Email", 3),
            Column::new("is_active", "Active", 1),
        ],
        relations: Vec::new(),
    }
}

/// Screen definition for `access/user-roles/` (plain REST semantics).
pub fn user_roles_resource() -> CrudResource {
    let form = FormDescriptor::new("Role", "Manage user role")
        .section_order(&["Basic Information"])
        .field(
            FieldDescriptor::text("name", "Role Name")
                .required()
                .length(2, 50)
                .section("Basic Information"),
        )
        .field(FieldDescriptor::textarea("description", "Description").section("Basic Information"))
        .field(FieldDescriptor::checkbox("active", "Active").section("Basic Information"));

    let view = ViewDescriptor::new("Role Details", "View user role")
        .field("name", "Role Name", ViewKind::Text)
        .field("description", "Description", ViewKind::Text)
        .field("active", "Active", ViewKind::Boolean)
        .section("Basic Information", &["name", "description", "active"]);

    CrudResource {
        key: "manage-roles",
        title: "Manage Roles".to_string(),
        endpoint: "access/user-roles/".to_string(),
        style: EndpointStyle::Rest,
        form,
        view,
        columns: vec![
            Column::new("name", "Name", 2),
            Column::new("description", "Description", 3),
            Column::new("active", "Active", 1),
        ],
        relations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_master_has_a_resource() {
        for entity in MasterEntity::ALL {
            let resource = entity.resource();
            assert_eq!(resource.key, entity.slug());
            assert!(resource.endpoint.starts_with("master/"));
            assert!(resource.endpoint.ends_with('/'));
            assert!(!resource.columns.is_empty());
            assert!(!resource.form.fields.is_empty());
        }
    }

    #[test]
    fn test_api_slug_drops_hyphens() {
        assert_eq!(MasterEntity::VesselTypes.endpoint(), "master/vesseltypes/");
        assert_eq!(MasterEntity::DamageTypes.endpoint(), "master/damagetypes/");
        assert_eq!(MasterEntity::SubModules.endpoint(), "master/submodules/");
        assert_eq!(
            MasterEntity::ClassOfVessels.endpoint(),
            "master/classofvessels/"
        );
        assert_eq!(MasterEntity::Units.endpoint(), "master/units/");
    }

    #[test]
    fn test_from_slug_roundtrip() {
        for entity in MasterEntity::ALL {
            assert_eq!(MasterEntity::from_slug(entity.slug()), Some(entity));
        }
        assert_eq!(MasterEntity::from_slug("frigates"), None);
    }

    #[test]
    fn test_vessel_resource_has_relations() {
        let resource = MasterEntity::Vessels.resource();
        let fields: Vec<&str> = resource.relations.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, ["vesseltype", "classofvessel", "yard", "command"]);
        for relation in &resource.relations {
            assert!(
                resource.form.fields.iter().any(|f| f.name == relation.field),
                "relation {} has no form field",
                relation.field
            );
        }
    }

    #[test]
    fn test_user_screens_are_rest_style() {
        assert_eq!(users_resource().style, EndpointStyle::Rest);
        assert_eq!(user_roles_resource().style, EndpointStyle::Rest);
        assert_eq!(users_resource().endpoint, "api/auth/users/");
        assert_eq!(user_roles_resource().endpoint, "access/user-roles/");
    }
}
