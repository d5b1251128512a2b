//! Generic CRUD screen.
//!
//! Every list screen in the console — the fourteen masters plus users and
//! roles — is the same machine: a paginated list fetch, a search box that
//! refetches, a create/edit dialog, a view-only dialog and a delete
//! confirmation. The per-entity differences (endpoint, form fields, table
//! columns) are pure data on [`CrudResource`]; this module holds the one
//! parameterized implementation.

use crate::api::{ApiClient, Method, Page};
use crate::error::Result;
use crate::form::{FieldKind, FormDescriptor, FormMode, SelectOption, ViewDescriptor};
use serde_json::Value;

/// How an endpoint expects writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    /// Master-data convention: everything is a POST to the collection.
    /// No `id` creates, an `id` updates, `{id, delete: true}` soft-deletes.
    MasterPost,
    /// Plain REST: POST creates, PUT `<id>/` updates, DELETE `<id>/`.
    Rest,
}

/// One table column of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
    /// Relative width weight for layout.
    pub width: u16,
}

impl Column {
    pub fn new(key: &str, label: &str, width: u16) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            width,
        }
    }
}

/// A select field whose options come from another endpoint's records.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpec {
    /// Form field to populate.
    pub field: String,
    /// List endpoint providing the options.
    pub endpoint: String,
    /// Record key used as the option label.
    pub label_key: String,
}

/// Everything that distinguishes one CRUD screen from another.
#[derive(Debug, Clone)]
pub struct CrudResource {
    /// Stable key, also the final segment of the screen's route.
    pub key: &'static str,
    pub title: String,
    pub endpoint: String,
    pub style: EndpointStyle,
    pub form: FormDescriptor,
    pub view: ViewDescriptor,
    pub columns: Vec<Column>,
    pub relations: Vec<RelationSpec>,
}

/// A planned write request, separated from execution so the routing rules
/// are testable without a server.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePlan {
    pub method: Method,
    pub endpoint: String,
    pub body: Value,
}

/// Decide how a create-or-update payload reaches the wire.
pub fn plan_submit(resource: &CrudResource, mode: FormMode, payload: Value) -> WritePlan {
    match (resource.style, mode) {
        (EndpointStyle::MasterPost, _) => WritePlan {
            method: Method::Post,
            endpoint: resource.endpoint.clone(),
            body: payload,
        },
        (EndpointStyle::Rest, FormMode::Create) => WritePlan {
            method: Method::Post,
            endpoint: resource.endpoint.clone(),
            body: payload,
        },
        (EndpointStyle::Rest, FormMode::Edit) => {
            let id = payload.get("id").cloned().unwrap_or(Value::Null);
            WritePlan {
                method: Method::Put,
                endpoint: format!("{}{}/", resource.endpoint, id_segment(&id)),
                body: payload,
            }
        }
    }
}

/// Decide how a delete reaches the wire.
pub fn plan_delete(resource: &CrudResource, id: &Value) -> WritePlan {
    match resource.style {
        EndpointStyle::MasterPost => WritePlan {
            method: Method::Post,
            endpoint: resource.endpoint.clone(),
            body: serde_json::json!({ "id": id, "delete": true }),
        },
        EndpointStyle::Rest => WritePlan {
            method: Method::Delete,
            endpoint: format!("{}{}/", resource.endpoint, id_segment(id)),
            body: Value::Null,
        },
    }
}

fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Live state of one list screen.
#[derive(Debug)]
pub struct CrudScreen {
    pub resource: CrudResource,
    items: Vec<Value>,
    total_count: u64,
    /// Zero-based page index; the wire is one-based.
    current_page: u32,
    page_size: u32,
    search_text: String,
    loading: bool,
    selected: usize,
    /// Monotonic load generation. The blocking client cannot interleave
    /// responses today, but pages carry their generation so a stale one
    /// is dropped if the client ever goes async.
    load_seq: u64,
    applied_seq: u64,
}

impl CrudScreen {
    pub fn new(resource: CrudResource, page_size: u32) -> Self {
        Self {
            resource,
            items: Vec::new(),
            total_count: 0,
            current_page: 0,
            page_size,
            search_text: String::new(),
            loading: false,
            selected: 0,
            load_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn total_pages(&self) -> u32 {
        if self.total_count == 0 {
            1
        } else {
            ((self.total_count + self.page_size as u64 - 1) / self.page_size as u64) as u32
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Value> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Fetch one page and replace the list. The page index is zero-based.
    pub fn load(&mut self, api: &ApiClient, page: u32, search: &str) -> Result<()> {
        self.loading = true;
        self.load_seq += 1;
        let seq = self.load_seq;
        let result = api.get_page(&self.resource.endpoint, page + 1, search);
        self.loading = false;
        let fetched = result?;
        self.apply_page(seq, page, search, fetched);
        Ok(())
    }

    /// Install fetched results, unless a newer load has already landed.
    fn apply_page(&mut self, seq: u64, page: u32, search: &str, fetched: Page) {
        if seq < self.applied_seq {
            return;
        }
        self.applied_seq = seq;
        self.items = fetched.items;
        self.total_count = fetched.total_count;
        self.current_page = page;
        self.search_text = search.to_string();
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    /// Refetch the page currently shown.
    pub fn reload(&mut self, api: &ApiClient) -> Result<()> {
        let page = self.current_page;
        let search = self.search_text.clone();
        self.load(api, page, &search)
    }

    /// Apply a new search, restarting at the first page.
    pub fn search(&mut self, api: &ApiClient, text: &str) -> Result<()> {
        self.load(api, 0, text)
    }

    pub fn next_page(&mut self, api: &ApiClient) -> Result<()> {
        if self.current_page + 1 < self.total_pages() {
            let page = self.current_page + 1;
            let search = self.search_text.clone();
            self.load(api, page, &search)?;
        }
        Ok(())
    }

    pub fn prev_page(&mut self, api: &ApiClient) -> Result<()> {
        if self.current_page > 0 {
            let page = self.current_page - 1;
            let search = self.search_text.clone();
            self.load(api, page, &search)?;
        }
        Ok(())
    }

    /// Create or update, then refetch the current page.
    pub fn submit(&mut self, api: &ApiClient, mode: FormMode, payload: Value) -> Result<()> {
        let plan = plan_submit(&self.resource, mode, payload);
        self.execute(api, plan)?;
        self.reload(api)
    }

    /// Delete the record with the given id, then refetch.
    pub fn delete(&mut self, api: &ApiClient, id: &Value) -> Result<()> {
        let plan = plan_delete(&self.resource, id);
        self.execute(api, plan)?;
        self.reload(api)
    }

    fn execute(&self, api: &ApiClient, plan: WritePlan) -> Result<()> {
        match plan.method {
            Method::Post => api.post(&plan.endpoint, &plan.body)?,
            Method::Put => api.put(&plan.endpoint, &plan.body)?,
            Method::Delete => api.delete(&plan.endpoint)?,
            Method::Get => api.get(&plan.endpoint)?,
        };
        Ok(())
    }

    /// Build the form for a dialog, resolving relation selects against
    /// their endpoints (e.g. the vessel form's command dropdown).
    pub fn build_form(&self, api: &ApiClient) -> Result<FormDescriptor> {
        let mut form = self.resource.form.clone();
        for relation in &self.resource.relations {
            let page = api.get_page(&relation.endpoint, 1, "")?;
            let options: Vec<SelectOption> = page
                .items
                .iter()
                .filter_map(|record| {
                    let label = record.get(&relation.label_key)?.as_str()?.to_string();
                    let id = record.get("id")?.clone();
                    Some(SelectOption { label, value: id })
                })
                .collect();
            for field in &mut form.fields {
                if field.name == relation.field {
                    field.kind = FieldKind::Select { options: options.clone() };
                }
            }
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ViewDescriptor;
    use serde_json::json;

    fn resource(style: EndpointStyle) -> CrudResource {
        CrudResource {
            key: "units",
            title: "Units".to_string(),
            endpoint: "master/units/".to_string(),
            style,
            form: FormDescriptor::new("Unit", "Manage unit information"),
            view: ViewDescriptor::new("Unit Details", "View unit information"),
            columns: vec![Column::new("name", "Name", 2)],
            relations: Vec::new(),
        }
    }

    fn page(ids: &[u64], total: u64) -> Page {
        Page {
            items: ids.iter().map(|i| json!({"id": i})).collect(),
            total_count: total,
        }
    }

    #[test]
    fn test_master_create_and_update_are_collection_posts() {
        let res = resource(EndpointStyle::MasterPost);
        let create = plan_submit(&res, FormMode::Create, json!({"name": "DNA"}));
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.endpoint, "master/units/");

        let update = plan_submit(&res, FormMode::Edit, json!({"id": 3, "name": "DNA"}));
        assert_eq!(update.method, Method::Post);
        assert_eq!(update.endpoint, "master/units/");
        assert_eq!(update.body.get("id"), Some(&json!(3)));
    }

    #[test]
    fn test_master_delete_is_soft() {
        let res = resource(EndpointStyle::MasterPost);
        let plan = plan_delete(&res, &json!(9));
        assert_eq!(plan.method, Method::Post);
        assert_eq!(plan.endpoint, "master/units/");
        assert_eq!(plan.body, json!({"id": 9, "delete": true}));
    }

    #[test]
    fn test_rest_update_and_delete_target_the_record() {
        let res = CrudResource {
            endpoint: "api/auth/users/".to_string(),
            ..resource(EndpointStyle::Rest)
        };
        let update = plan_submit(&res, FormMode::Edit, json!({"id": 12, "email": "x@navy.mil"}));
        assert_eq!(update.method, Method::Put);
        assert_eq!(update.endpoint, "api/auth/users/12/");

        let delete = plan_delete(&res, &json!(12));
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.endpoint, "api/auth/users/12/");
        assert_eq!(delete.body, Value::Null);
    }

    #[test]
    fn test_rest_create_posts_collection() {
        let res = CrudResource {
            endpoint: "access/user-roles/".to_string(),
            ..resource(EndpointStyle::Rest)
        };
        let create = plan_submit(&res, FormMode::Create, json!({"name": "Reviewer"}));
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.endpoint, "access/user-roles/");
    }

    #[test]
    fn test_apply_page_replaces_items_and_count() {
        let mut screen = CrudScreen::new(resource(EndpointStyle::MasterPost), 10);
        screen.apply_page(1, 0, "", page(&[1, 2, 3], 30));
        assert_eq!(screen.items().len(), 3);
        assert_eq!(screen.total_count(), 30);
        assert_eq!(screen.total_pages(), 3);
        assert_eq!(screen.current_page(), 0);
    }

    #[test]
    fn test_apply_page_drops_stale_generation() {
        let mut screen = CrudScreen::new(resource(EndpointStyle::MasterPost), 10);
        screen.apply_page(2, 1, "vik", page(&[5, 6], 12));
        // A response from an older request must not overwrite newer data.
        screen.apply_page(1, 0, "", page(&[1], 1));
        assert_eq!(screen.items().len(), 2);
        assert_eq!(screen.current_page(), 1);
        assert_eq!(screen.search_text(), "vik");
    }

    #[test]
    fn test_selection_clamps_to_shrunk_page() {
        let mut screen = CrudScreen::new(resource(EndpointStyle::MasterPost), 10);
        screen.apply_page(1, 0, "", page(&[1, 2, 3], 3));
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_index(), 2);
        screen.apply_page(2, 0, "", page(&[1], 1));
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut screen = CrudScreen::new(resource(EndpointStyle::MasterPost), 10);
        screen.apply_page(1, 0, "", page(&[1, 2], 2));
        screen.select_prev();
        assert_eq!(screen.selected_index(), 0);
        screen.select_next();
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_index(), 1);
    }

    #[test]
    fn test_total_pages_empty_list() {
        let screen = CrudScreen::new(resource(EndpointStyle::MasterPost), 10);
        assert_eq!(screen.total_pages(), 1);
    }
}
