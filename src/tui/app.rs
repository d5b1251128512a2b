//! Console application state.
//!
//! `ConsoleApp` holds everything the renderer needs: the session, the tab
//! registry, the current path, per-route CRUD screen state, any open
//! dialog and the toast queue. Input handlers in `mod.rs` mutate it; the
//! rendering code in `ui.rs` only reads it.

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::dashboard::Period;
use crate::error::{HullError, Result};
use crate::form::{FieldDescriptor, FormDescriptor, FormMode, FormState};
use crate::masters;
use crate::nav::{self, ContentView, RouteOutcome};
use crate::routes::{Screen, SIDEBAR_ITEMS};
use crate::screen::CrudScreen;
use crate::session::SessionStore;
use crate::tabs::TabRegistry;
use crate::toast::ToastQueue;
use serde_json::Value;
use std::collections::HashMap;

/// Whether the console shows the login screen or the authenticated shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Login,
    Shell,
}

/// Which pane owns plain navigation keys in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// A modal dialog stacked over the active screen.
#[derive(Debug)]
pub enum Overlay {
    /// Create/edit dialog driven by the form engine.
    Form(FormState),
    /// Read-only details dialog.
    View(Value),
    /// Delete confirmation for a record.
    ConfirmDelete(Value),
}

/// The login form is the same engine as every other dialog.
fn login_form() -> FormDescriptor {
    FormDescriptor::new("Sign In", "Hull Insight administrative console")
        .field(
            FieldDescriptor::text("loginname", "Login Name")
                .required()
                .placeholder("Enter your login name"),
        )
        .field(
            FieldDescriptor::text("password", "Password")
                .required()
                .placeholder("Enter your password"),
        )
}

pub struct ConsoleApp {
    pub config: AppConfig,
    pub session: SessionStore,
    pub api: ApiClient,
    pub mode: AppMode,
    pub registry: TabRegistry,
    pub current_path: String,
    pub focus: Focus,
    pub sidebar_index: usize,
    pub dashboard_period: Period,
    pub overlay: Option<Overlay>,
    pub toasts: ToastQueue,
    pub login: FormState,
    /// Live search input, present while the user is typing one.
    pub search_input: Option<String>,
    /// Per-route list state, created when a CRUD route first opens.
    screens: HashMap<String, CrudScreen>,
    should_exit: bool,
}

impl ConsoleApp {
    pub fn new(config: AppConfig, session: SessionStore) -> Self {
        let api = ApiClient::new(&config, session.auth());
        let mode = if session.is_authenticated() {
            AppMode::Shell
        } else {
            AppMode::Login
        };
        Self {
            config,
            session,
            api,
            mode,
            registry: TabRegistry::new(),
            current_path: "/".to_string(),
            focus: Focus::Sidebar,
            sidebar_index: 0,
            dashboard_period: Period::Monthly,
            overlay: None,
            toasts: ToastQueue::new(),
            login: FormState::create(login_form()),
            search_input: None,
            screens: HashMap::new(),
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    /// The view the content area renders right now.
    pub fn content_view(&self) -> ContentView {
        nav::resolve_view(&self.registry, &self.current_path)
    }

    pub fn screen_for(&self, path: &str) -> Option<&CrudScreen> {
        self.screens.get(path)
    }

    pub fn current_screen(&self) -> Option<&CrudScreen> {
        self.screens.get(&self.current_path)
    }

    fn current_screen_mut(&mut self) -> Option<&mut CrudScreen> {
        self.screens.get_mut(&self.current_path)
    }

    /// Navigate to a path: reconcile the registry, then make sure a CRUD
    /// route has loaded screen state.
    pub fn navigate(&mut self, path: &str) {
        self.current_path = path.to_string();
        let outcome = nav::sync_route(&mut self.registry, path);
        if matches!(outcome, RouteOutcome::Opened | RouteOutcome::Activated) {
            self.ensure_screen_loaded(path);
        }
        if let Some(i) = SIDEBAR_ITEMS.iter().position(|item| item.url == path) {
            self.sidebar_index = i;
        }
    }

    /// Create and load list state for a CRUD route the first time it is
    /// visited. A failed first load leaves an empty list and a toast, the
    /// screen itself still opens.
    fn ensure_screen_loaded(&mut self, path: &str) {
        if self.screens.contains_key(path) {
            return;
        }
        let resource = match crate::routes::resolve_screen(path) {
            Some(Screen::Master(entity)) => entity.resource(),
            Some(Screen::ManageUsers) => masters::users_resource(),
            Some(Screen::ManageRoles) => masters::user_roles_resource(),
            _ => return,
        };
        let mut screen = CrudScreen::new(resource, self.config.page_size);
        if let Err(e) = screen.load(&self.api, 0, "") {
            self.handle_failure(&format!("Failed to load {}", screen.resource.title), e);
        }
        self.screens.insert(path.to_string(), screen);
    }

    /// Close the active tab and land on whatever becomes active.
    pub fn close_active_tab(&mut self) {
        let active = self.registry.active_tab().to_string();
        if active.is_empty() {
            return;
        }
        self.registry.remove_tab(&active);
        self.current_path = if self.registry.active_tab().is_empty() {
            "/".to_string()
        } else {
            self.registry.active_tab().to_string()
        };
    }

    /// Activate the next open tab, wrapping.
    pub fn cycle_tab(&mut self, backwards: bool) {
        let tabs = self.registry.tabs();
        if tabs.is_empty() {
            return;
        }
        let len = tabs.len();
        let current = self.registry.active_index().unwrap_or(0);
        let next = if backwards {
            (current + len - 1) % len
        } else {
            (current + 1) % len
        };
        let url = tabs[next].url.clone();
        self.navigate(&url);
    }

    /// Move within the section strip of the current masters/users screen.
    pub fn cycle_section(&mut self, backwards: bool) {
        let ContentView::Screen {
            section: Some(strip),
            ..
        } = self.content_view()
        else {
            return;
        };
        let items = strip.items;
        let current = items
            .iter()
            .position(|i| crate::routes::final_segment(i.url) == strip.selected)
            .unwrap_or(0);
        let next = if backwards {
            (current + items.len() - 1) % items.len()
        } else {
            (current + 1) % items.len()
        };
        self.navigate(items[next].url);
    }

    // ------------------------------------------------------------------
    // Login / logout
    // ------------------------------------------------------------------

    /// Validate the login form and call the token endpoint.
    pub fn attempt_login(&mut self) {
        if !self.login.validate() {
            return;
        }
        let values = self.login.values();
        let loginname = values
            .get("loginname")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let password = values
            .get("password")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        match self.api.login(&loginname, &password) {
            Ok(auth) => {
                self.api.set_token(auth.access.clone());
                if let Err(e) = self.session.login(auth) {
                    self.toasts.error("Error", &e.to_string());
                    return;
                }
                self.mode = AppMode::Shell;
                self.login = FormState::create(login_form());
                let name = self
                    .session
                    .user()
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| loginname.clone());
                self.toasts.success("Welcome", &format!("Signed in as {name}"));
            }
            Err(e) => self.toasts.error("Login failed", &e.to_string()),
        }
    }

    /// Tear the session down: best-effort server call, then local state.
    pub fn logout(&mut self) {
        let user_id = self.session.user().and_then(|u| u.id);
        if let Err(e) = self.api.logout(user_id) {
            // Local logout proceeds regardless.
            self.toasts.info("Logout", &e.to_string());
        }
        if let Err(e) = self.session.logout() {
            self.toasts.error("Error", &e.to_string());
        }
        self.api.clear_token();
        self.registry.clear_tabs();
        self.screens.clear();
        self.current_path = "/".to_string();
        self.overlay = None;
        self.search_input = None;
        self.mode = AppMode::Login;
    }

    /// Route an operation failure: a 401 ends the session and returns to
    /// the login screen; everything else is a toast.
    pub fn handle_failure(&mut self, context: &str, error: HullError) {
        if matches!(error, HullError::SessionExpired) {
            let _ = self.session.logout();
            self.api.clear_token();
            self.registry.clear_tabs();
            self.screens.clear();
            self.current_path = "/".to_string();
            self.overlay = None;
            self.mode = AppMode::Login;
            self.toasts.error("Session expired", "Please log in again");
            return;
        }
        self.toasts.error(context, &error.to_string());
    }

    // ------------------------------------------------------------------
    // CRUD dialogs
    // ------------------------------------------------------------------

    /// Open a blank create dialog for the current screen.
    pub fn open_create_form(&mut self) {
        let Some(screen) = self.current_screen() else {
            return;
        };
        match screen.build_form(&self.api) {
            Ok(form) => self.overlay = Some(Overlay::Form(FormState::create(form))),
            Err(e) => self.handle_failure("Failed to open form", e),
        }
    }

    /// Open an edit dialog pre-filled from the selected row.
    pub fn open_edit_form(&mut self) {
        let Some(screen) = self.current_screen() else {
            return;
        };
        let Some(record) = screen.selected_record().cloned() else {
            return;
        };
        match screen.build_form(&self.api) {
            Ok(form) => self.overlay = Some(Overlay::Form(FormState::edit(form, &record))),
            Err(e) => self.handle_failure("Failed to open form", e),
        }
    }

    /// Open the read-only details dialog for the selected row.
    pub fn open_view(&mut self) {
        if let Some(record) = self.current_screen().and_then(|s| s.selected_record()) {
            self.overlay = Some(Overlay::View(record.clone()));
        }
    }

    /// Ask before deleting the selected row.
    pub fn open_delete_confirmation(&mut self) {
        if let Some(record) = self.current_screen().and_then(|s| s.selected_record()) {
            self.overlay = Some(Overlay::ConfirmDelete(record.clone()));
        }
    }

    /// Validate and submit the open form dialog.
    pub fn submit_form(&mut self) {
        let Some(Overlay::Form(form)) = &mut self.overlay else {
            return;
        };
        if !form.validate() {
            return;
        }
        let mode = form.mode;
        let payload = form.payload();
        let result = self.with_current_screen(|screen, api| screen.submit(api, mode, payload));
        match result {
            Some(Ok(())) => {
                let (title, verb) = match mode {
                    FormMode::Create => ("Success", "created"),
                    FormMode::Edit => ("Success", "updated"),
                };
                let entity = self
                    .current_screen()
                    .map(|s| s.resource.form.title.clone())
                    .unwrap_or_else(|| "Record".to_string());
                self.toasts
                    .success(title, &format!("{entity} {verb} successfully"));
                self.overlay = None;
            }
            Some(Err(e)) => self.handle_failure("Save failed", e),
            None => {}
        }
    }

    /// Execute the pending delete confirmation.
    pub fn confirm_delete(&mut self) {
        let Some(Overlay::ConfirmDelete(record)) = &self.overlay else {
            return;
        };
        let id = record.get("id").cloned().unwrap_or(Value::Null);
        let result = self.with_current_screen(|screen, api| screen.delete(api, &id));
        match result {
            Some(Ok(())) => {
                let entity = self
                    .current_screen()
                    .map(|s| s.resource.form.title.clone())
                    .unwrap_or_else(|| "Record".to_string());
                self.toasts
                    .success("Success", &format!("{entity} deleted successfully"));
                self.overlay = None;
            }
            Some(Err(e)) => self.handle_failure("Delete failed", e),
            None => {}
        }
    }

    /// Commit the live search input against the current screen.
    pub fn commit_search(&mut self) {
        let Some(text) = self.search_input.take() else {
            return;
        };
        let result = self.with_current_screen(|screen, api| screen.search(api, &text));
        if let Some(Err(e)) = result {
            self.handle_failure("Search failed", e);
        }
    }

    pub fn reload_current(&mut self) {
        if let Some(Err(e)) = self.with_current_screen(|screen, api| screen.reload(api)) {
            self.handle_failure("Reload failed", e);
        }
    }

    pub fn next_page(&mut self) {
        if let Some(Err(e)) = self.with_current_screen(|screen, api| screen.next_page(api)) {
            self.handle_failure("Load failed", e);
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(Err(e)) = self.with_current_screen(|screen, api| screen.prev_page(api)) {
            self.handle_failure("Load failed", e);
        }
    }

    pub fn select_next_row(&mut self) {
        if let Some(screen) = self.current_screen_mut() {
            screen.select_next();
        }
    }

    pub fn select_prev_row(&mut self) {
        if let Some(screen) = self.current_screen_mut() {
            screen.select_prev();
        }
    }

    /// Run an operation against the current route's screen, working around
    /// the borrow of both the screen map and the client.
    fn with_current_screen<F>(&mut self, op: F) -> Option<Result<()>>
    where
        F: FnOnce(&mut CrudScreen, &ApiClient) -> Result<()>,
    {
        let screen = self.screens.get_mut(&self.current_path)?;
        Some(op(screen, &self.api))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    fn app() -> (ConsoleApp, TempDir) {
        let dir = TempDir::new().unwrap();
        let session = SessionStore::open_at(dir.path().to_path_buf()).unwrap();
        (ConsoleApp::new(AppConfig::default(), session), dir)
    }

    #[test]
    fn test_unauthenticated_app_starts_on_login() {
        let (app, _dir) = app();
        assert_eq!(app.mode, AppMode::Login);
        assert!(app.registry.is_empty());
        assert_eq!(app.current_path, "/");
    }

    #[test]
    fn test_root_path_shows_welcome() {
        let (app, _dir) = app();
        assert_eq!(app.content_view(), ContentView::Welcome);
    }

    #[test]
    fn test_navigate_to_unknown_path_keeps_registry() {
        let (mut app, _dir) = app();
        app.navigate("/unknown");
        assert!(app.registry.is_empty());
        // Welcome still renders because nothing is selected.
        assert_eq!(app.content_view(), ContentView::Welcome);
    }

    #[test]
    fn test_close_active_tab_falls_back_to_welcome() {
        let (mut app, _dir) = app();
        // Dashboard has no list fetch, so navigation succeeds offline.
        app.navigate("/dashboards");
        assert_eq!(app.registry.len(), 1);
        app.close_active_tab();
        assert!(app.registry.is_empty());
        assert_eq!(app.current_path, "/");
        assert_eq!(app.content_view(), ContentView::Welcome);
    }

    #[test]
    fn test_cycle_tab_wraps_and_navigates() {
        let (mut app, _dir) = app();
        app.navigate("/dashboards");
        app.navigate("/reports");
        app.cycle_tab(false);
        assert_eq!(app.current_path, "/dashboards");
        app.cycle_tab(true);
        assert_eq!(app.current_path, "/reports");
    }

    #[test]
    fn test_login_validation_blocks_empty_submit() {
        let (mut app, _dir) = app();
        app.attempt_login();
        // No network call was made; the form holds field errors instead.
        assert!(app.login.error_for("loginname").is_some());
        assert!(app.login.error_for("password").is_some());
        assert_eq!(app.mode, AppMode::Login);
    }

    #[test]
    fn test_session_expiry_returns_to_login() {
        let (mut app, _dir) = app();
        app.mode = AppMode::Shell;
        app.navigate("/dashboards");
        app.handle_failure("Load failed", HullError::SessionExpired);
        assert_eq!(app.mode, AppMode::Login);
        assert!(app.registry.is_empty());
        assert_eq!(app.current_path, "/");
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn test_other_failures_toast_and_stay() {
        let (mut app, _dir) = app();
        app.mode = AppMode::Shell;
        app.navigate("/dashboards");
        app.handle_failure("Load failed", HullError::Api("boom".to_string()));
        assert_eq!(app.mode, AppMode::Shell);
        assert_eq!(app.registry.len(), 1);
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn test_sidebar_index_follows_navigation() {
        let (mut app, _dir) = app();
        app.navigate("/reports");
        assert_eq!(SIDEBAR_ITEMS[app.sidebar_index].url, "/reports");
    }
}
