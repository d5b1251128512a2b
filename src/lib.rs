pub mod api;
pub mod commands;
pub mod completion;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod masters;
pub mod nav;
pub mod output;
pub mod routes;
pub mod screen;
pub mod session;
pub mod tabs;
pub mod toast;
pub mod tui;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{HullError, Result};
pub use screen::{CrudResource, CrudScreen};
pub use session::SessionStore;
pub use tabs::{Tab, TabRegistry};
