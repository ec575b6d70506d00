// haras-api: Async Rust client for the Haras farm-management REST API

pub mod activity;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod resource;
pub mod session;
pub mod transport;

pub use activity::{ActivityGuard, ActivityTracker};
pub use auth::{LoginOutcome, MfaSetup};
pub use client::{ApiClient, Download};
pub use endpoints::{
    DashboardFilter, ParentOptions, PlanoFilter, StockMovementFilter, default_laudo_filename,
    filter_ferradores, laudo_content_type,
};
pub use error::{Error, ErrorDetail, ValidationIssue};
pub use resource::{ListQuery, Page, Resource, ResourceClient, ResourceSpec, SortOrder};
pub use session::{MemorySessionStore, PersistedSession, Session, SessionHandle, SessionStore};
pub use transport::{TlsMode, TransportConfig};
