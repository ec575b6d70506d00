//! Client-side domain layer between `haras-api` and front-ends (CLI).
//!
//! - **[`Farm`]**: facade owning the API client, the session and one
//!   [`ResourceStore`] per backend resource.
//! - **[`ResourceStore<T>`]**: cached page of a REST collection with its
//!   filters, pagination and selected record, published through `watch`
//!   snapshots. Fetches are generation-tagged so a slow response never
//!   overwrites a newer one.
//! - **[`guard`]**: route access decision for unauthenticated sessions.
//! - **[`form`]** / **[`dates`]**: normalization of form payloads and
//!   pt-BR date display.
//! - **[`feedback`]**: user-facing error messages and notices.
//! - **[`labels`]**: pt-BR labels and display colors for backend enums.

pub mod dates;
pub mod error;
pub mod farm;
pub mod feedback;
pub mod form;
pub mod guard;
pub mod labels;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use farm::{Farm, FarmConfig};
pub use feedback::{Notice, NoticeLevel};
pub use guard::{Guard, Navigation, Route};
pub use labels::Labeled;
pub use store::{
    DashboardStore, FetchOverrides, FilterSet, FilterValue, Pagination, PaginationUpdate,
    ResourceStore, SelectOption, StoreState,
};
