//! Condor Core
//!
//! Platform-agnostic logic for the Condor hiking-route front-end: session and role
//! derivation, declarative form validation, typed REST services for the five backends
//! and the small state machines the pages are built from. Browser specifics live behind
//! the [`Transport`] and [`KeyValueStore`] traits.

pub mod catalogs;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod http;
pub mod mock;
pub mod models;
pub mod notice;
pub mod rating;
pub mod registry;
pub mod role;
pub mod services;
pub mod session;
pub mod storage;
pub mod validation;

pub use catalogs::{RouteCatalogs, RouteListing, RouteSummary};
pub use config::{ApiConfig, Backend};
pub use error::ApiError;
pub use forms::{FormError, FormPhase};
pub use http::{ApiClient, ClientFactory, HttpRequest, HttpResponse, Method, Transport};
pub use notice::{Notice, NoticeKind};
pub use rating::RatingGate;
pub use registry::{KnownUser, KnownUsers};
pub use role::{Role, RoleFlags};
pub use services::Services;
pub use session::{SessionContext, SessionSnapshot, Subscription};
pub use storage::{KeyValueStore, MemoryStore};
pub use validation::{Check, FieldErrors, Rule};
