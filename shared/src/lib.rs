use serde_json::{Map, Value};

pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod field;
pub mod form;
pub mod guard;
pub mod lifecycle;
pub mod nav;
pub mod notice;
pub mod protocol;
pub mod route;
pub mod school;
pub mod screen;
pub mod session;
pub mod table;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// One backend entity as plain JSON. Keys keep their insertion order.
pub type Record = Map<String, Value>;

pub use client::{ApiClient, HttpRequest, HttpResponse, Transport};
pub use config::{AppConfig, SessionPersistence};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use field::FieldDescriptor;
pub use guard::{GuardDecision, RoleRequirement};
pub use notice::{Notice, NoticeLevel};
pub use route::{Access, AppRoute};
pub use session::{Role, Session, SessionSnapshot};
