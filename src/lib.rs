// Library surface for headless/integration tests and reuse.
// The terminal front end lives in main.rs/ui.rs and only talks to `session`.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod runtime;
pub mod session;
pub mod text;

pub use error::{Result, SessionError};
pub use metrics::Metrics;
pub use session::{Phase, Session, SessionLength, Snapshot};
