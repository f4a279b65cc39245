//! Armory Engine library.
//!
//! Serves `GET /api/characters/{name}/full`: one profile lookup against the
//! Lost Ark armory API, then every optional section, merged into a single
//! JSON document.
//!
//! ## Structure
//!
//! - `use_cases/` - Lookup orchestration (mandatory profile, optional sections)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
