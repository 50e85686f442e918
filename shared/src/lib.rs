//! Platform-neutral core of the bilingual document reader.
//!
//! Everything here runs on the host target as well as on `wasm32`: the
//! frontend crate plugs the DOM and `localStorage` in through the
//! [`highlight::TextSurface`] and [`prefs::PrefStorage`] traits.

pub mod article;
pub mod config;
pub mod error;
pub mod highlight;
pub mod i18n;
pub mod locale;
pub mod prefs;
pub mod route;
pub mod session;
pub mod store;

pub use article::{ArticleRecord, ResourceKind, ResourceRef, SiteMeta};
pub use error::ReaderError;
pub use highlight::{HighlightEngine, HighlightPhase, SearchReport, TextSurface};
pub use locale::{resolve, Lang, LocalizedText};
pub use prefs::{PrefStorage, SessionPrefs};
pub use route::Route;
pub use session::{ArticleView, BodyPlan, Generation, Panel, ReaderSession, ViewSnapshot};
pub use store::ArticleStore;
