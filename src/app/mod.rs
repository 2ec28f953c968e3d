pub mod browser;
pub mod context;
pub mod error;

pub use browser::{Browser, SystemBrowser};
pub use context::AppContext;
pub use error::{BeritaError, Result};
