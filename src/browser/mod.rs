//! Browser session management and the CDP-backed page
//!
//! - [`BrowserSession`]: launch or attach to Chrome/Chromium
//! - [`ChromePage`]: the [`Page`](crate::dom::Page) implementation over a live tab

pub mod config;
pub mod page;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use page::ChromePage;
pub use session::BrowserSession;
