// --- File: crates/bookdesk_console/src/lib.rs ---

// Declare modules within this crate
pub mod api;       // reqwest client for the admin API, plus an in-memory mock
pub mod console;   // AdminConsole controller
pub mod dialogs;   // alert / confirm
pub mod error;
pub mod locale;    // ru-RU formatting
pub mod render;    // pure region renderers
pub mod view;      // view-model

pub use api::HttpAdminApi;
pub use console::{ActionOutcome, AdminConsole};
pub use dialogs::{Dialogs, ScriptedDialogs, TerminalDialogs};
pub use error::ConsoleError;
pub use locale::RuLocale;
pub use render::{render_regions, RenderedRegions};
pub use view::{Notice, ViewModel};
