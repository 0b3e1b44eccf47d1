pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod ledger;

pub use api::ApiClient;
pub use config::{Config, Session};
pub use document::{assemble, AccountDirectory, Document, DocumentKind, DocumentPayload};
pub use error::{GinumError, Result};
pub use ledger::{BalanceCheck, EntryMode, Field, LineItem, LineItems, Totals};
