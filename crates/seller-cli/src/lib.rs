//! Seller import controller and CLI support.

pub mod import;
pub mod logging;

pub use import::{ImportController, ImportReceipt, ImportState, PREVIEW_ROWS, Preview};
