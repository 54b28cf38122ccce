//! Domain records persisted by the workshop record store.
//!
//! Every entity is a flat, serde-serializable struct carrying a string `id`
//! and implementing [`record::Record`], which ties it to its storage namespace.

pub mod errors;
pub mod record;
pub mod input;
pub mod client;
pub mod service_record;
pub mod stock;
pub mod finance;
pub mod appointment;

pub use record::Record;
