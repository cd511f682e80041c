//! benford-io - Loading user-supplied CSV files for leading-digit analysis
//!
//! Spreadsheet exports arrive in many shapes. This crate turns raw bytes
//! into rows of text and finds the columns worth testing:
//!
//! - **Encoding**: byte-order mark / UTF-8 / windows-1252 detection and
//!   strict decoding
//! - **Dialect**: delimiter and quote character sniffing
//! - **Table**: viable rows (consistent width), viable columns (numeric or
//!   blank), previews and per-column Benford analysis
//!
//! # Design
//!
//! Files are small enough to hold in memory, so a [`CsvTable`] is decoded
//! and parsed once up front. Analysis is delegated to `benford-stats`; with
//! the `parallel` feature each column is analysed on the rayon pool.

pub mod dialect;
pub mod encoding;
pub mod error;
pub mod schema;
pub mod table;

pub use dialect::{sniff, Dialect};
pub use encoding::{decode, detect_encoding};
pub use error::{IoError, IoResult};
pub use schema::*;
pub use table::CsvTable;
