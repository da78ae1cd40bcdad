//! This crate locates the exports of a dynamic library lying around a
//! relative virtual address (RVA), from the text export table printed by an
//! external dumper such as `dumpbin /exports`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rvamap_exports::{Dumper, ExportTable, RvaWindow};
//!
//! let window = RvaWindow::from_addresses(0x7ffac3d43cb7, 0x7ffac3cb0000);
//!
//! let dump = Dumper::dumpbin().dump_exports(Path::new("R.dll")).unwrap();
//!
//! for export in ExportTable::from_dump(&dump).near(&window).unwrap() {
//!     println!("{} {}", export.rva_text, export.name);
//! }
//! ```

/// Module spawning the external export dumper.
pub mod dumper;

/// Module parsing the dumper's export table.
pub mod table;

/// Module computing the searched address window.
pub mod window;

mod error;

pub use self::dumper::Dumper;
pub use self::error::{Error, ParseHexError, Result};
pub use self::table::{ExportRecord, ExportTable};
pub use self::window::{RvaWindow, SEARCH_DELTA, format_hex, parse_hex};
