//! # palletqr
//!
//! Generate numbered batches of QR labels for warehouse pallets.
//!
//! One pallet/item combination yields `N` QR codes. Each code carries a small JSON
//! object with the pallet ID, item ID, item name and a composite identifier
//! `{pallet_id}_{item_id}_{sequence}`, where the sequence is zero-padded to the
//! digit count of `N`. A `manifest.json` next to the images indexes the run.
//!
//! ## Features
//!
//! - Read the batch from command-line flags or from a JSON config file.
//! - Render PNG (or SVG) labels at error correction Medium, 10 px per module, 4-module border.
//! - Write an ordered, pretty-printed manifest of every generated label.
//! - Decode scanned label payloads back into their parts.
//!
//! ## Example
//!
//! Generate three labels into a directory:
//!
//! ```rust,no_run
//! use palletqr::{generate, GenerationRequest, OutputFormat};
//!
//! fn main() -> palletqr::Result<()> {
//!     let request = GenerationRequest {
//!         pallet_id: "PAL001".into(),
//!         item_id: "ITM123".into(),
//!         name: "Caja de tornillos".into(),
//!         quantity: 3,
//!         outdir: "qrs".into(),
//!         format: OutputFormat::Png,
//!     };
//!     let summary = generate(&request)?;
//!     assert_eq!(summary.entries[0].item_id_full, "PAL001_ITM123_1");
//!     Ok(())
//! }
//! ```
//!
//! Read a scanned label:
//!
//! ```rust
//! use palletqr::LabelPayload;
//!
//! let text = r#"{"pallet_id":"PAL001","item_id":"ITM123","name":"Caja","item_id_full":"PAL001_ITM123_07"}"#;
//! let payload = LabelPayload::parse(text).unwrap();
//! assert_eq!(payload.sequence(), Some(7));
//! ```
//!
//! ## Modules
//!
//! - [`request`]: Resolving a batch from flags or a config file.
//! - [`batch`]: The generation loop.
//! - [`payload`]: Label identifiers and QR content.
//! - [`render`]: Rasterizing codes to images, SVG and the terminal.
//! - [`manifest`]: The per-run index file.

#![forbid(unsafe_code)]

pub mod batch;
pub mod cli;
pub mod error;
pub mod manifest;
pub mod payload;
pub mod render;
pub mod request;

pub use batch::{generate, BatchGenerator, BatchSummary};
pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestEntry};
pub use payload::LabelPayload;
pub use render::{QrCodeEcc, RenderOptions};
pub use request::{GenerationRequest, OutputFormat};
