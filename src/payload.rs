//! Label identifiers and the JSON text carried by each QR code.
//!
//! Every unit in a batch is named `{pallet_id}_{item_id}_{sequence}`, where the
//! sequence is the 1-based position zero-padded to the digit count of the batch
//! quantity. A batch of 25 yields `01` to `25`, a batch of 100 yields `001` to
//! `100`, so file listings sort in generation order within one batch.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of decimal digits in `quantity`, used as the padding width.
pub fn sequence_width(quantity: u64) -> usize {
    quantity.to_string().len()
}

/// Formats `index` zero-padded to `width` digits.
pub fn format_sequence(index: u64, width: usize) -> String {
    format!("{index:0width$}")
}

/// Joins the three parts of a unit identifier.
pub fn compose_item_id_full(pallet_id: &str, item_id: &str, sequence: &str) -> String {
    format!("{pallet_id}_{item_id}_{sequence}")
}

/// The content encoded into one QR code.
///
/// Field order is part of the wire format: scanners see the keys as
/// `pallet_id`, `item_id`, `name`, `item_id_full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPayload {
    pub pallet_id: String,
    pub item_id: String,
    pub name: String,
    pub item_id_full: String,
}

impl LabelPayload {
    /// Builds the payload for unit `index` of a batch whose sequences are
    /// `width` digits wide.
    pub fn new(pallet_id: &str, item_id: &str, name: &str, index: u64, width: usize) -> Self {
        let sequence = format_sequence(index, width);
        Self {
            pallet_id: pallet_id.to_string(),
            item_id: item_id.to_string(),
            name: name.to_string(),
            item_id_full: compose_item_id_full(pallet_id, item_id, &sequence),
        }
    }

    /// Compact JSON with non-ASCII characters kept as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a scanned payload back.
    ///
    /// The text must be a JSON object with the four keys, and `item_id_full`
    /// must be `{pallet_id}_{item_id}_` followed by a decimal sequence.
    pub fn parse(text: &str) -> Result<Self> {
        let payload: LabelPayload = serde_json::from_str(text)?;
        if payload.sequence().is_none() {
            return Err(Error::InvalidPayload(format!(
                "item_id_full {:?} does not match {}_{}_<sequence>",
                payload.item_id_full, payload.pallet_id, payload.item_id
            )));
        }
        Ok(payload)
    }

    /// The 1-based unit index encoded in `item_id_full`.
    pub fn sequence(&self) -> Option<u64> {
        let prefix = compose_item_id_full(&self.pallet_id, &self.item_id, "");
        let digits = self.item_id_full.strip_prefix(&prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}
