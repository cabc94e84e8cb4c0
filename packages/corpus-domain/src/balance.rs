use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One quota entry of a balanced-sampling configuration: at most
/// `max_count` records for `tag_label`. `max_count = 0` means zero
/// records; there is no "unlimited" sentinel.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BalanceEntry {
	#[serde(alias = "tagLabel")]
	pub tag_label: String,
	#[serde(alias = "maxCount")]
	pub max_count: i64,
}

/// Parse a caller-supplied serialized balance configuration.
///
/// The configuration is an ordered JSON array of `{tag_label, max_count}`
/// objects. Duplicate labels are preserved as independent sampling passes.
/// Malformed text or a negative quota is a caller error, reported before
/// any store access.
pub fn parse_balance_config(raw: &str) -> Result<Vec<BalanceEntry>> {
	let entries: Vec<BalanceEntry> = serde_json::from_str(raw)
		.map_err(|err| Error::InvalidArgument(format!("Malformed balance config: {err}.")))?;

	for entry in &entries {
		if entry.max_count < 0 {
			return Err(Error::InvalidArgument(format!(
				"Balance config max_count must be zero or greater for tag {:?}.",
				entry.tag_label,
			)));
		}
	}

	Ok(entries)
}
