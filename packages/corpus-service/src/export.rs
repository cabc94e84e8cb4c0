use corpus_domain::{RecordFilter, balance::parse_balance_config};
use corpus_storage::models::ExportRecord;
use futures::future::try_join_all;

use crate::{CorpusService, Error, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ExportRequest {
	pub project_id: String,
	pub confirmed: Option<bool>,
	/// JSON array of `{ "tag_label": .., "max_count": .. }` entries.
	/// Absent or blank means a plain unbalanced export.
	pub balance_config: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ExportItem {
	pub question: String,
	pub answer: String,
	pub cot: Option<String>,
	pub question_label: String,
}
impl From<ExportRecord> for ExportItem {
	fn from(record: ExportRecord) -> Self {
		Self {
			question: record.question,
			answer: record.answer,
			cot: record.cot,
			question_label: record.question_label,
		}
	}
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ExportResponse {
	pub records: Vec<ExportItem>,
}

impl CorpusService {
	/// Every matching record trimmed to its training payload, newest
	/// first. With a balance config the export instead draws up to
	/// `max_count` records per listed tag, concatenated in config
	/// order; the per-tag reads run concurrently. A malformed config
	/// fails before any store access.
	pub async fn export_records(&self, req: ExportRequest) -> Result<ExportResponse> {
		let base = RecordFilter::new(&req.project_id)?.confirmed(req.confirmed);
		let balance = req.balance_config.as_deref().filter(|raw| !raw.trim().is_empty());
		let records = match balance {
			Some(raw) => {
				let entries = parse_balance_config(raw)?;
				let filters = entries
					.iter()
					.map(|entry| base.clone().question_label(&entry.tag_label))
					.collect::<Vec<_>>();
				let fetches = filters
					.iter()
					.zip(&entries)
					.map(|(filter, entry)| self.store.find_exports(filter, Some(entry.max_count)));
				let per_tag = try_join_all(fetches).await.map_err(|e| {
					tracing::error!(project_id = %req.project_id, error = %e, "Failed to export balanced records.");

					Error::from(e)
				})?;

				per_tag.into_iter().flatten().collect()
			},
			None => self.store.find_exports(&base, None).await.map_err(|e| {
				tracing::error!(project_id = %req.project_id, error = %e, "Failed to export records.");

				Error::from(e)
			})?,
		};

		Ok(ExportResponse { records: records.into_iter().map(ExportItem::from).collect() })
	}
}
