pub mod counts;
pub mod export;
pub mod get;
pub mod ids;
pub mod navigate;
pub mod page;
pub mod stats;
pub mod time_serde;

mod error;

pub use error::{Error, Result};

pub use counts::{ProjectCountsRequest, ProjectCountsResponse};
pub use export::{ExportItem, ExportRequest, ExportResponse};
pub use get::GetRecordRequest;
pub use ids::{ListIdsRequest, ListIdsResponse};
pub use navigate::{Direction, NavigateRequest, NavigateResponse};
pub use page::{PageRequest, PageResponse};
pub use stats::{TagStatItem, TagStatsRequest, TagStatsResponse};

use std::sync::Arc;

use corpus_config::Config;
use corpus_domain::{RecordFilter, SearchField, TriState};
use corpus_storage::{models::DatasetRecord, store::RecordStore};
use uuid::Uuid;

/// Retrieval operations over labeled training records.
///
/// Holds the store as an explicit handle so callers (and tests) decide
/// which backend serves the reads. Every operation is stateless and
/// read-only.
pub struct CorpusService {
	pub cfg: Config,
	pub store: Arc<dyn RecordStore>,
}
impl CorpusService {
	pub fn new(cfg: Config, store: Arc<dyn RecordStore>) -> Self {
		Self { cfg, store }
	}

	/// Combine the heterogeneous optional criteria shared by the listing
	/// operations into one conjunctive filter. An absent `field` targets
	/// `question`; an unrecognized one contributes no search constraint.
	fn criteria_filter(
		&self,
		project_id: &str,
		confirmed: Option<bool>,
		field: Option<&str>,
		input: Option<&str>,
		has_cot: TriState,
		is_distill: TriState,
	) -> Result<RecordFilter> {
		let field = match field {
			None => Some(SearchField::Question),
			Some(raw) => SearchField::parse(raw),
		};
		let filter = RecordFilter::new(project_id)?
			.confirmed(confirmed)
			.search(field, input.unwrap_or(""))
			.has_cot(has_cot)
			.is_distill(is_distill);

		Ok(filter)
	}
}

/// A record as returned to transport callers.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RecordItem {
	pub record_id: Uuid,
	pub project_id: String,
	pub question: String,
	pub answer: String,
	pub cot: Option<String>,
	pub question_label: String,
	pub chunk_name: String,
	pub confirmed: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
}
impl From<DatasetRecord> for RecordItem {
	fn from(record: DatasetRecord) -> Self {
		Self {
			record_id: record.record_id,
			project_id: record.project_id,
			question: record.question,
			answer: record.answer,
			cot: record.cot,
			question_label: record.question_label,
			chunk_name: record.chunk_name,
			confirmed: record.confirmed,
			created_at: record.created_at,
		}
	}
}
