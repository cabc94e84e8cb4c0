use corpus_domain::RecordFilter;
use corpus_storage::models::TagCount;

use crate::{CorpusService, Error, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct TagStatsRequest {
	pub project_id: String,
	pub confirmed: Option<bool>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TagStatItem {
	pub tag_label: String,
	pub dataset_count: i64,
}
impl From<TagCount> for TagStatItem {
	fn from(count: TagCount) -> Self {
		Self { tag_label: count.tag_label, dataset_count: count.dataset_count }
	}
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct TagStatsResponse {
	pub tags: Vec<TagStatItem>,
}

impl CorpusService {
	/// Per-label record counts for a project. Every distinct label in
	/// scope appears exactly once, blank labels included.
	pub async fn tag_statistics(&self, req: TagStatsRequest) -> Result<TagStatsResponse> {
		let filter = RecordFilter::new(&req.project_id)?.confirmed(req.confirmed);
		let counts = self.store.count_by_label(&filter).await.map_err(|e| {
			tracing::error!(project_id = %req.project_id, error = %e, "Failed to aggregate tag counts.");

			Error::from(e)
		})?;

		Ok(TagStatsResponse { tags: counts.into_iter().map(TagStatItem::from).collect() })
	}
}
