use corpus_domain::RecordFilter;

use crate::{CorpusService, Error, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ProjectCountsRequest {
	pub project_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ProjectCountsResponse {
	pub total: i64,
	pub confirmed_count: i64,
}

impl CorpusService {
	/// Total and confirmed record counts for a project, read
	/// concurrently.
	pub async fn project_counts(&self, req: ProjectCountsRequest) -> Result<ProjectCountsResponse> {
		let filter = RecordFilter::new(&req.project_id)?;
		let confirmed_filter = filter.clone().confirmed(Some(true));
		let (total, confirmed_count) =
			tokio::try_join!(self.store.count(&filter), self.store.count(&confirmed_filter))
				.map_err(|e| {
					tracing::error!(project_id = %req.project_id, error = %e, "Failed to count records.");

					Error::from(e)
				})?;

		Ok(ProjectCountsResponse { total, confirmed_count })
	}
}
