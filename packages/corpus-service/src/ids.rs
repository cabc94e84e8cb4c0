use corpus_domain::TriState;
use uuid::Uuid;

use crate::{CorpusService, Error, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ListIdsRequest {
	pub project_id: String,
	pub confirmed: Option<bool>,
	pub field: Option<String>,
	pub input: Option<String>,
	#[serde(default)]
	pub has_cot: TriState,
	#[serde(default)]
	pub is_distill: TriState,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ListIdsResponse {
	pub ids: Vec<Uuid>,
}

impl CorpusService {
	/// Identifiers of every record matching the listing criteria,
	/// newest first. Serves select-all flows without shipping record
	/// bodies.
	pub async fn list_record_ids(&self, req: ListIdsRequest) -> Result<ListIdsResponse> {
		let filter = self.criteria_filter(
			&req.project_id,
			req.confirmed,
			req.field.as_deref(),
			req.input.as_deref(),
			req.has_cot,
			req.is_distill,
		)?;
		let ids = self.store.find_ids(&filter).await.map_err(|e| {
			tracing::error!(project_id = %req.project_id, error = %e, "Failed to list record ids.");

			Error::from(e)
		})?;

		Ok(ListIdsResponse { ids })
	}
}
