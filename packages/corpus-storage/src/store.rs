use corpus_domain::{CreatedOrder, RecordFilter};
use uuid::Uuid;

use crate::{
	BoxFuture, Result,
	models::{DatasetRecord, ExportRecord, TagCount},
};

/// Read-only store collaborator behind every retrieval operation.
///
/// The service holds this as an explicit handle rather than a process-wide
/// client, so tests can substitute an in-process double. All methods are
/// independent reads; callers may dispatch them concurrently.
pub trait RecordStore
where
	Self: Send + Sync,
{
	/// Records matching `filter`, ordered by creation time with
	/// `record_id` as the tie-break, windowed by `skip`/`take`.
	fn find_many<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
		skip: Option<i64>,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<DatasetRecord>>>;

	/// Export projections matching `filter`, newest first, at most `take`.
	fn find_exports<'a>(
		&'a self,
		filter: &'a RecordFilter,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<ExportRecord>>>;

	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>>;

	/// Group matching records by `question_label`; labels without matches
	/// do not appear.
	fn count_by_label<'a>(
		&'a self,
		filter: &'a RecordFilter,
	) -> BoxFuture<'a, Result<Vec<TagCount>>>;

	fn find_by_id(&self, record_id: Uuid) -> BoxFuture<'_, Result<Option<DatasetRecord>>>;

	/// First record matching `filter` under `order`, or `None`.
	fn find_first<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
	) -> BoxFuture<'a, Result<Option<DatasetRecord>>>;

	/// Ids of matching records, newest first.
	fn find_ids<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<Vec<Uuid>>>;
}
