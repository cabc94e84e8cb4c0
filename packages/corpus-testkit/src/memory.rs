use std::{cmp::Ordering, collections::BTreeMap, sync::Mutex};

use corpus_domain::{CreatedOrder, RecordFilter};
use corpus_storage::{
	BoxFuture, Result,
	models::{DatasetRecord, ExportRecord, TagCount},
	store::RecordStore,
};
use uuid::Uuid;

/// In-process `RecordStore` double backed by a `Vec`.
///
/// Matching delegates to `RecordFilter::matches`, the reference semantics
/// the Postgres compilation must agree with; ordering tie-breaks on
/// `record_id` like the SQL order clauses.
#[derive(Default)]
pub struct MemoryRecordStore {
	records: Mutex<Vec<DatasetRecord>>,
}
impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_records(records: Vec<DatasetRecord>) -> Self {
		Self { records: Mutex::new(records) }
	}

	pub fn seed(&self, record: DatasetRecord) {
		self.records.lock().unwrap_or_else(|err| err.into_inner()).push(record);
	}

	fn matching(&self, filter: &RecordFilter, order: CreatedOrder) -> Vec<DatasetRecord> {
		let records = self.records.lock().unwrap_or_else(|err| err.into_inner());
		let mut matched = records
			.iter()
			.filter(|record| filter.matches(&record.view()))
			.cloned()
			.collect::<Vec<_>>();

		matched.sort_by(|a, b| compare_created(a, b, order));

		matched
	}
}
impl RecordStore for MemoryRecordStore {
	fn find_many<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
		skip: Option<i64>,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<DatasetRecord>>> {
		let mut matched = self.matching(filter, order);
		let skip = skip.unwrap_or(0).max(0) as usize;

		matched = matched.into_iter().skip(skip).collect();

		if let Some(take) = take {
			matched.truncate(take.max(0) as usize);
		}

		Box::pin(async move { Ok(matched) })
	}

	fn find_exports<'a>(
		&'a self,
		filter: &'a RecordFilter,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<ExportRecord>>> {
		let mut matched = self.matching(filter, CreatedOrder::Desc);

		if let Some(take) = take {
			matched.truncate(take.max(0) as usize);
		}

		let exports = matched.iter().map(DatasetRecord::export).collect::<Vec<_>>();

		Box::pin(async move { Ok(exports) })
	}

	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>> {
		let records = self.records.lock().unwrap_or_else(|err| err.into_inner());
		let count = records.iter().filter(|record| filter.matches(&record.view())).count() as i64;

		Box::pin(async move { Ok(count) })
	}

	fn count_by_label<'a>(
		&'a self,
		filter: &'a RecordFilter,
	) -> BoxFuture<'a, Result<Vec<TagCount>>> {
		let records = self.records.lock().unwrap_or_else(|err| err.into_inner());
		let mut counts = BTreeMap::<String, i64>::new();

		for record in records.iter().filter(|record| filter.matches(&record.view())) {
			*counts.entry(record.question_label.clone()).or_insert(0) += 1;
		}

		let counts = counts
			.into_iter()
			.map(|(tag_label, dataset_count)| TagCount { tag_label, dataset_count })
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(counts) })
	}

	fn find_by_id(&self, record_id: Uuid) -> BoxFuture<'_, Result<Option<DatasetRecord>>> {
		let records = self.records.lock().unwrap_or_else(|err| err.into_inner());
		let record = records.iter().find(|record| record.record_id == record_id).cloned();

		Box::pin(async move { Ok(record) })
	}

	fn find_first<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
	) -> BoxFuture<'a, Result<Option<DatasetRecord>>> {
		let first = self.matching(filter, order).into_iter().next();

		Box::pin(async move { Ok(first) })
	}

	fn find_ids<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		let ids = self
			.matching(filter, CreatedOrder::Desc)
			.iter()
			.map(|record| record.record_id)
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(ids) })
	}
}

fn compare_created(a: &DatasetRecord, b: &DatasetRecord, order: CreatedOrder) -> Ordering {
	let ascending =
		a.created_at.cmp(&b.created_at).then_with(|| a.record_id.cmp(&b.record_id));

	match order {
		CreatedOrder::Asc => ascending,
		CreatedOrder::Desc => ascending.reverse(),
	}
}
