use corpus_domain::{CreatedOrder, DISTILLED_CHUNK_NAME, RecordFilter, SearchField, TriState};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
	BoxFuture, Result,
	db::Db,
	models::{DatasetRecord, ExportRecord, TagCount},
	store::RecordStore,
};

const RECORD_COLUMNS: &str = "record_id, project_id, question, answer, cot, question_label, \
	chunk_name, confirmed, created_at";

pub struct PgRecordStore {
	db: Db,
}
impl PgRecordStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}

	/// Seeding helper for integration tests and data migration tooling.
	/// Record creation is not a service operation.
	pub async fn insert(&self, record: &DatasetRecord) -> Result<()> {
		sqlx::query(
			"\
INSERT INTO dataset_records (
	record_id,
	project_id,
	question,
	answer,
	cot,
	question_label,
	chunk_name,
	confirmed,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
		)
		.bind(record.record_id)
		.bind(record.project_id.as_str())
		.bind(record.question.as_str())
		.bind(record.answer.as_str())
		.bind(record.cot.as_deref())
		.bind(record.question_label.as_str())
		.bind(record.chunk_name.as_str())
		.bind(record.confirmed)
		.bind(record.created_at)
		.execute(&self.db.pool)
		.await?;

		Ok(())
	}
}
impl RecordStore for PgRecordStore {
	fn find_many<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
		skip: Option<i64>,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<DatasetRecord>>> {
		Box::pin(async move {
			let mut builder =
				QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM dataset_records"));

			push_filter(&mut builder, filter);
			builder.push(order_clause(order));

			if let Some(take) = take {
				builder.push(" LIMIT ");
				builder.push_bind(take);
			}
			if let Some(skip) = skip {
				builder.push(" OFFSET ");
				builder.push_bind(skip);
			}

			let records = builder.build_query_as().fetch_all(&self.db.pool).await?;

			Ok(records)
		})
	}

	fn find_exports<'a>(
		&'a self,
		filter: &'a RecordFilter,
		take: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<ExportRecord>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(
				"SELECT question, answer, cot, question_label FROM dataset_records",
			);

			push_filter(&mut builder, filter);
			builder.push(order_clause(CreatedOrder::Desc));

			if let Some(take) = take {
				builder.push(" LIMIT ");
				builder.push_bind(take);
			}

			let exports = builder.build_query_as().fetch_all(&self.db.pool).await?;

			Ok(exports)
		})
	}

	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM dataset_records");

			push_filter(&mut builder, filter);

			let count = builder.build_query_scalar().fetch_one(&self.db.pool).await?;

			Ok(count)
		})
	}

	fn count_by_label<'a>(
		&'a self,
		filter: &'a RecordFilter,
	) -> BoxFuture<'a, Result<Vec<TagCount>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(
				"SELECT question_label AS tag_label, COUNT(*) AS dataset_count \
				FROM dataset_records",
			);

			push_filter(&mut builder, filter);
			builder.push(" GROUP BY question_label");

			let counts = builder.build_query_as().fetch_all(&self.db.pool).await?;

			Ok(counts)
		})
	}

	fn find_by_id(&self, record_id: Uuid) -> BoxFuture<'_, Result<Option<DatasetRecord>>> {
		Box::pin(async move {
			let sql = format!("SELECT {RECORD_COLUMNS} FROM dataset_records WHERE record_id = $1");
			let record = sqlx::query_as(&sql).bind(record_id).fetch_optional(&self.db.pool).await?;

			Ok(record)
		})
	}

	fn find_first<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
	) -> BoxFuture<'a, Result<Option<DatasetRecord>>> {
		Box::pin(async move {
			let mut builder =
				QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM dataset_records"));

			push_filter(&mut builder, filter);
			builder.push(order_clause(order));
			builder.push(" LIMIT 1");

			let record = builder.build_query_as().fetch_optional(&self.db.pool).await?;

			Ok(record)
		})
	}

	fn find_ids<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT record_id FROM dataset_records");

			push_filter(&mut builder, filter);
			builder.push(order_clause(CreatedOrder::Desc));

			let ids = builder.build_query_scalar().fetch_all(&self.db.pool).await?;

			Ok(ids)
		})
	}
}

/// Compile a filter into a conjunctive WHERE clause. Each supplied
/// criterion contributes exactly one fragment; omitted criteria contribute
/// nothing. Must agree with `RecordFilter::matches`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
	builder.push(" WHERE project_id = ");
	builder.push_bind(filter.project_id_value().to_string());

	if let Some(confirmed) = filter.confirmed_value() {
		builder.push(" AND confirmed = ");
		builder.push_bind(confirmed);
	}
	if let Some((field, input)) = filter.search_value() {
		let column = match field {
			SearchField::Question => "question",
			SearchField::Answer => "answer",
			SearchField::Cot => "cot",
			SearchField::QuestionLabel => "question_label",
		};

		// Escape LIKE wildcards so the input matches as a literal substring.
		let escaped = input.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");

		builder.push(format!(" AND {column} LIKE "));
		builder.push_bind(format!("%{escaped}%"));
	}
	match filter.has_cot_value() {
		TriState::All => {},
		TriState::Yes => {
			builder.push(" AND cot IS NOT NULL AND cot <> ''");
		},
		TriState::No => {
			builder.push(" AND (cot IS NULL OR cot = '')");
		},
	}
	match filter.is_distill_value() {
		TriState::All => {},
		TriState::Yes => {
			builder.push(" AND chunk_name = ");
			builder.push_bind(DISTILLED_CHUNK_NAME);
		},
		TriState::No => {
			builder.push(" AND chunk_name <> ");
			builder.push_bind(DISTILLED_CHUNK_NAME);
		},
	}
	if let Some(label) = filter.question_label_value() {
		builder.push(" AND question_label = ");
		builder.push_bind(label.to_string());
	}
	if let Some(bound) = filter.created_after_value() {
		builder.push(" AND created_at > ");
		builder.push_bind(bound);
	}
	if let Some(bound) = filter.created_before_value() {
		builder.push(" AND created_at < ");
		builder.push_bind(bound);
	}
}

fn order_clause(order: CreatedOrder) -> &'static str {
	// `record_id` breaks creation-time ties so ordering stays deterministic.
	match order {
		CreatedOrder::Asc => " ORDER BY created_at ASC, record_id ASC",
		CreatedOrder::Desc => " ORDER BY created_at DESC, record_id DESC",
	}
}
