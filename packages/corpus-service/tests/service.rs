use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use corpus_config::{Config, Postgres, Retrieval, Service, Storage};
use corpus_domain::{CreatedOrder, RecordFilter, TriState};
use corpus_service::{
	CorpusService, Direction, Error, ExportRequest, GetRecordRequest, ListIdsRequest,
	NavigateRequest, PageRequest, ProjectCountsRequest, TagStatItem, TagStatsRequest,
};
use corpus_storage::{
	BoxFuture,
	models::{DatasetRecord, ExportRecord, TagCount},
	store::RecordStore,
};
use corpus_testkit::{MemoryRecordStore, RecordBuilder};
use uuid::Uuid;

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		},
		retrieval: Retrieval::default(),
	}
}

fn service_with(records: Vec<DatasetRecord>) -> CorpusService {
	CorpusService::new(test_config(), Arc::new(MemoryRecordStore::with_records(records)))
}

fn page_request(project_id: &str) -> PageRequest {
	PageRequest {
		project_id: project_id.to_string(),
		page: None,
		page_size: None,
		confirmed: None,
		field: None,
		input: None,
		has_cot: TriState::All,
		is_distill: TriState::All,
	}
}

fn ids_request(project_id: &str) -> ListIdsRequest {
	ListIdsRequest {
		project_id: project_id.to_string(),
		confirmed: None,
		field: None,
		input: None,
		has_cot: TriState::All,
		is_distill: TriState::All,
	}
}

#[tokio::test]
async fn page_returns_requested_slice_newest_first() {
	let records = vec![
		RecordBuilder::new("proj").question("oldest").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("middle").created_at_secs(2).build(),
		RecordBuilder::new("proj").question("newest").created_at_secs(3).build(),
	];
	let service = service_with(records);
	let resp = service
		.page_records(PageRequest { page: Some(1), page_size: Some(2), ..page_request("proj") })
		.await
		.unwrap();

	assert_eq!(resp.data.len(), 2);
	assert_eq!(resp.data[0].question, "newest");
	assert_eq!(resp.data[1].question, "middle");
	assert_eq!(resp.total, 3);
}

#[tokio::test]
async fn page_totals_are_independent_of_pagination() {
	let records =
		(0..7).map(|i| RecordBuilder::new("proj").created_at_secs(i).build()).collect::<Vec<_>>();
	let service = service_with(records);
	let first = service
		.page_records(PageRequest { page: Some(1), page_size: Some(3), ..page_request("proj") })
		.await
		.unwrap();
	let last = service
		.page_records(PageRequest { page: Some(3), page_size: Some(3), ..page_request("proj") })
		.await
		.unwrap();

	assert_eq!(first.total, 7);
	assert_eq!(last.total, 7);
	assert_eq!(last.data.len(), 1);
}

#[tokio::test]
async fn page_confirmed_count_keeps_other_criteria() {
	let records = vec![
		RecordBuilder::new("proj").label("math").confirmed(true).created_at_secs(1).build(),
		RecordBuilder::new("proj").label("math").confirmed(false).created_at_secs(2).build(),
		RecordBuilder::new("proj").label("code").confirmed(true).created_at_secs(3).build(),
	];
	let service = service_with(records);
	// Scope to unconfirmed records; the confirmed count still describes
	// the full criteria set minus the confirmed override.
	let resp = service
		.page_records(PageRequest { confirmed: Some(false), ..page_request("proj") })
		.await
		.unwrap();

	assert_eq!(resp.total, 1);
	assert_eq!(resp.confirmed_count, 2);
	assert!(resp.confirmed_count <= 3);
}

#[tokio::test]
async fn page_applies_default_page_size_from_config() {
	let records =
		(0..12).map(|i| RecordBuilder::new("proj").created_at_secs(i).build()).collect::<Vec<_>>();
	let service = service_with(records);
	let resp = service.page_records(page_request("proj")).await.unwrap();

	assert_eq!(
		resp.data.len(),
		usize::try_from(Retrieval::default().default_page_size).unwrap()
	);
	assert_eq!(resp.total, 12);
}

#[tokio::test]
async fn page_rejects_invalid_pagination() {
	let service = service_with(Vec::new());

	for req in [
		PageRequest { page: Some(0), ..page_request("proj") },
		PageRequest { page_size: Some(0), ..page_request("proj") },
		PageRequest {
			page_size: Some(Retrieval::default().max_page_size + 1),
			..page_request("proj")
		},
	] {
		assert!(matches!(
			service.page_records(req).await,
			Err(Error::InvalidRequest { .. })
		));
	}
}

#[tokio::test]
async fn page_rejects_blank_project_id() {
	let service = service_with(Vec::new());

	assert!(matches!(
		service.page_records(page_request("  ")).await,
		Err(Error::InvalidRequest { .. })
	));
}

#[tokio::test]
async fn page_search_targets_selected_field_only() {
	let records = vec![
		RecordBuilder::new("proj").question("alpha").answer("beta").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("beta").answer("alpha").created_at_secs(2).build(),
	];
	let service = service_with(records);
	let resp = service
		.page_records(PageRequest {
			field: Some("answer".to_string()),
			input: Some("beta".to_string()),
			..page_request("proj")
		})
		.await
		.unwrap();

	assert_eq!(resp.total, 1);
	assert_eq!(resp.data[0].question, "alpha");
}

#[tokio::test]
async fn page_unrecognized_search_field_matches_everything() {
	let records = vec![
		RecordBuilder::new("proj").question("alpha").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("beta").created_at_secs(2).build(),
	];
	let service = service_with(records);
	let resp = service
		.page_records(PageRequest {
			field: Some("nonsense".to_string()),
			input: Some("alpha".to_string()),
			..page_request("proj")
		})
		.await
		.unwrap();

	assert_eq!(resp.total, 2);
}

#[tokio::test]
async fn navigate_walks_both_directions() {
	let a = RecordBuilder::new("proj").question("a").created_at_secs(1).build();
	let b = RecordBuilder::new("proj").question("b").created_at_secs(2).build();
	let c = RecordBuilder::new("proj").question("c").created_at_secs(3).build();
	let service = service_with(vec![a.clone(), b.clone(), c.clone()]);
	// In a newest-first listing, "next" from the middle record is the
	// older neighbor and "prev" is the newer one.
	let next = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: b.record_id,
			direction: Direction::Next,
		})
		.await
		.unwrap();
	let prev = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: b.record_id,
			direction: Direction::Prev,
		})
		.await
		.unwrap();

	assert_eq!(next.record.unwrap().record_id, a.record_id);
	assert_eq!(prev.record.unwrap().record_id, c.record_id);
}

#[tokio::test]
async fn navigate_round_trips_through_neighbors() {
	let records = (0..4)
		.map(|i| RecordBuilder::new("proj").created_at_secs(i).build())
		.collect::<Vec<_>>();
	let middle = records[1].clone();
	let service = service_with(records);
	let newer = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: middle.record_id,
			direction: Direction::Prev,
		})
		.await
		.unwrap()
		.record
		.expect("A newer neighbor exists.");
	let back = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: newer.record_id,
			direction: Direction::Next,
		})
		.await
		.unwrap()
		.record
		.expect("Walking back lands on a record.");

	assert!(back.created_at <= middle.created_at);
	assert_eq!(back.record_id, middle.record_id);
}

#[tokio::test]
async fn navigate_returns_none_at_boundaries() {
	let oldest = RecordBuilder::new("proj").created_at_secs(1).build();
	let newest = RecordBuilder::new("proj").created_at_secs(2).build();
	let service = service_with(vec![oldest.clone(), newest.clone()]);
	let past_oldest = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: oldest.record_id,
			direction: Direction::Next,
		})
		.await
		.unwrap();
	let past_newest = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: newest.record_id,
			direction: Direction::Prev,
		})
		.await
		.unwrap();

	assert!(past_oldest.record.is_none());
	assert!(past_newest.record.is_none());
}

#[tokio::test]
async fn navigate_unknown_record_is_not_found() {
	let service = service_with(vec![RecordBuilder::new("proj").build()]);
	let result = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: Uuid::new_v4(),
			direction: Direction::Next,
		})
		.await;

	assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn navigate_stays_within_project() {
	let here = RecordBuilder::new("proj").created_at_secs(2).build();
	let elsewhere = RecordBuilder::new("other").created_at_secs(1).build();
	let service = service_with(vec![here.clone(), elsewhere]);
	let next = service
		.navigate_record(NavigateRequest {
			project_id: "proj".to_string(),
			record_id: here.record_id,
			direction: Direction::Next,
		})
		.await
		.unwrap();

	assert!(next.record.is_none());
}

#[tokio::test]
async fn export_trims_records_to_training_payload() {
	let records = vec![
		RecordBuilder::new("proj").question("q1").cot("thinking").label("math").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("q2").created_at_secs(2).build(),
	];
	let service = service_with(records);
	let resp = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: None,
		})
		.await
		.unwrap();

	assert_eq!(resp.records.len(), 2);
	assert_eq!(resp.records[0].question, "q2");
	assert_eq!(resp.records[1].question, "q1");
	assert_eq!(resp.records[1].cot.as_deref(), Some("thinking"));
	assert_eq!(resp.records[1].question_label, "math");
}

#[tokio::test]
async fn export_balanced_respects_quotas_and_config_order() {
	let records = vec![
		RecordBuilder::new("proj").question("m1").label("math").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("m2").label("math").created_at_secs(2).build(),
		RecordBuilder::new("proj").question("c1").label("code").created_at_secs(3).build(),
	];
	let service = service_with(records);
	let resp = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: Some(
				r#"[{"tag_label": "math", "max_count": 1}, {"tag_label": "code", "max_count": 5}]"#
					.to_string(),
			),
		})
		.await
		.unwrap();

	// One math record despite two existing, then all available code
	// records, in config order.
	assert_eq!(resp.records.len(), 2);
	assert_eq!(resp.records[0].question_label, "math");
	assert_eq!(resp.records[1].question, "c1");
}

#[tokio::test]
async fn export_balanced_keeps_duplicate_entries() {
	let records = vec![
		RecordBuilder::new("proj").question("m1").label("math").created_at_secs(1).build(),
		RecordBuilder::new("proj").question("m2").label("math").created_at_secs(2).build(),
	];
	let service = service_with(records);
	let resp = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: Some(
				r#"[{"tag_label": "math", "max_count": 1}, {"tag_label": "math", "max_count": 1}]"#
					.to_string(),
			),
		})
		.await
		.unwrap();

	assert_eq!(resp.records.len(), 2);
	assert_eq!(resp.records[0], resp.records[1]);
}

#[tokio::test]
async fn export_balanced_skips_missing_tags() {
	let records = vec![RecordBuilder::new("proj").label("math").build()];
	let service = service_with(records);
	let resp = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: Some(r#"[{"tag_label": "absent", "max_count": 3}]"#.to_string()),
		})
		.await
		.unwrap();

	assert!(resp.records.is_empty());
}

#[tokio::test]
async fn export_blank_balance_config_is_plain_export() {
	let records = vec![RecordBuilder::new("proj").label("math").build()];
	let service = service_with(records);
	let resp = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: Some("  ".to_string()),
		})
		.await
		.unwrap();

	assert_eq!(resp.records.len(), 1);
}

#[tokio::test]
async fn export_malformed_balance_config_fails_before_any_read() {
	let spy = Arc::new(SpyStore::new(MemoryRecordStore::default()));
	let service = CorpusService::new(test_config(), spy.clone());
	let result = service
		.export_records(ExportRequest {
			project_id: "proj".to_string(),
			confirmed: None,
			balance_config: Some("not json".to_string()),
		})
		.await;

	assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn tag_statistics_count_each_label_once() {
	let records = vec![
		RecordBuilder::new("proj").label("math").created_at_secs(1).build(),
		RecordBuilder::new("proj").label("math").created_at_secs(2).build(),
		RecordBuilder::new("proj").label("code").created_at_secs(3).build(),
		RecordBuilder::new("proj").created_at_secs(4).build(),
	];
	let service = service_with(records);
	let resp = service
		.tag_statistics(TagStatsRequest { project_id: "proj".to_string(), confirmed: None })
		.await
		.unwrap();
	let mut tags = resp.tags.clone();

	tags.sort_by(|a, b| a.tag_label.cmp(&b.tag_label));

	assert_eq!(tags, vec![
		TagStatItem { tag_label: String::new(), dataset_count: 1 },
		TagStatItem { tag_label: "code".to_string(), dataset_count: 1 },
		TagStatItem { tag_label: "math".to_string(), dataset_count: 2 },
	]);
	assert_eq!(resp.tags.iter().map(|tag| tag.dataset_count).sum::<i64>(), 4);
}

#[tokio::test]
async fn tag_statistics_respect_confirmed_scope() {
	let records = vec![
		RecordBuilder::new("proj").label("math").confirmed(true).created_at_secs(1).build(),
		RecordBuilder::new("proj").label("math").confirmed(false).created_at_secs(2).build(),
	];
	let service = service_with(records);
	let resp = service
		.tag_statistics(TagStatsRequest { project_id: "proj".to_string(), confirmed: Some(true) })
		.await
		.unwrap();

	assert_eq!(resp.tags, vec![TagStatItem { tag_label: "math".to_string(), dataset_count: 1 }]);
}

#[tokio::test]
async fn list_record_ids_matches_listing_order() {
	let old = RecordBuilder::new("proj").created_at_secs(1).build();
	let new = RecordBuilder::new("proj").created_at_secs(2).build();
	let service = service_with(vec![old.clone(), new.clone()]);
	let resp = service.list_record_ids(ids_request("proj")).await.unwrap();

	assert_eq!(resp.ids, vec![new.record_id, old.record_id]);
}

#[tokio::test]
async fn project_counts_cover_total_and_confirmed() {
	let records = vec![
		RecordBuilder::new("proj").confirmed(true).created_at_secs(1).build(),
		RecordBuilder::new("proj").confirmed(false).created_at_secs(2).build(),
		RecordBuilder::new("other").confirmed(true).created_at_secs(3).build(),
	];
	let service = service_with(records);
	let resp = service
		.project_counts(ProjectCountsRequest { project_id: "proj".to_string() })
		.await
		.unwrap();

	assert_eq!(resp.total, 2);
	assert_eq!(resp.confirmed_count, 1);
}

#[tokio::test]
async fn get_record_returns_full_record_or_not_found() {
	let record = RecordBuilder::new("proj").question("q").cot("thinking").build();
	let service = service_with(vec![record.clone()]);
	let found =
		service.get_record(GetRecordRequest { record_id: record.record_id }).await.unwrap();
	let missing = service.get_record(GetRecordRequest { record_id: Uuid::new_v4() }).await;

	assert_eq!(found.record_id, record.record_id);
	assert_eq!(found.cot.as_deref(), Some("thinking"));
	assert!(matches!(missing, Err(Error::NotFound { .. })));
}

/// Store wrapper that counts how many reads reach the backend.
struct SpyStore {
	inner: MemoryRecordStore,
	calls: AtomicUsize,
}
impl SpyStore {
	fn new(inner: MemoryRecordStore) -> Self {
		Self { inner, calls: AtomicUsize::new(0) }
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn record_call(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}
}
impl RecordStore for SpyStore {
	fn find_many<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
		skip: Option<i64>,
		take: Option<i64>,
	) -> BoxFuture<'a, corpus_storage::Result<Vec<DatasetRecord>>> {
		self.record_call();

		self.inner.find_many(filter, order, skip, take)
	}

	fn find_exports<'a>(
		&'a self,
		filter: &'a RecordFilter,
		take: Option<i64>,
	) -> BoxFuture<'a, corpus_storage::Result<Vec<ExportRecord>>> {
		self.record_call();

		self.inner.find_exports(filter, take)
	}

	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, corpus_storage::Result<i64>> {
		self.record_call();

		self.inner.count(filter)
	}

	fn count_by_label<'a>(
		&'a self,
		filter: &'a RecordFilter,
	) -> BoxFuture<'a, corpus_storage::Result<Vec<TagCount>>> {
		self.record_call();

		self.inner.count_by_label(filter)
	}

	fn find_by_id(
		&self,
		record_id: Uuid,
	) -> BoxFuture<'_, corpus_storage::Result<Option<DatasetRecord>>> {
		self.record_call();

		self.inner.find_by_id(record_id)
	}

	fn find_first<'a>(
		&'a self,
		filter: &'a RecordFilter,
		order: CreatedOrder,
	) -> BoxFuture<'a, corpus_storage::Result<Option<DatasetRecord>>> {
		self.record_call();

		self.inner.find_first(filter, order)
	}

	fn find_ids<'a>(
		&'a self,
		filter: &'a RecordFilter,
	) -> BoxFuture<'a, corpus_storage::Result<Vec<Uuid>>> {
		self.record_call();

		self.inner.find_ids(filter)
	}
}
