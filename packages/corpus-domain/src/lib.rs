pub mod balance;
pub mod filter;

pub use balance::{BalanceEntry, parse_balance_config};
pub use filter::{
	CreatedOrder, DISTILLED_CHUNK_NAME, RecordFilter, RecordView, SearchField, TriState,
	cot_is_empty,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
