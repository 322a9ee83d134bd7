//! Aggregation engine: head-to-head records and season superlatives,
//! computed per request from the current matchup and team tables.

pub mod head_to_head;
pub mod records;

pub use head_to_head::{HeadToHeadRecord, filter_by_owner, head_to_head_records};
pub use records::{RecordEntry, all_owners, season_records, week_score_records};
