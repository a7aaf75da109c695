//! placement-interchange: JSON codec for placement policies.
//!
//! Converts between [`placement_core::PlacementPolicy`] and the JSON
//! document shape exchanged with the storage network:
//!
//! ```text
//! { "replicas": [{"count": 3, "selector": "X"}],
//!   "container_backup_factor": 2,
//!   "selectors": [{"count": 3, "attribute": "City", "clause": "DISTINCT",
//!                  "filter": "Good", "name": "X"}],
//!   "filters": [{"name": "Good", "op": "AND", "filters": [...]}] }
//! ```
//!
//! Decoding only checks the document's shape and enum spellings. It does
//! not check that selectors and replicas reference declared names; call
//! [`placement_core::validate`] for that.

pub mod deserialize;
pub mod serialize;

pub use deserialize::{from_json, from_value, InterchangeError};
pub use serialize::{to_json, to_value};
