//! # Roadcheck Solver
//!
//! Core logic for spotting the road distance a task payload most overstates.
//!
//! ## Pipeline
//!
//! ```text
//! TaskPayload
//!     │
//!     ├──> ScenarioCache (content-keyed memo)
//!     │      └─> hit: previously computed answers
//!     │
//!     └──> miss: for each question
//!            ├──> Path Search (8-way grid, goal-biased)
//!            └──> Anomaly Ranker (claimed - computed)
//!                   └─> one Answer per question, stored for reuse
//! ```
//!
//! No I/O happens here: the payload arrives parsed, the answers leave as
//! values. Fetching and submitting are a collaborator's job.
//!
//! ## Example
//!
//! ```
//! use roadcheck_protocol::TaskPayload;
//! use roadcheck_solver::{solve_task, ScenarioCache};
//!
//! let payload: TaskPayload = serde_json::from_value(serde_json::json!({
//!     "ID": 9,
//!     "questions": [{
//!         "ID": 1,
//!         "params": { "map": { "cities": [
//!             { "name": "A", "position": { "x": 0, "y": 0 },
//!               "distances": { "B": 10 } },
//!             { "name": "B", "position": { "x": 3, "y": 0 },
//!               "distances": {} }
//!         ] } }
//!     }]
//! })).expect("payload");
//!
//! let mut cache = ScenarioCache::new();
//! let report = solve_task(&mut cache, &payload);
//! assert_eq!(report.answers, vec![Some(("A".into(), "B".into()))]);
//! assert!(solve_task(&mut cache, &payload).cache_hit);
//! ```

mod cache;
mod ranker;
mod search;
mod solve;

pub use cache::ScenarioCache;
pub use ranker::rank_worst_edge;
pub use search::{euclidean_distance, shortest_path_length};
pub use solve::{solve_task, SolveReport};
