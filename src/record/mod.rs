//! Run records: the audit trail of an experiment batch
//!
//! Every pipeline stage reports what it did as plain values instead of
//! writing to shared logging state. The runner collects them here.
//!
//! ## Schema Overview
//!
//! ```text
//! RunLog (1) ──< RunRecord (N) [one per experiment × tool]
//!                     │
//!                     └──< CombinationRecord (N) [one per visited combination]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use expauto::record::{CombinationRecord, RunLog, RunRecord, RunStatus};
//!
//! let mut log = RunLog::new();
//!
//! let mut run = RunRecord::builder("(exp-1, dry) Sweep (1700000000000.0)", "exp-1")
//!     .name("(exp-1, dry) Sweep")
//!     .tool("dry")
//!     .repetitions(3)
//!     .build();
//! run.start();
//! log.push(run);
//!
//! let combination = CombinationRecord::new("loops=1", "out/loops=1", vec![], vec![]);
//! log.current_mut().unwrap().push_combination(combination);
//! log.current_mut().unwrap().complete(RunStatus::Success);
//!
//! assert_eq!(log.combination_count(), 1);
//! ```

mod combination_record;
mod run_log;
mod run_record;

pub use combination_record::CombinationRecord;
pub use run_log::RunLog;
pub use run_record::{RunRecord, RunRecordBuilder, RunStatus};
