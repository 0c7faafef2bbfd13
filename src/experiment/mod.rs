//! Experiment execution engine.
//!
//! Drives factorial/OFAT experiments: a named experiment is an ordered list
//! of conditions, each condition a fixed factor-level assignment replayed
//! over a deterministic seed sequence.
//!
//! # Architecture
//!
//! ```text
//! catalog → RunConfig → Runner → ExperimentResult → render_summary
//!                         │
//!                         └── ConditionWorkflow (compose stack + glue scripts)
//! ```
//!
//! The runner executes conditions strictly sequentially, checks for
//! cancellation between conditions, and records one [`RunResult`] per
//! attempted condition — a failing condition is contained, never fatal.
//!
//! # Example
//!
//! ```ignore
//! use doomlab::experiment::{catalog, CancellationToken, Runner};
//! use doomlab::workflow::ComposeWorkflow;
//!
//! let config = catalog::experiment_config("DOE-001", Some(10))?;
//! let workflow = ComposeWorkflow::new(&config.compose_file, &config.glue_script_dir);
//! let runner = Runner::new(config, Box::new(workflow));
//!
//! let result = runner.run(&CancellationToken::new()).await?;
//! println!("{}", doomlab::experiment::render_summary(&result));
//! ```

pub mod cancel;
pub mod catalog;
pub mod condition;
pub mod runner;
pub mod seed;
pub mod summary;

pub use cancel::CancellationToken;
pub use catalog::{experiment_config, known_experiments, ExperimentInfo};
pub use condition::{Condition, RunConfig};
pub use runner::{ExperimentResult, RunError, RunResult, Runner};
pub use seed::{default_seed_set, generate_seed_set};
pub use summary::render_summary;
