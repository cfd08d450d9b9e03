//! Ordered execution of a schema's validation pipeline.
//!
//! The executor runs actions in declaration order so that one run can
//! collect several independent issues. Two flags cut it short:
//! `abort_early` stops as soon as the dataset carries any issue (including
//! one appended upstream of this pipeline), `abort_pipe_early` stops only
//! the current pipeline at its first failure.
//!
//! Precondition (not checked here): the dataset is typed at entry. The
//! owning schema confirms the base type before handing the dataset over
//! and skips the pipeline entirely when the type check fails.

use crate::action::Action;
use crate::config::Config;
use crate::dataset::Dataset;

/// Runs a pipeline of actions over a typed dataset.
///
/// An empty pipeline is a no-op pass-through.
pub fn run_pipeline(actions: &[Action], dataset: &mut Dataset, config: &Config) {
    for action in actions {
        if config.abort_early && dataset.has_issues() {
            return;
        }
        let passed = action.run(dataset, config);
        if !passed && config.abort_pipe_early {
            return;
        }
    }
}
