pub mod config;
pub mod dispatch;
pub mod parse;
pub mod report;
pub mod schema;
pub mod summary;
pub mod sync;

pub use dispatch::dispatch;

use sitrep_config::SitrepConfig;

use crate::pipeline::PipelineOptions;

fn pipeline_options(config: &SitrepConfig, enrich: bool) -> PipelineOptions {
    PipelineOptions {
        enrich,
        batch_size: config.jira.batch_size,
        max_results: config.jira.max_results,
    }
}
