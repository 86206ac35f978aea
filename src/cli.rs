//! CLI helper functions

use crate::{
    config::PipelineConfig,
    etl::Pipeline,
    jobs::{AggregateOutcome, AggregateTransformer, JOIN_KEY, JoinOutcome, JoinTransformer},
};
use eyre::Result;
use owo_colors::OwoColorize;

/// Join employees with departments
///
/// Pipeline: SourceChain → JoinTransformer → SinkChain
pub async fn run_join(config: &PipelineConfig) -> Result<JoinOutcome> {
    let datasets = config.join_datasets();
    log::info!(
        "Joining {} with {} on {}",
        config.employees_key.bright_black(),
        config.departments_key.bright_black(),
        JOIN_KEY.cyan()
    );

    let sources = config.source_chain(datasets);
    log::debug!("Sources: {}", sources.names().join(" → "));
    let sinks = config.sink_chain();

    let transformer = JoinTransformer::new(config.join_outputs.clone());
    let outcome = Pipeline::new(sources, transformer, sinks).run().await?;

    log::info!(
        "✓ Joined {} inner, {} left, {} right row(s)",
        outcome.inner.height().cyan(),
        outcome.left.height().cyan(),
        outcome.right.height().cyan()
    );
    Ok(outcome)
}

/// Summarise the financial dataset by region and by year
///
/// Pipeline: SourceChain → AggregateTransformer → SinkChain
pub async fn run_aggregate(config: &PipelineConfig) -> Result<AggregateOutcome> {
    let datasets = config.aggregate_datasets();
    log::info!(
        "Aggregating {} ({:?} group order)",
        config.financial_key.bright_black(),
        config.group_order
    );

    let sources = config.source_chain(datasets);
    log::debug!("Sources: {}", sources.names().join(" → "));
    let sinks = config.sink_chain();

    let transformer = AggregateTransformer::new(config.group_order, &config.aggregate_output);
    let outcome = Pipeline::new(sources, transformer, sinks).run().await?;

    log::info!(
        "✓ Summarised {} row(s) into {} region(s) and {} year(s)",
        outcome.dataset.height().cyan(),
        outcome.by_region.height().cyan(),
        outcome.by_year.height().cyan()
    );
    Ok(outcome)
}
