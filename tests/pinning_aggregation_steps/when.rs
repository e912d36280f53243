//! When steps for pinning aggregation BDD scenarios.

use std::sync::Arc;

use super::world::{PinningWorld, parse_operation, run_async};
use pinning_aggregation::pinning::{
    domain::ContentId,
    ports::{Pinning, PinningContext, PinningFactory},
    services::PinningAggregation,
};
use rstest_bdd_macros::when;

#[when("the aggregation is built")]
fn the_aggregation_is_built(world: &mut PinningWorld) {
    let extra: Arc<dyn PinningFactory> = world.fake_factory.clone();
    let result = run_async(PinningAggregation::build(
        &PinningContext::new(),
        &world.descriptors,
        [extra],
    ));
    world.build_result = Some(result);
}

#[when(r#"backend {position:usize} is scripted to fail "{operation}" with "{message}""#)]
fn backend_is_scripted_to_fail(
    world: &mut PinningWorld,
    position: usize,
    operation: String,
    message: String,
) -> Result<(), eyre::Report> {
    let backend = world.fake_backend(position)?;
    backend.fail_on(parse_operation(&operation)?, message)?;
    Ok(())
}

#[when(r#"the CID "{raw_cid}" is pinned"#)]
fn the_cid_is_pinned(world: &mut PinningWorld, raw_cid: String) -> Result<(), eyre::Report> {
    let cid = ContentId::new(raw_cid)?;
    let result = run_async(world.aggregation()?.pin(&cid));
    world.last_operation = Some(result);
    Ok(())
}

#[when(r#"the CID "{raw_cid}" is unpinned"#)]
fn the_cid_is_unpinned(world: &mut PinningWorld, raw_cid: String) -> Result<(), eyre::Report> {
    let cid = ContentId::new(raw_cid)?;
    let result = run_async(world.aggregation()?.unpin(&cid));
    world.last_operation = Some(result);
    Ok(())
}
