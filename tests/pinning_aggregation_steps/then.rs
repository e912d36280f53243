//! Then steps for pinning aggregation BDD scenarios.

use super::world::{PinningWorld, parse_operation};
use pinning_aggregation::pinning::{
    domain::ContentId, ports::Pinning, services::PinningAggregationError,
};
use rstest_bdd_macros::then;

fn backend_id(world: &PinningWorld, position: usize) -> Result<String, eyre::Report> {
    let aggregation = world.aggregation()?;
    position
        .checked_sub(1)
        .and_then(|index| aggregation.backends().get(index))
        .map(|backend| backend.id().to_owned())
        .ok_or_else(|| eyre::eyre!("no backend at position {position}"))
}

#[then("the aggregation holds {count:usize} backends")]
fn aggregation_holds(world: &PinningWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.aggregation()?.len();
    if held != count {
        return Err(eyre::eyre!("expected {count} backends, found {held}"));
    }
    Ok(())
}

#[then(r#"backend {position:usize} has id "{expected}""#)]
fn backend_has_id(
    world: &PinningWorld,
    position: usize,
    expected: String,
) -> Result<(), eyre::Report> {
    let id = backend_id(world, position)?;
    if id != expected {
        return Err(eyre::eyre!("expected backend id '{expected}', found '{id}'"));
    }
    Ok(())
}

#[then(r#"the build fails with unknown pinning service "{designator}""#)]
fn build_fails_with_unknown_service(
    world: &PinningWorld,
    designator: String,
) -> Result<(), eyre::Report> {
    let result = world
        .build_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing build result in scenario world"))?;
    match result {
        Err(PinningAggregationError::UnknownPinningService(found)) if *found == designator => {
            Ok(())
        }
        Err(err) => Err(eyre::eyre!("expected unknown pinning service error, got {err}")),
        Ok(_) => Err(eyre::eyre!("expected build to fail")),
    }
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &PinningWorld) -> Result<(), eyre::Report> {
    match &world.last_operation {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("no operation ran")),
    }
}

#[then(r#"the operation fails with "{message}""#)]
fn operation_fails_with(world: &PinningWorld, message: String) -> Result<(), eyre::Report> {
    match &world.last_operation {
        Some(Err(err)) if err.to_string().contains(&message) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected error '{message}', got '{err}'")),
        Some(Ok(())) => Err(eyre::eyre!("expected operation to fail")),
        None => Err(eyre::eyre!("no operation ran")),
    }
}

#[then(r#"backend {position:usize} recorded {count:usize} "{operation}" call"#)]
fn backend_recorded_calls(
    world: &PinningWorld,
    position: usize,
    count: usize,
    operation: String,
) -> Result<(), eyre::Report> {
    let recorded = world
        .fake_backend(position)?
        .call_count(parse_operation(&operation)?)?;
    if recorded != count {
        return Err(eyre::eyre!("expected {count} {operation} calls, found {recorded}"));
    }
    Ok(())
}

#[then(r#"backend {position:usize} no longer holds "{raw_cid}""#)]
fn backend_no_longer_holds(
    world: &PinningWorld,
    position: usize,
    raw_cid: String,
) -> Result<(), eyre::Report> {
    let cid = ContentId::new(raw_cid)?;
    if world.fake_backend(position)?.is_pinned(&cid)? {
        return Err(eyre::eyre!("backend {position} still holds {cid}"));
    }
    Ok(())
}
