//! Given steps for pinning aggregation BDD scenarios.

use super::world::PinningWorld;
use rstest_bdd_macros::given;

#[given(r#"the descriptor "{descriptor}""#)]
fn the_descriptor(world: &mut PinningWorld, descriptor: String) {
    world.descriptors.push(descriptor);
}
