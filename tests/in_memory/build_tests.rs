//! Integration tests for building aggregations from descriptors.

use pinning_aggregation::pinning::{
    domain::{PinningDomainError, PinningSettings},
    ports::{Pinning, PinningBackendError, PinningContext},
    services::{PinningAggregation, PinningAggregationError, PinningFactoryRegistry},
};
use rstest::rstest;

use super::helpers::{as_extra, memory_factory};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settings_build_backends_in_configured_order() {
    let fake = memory_factory("fake");
    let settings = PinningSettings::from_comma_separated(
        "fake://alpha.com, ipfs://localhost, fake://beta.com",
    );

    let aggregation =
        PinningAggregation::build(&PinningContext::new(), settings.descriptors(), [as_extra(&fake)])
            .await
            .expect("build should succeed");

    let ids: Vec<&str> = aggregation
        .backends()
        .iter()
        .map(|backend| backend.id())
        .collect();
    assert_eq!(
        ids,
        [
            "fake://alpha.com",
            "ipfs@http://localhost:5001",
            "fake://beta.com"
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_registry_without_builtins_rejects_ipfs() {
    let registry = PinningFactoryRegistry::empty().with_factory(as_extra(&memory_factory("fake")));

    let result = PinningAggregation::build_with_registry(
        &registry,
        &PinningContext::new(),
        ["ipfs://localhost:5001"],
    )
    .await;

    assert!(matches!(
        result,
        Err(PinningAggregationError::UnknownPinningService(ref designator)) if designator == "ipfs"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_descriptor_fails_build() {
    let result =
        PinningAggregation::build(&PinningContext::new(), ["localhost:5001"], []).await;

    assert!(matches!(
        result,
        Err(PinningAggregationError::Domain(
            PinningDomainError::MalformedDescriptor { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn powergate_descriptor_without_token_fails_build() {
    let result =
        PinningAggregation::build(&PinningContext::new(), ["powergate://localhost"], []).await;

    assert!(matches!(result, Err(PinningAggregationError::Backend(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_descriptor_list_builds_empty_aggregation() {
    let aggregation = PinningAggregation::build(
        &PinningContext::new(),
        PinningSettings::default().descriptors(),
        [],
    )
    .await
    .expect("build should succeed");

    assert!(aggregation.is_empty());
    aggregation.open().await.expect("open of nothing succeeds");
}

#[rstest]
#[case("ipfs://localhost:5001/api/v0")]
#[case("powergate://localhost/v1?token=secret")]
#[tokio::test(flavor = "multi_thread")]
async fn builtin_descriptor_with_path_fails_build(#[case] descriptor: &str) {
    let result = PinningAggregation::build(&PinningContext::new(), [descriptor], []).await;

    assert!(matches!(
        result,
        Err(PinningAggregationError::Backend(
            PinningBackendError::InvalidConnectionString { .. }
        ))
    ));
}
