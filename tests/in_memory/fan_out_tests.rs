//! Integration tests for aggregate operations across several backends.

use std::sync::Arc;

use pinning_aggregation::pinning::{
    adapters::memory::PinningOperation,
    domain::ContentId,
    ports::{Pinning, PinningBackendError, PinningContext},
    services::PinningAggregation,
};
use rstest::rstest;

use super::helpers::{RecordingIpfs, as_extra, cid, memory_factory};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pin_and_list_across_ipfs_and_memory_backends(cid: ContentId) {
    let ipfs = Arc::new(RecordingIpfs::default());
    let context = PinningContext::new().with_ipfs(ipfs.clone());
    let fake = memory_factory("fake");
    let aggregation = PinningAggregation::build(
        &context,
        ["ipfs://localhost:5001", "fake://alpha.com"],
        [as_extra(&fake)],
    )
    .await
    .expect("build should succeed");

    aggregation.open().await.expect("open should succeed");
    aggregation.pin(&cid).await.expect("pin should succeed");
    let listing = aggregation.ls().await.expect("ls should succeed");

    assert!(ipfs.is_pinned(&cid));
    let holders: Vec<&str> = listing
        .holders(&cid)
        .expect("cid should be listed")
        .iter()
        .map(|designator| designator.as_str())
        .collect();
    assert_eq!(holders, ["ipfs", "fake"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_fails_when_ipfs_has_no_client() {
    let fake = memory_factory("fake");
    let aggregation = PinningAggregation::build(
        &PinningContext::new(),
        ["fake://alpha.com", "ipfs://localhost:5001"],
        [as_extra(&fake)],
    )
    .await
    .expect("build should succeed");

    let result = aggregation.open().await;

    assert!(matches!(
        result,
        Err(PinningBackendError::Unavailable { ref backend_id, .. })
            if backend_id == "ipfs@http://localhost:5001"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unpin_cleans_up_healthy_backends_when_one_fails(cid: ContentId) {
    let fake = memory_factory("fake");
    let aggregation = PinningAggregation::build(
        &PinningContext::new(),
        ["fake://alpha.com", "fake://beta.com", "fake://gamma.com"],
        [as_extra(&fake)],
    )
    .await
    .expect("build should succeed");
    aggregation.pin(&cid).await.expect("pin should succeed");
    let backends = fake.built().expect("readable");
    let middle = backends.get(1).expect("middle backend");
    middle
        .fail_on(PinningOperation::Unpin, "unreachable")
        .expect("script failure");

    aggregation.unpin(&cid).await.expect("unpin always resolves");

    let still_pinned: Vec<bool> = backends
        .iter()
        .map(|backend| backend.is_pinned(&cid).expect("readable"))
        .collect();
    assert_eq!(still_pinned, [false, true, false]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn info_merges_reports_from_every_backend() {
    let fake = memory_factory("fake");
    let aggregation = PinningAggregation::build(
        &PinningContext::new(),
        ["fake://alpha.com", "ipfs+https://example.com"],
        [as_extra(&fake)],
    )
    .await
    .expect("build should succeed");

    let info = aggregation.info().await.expect("info should succeed");

    assert_eq!(info.len(), 2);
    assert!(info.get("ipfs@https://example.com:5001").is_some());
    assert!(info.get("fake://alpha.com").is_some());
}
