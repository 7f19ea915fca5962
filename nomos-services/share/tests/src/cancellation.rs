// std
use std::sync::Arc;
use std::time::Duration;
// crates
use nomos_da_share::context::RequestContext;
use nomos_da_share::error::ShareError;
use nomos_da_share::{Module, ShareService};
use nomos_da_square::testutils::{header_for, random_eds};
// internal
use crate::common::{MockAvailability, MockGetter, MockHeaders};

fn stalled_service() -> ShareService<Arc<MockGetter>, MockAvailability, MockHeaders> {
    let header = header_for(1, &random_eds(2));
    ShareService::new(
        Arc::new(MockGetter::stalled()),
        MockAvailability::default(),
        MockHeaders::with([header]),
    )
}

#[tokio::test]
async fn cancelled_request_never_reaches_the_getter() {
    let service = stalled_service();
    let header = header_for(1, &random_eds(2));
    let ctx = RequestContext::new();
    ctx.cancel();

    let error = service.get_eds(&ctx, &header).await.unwrap_err();
    assert!(matches!(error, ShareError::Cancelled));
    assert!(error.is_cancellation());
}

#[tokio::test]
async fn cancelling_aborts_a_pending_retrieval() {
    let service = stalled_service();
    let ctx = RequestContext::new();
    let token = ctx.cancel_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    });

    let error = service.get_range(&ctx, 1, 0, 2).await.unwrap_err();
    assert!(matches!(error, ShareError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn deadline_bounds_the_request() {
    let service = stalled_service();
    let header = header_for(1, &random_eds(2));
    let ctx = RequestContext::with_timeout(Duration::from_secs(1));

    let error = service
        .get_shares_by_namespace(&ctx, &header, nomos_da_square::testutils::namespace(1))
        .await
        .unwrap_err();
    assert!(matches!(error, ShareError::DeadlineExceeded));
}

#[tokio::test(start_paused = true)]
async fn service_timeout_applies_without_caller_deadline() {
    let service = stalled_service().with_request_timeout(Some(Duration::from_secs(2)));
    let header = header_for(1, &random_eds(2));

    let error = service
        .get_share(&RequestContext::new(), &header, 0, 0)
        .await
        .unwrap_err();
    assert!(matches!(error, ShareError::DeadlineExceeded));
}

#[tokio::test]
async fn out_of_range_share_is_checked_before_delegating() {
    let getter = Arc::new(MockGetter::stalled());
    let service = ShareService::new(
        Arc::clone(&getter),
        MockAvailability::default(),
        MockHeaders::default(),
    );
    let header = header_for(1, &random_eds(2));

    let error = service
        .get_share(&RequestContext::new(), &header, 0, 4)
        .await
        .unwrap_err();
    assert!(error.is_out_of_range());
    assert_eq!(getter.share_calls.get(), 0);
}
