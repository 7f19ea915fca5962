// std
use std::sync::Arc;
// crates
use nomos_da_share::api::{Permission, ShareApi};
use nomos_da_share::availability::sampler::ShareSampler;
use nomos_da_share::context::RequestContext;
use nomos_da_share::error::ShareError;
use nomos_da_share::settings::ShareServiceSettings;
use nomos_da_share::{DefaultShareService, Module, ShareService};
use nomos_da_square::testutils::{header_for, random_eds};
use nomos_log::{Logger, LoggerBackend};
// internal
use crate::common::{MockAvailability, MockGetter, MockHeaders, MockNetwork, SharedNetwork};

const fn assert_module<T: Module + 'static>() {}

// every exposed surface satisfies the module contract
const _: () = {
    assert_module::<ShareApi>();
    assert_module::<ShareService<Arc<MockGetter>, MockAvailability, MockHeaders>>();
    assert_module::<DefaultShareService<SharedNetwork, MockHeaders>>();
    assert_module::<ShareService<Arc<MockGetter>, ShareSampler<Arc<MockGetter>>, MockHeaders>>();
};

fn module() -> (Arc<dyn Module>, Arc<MockGetter>, nomos_da_square::ExtendedHeader) {
    let square = random_eds(2);
    let header = header_for(1, &square);
    let getter = Arc::new(MockGetter::with([(header.data_hash, square)]));
    let service = ShareService::new(
        Arc::clone(&getter),
        MockAvailability::default(),
        MockHeaders::with([header.clone()]),
    );
    (Arc::new(service), getter, header)
}

#[tokio::test]
async fn read_permission_is_required() {
    let (module, getter, header) = module();
    let api = ShareApi::new(module, [Permission::Write]);
    let ctx = RequestContext::new();

    assert!(matches!(
        api.get_eds(&ctx, &header).await,
        Err(ShareError::PermissionDenied("read"))
    ));
    assert!(matches!(
        api.get_range(&ctx, 1, 0, 1).await,
        Err(ShareError::PermissionDenied("read"))
    ));
    assert!(matches!(
        api.shares_available(&ctx, &header).await,
        Err(ShareError::PermissionDenied("read"))
    ));
    assert_eq!(getter.eds_calls.get(), 0);
}

#[tokio::test]
async fn read_permission_reaches_the_module() {
    let (module, getter, header) = module();
    let api = ShareApi::new(module, [Permission::Read]);
    let ctx = RequestContext::new();

    api.shares_available(&ctx, &header).await.unwrap();
    let square = api.get_eds(&ctx, &header).await.unwrap();
    assert_eq!(
        api.get_share(&ctx, &header, 3, 3).await.unwrap(),
        *square.share(3, 3).unwrap()
    );
    let range = api.get_range(&ctx, 1, 0, 4).await.unwrap();
    assert_eq!(range.shares, square.flattened_ods());
    assert_eq!(getter.eds_calls.get(), 2);
}

#[tokio::test]
async fn service_from_yaml_settings() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "logger:\n  backend: Disabled\n  format: Plain\n  level: debug\nstore:\n  directory: {}\nsampling:\n  samples: 4\n  validated_capacity: 8\n  validated_ttl: 10m\nrequest_timeout: 30s\n",
        dir.path().display()
    );
    let settings = ShareServiceSettings::from_yaml_str(&yaml).unwrap();
    let _logger = Logger::init(&settings.logger).unwrap();
    assert_eq!(settings.logger.backend, LoggerBackend::Disabled);

    let square = random_eds(4);
    let header = header_for(10, &square);
    let network = Arc::new(MockNetwork::with([square.clone()]));
    let service = DefaultShareService::from_settings(
        &settings,
        SharedNetwork(Arc::clone(&network)),
        MockHeaders::with([header.clone()]),
    );
    let api = ShareApi::new(Arc::new(service), [Permission::Admin]);
    let ctx = RequestContext::new();

    let range = api.get_range(&ctx, 10, 3, 5).await.unwrap();
    range.proof.verify(&range.shares, &header.data_hash).unwrap();
    api.shares_available(&ctx, &header).await.unwrap();
    assert_eq!(network.shares_calls.get(), 1);
    // the square is cached once reconstructed, sampling needs no network
    assert_eq!(network.sample_calls.get(), 0);
}
