mod common;

use common::{collection_ids, RecordingStore, DB};
use restate_data::{
    get_latest_properties, get_properties, AsyncResource, CollectionIds, Document, MemoryStore,
    Property, PropertyQuery, PropertyType, ResourceOptions, SeedPipeline, SettlePolicy,
};
use std::sync::Arc;
use std::time::Duration;

async fn seeded_store() -> MemoryStore {
    let memory = MemoryStore::new();
    SeedPipeline::new(Arc::new(memory.clone()), collection_ids())
        .with_seed(1)
        .run()
        .await
        .unwrap();
    memory
}

fn properties_resource<S>(
    store: Arc<S>,
    ids: CollectionIds,
    params: PropertyQuery,
    options: ResourceOptions,
) -> AsyncResource<PropertyQuery, Vec<Document>>
where
    S: restate_data::DocumentStore + 'static,
{
    AsyncResource::with_store(
        store,
        move |store: Arc<S>, params: PropertyQuery| {
            let ids = ids.clone();
            async move {
                get_properties(&*store, &ids, &params)
                    .await
                    .map_err(anyhow::Error::from)
            }
        },
        params,
        options,
    )
}

#[tokio::test]
async fn auto_fetch_loads_on_construction() {
    let store = Arc::new(seeded_store().await);
    let resource = properties_resource(
        store,
        collection_ids(),
        PropertyQuery::new("All", "", 6),
        ResourceOptions::default(),
    );

    assert!(resource.loading());
    let state = resource.settled().await;
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.data.map(|docs| docs.len()), Some(6));
}

#[tokio::test]
async fn refetch_applies_new_filter() {
    let store = Arc::new(seeded_store().await);
    let resource = properties_resource(
        store.clone(),
        collection_ids(),
        PropertyQuery::new("All", "", 6),
        ResourceOptions::manual(),
    );

    let wanted = store
        .documents(DB, "properties")
        .first()
        .map(|doc| doc.decode::<Property>().unwrap().property_type)
        .unwrap_or(PropertyType::House);

    resource
        .refetch(Some(PropertyQuery::new(wanted.to_string(), "", 20)))
        .await;

    assert_eq!(resource.params().filter, Some(wanted.to_string()));
    let data = resource.data().unwrap();
    assert!(!data.is_empty());
    for document in data {
        assert_eq!(document.decode::<Property>().unwrap().property_type, wanted);
    }
}

#[tokio::test]
async fn empty_result_is_success() {
    let store = Arc::new(seeded_store().await);
    let resource = properties_resource(
        store,
        collection_ids(),
        PropertyQuery::new("All", "no listing matches this", 20),
        ResourceOptions::manual(),
    );

    resource.execute(None).await;
    assert_eq!(resource.data(), Some(Vec::new()));
    assert_eq!(resource.error(), None);
}

#[tokio::test]
async fn store_failure_surfaces_as_error_string() {
    let memory = seeded_store().await;
    let healthy = properties_resource(
        Arc::new(memory.clone()),
        collection_ids(),
        PropertyQuery::default(),
        ResourceOptions::manual(),
    );
    healthy.execute(None).await;
    assert_eq!(healthy.data().map(|docs| docs.len()), Some(20));

    let failing = Arc::new(RecordingStore::new(memory).failing_list("properties"));
    let resource = properties_resource(
        failing,
        collection_ids(),
        PropertyQuery::default(),
        ResourceOptions::manual(),
    );
    resource.execute(None).await;

    assert!(!resource.loading());
    assert_eq!(resource.data(), None);
    assert!(resource.error().unwrap().contains("simulated list failure"));
}

#[tokio::test]
async fn latest_properties_are_the_oldest_five() {
    let memory = seeded_store().await;
    let ids = collection_ids();
    let store = Arc::new(memory.clone());
    let resource = AsyncResource::with_store(
        store,
        move |store: Arc<MemoryStore>, _: ()| {
            let ids = ids.clone();
            async move {
                get_latest_properties(&*store, &ids)
                    .await
                    .map_err(anyhow::Error::from)
            }
        },
        (),
        ResourceOptions::default(),
    );

    let latest = resource.settled().await.data.unwrap();
    let expected: Vec<_> = memory
        .documents(DB, "properties")
        .into_iter()
        .take(5)
        .map(|doc| doc.id)
        .collect();
    assert_eq!(latest.into_iter().map(|doc| doc.id).collect::<Vec<_>>(), expected);
}

fn delayed(options: ResourceOptions) -> AsyncResource<u64, u64> {
    AsyncResource::new(
        |delay_ms: u64| async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok::<_, anyhow::Error>(delay_ms)
        },
        0,
        options,
    )
}

#[tokio::test(start_paused = true)]
async fn overlapping_calls_last_settled_wins() {
    let resource = delayed(ResourceOptions::manual());

    tokio::join!(resource.execute(Some(100)), resource.execute(Some(10)));

    assert_eq!(resource.data(), Some(100));
    assert!(!resource.loading());
}

#[tokio::test(start_paused = true)]
async fn last_settled_wins_clears_loading_at_first_settle() {
    let resource = delayed(ResourceOptions::manual());

    let slow = {
        let resource = resource.clone();
        tokio::spawn(async move { resource.execute(Some(100)).await })
    };
    tokio::task::yield_now().await;
    assert!(resource.loading());

    resource.execute(Some(10)).await;
    assert!(!slow.is_finished());
    assert!(!resource.loading());
    assert_eq!(resource.data(), Some(10));

    slow.await.unwrap();
    assert!(!resource.loading());
    assert_eq!(resource.data(), Some(100));
}

#[tokio::test(start_paused = true)]
async fn overlapping_calls_latest_request_wins() {
    let resource =
        delayed(ResourceOptions::manual().with_settle_policy(SettlePolicy::LatestRequestWins));

    tokio::join!(resource.execute(Some(100)), resource.execute(Some(10)));

    assert_eq!(resource.data(), Some(10));
    assert!(!resource.loading());
}

#[tokio::test(start_paused = true)]
async fn reset_discards_in_flight_result_under_latest_request_policy() {
    let resource =
        delayed(ResourceOptions::default().with_settle_policy(SettlePolicy::LatestRequestWins));
    assert!(resource.loading());

    resource.reset();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = resource.snapshot();
    assert_eq!(state.data, None);
    assert!(!state.loading);
}

#[test]
fn auto_fetch_without_runtime_stays_idle() {
    let resource = delayed(ResourceOptions::default());
    assert!(!resource.loading());
    assert_eq!(resource.data(), None);
}
