use seed_share::{
    ApplicationRequest, ApplicationService, LocalStorage, SeedError, SeedStore, SeedVariety,
    SelectionPolicy, StoreOptions,
};
use std::sync::Arc;
use tempfile::TempDir;

fn seed(id: i64, name: &str, quantity: u32) -> SeedVariety {
    SeedVariety {
        id,
        family: "가지과".to_string(),
        name: name.to_string(),
        quantity,
    }
}

fn request(name: String, seeds: Vec<i64>) -> ApplicationRequest {
    ApplicationRequest {
        name: Some(name),
        phone: Some("010-0000-0000".to_string()),
        address: Some("Daejeon".to_string()),
        is_member: false,
        selected_seeds: Some(seeds),
    }
}

async fn setup(temp_dir: &TempDir, seeds: Vec<SeedVariety>) -> (Arc<SeedStore>, Arc<ApplicationService>) {
    let storage = Arc::new(LocalStorage::new(temp_dir.path()));
    let store = Arc::new(
        SeedStore::open(storage, StoreOptions::default())
            .await
            .unwrap(),
    );
    store.replace_seeds(seeds).await.unwrap();
    let service = Arc::new(ApplicationService::new(
        store.clone(),
        SelectionPolicy::default(),
    ));
    (store, service)
}

/// 最後一包種子被兩人同時申請：只有一人成功
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_submissions_race_for_last_unit() {
    let temp_dir = TempDir::new().unwrap();
    let (store, service) = setup(&temp_dir, vec![seed(1, "까망가지", 1)]).await;

    let a = {
        let service = service.clone();
        tokio::spawn(async move { service.submit(request("A".to_string(), vec![1])).await })
    };
    let b = {
        let service = service.clone();
        tokio::spawn(async move { service.submit(request("B".to_string(), vec![1])).await })
    };

    let results = vec![a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let stock_errors = results
        .iter()
        .filter(|r| matches!(r, Err(SeedError::OutOfStock { id: 1, .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(stock_errors, 1);
    assert_eq!(store.list_seeds().await[0].quantity, 0);
    assert_eq!(store.list_applicants().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_submissions_never_oversell() {
    let temp_dir = TempDir::new().unwrap();
    let (store, service) = setup(&temp_dir, vec![seed(1, "상추", 10), seed(2, "갓", 25)]).await;

    let mut handles = Vec::new();
    for i in 0..40 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.submit(request(format!("applicant-{}", i), vec![2, 1])).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(SeedError::OutOfStock { id: 1, .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(successes, 10);
    let seeds = store.list_seeds().await;
    assert_eq!(seeds[0].quantity, 0);
    // 失敗的申請不得扣到第二項
    assert_eq!(seeds[1].quantity, 15);
    assert_eq!(store.list_applicants().await.len(), 10);
}

/// 管理者整批取代與申請同時進行時，每次申請都只看到其中一個完整版本
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_replace_all_is_serialized_with_submissions() {
    let temp_dir = TempDir::new().unwrap();
    let (store, service) = setup(&temp_dir, vec![seed(1, "상추", 5)]).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.submit(request(format!("applicant-{}", i), vec![1])).await
        }));
    }
    let admin = {
        let store = store.clone();
        tokio::spawn(async move { store.replace_seeds(vec![seed(1, "상추", 5)]).await })
    };

    admin.await.unwrap().unwrap();
    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(SeedError::OutOfStock { id: 1, .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    let quantity = store.list_seeds().await[0].quantity as usize;
    let accepted = store.list_applicants().await.len();
    assert_eq!(successes, accepted);

    // 取代之後成功的申請恰好扣掉 5 - quantity；其餘都發生在取代之前，最多 5 筆
    let after_replace = 5 - quantity;
    assert!(accepted >= after_replace);
    let before_replace = accepted - after_replace;
    assert!(before_replace <= 5);
}
