//! Listing service tests against the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use common::{AppError, RepositoryError};
use domain::{filter_by_category, Category, ListingForm, Profile, UpdateProfile};
use listing_repository::{ListingManager, ListingService, MemoryStore};

fn service_with(store: MemoryStore) -> (ListingManager, Arc<MemoryStore>) {
    let store = Arc::new(store);
    (ListingManager::new(store.clone(), store.clone()), store)
}

fn form(title: &str, category: Category) -> ListingForm {
    ListingForm {
        title: title.to_string(),
        description: format!("{} açıklaması", title),
        category: category.as_str().to_string(),
        price: "100".to_string(),
        location: "İzmir".to_string(),
        ..ListingForm::default()
    }
}

#[tokio::test]
async fn test_boya_listing_is_created_and_listed_first() {
    let (service, _store) = service_with(MemoryStore::new());
    let owner = Uuid::new_v4();

    service.create(form("Temizlikçi", Category::Cleaning), owner).await.unwrap();

    let boya = ListingForm {
        title: "Boya".to_string(),
        description: "İki oda boya badana".to_string(),
        category: "Ev & Tadilat".to_string(),
        price: "150".to_string(),
        price_type: "sabit".to_string(),
        location: "İstanbul".to_string(),
    };
    let created = service.create(boya, owner).await.unwrap();

    assert_eq!(created.price, 150.0);
    assert_eq!(created.user_id, owner);

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].created_at, created.created_at);
}

#[tokio::test]
async fn test_list_mine_only_returns_owned() {
    let (service, _store) = service_with(MemoryStore::new());
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();

    service.create(form("Ders", Category::Education), me).await.unwrap();
    service.create(form("Nakliye", Category::Transport), other).await.unwrap();
    service.create(form("Kurulum", Category::Technology), me).await.unwrap();

    let mine = service.list_mine(me).await.unwrap();
    let titles: Vec<_> = mine.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Kurulum", "Ders"]);
}

#[tokio::test]
async fn test_empty_category_after_load() {
    let (service, _store) = service_with(MemoryStore::new());
    let owner = Uuid::new_v4();
    service.create(form("Temizlik", Category::Cleaning), owner).await.unwrap();
    service.create(form("Tamir", Category::TechnicalService), owner).await.unwrap();

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(filter_by_category(&all, Some("Teknoloji")).is_empty());
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let (service, store) = service_with(MemoryStore::new());
    let owner = Uuid::new_v4();

    let keep = service.create(form("Bir", Category::Events), owner).await.unwrap();
    let gone = service.create(form("İki", Category::Events), owner).await.unwrap();

    service.delete(gone.id, owner).await.unwrap();

    let remaining = service.list_mine(owner).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
    assert_eq!(store.listing_count(), 1);
}

#[tokio::test]
async fn test_delete_by_stranger_is_forbidden() {
    let (service, store) = service_with(MemoryStore::new());
    let owner = Uuid::new_v4();
    let listing = service.create(form("Bir", Category::Events), owner).await.unwrap();

    let err = service.delete(listing.id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, AppError::Repository(RepositoryError::Forbidden));
    assert_eq!(store.listing_count(), 1);

    let err = service.delete(Uuid::new_v4(), owner).await.unwrap_err();
    assert_eq!(err, AppError::Repository(RepositoryError::NotFound));
}

#[tokio::test]
async fn test_profile_update_keeps_unspecified_fields() {
    let user_id = Uuid::new_v4();
    let existing = Profile {
        id: user_id,
        full_name: Some("Ada".to_string()),
        phone: Some("0555 111 22 33".to_string()),
        avatar_url: None,
    };
    let (service, _store) = service_with(MemoryStore::new().with_profile(existing));

    let patch = UpdateProfile {
        full_name: Some("Ada Lovelace".to_string()),
        ..Default::default()
    };
    let updated = service.update_profile(user_id, patch).await.unwrap();

    assert_eq!(updated.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(updated.phone.as_deref(), Some("0555 111 22 33"));
    assert_eq!(service.get_profile(user_id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_missing_profile() {
    let (service, _store) = service_with(MemoryStore::new());
    let user_id = Uuid::new_v4();

    assert_eq!(service.get_profile(user_id).await.unwrap(), None);

    let patch = UpdateProfile {
        phone: Some("1".to_string()),
        ..Default::default()
    };
    let err = service.update_profile(user_id, patch).await.unwrap_err();
    assert_eq!(err, AppError::Repository(RepositoryError::NotFound));
}
