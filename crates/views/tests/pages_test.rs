//! Page flows against the in-memory auth provider and data store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use uuid::Uuid;

use common::{RepositoryError, UiConfig};
use domain::{Category, ListingForm, NewListing, PriceType, Profile, Session};
use listing_repository::{ListingManager, ListingRepository, MemoryStore, ProfileRepository};
use session_gateway::{MemoryAuthProvider, MemoryStorage, SessionGateway, SessionManager};
use views::messages;
use views::{
    Access, AppContext, CreateListingView, Dialog, EditProfileView, HeaderAction, HeaderView,
    History, HomeView, LoginMode, LoginView, Navigator, Notice, ProfileView, Route,
};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "secret1";

struct Harness {
    ctx: AppContext,
    history: Arc<History>,
    gateway: Arc<SessionManager>,
    auth: Arc<MemoryAuthProvider>,
    store: Arc<MemoryStore>,
}

fn harness_with(start: Route, store: MemoryStore, ui: UiConfig) -> Harness {
    let auth = Arc::new(MemoryAuthProvider::new().with_user(EMAIL, PASSWORD, Some("Ada Lovelace")));
    let store = match auth.user_id(EMAIL) {
        Some(id) => store.with_profile(Profile {
            id,
            full_name: Some("Ada Lovelace".to_string()),
            phone: Some("0555 123 45 67".to_string()),
            avatar_url: None,
        }),
        None => store,
    };
    let store = Arc::new(store);
    let gateway = Arc::new(SessionManager::new(
        auth.clone(),
        Arc::new(MemoryStorage::new()),
        ChronoDuration::seconds(10),
    ));
    let history = Arc::new(History::new(start));
    let ctx = AppContext::new(
        gateway.clone(),
        Arc::new(ListingManager::new(store.clone(), store.clone())),
        history.clone(),
        ui,
    );

    Harness {
        ctx,
        history,
        gateway,
        auth,
        store,
    }
}

fn harness(start: Route) -> Harness {
    harness_with(start, MemoryStore::new(), UiConfig::immediate())
}

async fn sign_in(h: &Harness) -> Session {
    h.gateway.sign_in(EMAIL, PASSWORD).await.unwrap()
}

async fn seed(h: &Harness, title: &str, category: Category, owner: Uuid) -> Uuid {
    h.store
        .insert(NewListing {
            title: title.to_string(),
            description: format!("{} hizmeti", title),
            category,
            price: 100.0,
            price_type: PriceType::Hourly,
            location: "İstanbul".to_string(),
            user_id: owner,
        })
        .await
        .unwrap()
        .id
}

fn titles(listings: &[domain::Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.title.as_str()).collect()
}

// =============================================================================
// Home
// =============================================================================

#[tokio::test]
async fn test_home_unfiltered_shows_everything_newest_first() {
    let h = harness(Route::home_in("Tümü"));
    let owner = Uuid::new_v4();
    seed(&h, "Temizlik", Category::Cleaning, owner).await;
    seed(&h, "Boya", Category::HomeRenovation, owner).await;

    let mut home = HomeView::new(h.ctx.clone());
    assert!(home.is_loading());
    home.load().await;

    assert!(!home.is_loading());
    assert_eq!(titles(&home.displayed()), vec!["Boya", "Temizlik"]);
    assert_eq!(home.displayed().as_ptr(), home.listings().as_ptr());
    assert!(home.to_string().contains("Boya"));
}

#[tokio::test]
async fn test_home_follows_route_category() {
    let h = harness(Route::home_in("Temizlik"));
    let owner = Uuid::new_v4();
    seed(&h, "Ofis", Category::Cleaning, owner).await;
    seed(&h, "Ders", Category::Education, owner).await;
    seed(&h, "Ev", Category::Cleaning, owner).await;

    let mut home = HomeView::new(h.ctx.clone());
    home.load().await;
    assert_eq!(titles(&home.displayed()), vec!["Ev", "Ofis"]);

    // Navigation re-derives without refetching
    h.store.set_failure(Some(RepositoryError::network("offline")));
    h.history.navigate(Route::home_in("Eğitim"));
    home.sync_route();
    assert_eq!(titles(&home.displayed()), vec!["Ders"]);

    home.set_category(None);
    assert_eq!(home.displayed().len(), 3);
}

#[tokio::test]
async fn test_home_empty_states() {
    let h = harness(Route::home_in("Teknoloji"));

    let mut home = HomeView::new(h.ctx.clone());
    home.load().await;
    assert_eq!(home.empty_state().as_deref(), Some(messages::NO_LISTINGS));

    seed(&h, "Temizlik", Category::Cleaning, Uuid::new_v4()).await;
    seed(&h, "Boya", Category::HomeRenovation, Uuid::new_v4()).await;
    home.load().await;

    assert!(home.displayed().is_empty());
    assert_eq!(
        home.empty_state(),
        Some("\"Teknoloji\" kategorisinde ilan bulunamadı.".to_string())
    );
    assert!(home.to_string().contains("kategorisinde ilan bulunamadı"));
}

#[tokio::test]
async fn test_home_load_failure_clears_loading() {
    let h = harness(Route::home());
    h.store.set_failure(Some(RepositoryError::network("connection refused")));

    let mut home = HomeView::new(h.ctx.clone());
    home.load().await;

    assert!(!home.is_loading());
    assert_eq!(home.error(), Some(messages::LOAD_FAILED));
    assert_eq!(home.empty_state(), None);
}

// =============================================================================
// Gating
// =============================================================================

#[tokio::test]
async fn test_gated_views_redirect_without_content() {
    let h = harness(Route::Profile);

    let mut profile = ProfileView::new(h.ctx.clone());
    assert_eq!(profile.access(), Access::Loading);
    assert_eq!(profile.to_string(), format!("{}\n", messages::LOADING));
    profile.mount().await;
    assert_eq!(profile.access(), Access::Redirected);
    assert_eq!(profile.to_string(), "");

    let mut create = CreateListingView::new(h.ctx.clone());
    create.mount().await;
    assert_eq!(create.access(), Access::Redirected);
    assert!(create.submit().await.is_none());
    assert_eq!(h.store.listing_count(), 0);

    let mut edit = EditProfileView::new(h.ctx.clone());
    edit.mount().await;
    assert_eq!(edit.access(), Access::Redirected);
    assert_eq!(edit.to_string(), "");

    assert_eq!(h.history.current(), Route::Login);
}

// =============================================================================
// Create-listing
// =============================================================================

#[tokio::test]
async fn test_create_boya_listing() {
    let h = harness_with(Route::CreateListing, MemoryStore::new(), UiConfig::default());
    let session = sign_in(&h).await;

    let mut view = CreateListingView::new(h.ctx.clone());
    view.mount().await;
    assert_eq!(view.access(), Access::Ready);
    assert_eq!(view.form.category, "Ev & Tadilat");
    assert_eq!(view.form.price_type, "sabit");

    view.form.title = "Boya".to_string();
    view.form.description = "Salon ve iki oda boya badana".to_string();
    view.form.price = "150".to_string();
    view.form.location = "İstanbul, Kadıköy".to_string();

    let created = view.submit().await.unwrap();
    assert_eq!(created.price, 150.0);
    assert_eq!(created.user_id, session.user_id());
    assert!(!view.is_loading());
    assert_eq!(
        view.notice(),
        Some(&Notice::Success(messages::LISTING_CREATED.to_string()))
    );
    assert_eq!(
        h.history.pending(),
        Some((Route::home(), Duration::from_millis(2000)))
    );

    let mut home = HomeView::new(h.ctx.clone());
    home.load().await;
    assert_eq!(home.listings()[0].id, created.id);
    assert_eq!(home.listings()[0].created_at, created.created_at);
}

#[tokio::test]
async fn test_create_failure_shows_message_and_stays() {
    let h = harness(Route::CreateListing);
    sign_in(&h).await;

    let mut view = CreateListingView::new(h.ctx.clone());
    view.mount().await;
    view.form = ListingForm {
        description: "Açıklama".to_string(),
        price: "150".to_string(),
        location: "Ankara".to_string(),
        ..ListingForm::default()
    };

    assert!(view.submit().await.is_none());
    assert_eq!(
        view.notice(),
        Some(&Notice::Error("Hata: Başlık zorunludur".to_string()))
    );
    assert!(!view.is_loading());
    assert_eq!(h.history.pending(), None);
    assert_eq!(h.store.listing_count(), 0);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_sign_in_redirects_home_after_delay() {
    let h = harness_with(Route::Login, MemoryStore::new(), UiConfig::default());

    let mut view = LoginView::new(h.ctx.clone());
    view.email = EMAIL.to_string();
    view.password = PASSWORD.to_string();
    view.submit().await;

    assert_eq!(
        view.notice(),
        Some(&Notice::Success(messages::SIGNED_IN.to_string()))
    );
    assert!(!view.is_loading());
    assert_eq!(
        h.history.pending(),
        Some((Route::home(), Duration::from_millis(1500)))
    );
    assert!(h.gateway.current_session().await.unwrap().is_some());
}

#[tokio::test]
async fn test_login_errors_are_shown_verbatim() {
    let h = harness(Route::Login);

    let mut view = LoginView::new(h.ctx.clone());
    view.email = EMAIL.to_string();
    view.password = "12345".to_string();
    view.submit().await;
    assert_eq!(
        view.notice(),
        Some(&Notice::Error("Şifre en az 6 karakter olmalıdır".to_string()))
    );

    view.password = "wrong-password".to_string();
    view.submit().await;
    assert_eq!(
        view.notice(),
        Some(&Notice::Error("Geçersiz email veya şifre".to_string()))
    );
    assert!(!view.is_loading());
    assert_eq!(h.history.pending(), None);
}

#[tokio::test]
async fn test_sign_up_requires_full_name_then_succeeds() {
    let h = harness(Route::Login);

    let mut view = LoginView::new(h.ctx.clone());
    view.toggle();
    assert_eq!(view.mode(), LoginMode::SignUp);

    view.email = "grace@example.com".to_string();
    view.password = "hopper1".to_string();
    view.submit().await;
    assert!(view.notice().is_some_and(Notice::is_error));
    assert_eq!(h.auth.user_id("grace@example.com"), None);

    view.full_name = "Grace Hopper".to_string();
    view.submit().await;
    assert_eq!(
        view.notice(),
        Some(&Notice::Success(messages::SIGNED_UP.to_string()))
    );
    assert!(h.auth.user_id("grace@example.com").is_some());
    assert_eq!(h.history.current(), Route::Login);
    assert_eq!(h.history.pending(), None);
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_delete_removes_exactly_one() {
    let h = harness(Route::Profile);
    let session = sign_in(&h).await;
    let keep = seed(&h, "Bir", Category::Events, session.user_id()).await;
    let gone = seed(&h, "İki", Category::Events, session.user_id()).await;
    seed(&h, "Başkası", Category::Events, Uuid::new_v4()).await;

    let mut view = ProfileView::new(h.ctx.clone());
    view.mount().await;
    assert_eq!(view.access(), Access::Ready);
    assert_eq!(view.listings().len(), 2);

    // Cancelled confirmation keeps everything
    assert_eq!(view.request_delete(gone), Some(messages::CONFIRM_DELETE));
    view.cancel_delete();
    assert!(!view.confirm_delete().await);
    assert_eq!(view.listings().len(), 2);

    view.request_delete(gone);
    assert!(view.confirm_delete().await);
    let remaining: Vec<_> = view.listings().iter().map(|l| l.id).collect();
    assert_eq!(remaining, vec![keep]);
    assert_eq!(
        view.notice(),
        Some(&Notice::Success(messages::LISTING_DELETED.to_string()))
    );
    assert_eq!(h.store.listing_count(), 2);
}

#[tokio::test]
async fn test_profile_delete_failure_keeps_listings() {
    let h = harness(Route::Profile);
    let session = sign_in(&h).await;
    let id = seed(&h, "Bir", Category::Events, session.user_id()).await;

    let mut view = ProfileView::new(h.ctx.clone());
    view.mount().await;

    h.store.set_failure(Some(RepositoryError::Forbidden));
    view.request_delete(id);
    assert!(!view.confirm_delete().await);

    assert_eq!(view.listings().len(), 1);
    assert!(view.notice().is_some_and(Notice::is_error));
}

#[tokio::test]
async fn test_profile_renders_details_and_empty_state() {
    let h = harness(Route::Profile);
    sign_in(&h).await;

    let mut view = ProfileView::new(h.ctx.clone());
    view.mount().await;
    let rendered = view.to_string();

    assert!(rendered.contains("Ad Soyad: Ada Lovelace"));
    assert!(rendered.contains("Email: ada@example.com"));
    assert!(rendered.contains("İlanlarım (0)"));
    assert!(rendered.contains(messages::NO_OWN_LISTINGS));

    view.edit();
    assert_eq!(h.history.current(), Route::EditProfile);
}

// =============================================================================
// Edit-profile
// =============================================================================

#[tokio::test]
async fn test_edit_profile_round_trip() {
    let h = harness_with(Route::EditProfile, MemoryStore::new(), UiConfig::default());
    let session = sign_in(&h).await;

    let mut view = EditProfileView::new(h.ctx.clone());
    view.mount().await;
    assert_eq!(view.form.full_name, "Ada Lovelace");
    assert_eq!(view.form.phone, "0555 123 45 67");
    assert_eq!(view.form.avatar_url, "");

    view.form.full_name = "Ada King".to_string();
    let saved = view.submit().await.unwrap();

    assert_eq!(saved.full_name.as_deref(), Some("Ada King"));
    assert_eq!(saved.phone.as_deref(), Some("0555 123 45 67"));
    assert_eq!(
        view.notice(),
        Some(&Notice::Success(messages::PROFILE_UPDATED.to_string()))
    );
    assert_eq!(
        h.history.pending(),
        Some((Route::Profile, Duration::from_millis(1500)))
    );

    let mut profile = ProfileView::new(h.ctx.clone());
    profile.mount().await;
    assert_eq!(profile.profile().and_then(|p| p.full_name.as_deref()), Some("Ada King"));
    assert_eq!(profile.profile().map(|p| p.id), Some(session.user_id()));
}

#[tokio::test]
async fn test_edit_profile_load_failure_blocks_save() {
    let h = harness(Route::EditProfile);
    let session = sign_in(&h).await;

    let mut view = EditProfileView::new(h.ctx.clone());
    h.store.set_failure(Some(RepositoryError::network("offline")));
    view.mount().await;
    h.store.set_failure(None);

    assert!(!view.is_loaded());
    assert_eq!(
        view.notice(),
        Some(&Notice::Error("Hata: Sunucuya ulaşılamadı".to_string()))
    );
    assert!(view.to_string().contains("Hata: Sunucuya ulaşılamadı"));

    view.form.phone = "0999".to_string();
    assert!(view.submit().await.is_none());
    assert!(view.notice().is_some_and(Notice::is_error));
    assert!(!view.is_loading());
    assert_eq!(h.history.pending(), None);

    let stored = h.store.select_by_id(session.user_id()).await.unwrap().unwrap();
    assert_eq!(stored.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(stored.phone.as_deref(), Some("0555 123 45 67"));
    assert_eq!(stored.avatar_url, None);

    // Mounting again once the store is back pre-fills and saves
    view.mount().await;
    assert!(view.is_loaded());
    assert_eq!(view.notice(), None);
    view.form.phone = "0999".to_string();
    let saved = view.submit().await.unwrap();
    assert_eq!(saved.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(saved.phone.as_deref(), Some("0999"));
}

#[tokio::test]
async fn test_profile_load_failure_shows_notice() {
    let h = harness(Route::Profile);
    sign_in(&h).await;
    h.store.set_failure(Some(RepositoryError::network("offline")));

    let mut view = ProfileView::new(h.ctx.clone());
    view.mount().await;

    assert_eq!(view.access(), Access::Ready);
    assert!(view.notice().is_some_and(Notice::is_error));
    assert!(view.to_string().contains("Sunucuya ulaşılamadı"));
}

#[tokio::test]
async fn test_edit_profile_failure_and_cancel() {
    let h = harness(Route::EditProfile);
    sign_in(&h).await;

    let mut view = EditProfileView::new(h.ctx.clone());
    view.mount().await;
    view.form.avatar_url = "ftp://example.com/a.png".to_string();

    assert!(view.submit().await.is_none());
    assert!(view
        .notice()
        .is_some_and(|n| n.is_error() && n.text().starts_with("Hata: ")));
    assert!(!view.is_loading());

    view.cancel();
    assert_eq!(h.history.current(), Route::Profile);
}

// =============================================================================
// Header
// =============================================================================

#[tokio::test]
async fn test_header_tracks_session_while_mounted() {
    let h = harness(Route::home());

    let mut header = HeaderView::new(h.ctx.clone());
    header.mount().await;
    assert!(header.is_subscribed());
    assert_eq!(header.user(), None);
    assert!(header.to_string().contains("Ücretsiz İlan Ver"));

    sign_in(&h).await;
    assert_eq!(
        header.user().map(|u| u.display_name().to_string()),
        Some("Ada Lovelace".to_string())
    );
    assert!(header.to_string().contains("Hoşgeldin, Ada Lovelace"));
    assert!(header.actions().contains(&HeaderAction::Logout));

    header.unmount();
    assert!(!header.is_subscribed());
    h.gateway.sign_out().await.unwrap();
    // No longer listening
    assert!(header.user().is_some());
}

#[tokio::test]
async fn test_header_logout_goes_home() {
    let h = harness(Route::Profile);
    sign_in(&h).await;

    let mut header = HeaderView::new(h.ctx.clone());
    header.mount().await;
    header.logout().await;

    assert_eq!(header.user(), None);
    assert_eq!(h.history.current(), Route::home());
    assert_eq!(h.gateway.current_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_header_dialogs() {
    let h = harness(Route::home());
    let mut header = HeaderView::new(h.ctx.clone());

    header.open(Dialog::Categories);
    header.open(Dialog::Services);
    assert_eq!(header.dialog(), Some(Dialog::Services));

    let links = header.dialog_links();
    assert_eq!(links.len(), 9);
    assert_eq!(links[0].route, Route::home());

    header.follow(&links[2]);
    assert_eq!(header.dialog(), None);
    assert_eq!(h.history.current(), Route::home_in("Temizlik"));

    header.open(Dialog::Categories);
    let categories = header.dialog_links();
    assert_eq!(categories.len(), 8);
    assert!(categories.iter().all(|l| l.detail.is_some()));

    header.open(Dialog::HowItWorks);
    assert!(header.to_string().contains("Hizmet Arayanlar İçin"));
    let cta = header.dialog_links();
    header.follow(&cta[0]);
    assert_eq!(h.history.current(), Route::CreateListing);
}
