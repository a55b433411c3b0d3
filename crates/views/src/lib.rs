//! View layer - Page state machines for the marketplace client.
//!
//! Each page is a plain struct driven by async handlers (`mount`,
//! `submit`, ...) and rendered as text through `Display`. Pages reach the
//! backend only through the session gateway and the listing service held
//! in [`AppContext`].

pub mod context;
pub mod guard;
pub mod messages;
pub mod navigation;
pub mod pages;

pub use context::AppContext;
pub use guard::{require_session, Access, Gate};
pub use messages::Notice;
pub use navigation::{History, Navigator, Route};
pub use pages::{
    CreateListingView, Dialog, EditProfileView, HeaderAction, HeaderView, HomeView, Link,
    LoginMode, LoginView, ProfileView,
};

#[cfg(any(test, feature = "test-utils"))]
pub use navigation::MockNavigator;
