//! Routes and navigation.

use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;
use url::{form_urlencoded, Url};

use domain::{CategoryFilter, CATEGORY_QUERY_PARAM};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

// Only used to resolve relative paths; never contacted
const BASE: &str = "http://ayva.local";

/// A navigable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, optionally filtered by `?category=`
    Home { category: Option<String> },
    Login,
    CreateListing,
    Profile,
    EditProfile,
}

impl Default for Route {
    fn default() -> Self {
        Route::home()
    }
}

impl Route {
    /// Unfiltered home page
    pub fn home() -> Self {
        Route::Home { category: None }
    }

    /// Home page filtered by `category`; `Tümü` and empty mean unfiltered
    pub fn home_in(category: &str) -> Self {
        Route::Home {
            category: CategoryFilter::from_query(Some(category))
                .as_query()
                .map(String::from),
        }
    }

    /// Parse a path such as `/?category=Temizlik` or `/profile/edit`
    pub fn parse(path: &str) -> Option<Self> {
        let url = Url::parse(BASE).ok()?.join(path).ok()?;

        let route = match url.path().trim_end_matches('/') {
            "" => {
                let raw = url
                    .query_pairs()
                    .find(|(key, _)| key == CATEGORY_QUERY_PARAM)
                    .map(|(_, value)| value.into_owned());
                Route::Home {
                    category: CategoryFilter::from_query(raw.as_deref())
                        .as_query()
                        .map(String::from),
                }
            }
            "/login" => Route::Login,
            "/create-listing" => Route::CreateListing,
            "/profile" => Route::Profile,
            "/profile/edit" => Route::EditProfile,
            _ => return None,
        };
        Some(route)
    }

    /// Path with a percent-encoded query
    pub fn to_path(&self) -> String {
        match self {
            Route::Home { category: None } => "/".to_string(),
            Route::Home {
                category: Some(category),
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(CATEGORY_QUERY_PARAM, category)
                    .finish();
                format!("/?{}", query)
            }
            Route::Login => "/login".to_string(),
            Route::CreateListing => "/create-listing".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::EditProfile => "/profile/edit".to_string(),
        }
    }

    /// Category filter carried by this route
    pub fn category_filter(&self) -> CategoryFilter {
        match self {
            Route::Home { category } => CategoryFilter::from_query(category.as_deref()),
            _ => CategoryFilter::All,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Moves the user between pages.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Navigator: Send + Sync {
    /// Current location
    fn current(&self) -> Route;

    /// Go to `route` now
    fn navigate(&self, route: Route);

    /// Go to `route` once `delay` has passed
    fn navigate_after(&self, route: Route, delay: Duration);
}

#[derive(Debug)]
struct HistoryState {
    current: Route,
    pending: Option<(Route, Duration)>,
    visited: Vec<Route>,
}

/// In-process navigator keeping the visited routes.
///
/// A delayed redirect stays pending until [`History::settle`] applies it.
/// An immediate navigation in the meantime cancels it.
#[derive(Debug)]
pub struct History {
    state: Mutex<HistoryState>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::home())
    }
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                current: start.clone(),
                pending: None,
                visited: vec![start],
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Redirect waiting to be applied, with its delay
    pub fn pending(&self) -> Option<(Route, Duration)> {
        self.lock().pending.clone()
    }

    /// Every route visited so far, oldest first
    pub fn visited(&self) -> Vec<Route> {
        self.lock().visited.clone()
    }

    /// Wait out the pending redirect, apply it and return the new route
    pub async fn settle(&self) -> Option<Route> {
        let (route, delay) = self.lock().pending.clone()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        // A navigation while sleeping replaces the redirect
        if state.pending.as_ref().map(|(r, _)| r) != Some(&route) {
            return None;
        }
        state.pending = None;
        state.current = route.clone();
        state.visited.push(route.clone());
        debug!(route = %route, "Delayed redirect applied");
        Some(route)
    }
}

impl Navigator for History {
    fn current(&self) -> Route {
        self.lock().current.clone()
    }

    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigate");
        let mut state = self.lock();
        state.pending = None;
        state.current = route.clone();
        state.visited.push(route);
    }

    fn navigate_after(&self, route: Route, delay: Duration) {
        debug!(route = %route, delay_ms = delay.as_millis() as u64, "Redirect scheduled");
        self.lock().pending = Some((route, delay));
    }
}
