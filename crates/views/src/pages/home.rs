//! Home page: every listing, optionally narrowed to one category.

use std::borrow::Cow;
use std::fmt;

use tracing::warn;

use domain::{CategoryFilter, Listing};

use crate::context::AppContext;
use crate::messages;
use crate::pages::write_listing_card;

pub struct HomeView {
    ctx: AppContext,
    listings: Vec<Listing>,
    filter: CategoryFilter,
    loading: bool,
    error: Option<String>,
}

impl HomeView {
    /// Mount the view on the current route
    pub fn new(ctx: AppContext) -> Self {
        let filter = ctx.navigator.current().category_filter();
        Self {
            ctx,
            listings: Vec::new(),
            filter,
            loading: true,
            error: None,
        }
    }

    /// Fetch all listings
    pub async fn load(&mut self) {
        self.loading = true;
        match self.ctx.listings.list_all().await {
            Ok(listings) => {
                self.listings = listings;
                self.error = None;
            }
            Err(e) => {
                warn!(code = e.code(), "Failed to load listings: {}", e);
                self.error = Some(messages::LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Change the category without refetching
    pub fn set_category(&mut self, category: Option<&str>) {
        self.filter = CategoryFilter::from_query(category);
    }

    /// Re-read the category from the current route
    pub fn sync_route(&mut self) {
        self.filter = self.ctx.navigator.current().category_filter();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Every loaded listing, newest first
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Listings to display under the current filter
    pub fn displayed(&self) -> Cow<'_, [Listing]> {
        self.filter.apply(&self.listings)
    }

    /// Text shown instead of the grid, if the grid is empty
    pub fn empty_state(&self) -> Option<String> {
        if self.loading || self.error.is_some() || !self.displayed().is_empty() {
            return None;
        }
        match self.filter.as_query() {
            Some(category) if !self.listings.is_empty() => Some(messages::empty_category(category)),
            _ => Some(messages::NO_LISTINGS.to_string()),
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", messages::HOME_TITLE)?;
        writeln!(f, "{}", messages::HOME_SUBTITLE)?;
        if let Some(category) = self.filter.as_query() {
            writeln!(f, "Kategori: {}", category)?;
        }
        writeln!(f)?;

        if self.loading {
            return writeln!(f, "{}", messages::LOADING);
        }
        if let Some(error) = &self.error {
            return writeln!(f, "{}", error);
        }
        if let Some(empty) = self.empty_state() {
            return writeln!(f, "{}", empty);
        }

        for listing in self.displayed().iter() {
            write_listing_card(f, listing)?;
        }
        Ok(())
    }
}
