//! Create-listing page.

use std::fmt;

use tracing::warn;

use domain::{Category, Listing, ListingForm, PriceType, Session};

use crate::context::AppContext;
use crate::guard::{require_session, Access, Gate};
use crate::messages::{self, Notice};
use crate::navigation::Route;

pub struct CreateListingView {
    ctx: AppContext,
    access: Access,
    session: Option<Session>,
    pub form: ListingForm,
    loading: bool,
    notice: Option<Notice>,
}

impl CreateListingView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            access: Access::Loading,
            session: None,
            form: ListingForm::default(),
            loading: false,
            notice: None,
        }
    }

    /// Run the session check
    pub async fn mount(&mut self) {
        match require_session(&self.ctx).await {
            Gate::Granted(session) => {
                self.session = Some(session);
                self.access = Access::Ready;
            }
            Gate::Redirected => self.access = Access::Redirected,
        }
    }

    /// Publish the form as a listing owned by the signed-in user
    pub async fn submit(&mut self) -> Option<Listing> {
        let owner = match (&self.access, &self.session) {
            (Access::Ready, Some(session)) => session.user_id(),
            _ => return None,
        };

        self.loading = true;
        self.notice = None;

        let result = self.ctx.listings.create(self.form.clone(), owner).await;
        let created = match result {
            Ok(listing) => {
                self.notice = Some(Notice::Success(messages::LISTING_CREATED.to_string()));
                self.ctx
                    .navigator
                    .navigate_after(Route::home(), self.ctx.ui.create_redirect());
                Some(listing)
            }
            Err(e) => {
                warn!(code = e.code(), "Listing not created");
                self.notice = Some(Notice::Error(messages::failure(&e.user_message())));
                None
            }
        };

        self.loading = false;
        created
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl fmt::Display for CreateListingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.access {
            Access::Loading => return writeln!(f, "{}", messages::LOADING),
            Access::Redirected => return Ok(()),
            Access::Ready => {}
        }

        writeln!(f, "Yeni İlan Oluştur")?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }
        writeln!(f, "Başlık: {}", self.form.title)?;
        writeln!(f, "Açıklama: {}", self.form.description)?;
        writeln!(f, "Kategori: {}", self.form.category)?;
        writeln!(f, "Fiyat (₺): {}", self.form.price)?;

        let price_type = self
            .form
            .price_type
            .parse::<PriceType>()
            .map(|p| p.label().to_string())
            .unwrap_or_else(|_| self.form.price_type.clone());
        writeln!(f, "Fiyat Tipi: {}", price_type)?;
        writeln!(f, "Konum: {}", self.form.location)?;

        if self.loading {
            writeln!(f, "[{}]", messages::LOADING)
        } else {
            writeln!(f, "[İlanı Yayınla]")
        }
    }
}

/// Category choices offered by the form
pub fn category_options() -> impl Iterator<Item = &'static str> {
    Category::ALL.into_iter().map(|c| c.as_str())
}

/// Price-type choices as `(value, label)`
pub fn price_type_options() -> impl Iterator<Item = (&'static str, &'static str)> {
    PriceType::ALL.into_iter().map(|p| (p.as_str(), p.label()))
}
