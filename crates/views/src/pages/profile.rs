//! Profile page: account details and the user's own listings.

use std::fmt;

use tracing::{info, warn};
use uuid::Uuid;

use domain::{Listing, Profile, Session};

use crate::context::AppContext;
use crate::guard::{require_session, Access, Gate};
use crate::messages::{self, Notice};
use crate::navigation::Route;
use crate::pages::write_listing_card;

pub struct ProfileView {
    ctx: AppContext,
    access: Access,
    session: Option<Session>,
    profile: Option<Profile>,
    listings: Vec<Listing>,
    /// Listing awaiting delete confirmation
    pending_delete: Option<Uuid>,
    notice: Option<Notice>,
}

impl ProfileView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            access: Access::Loading,
            session: None,
            profile: None,
            listings: Vec::new(),
            pending_delete: None,
            notice: None,
        }
    }

    /// Check the session, then load the profile and own listings
    pub async fn mount(&mut self) {
        let session = match require_session(&self.ctx).await {
            Gate::Granted(session) => session,
            Gate::Redirected => {
                self.access = Access::Redirected;
                return;
            }
        };
        let user_id = session.user_id();

        match self.ctx.listings.get_profile(user_id).await {
            Ok(profile) => self.profile = profile,
            Err(e) => {
                warn!(code = e.code(), %user_id, "Failed to load profile");
                self.notice = Some(Notice::Error(e.user_message()));
            }
        }
        match self.ctx.listings.list_mine(user_id).await {
            Ok(listings) => self.listings = listings,
            Err(e) => {
                warn!(code = e.code(), %user_id, "Failed to load own listings");
                self.notice = Some(Notice::Error(e.user_message()));
            }
        }

        self.session = Some(session);
        self.access = Access::Ready;
    }

    /// Ask for confirmation before deleting `listing_id`
    pub fn request_delete(&mut self, listing_id: Uuid) -> Option<&'static str> {
        if !self.listings.iter().any(|l| l.id == listing_id) {
            return None;
        }
        self.pending_delete = Some(listing_id);
        Some(messages::CONFIRM_DELETE)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the listing armed by [`request_delete`](Self::request_delete)
    pub async fn confirm_delete(&mut self) -> bool {
        let (Some(listing_id), Some(session)) = (self.pending_delete.take(), &self.session) else {
            return false;
        };

        match self.ctx.listings.delete(listing_id, session.user_id()).await {
            Ok(()) => {
                self.listings.retain(|l| l.id != listing_id);
                info!(%listing_id, "Listing removed from profile");
                self.notice = Some(Notice::Success(messages::LISTING_DELETED.to_string()));
                true
            }
            Err(e) => {
                self.notice = Some(Notice::Error(messages::failure(&e.user_message())));
                false
            }
        }
    }

    /// Go to the edit-profile page
    pub fn edit(&self) {
        self.ctx.navigator.navigate(Route::EditProfile);
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

fn or_unset(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => messages::NOT_SPECIFIED,
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = match (self.access, &self.session) {
            (Access::Ready, Some(session)) => session,
            (Access::Redirected, _) => return Ok(()),
            _ => return writeln!(f, "{}", messages::LOADING),
        };
        let profile = self.profile.as_ref();

        writeln!(f, "Profil Bilgileri [Düzenle]")?;
        writeln!(
            f,
            "Ad Soyad: {}",
            or_unset(profile.and_then(|p| p.full_name.as_deref()))
        )?;
        writeln!(f, "Email: {}", session.user.email)?;
        writeln!(
            f,
            "Telefon: {}",
            or_unset(profile.and_then(|p| p.phone.as_deref()))
        )?;
        writeln!(f)?;

        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }
        if self.pending_delete.is_some() {
            writeln!(f, "{} [Evet / Hayır]", messages::CONFIRM_DELETE)?;
        }

        writeln!(f, "İlanlarım ({})", self.listings.len())?;
        if self.listings.is_empty() {
            return writeln!(f, "{}", messages::NO_OWN_LISTINGS);
        }
        for listing in &self.listings {
            write_listing_card(f, listing)?;
            writeln!(f, "  [Sil] {}", listing.id)?;
        }
        Ok(())
    }
}
