//! Edit-profile page.

use std::fmt;

use tracing::warn;

use common::AppError;
use domain::{Profile, ProfileForm, Session};

use crate::context::AppContext;
use crate::guard::{require_session, Access, Gate};
use crate::messages::{self, Notice};
use crate::navigation::Route;

pub struct EditProfileView {
    ctx: AppContext,
    access: Access,
    session: Option<Session>,
    pub form: ProfileForm,
    /// Form holds the stored values; saving before that would blank them
    loaded: bool,
    loading: bool,
    notice: Option<Notice>,
}

impl EditProfileView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            access: Access::Loading,
            session: None,
            form: ProfileForm::default(),
            loaded: false,
            loading: false,
            notice: None,
        }
    }

    /// Check the session and pre-fill the form from the stored profile
    pub async fn mount(&mut self) {
        let session = match require_session(&self.ctx).await {
            Gate::Granted(session) => session,
            Gate::Redirected => {
                self.access = Access::Redirected;
                return;
            }
        };

        match self.ctx.listings.get_profile(session.user_id()).await {
            Ok(profile) => {
                self.form = ProfileForm::from_profile(profile.as_ref());
                self.loaded = true;
                self.notice = None;
            }
            Err(e) => {
                warn!(code = e.code(), "Failed to load profile for editing");
                self.loaded = false;
                self.notice = Some(Notice::Error(messages::failure(&e.user_message())));
            }
        }
        self.session = Some(session);
        self.access = Access::Ready;
    }

    /// Save all three fields; refused until the stored profile has loaded
    pub async fn submit(&mut self) -> Option<Profile> {
        let user_id = match (&self.access, &self.session) {
            (Access::Ready, Some(session)) => session.user_id(),
            _ => return None,
        };
        if !self.loaded {
            warn!(%user_id, "Profile not loaded; refusing to save");
            self.notice = Some(Notice::Error(messages::failure(
                messages::PROFILE_NOT_LOADED,
            )));
            return None;
        }

        self.loading = true;
        self.notice = None;

        let result = match self.form.clone().into_update() {
            Ok(patch) => self.ctx.listings.update_profile(user_id, patch).await,
            Err(e) => Err(AppError::from(e)),
        };
        let saved = match result {
            Ok(profile) => {
                self.notice = Some(Notice::Success(messages::PROFILE_UPDATED.to_string()));
                self.ctx
                    .navigator
                    .navigate_after(Route::Profile, self.ctx.ui.profile_redirect());
                Some(profile)
            }
            Err(e) => {
                warn!(code = e.code(), "Profile not updated");
                self.notice = Some(Notice::Error(messages::failure(&e.user_message())));
                None
            }
        };

        self.loading = false;
        saved
    }

    /// Leave without saving
    pub fn cancel(&self) {
        self.ctx.navigator.navigate(Route::Profile);
    }

    pub fn access(&self) -> Access {
        self.access
    }

    /// Whether the form was pre-filled from the stored profile
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl fmt::Display for EditProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = match (self.access, &self.session) {
            (Access::Ready, Some(session)) => session,
            (Access::Redirected, _) => return Ok(()),
            _ => return writeln!(f, "{}", messages::LOADING),
        };

        writeln!(f, "Profili Düzenle")?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }
        writeln!(f, "Email (Değiştirilemez): {}", session.user.email)?;
        writeln!(f, "Ad Soyad: {}", self.form.full_name)?;
        writeln!(f, "Telefon: {}", self.form.phone)?;
        writeln!(f, "Profil Fotoğrafı URL (Opsiyonel): {}", self.form.avatar_url)?;

        let save = if self.loading { messages::SAVING } else { "Kaydet" };
        writeln!(f, "[İptal] [{}]", save)
    }
}
