//! Login page with a sign-in / sign-up toggle.

use std::fmt;

use tracing::{info, warn};

use common::AppError;
use domain::{SignInForm, SignUpForm, SignUpOutcome};

use crate::context::AppContext;
use crate::messages::{self, Notice};
use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

pub struct LoginView {
    ctx: AppContext,
    mode: LoginMode,
    pub email: String,
    pub password: String,
    /// Only used when signing up
    pub full_name: String,
    loading: bool,
    notice: Option<Notice>,
}

impl LoginView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            mode: LoginMode::SignIn,
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            loading: false,
            notice: None,
        }
    }

    /// Switch between sign-in and sign-up
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.notice = None;
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn submit(&mut self) {
        self.loading = true;
        self.notice = None;

        let result = match self.mode {
            LoginMode::SignIn => self.sign_in().await,
            LoginMode::SignUp => self.sign_up().await,
        };

        self.notice = Some(match result {
            Ok(text) => Notice::Success(text.to_string()),
            Err(e) => {
                warn!(code = e.code(), mode = ?self.mode, "Login failed");
                Notice::Error(e.user_message())
            }
        });
        self.loading = false;
    }

    async fn sign_in(&self) -> Result<&'static str, AppError> {
        let form = SignInForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        form.check()?;

        self.ctx.gateway.sign_in(&form.email, &form.password).await?;
        self.ctx
            .navigator
            .navigate_after(Route::home(), self.ctx.ui.login_redirect());
        Ok(messages::SIGNED_IN)
    }

    async fn sign_up(&self) -> Result<&'static str, AppError> {
        let form = SignUpForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
        };
        form.check()?;

        let outcome = self
            .ctx
            .gateway
            .sign_up(&form.email, &form.password, &form.full_name)
            .await?;
        if let SignUpOutcome::Confirmed(session) = &outcome {
            info!(user_id = %session.user_id(), "Account confirmed at sign-up");
        }
        Ok(messages::SIGNED_UP)
    }
}

impl fmt::Display for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (title, toggle) = match self.mode {
            LoginMode::SignIn => ("Giriş Yap", "Hesabınız yok mu? Kayıt olun"),
            LoginMode::SignUp => ("Kayıt Ol", "Zaten hesabınız var mı? Giriş yapın"),
        };

        writeln!(f, "{}", title)?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }
        if self.mode == LoginMode::SignUp {
            writeln!(f, "Ad Soyad: {}", self.full_name)?;
        }
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Şifre: {}", "*".repeat(self.password.chars().count()))?;

        if self.loading {
            writeln!(f, "[{}]", messages::LOADING)?;
        } else {
            writeln!(f, "[{}]", title)?;
        }
        writeln!(f, "{}", toggle)
    }
}
