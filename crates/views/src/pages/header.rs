//! Site header: session-aware actions plus three informational dialogs.
//!
//! The header keeps its own copy of the signed-in user, fed by a session
//! subscription that lives exactly as long as the mounted header.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use domain::{Category, SessionUser, BRAND_NAME, CATEGORY_ALL};
use session_gateway::Subscription;

use crate::context::AppContext;
use crate::navigation::Route;

/// Informational dialogs reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Categories,
    Services,
    HowItWorks,
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Categories => "Kategoriler",
            Dialog::Services => "Hizmetler",
            Dialog::HowItWorks => "Nasıl Çalışır?",
        }
    }
}

/// A labelled link inside the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub detail: Option<&'static str>,
    pub route: Route,
}

/// Action offered in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAction {
    Go(Link),
    Logout,
}

const SEEKER_STEPS: [(&str, &str); 3] = [
    (
        "İlan Oluştur",
        "İhtiyacınız olan hizmeti (örn: \"Evde boya badana yapılacak\") detaylı şekilde anlatın",
    ),
    (
        "Teklifleri Bekle",
        "Uzmanlar ilanınızı görüp size teklif gönderecek veya iletişime geçecek",
    ),
    (
        "En Uygununu Seç",
        "Gelen teklifler arasından bütçenize ve ihtiyacınıza en uygun olanı seçin",
    ),
];

const PROVIDER_STEPS: [(&str, &str); 3] = [
    (
        "İlanları İncele",
        "Kategoriler arasından uzmanlık alanınıza uygun ilanları bulun",
    ),
    (
        "Teklif Ver",
        "İlan sahibine teklif gönderin veya iletişim bilgilerini alın",
    ),
    (
        "İşi Üstlen",
        "Anlaşma sağlandıktan sonra profesyonel hizmetinizi sunun",
    ),
];

pub struct HeaderView {
    ctx: AppContext,
    user: Arc<Mutex<Option<SessionUser>>>,
    subscription: Option<Subscription>,
    dialog: Option<Dialog>,
}

impl HeaderView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            user: Arc::new(Mutex::new(None)),
            subscription: None,
            dialog: None,
        }
    }

    fn user_slot(&self) -> MutexGuard<'_, Option<SessionUser>> {
        self.user.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribe to session changes and read the current session
    pub async fn mount(&mut self) {
        if self.subscription.is_none() {
            let slot = self.user.clone();
            self.subscription = Some(self.ctx.gateway.on_session_change(Box::new(
                move |event, session| {
                    debug!(%event, "Header saw session change");
                    *slot.lock().unwrap_or_else(|e| e.into_inner()) = session.map(|s| s.user);
                },
            )));
        }

        match self.ctx.gateway.current_session().await {
            Ok(session) => *self.user_slot() = session.map(|s| s.user),
            Err(e) => warn!(code = e.code(), "Header could not read session"),
        }
    }

    /// Drop the session subscription
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Signed-in user as last reported by the gateway
    pub fn user(&self) -> Option<SessionUser> {
        self.user_slot().clone()
    }

    /// Navigation-bar actions for the current session state
    pub fn actions(&self) -> Vec<HeaderAction> {
        let link = |label: &str, route: Route| {
            HeaderAction::Go(Link {
                label: label.to_string(),
                detail: None,
                route,
            })
        };

        match self.user() {
            Some(user) => vec![
                link(&format!("Hoşgeldin, {}", user.display_name()), Route::Profile),
                link("Profilim", Route::Profile),
                link("İlan Ver", Route::CreateListing),
                HeaderAction::Logout,
            ],
            None => vec![
                link("Hesabınız yok mu? Hemen giriş yapın", Route::Login),
                link("Giriş Yap", Route::Login),
                link("Ücretsiz İlan Ver", Route::CreateListing),
            ],
        }
    }

    /// Sign out and return to the home page
    pub async fn logout(&mut self) {
        if let Err(e) = self.ctx.gateway.sign_out().await {
            warn!(code = e.code(), "Sign-out failed");
        }
        *self.user_slot() = None;
        self.ctx.navigator.navigate(Route::home());
    }

    /// Open `dialog`, closing any other
    pub fn open(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn close(&mut self) {
        self.dialog = None;
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    /// Links of the open dialog
    pub fn dialog_links(&self) -> Vec<Link> {
        match self.dialog {
            Some(Dialog::Categories) => category_links(),
            Some(Dialog::Services) => service_links(),
            Some(Dialog::HowItWorks) => vec![Link {
                label: "Ücretsiz İlan Ver".to_string(),
                detail: None,
                route: Route::CreateListing,
            }],
            None => Vec::new(),
        }
    }

    /// Follow `link`, closing the open dialog
    pub fn follow(&mut self, link: &Link) {
        self.dialog = None;
        self.ctx.navigator.navigate(link.route.clone());
    }
}

/// Category catalog: icon, name and description, each filtering Home
pub fn category_links() -> Vec<Link> {
    Category::ALL
        .into_iter()
        .map(|category| Link {
            label: format!("{} {}", category.icon(), category.as_str()),
            detail: Some(category.description()),
            route: Route::home_in(category.as_str()),
        })
        .collect()
}

/// Service types; `Tümü` leads to the unfiltered home page
pub fn service_links() -> Vec<Link> {
    let all = Link {
        label: "📋 Tüm Hizmetler".to_string(),
        detail: None,
        route: Route::home_in(CATEGORY_ALL),
    };

    std::iter::once(all)
        .chain(Category::ALL.into_iter().map(|category| Link {
            label: format!("{} {}", category.icon(), category.as_str()),
            detail: None,
            route: Route::home_in(category.as_str()),
        }))
        .collect()
}

fn write_steps(f: &mut fmt::Formatter<'_>, steps: &[(&str, &str)]) -> fmt::Result {
    for (n, (title, text)) in steps.iter().enumerate() {
        writeln!(f, "  {}. {}: {}", n + 1, title, text)?;
    }
    Ok(())
}

impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BRAND_NAME)?;
        for dialog in [Dialog::Categories, Dialog::Services, Dialog::HowItWorks] {
            write!(f, " | {}", dialog.title())?;
        }
        writeln!(f)?;

        let actions: Vec<String> = self
            .actions()
            .into_iter()
            .map(|action| match action {
                HeaderAction::Go(link) => link.label,
                HeaderAction::Logout => "Çıkış".to_string(),
            })
            .collect();
        writeln!(f, "{}", actions.join(" | "))?;

        let Some(dialog) = self.dialog else {
            return Ok(());
        };
        writeln!(f)?;
        writeln!(f, "== {} ==", dialog.title())?;
        match dialog {
            Dialog::Categories => {
                writeln!(f, "İhtiyacınız olan hizmet kategorisini seçin")?;
                for link in category_links() {
                    writeln!(f, "  {} - {}", link.label, link.detail.unwrap_or_default())?;
                }
            }
            Dialog::Services => {
                writeln!(f, "Hizmet türüne göre ilanları filtreleyin")?;
                for link in service_links() {
                    writeln!(f, "  {} ({})", link.label, link.route)?;
                }
            }
            Dialog::HowItWorks => {
                writeln!(
                    f,
                    "🎉 {} tamamen ÜCRETSİZdir! Hizmet arayanlarla hizmet sağlayanları buluşturur.",
                    BRAND_NAME
                )?;
                writeln!(f, "👤 Hizmet Arayanlar İçin")?;
                write_steps(f, &SEEKER_STEPS)?;
                writeln!(f, "🔨 Hizmet Sağlayanlar (Ustalar) İçin")?;
                write_steps(f, &PROVIDER_STEPS)?;
                writeln!(f, "🎯 Hemen Başla! İster hizmet ara, ister hizmet sun - her şey ücretsiz!")?;
                writeln!(f, "  [Ücretsiz İlan Ver] ({})", Route::CreateListing)?;
            }
        }
        Ok(())
    }
}
