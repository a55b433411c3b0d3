//! User-facing texts.

use std::fmt;

pub const LOADING: &str = "Yükleniyor...";
pub const SAVING: &str = "Kaydediliyor...";
pub const NOT_SPECIFIED: &str = "Belirtilmemiş";

pub const HOME_TITLE: &str = "İhtiyacınız olan hizmeti bulun";
pub const HOME_SUBTITLE: &str =
    "Binlerce güvenilir hizmet sağlayıcısı arasından size en uygun olanı seçin";
pub const NO_LISTINGS: &str = "Henüz ilan bulunmuyor.";
pub const LOAD_FAILED: &str = "İlanlar yüklenemedi. Lütfen daha sonra tekrar deneyin.";

pub const LISTING_CREATED: &str = "İlan başarıyla oluşturuldu!";
pub const SIGNED_IN: &str = "Giriş başarılı! Yönlendiriliyorsunuz...";
pub const SIGNED_UP: &str = "Kayıt başarılı! Email adresinizi kontrol edin.";
pub const PROFILE_NOT_LOADED: &str = "Profil bilgileri yüklenemedi, lütfen sayfayı yenileyin.";
pub const PROFILE_UPDATED: &str = "Profil başarıyla güncellendi!";
pub const CONFIRM_DELETE: &str = "Bu ilanı silmek istediğinize emin misiniz?";
pub const LISTING_DELETED: &str = "İlan silindi!";
pub const NO_OWN_LISTINGS: &str = "Henüz ilan oluşturmadınız.";

/// Empty state for a category without listings
pub fn empty_category(category: &str) -> String {
    format!("\"{}\" kategorisinde ilan bulunamadı.", category)
}

/// Failure prefix used by the form views
pub fn failure(message: &str) -> String {
    format!("Hata: {}", message)
}

/// Feedback line shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(text) => write!(f, "✓ {}", text),
            Notice::Error(text) => write!(f, "✗ {}", text),
        }
    }
}
