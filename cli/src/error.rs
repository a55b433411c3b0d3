//! Command failures reported by the binary.

use thiserror::Error;
use uuid::Uuid;

use views::Route;

#[derive(Error, Debug)]
pub enum CommandError {
    /// The view showed an error notice
    #[error("{0}")]
    Failed(String),

    /// The view sent the user elsewhere, usually to sign in
    #[error("Bu işlem için giriş yapmalısınız ({0})")]
    Redirected(Route),

    #[error("İlan bulunamadı: {0}")]
    ListingNotFound(Uuid),

    #[error("Girdi okunamadı: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommandResult<T> = Result<T, CommandError>;
