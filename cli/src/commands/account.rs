//! Account commands - Sign in, sign up and sign out.

use views::{HeaderView, LoginView, Route};

use crate::app::{check_notice, App};
use crate::error::CommandResult;

/// Execute the login command
pub async fn login(email: String, password: String) -> CommandResult<()> {
    let app = App::from_env(Route::Login);

    let mut view = LoginView::new(app.ctx.clone());
    view.email = email;
    view.password = password;
    view.submit().await;
    print!("{}", view);
    check_notice(view.notice())?;

    app.settle().await;
    app.print_header().await;
    Ok(())
}

/// Execute the signup command
pub async fn signup(email: String, password: String, full_name: String) -> CommandResult<()> {
    let app = App::from_env(Route::Login);

    let mut view = LoginView::new(app.ctx.clone());
    view.toggle();
    view.email = email;
    view.password = password;
    view.full_name = full_name;
    view.submit().await;
    print!("{}", view);
    check_notice(view.notice())
}

/// Execute the logout command
pub async fn logout() -> CommandResult<()> {
    let app = App::from_env(Route::home());

    let mut header = HeaderView::new(app.ctx.clone());
    header.mount().await;
    if header.user().is_none() {
        println!("Zaten çıkış yapılmış.");
        return Ok(());
    }

    header.logout().await;
    header.unmount();
    print!("{}", header);
    Ok(())
}
