//! Profile commands - Show and edit the signed-in user's profile.

use views::{EditProfileView, ProfileView, Route};

use crate::app::{check_notice, App};
use crate::args::EditProfileArgs;
use crate::error::CommandResult;

/// Execute the profile command
pub async fn show() -> CommandResult<()> {
    let app = App::from_env(Route::Profile);

    let mut view = ProfileView::new(app.ctx.clone());
    view.mount().await;
    app.check_access(view.access())?;

    app.print_header().await;
    print!("{}", view);
    Ok(())
}

/// Execute the edit-profile command
pub async fn edit(args: EditProfileArgs) -> CommandResult<()> {
    let app = App::from_env(Route::EditProfile);

    let mut view = EditProfileView::new(app.ctx.clone());
    view.mount().await;
    app.check_access(view.access())?;

    if let Some(full_name) = args.full_name {
        view.form.full_name = full_name;
    }
    if let Some(phone) = args.phone {
        view.form.phone = phone;
    }
    if let Some(avatar_url) = args.avatar_url {
        view.form.avatar_url = avatar_url;
    }

    view.submit().await;
    print!("{}", view);
    check_notice(view.notice())?;

    app.settle().await;
    show().await
}
