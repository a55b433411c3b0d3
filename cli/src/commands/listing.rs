//! Listing commands - Create and delete listings.

use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use domain::ListingForm;
use views::{CreateListingView, ProfileView, Route};

use crate::app::{check_notice, App};
use crate::args::CreateArgs;
use crate::error::{CommandError, CommandResult};

/// Execute the create command
pub async fn create(args: CreateArgs) -> CommandResult<()> {
    let app = App::from_env(Route::CreateListing);

    let mut view = CreateListingView::new(app.ctx.clone());
    view.mount().await;
    app.check_access(view.access())?;

    view.form = ListingForm {
        title: args.title,
        description: args.description,
        category: args.category,
        price: args.price,
        price_type: args.price_type,
        location: args.location,
    };
    let created = view.submit().await;
    print!("{}", view);
    check_notice(view.notice())?;

    if let Some(listing) = created {
        tracing::info!(listing_id = %listing.id, "Listing published");
        println!("İlan numarası: {}", listing.id);
    }
    app.settle().await;
    Ok(())
}

/// Execute the delete command
pub async fn delete(id: Uuid, yes: bool) -> CommandResult<()> {
    let app = App::from_env(Route::Profile);

    let mut view = ProfileView::new(app.ctx.clone());
    view.mount().await;
    app.check_access(view.access())?;

    if !view.listings().iter().any(|l| l.id == id) {
        return Err(CommandError::ListingNotFound(id));
    }

    let Some(question) = view.request_delete(id) else {
        return Ok(());
    };
    if !yes && !confirm(question).await? {
        view.cancel_delete();
        println!("İptal edildi.");
        return Ok(());
    }

    view.confirm_delete().await;
    print!("{}", view);
    check_notice(view.notice())
}

/// Ask a yes/no question on the terminal
async fn confirm(question: &str) -> CommandResult<bool> {
    println!("{} [e/H]", question);

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    ))
}
