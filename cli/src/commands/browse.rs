//! Browse commands - Listings and the category catalog.

use views::pages::category_links;
use views::{HomeView, Route};

use crate::app::App;
use crate::error::{CommandError, CommandResult};

/// Execute the listings command
pub async fn listings(category: Option<String>) -> CommandResult<()> {
    let route = match category.as_deref() {
        Some(category) => Route::home_in(category),
        None => Route::home(),
    };
    tracing::debug!(route = %route, "Showing listings");

    let app = App::from_env(route);
    app.print_header().await;

    let mut home = HomeView::new(app.ctx.clone());
    home.load().await;
    print!("{}", home);

    match home.error() {
        Some(message) => Err(CommandError::Failed(message.to_string())),
        None => Ok(()),
    }
}

/// Execute the categories command
pub fn categories() {
    println!("Kategoriler");
    for link in category_links() {
        println!("  {}", link.label);
        if let Some(detail) = link.detail {
            println!("      {}", detail);
        }
        println!("      ayva listings --category \"{}\"", category_name(&link.route));
    }
}

fn category_name(route: &Route) -> &str {
    match route {
        Route::Home {
            category: Some(category),
        } => category,
        _ => "",
    }
}
