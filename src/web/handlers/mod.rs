//! Page handlers.

mod admin;
mod entries;
mod listings;

pub use admin::{
    compose_form_handler, compose_handler, delete_form_handler, delete_handler,
    hide_form_handler, hide_handler,
};
pub use entries::{
    about_handler, entry_handler, feed_redirect_handler, legacy_entry_handler,
    not_found_handler,
};
pub use listings::{archive_handler, home_handler, tag_handler};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::CurrentUser;
use crate::web::fragments::Fragment;
use crate::web::views::{Layout, entry_views};

/// Page chrome with the recent-entries sidebar.
async fn page_layout(st: &AppState, user: &CurrentUser) -> Result<Layout, AppError> {
    let recent = entry_views(&st.listing_service.recent().await?);
    let sidebar = Fragment::RecentEntries { entries: &recent }.render()?;
    Ok(Layout::new(&st.settings, user.identity(), sidebar))
}
