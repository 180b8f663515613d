//! The page behaviors: each module exposes an `install` function that binds
//! its listeners to one [`Page`](crate::Page). Installation replaces the
//! page-load-time global wiring of the original scripts; nothing here keeps
//! state outside the DOM it is handed.

use crate::{Page, Result};

pub mod confirm_delete;
pub mod password_check;
pub mod password_help;
pub mod rating_input;

/// Installs every behavior the page's markup calls for.
///
/// Behaviors with required bindings (`password_check`, `rating_input`) are
/// only attempted when their anchor element is present, matching how the
/// original app shipped each script on its own page. Once the anchor exists,
/// a half-rendered page still fails fast.
pub fn install_all(page: &mut Page) -> Result<()> {
    if page.try_bind("#register_form")?.is_some() {
        password_check::install(page)?;
    }
    password_help::install(page)?;
    confirm_delete::install(page)?;
    if page.try_bind("#review_rating")?.is_some() {
        rating_input::install(page)?;
    }
    Ok(())
}
