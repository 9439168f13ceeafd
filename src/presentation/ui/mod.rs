//! UI screens.

mod app;
mod home_screen;
mod organization_form;
mod static_page;

pub use app::App;
pub use home_screen::{HomeAction, HomeScreen};
pub use organization_form::{FormAction, FormFocus, FormState, OrganizationForm};
pub use static_page::StaticPage;
