mod footer_bar;
mod header_bar;
mod input;
mod nav_menu;

pub use footer_bar::{FooterBar, FooterBarStyle, KeyHint};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use nav_menu::{NavMenu, NavMenuStyle};
