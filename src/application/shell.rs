//! Page shell: page selection, navigation links and the home redirect.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::router::HashRouter;
use crate::domain::navigation::NavigationState;
use crate::domain::page::Page;

/// Outcome of resolving a navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Page to show.
    pub page: Page,
    /// Page arguments (everything but `p`).
    pub args: NavigationState,
    /// Corrected state to navigate to when `p` is missing or unknown.
    pub redirect: Option<NavigationState>,
}

impl Resolution {
    /// Returns whether the state needed correcting.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

/// Maps a state to a page, falling back to [`Page::DEFAULT`].
#[must_use]
pub fn resolve(state: &NavigationState) -> Resolution {
    let args = state.without_page();
    match state.page_id().and_then(Page::from_id) {
        Some(page) => Resolution {
            page,
            args,
            redirect: None,
        },
        None => Resolution {
            page: Page::DEFAULT,
            args,
            redirect: Some(state.with_page(Page::DEFAULT.id())),
        },
    }
}

/// Page currently named by `state`, if it names a known one.
#[must_use]
pub fn active_page(state: &NavigationState) -> Option<Page> {
    state.page_id().and_then(Page::from_id)
}

/// A link to a page, optionally carrying extra arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    page: Page,
    label: String,
    args: NavigationState,
}

/// How a [`PageLink`] presents itself relative to the active page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkView {
    /// Plain text: the link points at the page already shown.
    Text {
        /// Link text.
        label: String,
    },
    /// Activatable link.
    Link {
        /// Link text.
        label: String,
        /// Fragment the link points at, `#` included.
        href: String,
        /// State the link navigates to.
        target: NavigationState,
    },
}

impl LinkView {
    /// Link text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text { label } | Self::Link { label, .. } => label,
        }
    }

    /// Returns whether the view can be activated.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }
}

impl PageLink {
    /// Creates a link to `page`.
    #[must_use]
    pub fn new(page: Page, label: impl Into<String>) -> Self {
        Self {
            page,
            label: label.into(),
            args: NavigationState::new(),
        }
    }

    /// Adds an argument merged into the target state.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Target page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Link text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// State the link navigates to: `p` plus the extra arguments.
    #[must_use]
    pub fn target(&self) -> NavigationState {
        self.args.with_page(self.page.id())
    }

    /// Fragment the link points at.
    #[must_use]
    pub fn href(&self) -> String {
        self.target().to_string()
    }

    /// Renders relative to the active page.
    #[must_use]
    pub fn render(&self, current: Option<Page>) -> LinkView {
        if current == Some(self.page) {
            LinkView::Text {
                label: self.label.clone(),
            }
        } else {
            LinkView::Link {
                label: self.label.clone(),
                href: self.href(),
                target: self.target(),
            }
        }
    }
}

/// Navigation menu entries, in display order.
#[must_use]
pub fn navigation_links() -> Vec<PageLink> {
    vec![
        PageLink::new(Page::Home, "Home"),
        PageLink::new(Page::EditOrganization, "New Organization"),
        PageLink::new(Page::EditProduction, "New Production"),
        PageLink::new(Page::EditVenue, "New Venue"),
        PageLink::new(Page::EditTheatreArtist, "New Theatre Artist"),
        PageLink::new(Page::RandomAssThoughts, "Random-Ass Thoughts"),
    ]
}

/// Ties page resolution and link activation to a router.
#[derive(Debug, Clone)]
pub struct PageShell {
    router: Arc<HashRouter>,
    links: Vec<PageLink>,
}

impl PageShell {
    /// Creates a shell over `router` with the standard menu.
    #[must_use]
    pub fn new(router: Arc<HashRouter>) -> Self {
        Self {
            router,
            links: navigation_links(),
        }
    }

    /// Router the shell drives.
    #[must_use]
    pub fn router(&self) -> &Arc<HashRouter> {
        &self.router
    }

    /// Resolves `state` for rendering, navigating to the corrected state when
    /// the page is missing or unknown.
    pub fn render(&self, state: &NavigationState) -> Resolution {
        let resolution = resolve(state);
        if let Some(redirect) = &resolution.redirect {
            info!(from = %state, to = %redirect, "Redirecting to default page");
            self.router.navigate(redirect);
        }
        resolution
    }

    /// Menu entries rendered against `state`.
    #[must_use]
    pub fn menu(&self, state: &NavigationState) -> Vec<LinkView> {
        let current = active_page(state);
        self.links.iter().map(|link| link.render(current)).collect()
    }

    /// Menu link at `index`.
    #[must_use]
    pub fn menu_link(&self, index: usize) -> Option<&PageLink> {
        self.links.get(index)
    }

    /// Follows `link` unless it points at the page named by `state`.
    ///
    /// Returns whether navigation happened.
    pub fn activate(&self, link: &PageLink, state: &NavigationState) -> bool {
        match link.render(active_page(state)) {
            LinkView::Link { target, .. } => {
                debug!(page = %link.page(), "Following link");
                self.router.navigate(&target)
            }
            LinkView::Text { .. } => false,
        }
    }
}
