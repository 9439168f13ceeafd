//! Page identifiers.

use std::fmt;
use std::str::FromStr;

/// Every page the application can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    /// Organization list.
    #[default]
    Home,
    /// Create or edit a theatre organization.
    EditOrganization,
    /// Production editor placeholder.
    EditProduction,
    /// Venue editor placeholder.
    EditVenue,
    /// Theatre artist editor placeholder.
    EditTheatreArtist,
    /// Static essay page.
    RandomAssThoughts,
}

impl Page {
    /// All pages in menu order.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::EditOrganization,
        Self::EditProduction,
        Self::EditVenue,
        Self::EditTheatreArtist,
        Self::RandomAssThoughts,
    ];

    /// Page selected when the fragment names none or an unknown one.
    pub const DEFAULT: Self = Self::Home;

    /// Identifier used in the `p` fragment key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::EditOrganization => "edit-organization",
            Self::EditProduction => "edit-production",
            Self::EditVenue => "edit-venue",
            Self::EditTheatreArtist => "edit-theatre-artist",
            Self::RandomAssThoughts => "random-ass-thoughts",
        }
    }

    /// Looks up a page by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned for an unrecognized page identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownPage(s.to_string()))
    }
}
