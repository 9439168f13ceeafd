//! Application layer with routing, services and use cases.

/// Data transfer objects.
pub mod dto;
/// Fragment-driven router.
pub mod router;
/// Organization service and store context.
pub mod services;
/// Page shell and navigation links.
pub mod shell;
/// Use case implementations.
pub mod use_cases;

pub use dto::{CredentialSource, ResolvedCredentials};
pub use router::{HashRouter, StateSubscription};
pub use services::{OrganizationService, StoreContext};
pub use shell::{LinkView, PageLink, PageShell, Resolution};
pub use use_cases::ResolveCredentialsUseCase;
