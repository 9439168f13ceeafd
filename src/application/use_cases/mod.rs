//! Use case implementations.

mod resolve_credentials_use_case;

pub use resolve_credentials_use_case::ResolveCredentialsUseCase;
