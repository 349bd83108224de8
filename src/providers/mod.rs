//! Search provider module
//!
//! Defines the SearchProvider trait, the declarative provider descriptor,
//! the generic template-driven executor, the Querit vendor-native
//! implementation, and the registry that loads providers from
//! configuration.

mod descriptor;
mod generic;
mod querit;
mod registry;
mod traits;

pub use descriptor::ProviderDescriptor;
pub use generic::GenericProvider;
pub use querit::QueritProvider;
pub use registry::ProviderRegistry;
pub use traits::{SearchOptions, SearchProvider, DEFAULT_LANGUAGE, DEFAULT_LIMIT};
