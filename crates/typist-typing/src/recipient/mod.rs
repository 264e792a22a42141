//! Canonical recipient keys and the resolver that derives them from
//! compose/edit context.

mod key;
mod resolver;

pub use key::RecipientKey;
pub use resolver::{ComposeContext, RecipientResolver, ResolverPolicy};
