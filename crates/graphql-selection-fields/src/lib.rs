//! Helpers for GraphQL field resolvers.
//!
//! - [`flatten`] turns the selection set of the field being resolved into an ordered map of the
//!   requested fields, inlining fragment spreads, so a resolver can fetch only what is asked for.
//!   The nodes of object fields can be flattened again to look further down the query.
//! - [`with_context`] wraps the fetched rows with a context for the nested resolvers, which read
//!   it back with [`get_context`].

pub mod ast;
mod context;
mod document;
mod error;
mod flatten;
mod options;
mod tagging;

pub use self::{
    context::ResolveContext,
    error::{DocumentError, DocumentResult, FlattenError, FlattenResult, TagError, TagResult},
    flatten::{flatten, flatten_into, flatten_root, FieldMap, Flattener},
    options::{FieldKey, FlattenOptions, InlineFragments},
    tagging::{get_context, with_context, with_context_fn, Contextual, HasContext, Tagged, CONTEXT_KEY},
};

#[cfg(test)]
mod tests {
    use rstest as _;
}
