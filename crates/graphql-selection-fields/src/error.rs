use itertools::Itertools;

pub type FlattenResult<T> = Result<T, FlattenError>;
pub type TagResult<T> = Result<T, TagError>;
pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Unknown fragment named '{name}'")]
    UnknownFragment { name: String },
    /// The names of the fragments being expanded, ending with the one spread a second time.
    #[error("Fragment cycle detected: {}", .cycle.iter().join(" -> "))]
    FragmentCycle { cycle: Vec<String> },
    #[error("The resolve context does not hold any field node")]
    MissingFieldNodes,
}

#[derive(thiserror::Error, Debug)]
pub enum TagError {
    #[error("Cannot attach a context to {found}, expected an object or a list")]
    TypeMismatch { found: &'static str },
    #[error("Cannot attach a context to the list element at index {index}: found {found}, expected an object or a list")]
    ElementTypeMismatch { index: usize, found: &'static str },
    #[error("Only objects can carry an inline context, found {found}")]
    NotInlinable { found: &'static str },
    #[error("Could not serialize the context: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("Could not parse the query: {0}")]
    Parse(#[from] graphql_parser::query::ParseError),
    #[error("The document does not contain any operation")]
    MissingOperation,
    #[error("Unknown operation named '{name}'")]
    UnknownOperation { name: String },
    #[error("The document contains several operations, an operation name is required")]
    AmbiguousOperation,
    #[error("The path to the resolved field is empty")]
    EmptyPath,
    #[error("No field found at '{}'", .path.iter().join("."))]
    FieldNotFound { path: Vec<String> },
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}
