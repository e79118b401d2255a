use thiserror::Error;

/// Failures raised by the query pipeline.
///
/// Only the paging variants describe bad client input; the others mean a
/// request slipped past validation or the mappings are misconfigured.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no property mapping registered for {source_type} -> {destination_type}")]
    MappingNotFound {
        source_type: &'static str,
        destination_type: &'static str,
    },

    #[error("sort field '{0}' has no property mapping")]
    UnmappedSortField(String),

    #[error("entity does not expose sortable property '{0}'")]
    UnsupportedSortProperty(&'static str),

    #[error("property '{field}' does not exist on {type_name}")]
    UnknownProperty {
        field: String,
        type_name: &'static str,
    },

    #[error("page number must be at least 1")]
    InvalidPageNumber,

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("failed to serialize shaped value: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    /// True when the error was caused by the caller's paging input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPageNumber | Self::InvalidPageSize)
    }
}
