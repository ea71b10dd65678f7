/// Errors raised by enumeration lookups and parameter parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitsError {
    /// A wire index does not name an entry of the table.
    #[error("{table} index {index} out of range (0..{len})")]
    IndexOutOfRange {
        table: &'static str,
        index: i32,
        len: usize,
    },

    /// A label is not part of the table.
    #[error("unknown {table} value '{label}'")]
    UnknownLabel { table: &'static str, label: String },

    /// A parameter name is not known.
    #[error("unknown parameter '{0}'")]
    UnknownParam(String),
}

pub type Result<T> = std::result::Result<T, UnitsError>;
