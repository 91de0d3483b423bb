use thiserror::Error;

// Every check runs before the first row is built, so a call either
// returns a complete table or one of these errors, never a partial result.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    #[error("invalid input: {weights} weights but {values} values")]
    LengthMismatch { weights: usize, values: usize },

    #[error("invalid input: at least one item is required")]
    NoItems,

    #[error("values sum past u64::MAX; optimal totals would not be representable")]
    ValueOverflow,

    #[error("a table of {items} rows by {columns} columns does not fit in memory addressing")]
    TableTooLarge { items: usize, columns: usize },
}

impl KnapsackError {
    /// True for the errors caused by malformed item lists.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. } | Self::NoItems)
    }

    /// True for the integer sizing errors.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::ValueOverflow | Self::TableTooLarge { .. })
    }
}

pub type KnapsackResult<T> = Result<T, KnapsackError>;
