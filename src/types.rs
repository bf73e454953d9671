use std::cmp::Ordering;

/// Declared type of a key column, and the runtime type of a [`Value`].
///
/// Declaration order is the cross-type sort rank: when two values of
/// different types meet in a comparison, the one whose tag comes first
/// sorts first. The discriminant is also the on-wire tag byte.
///
/// [`Value`]: crate::value::Value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Null = 0x00,
    Int = 0x01,
    Float = 0x02,
    Double = 0x03,
    DateTime = 0x04,
    PreciseDateTime = 0x05,
    Varchar = 0x06,
    Bool = 0x07,
    /// Type of the MIN/MAX sentinels.
    Extend = 0x7F,
}

impl TypeTag {
    /// Only varchar needs scratch space when something is cast to it.
    /// Every other kind is overwritten in place.
    pub fn is_variable_length(self) -> bool {
        matches!(self, TypeTag::Varchar)
    }
}

/// Per-column sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Flip a value comparison for descending columns.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}
