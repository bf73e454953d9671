use std::cmp::Ordering;

use crate::rowkey::Rowkey;
use crate::schema::KeySchema;

impl Rowkey<'_> {
    /// Total order between two rowkeys.
    ///
    /// 1. Keys that both start with `MIN` (or both with `MAX`) are equal no
    ///    matter what follows: `<MIN, x, y> == <MIN>`.
    /// 2. Otherwise compare position by position; with a schema, descending
    ///    columns flip the per-column result. First difference wins.
    /// 3. Equal prefixes: the shorter key sorts first.
    pub fn compare(&self, other: &Rowkey<'_>, schema: Option<&KeySchema>) -> Ordering {
        if let (Some(l), Some(r)) = (self.values.first(), other.values.first()) {
            if (l.is_min_value() && r.is_min_value()) || (l.is_max_value() && r.is_max_value()) {
                return Ordering::Equal;
            }
        }

        for (i, (l, r)) in self.values.iter().zip(other.values).enumerate() {
            let ord = l.compare(r);
            let ord = match schema {
                Some(schema) => schema.order(i).apply(ord),
                None => ord,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        self.len().cmp(&other.len())
    }
}

impl PartialEq for Rowkey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other, None) == Ordering::Equal
    }
}

impl Eq for Rowkey<'_> {}

impl PartialOrd for Rowkey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rowkey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, None)
    }
}

/// Sort/merge predicate bound to one key schema for its lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowkeyLess<'s> {
    schema: Option<&'s KeySchema>,
}

impl<'s> RowkeyLess<'s> {
    pub fn new(schema: Option<&'s KeySchema>) -> Self {
        RowkeyLess { schema }
    }

    pub fn less(&self, lhs: &Rowkey<'_>, rhs: &Rowkey<'_>) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }

    pub fn compare(&self, lhs: &Rowkey<'_>, rhs: &Rowkey<'_>) -> Ordering {
        lhs.compare(rhs, self.schema)
    }
}
