//! Column conversions shared by the repositories.

use sqlx::{Error, Row, postgres::PgRow};

/// Read a non-negative `BIGINT` amount column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a non-negative `INTEGER` count column.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, Error> {
    let count_i32: i32 = row.try_get(col)?;

    u32::try_from(count_i32).map_err(|e| Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert an amount for binding to a `BIGINT` column.
pub(crate) fn amount_to_db(amount: u64, col: &str) -> Result<i64, Error> {
    i64::try_from(amount).map_err(|e| Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_beyond_bigint_are_rejected() {
        assert!(amount_to_db(u64::MAX, "price").is_err());
        assert_eq!(amount_to_db(179_900, "price").ok(), Some(179_900));
    }
}
