//! CSV export and import of flat coupon records.
//!
//! The header row is always the column list in [`COLUMNS`]. Dates are written as
//! `YYYY-MM-DD`, enums in lowercase and absent optional amounts as empty cells.

use crate::{
    core::ledger::CouponLedger,
    entities::{COLUMNS, Coupon, CouponRecord},
    errors::Result,
};
use chrono::NaiveDate;
use std::io;
use tracing::debug;

/// Writes `records` as CSV, header row first.
///
/// # Errors
/// Returns [`crate::errors::Error::Csv`] or [`crate::errors::Error::Io`] if
/// writing fails.
pub fn write_csv<W: io::Write>(records: &[CouponRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Serializing the first record emits the header; an empty export still gets one.
    if records.is_empty() {
        csv_writer.write_record(COLUMNS)?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Reads flat records from CSV with a header row.
///
/// # Errors
/// Returns [`crate::errors::Error::Csv`] if a row cannot be parsed.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<CouponRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<CouponRecord>, csv::Error>>()?;
    Ok(records)
}

/// Reads CSV and rebuilds validated coupons. Status cells are ignored.
///
/// # Errors
/// Fails on the first row that cannot be parsed or violates a coupon invariant.
pub fn import_coupons<R: io::Read>(reader: R) -> Result<Vec<Coupon>> {
    read_csv(reader)?
        .into_iter()
        .map(Coupon::try_from)
        .collect()
}

/// Exports every coupon in the ledger, ordered by id, and returns the row count.
///
/// # Errors
/// Same as [`write_csv`].
pub fn export_ledger<W: io::Write>(
    ledger: &CouponLedger,
    today: NaiveDate,
    writer: W,
) -> Result<usize> {
    let records = ledger.export_records(today);
    write_csv(&records, writer)?;

    debug!(rows = records.len(), "Exported coupon ledger");
    Ok(records.len())
}
