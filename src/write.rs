use crate::{compute::Bills, data::Bill};

/// Basic CSV exporter for `Bills`. Rows are sorted by account number so the
/// output doesn't depend on hash order; the header is written explicitly so
/// an empty run still produces it.
pub(crate) fn write_bills<W: std::io::Write>(
    writer: W,
    bills: &Bills,
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record([
        "account_number",
        "minutes_international",
        "number_international",
        "minutes_domestic",
        "number_domestic",
        "minutes_local",
        "number_local",
        "charge",
    ])?;
    let mut sorted: Vec<&Bill> = bills.bills.values().collect();
    sorted.sort_by_key(|bill| bill.account);
    for bill in sorted {
        wtr.serialize(bill)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_bills;
    use crate::{compute::Bills, data::Bill};
    use rust_decimal_macros::dec;

    #[test]
    fn bills_are_written_sorted_with_padded_charges() {
        let mut bills = Bills::new();
        bills.bills.insert(
            2,
            Bill {
                charge: dec!(0.2),
                minutes_domestic: 2,
                num_domestic: 1,
                ..Bill::new(2)
            },
        );
        bills.bills.insert(
            1,
            Bill {
                charge: dec!(1.4),
                minutes_international: 2,
                num_international: 1,
                ..Bill::new(1)
            },
        );
        let mut out = Vec::new();
        write_bills(&mut out, &bills).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "account_number,minutes_international,number_international,\
             minutes_domestic,number_domestic,minutes_local,number_local,charge\n\
             1,2,1,0,0,0,0,1.40\n\
             2,0,0,2,1,0,0,0.20\n"
        );
    }

    #[test]
    fn empty_bills_still_produce_the_header() {
        let mut out = Vec::new();
        write_bills(&mut out, &Bills::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "account_number,minutes_international,number_international,\
             minutes_domestic,number_domestic,minutes_local,number_local,charge\n"
        );
    }
}
