use crate::{
    data::{AccountId, Bill, CallClass, CallRecord, Error},
    read::CallSink,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// This is where bills are accumulated; they are created on the fly when
/// reading the calls. The program is single-threaded so no protections
/// for MT.
#[derive(Debug)]
pub(crate) struct Bills {
    pub bills: HashMap<AccountId, Bill>,
}

impl Bills {
    pub fn new() -> Self {
        Self {
            bills: HashMap::new(),
        }
    }
}

/// Connection fee and per-minute rate for a call class.
fn rates(class: CallClass) -> (Decimal, Decimal) {
    match class {
        CallClass::International => (dec!(1.00), dec!(0.20)),
        CallClass::Domestic => (dec!(0.00), dec!(0.10)),
        CallClass::Local => (dec!(0.00), dec!(0.02)),
    }
}

/// International when the country codes differ, domestic when only the area
/// codes differ, local otherwise.
fn classify(call: &CallRecord) -> CallClass {
    if call.origination.country_code() != call.termination.country_code() {
        CallClass::International
    } else if call.origination.area_code() != call.termination.area_code() {
        CallClass::Domestic
    } else {
        CallClass::Local
    }
}

/// Billable call length: whole seconds between start and stop, rounded up to
/// the next minute. Sub-second remainders don't count.
fn call_minutes(call: &CallRecord) -> Result<u32, Error> {
    let seconds = (call.stop - call.start).num_seconds();
    if seconds < 0 {
        return Err(Error::NegativeDuration {
            start: call.start,
            stop: call.stop,
        });
    }
    Ok(((seconds + 59) / 60) as u32)
}

fn charge_for_call(class: CallClass, minutes: u32) -> Decimal {
    let (fee, per_minute) = rates(class);
    fee + per_minute * Decimal::from(minutes)
}

/// This is where the business logic stands: each call is classified, rated,
/// and folded into its account's bill. Bills are keyed by account number in
/// the map, so calls of different accounts can never land on the same bill.
impl CallSink for Bills {
    fn use_call(&mut self, call: CallRecord) -> Result<(), Error> {
        let minutes = call_minutes(&call)?;
        let class = classify(&call);
        let charge = charge_for_call(class, minutes);
        self.bills
            .entry(call.account)
            .or_insert_with(|| Bill::new(call.account))
            .add_call(class, minutes, charge);
        Ok(())
    }
}
