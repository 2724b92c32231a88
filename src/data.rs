use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type AccountId = u32;

/// Charges are rendered with this many decimal places.
pub const CHARGE_SCALE: u32 = 2;

/// One row of the usage file: a single call made from `origination` to
/// `termination`. Timestamps carry no timezone, usage files are recorded in a
/// single zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CallRecord {
    #[serde(rename = "account_number")]
    pub account: AccountId,
    #[serde(rename = "origination_number")]
    pub origination: PhoneNumber,
    #[serde(rename = "termination_number")]
    pub termination: PhoneNumber,
    #[serde(rename = "call_start", deserialize_with = "deserialize_timestamp")]
    pub start: NaiveDateTime,
    #[serde(rename = "call_stop", deserialize_with = "deserialize_timestamp")]
    pub stop: NaiveDateTime,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {s:?}")))
}

/// A number of the form `+CAAANNNNNNN`: 1-digit country code, 3-digit area
/// code, 7-digit line number. Validated when deserialized so the rest of the
/// code can slice it blindly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) struct PhoneNumber {
    digits: String,
}

impl PhoneNumber {
    pub fn country_code(&self) -> &str {
        &self.digits[..1]
    }

    pub fn area_code(&self) -> &str {
        &self.digits[1..4]
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedPhoneNumber(s.to_owned()));
        }
        Ok(Self {
            digits: digits.to_owned(),
        })
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

/// Rating class of a single call, decided by comparing the two numbers'
/// country and area codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallClass {
    International,
    Domestic,
    Local,
}

/// Aggregated usage and charge for one account. The `charge` field keeps
/// whatever scale the per-call arithmetic produced; it is only forced to
/// `CHARGE_SCALE` digits at serialization time.
/// See `BillSerializer` for details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "BillSerializer")]
pub(crate) struct Bill {
    pub account: AccountId,
    pub minutes_international: u32,
    pub num_international: u32,
    pub minutes_domestic: u32,
    pub num_domestic: u32,
    pub minutes_local: u32,
    pub num_local: u32,
    pub charge: Decimal,
}

impl Bill {
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            minutes_international: 0,
            num_international: 0,
            minutes_domestic: 0,
            num_domestic: 0,
            minutes_local: 0,
            num_local: 0,
            charge: Decimal::ZERO,
        }
    }

    /// Folds one rated call into the bill.
    pub fn add_call(&mut self, class: CallClass, minutes: u32, charge: Decimal) {
        match class {
            CallClass::International => {
                self.minutes_international += minutes;
                self.num_international += 1;
            }
            CallClass::Domestic => {
                self.minutes_domestic += minutes;
                self.num_domestic += 1;
            }
            CallClass::Local => {
                self.minutes_local += minutes;
                self.num_local += 1;
            }
        }
        self.charge += charge;
    }
}

/// This is our proxy for serializing `Bill`: it renames the count columns to
/// the output schema and pads the charge to exactly `CHARGE_SCALE` decimal
/// places just before serialization.
#[derive(Serialize)]
pub(crate) struct BillSerializer {
    pub account_number: AccountId,
    pub minutes_international: u32,
    pub number_international: u32,
    pub minutes_domestic: u32,
    pub number_domestic: u32,
    pub minutes_local: u32,
    pub number_local: u32,
    pub charge: Decimal,
}

impl From<Bill> for BillSerializer {
    fn from(bill: Bill) -> Self {
        let mut charge = bill.charge;
        charge.rescale(CHARGE_SCALE);
        Self {
            account_number: bill.account,
            minutes_international: bill.minutes_international,
            number_international: bill.num_international,
            minutes_domestic: bill.minutes_domestic,
            number_domestic: bill.num_domestic,
            minutes_local: bill.minutes_local,
            number_local: bill.num_local,
            charge,
        }
    }
}

/// Domain errors for a single call row. Rows failing with one of these are
/// dropped from the run with a warning, they don't abort the whole file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed phone number {0:?} (expected +CAAANNNNNNN)")]
    MalformedPhoneNumber(String),
    #[error("Call ends before it starts ({stop} < {start})")]
    NegativeDuration {
        start: NaiveDateTime,
        stop: NaiveDateTime,
    },
}
