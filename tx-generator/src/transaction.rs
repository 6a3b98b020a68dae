use std::fmt;

use rust_decimal::prelude::*;
use serde::{Serialize, Serializer};

use crate::error::GenError;

pub const NUM_DECIMAL_PLACES: u32 = 4;

/// Column names of the generated CSV, in field order of [`TransactionRecord`]
pub const CSV_HEADER: [&str; 4] = ["type", "client", "tx", "amount"];

#[allow(clippy::module_name_repetitions)]
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionRecordType {
    Deposit,
    Withdrawal,
    Dispute,
    Resolve,
    Chargeback,
}

impl TransactionRecordType {
    pub const ALL: [TransactionRecordType; 5] = [
        TransactionRecordType::Deposit,
        TransactionRecordType::Withdrawal,
        TransactionRecordType::Dispute,
        TransactionRecordType::Resolve,
        TransactionRecordType::Chargeback,
    ];

    /// Deposits and withdrawals carry an amount and introduce a new transaction id.
    /// Everything else refers back to an earlier deposit.
    #[must_use]
    pub fn moves_funds(self) -> bool {
        matches!(
            self,
            TransactionRecordType::Deposit | TransactionRecordType::Withdrawal
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionRecordType::Deposit => "deposit",
            TransactionRecordType::Withdrawal => "withdrawal",
            TransactionRecordType::Dispute => "dispute",
            TransactionRecordType::Resolve => "resolve",
            TransactionRecordType::Chargeback => "chargeback",
        }
    }
}

impl fmt::Display for TransactionRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strictly positive amount, always carried with [`NUM_DECIMAL_PLACES`] fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Builds `numerator / divisor`, rounded half-to-even to four places.
    ///
    /// # Errors
    /// Errors when `numerator` is zero or `divisor` is zero
    pub fn from_ratio(numerator: u32, divisor: u32) -> Result<Self, GenError> {
        if numerator == 0 {
            return Err(GenError::InvalidAmount);
        }
        let mut value = Decimal::from(numerator)
            .checked_div(Decimal::from(divisor))
            .ok_or(GenError::InvalidAmount)?
            .round_dp_with_strategy(NUM_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        value.rescale(NUM_DECIMAL_PLACES);
        Ok(Amount(value))
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

/// One output row. `amount` is `None` for disputes, resolves and chargebacks, which
/// serializes as an empty trailing field.
#[allow(clippy::module_name_repetitions)]
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub transaction_type: TransactionRecordType,
    #[serde(rename = "client")]
    pub client_id: u16,
    #[serde(rename = "tx")]
    pub transaction_id: u32,
    pub amount: Option<Amount>,
}

impl TransactionRecord {
    #[must_use]
    pub fn new(
        transaction_type: TransactionRecordType,
        client_id: u16,
        transaction_id: u32,
        amount: Option<Amount>,
    ) -> Self {
        TransactionRecord {
            transaction_type,
            client_id,
            transaction_id,
            amount,
        }
    }
}
