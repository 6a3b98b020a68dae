use std::io;

use csv::WriterBuilder;
use log::{debug, info};

use crate::error::GenError;
use crate::registry::DepositRegistry;
use crate::source::RandomSource;
use crate::transaction::{Amount, TransactionRecord, TransactionRecordType, CSV_HEADER};

pub const DEFAULT_TRANSACTION_COUNT: u32 = 10_000;
pub const DEFAULT_CLIENT_COUNT: u16 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Transaction ids are drawn from `0..transaction_count`, each visited once
    pub transaction_count: u32,
    /// Client ids are drawn from `0..client_count`
    pub client_count: u16,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            transaction_count: DEFAULT_TRANSACTION_COUNT,
            client_count: DEFAULT_CLIENT_COUNT,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(transaction_count: u32, client_count: u16) -> Self {
        GeneratorConfig {
            transaction_count,
            client_count,
        }
    }

    /// # Errors
    /// Errors when there are no client ids to draw from
    pub fn validate(&self) -> Result<(), GenError> {
        if self.client_count == 0 {
            return Err(GenError::NoClients);
        }
        Ok(())
    }
}

/// Per-category row counts of one run, plus the dispute-like draws that were dropped
/// because no deposit had been emitted yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub deposits: usize,
    pub withdrawals: usize,
    pub disputes: usize,
    pub resolves: usize,
    pub chargebacks: usize,
    pub skipped: usize,
}

impl GenerationSummary {
    fn record(&mut self, transaction_type: TransactionRecordType) {
        match transaction_type {
            TransactionRecordType::Deposit => self.deposits += 1,
            TransactionRecordType::Withdrawal => self.withdrawals += 1,
            TransactionRecordType::Dispute => self.disputes += 1,
            TransactionRecordType::Resolve => self.resolves += 1,
            TransactionRecordType::Chargeback => self.chargebacks += 1,
        }
    }

    #[must_use]
    pub fn count(&self, transaction_type: TransactionRecordType) -> usize {
        match transaction_type {
            TransactionRecordType::Deposit => self.deposits,
            TransactionRecordType::Withdrawal => self.withdrawals,
            TransactionRecordType::Dispute => self.disputes,
            TransactionRecordType::Resolve => self.resolves,
            TransactionRecordType::Chargeback => self.chargebacks,
        }
    }

    /// Number of data rows emitted, header excluded
    #[must_use]
    pub fn rows(&self) -> usize {
        self.deposits + self.withdrawals + self.disputes + self.resolves + self.chargebacks
    }
}

#[derive(Debug)]
pub struct Generator<S: RandomSource> {
    config: GeneratorConfig,
    source: S,
}

impl<S: RandomSource> Generator<S> {
    /// # Errors
    /// Errors when `config` is invalid, see [`GeneratorConfig::validate`]
    pub fn new(config: GeneratorConfig, source: S) -> Result<Self, GenError> {
        config.validate()?;
        Ok(Generator { config, source })
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs one full generation with a fresh deposit registry and collects the rows.
    ///
    /// # Errors
    /// Errors when the random source hands back a value outside its contract
    pub fn generate(&mut self) -> Result<Vec<TransactionRecord>, GenError> {
        let mut records = Vec::new();
        self.run(|record| {
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }

    /// Writes the header and one full generation to `sink` as CSV, then flushes.
    ///
    /// # Errors
    /// Errors when writing to `sink` fails, or when the random source hands back a value
    /// outside its contract
    pub fn write_csv<W: io::Write>(&mut self, sink: W) -> Result<GenerationSummary, GenError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
        writer.write_record(&CSV_HEADER)?;
        let summary = self.run(|record| Ok(writer.serialize(record)?))?;
        writer.flush()?;

        info!(
            "Wrote {} rows ({} deposits, {} withdrawals, {} disputes, {} resolves, {} chargebacks), skipped {}",
            summary.rows(),
            summary.deposits,
            summary.withdrawals,
            summary.disputes,
            summary.resolves,
            summary.chargebacks,
            summary.skipped
        );
        Ok(summary)
    }

    fn run(
        &mut self,
        mut emit: impl FnMut(TransactionRecord) -> Result<(), GenError>,
    ) -> Result<GenerationSummary, GenError> {
        let mut transaction_ids: Vec<u32> = (0..self.config.transaction_count).collect();
        self.source.shuffle(&mut transaction_ids);

        let mut registry = DepositRegistry::new();
        let mut summary = GenerationSummary::default();
        for transaction_id in transaction_ids {
            match self.next_record(transaction_id, &mut registry)? {
                Some(record) => {
                    summary.record(record.transaction_type);
                    emit(record)?;
                }
                None => summary.skipped += 1,
            }
        }
        Ok(summary)
    }

    fn next_record(
        &mut self,
        transaction_id: u32,
        registry: &mut DepositRegistry,
    ) -> Result<Option<TransactionRecord>, GenError> {
        let transaction_type = self.source.category();
        let client_id = self.source.client(self.config.client_count);

        if transaction_type.moves_funds() {
            let amount = Amount::from_ratio(self.source.numerator(), self.source.divisor())?;
            if transaction_type == TransactionRecordType::Deposit {
                registry.register(transaction_id);
            }
            return Ok(Some(TransactionRecord::new(
                transaction_type,
                client_id,
                transaction_id,
                Some(amount),
            )));
        }

        if registry.is_empty() {
            debug!("No deposits yet, skipping {} for tx {}", transaction_type, transaction_id);
            return Ok(None);
        }
        let deposit_id = registry
            .get(self.source.index(registry.len()))
            .ok_or(GenError::BadSample)?;
        Ok(Some(TransactionRecord::new(
            transaction_type,
            client_id,
            deposit_id,
            None,
        )))
    }
}
