//! Verification service: builds, validates and files verifications.
//!
//! The entities stay pure; every lookup the flow needs goes through the ports.

use std::collections::BTreeMap;
use std::sync::Arc;

use kassabok_shared::AppConfig;
use kassabok_shared::types::{CurrencyCode, Id};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::ports::{
    ExchangeRateGateway, FiscalYearRepository, LocalCurrencyLookup, VerificationRepository,
};
use super::transaction::Transaction;
use super::types::{CustomTransactionInput, VerificationType};
use super::verification::Verification;
use crate::account::AccountChart;
use crate::calendar::parse_date;
use crate::clock::{Clock, SystemClock};
use crate::currency::{Currency, to_minor_units};
use crate::entity::Entity;
use crate::error::{ServiceError, ValidationError};
use crate::validation::{ValidationContext, ValidationRules};

/// Result of filing a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored as a new verification.
    Created(Verification),
    /// Replaced the stored verification with the same id.
    Updated(Verification),
    /// An equal verification already existed; it is returned instead.
    Duplicate(Verification),
}

impl SaveOutcome {
    /// The stored verification.
    #[must_use]
    pub const fn verification(&self) -> &Verification {
        match self {
            Self::Created(v) | Self::Updated(v) | Self::Duplicate(v) => v,
        }
    }

    /// Returns true if nothing new was stored.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Verification use cases.
pub struct VerificationService {
    verifications: Arc<dyn VerificationRepository>,
    fiscal_years: Arc<dyn FiscalYearRepository>,
    exchange_rates: Arc<dyn ExchangeRateGateway>,
    local_currencies: Arc<dyn LocalCurrencyLookup>,
    clock: Arc<dyn Clock>,
    rules: ValidationRules,
    accounts: AccountChart,
}

impl VerificationService {
    /// Creates a service with default rules and the system clock.
    #[must_use]
    pub fn new(
        verifications: Arc<dyn VerificationRepository>,
        fiscal_years: Arc<dyn FiscalYearRepository>,
        exchange_rates: Arc<dyn ExchangeRateGateway>,
        local_currencies: Arc<dyn LocalCurrencyLookup>,
    ) -> Self {
        Self {
            verifications,
            fiscal_years,
            exchange_rates,
            local_currencies,
            clock: Arc::new(SystemClock),
            rules: ValidationRules::default(),
            accounts: AccountChart::default(),
        }
    }

    /// Uses the given clock for "now".
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Uses the validation rules and chart of accounts from configuration.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.rules = ValidationRules::from_config(&config.validation);
        self.accounts = AccountChart::from_config(&config.accounts);
        self
    }

    /// Validation context at the clock's current time.
    #[must_use]
    pub fn context(&self) -> ValidationContext {
        ValidationContext {
            now: self.clock.now(),
            rules: self.rules.clone(),
            accounts: self.accounts.clone(),
        }
    }

    /// Builds a verification from manually entered lines.
    ///
    /// Lines in a foreign currency are converted into the user's local currency at
    /// the rate of the verification date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with every failed rule, or the error of a failed lookup.
    pub async fn new_custom_transaction(
        &self,
        input: CustomTransactionInput,
    ) -> Result<Verification, ServiceError> {
        let CustomTransactionInput {
            user_id,
            verification: custom,
        } = input;

        let local = self.local_currencies.local_currency(&user_id).await?;
        debug!(user_id = %user_id, local = %local, "Resolved local currency");

        // Rates are only looked up for a valid date; an invalid one is reported below.
        let date = parse_date(&custom.date);
        let mut rates: BTreeMap<CurrencyCode, Decimal> = BTreeMap::new();
        let mut transactions = Vec::with_capacity(custom.transactions.len());

        for line in &custom.transactions {
            let amount = to_minor_units(line.amount);
            let currency = match date {
                Some(date) if line.currency_code != local => {
                    let rate = match rates.get(&line.currency_code) {
                        Some(rate) => *rate,
                        None => {
                            let rate = self
                                .exchange_rates
                                .exchange_rate(date, line.currency_code, local)
                                .await?;
                            debug!(from = %line.currency_code, to = %local, %date, %rate, "Fetched exchange rate");
                            rates.insert(line.currency_code, rate);
                            rate
                        }
                    };
                    Currency::foreign(amount, line.currency_code, local, rate)
                }
                _ => Currency::local(amount, line.currency_code),
            };
            transactions.push(Transaction::new(line.account_number, currency));
        }

        let verification = Verification {
            user_id: Some(user_id),
            name: custom.name,
            date: custom.date,
            verification_type: VerificationType::Transaction,
            transactions,
            description: custom.description,
            files: custom.files,
            ..Verification::default()
        };

        self.ensure_valid(&verification)?;
        Ok(verification)
    }

    /// Validates and files a verification.
    ///
    /// Binds the fiscal year when missing. A verification that already has an id
    /// replaces the stored one. A new verification is stamped with the creation time;
    /// when an equal verification exists, the new files are appended to it and it is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with every failed rule, or the error of a failed lookup.
    pub async fn save(&self, verification: Verification) -> Result<SaveOutcome, ServiceError> {
        self.ensure_valid(&verification)?;
        let user_id = owner(&verification)?;

        let mut verification = verification;
        if verification.fiscal_year_id.is_none() {
            let fiscal_year = self
                .fiscal_years
                .fiscal_year_for(&user_id, &verification.date)
                .await?;
            debug!(fiscal_year = %fiscal_year.id, date = %verification.date, "Bound fiscal year");
            verification.fiscal_year_id = Some(fiscal_year.id);
        }

        if verification.id().is_some() {
            return self.update(verification).await.map(SaveOutcome::Updated);
        }

        let now = self.clock.now();
        verification.entity.stamp(now);
        for transaction in &mut verification.transactions {
            transaction.entity.stamp(now);
        }

        let comparable = verification.comparable();
        if let Some(existing) = self.verifications.find_duplicate(&comparable).await? {
            return self.merge_duplicate(&user_id, existing, &verification.files).await;
        }

        match self.verifications.save(&verification).await {
            Ok(id) => {
                info!(id = %id, user_id = %user_id, name = %verification.name, "Verification saved");
                Ok(SaveOutcome::Created(verification.with_id(id)))
            }
            Err(ServiceError::Duplicate(existing_id)) => {
                let existing = self.verifications.get(&user_id, &existing_id).await?;
                self.merge_duplicate(&user_id, existing, &verification.files)
                    .await
            }
            Err(err) => Err(err),
        }
    }

    /// All verifications of a user in one fiscal year.
    ///
    /// # Errors
    ///
    /// Returns the repository error.
    pub async fn get_all(
        &self,
        user_id: &Id,
        fiscal_year_id: &Id,
    ) -> Result<Vec<Verification>, ServiceError> {
        let verifications = self
            .verifications
            .find_by_fiscal_year(user_id, fiscal_year_id)
            .await?;
        debug!(user_id = %user_id, fiscal_year = %fiscal_year_id, count = verifications.len(), "Listed verifications");
        Ok(verifications)
    }

    /// Links an invoice and the payment that settles it.
    ///
    /// Sets the payment id on the invoice and the invoice id on the payment, then
    /// stores both. Returns the updated invoice and payment.
    ///
    /// # Errors
    ///
    /// Returns `VerificationNotFound` when either is not stored for the user, or
    /// `InvalidInput` when either fails validation.
    pub async fn bind_invoice_to_payment(
        &self,
        user_id: &Id,
        invoice_id: &Id,
        payment_id: &Id,
    ) -> Result<(Verification, Verification), ServiceError> {
        let mut invoice = self.verifications.get(user_id, invoice_id).await?;
        let mut payment = self.verifications.get(user_id, payment_id).await?;

        invoice.payment_id = Some(payment_id.clone());
        payment.invoice_id = Some(invoice_id.clone());
        self.ensure_valid(&invoice)?;
        self.ensure_valid(&payment)?;

        let invoice = self.update(invoice).await?;
        let payment = self.update(payment).await?;
        info!(invoice = %invoice_id, payment = %payment_id, "Bound invoice to payment");
        Ok((invoice, payment))
    }

    async fn update(&self, mut verification: Verification) -> Result<Verification, ServiceError> {
        let now = self.clock.now();
        verification.entity.touch(now);
        for transaction in &mut verification.transactions {
            transaction.entity.touch(now);
        }

        let id = self.verifications.save(&verification).await?;
        info!(id = %id, name = %verification.name, "Verification updated");
        Ok(verification.with_id(id))
    }

    fn ensure_valid(&self, verification: &Verification) -> Result<(), ServiceError> {
        let errors = verification.validate(&self.context());
        if errors.is_empty() {
            return Ok(());
        }

        warn!(
            name = %verification.name,
            date = %verification.date,
            errors = ?errors.iter().map(ValidationError::code).collect::<Vec<_>>(),
            "Verification rejected"
        );
        Err(ServiceError::InvalidInput(errors))
    }

    async fn merge_duplicate(
        &self,
        user_id: &Id,
        existing: Verification,
        files: &[String],
    ) -> Result<SaveOutcome, ServiceError> {
        let new_files: Vec<String> = files
            .iter()
            .filter(|file| !existing.files.contains(file))
            .cloned()
            .collect();

        let Some(id) = existing.entity.id.clone() else {
            return Err(ServiceError::Internal(
                "stored verification has no id".to_string(),
            ));
        };
        warn!(id = %id, name = %existing.name, "Duplicate verification");

        if new_files.is_empty() {
            return Ok(SaveOutcome::Duplicate(existing));
        }
        let updated = self
            .verifications
            .add_files(user_id, &id, &new_files)
            .await?;
        Ok(SaveOutcome::Duplicate(updated))
    }
}

fn owner(verification: &Verification) -> Result<Id, ServiceError> {
    verification
        .user_id
        .clone()
        .ok_or_else(|| ServiceError::InvalidInput(vec![ValidationError::UserIdMissing]))
}
