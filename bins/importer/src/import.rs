//! Import file parsing and the per-file import loop.

use std::collections::BTreeSet;

use anyhow::Context;
use chrono::Datelike;
use serde::Deserialize;
use tracing::{info, warn};

use kassabok_core::calendar::parse_date;
use kassabok_core::error::ServiceError;
use kassabok_core::ledger::{
    CustomTransactionInput, CustomVerification, SaveOutcome, VerificationService,
};
use kassabok_shared::types::Id;

/// A file holds one verification or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<CustomVerification>),
    One(CustomVerification),
}

/// Parses the contents of an import file.
///
/// # Errors
///
/// Returns an error if the contents are not a verification or a list of them.
pub fn parse(contents: &str) -> anyhow::Result<Vec<CustomVerification>> {
    let file: ImportFile = serde_json::from_str(contents).context("invalid import file")?;
    Ok(match file {
        ImportFile::Many(verifications) => verifications,
        ImportFile::One(verification) => vec![verification],
    })
}

/// Calendar years referenced by valid verification dates.
pub fn years(verifications: &[CustomVerification]) -> BTreeSet<i32> {
    verifications
        .iter()
        .filter_map(|v| parse_date(&v.date))
        .map(|date| date.year())
        .collect()
}

/// Counts of what happened to the imported verifications.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Newly stored.
    pub created: usize,
    /// Already stored.
    pub duplicates: usize,
    /// Failed validation or a lookup.
    pub rejected: usize,
}

/// Runs every verification through creation and filing.
///
/// Rejected verifications are logged and counted; they do not stop the import.
pub async fn run(
    service: &VerificationService,
    user_id: &Id,
    verifications: Vec<CustomVerification>,
) -> Summary {
    let mut summary = Summary::default();

    for verification in verifications {
        let name = verification.name.clone();
        let input = CustomTransactionInput {
            user_id: user_id.clone(),
            verification,
        };

        match import_one(service, input).await {
            Ok(SaveOutcome::Created(saved) | SaveOutcome::Updated(saved)) => {
                summary.created += 1;
                info!(name = %name, id = ?saved.entity.id, "Imported");
            }
            Ok(SaveOutcome::Duplicate(existing)) => {
                summary.duplicates += 1;
                info!(name = %name, id = ?existing.entity.id, "Already imported");
            }
            Err(err) => {
                summary.rejected += 1;
                warn!(name = %name, code = err.error_code(), error = %err, "Rejected");
            }
        }
    }

    summary
}

async fn import_one(
    service: &VerificationService,
    input: CustomTransactionInput,
) -> Result<SaveOutcome, ServiceError> {
    let verification = service.new_custom_transaction(input).await?;
    service.save(verification).await
}
