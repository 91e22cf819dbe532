use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that abort a balance run.
///
/// Validation findings never end up here; they are reported in the
/// validation report of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// A recipe value violates its numeric constraint.
    #[error("invalid parameter `{parameter}`")]
    InvalidParameter {
        /// Dotted path of the offending recipe value.
        parameter: String,

        #[source]
        source: ConstraintError,
    },

    /// The equipment table lacks an item the balance rewrites.
    #[error("equipment `{code}` is missing from the table")]
    MissingEquipment { code: String },

    /// The closure error is undefined because nothing enters the balance.
    #[error("total energy input is zero; closure error is undefined")]
    ZeroEnergyInput,

    /// The chiller deviation is undefined because the listed chiller energy is zero.
    #[error("listed chiller energy is zero; deviation is undefined")]
    ZeroChillerReference,
}

impl BalanceError {
    pub(crate) fn invalid(parameter: impl Into<String>, source: ConstraintError) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            source,
        }
    }
}
