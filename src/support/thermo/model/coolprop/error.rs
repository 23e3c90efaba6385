use std::sync::PoisonError;

use thiserror::Error;

use crate::support::thermo::PropertyError;

/// Errors returned by the [`CoolProp`](super::CoolProp) model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoolPropError {
    #[error(transparent)]
    Rfluids(#[from] rfluids::native::CoolPropError),

    /// The backend rejected the refrigerant's composition.
    #[error("cannot set mole fractions {fractions:?} for {fluid}")]
    Composition {
        fluid: String,
        fractions: Vec<f64>,
        #[source]
        source: rfluids::native::CoolPropError,
    },

    #[error("CoolProp abstract state mutex poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for CoolPropError {
    fn from(_: PoisonError<T>) -> Self {
        CoolPropError::Poisoned
    }
}

impl From<CoolPropError> for PropertyError {
    fn from(error: CoolPropError) -> Self {
        match error {
            CoolPropError::Rfluids(source) => classify(&source.to_string()),
            CoolPropError::Composition { .. } => PropertyError::InvalidState {
                context: error.to_string(),
            },
            CoolPropError::Poisoned => PropertyError::Calculation {
                context: error.to_string(),
            },
        }
    }
}

/// Sorts a CoolProp message into a [`PropertyError`] variant.
///
/// CoolProp reports failures as plain strings, so this matches on known
/// phrases and falls back to [`PropertyError::Calculation`].
fn classify(message: &str) -> PropertyError {
    const UNDEFINED: &[&str] = &["not defined", "not available"];
    const OUT_OF_DOMAIN: &[&str] = &[
        "out of range",
        "not in range",
        "must be in range",
        "outside the range of validity",
        "must be between",
        "above the critical",
        "quality must be",
    ];
    const INVALID_STATE: &[&str] = &["not a valid number", "invalid state", "two-phase"];

    let lowered = message.to_lowercase();
    let matches = |phrases: &[&str]| phrases.iter().any(|phrase| lowered.contains(phrase));
    let context = message.to_owned();

    if matches(UNDEFINED) {
        PropertyError::Undefined { context }
    } else if matches(OUT_OF_DOMAIN) {
        PropertyError::OutOfDomain { context }
    } else if matches(INVALID_STATE) {
        PropertyError::InvalidState { context }
    } else {
        PropertyError::Calculation { context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_classified() {
        assert!(matches!(
            classify("Output not available for this backend"),
            PropertyError::Undefined { .. }
        ));
        assert!(matches!(
            classify("Temperature to QT_flash [400 K] must be in range [168.62 K, 374.21 K]"),
            PropertyError::OutOfDomain { .. }
        ));
        assert!(matches!(
            classify("Pressure 5e6 Pa is above the critical pressure"),
            PropertyError::OutOfDomain { .. }
        ));
        assert!(matches!(
            classify("p is not a valid number"),
            PropertyError::InvalidState { .. }
        ));
        assert!(matches!(classify("solver diverged"), PropertyError::Calculation { .. }));
    }

    #[test]
    fn poisoned_lock_is_a_calculation_error() {
        match PropertyError::from(CoolPropError::Poisoned) {
            PropertyError::Calculation { context } => assert!(context.contains("poisoned")),
            other => panic!("expected a calculation error, got {other:?}"),
        }
    }
}
