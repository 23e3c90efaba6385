use thiserror::Error;

/// Errors that may occur when resolving a refrigerant state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, the vapor quality of a pure fluid given a temperature and
    /// pressure that sit exactly on the saturation line.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The inputs are outside the model's valid domain.
    ///
    /// For example, a saturation query above the critical point.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The inputs are inconsistent with the refrigerant's phase behavior.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }
}
