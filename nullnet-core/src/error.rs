//! Error types for the nullnet core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $Variant:ident => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $Variant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$Variant { .. } => $CodeTy::$Variant,)+
                }
            }
        }
    };
}

/// Error produced by graph construction, generation and statistics.
///
/// Validation happens when an operation is entered, before any work is done,
/// so an error never leaves partially computed state behind.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NetworkError {
    /// The input has the wrong shape: an empty sequence, a graph without
    /// edges, or a graph that is not simple and undirected.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of the rejected input.
        reason: String,
    },
    /// A numeric argument fell outside its valid domain.
    #[error("parameter `{name}` is invalid: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// The graph is too small for the requested statistic.
    #[error("{statistic} requires at least {required} nodes but the graph has {actual}")]
    InsufficientNodes {
        /// Statistic or model that was requested.
        statistic: &'static str,
        /// Minimum node count the statistic needs.
        required: usize,
        /// Node count of the supplied graph.
        actual: usize,
    },
}

impl NetworkError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn require_nodes(
        statistic: &'static str,
        required: usize,
        actual: usize,
    ) -> Result<()> {
        if actual < required {
            return Err(Self::InsufficientNodes {
                statistic,
                required,
                actual,
            });
        }
        Ok(())
    }
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// The input has the wrong shape.
        InvalidInput => "NETWORK_INVALID_INPUT",
        /// A numeric argument fell outside its valid domain.
        InvalidParameter => "NETWORK_INVALID_PARAMETER",
        /// The graph is too small for the requested statistic.
        InsufficientNodes => "NETWORK_INSUFFICIENT_NODES",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, NetworkError>;
