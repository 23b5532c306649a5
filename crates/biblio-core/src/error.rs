//! Error taxonomy for the core components.
//!
//! The only fallible leaf is the action-token parser; the compiler, the
//! paginator, and the layout engine are total over validated inputs. The
//! orchestrator (root crate) folds these into user-visible outcomes and
//! never lets them propagate past its boundary.

use thiserror::Error;

/// A malformed or unrecognised button token. Always rejected with no state
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown action token: {token:?}")]
    UnknownToken { token: String },

    #[error("action {verb:?} requires an argument")]
    MissingArgument { verb: String },

    #[error("invalid argument {argument:?} for action {verb:?}")]
    BadArgument { verb: String, argument: String },
}
