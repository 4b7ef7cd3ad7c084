// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::legacy::LegacyTransactionKind;

#[macro_export]
macro_rules! fp_bail {
    ($e:expr) => {
        return Err($e)
    };
}

#[macro_export(local_inner_macros)]
macro_rules! fp_ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            fp_bail!($e);
        }
    };
}
pub(crate) use fp_ensure;

/// Custom error type for transaction building.
///
/// Every error is raised synchronously at the offending call and surfaced to
/// the caller unchanged: a partially built command list has no standalone
/// meaning, so the only sane recovery is to abort the whole build.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize, Error, Hash)]
pub enum BuilderError {
    #[error("Invalid input value: {error}")]
    InvalidInput { error: String },
    #[error("Legacy transaction kind \"{kind}\" is not implemented by the converter")]
    UnsupportedLegacyKind { kind: LegacyTransactionKind },
    #[error("Unknown legacy transaction kind: \"{kind}\"")]
    UnknownLegacyKind { kind: String },
}

pub type BuilderResult<T = ()> = Result<T, BuilderError>;
