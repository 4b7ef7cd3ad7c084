// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

//! Construction of programmable transactions: a deduplicated input pool, an
//! append-only command list whose later commands can reference the results of
//! earlier ones, gas configuration, and a compatibility adapter translating
//! legacy single-intent transactions into the command form.
//!
//! The output of this crate is a serializable
//! [`transaction::ProgrammableTransaction`]. Execution, signing, and
//! broadcasting are external concerns: commands are validated for arity and
//! reference ordering only, everything deeper is deferred to the execution
//! layer.

#[macro_use]
pub mod error;

pub mod base_types;
pub mod legacy;
pub mod programmable_transaction_builder;
pub mod sui_serde;
pub mod transaction;
