// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compatibility layer translating legacy single-intent transactions into
//! programmable transactions. This exists only to keep old wallet payloads
//! working and will be removed once they are migrated off the legacy format.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base_types::{ObjectRef, SuiAddress};
use crate::error::{BuilderError, BuilderResult};
use crate::programmable_transaction_builder::ProgrammableTransactionBuilder;
use crate::transaction::{Command, ObjectArg, ProgrammableTransaction};

#[cfg(test)]
#[path = "unit_tests/legacy_tests.rs"]
mod legacy_tests;

/// The closed set of transaction kinds understood by the legacy wallet
/// format. The wire tag is the camelCase variant name.
#[derive(
    Eq,
    PartialEq,
    Copy,
    Clone,
    Debug,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum LegacyTransactionKind {
    MergeCoin,
    PaySui,
    TransferObject,
    PayAllSui,
    SplitCoin,
    MoveCall,
    Publish,
    Pay,
    TransferSui,
}

/// A legacy transaction as signed by old wallets: a kind tag and a
/// kind-dependent data payload. The tag is kept as a string so that payloads
/// from newer or unknown formats can be observed and rejected rather than
/// failing at deserialization.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignableTransaction {
    pub kind: String,
    pub data: SignableTransactionData,
}

/// Data payload of a legacy transaction. The legacy format is loosely typed:
/// which fields are required depends on the transaction kind, and the gas
/// fields are optional everywhere.
#[derive(Eq, PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignableTransactionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_coin: Option<ObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_to_merge: Option<ObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_object_id: Option<ObjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<SuiAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<SuiAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_amounts: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_coins: Option<Vec<ObjectRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_payment: Option<Vec<ObjectRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
}

/// Convert a legacy transaction into the equivalent programmable transaction,
/// preserving the gas behavior (payment, budget, price) observed by the old
/// format.
pub fn convert_to_builder(tx: &SignableTransaction) -> BuilderResult<ProgrammableTransaction> {
    let SignableTransaction { kind, data } = tx;
    let kind: LegacyTransactionKind =
        kind.parse()
            .map_err(|_| BuilderError::UnknownLegacyKind { kind: kind.clone() })?;
    let mut builder = ProgrammableTransactionBuilder::new();
    match kind {
        LegacyTransactionKind::MergeCoin => {
            let primary_coin = require(&data.primary_coin, "primaryCoin")?;
            let coin_to_merge = require(&data.coin_to_merge, "coinToMerge")?;
            builder.merge_coins(*primary_coin, vec![*coin_to_merge])?;
        }
        LegacyTransactionKind::PaySui => {
            let recipients = require(&data.recipients, "recipients")?;
            let amounts = require(&data.amounts, "amounts")?;
            let input_coins = require(&data.input_coins, "inputCoins")?;
            let gas = builder.gas();
            for (index, recipient) in recipients.iter().enumerate() {
                let Some(amount) = amounts.get(index) else {
                    fp_bail!(BuilderError::InvalidInput {
                        error: format!(
                            "missing amount for recipient {index}: {} recipients, {} amounts",
                            recipients.len(),
                            amounts.len()
                        ),
                    });
                };
                let amount = builder.pure(amount)?;
                let coin = builder.command(Command::SplitCoins(gas, vec![amount]))?;
                let recipient = builder.pure(recipient)?;
                builder.command(Command::TransferObjects(vec![coin], recipient))?;
            }
            builder.set_gas_payment(input_coins.clone());
        }
        LegacyTransactionKind::TransferObject => {
            let object_id = require(&data.object_id, "objectId")?;
            let recipient = require(&data.recipient, "recipient")?;
            builder.transfer_object(*recipient, *object_id)?;
        }
        LegacyTransactionKind::PayAllSui => {
            let recipient = require(&data.recipient, "recipient")?;
            let input_coins = require(&data.input_coins, "inputCoins")?;
            let gas = builder.gas();
            let recipient = builder.pure(recipient)?;
            builder.command(Command::TransferObjects(vec![gas], recipient))?;
            builder.set_gas_payment(input_coins.clone());
        }
        LegacyTransactionKind::SplitCoin => {
            let coin_object_id = require(&data.coin_object_id, "coinObjectId")?;
            let split_amounts = require(&data.split_amounts, "splitAmounts")?;
            for amount in split_amounts {
                let coin = builder.obj(ObjectArg::ImmOrOwnedObject(*coin_object_id))?;
                let amount = builder.pure(amount)?;
                builder.command(Command::SplitCoins(coin, vec![amount]))?;
            }
        }
        LegacyTransactionKind::MoveCall
        | LegacyTransactionKind::Publish
        | LegacyTransactionKind::Pay
        | LegacyTransactionKind::TransferSui => {
            fp_bail!(BuilderError::UnsupportedLegacyKind { kind })
        }
    }

    // Gas fields on the payload apply after dispatch, in payment, budget,
    // price order, overriding any kind-specific default set above. Old
    // clients rely on a trailing `gasPayment` winning over the input-coin
    // payment set by `paySui`/`payAllSui`.
    if let Some(gas_payment) = &data.gas_payment {
        builder.set_gas_payment(gas_payment.clone());
    }
    if let Some(gas_budget) = data.gas_budget {
        builder.set_gas_budget(gas_budget);
    }
    if let Some(gas_price) = data.gas_price {
        builder.set_gas_price(gas_price);
    }

    let tx = builder.finish();
    debug!(
        kind = %kind,
        commands = tx.commands.len(),
        inputs = tx.inputs.len(),
        "converted legacy transaction"
    );
    Ok(tx)
}

fn require<'a, T>(field: &'a Option<T>, name: &str) -> BuilderResult<&'a T> {
    field.as_ref().ok_or_else(|| BuilderError::InvalidInput {
        error: format!("legacy payload is missing required field `{name}`"),
    })
}
