// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{dbg_addr, random_object_ref, ObjectDigest, ObjectID, SequenceNumber};
use crate::error::BuilderError;
use crate::legacy::{
    convert_to_builder, LegacyTransactionKind, SignableTransaction, SignableTransactionData,
};
use crate::transaction::Argument::{self, GasCoin, Input};
use crate::transaction::{CallArg, Command, ObjectArg};

fn signable(kind: &str, data: SignableTransactionData) -> SignableTransaction {
    SignableTransaction {
        kind: kind.to_string(),
        data,
    }
}

#[test]
fn test_convert_merge_coin() {
    let primary_coin = random_object_ref();
    let coin_to_merge = random_object_ref();

    let tx = convert_to_builder(&signable(
        "mergeCoin",
        SignableTransactionData {
            primary_coin: Some(primary_coin),
            coin_to_merge: Some(coin_to_merge),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(
        tx.inputs,
        vec![
            CallArg::Object(ObjectArg::ImmOrOwnedObject(primary_coin)),
            CallArg::Object(ObjectArg::ImmOrOwnedObject(coin_to_merge)),
        ]
    );
    assert_eq!(
        tx.commands,
        vec![Command::MergeCoins(Input(0), vec![Input(1)])]
    );
    assert_eq!(tx.gas_data.payment, None);
}

#[test]
fn test_convert_merge_coin_missing_field() {
    let result = convert_to_builder(&signable(
        "mergeCoin",
        SignableTransactionData {
            primary_coin: Some(random_object_ref()),
            ..Default::default()
        },
    ));

    assert!(matches!(result, Err(BuilderError::InvalidInput { .. })));
}

#[test]
fn test_convert_pay_sui_fan_out() {
    let input_coins = vec![random_object_ref(), random_object_ref()];
    let recipient_a = dbg_addr(0xa);
    let recipient_b = dbg_addr(0xb);

    let tx = convert_to_builder(&signable(
        "paySui",
        SignableTransactionData {
            recipients: Some(vec![recipient_a, recipient_b]),
            amounts: Some(vec![10, 20]),
            input_coins: Some(input_coins.clone()),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(
        tx.commands,
        vec![
            Command::SplitCoins(GasCoin, vec![Input(0)]),
            Command::TransferObjects(vec![Argument::Result(0)], Input(1)),
            Command::SplitCoins(GasCoin, vec![Input(2)]),
            Command::TransferObjects(vec![Argument::Result(2)], Input(3)),
        ]
    );
    assert_eq!(
        tx.inputs,
        vec![
            CallArg::Pure(bcs::to_bytes(&10u64).unwrap()),
            CallArg::Pure(bcs::to_bytes(&recipient_a).unwrap()),
            CallArg::Pure(bcs::to_bytes(&20u64).unwrap()),
            CallArg::Pure(bcs::to_bytes(&recipient_b).unwrap()),
        ]
    );
    assert_eq!(tx.gas_data.payment, Some(input_coins));
    assert_eq!(tx.gas_data.budget, None);
    assert_eq!(tx.gas_data.price, None);
}

#[test]
fn test_convert_pay_sui_missing_amount() {
    let result = convert_to_builder(&signable(
        "paySui",
        SignableTransactionData {
            recipients: Some(vec![dbg_addr(0xa), dbg_addr(0xb)]),
            amounts: Some(vec![10]),
            input_coins: Some(vec![random_object_ref()]),
            ..Default::default()
        },
    ));

    assert!(matches!(result, Err(BuilderError::InvalidInput { .. })));
}

#[test]
fn test_convert_pay_sui_requires_input_coins() {
    let result = convert_to_builder(&signable(
        "paySui",
        SignableTransactionData {
            recipients: Some(vec![dbg_addr(0xa)]),
            amounts: Some(vec![10]),
            ..Default::default()
        },
    ));

    assert!(matches!(result, Err(BuilderError::InvalidInput { .. })));
}

#[test]
fn test_convert_transfer_object() {
    let object_ref = random_object_ref();
    let recipient = dbg_addr(0xa);

    let tx = convert_to_builder(&signable(
        "transferObject",
        SignableTransactionData {
            object_id: Some(object_ref),
            recipient: Some(recipient),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(
        tx.inputs,
        vec![
            CallArg::Object(ObjectArg::ImmOrOwnedObject(object_ref)),
            CallArg::Pure(bcs::to_bytes(&recipient).unwrap()),
        ]
    );
    assert_eq!(
        tx.commands,
        vec![Command::TransferObjects(vec![Input(0)], Input(1))]
    );
}

#[test]
fn test_convert_pay_all_sui() {
    let input_coins = vec![random_object_ref(), random_object_ref()];
    let recipient = dbg_addr(0xa);

    let tx = convert_to_builder(&signable(
        "payAllSui",
        SignableTransactionData {
            recipient: Some(recipient),
            input_coins: Some(input_coins.clone()),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(
        tx.inputs,
        vec![CallArg::Pure(bcs::to_bytes(&recipient).unwrap())]
    );
    assert_eq!(
        tx.commands,
        vec![Command::TransferObjects(vec![GasCoin], Input(0))]
    );
    assert_eq!(tx.gas_data.payment, Some(input_coins));
}

#[test]
fn test_convert_pay_all_sui_gas_payment_precedence() {
    let input_coins = vec![random_object_ref()];
    let gas_payment = vec![random_object_ref()];

    let tx = convert_to_builder(&signable(
        "payAllSui",
        SignableTransactionData {
            recipient: Some(dbg_addr(0xa)),
            input_coins: Some(input_coins),
            gas_payment: Some(gas_payment.clone()),
            gas_budget: Some(2000),
            gas_price: Some(800),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(tx.gas_data.payment, Some(gas_payment));
    assert_eq!(tx.gas_data.budget, Some(2000));
    assert_eq!(tx.gas_data.price, Some(800));
}

#[test]
fn test_convert_split_coin() {
    let coin_ref = random_object_ref();

    let tx = convert_to_builder(&signable(
        "splitCoin",
        SignableTransactionData {
            coin_object_id: Some(coin_ref),
            split_amounts: Some(vec![5, 15]),
            gas_budget: Some(1000),
            ..Default::default()
        },
    ))
    .unwrap();

    assert_eq!(
        tx.inputs,
        vec![
            CallArg::Object(ObjectArg::ImmOrOwnedObject(coin_ref)),
            CallArg::Pure(bcs::to_bytes(&5u64).unwrap()),
            CallArg::Pure(bcs::to_bytes(&15u64).unwrap()),
        ]
    );
    assert_eq!(
        tx.commands,
        vec![
            Command::SplitCoins(Input(0), vec![Input(1)]),
            Command::SplitCoins(Input(0), vec![Input(2)]),
        ]
    );
    assert_eq!(tx.gas_data.budget, Some(1000));
    assert_eq!(tx.gas_data.payment, None);
}

#[test]
fn test_convert_unsupported_kinds() {
    assert_eq!(
        convert_to_builder(&signable("moveCall", Default::default())),
        Err(BuilderError::UnsupportedLegacyKind {
            kind: LegacyTransactionKind::MoveCall
        })
    );
    for kind in ["publish", "pay", "transferSui"] {
        let result = convert_to_builder(&signable(kind, Default::default()));
        assert!(
            matches!(result, Err(BuilderError::UnsupportedLegacyKind { .. })),
            "kind {kind} should be unsupported"
        );
    }
}

#[test]
fn test_convert_unknown_kind() {
    assert_eq!(
        convert_to_builder(&signable("sometotallyunknownkind", Default::default())),
        Err(BuilderError::UnknownLegacyKind {
            kind: "sometotallyunknownkind".to_string()
        })
    );
}

#[test]
fn test_legacy_json_wire_format() {
    let recipient_hex = "11".repeat(32);
    let coin_id_hex = "22".repeat(32);
    let digest_hex = "33".repeat(32);
    let json = format!(
        r#"{{
            "kind": "paySui",
            "data": {{
                "recipients": ["0x{recipient_hex}"],
                "amounts": [42],
                "inputCoins": [["0x{coin_id_hex}", 3, "0x{digest_hex}"]],
                "gasBudget": 5000
            }}
        }}"#
    );

    let signable: SignableTransaction = serde_json::from_str(&json).unwrap();
    let tx = convert_to_builder(&signable).unwrap();

    assert_eq!(
        tx.commands,
        vec![
            Command::SplitCoins(GasCoin, vec![Input(0)]),
            Command::TransferObjects(vec![Argument::Result(0)], Input(1)),
        ]
    );
    let coin = (
        ObjectID::from_hex_literal(&format!("0x{coin_id_hex}")).unwrap(),
        SequenceNumber::from(3),
        format!("0x{digest_hex}").parse::<ObjectDigest>().unwrap(),
    );
    assert_eq!(tx.gas_data.payment, Some(vec![coin]));
    assert_eq!(tx.gas_data.budget, Some(5000));
}
