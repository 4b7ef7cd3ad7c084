// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_object_id_display_round_trip() {
    let id = ObjectID::random();
    let parsed: ObjectID = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_object_id_short_literal_is_padded() {
    let id = ObjectID::from_hex_literal("0x2").unwrap();
    let mut expected = [0u8; ObjectID::LENGTH];
    expected[ObjectID::LENGTH - 1] = 2;
    assert_eq!(id, ObjectID::new(expected));
}

#[test]
fn test_object_id_rejects_bad_literals() {
    assert!(ObjectID::from_hex_literal("").is_err());
    assert!(ObjectID::from_hex_literal("0x").is_err());
    assert!(ObjectID::from_hex_literal("0xzz").is_err());
    let too_long = format!("0x{}", "ab".repeat(ObjectID::LENGTH + 1));
    assert!(ObjectID::from_hex_literal(&too_long).is_err());
}

#[test]
fn test_address_json_is_hex_string() {
    let address = dbg_addr(0xcc);
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, format!("\"0x{}\"", "cc".repeat(SUI_ADDRESS_LENGTH)));

    let parsed: SuiAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, address);
}

#[test]
fn test_object_ref_bcs_round_trip() {
    let object_ref = random_object_ref();
    let bytes = bcs::to_bytes(&object_ref).unwrap();
    let parsed: ObjectRef = bcs::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, object_ref);
}

#[test]
fn test_identifier_validation() {
    assert!(Identifier::new("transfer").is_ok());
    assert!(Identifier::new("_private2").is_ok());
    assert!(Identifier::new("").is_err());
    assert!(Identifier::new("_").is_err());
    assert!(Identifier::new("2fast").is_err());
    assert!(Identifier::new("no-dashes").is_err());
}
