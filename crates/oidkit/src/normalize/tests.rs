use crate::{
    Component, Error, HexError, ObjectId, ObjectIdLike, ResolveError, normalize, normalize_opt,
};
use serde_json::{Value, json};

fn resolve(value: &Value) -> Result<String, ResolveError> {
    ObjectIdLike::from_value(value)
        .resolve()
        .map(|s| s.into_owned())
}

#[test]
fn strings_pass_through_unchanged() {
    for s in [
        "",
        "507f1f77bcf86cd799439011",
        "507F1F77BCF86CD799439011",
        "  padded  ",
        "not-hex-at-all",
        "ü",
    ] {
        assert_eq!(normalize(&json!(s)), s);
    }
}

#[test]
fn absent_values_are_empty() {
    assert_eq!(normalize(&Value::Null), "");
    assert_eq!(normalize_opt(None), "");
    assert_eq!(normalize_opt(Some(&json!(null))), "");
    assert_eq!(resolve(&json!("")), Err(ResolveError::Absent));
}

#[test]
fn other_shapes_are_empty() {
    assert_eq!(normalize(&json!(42)), "");
    assert_eq!(normalize(&json!(true)), "");
    assert_eq!(normalize(&json!(["507f1f77bcf86cd799439011"])), "");
    assert_eq!(resolve(&json!(1.5)), Err(ResolveError::Unsupported));
}

#[test]
fn extended_json_wrapper() {
    assert_eq!(
        normalize(&json!({ "$oid": "507f1f77bcf86cd799439011" })),
        "507f1f77bcf86cd799439011"
    );
}

#[test]
fn wrapped_keys_follow_lookup_order() {
    assert_eq!(normalize(&json!({ "oid": "x", "id": "y" })), "x");
    assert_eq!(normalize(&json!({ "value": "v", "hex": "h" })), "h");
    assert_eq!(normalize(&json!({ "value": "v", "hexString": "hs", "hex": "h" })), "hs");
    assert_eq!(normalize(&json!({ "id": "i", "$oid": "o" })), "o");
}

#[test]
fn wrapped_string_wins_over_fields() {
    let value = json!({
        "id": "from-wrapper",
        "timestamp": 1,
        "machineIdentifier": 2,
        "processIdentifier": 3,
        "counter": 4
    });
    assert_eq!(normalize(&value), "from-wrapper");
}

#[test]
fn non_string_wrappers_fall_through_to_fields() {
    let value = json!({
        "id": 99,
        "timestamp": 1,
        "machineIdentifier": 2,
        "processIdentifier": 3,
        "counter": 4
    });
    assert_eq!(normalize(&value), "000000010000020003000004");
}

#[test]
fn accessor_is_used_for_typed_ids() {
    let id = ObjectId::from(0x507f_1f77, 0xbc_f86c, 0xd799, 0x43_9011);
    let like = ObjectIdLike::from(&id);
    assert_eq!(like.normalize(), "507f1f77bcf86cd799439011");
    assert_eq!(like.to_object_id(), Ok(id));
}

#[test]
fn reconstructs_from_fields() {
    let value = json!({
        "timestamp": 1,
        "machineIdentifier": 2,
        "processIdentifier": 3,
        "counter": 4
    });
    assert_eq!(normalize(&value), format!("{}{}{}{}", "00000001", "000002", "0003", "000004"));
}

#[test]
fn reconstructs_from_alternate_names() {
    let value = json!({
        "time": "not-a-number",
        "timeSecond": 5,
        "machineIdentifier": 0,
        "processIdentifier": 0,
        "counter": 0
    });
    assert_eq!(normalize(&value), "000000050000000000000000");

    let value = json!({ "date": "1970-01-01T00:00:10Z", "machine": "1", "process": 2, "inc": "3" });
    assert_eq!(normalize(&value), "0000000a0000010002000003");

    let value = json!({ "time": 16, "machineId": 255, "processId": 256, "increment": 4096 });
    assert_eq!(normalize(&value), "000000100000ff0100001000");
}

#[test]
fn reconstructs_driver_dump_of_known_id() {
    // Field dump of 507f1f77bcf86cd799439011 as a driver without a custom
    // serializer emits it.
    let value = json!({
        "timestamp": 1_350_508_407,
        "date": "2012-10-17T21:13:27.000+00:00",
        "machineIdentifier": 12_384_364,
        "processIdentifier": -10_343,
        "counter": 4_427_793
    });
    assert_eq!(normalize(&value), "507f1f77bcf86cd799439011");
}

#[test]
fn missing_component_is_empty() {
    let value = json!({ "machineIdentifier": 1, "processIdentifier": 1, "counter": 1 });
    assert_eq!(normalize(&value), "");
    assert_eq!(
        resolve(&value),
        Err(ResolveError::MissingComponent(Component::Timestamp))
    );
}

#[test]
fn reports_first_unresolved_component() {
    let value = json!({ "timestamp": 1, "machineIdentifier": "abc", "processIdentifier": 1 });
    assert_eq!(
        resolve(&value),
        Err(ResolveError::MissingComponent(Component::MachineIdentifier))
    );

    let value = json!({ "timestamp": 1, "machineIdentifier": 1, "processIdentifier": 1 });
    assert_eq!(
        resolve(&value),
        Err(ResolveError::MissingComponent(Component::Counter))
    );

    let value = json!({ "timestamp": 1, "machineIdentifier": 1, "process": null, "counter": 1 });
    assert_eq!(
        resolve(&value),
        Err(ResolveError::MissingComponent(Component::ProcessIdentifier))
    );
}

#[test]
fn empty_object_is_empty() {
    assert_eq!(normalize(&json!({})), "");
}

#[test]
fn components_are_masked_to_bit_width() {
    let value = json!({
        "timestamp": 0x1_0000_0000u64 + 5,
        "machineIdentifier": 0,
        "processIdentifier": 0,
        "counter": 0
    });
    assert_eq!(&normalize(&value)[0..8], "00000005");

    let value = json!({
        "timestamp": 0,
        "machineIdentifier": 0x0100_0001,
        "processIdentifier": 0x1_0002,
        "counter": 0x0100_0003
    });
    assert_eq!(normalize(&value), "000000000000010002000003");
}

#[test]
fn negative_components_keep_low_bits() {
    let value = json!({ "timestamp": -1, "machineIdentifier": -1, "processIdentifier": -1, "counter": -1 });
    assert_eq!(normalize(&value), "ffffffffffffffffffffffff");
}

#[test]
fn reconstructed_output_round_trips() {
    let cases = [
        (0u64, 0u64, 0u64, 0u64),
        (1, 2, 3, 4),
        (0xffff_ffff, 0xff_ffff, 0xffff, 0xff_ffff),
        (1_700_000_000, 0x00_abcd, 0x0f0f, 0x10_0000),
    ];
    for (t, m, p, c) in cases {
        let value = json!({
            "timestamp": t,
            "machineIdentifier": m,
            "processIdentifier": p,
            "counter": c
        });
        let out = normalize(&value);
        assert_eq!(out.len(), 24);
        assert!(out.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert_eq!(u64::from_str_radix(&out[0..8], 16).unwrap(), t);
        assert_eq!(u64::from_str_radix(&out[8..14], 16).unwrap(), m);
        assert_eq!(u64::from_str_radix(&out[14..18], 16).unwrap(), p);
        assert_eq!(u64::from_str_radix(&out[18..24], 16).unwrap(), c);
    }
}

#[test]
fn strict_decoding_reports_bad_hex() {
    let value = json!({ "$oid": "xyz" });
    assert_eq!(
        ObjectIdLike::from_value(&value).to_object_id(),
        Err(Error::HexError(HexError::InvalidLength { len: 3 }))
    );
    assert_eq!(
        ObjectIdLike::from_value(&Value::Null).to_object_id(),
        Err(Error::ResolveError(ResolveError::Absent))
    );

    let value = json!({ "timestamp": 1, "machineIdentifier": 2, "processIdentifier": 3, "counter": 4 });
    assert_eq!(
        ObjectIdLike::from_value(&value).to_object_id(),
        Ok(ObjectId::from(1, 2, 3, 4))
    );
}
