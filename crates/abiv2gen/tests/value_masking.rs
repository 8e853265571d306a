use abiv2gen::synth::{synthesize_program, SynthErrorKind, SynthOptions};
use abiv2gen::value;

mod abi_description;

fn parse_literal(literal: &str) -> u128 {
    let hex = literal.strip_prefix("0x").expect("0x-prefixed literal");
    u128::from_str_radix(hex, 16).expect("hex literal")
}

#[test]
fn unsigned_values_fit_their_width() {
    for width in [8u32, 16, 32, 64, 128] {
        for counter in 0..8 {
            let literal = value::uint_value(width, counter).expect("uint value");
            let parsed = parse_literal(&literal);
            if width < 128 {
                assert!(
                    parsed < 1u128 << width,
                    "uint{width} at {counter}: {literal} out of range"
                );
            }
            assert!(literal.len() - 2 <= (width / 4) as usize);
        }
    }
}

#[test]
fn signed_values_never_set_the_sign_bit() {
    for width in [8u32, 16, 32, 64, 128] {
        for counter in 0..8 {
            let literal = value::int_value(width, counter).expect("int value");
            let parsed = parse_literal(&literal);
            assert!(
                parsed < 1u128 << (width - 4),
                "int{width} at {counter}: {literal} out of range"
            );
        }
    }
}

#[test]
fn wide_values_keep_within_their_nibble_budget() {
    for counter in 0..8 {
        let literal = value::uint_value(256, counter).expect("uint256 value");
        assert!(literal.len() - 2 <= 64);
        let literal = value::int_value(256, counter).expect("int256 value");
        assert!(literal.len() - 2 <= 63);
    }
}

#[test]
fn fixed_bytes_budget_is_two_nibbles_per_byte() {
    for width in 1..=32u32 {
        let literal = value::fixed_bytes_value(width, 5).expect("fixed bytes value");
        assert!(literal.len() - 2 <= (width * 2) as usize);
    }
}

#[test]
fn fixed_bytes_boundary_widths() {
    value::fixed_bytes_value(1, 0).expect("bytes1 must synthesize");
    value::fixed_bytes_value(32, 0).expect("bytes32 must synthesize");
    value::fixed_bytes_value(0, 0).expect_err("bytes0 is out of contract");
    value::fixed_bytes_value(33, 0).expect_err("bytes33 is out of contract");
}

#[test]
fn address_values_reuse_the_160_bit_derivation() {
    let address = value::address_value(2).expect("address value");
    let uint160 = value::uint_value(160, 2).expect("uint160 value");
    assert_eq!(address, format!("address({uint160})"));
}

#[test]
fn bad_widths_fail_synthesis_as_preconditions() {
    let cases = [
        abi_description::integer(12, false),
        abi_description::integer(0, false),
        abi_description::integer(264, false),
        abi_description::fixed_bytes(0),
        abi_description::fixed_bytes(33),
    ];
    for ty in cases {
        let bytes = abi_description::description(vec![abi_description::var(ty.clone())], vec![]);
        let err = synthesize_program(&bytes, &SynthOptions::default())
            .expect_err("invalid width must be fatal");
        assert_eq!(err.kind, SynthErrorKind::Precondition, "type {ty}");
        assert!(
            err.message.contains("width"),
            "unexpected error message: {}",
            err.message
        );
    }
}

#[test]
fn extreme_valid_widths_synthesize() {
    let bytes = abi_description::description(
        vec![
            abi_description::var(abi_description::integer(8, true)),
            abi_description::var(abi_description::integer(256, false)),
            abi_description::var(abi_description::integer(256, true)),
        ],
        vec![],
    );
    synthesize_program(&bytes, &SynthOptions::default()).expect("extreme widths must synthesize");
}
