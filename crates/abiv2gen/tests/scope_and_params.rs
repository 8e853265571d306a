use abiv2gen::synth::{synthesize_program, SynthOptions};

mod abi_description;

fn synth(bytes: &[u8]) -> String {
    synthesize_program(bytes, &SynthOptions::default()).expect("description must synthesize")
}

#[test]
fn state_assignments_are_buffered_into_function_scope() {
    let bytes = abi_description::description(
        vec![abi_description::var(abi_description::string())],
        vec![],
    );
    let program = synth(&bytes);

    // Declaration in contract scope, without a data-location qualifier.
    let decl_at = program.find("\n\tstring x_0;").expect("state declaration");
    let f_at = program.find("function f()").expect("driver function");
    let assign_at = program.find("x_0 = \"").expect("buffered assignment");
    assert!(decl_at < f_at, "declaration must precede f()");
    assert!(assign_at > f_at, "assignment must be replayed inside f()");
    // Never inline in contract scope (inline defs are single-tab indented).
    assert!(!program.contains("\n\tx_0 = "));
    assert!(program.contains("\n\t\tx_0 = \""));
}

#[test]
fn state_initializers_replay_before_local_statements() {
    let bytes = abi_description::description(
        vec![abi_description::var(abi_description::integer(32, false))],
        vec![abi_description::var(abi_description::integer(32, false))],
    );
    let program = synth(&bytes);

    let state_assign = program.find("\n\t\tx_0 = ").expect("state assignment");
    let local_decl = program.find("\n\tuint32 x_1;").expect("local declaration");
    assert!(
        state_assign < local_decl,
        "buffered state initializers must come first in f()"
    );
}

#[test]
fn local_non_value_types_get_memory_qualifier() {
    let bytes = abi_description::description(
        vec![],
        vec![abi_description::var(abi_description::string())],
    );
    let program = synth(&bytes);
    assert!(program.contains("\n\tstring memory x_0;"));
    assert!(program.contains("g_public(string memory x_0)"));
    assert!(program.contains("g_external(string calldata x_0)"));
}

#[test]
fn parameter_lists_agree_on_names_and_order() {
    let bytes = abi_description::description(
        vec![abi_description::var(abi_description::integer(8, false))],
        vec![
            abi_description::var(abi_description::string()),
            abi_description::var(abi_description::bytes()),
        ],
    );
    let program = synth(&bytes);

    assert!(program.contains("g_public(uint8 x_0, string memory x_1, bytes memory x_2)"));
    assert!(program.contains("g_external(uint8 x_0, string calldata x_1, bytes calldata x_2)"));
    assert!(program.contains("this.g_public(x_0, x_1, x_2);"));
    assert!(program.contains("this.g_external(x_0, x_1, x_2));"));
}

#[test]
fn check_codes_are_positional_and_monotonic() {
    let bytes = abi_description::description(
        vec![abi_description::var(abi_description::integer(8, false))],
        vec![
            abi_description::var(abi_description::fixed_bytes(4)),
            abi_description::var(abi_description::string()),
        ],
    );
    let program = synth(&bytes);

    let first = program.find(") return 1;").expect("check 1");
    let second = program.find(") return 2;").expect("check 2");
    let third = program.find(") return 3;").expect("check 3");
    assert!(first < second && second < third);
    assert!(!program.contains(") return 4;"));
}

#[test]
fn byte_array_checks_use_content_equality_helpers() {
    let bytes = abi_description::description(
        vec![],
        vec![
            abi_description::var(abi_description::string()),
            abi_description::var(abi_description::bytes()),
        ],
    );
    let program = synth(&bytes);
    assert!(program.contains("if (!stringCompare(x_0, \""));
    assert!(program.contains("if (!bytesCompare(x_1, \""));
}

// sha256("3") = 4e07408562bedb8b60ce05c1decfe3ad16b72230967de01f640b7e4729b49fce.
#[test]
fn string_leaf_at_position_three_scenario() {
    let bytes = abi_description::description(
        vec![],
        vec![
            abi_description::var(abi_description::integer(8, false)),
            abi_description::var(abi_description::integer(8, false)),
            abi_description::var(abi_description::integer(8, false)),
            abi_description::var(abi_description::string()),
        ],
    );
    let program = synth(&bytes);
    assert!(program.contains(
        "if (!stringCompare(x_3, \
         \"4e07408562bedb8b60ce05c1decfe3ad16b72230967de01f640b7e4729b49fce\")) return 4;"
    ));
}

#[test]
fn zero_dimension_array_contributes_nothing() {
    let with_array = synth(&abi_description::description(
        vec![abi_description::var(abi_description::array(
            Some(abi_description::integer(8, false)),
            vec![],
        ))],
        vec![abi_description::var(abi_description::integer(8, false))],
    ));
    let without = synth(&abi_description::description(
        vec![abi_description::unset_var()],
        vec![abi_description::var(abi_description::integer(8, false))],
    ));
    // Same program: no declaration, no check, no counter advance.
    assert_eq!(with_array, without);
    assert!(with_array.contains("\n\tuint8 x_0;"));
}

#[test]
fn struct_and_unset_nodes_are_benign_no_ops() {
    let bytes = abi_description::description(
        vec![
            abi_description::var(abi_description::struct_ty()),
            abi_description::unset_var(),
            abi_description::var(abi_description::integer(16, false)),
        ],
        vec![abi_description::var(abi_description::array(
            None,
            vec![abi_description::dim(true, 7)],
        ))],
    );
    let program = synth(&bytes);
    // Only the uint16 is emitted, and it is position 0.
    assert!(program.contains("\n\tuint16 x_0;"));
    assert!(!program.contains("x_1"));
    assert!(program.contains("this.g_public(x_0);"));
}

#[test]
fn dimensioned_array_with_base_is_recognized_but_not_lowered() {
    let bytes = abi_description::description(
        vec![abi_description::var(abi_description::array(
            Some(abi_description::integer(8, false)),
            vec![abi_description::dim(true, 2), abi_description::dim(false, 0)],
        ))],
        vec![abi_description::var(abi_description::integer(8, false))],
    );
    let program = synth(&bytes);
    // The array currently emits nothing; the scalar that follows is x_0.
    assert!(program.contains("\n\tuint8 x_0;"));
    assert!(!program.contains("uint8["));
}
