#![allow(dead_code)]

use serde_json::{json, Value};

use abiv2gen_contracts::ABIV2_DESCRIPTION_SCHEMA_VERSION;

pub fn description(state_vars: Vec<Value>, local_vars: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "schema_version": ABIV2_DESCRIPTION_SCHEMA_VERSION,
        "state_vars": state_vars,
        "local_vars": local_vars,
    }))
    .expect("encode description JSON")
}

pub fn var(ty: Value) -> Value {
    json!({ "type": ty })
}

pub fn unset_var() -> Value {
    json!({})
}

pub fn integer(width: u32, signed: bool) -> Value {
    json!({ "kind": "integer", "width": width, "signed": signed })
}

pub fn fixed_bytes(width: u32) -> Value {
    json!({ "kind": "fixed_bytes", "width": width })
}

pub fn address(payable: bool) -> Value {
    json!({ "kind": "address", "payable": payable })
}

pub fn bytes() -> Value {
    json!({ "kind": "bytes" })
}

pub fn string() -> Value {
    json!({ "kind": "string" })
}

pub fn array(base: Option<Value>, dims: Vec<Value>) -> Value {
    json!({
        "kind": "array",
        "base": base.unwrap_or(Value::Null),
        "dims": dims,
    })
}

pub fn dim(is_static: bool, length: u32) -> Value {
    json!({ "is_static": is_static, "length": length })
}

pub fn struct_ty() -> Value {
    json!({ "kind": "struct" })
}
