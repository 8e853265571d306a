//! JSON decoding of the serialized variable description.
//!
//! The wire shape is a single object:
//!
//! ```json
//! {
//!   "schema_version": "abiv2gen.description@0.1.0",
//!   "state_vars": [ { "type": { "kind": "integer", "width": 8 } }, null ],
//!   "local_vars": [ { "type": { "kind": "string" } } ]
//! }
//! ```
//!
//! Type objects are tagged by `kind`: `integer`, `fixed_bytes`, `address`,
//! `bytes`, `string`, `array`, `struct`. A `null` entry, or an entry whose
//! `type` is absent or `null`, decodes to an unset `VarDecl` (a traversal
//! no-op). Structural violations are decode errors carrying a JSON-pointer
//! path; width violations are left to synthesis, which reports them as
//! precondition failures.

use std::fmt::Display;

use serde_json::{Map, Value};

use abiv2gen_contracts::ABIV2_DESCRIPTION_SCHEMA_VERSION;

use crate::ast::{
    AddressType, ArrayBase, ArrayDimension, ArrayType, ByteArrayKind, DynamicBytesType,
    FixedBytesType, IntegerType, NonValueType, ProgramDescription, StructType, TypeNode, ValueType,
    VarDecl,
};

#[derive(Debug, Clone)]
pub struct DescriptionError {
    pub message: String,
    pub ptr: String,
}

impl DescriptionError {
    fn new(ptr: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ptr: ptr.to_string(),
        }
    }
}

impl std::error::Error for DescriptionError {}

impl Display for DescriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.ptr)
    }
}

pub fn description_from_json(bytes: &[u8]) -> Result<ProgramDescription, DescriptionError> {
    let v: Value = serde_json::from_slice(bytes)
        .map_err(|e| DescriptionError::new("/", format!("description is not valid JSON: {e}")))?;
    let obj = v
        .as_object()
        .ok_or_else(|| DescriptionError::new("/", "description must be a JSON object"))?;

    let schema = obj
        .get("schema_version")
        .and_then(Value::as_str)
        .ok_or_else(|| DescriptionError::new("/schema_version", "missing schema_version"))?;
    if schema != ABIV2_DESCRIPTION_SCHEMA_VERSION {
        return Err(DescriptionError::new(
            "/schema_version",
            format!(
                "unsupported schema_version {schema:?} (expected {ABIV2_DESCRIPTION_SCHEMA_VERSION:?})"
            ),
        ));
    }

    Ok(ProgramDescription {
        state_vars: var_group(obj.get("state_vars"), "/state_vars")?,
        local_vars: var_group(obj.get("local_vars"), "/local_vars")?,
    })
}

fn var_group(v: Option<&Value>, ptr: &str) -> Result<Vec<VarDecl>, DescriptionError> {
    let Some(v) = v else {
        return Ok(Vec::new());
    };
    let items = v
        .as_array()
        .ok_or_else(|| DescriptionError::new(ptr, "variable group must be an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| var_decl(item, &format!("{ptr}/{i}")))
        .collect()
}

fn var_decl(v: &Value, ptr: &str) -> Result<VarDecl, DescriptionError> {
    match v {
        Value::Null => Ok(VarDecl::default()),
        Value::Object(obj) => match obj.get("type") {
            None | Some(Value::Null) => Ok(VarDecl::default()),
            Some(t) => Ok(VarDecl {
                ty: Some(type_node(t, &format!("{ptr}/type"))?),
            }),
        },
        _ => Err(DescriptionError::new(
            ptr,
            "variable declaration must be an object or null",
        )),
    }
}

fn type_node(v: &Value, ptr: &str) -> Result<TypeNode, DescriptionError> {
    let obj = tagged_object(v, ptr)?;
    let kind = type_kind(obj, ptr)?;
    let node = match kind {
        "integer" => TypeNode::Value(ValueType::Integer(integer_type(obj, ptr)?)),
        "fixed_bytes" => TypeNode::Value(ValueType::FixedBytes(fixed_bytes_type(obj, ptr)?)),
        "address" => TypeNode::Value(ValueType::Address(address_type(obj, ptr)?)),
        "bytes" => TypeNode::NonValue(NonValueType::DynamicBytes(DynamicBytesType {
            kind: ByteArrayKind::Bytes,
        })),
        "string" => TypeNode::NonValue(NonValueType::DynamicBytes(DynamicBytesType {
            kind: ByteArrayKind::String,
        })),
        "array" => TypeNode::NonValue(NonValueType::Array(array_type(obj, ptr)?)),
        "struct" => TypeNode::NonValue(NonValueType::Struct(StructType {
            fields: var_group(obj.get("fields"), &format!("{ptr}/fields"))?,
        })),
        other => {
            return Err(DescriptionError::new(
                ptr,
                format!("unknown type kind {other:?}"),
            ))
        }
    };
    Ok(node)
}

fn array_type(obj: &Map<String, Value>, ptr: &str) -> Result<ArrayType, DescriptionError> {
    let base = match obj.get("base") {
        None | Some(Value::Null) => None,
        Some(b) => Some(array_base(b, &format!("{ptr}/base"))?),
    };
    let dims = match obj.get("dims") {
        None | Some(Value::Null) => Vec::new(),
        Some(d) => {
            let items = d
                .as_array()
                .ok_or_else(|| DescriptionError::new(ptr, "\"dims\" must be an array"))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| array_dimension(item, &format!("{ptr}/dims/{i}")))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(ArrayType { base, dims })
}

fn array_base(v: &Value, ptr: &str) -> Result<ArrayBase, DescriptionError> {
    let obj = tagged_object(v, ptr)?;
    let kind = type_kind(obj, ptr)?;
    match kind {
        "integer" => Ok(ArrayBase::Integer(integer_type(obj, ptr)?)),
        "fixed_bytes" => Ok(ArrayBase::FixedBytes(fixed_bytes_type(obj, ptr)?)),
        "address" => Ok(ArrayBase::Address(address_type(obj, ptr)?)),
        "struct" => Ok(ArrayBase::Struct),
        other => Err(DescriptionError::new(
            ptr,
            format!("invalid array base kind {other:?}"),
        )),
    }
}

fn array_dimension(v: &Value, ptr: &str) -> Result<ArrayDimension, DescriptionError> {
    let obj = tagged_object(v, ptr)?;
    Ok(ArrayDimension {
        is_static: bool_field_or(obj, "is_static", false, ptr)?,
        raw_length: u32_field_or(obj, "length", 0, ptr)?,
    })
}

fn integer_type(obj: &Map<String, Value>, ptr: &str) -> Result<IntegerType, DescriptionError> {
    Ok(IntegerType {
        width: u32_field(obj, "width", ptr)?,
        signed: bool_field_or(obj, "signed", false, ptr)?,
    })
}

fn fixed_bytes_type(
    obj: &Map<String, Value>,
    ptr: &str,
) -> Result<FixedBytesType, DescriptionError> {
    Ok(FixedBytesType {
        width: u32_field(obj, "width", ptr)?,
    })
}

fn address_type(obj: &Map<String, Value>, ptr: &str) -> Result<AddressType, DescriptionError> {
    Ok(AddressType {
        payable: bool_field_or(obj, "payable", false, ptr)?,
    })
}

fn tagged_object<'a>(v: &'a Value, ptr: &str) -> Result<&'a Map<String, Value>, DescriptionError> {
    v.as_object()
        .ok_or_else(|| DescriptionError::new(ptr, "expected a JSON object"))
}

fn type_kind<'a>(obj: &'a Map<String, Value>, ptr: &str) -> Result<&'a str, DescriptionError> {
    obj.get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| DescriptionError::new(ptr, "missing \"kind\" tag"))
}

fn u32_field(obj: &Map<String, Value>, name: &str, ptr: &str) -> Result<u32, DescriptionError> {
    let v = obj
        .get(name)
        .ok_or_else(|| DescriptionError::new(ptr, format!("missing \"{name}\"")))?;
    u32_value(v, name, ptr)
}

fn u32_field_or(
    obj: &Map<String, Value>,
    name: &str,
    default: u32,
    ptr: &str,
) -> Result<u32, DescriptionError> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => u32_value(v, name, ptr),
    }
}

fn u32_value(v: &Value, name: &str, ptr: &str) -> Result<u32, DescriptionError> {
    let n = v.as_u64().ok_or_else(|| {
        DescriptionError::new(ptr, format!("\"{name}\" must be an unsigned integer"))
    })?;
    u32::try_from(n)
        .map_err(|_| DescriptionError::new(ptr, format!("\"{name}\" out of u32 range: {n}")))
}

fn bool_field_or(
    obj: &Map<String, Value>,
    name: &str,
    default: bool,
    ptr: &str,
) -> Result<bool, DescriptionError> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(DescriptionError::new(
            ptr,
            format!("\"{name}\" must be a boolean"),
        )),
    }
}
