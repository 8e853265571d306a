//! The decoded variable description: a closed, variant-tagged type tree.
//!
//! Every level is an exhaustive sum type so that adding a variant forces every
//! visitor to handle it. "Unset" slots (a `VarDecl` without a type, an array
//! without a base type) are modeled as `Option` and are benign no-ops during
//! traversal, never errors.

/// Representation of a dynamically sized byte array.
///
/// Both kinds share the same synthesized literal text; only the declared type
/// and the equality-check helper differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteArrayKind {
    Bytes,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerType {
    /// Width in bits. Must be a multiple of 8 in `8..=256`.
    pub width: u32,
    pub signed: bool,
}

impl IntegerType {
    pub fn solidity_type(&self) -> String {
        if self.signed {
            format!("int{}", self.width)
        } else {
            format!("uint{}", self.width)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBytesType {
    /// Width in bytes. Must be in `1..=32`.
    pub width: u32,
}

impl FixedBytesType {
    pub fn solidity_type(&self) -> String {
        format!("bytes{}", self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressType {
    pub payable: bool,
}

impl AddressType {
    pub fn solidity_type(&self) -> &'static str {
        if self.payable {
            "address payable"
        } else {
            "address"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicBytesType {
    pub kind: ByteArrayKind,
}

impl DynamicBytesType {
    pub fn solidity_type(&self) -> &'static str {
        match self.kind {
            ByteArrayKind::Bytes => "bytes",
            ByteArrayKind::String => "string",
        }
    }
}

/// One array dimension as produced by the fuzz generator. The raw length is
/// mapped to a small concrete length at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDimension {
    pub is_static: bool,
    pub raw_length: u32,
}

/// Element type of an array. Structs are recognized but not lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayBase {
    Integer(IntegerType),
    FixedBytes(FixedBytesType),
    Address(AddressType),
    Struct,
}

impl ArrayBase {
    /// Base element type string, or `None` for structs, whose lowering is out
    /// of scope.
    pub fn solidity_type(&self) -> Option<String> {
        match self {
            ArrayBase::Integer(t) => Some(t.solidity_type()),
            ArrayBase::FixedBytes(t) => Some(t.solidity_type()),
            ArrayBase::Address(t) => Some(t.solidity_type().to_string()),
            ArrayBase::Struct => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayType {
    /// `None` mirrors an unset base-type tag and is a traversal no-op.
    pub base: Option<ArrayBase>,
    /// Outermost dimension first. Empty is a traversal no-op.
    pub dims: Vec<ArrayDimension>,
}

/// Recognized for forward compatibility with the description format; value
/// lowering for structs is an explicit non-goal and the node is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType {
    pub fields: Vec<VarDecl>,
}

/// Fixed-width types compared by raw equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer(IntegerType),
    FixedBytes(FixedBytesType),
    Address(AddressType),
}

/// Variable-length or compound types requiring a content-equality helper and
/// a data-location qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonValueType {
    DynamicBytes(DynamicBytesType),
    Array(ArrayType),
    Struct(StructType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Value(ValueType),
    NonValue(NonValueType),
}

/// One declared variable. `ty: None` mirrors an unset oneof tag in the wire
/// description and contributes nothing to the synthesized program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VarDecl {
    pub ty: Option<TypeNode>,
}

/// The full input to one synthesis run: the contract's state variables and the
/// test routine's local variables, in declaration order. Order is significant;
/// it determines variable names and parameter-list positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramDescription {
    pub state_vars: Vec<VarDecl>,
    pub local_vars: Vec<VarDecl>,
}
