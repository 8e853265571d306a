//! Solidity emission: the type-tree visitor, the parallel emission buffers,
//! and the program assembler.
//!
//! One `Emitter` owns the whole generation state for a single synthesis run:
//! the monotonic position counter, the state/local scope flag, the next
//! diagnostic return code, and the append-only text buffers (program text,
//! buffered state-variable initializers, equality checks, and the two typed
//! parameter lists). The emitter is created fresh per run and discarded
//! afterwards; nothing is shared across runs.

use crate::ast::{
    ArrayDimension, ArrayType, ByteArrayKind, DynamicBytesType, NonValueType, ProgramDescription,
    StructType, TypeNode, ValueType, VarDecl,
};
use crate::synth::{SynthError, SynthErrorKind, SynthOptions};
use crate::value;

const MAX_ARRAY_LENGTH: u32 = 3;
const MAX_ARRAY_DIMENSIONS: usize = 4;

/// Comparison class of an emitted variable: scalar (`!=`) or one of the two
/// content-equality helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataKind {
    Bytes,
    String,
    Value,
}

impl DataKind {
    fn is_value_type(self) -> bool {
        self == DataKind::Value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalleeKind {
    Public,
    External,
}

const PROGRAM_PREAMBLE: &str = "pragma solidity >=0.0;
pragma experimental ABIEncoderV2;

contract Factory {
\tfunction test() external returns (uint) {
\t\tC c = new C();
\t\treturn c.f();
\t}
}

contract C {
";

const STRING_COMPARE_HELPER: &str = "
\tfunction stringCompare(string memory a, string memory b) internal pure returns (bool) {
\t\tif(bytes(a).length != bytes(b).length)
\t\t\treturn false;
\t\telse
\t\t\treturn keccak256(bytes(a)) == keccak256(bytes(b));
\t}
";

const BYTES_COMPARE_HELPER: &str = "
\tfunction bytesCompare(bytes memory a, bytes memory b) internal pure returns (bool) {
\t\tif(a.length != b.length)
\t\t\treturn false;
\t\tfor (uint i = 0; i < a.length; i++)
\t\t\tif (a[i] != b[i])
\t\t\t\treturn false;
\t\treturn true;
\t}
";

struct Emitter<'a> {
    description: &'a ProgramDescription,
    external_call_offset: u32,
    // Program text, appended in final order.
    out: String,
    // Storage scope cannot carry inline initializers, so state-variable
    // assignments are buffered here and replayed at the top of f().
    state_buffer: String,
    checks: String,
    params_public: String,
    params_external: String,
    counter: u32,
    return_value: u32,
    in_state_scope: bool,
}

impl<'a> Emitter<'a> {
    fn new(description: &'a ProgramDescription, options: &SynthOptions) -> Self {
        Self {
            description,
            external_call_offset: options.external_call_offset,
            out: String::new(),
            state_buffer: String::new(),
            checks: String::new(),
            params_public: String::new(),
            params_external: String::new(),
            counter: 0,
            return_value: 1,
            in_state_scope: true,
        }
    }

    fn err(&self, kind: SynthErrorKind, message: String) -> SynthError {
        SynthError::new(kind, format!("{message} (var position {})", self.counter))
    }

    fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn new_var_name(&self) -> String {
        format!("x_{}", self.counter)
    }

    /// Data-location qualifier for a declaration: non-value types held in
    /// function scope live in memory; value types and storage-scope
    /// declarations carry no qualifier.
    fn qualifier(&self, data_kind: DataKind) -> &'static str {
        if data_kind.is_value_type() || self.in_state_scope {
            ""
        } else {
            "memory"
        }
    }

    fn append_var_decl(&mut self, type_string: &str, var_name: &str, qualifier: &str) {
        if qualifier.is_empty() {
            self.push_str(&format!("\n\t{type_string} {var_name};"));
        } else {
            self.push_str(&format!("\n\t{type_string} {qualifier} {var_name};"));
        }
    }

    fn buffer_var_def(&mut self, var_name: &str, rhs: &str) {
        self.state_buffer.push_str(&format!("\n\t\t{var_name} = {rhs};"));
    }

    fn append_var_def(&mut self, var_name: &str, rhs: &str) {
        self.push_str(&format!("\n\t{var_name} = {rhs};"));
    }

    fn append_checks(&mut self, data_kind: DataKind, var_name: &str, rhs: &str) {
        let predicate = match data_kind {
            DataKind::String => format!("!stringCompare({var_name}, {rhs})"),
            DataKind::Bytes => format!("!bytesCompare({var_name}, {rhs})"),
            DataKind::Value => format!("{var_name} != {rhs}"),
        };
        let return_value = self.return_value;
        self.return_value += 1;
        self.checks
            .push_str(&format!("\n\t\tif ({predicate}) return {return_value};"));
    }

    fn add_checked_var_def(&mut self, data_kind: DataKind, var_name: &str, rhs: &str) {
        if self.in_state_scope {
            self.buffer_var_def(var_name, rhs);
        } else {
            self.append_var_def(var_name, rhs);
        }
        self.append_checks(data_kind, var_name, rhs);
    }

    /// Appends `<delimiter><type>[ <qualifier>] <name>` to the parameter list
    /// of the selected calling convention. Both lists receive every variable in
    /// the same order; only the data-location qualifier differs.
    fn append_typed_params(
        &mut self,
        callee: CalleeKind,
        is_value_type: bool,
        type_string: &str,
        var_name: &str,
    ) {
        let qualified = if is_value_type {
            type_string.to_string()
        } else {
            match callee {
                CalleeKind::Public => format!("{type_string} memory"),
                CalleeKind::External => format!("{type_string} calldata"),
            }
        };
        let delimiter = if self.counter == 0 { "" } else { ", " };
        let buffer = match callee {
            CalleeKind::Public => &mut self.params_public,
            CalleeKind::External => &mut self.params_external,
        };
        buffer.push_str(&format!("{delimiter}{qualified} {var_name}"));
    }

    /// Shared emission path for every leaf: declaration, typed parameter-list
    /// entries for both conventions, checked definition, then counter advance.
    fn visit_leaf(&mut self, data_kind: DataKind, type_string: &str, rhs: &str) {
        let var_name = self.new_var_name();
        let qualifier = self.qualifier(data_kind);
        self.append_var_decl(type_string, &var_name, qualifier);
        self.append_typed_params(
            CalleeKind::Public,
            data_kind.is_value_type(),
            type_string,
            &var_name,
        );
        self.append_typed_params(
            CalleeKind::External,
            data_kind.is_value_type(),
            type_string,
            &var_name,
        );
        self.add_checked_var_def(data_kind, &var_name, rhs);
        self.counter += 1;
    }

    fn visit_value_type(&mut self, t: &ValueType) -> Result<(), SynthError> {
        let (type_string, rhs) = match t {
            ValueType::Integer(t) => (
                t.solidity_type(),
                value::integer_value(t.signed, t.width, self.counter)
                    .map_err(|m| self.err(SynthErrorKind::Precondition, m))?,
            ),
            ValueType::FixedBytes(t) => (
                t.solidity_type(),
                value::fixed_bytes_value(t.width, self.counter)
                    .map_err(|m| self.err(SynthErrorKind::Precondition, m))?,
            ),
            ValueType::Address(t) => (
                t.solidity_type().to_string(),
                value::address_value(self.counter)
                    .map_err(|m| self.err(SynthErrorKind::Precondition, m))?,
            ),
        };
        self.visit_leaf(DataKind::Value, &type_string, &rhs);
        Ok(())
    }

    fn visit_dynamic_bytes(&mut self, t: &DynamicBytesType) {
        let data_kind = match t.kind {
            ByteArrayKind::Bytes => DataKind::Bytes,
            ByteArrayKind::String => DataKind::String,
        };
        let rhs = value::bytes_value(self.counter);
        self.visit_leaf(data_kind, t.solidity_type(), &rhs);
    }

    /// Arrays are recognized down to their base type and dimensionality but not
    /// yet lowered to declarations and element assignments. An empty dimension
    /// list or a struct/unset base contributes nothing, by design.
    // TODO: lower array declarations, resize ops, and element assignments.
    fn visit_array(&mut self, t: &ArrayType) -> Result<(), SynthError> {
        if t.dims.is_empty() {
            return Ok(());
        }
        let base_type = match t.base.as_ref().and_then(|base| base.solidity_type()) {
            Some(s) => s,
            None => return Ok(()),
        };
        let dims = self.array_dimension_strings(t)?;
        let _ = (base_type, dims);
        Ok(())
    }

    /// Dimension suffixes, outermost first: `[<len>]` for static dimensions,
    /// `[]` for dynamic ones. Recognized dimensionality is capped.
    fn array_dimension_strings(&self, t: &ArrayType) -> Result<Vec<String>, SynthError> {
        if t.dims.is_empty() {
            return Err(self.err(
                SynthErrorKind::Precondition,
                "array dimensions empty".to_string(),
            ));
        }
        Ok(t.dims
            .iter()
            .take(MAX_ARRAY_DIMENSIONS)
            .map(|dim| self.array_dim_string(dim))
            .collect())
    }

    fn array_dim_string(&self, dim: &ArrayDimension) -> String {
        if dim.is_static {
            format!("[{}]", array_length_from_fuzz(dim.raw_length, self.counter))
        } else {
            "[]".to_string()
        }
    }

    // Struct lowering is an explicit non-goal; the node is recognized and
    // skipped so the description format can carry structs ahead of support.
    fn visit_struct(&mut self, _t: &StructType) {}

    fn visit_non_value_type(&mut self, t: &NonValueType) -> Result<(), SynthError> {
        match t {
            NonValueType::DynamicBytes(t) => {
                self.visit_dynamic_bytes(t);
                Ok(())
            }
            NonValueType::Array(t) => self.visit_array(t),
            NonValueType::Struct(t) => {
                self.visit_struct(t);
                Ok(())
            }
        }
    }

    fn visit_type_node(&mut self, t: &TypeNode) -> Result<(), SynthError> {
        match t {
            TypeNode::Value(t) => self.visit_value_type(t),
            TypeNode::NonValue(t) => self.visit_non_value_type(t),
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> Result<(), SynthError> {
        // An unset type tag is a structural no-op, not an error.
        match &decl.ty {
            Some(t) => self.visit_type_node(t),
            None => Ok(()),
        }
    }

    fn visit_group(&mut self, group: &[VarDecl]) -> Result<(), SynthError> {
        for decl in group {
            self.visit_var_decl(decl)?;
        }
        Ok(())
    }

    /// Comma-separated `x_0, .., x_{n-1}`, the argument list passed to both
    /// checker calls.
    fn parameter_names(&self) -> String {
        (0..self.counter)
            .map(|i| format!("x_{i}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn emit_test_function(&mut self) -> Result<(), SynthError> {
        self.push_str("\n\tfunction f() public returns (uint) {");

        // Replay buffered state-variable initializers before anything else.
        let state_defs = std::mem::take(&mut self.state_buffer);
        self.push_str(&state_defs);

        let description = self.description;
        self.visit_group(&description.local_vars)?;

        let names = self.parameter_names();
        let offset = self.external_call_offset;
        self.push_str(&format!(
            "\n\t\tuint returnVal = this.g_public({names});\
             \n\t\tif (returnVal != 0)\
             \n\t\t\treturn returnVal;\
             \n\t\treturn (uint({offset}) + this.g_external({names}));\
             \n\t}}\n"
        ));
        Ok(())
    }

    /// The two content-equality helpers and the two checker functions, one per
    /// calling convention. Each checker falls through to `return 0`.
    fn emit_helper_functions(&mut self) {
        self.push_str(STRING_COMPARE_HELPER);
        self.push_str(BYTES_COMPARE_HELPER);

        let checks = self.checks.clone();
        let params_public = self.params_public.clone();
        let params_external = self.params_external.clone();
        self.push_str(&format!(
            "\n\tfunction g_public({params_public}) public view returns (uint) {{{checks}\
             \n\t\treturn 0;\
             \n\t}}\n\
             \n\tfunction g_external({params_external}) external view returns (uint) {{{checks}\
             \n\t\treturn 0;\
             \n\t}}\n"
        ));
    }

    fn emit_program(&mut self) -> Result<(), SynthError> {
        self.push_str(PROGRAM_PREAMBLE);
        let description = self.description;
        self.visit_group(&description.state_vars)?;
        // One-way switch: everything after this point is function scope.
        self.in_state_scope = false;
        self.emit_test_function()?;
        self.emit_helper_functions();
        self.push_str("}\n");
        Ok(())
    }
}

fn array_length_from_fuzz(fuzz: u32, counter: u32) -> u32 {
    fuzz.wrapping_add(counter) % MAX_ARRAY_LENGTH + 1
}

pub(crate) fn synthesize(
    description: &ProgramDescription,
    options: &SynthOptions,
) -> Result<String, SynthError> {
    let mut emitter = Emitter::new(description, options);
    emitter.emit_program()?;
    Ok(emitter.out)
}
