pub mod ast;
pub mod description;
pub mod synth;
pub mod validate;
pub mod value;

mod sol_emit;
