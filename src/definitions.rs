/// Stack capacity of the operator list used by the tokenizer.
pub const N_OPS_ON_STACK: usize = 16;
/// Stack capacity for collecting variable names of an expression.
pub const N_VARS_ON_STACK: usize = 16;
/// Stack capacity for tokens of a typical formula.
pub const N_TOKENS_ON_STACK: usize = 32;
/// Initial capacity of a symbol table that is created for parsing.
pub const MIN_TABLE_LENGTH: usize = 211;
