//! Centralized limits and thresholds for the inference engine.

/// Maximum number of constituents kept in a union or additive type.
///
/// Construction sorts constituents by hash code and keeps the first eight, so
/// the survivors are the ones with the smallest hash codes. Downstream results
/// rely on that exact policy.
pub const MAX_COMPOUND_CONSTITUENTS: usize = 8;

/// Default number of symbol entries one evaluation may make before the rest
/// of the reference graph yields no information. Chain length alone never
/// reaches it, since each symbol is evaluated at most once per query unless
/// a cycle runs through it.
pub const DEFAULT_EVALUATION_BUDGET: u32 = 1_000_000;

/// Maximum syntactic nesting the parser descends into before it stops
/// recursing and reports a diagnostic. Also bounds the depth of every
/// syntax-directed walk in the engine.
pub const MAX_PARSER_NESTING_DEPTH: u32 = 256;

/// Default extensions of files the engine tracks.
pub const DEFAULT_SCRIPT_EXTENSIONS: &[&str] = &[".js"];
