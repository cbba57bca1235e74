//! Terms, literals, orderings and substitutions

pub mod interner;
pub mod literal;
pub mod literal_selection;
pub mod ordering;
pub mod substitution;
pub mod term;

#[cfg(test)]
mod ordering_proptest;

pub use interner::{ConstantId, FunctionId, Interner};
pub use literal::{Literal, Side};
pub use literal_selection::{
    LiteralSelectionStrategy, LiteralSelector, NoSelection, SelectAllNegative, SelectNegMaxWeight,
};
pub use ordering::{compare_literals, Comparison, Kbo, KboConfig, KboSettings, TermOrder};
pub use substitution::{
    unify_scoped, Renaming, ScopedSubstitution, ScopedTerm, ScopedVar, UnificationError,
};
pub use term::{Constant, FunctionSymbol, Term, TermPath, Variable};
