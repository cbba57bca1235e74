//! Literal selection functions
//!
//! A selection function marks negative literals that inferences must use
//! instead of the maximal ones. Selecting nothing leaves eligibility to the
//! ordering alone.

use crate::clause::LiteralSet;
use crate::error::SaturnError;
use crate::logic::literal::Literal;
use crate::logic::ordering::{compare_literals, Comparison, TermOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait LiteralSelector: fmt::Debug {
    /// Indices of the selected literals. Only negative literals may be
    /// selected.
    fn select(&self, literals: &[Literal], order: &dyn TermOrder) -> LiteralSet;

    fn name(&self) -> &str;
}

/// Select nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl LiteralSelector for NoSelection {
    fn select(&self, _literals: &[Literal], _order: &dyn TermOrder) -> LiteralSet {
        LiteralSet::empty()
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Select the heaviest negative literal, preferring one not dominated by
/// another negative literal. Ties go to the leftmost.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectNegMaxWeight;

impl LiteralSelector for SelectNegMaxWeight {
    fn select(&self, literals: &[Literal], order: &dyn TermOrder) -> LiteralSet {
        let negatives: Vec<usize> = (0..literals.len())
            .filter(|&i| literals[i].is_negative())
            .collect();
        let undominated = negatives.iter().copied().filter(|&i| {
            !negatives.iter().any(|&j| {
                j != i && compare_literals(order, &literals[j], &literals[i]) == Comparison::Gt
            })
        });
        let mut best: Option<usize> = None;
        for i in undominated {
            match best {
                Some(b) if literals[b].weight() >= literals[i].weight() => {}
                _ => best = Some(i),
            }
        }
        best.into_iter().collect()
    }

    fn name(&self) -> &str {
        "neg_max_weight"
    }
}

/// Select every negative literal
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAllNegative;

impl LiteralSelector for SelectAllNegative {
    fn select(&self, literals: &[Literal], _order: &dyn TermOrder) -> LiteralSet {
        (0..literals.len())
            .filter(|&i| literals[i].is_negative())
            .collect()
    }

    fn name(&self) -> &str {
        "all_negative"
    }
}

/// Named selection strategies for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralSelectionStrategy {
    #[default]
    None,
    NegMaxWeight,
    AllNegative,
}

impl LiteralSelectionStrategy {
    pub fn build(self) -> Box<dyn LiteralSelector> {
        match self {
            LiteralSelectionStrategy::None => Box::new(NoSelection),
            LiteralSelectionStrategy::NegMaxWeight => Box::new(SelectNegMaxWeight),
            LiteralSelectionStrategy::AllNegative => Box::new(SelectAllNegative),
        }
    }
}

impl FromStr for LiteralSelectionStrategy {
    type Err = SaturnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LiteralSelectionStrategy::None),
            "neg_max_weight" => Ok(LiteralSelectionStrategy::NegMaxWeight),
            "all_negative" => Ok(LiteralSelectionStrategy::AllNegative),
            other => Err(SaturnError::UnknownSelection(other.to_string())),
        }
    }
}
