use super::operators::Operator;
use super::sources::{SourceNumber, SourceSet};
use crate::math;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Expression tree recording how a value was built from source numbers.
///
/// Nodes can only be created through [`Derivation::combine`], which applies the
/// operator validity rules and rejects trees that would use a source twice. Every
/// node in an existing tree therefore holds a positive integer, and every divide
/// node divides exactly. Subtrees are shared, so cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Derivation {
    /// A single source number
    Leaf(SourceNumber),

    /// An operator applied to two disjoint derivations
    Node(Rc<Combination>),
}

/// Internal node of a derivation
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    op: Operator,
    value: u64,
    left: Derivation,
    right: Derivation,
    #[serde(skip)]
    sources: SourceSet,
}

impl Combination {
    /// Operator applied at this node
    pub fn op(&self) -> Operator {
        self.op
    }

    /// Left operand (the larger value)
    pub fn left(&self) -> &Derivation {
        &self.left
    }

    /// Right operand (the smaller value)
    pub fn right(&self) -> &Derivation {
        &self.right
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Derivation {
    /// Wraps a source number as a zero-operation derivation
    pub fn leaf(source: SourceNumber) -> Self {
        Derivation::Leaf(source)
    }

    /// Combines two derivations with an operator.
    ///
    /// Operands are put in canonical order (larger value on the left, equal
    /// values keep argument order). Returns `None` when the pair shares a
    /// source or the operator is not valid for these values.
    pub fn combine(op: Operator, a: &Derivation, b: &Derivation) -> Option<Derivation> {
        if !a.sources().is_disjoint(b.sources()) {
            return None;
        }

        let (left, right) = if a.value() >= b.value() { (a, b) } else { (b, a) };
        let value = math::apply(op, left.value(), right.value())?;

        Some(Derivation::Node(Rc::new(Combination {
            op,
            value,
            left: left.clone(),
            right: right.clone(),
            sources: left.sources().union(right.sources()),
        })))
    }

    /// Value of the derivation (cached at construction)
    pub fn value(&self) -> u64 {
        match self {
            Derivation::Leaf(source) => source.value,
            Derivation::Node(node) => node.value,
        }
    }

    /// Source identities used by this derivation
    pub fn sources(&self) -> SourceSet {
        match self {
            Derivation::Leaf(source) => SourceSet::single(source.index),
            Derivation::Node(node) => node.sources,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Derivation::Leaf(_))
    }

    /// Number of operator applications in the tree
    pub fn operation_count(&self) -> usize {
        match self {
            Derivation::Leaf(_) => 0,
            Derivation::Node(node) => 1 + node.left.operation_count() + node.right.operation_count(),
        }
    }

    /// Height of the tree (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        match self {
            Derivation::Leaf(_) => 0,
            Derivation::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Source numbers at the leaves, left to right
    pub fn leaves(&self) -> Vec<SourceNumber> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<SourceNumber>) {
        match self {
            Derivation::Leaf(source) => out.push(*source),
            Derivation::Node(node) => {
                node.left.collect_leaves(out);
                node.right.collect_leaves(out);
            }
        }
    }

    /// Recomputes the value from the tree, ignoring cached node values.
    ///
    /// Returns `None` if any step leaves the positive integers or divides
    /// inexactly.
    pub fn evaluate(&self) -> Option<u64> {
        match self {
            Derivation::Leaf(source) => (source.value > 0).then_some(source.value),
            Derivation::Node(node) => {
                let left = node.left.evaluate()?;
                let right = node.right.evaluate()?;
                math::evaluate(node.op, left, right)
            }
        }
    }

    /// Visits every internal node, parents before children
    pub fn for_each_node<F>(&self, f: &mut F)
    where
        F: FnMut(&Combination),
    {
        if let Derivation::Node(node) = self {
            f(node);
            node.left.for_each_node(f);
            node.right.for_each_node(f);
        }
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivation::Leaf(source) => write!(f, "{}", source.value),
            Derivation::Node(node) => write!(f, "({} {} {})", node.left, node.op, node.right),
        }
    }
}
