//! The tree grammar QM minimization consumes and produces. This module
//! defines the grammar and the `BooleanFunction` boundary only — it does not
//! parse text, and it does not enumerate minterms from arbitrary input
//! sources; that is left to whatever sits upstream of the boundary.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A Boolean expression tree: `{and, or, not, var, true, false}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    True,
    False,
    Var(String),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn not(e: Expr) -> Self {
        Expr::Not(Box::new(e))
    }

    pub fn and(terms: Vec<Expr>) -> Self {
        match terms.len() {
            0 => Expr::True,
            1 => terms.into_iter().next().unwrap(),
            _ => Expr::And(terms),
        }
    }

    pub fn or(terms: Vec<Expr>) -> Self {
        match terms.len() {
            0 => Expr::False,
            1 => terms.into_iter().next().unwrap(),
            _ => Expr::Or(terms),
        }
    }

    fn collect_vars(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Not(inner) => inner.collect_vars(out),
            Expr::And(terms) | Expr::Or(terms) => terms.iter().for_each(|t| t.collect_vars(out)),
        }
    }

    /// Evaluate this expression under an assignment that maps every
    /// variable name appearing in it to a truth value.
    pub fn evaluate(&self, assignment: &std::collections::BTreeMap<String, bool>) -> bool {
        match self {
            Expr::True => true,
            Expr::False => false,
            Expr::Var(name) => *assignment.get(name).unwrap_or(&false),
            Expr::Not(inner) => !inner.evaluate(assignment),
            Expr::And(terms) => terms.iter().all(|t| t.evaluate(assignment)),
            Expr::Or(terms) => terms.iter().any(|t| t.evaluate(assignment)),
        }
    }
}

/// The observable capabilities a parsed expression (or any other on-set
/// source) must expose to the minimizer: its canonical variable order, and
/// an enumeration of satisfying assignments in that order. An external
/// parser/evaluator collaborator is expected to implement this for
/// arbitrary textual input; [`Expr`] implements it directly since its tree
/// is already in hand.
pub trait BooleanFunction {
    /// The variable list in canonical (bit-position) order.
    fn get_variables(&self) -> Vec<String>;

    /// For each satisfying assignment, the value of every variable (in
    /// `get_variables` order) under that assignment.
    fn each_minterm(&self) -> Vec<Vec<bool>>;
}

impl BooleanFunction for Expr {
    fn get_variables(&self) -> Vec<String> {
        let mut out = BTreeSet::new();
        self.collect_vars(&mut out);
        out.into_iter().collect()
    }

    fn each_minterm(&self) -> Vec<Vec<bool>> {
        let vars = self.get_variables();
        let n = vars.len();
        let mut out = Vec::new();
        for selector in 0u64..(1u64 << n) {
            let mut assignment = std::collections::BTreeMap::new();
            let mut values = Vec::with_capacity(n);
            for (i, name) in vars.iter().enumerate() {
                let v = (selector >> i) & 1 == 1;
                assignment.insert(name.clone(), v);
                values.push(v);
            }
            if self.evaluate(&assignment) {
                out.push(values);
            }
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::True => write!(f, "true"),
            Expr::False => write!(f, "false"),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Not(inner) => write!(f, "!{}", inner),
            Expr::And(terms) => {
                let rendered: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                write!(f, "{}", rendered.join("*"))
            }
            Expr::Or(terms) => {
                let rendered: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                write!(f, "{}", rendered.join(" + "))
            }
        }
    }
}
