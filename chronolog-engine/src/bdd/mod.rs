//! Reduced ordered binary decision diagrams with weighted model counting.
//!
//! Variables are ordered by index: smaller indices sit closer to the root.
//! Structure depends only on the logic, never on weights, so one diagram
//! can be evaluated under any number of weight vectors.

use std::collections::HashMap;

/// Reference to a node in a `Bdd`.
pub type BddRef = usize;

pub const FALSE: BddRef = 0;
pub const TRUE: BddRef = 1;

const TERMINAL_VAR: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BddNode {
    var: usize,
    low: BddRef,
    high: BddRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Op {
    And,
    Or,
}

/// Node store with hash-consing and operation caches.
#[derive(Debug, Clone)]
pub struct Bdd {
    nodes: Vec<BddNode>,
    unique: HashMap<BddNode, BddRef>,
    apply_cache: HashMap<(Op, BddRef, BddRef), BddRef>,
    not_cache: HashMap<BddRef, BddRef>,
}

impl Default for Bdd {
    fn default() -> Self {
        Self::new()
    }
}

impl Bdd {
    pub fn new() -> Self {
        let terminal = |id| BddNode {
            var: TERMINAL_VAR,
            low: id,
            high: id,
        };
        Self {
            nodes: vec![terminal(FALSE), terminal(TRUE)],
            unique: HashMap::new(),
            apply_cache: HashMap::new(),
            not_cache: HashMap::new(),
        }
    }

    /// Total nodes allocated, terminals included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }

    /// The diagram for a single variable.
    pub fn var(&mut self, var: usize) -> BddRef {
        self.mk(var, FALSE, TRUE)
    }

    fn mk(&mut self, var: usize, low: BddRef, high: BddRef) -> BddRef {
        if low == high {
            return low;
        }
        let node = BddNode { var, low, high };
        if let Some(&existing) = self.unique.get(&node) {
            return existing;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.unique.insert(node, id);
        id
    }

    fn top_var(&self, f: BddRef) -> usize {
        self.nodes[f].var
    }

    fn cofactors(&self, f: BddRef, var: usize) -> (BddRef, BddRef) {
        let node = self.nodes[f];
        if node.var == var {
            (node.low, node.high)
        } else {
            (f, f)
        }
    }

    pub fn not(&mut self, f: BddRef) -> BddRef {
        match f {
            FALSE => return TRUE,
            TRUE => return FALSE,
            _ => {}
        }
        if let Some(&cached) = self.not_cache.get(&f) {
            return cached;
        }
        let node = self.nodes[f];
        let low = self.not(node.low);
        let high = self.not(node.high);
        let result = self.mk(node.var, low, high);
        self.not_cache.insert(f, result);
        result
    }

    pub fn and(&mut self, a: BddRef, b: BddRef) -> BddRef {
        self.apply(Op::And, a, b)
    }

    pub fn or(&mut self, a: BddRef, b: BddRef) -> BddRef {
        self.apply(Op::Or, a, b)
    }

    fn apply(&mut self, op: Op, a: BddRef, b: BddRef) -> BddRef {
        let shortcut = match op {
            Op::And => match (a, b) {
                (FALSE, _) | (_, FALSE) => Some(FALSE),
                (TRUE, x) | (x, TRUE) => Some(x),
                _ if a == b => Some(a),
                _ => None,
            },
            Op::Or => match (a, b) {
                (TRUE, _) | (_, TRUE) => Some(TRUE),
                (FALSE, x) | (x, FALSE) => Some(x),
                _ if a == b => Some(a),
                _ => None,
            },
        };
        if let Some(result) = shortcut {
            return result;
        }

        // Both operations are commutative.
        let key = (op, a.min(b), a.max(b));
        if let Some(&cached) = self.apply_cache.get(&key) {
            return cached;
        }

        let var = self.top_var(a).min(self.top_var(b));
        let (a_low, a_high) = self.cofactors(a, var);
        let (b_low, b_high) = self.cofactors(b, var);
        let low = self.apply(op, a_low, b_low);
        let high = self.apply(op, a_high, b_high);
        let result = self.mk(var, low, high);
        self.apply_cache.insert(key, result);
        result
    }

    /// Probability that `f` is true when variable `i` is independently true
    /// with probability `weights[i]`.
    pub fn probability(&self, f: BddRef, weights: &[f64]) -> f64 {
        let mut memo: HashMap<BddRef, f64> = HashMap::new();
        self.probability_memo(f, weights, &mut memo)
    }

    fn probability_memo(&self, f: BddRef, weights: &[f64], memo: &mut HashMap<BddRef, f64>) -> f64 {
        match f {
            FALSE => return 0.0,
            TRUE => return 1.0,
            _ => {}
        }
        if let Some(&p) = memo.get(&f) {
            return p;
        }
        let node = self.nodes[f];
        let w = weights[node.var];
        let high = self.probability_memo(node.high, weights, memo);
        let low = self.probability_memo(node.low, weights, memo);
        let p = w * high + (1.0 - w) * low;
        memo.insert(f, p);
        p
    }

    /// Number of decision nodes reachable from `f`.
    pub fn size(&self, f: BddRef) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![f];
        while let Some(n) = stack.pop() {
            if n <= TRUE || !seen.insert(n) {
                continue;
            }
            stack.push(self.nodes[n].low);
            stack.push(self.nodes[n].high);
        }
        seen.len()
    }
}
