//! The assembled QUBO problem.
//!
//! Coefficients live in integer-keyed maps: linear terms per variable
//! id, quadratic terms per packed unordered id pair. The dense matrix
//! and the sorted interchange form are derived views for solvers that
//! want them.

use itertools::Itertools;
use ndarray::Array2;
use nohash_hasher::IntMap;
use serde::Deserialize;
use serde::Serialize;

use crate::Q2KEY;
use crate::QKEY;
use crate::pair_key;
use crate::split_pair_key;

/// Mapping from variables and unordered variable pairs to
/// coefficients.
///
/// Invariants: every id referenced by a quadratic term has a linear
/// entry (possibly 0); each unordered pair is stored once under its
/// canonical key; contributions accumulate, they are never
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuboModel {
    num_vars: usize,
    linear: IntMap<QKEY, f64>,
    quadratic: IntMap<Q2KEY, f64>,
}

impl QuboModel {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            linear: IntMap::default(),
            quadratic: IntMap::default(),
        }
    }

    /// Number of binary variables (one per quartet).
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Linear coefficient of variable `i` (0 if absent).
    pub fn linear(&self, i: QKEY) -> f64 {
        self.linear.get(&i).copied().unwrap_or(0.0)
    }

    /// Quadratic coefficient of the unordered pair (i, j) (0 if absent).
    pub fn quadratic(&self, i: QKEY, j: QKEY) -> f64 {
        self.quadratic
            .get(&pair_key(i, j))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of stored quadratic terms.
    pub fn num_quadratic(&self) -> usize {
        self.quadratic.len()
    }

    pub(crate) fn add_linear(&mut self, i: QKEY, value: f64) {
        *self.linear.entry(i).or_insert(0.0) += value;
    }

    pub(crate) fn add_quadratic(&mut self, i: QKEY, j: QKEY, value: f64) {
        *self.quadratic.entry(pair_key(i, j)).or_insert(0.0) += value;
    }

    pub(crate) fn add_quadratic_key(&mut self, key: Q2KEY, value: f64) {
        *self.quadratic.entry(key).or_insert(0.0) += value;
    }

    /// Sum of absolute linear and quadratic magnitudes. Any achievable
    /// objective delta is bounded by this.
    pub fn magnitude(&self) -> f64 {
        self.linear.values().map(|v| v.abs()).sum::<f64>()
            + self.quadratic.values().map(|v| v.abs()).sum::<f64>()
    }

    /// Objective value of a 0/1 assignment. Ids absent from the
    /// assignment count as 0.
    pub fn objective(&self, assignment: &IntMap<QKEY, bool>) -> f64 {
        let on = |i: QKEY| assignment.get(&i).copied().unwrap_or(false);
        let mut f = 0.0;
        for (&i, &e) in &self.linear {
            if on(i) {
                f += e;
            }
        }
        for (&key, &q) in &self.quadratic {
            let (i, j) = split_pair_key(key);
            if on(i) && on(j) {
                f += q;
            }
        }
        f
    }

    /// Dense symmetric matrix view: the diagonal holds the linear
    /// terms; each off-diagonal coefficient is split evenly across
    /// both halves, so xᵀMx equals the objective for any 0/1 vector x.
    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.num_vars;
        let mut m = Array2::from_elem((n, n), 0.0);
        for (&i, &e) in &self.linear {
            m[(i as usize, i as usize)] = e;
        }
        for (&key, &q) in &self.quadratic {
            let (i, j) = split_pair_key(key);
            m[(i as usize, j as usize)] = q / 2.0;
            m[(j as usize, i as usize)] = q / 2.0;
        }
        m
    }
}

/// Canonical interchange form for external solvers: sorted, explicit,
/// serializable. Any solver accepting a linear id→coefficient map and
/// an unordered id-pair→coefficient map is compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboProblem {
    pub num_vars: usize,
    pub linear: Vec<(QKEY, f64)>,
    pub quadratic: Vec<(QKEY, QKEY, f64)>,
}

impl From<&QuboModel> for QuboProblem {
    fn from(model: &QuboModel) -> Self {
        let linear = model
            .linear
            .iter()
            .map(|(&i, &v)| (i, v))
            .sorted_by_key(|&(i, _)| i)
            .collect();
        let quadratic = model
            .quadratic
            .iter()
            .map(|(&key, &v)| {
                let (i, j) = split_pair_key(key);
                (i, j, v)
            })
            .sorted_by_key(|&(i, j, _)| (i, j))
            .collect();
        QuboProblem {
            num_vars: model.num_vars,
            linear,
            quadratic,
        }
    }
}

impl From<&QuboProblem> for QuboModel {
    fn from(problem: &QuboProblem) -> Self {
        let mut model = QuboModel::new(problem.num_vars);
        for &(i, v) in &problem.linear {
            model.add_linear(i, v);
        }
        for &(i, j, v) in &problem.quadratic {
            model.add_quadratic(i, j, v);
        }
        model
    }
}
