use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

/// ZeroSpVec is a sparse vector where zero elements are implicit.
/// It holds `indices` and `values`:
/// `indices` keeps the dimension of each stored element,
/// `values` keeps the element value.
///
/// Stored elements are guaranteed to be sorted by ascending index.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    indices: Vec<usize>,
    values: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            len: 0,
        }
    }

    /// Empty vector with a fixed logical dimension
    #[inline]
    pub fn with_len(len: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            len,
        }
    }

    /// Logical dimension (zeros included)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Set `value` at `index`.
    /// Zero values are not stored; the logical length grows to cover `index`.
    pub fn push(&mut self, index: usize, value: N) {
        if index >= self.len {
            self.len = index + 1;
        }
        match self.indices.binary_search(&index) {
            Ok(pos) => {
                if value == N::zero() {
                    self.indices.remove(pos);
                    self.values.remove(pos);
                } else {
                    self.values[pos] = value;
                }
            }
            Err(pos) => {
                if value != N::zero() {
                    self.indices.insert(pos, index);
                    self.values.insert(pos, value);
                }
            }
        }
    }

    /// Value at `index`, `None` when out of range.
    /// Implicit zeros are returned as `Some(zero)`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.indices.binary_search(&index) {
            Ok(pos) => Some(self.values[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored elements as `(index, &value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.indices.iter().copied().zip(self.values.iter())
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.indices.shrink_to_fit();
        self.values.shrink_to_fit();
    }
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|v| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product by merge-joining the sorted indices
    pub fn dot(&self, other: &ZeroSpVec<N>) -> f64 {
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                std::cmp::Ordering::Equal => {
                    dot += Into::<f64>::into(*va) * Into::<f64>::into(*vb);
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                std::cmp::Ordering::Less => a_next = a_it.next(),
                std::cmp::Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// dense -> sparse, zeros are dropped
    fn from(dense: Vec<N>) -> Self {
        let len = dense.len();
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (i, v) in dense.into_iter().enumerate() {
            if v != N::zero() {
                indices.push(i);
                values.push(v);
            }
        }
        Self { indices, values, len }
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec(len: {}, nnz: {}) [", self.len, self.nnz())?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}
