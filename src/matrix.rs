//! Dense `f32` matrices and boolean masks.
//!
//! Storage is row-major. The layered network keeps one sample per *column*
//! (features down the rows); the linear models keep one sample per *row*.
//! Both conventions are just shapes to this module.
//!
//! Elementwise helpers and products panic on shape mismatch: they sit on the
//! training hot path and a mismatch there is a programmer error. Constructors
//! that take caller data validate and return [`Result`].

use std::ops::{Add, Mul, Sub, SubAssign};

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::matmul::{self, View};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// A `rows × cols` matrix with every entry set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    #[inline]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, 0.0)
    }

    /// Wraps a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidArgument(format!(
                "buffer length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from equally long rows.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidArgument(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// A single-column matrix.
    pub fn column(values: &[f32]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// A single-row matrix.
    pub fn row_vector(values: &[f32]) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Independent uniform samples from `[low, high]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f32,
        high: f32,
        rng: &mut R,
    ) -> Self {
        let dist = Uniform::new_inclusive(low, high);
        let data = (0..rows * cols).map(|_| dist.sample(rng)).collect();
        Self { rows, cols, data }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn view(&self) -> View<'_> {
        View::row_major(&self.data, self.rows, self.cols)
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// `self · rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Self {
        let mut out = Self::zeros(self.rows, rhs.cols);
        matmul::gemm(self.view(), rhs.view(), &mut out.data);
        out
    }

    /// `self · rhsᵀ` without materializing the transpose.
    pub fn matmul_transpose_rhs(&self, rhs: &Matrix) -> Self {
        let mut out = Self::zeros(self.rows, rhs.rows);
        matmul::gemm(self.view(), rhs.view().t(), &mut out.data);
        out
    }

    /// `selfᵀ · rhs` without materializing the transpose.
    pub fn transpose_matmul(&self, rhs: &Matrix) -> Self {
        let mut out = Self::zeros(self.cols, rhs.cols);
        matmul::gemm(self.view().t(), rhs.view(), &mut out.data);
        out
    }

    /// Applies `f` to every entry.
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Elementwise combination of two equally shaped matrices.
    pub fn zip_map<F: Fn(f32, f32) -> f32>(&self, rhs: &Matrix, f: F) -> Self {
        self.assert_same_shape(rhs, "zip_map");
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Elementwise product.
    pub fn hadamard(&self, rhs: &Matrix) -> Self {
        self.zip_map(rhs, |a, b| a * b)
    }

    pub fn scale(&self, factor: f32) -> Self {
        self.map(|v| v * factor)
    }

    /// In-place `self -= factor * rhs`.
    pub fn scaled_sub_assign(&mut self, factor: f32, rhs: &Matrix) {
        self.assert_same_shape(rhs, "scaled_sub_assign");
        for (w, &g) in self.data.iter_mut().zip(&rhs.data) {
            *w = (-factor).mul_add(g, *w);
        }
    }

    /// Stacks `below` under `self`; widths must agree.
    pub fn merge_rows(&self, below: &Matrix) -> Self {
        assert_eq!(
            self.cols, below.cols,
            "merge_rows width mismatch: {} vs {}",
            self.cols, below.cols
        );
        let mut data = Vec::with_capacity(self.data.len() + below.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&below.data);
        Self {
            rows: self.rows + below.rows,
            cols: self.cols,
            data,
        }
    }

    /// Places `right` beside `self`; heights must agree.
    pub fn merge_columns(&self, right: &Matrix) -> Self {
        assert_eq!(
            self.rows, right.rows,
            "merge_columns height mismatch: {} vs {}",
            self.rows, right.rows
        );
        let cols = self.cols + right.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for r in 0..self.rows {
            data.extend_from_slice(self.row(r));
            data.extend_from_slice(right.row(r));
        }
        Self {
            rows: self.rows,
            cols,
            data,
        }
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Position of the first entry (row-major order) satisfying `pred`.
    pub fn find<F: Fn(f32) -> bool>(&self, pred: F) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|&v| pred(v))
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    /// Entries strictly greater than `threshold`.
    pub fn gt(&self, threshold: f32) -> BoolMatrix {
        self.compare(|v| v > threshold)
    }

    /// Entries less than or equal to `threshold`.
    pub fn le(&self, threshold: f32) -> BoolMatrix {
        self.compare(|v| v <= threshold)
    }

    /// Entries different from zero; how 0/1 label matrices become masks.
    pub fn nonzero(&self) -> BoolMatrix {
        self.compare(|v| v != 0.0)
    }

    fn compare<F: Fn(f32) -> bool>(&self, f: F) -> BoolMatrix {
        BoolMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    #[inline]
    fn assert_same_shape(&self, rhs: &Matrix, op: &str) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "{op} shape mismatch: {:?} vs {:?}",
            self.shape(),
            rhs.shape()
        );
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f32) -> Matrix {
        self.scale(rhs)
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        self.scaled_sub_assign(1.0, rhs);
    }
}

/// Boolean matrix produced by elementwise comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl BoolMatrix {
    #[inline]
    pub fn height(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Elementwise equality against an equally shaped mask.
    pub fn eq_mask(&self, rhs: &BoolMatrix) -> BoolMatrix {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "eq_mask shape mismatch: {:?} vs {:?}",
            self.shape(),
            rhs.shape()
        );
        BoolMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| a == b)
                .collect(),
        }
    }

    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// True when every entry of column `col` is set.
    pub fn all_in_column(&self, col: usize) -> bool {
        assert!(col < self.cols, "column out of bounds");
        (0..self.rows).all(|r| self.data[r * self.cols + col])
    }

    /// `1.0` for set entries, `0.0` otherwise.
    pub fn to_matrix(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        }
    }
}
