//! Strided GEMM kernel behind `Matrix::matmul` and its transposed variants.
//!
//! Every operand is described by a row stride and a column stride, so a
//! transposed view costs nothing: swap the two strides. The default kernel is a
//! plain triple loop; the `matrixmultiply` feature swaps in that crate's
//! blocked `sgemm`.

/// A read-only strided view over a flat `f32` buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct View<'a> {
    pub data: &'a [f32],
    pub rows: usize,
    pub cols: usize,
    pub row_stride: usize,
    pub col_stride: usize,
}

impl<'a> View<'a> {
    /// Row-major view of a `rows × cols` buffer.
    #[inline]
    pub fn row_major(data: &'a [f32], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            data,
            rows,
            cols,
            row_stride: cols,
            col_stride: 1,
        }
    }

    /// The same buffer read as its transpose.
    #[inline]
    pub fn t(self) -> Self {
        Self {
            data: self.data,
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
        }
    }
}

/// Computes `out = a · b`, where `out` is row-major with shape `a.rows × b.cols`.
///
/// Panics if the inner dimensions disagree or `out` has the wrong length.
pub(crate) fn gemm(a: View<'_>, b: View<'_>, out: &mut [f32]) {
    assert_eq!(
        a.cols, b.rows,
        "matmul inner dims differ: lhs is {}x{}, rhs is {}x{}",
        a.rows, a.cols, b.rows, b.cols
    );
    let (m, k, n) = (a.rows, a.cols, b.cols);
    assert_eq!(out.len(), m * n, "output buffer has wrong length");

    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        out.fill(0.0);
        return;
    }

    #[cfg(feature = "matrixmultiply")]
    {
        // SAFETY: both views were built from slices covering every strided
        // index below `rows * row_stride + cols * col_stride`, and `out` has
        // exactly `m * n` elements laid out row-major.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.data.as_ptr(),
                a.row_stride as isize,
                a.col_stride as isize,
                b.data.as_ptr(),
                b.row_stride as isize,
                b.col_stride as isize,
                0.0,
                out.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    naive_gemm(a, b, out);
}

#[cfg(not(feature = "matrixmultiply"))]
fn naive_gemm(a: View<'_>, b: View<'_>, out: &mut [f32]) {
    let (m, k, n) = (a.rows, a.cols, b.cols);
    for i in 0..m {
        let a0 = i * a.row_stride;
        for j in 0..n {
            let b0 = j * b.col_stride;
            let mut acc = 0.0_f32;
            for p in 0..k {
                let av = a.data[a0 + p * a.col_stride];
                let bv = b.data[p * b.row_stride + b0];
                acc = av.mul_add(bv, acc);
            }
            out[i * n + j] = acc;
        }
    }
}
