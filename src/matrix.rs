use std::{array, fmt};

use crate::traits::{Number, One, Zero};
use crate::Vector;

mod ops;
mod rotation;

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;

/// A row-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// # Convention
///
/// Vectors are *row* vectors: a vector is transformed by right-multiplication,
/// `v * m`, and the product `a * b` applies `a` first, then `b`. This matches
/// application order and is the opposite of the column-vector convention; the
/// column form `m * v` is deliberately not provided.
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] fill a matrix from
///   arrays of row or column vectors.
/// - [`Matrix::from_fn`] invokes a closure with each element's row and column.
/// - [`Matrix::from_diagonal`] creates a square matrix with a given diagonal.
/// - [`Matrix::ZERO`] and [`Matrix::IDENTITY`] are the usual constants.
/// - The rotation constructors on [`Mat2`] and [`Mat3`] build rotation
///   matrices; see [`Mat3::rotation_axis`] and friends.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(usize, usize)`
/// tuples; the first element is the *row*, the second the *column*, 0-based.
/// Indexing out of bounds panics; [`Matrix::get`] and [`Matrix::get_mut`]
/// return [`Option`]s instead.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>(pub(crate) [[T; C]; R]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The smallest dimension of the matrix (`R` or `C`).
    const MIN_DIMENSION: usize = if R > C { C } else { R };

    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self {
        Self(rows.map(|row| row.into().into_array()))
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self
    where
        T: Copy,
    {
        Matrix::<T, C, R>::from_rows(columns).transpose()
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|row| array::from_fn(|col| cb(row, col))))
    }

    /// Applies a closure to each element, returning a new matrix.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|row| row.map(|v| f(v))))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self.0[col][row])
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(row).and_then(|row| row.get(col))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(row).and_then(|row| row.get_mut(col))
    }

    /// Returns row `index` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= R`.
    pub fn row(&self, index: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from(self.0[index])
    }

    /// Replaces row `index` with `row`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= R`.
    pub fn set_row(&mut self, index: usize, row: Vector<T, C>) {
        self.0[index] = row.into_array();
    }

    /// Returns column `index` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= C`.
    pub fn column(&self, index: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        Vector::from_fn(|row| self.0[row][index])
    }

    /// Converts this matrix into its rows, in order.
    #[inline]
    pub fn into_rows(self) -> [[T; C]; R] {
        self.0
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([[T::ZERO; C]; R]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    pub const IDENTITY: Self = {
        let mut this = Self::ZERO;
        let mut i = 0;
        while i < Self::MIN_DIMENSION {
            this.0[i][i] = T::ONE;
            i += 1;
        }
        this
    };

    /// Returns `true` if every element equals the identity matrix's exactly.
    ///
    /// Used for default-value elision when serializing; exact, not
    /// tolerance-based.
    pub fn is_identity(&self) -> bool
    where
        T: PartialEq,
    {
        *self == Self::IDENTITY
    }
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns a [`Vector`] holding the diagonal elements of this square matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        array::from_fn(|i| self[(i, i)]).into()
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal will be initialized with zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Matrix::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        Self::from_fn(|row, col| if row == col { diag[row] } else { T::ZERO })
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }
}

impl<T: Number> Matrix<T, 2, 2> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        let [[a, b], [c, d]] = self.0;
        a * d - b * c
    }

    /// Inverts this 2x2 matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }

        let [[a, b], [c, d]] = self.0;
        Matrix::from_rows([[d, -b], [-c, a]]) * (T::ONE / det)
    }

    /// Creates a 2x2 rotation matrix for a counterclockwise rotation by `radians` in the XY plane
    /// (right-handed, Y up).
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// use std::f32::consts::TAU;
    ///
    /// assert_approx_eq!(Vec2f::X * Mat2f::rotation(TAU / 4.0), Vec2f::Y);
    /// ```
    pub fn rotation(radians: T) -> Self
    where
        T: crate::Trig,
    {
        let (sin, cos) = radians.sin_cos();
        Self::from_rows([[cos, sin], [-sin, cos]])
    }
}

impl<T: Number> Matrix<T, 3, 3> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Inverts this 3x3 matrix via its adjugate.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform_linalg::*;
    /// assert_eq!(Mat3f::IDENTITY.invert(), Mat3f::IDENTITY);
    /// ```
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if det == T::ZERO {
            panic!("attempt to invert a non-invertible matrix");
        }

        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        let inv_det = T::ONE / det;
        // Adjugate (transposed cofactors), scaled by 1/det.
        Self::from_rows([
            [
                (e * i - f * h) * inv_det,
                (c * h - b * i) * inv_det,
                (b * f - c * e) * inv_det,
            ],
            [
                (f * g - d * i) * inv_det,
                (a * i - c * g) * inv_det,
                (c * d - a * f) * inv_det,
            ],
            [
                (d * h - e * g) * inv_det,
                (b * g - a * h) * inv_det,
                (a * e - b * d) * inv_det,
            ],
        ])
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug, const R: usize, const C: usize>(
            &'a Matrix<T, R, C>,
            usize,
        );
        impl<'a, T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for FormatRow<'a, T, R, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..C {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in 0..R {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use crate::{assert_approx_eq, vec2};

    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Matrix::<_, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]),
            Matrix::<_, 2, 3>::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
    }

    #[test]
    fn diagonal() {
        let mat = Matrix::from_diagonal([1, 2]);

        #[rustfmt::skip]
        assert_eq!(mat, Matrix::from_rows([
            [1, 0],
            [0, 2],
        ]));

        assert_eq!(mat.into_diagonal(), [1, 2]);
        assert_eq!(mat.trace(), 3);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");
        assert!(Mat3f::IDENTITY.is_identity());
        assert!(!Mat3f::ZERO.is_identity());
    }

    #[test]
    fn rows_and_columns() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mat.row(0), [0, 1, 2]);
        assert_eq!(mat.row(1), [3, 4, 5]);
        assert_eq!(mat.column(1), [1, 4]);
        assert_eq!(mat.get(1, 0), Some(&3));
        assert_eq!(mat.get(2, 0), None);

        let mut mat = mat;
        mat.set_row(0, [9, 9, 9].into());
        assert_eq!(mat.row(0), [9, 9, 9]);
    }

    #[test]
    fn vec_mat_mul() {
        // Row-vector convention: `v * m`, element (col) j = sum over rows.
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        let out = vec2(4, 5) * mat;
        assert_eq!(out, [4 * 0 + 5 * 2, 4 * 1 + 5 * 3]);
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from_rows([
            [9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat2f::ZERO.determinant(), 0.0);
        assert_eq!(Mat3f::ZERO.determinant(), 0.0);
        assert_eq!(Mat2f::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3f::IDENTITY.determinant(), 1.0);

        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ]);
        assert_eq!(testmat.determinant(), 54);
        assert_eq!(testmat.transpose().determinant(), 54);
    }

    #[test]
    fn invert() {
        #[rustfmt::skip]
        let mat = Mat3f::from_rows([
            [ 2.0, 0.0, 1.0],
            [-1.0, 3.0, 0.5],
            [ 0.0, 1.0, 1.0],
        ]);
        assert_approx_eq!(mat * mat.invert(), Mat3f::IDENTITY);
        assert_approx_eq!(mat.invert() * mat, Mat3f::IDENTITY);

        let mat = Mat2f::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_approx_eq!(mat * mat.invert(), Mat2f::IDENTITY);
    }

    #[test]
    fn rotation() {
        let r = Mat2f::rotation(0.0);
        assert_eq!(r, r.invert());

        let r = Mat2f::rotation(PI);
        assert_approx_eq!(r, r.invert()).abs(1e-6);

        assert_approx_eq!(vec2(1.0f32, 0.0) * Mat2f::rotation(PI / 2.0), vec2(0.0, 1.0)).abs(1e-6);
    }
}
