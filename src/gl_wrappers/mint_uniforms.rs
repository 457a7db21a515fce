//! [`Uniform`] for the `mint` interoperability types, so vectors and matrices
//! from any math library that converts into `mint` can be uploaded directly.
use gl::types::GLboolean;

use super::program::{Uniform, UniformLocation};
use crate::gl_check;

macro_rules! impl_mint_vector {
    ($($vector:ident<$ty:ty>: $n:literal;)+) => {
        $(
            impl Uniform for mint::$vector<$ty> {
                fn upload(self, location: UniformLocation) {
                    <[$ty; $n]>::from(self).upload(location);
                }
            }
        )+
    };
}

impl_mint_vector! {
    Vector2<f32>: 2;
    Vector3<f32>: 3;
    Vector4<f32>: 4;
    Vector2<i32>: 2;
    Vector3<i32>: 3;
    Vector4<i32>: 4;
    Point2<f32>: 2;
    Point3<f32>: 3;
}

/// Flattened matrix with the transpose flag the driver needs for it.
trait GlMatrix<const N: usize> {
    fn flatten(self) -> ([f32; N], GLboolean);
}

macro_rules! impl_mint_matrix {
    ($($matrix:ident, $dim:literal => $n:literal, $transpose:expr;)+) => {
        $(
            impl GlMatrix<$n> for mint::$matrix<f32> {
                fn flatten(self) -> ([f32; $n], GLboolean) {
                    let nested = <[[f32; $dim]; $dim]>::from(self);
                    (bytemuck::cast(nested), $transpose)
                }
            }
        )+
    };
}

impl_mint_matrix! {
    ColumnMatrix2, 2 => 4, gl::FALSE;
    ColumnMatrix3, 3 => 9, gl::FALSE;
    ColumnMatrix4, 4 => 16, gl::FALSE;
    RowMatrix2, 2 => 4, gl::TRUE;
    RowMatrix3, 3 => 9, gl::TRUE;
    RowMatrix4, 4 => 16, gl::TRUE;
}

macro_rules! impl_matrix_uniform {
    ($($matrix:ident => $n:literal, $func:ident;)+) => {
        $(
            impl Uniform for mint::$matrix<f32> {
                fn upload(self, location: UniformLocation) {
                    let (values, transpose) = self.flatten();
                    unsafe {
                        gl_check!(gl::$func(location.raw(), 1, transpose, values.as_ptr()))
                    };
                }
            }
        )+
    };
}

impl_matrix_uniform! {
    ColumnMatrix2 => 4, UniformMatrix2fv;
    ColumnMatrix3 => 9, UniformMatrix3fv;
    ColumnMatrix4 => 16, UniformMatrix4fv;
    RowMatrix2 => 4, UniformMatrix2fv;
    RowMatrix3 => 9, UniformMatrix3fv;
    RowMatrix4 => 16, UniformMatrix4fv;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_matrices_upload_as_is() {
        let matrix = mint::ColumnMatrix2::from([[1.0f32, 2.0], [3.0, 4.0]]);
        assert_eq!(matrix.flatten(), ([1.0, 2.0, 3.0, 4.0], gl::FALSE));
    }

    #[test]
    fn row_matrices_ask_the_driver_to_transpose() {
        let rows = [[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let matrix = mint::RowMatrix3::from(rows);
        let (values, transpose) = matrix.flatten();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(transpose, gl::TRUE);
    }

    #[test]
    fn four_by_four_keeps_column_order() {
        let mut columns = [[0.0f32; 4]; 4];
        columns[3] = [10.0, 20.0, 30.0, 1.0];
        let (values, _) = mint::ColumnMatrix4::from(columns).flatten();
        assert_eq!(&values[12..], &[10.0, 20.0, 30.0, 1.0]);
    }
}
