//! Broadcasting of observation coordinate arrays.
//!
//! Shapes are aligned on their trailing axes. Along every axis the lengths must either be
//! equal or one of them must be 1, the result takes the other length. Missing leading axes
//! behave like length 1.

use ndarray::{ArrayViewD, IxDyn};

use crate::error::GravityError;

/// Common shape of a set of array shapes.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>, GravityError> {
    let ndim = shapes.iter().map(|shape| shape.len()).max().unwrap_or(0);
    let mut common = vec![1usize; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &len) in shape.iter().enumerate() {
            let target = &mut common[offset + axis];
            if *target == 1 {
                *target = len;
            } else if len != 1 && len != *target {
                return Err(GravityError::ShapeMismatch {
                    shapes: shapes.iter().map(|shape| shape.to_vec()).collect(),
                });
            }
        }
    }

    Ok(common)
}

/// Broadcast `array` to `shape` and copy it out in row-major order.
///
/// The order is the logical one, independent of the memory layout of `array`.
pub fn broadcast_flatten(
    array: &ArrayViewD<'_, f64>,
    shape: &[usize],
) -> Result<Vec<f64>, GravityError> {
    let view = array
        .broadcast(IxDyn(shape))
        .ok_or_else(|| GravityError::ShapeMismatch {
            shapes: vec![array.shape().to_vec(), shape.to_vec()],
        })?;

    Ok(view.iter().copied().collect())
}
