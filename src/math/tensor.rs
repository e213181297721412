use serde::{Serialize, Deserialize};

/// A dense rank-3 tensor in height × width × channels layout, stored flat.
///
/// Every value flowing between layers is one of these. Vectors (the input
/// and output of the dense stage) are represented as shape (1, 1, n).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub h: usize,
    pub w: usize,
    pub c: usize,
    pub data: Vec<f64>,
}

impl Tensor {
    pub fn zeros(h: usize, w: usize, c: usize) -> Tensor {
        Tensor { h, w, c, data: vec![0.0; h * w * c] }
    }

    /// Wraps an existing flat buffer. Panics if the length does not match
    /// the shape — shape errors here are always programming errors.
    pub fn from_data(h: usize, w: usize, c: usize, data: Vec<f64>) -> Tensor {
        assert_eq!(data.len(), h * w * c, "tensor data length does not match shape");
        Tensor { h, w, c, data }
    }

    /// A rank-1 tensor of shape (1, 1, len).
    pub fn vector(data: Vec<f64>) -> Tensor {
        let n = data.len();
        Tensor { h: 1, w: 1, c: n, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.h, self.w, self.c)
    }

    #[inline]
    pub fn idx(&self, y: usize, x: usize, ch: usize) -> usize {
        (y * self.w + x) * self.c + ch
    }

    #[inline]
    pub fn at(&self, y: usize, x: usize, ch: usize) -> f64 {
        self.data[(y * self.w + x) * self.c + ch]
    }

    #[inline]
    pub fn set(&mut self, y: usize, x: usize, ch: usize, value: f64) {
        self.data[(y * self.w + x) * self.c + ch] = value;
    }

    pub fn map<F>(&self, functor: F) -> Tensor
    where
        F: Fn(f64) -> f64,
    {
        Tensor {
            h: self.h,
            w: self.w,
            c: self.c,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_hwc() {
        let mut t = Tensor::zeros(2, 3, 4);
        t.set(1, 2, 3, 7.0);
        assert_eq!(t.at(1, 2, 3), 7.0);
        assert_eq!(t.idx(1, 2, 3), (1 * 3 + 2) * 4 + 3);
    }

    #[test]
    fn vector_shape() {
        let v = Tensor::vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.shape(), (1, 1, 3));
        assert_eq!(v.len(), 3);
    }

    #[test]
    #[should_panic]
    fn from_data_rejects_bad_length() {
        Tensor::from_data(2, 2, 1, vec![0.0; 5]);
    }
}
