// Sample grid over a rectangular viewport of the complex plane, and the
// field of function values computed over it.
//
// Pixel (c, r) samples the point X + iY with
//   X[r][c] = (c - w/2)/scale + ox
//   Y[r][c] = (h/2 - r)/scale + oy
// so row 0 is the top of the image and carries the largest imaginary part.

use num::complex::Complex;

#[derive(Debug)]
pub struct Grid {
    width : usize,
    height : usize,
    xs : Vec<f64>,
    ys : Vec<f64>,
}

impl Grid {
    pub fn generate(
        width : usize,
        height : usize,
        scale : f64,
        offset_x : f64,
        offset_y : f64,
    ) -> Grid {
        let half_w = width as f64 / 2.0;
        let half_h = height as f64 / 2.0;
        let mut xs = Vec::with_capacity(width * height);
        let mut ys = Vec::with_capacity(width * height);
        for r in 0..height {
            for c in 0..width {
                xs.push((c as f64 - half_w) / scale + offset_x);
                ys.push((half_h - r as f64) / scale + offset_y);
            }
        }
        Grid { width, height, xs, ys }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn x_at(&self, row : usize, col : usize) -> f64 {
        self.xs[row * self.width + col]
    }

    pub fn y_at(&self, row : usize, col : usize) -> f64 {
        self.ys[row * self.width + col]
    }

    pub fn complex_at(&self, row : usize, col : usize) -> Complex<f64> {
        Complex::new(self.x_at(row, col), self.y_at(row, col))
    }

    pub(crate) fn complex_at_index(&self, idx : usize) -> Complex<f64> {
        Complex::new(self.xs[idx], self.ys[idx])
    }
}

// The function's output at every grid point, same shape and orientation.
#[derive(Debug)]
pub struct ComplexField {
    width : usize,
    height : usize,
    values : Vec<Complex<f64>>,
}

impl ComplexField {
    pub(crate) fn new(width : usize, height : usize, values : Vec<Complex<f64>>) -> ComplexField {
        assert_eq!(values.len(), width * height);
        ComplexField { width, height, values }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn at(&self, row : usize, col : usize) -> Complex<f64> {
        self.values[row * self.width + col]
    }

    pub(crate) fn values(&self) -> &[Complex<f64>] {
        &self.values
    }
}
