//! Four-channel color value for color springs.

use crate::float::Float;
use crate::vec::Components;

/// Linear RGBA color. Channels are nominally in [0, 1] but springs may
/// overshoot unless clamping is configured.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color<F: Float> {
    pub r: F,
    pub g: F,
    pub b: F,
    pub a: F,
}

impl<F: Float> Color<F> {
    pub fn new(r: F, g: F, b: F, a: F) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from three channels.
    pub fn rgb(r: F, g: F, b: F) -> Self {
        Color { r, g, b, a: F::one() }
    }

    pub fn white() -> Self {
        Color::rgb(F::one(), F::one(), F::one())
    }

    pub fn black() -> Self {
        Color::rgb(F::zero(), F::zero(), F::zero())
    }

    pub fn transparent() -> Self {
        Color::new(F::zero(), F::zero(), F::zero(), F::zero())
    }
}

impl<F: Float> Components for Color<F> {
    type Scalar = F;
    const COUNT: usize = 4;

    fn component(&self, index: usize) -> F {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => panic!("Color channel index {} out of range", index),
        }
    }

    fn from_fn<G: FnMut(usize) -> F>(mut f: G) -> Self {
        let r = f(0);
        let g = f(1);
        let b = f(2);
        let a = f(3);
        Color { r, g, b, a }
    }
}
