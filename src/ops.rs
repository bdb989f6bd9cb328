use core::f64::consts::{FRAC_PI_2, PI};

/// Named pure scalar transforms taking one argument.
///
/// The catalogue doubles as a registry: every variant is a pure function of
/// its input, and [`Column::apply_op`](crate::Column::apply_op) feeds it
/// uniformly through the range-apply primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `|x|`
    Abs,
    /// `√x`
    Sqrt,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Arc sine with domain correction: inputs below `-1` yield `-π/2`,
    /// inputs above `1` yield `π/2` instead of NaN.
    Asin,
    /// Arc cosine with domain correction: inputs below `-1` yield `π`,
    /// inputs above `1` yield `0` instead of NaN.
    Acos,
    /// Arc tangent.
    Atan,
}

impl UnaryOp {
    /// Evaluates the transform at `x`.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Negate => -x,
            Self::Abs => x.abs(),
            Self::Sqrt => x.sqrt(),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => {
                if x < -1.0 {
                    -FRAC_PI_2
                } else if x > 1.0 {
                    FRAC_PI_2
                } else {
                    x.asin()
                }
            }
            Self::Acos => {
                if x < -1.0 {
                    PI
                } else if x > 1.0 {
                    0.0
                } else {
                    x.acos()
                }
            }
            Self::Atan => x.atan(),
        }
    }
}

/// Named pure scalar transforms taking a value and one extra argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `x + a`
    Add,
    /// `x - a`
    Subtract,
    /// `x * a`
    Multiply,
    /// `x / a`
    Divide,
    /// `x^a`
    Power,
    /// Logarithm of `x` in base `a`.
    LogBase,
    /// Remainder of `x / a` (sign follows `x`).
    Remainder,
    /// Larger of `x` and `a`.
    Max,
    /// Smaller of `x` and `a`.
    Min,
    /// `√(x² + a²)`
    Hypot,
    /// Four-quadrant arc tangent of `x / a`.
    Atan2,
}

impl BinaryOp {
    /// Evaluates the transform at `x` with argument `arg`.
    pub fn eval(self, x: f64, arg: f64) -> f64 {
        match self {
            Self::Add => x + arg,
            Self::Subtract => x - arg,
            Self::Multiply => x * arg,
            Self::Divide => x / arg,
            Self::Power => x.powf(arg),
            Self::LogBase => x.log(arg),
            Self::Remainder => x % arg,
            Self::Max => x.max(arg),
            Self::Min => x.min(arg),
            Self::Hypot => x.hypot(arg),
            Self::Atan2 => x.atan2(arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn unary_basics() {
        assert_eq!(UnaryOp::Negate.eval(2.5), -2.5);
        assert_eq!(UnaryOp::Abs.eval(-3.0), 3.0);
        assert_eq!(UnaryOp::Sqrt.eval(9.0), 3.0);
        assert_approx_eq!(UnaryOp::Ln.eval(core::f64::consts::E), 1.0);
        assert_approx_eq!(UnaryOp::Log10.eval(1000.0), 3.0);
        assert_approx_eq!(UnaryOp::Atan.eval(1.0), FRAC_PI_2 / 2.0);
    }

    #[test]
    fn asin_clamps_out_of_domain() {
        assert_eq!(UnaryOp::Asin.eval(-1.5), -FRAC_PI_2);
        assert_eq!(UnaryOp::Asin.eval(1.5), FRAC_PI_2);
        assert_approx_eq!(UnaryOp::Asin.eval(0.5), 0.5_f64.asin());
    }

    #[test]
    fn acos_clamps_out_of_domain() {
        assert_eq!(UnaryOp::Acos.eval(-1.5), PI);
        assert_eq!(UnaryOp::Acos.eval(1.5), 0.0);
        assert_approx_eq!(UnaryOp::Acos.eval(0.5), 0.5_f64.acos());
    }

    #[test]
    fn binary_basics() {
        assert_eq!(BinaryOp::Add.eval(2.0, 3.0), 5.0);
        assert_eq!(BinaryOp::Subtract.eval(2.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Multiply.eval(2.0, 3.0), 6.0);
        assert_eq!(BinaryOp::Divide.eval(3.0, 2.0), 1.5);
        assert_eq!(BinaryOp::Power.eval(2.0, 10.0), 1024.0);
        assert_approx_eq!(BinaryOp::LogBase.eval(8.0, 2.0), 3.0);
        assert_eq!(BinaryOp::Remainder.eval(7.0, 3.0), 1.0);
        assert_eq!(BinaryOp::Max.eval(2.0, 3.0), 3.0);
        assert_eq!(BinaryOp::Min.eval(2.0, 3.0), 2.0);
        assert_eq!(BinaryOp::Hypot.eval(3.0, 4.0), 5.0);
        assert_approx_eq!(BinaryOp::Atan2.eval(1.0, 1.0), PI / 4.0);
    }

    #[test]
    fn remainder_sign_follows_dividend() {
        assert_eq!(BinaryOp::Remainder.eval(-7.0, 3.0), -1.0);
    }
}
