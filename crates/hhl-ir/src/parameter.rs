//! Numeric gate parameters.
//!
//! Parameters are kept as small expression trees so that angles such as
//! `π / 2^k` survive into the rendered output instead of being flattened
//! into decimals.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A numeric parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Division.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// `π / 2^k`, the angle of the `k`-th controlled phase in a Fourier transform.
    pub fn pi_over_power_of_two(k: u32) -> Self {
        if k == 0 {
            return ParameterExpression::Pi;
        }
        ParameterExpression::Pi / ParameterExpression::Constant(2f64.powi(k as i32))
    }

    /// Evaluate the expression.
    ///
    /// Division by zero yields an infinite or NaN value, as with plain `f64`.
    pub fn value(&self) -> f64 {
        match self {
            ParameterExpression::Constant(v) => *v,
            ParameterExpression::Pi => PI,
            ParameterExpression::Neg(e) => -e.value(),
            ParameterExpression::Add(a, b) => a.value() + b.value(),
            ParameterExpression::Sub(a, b) => a.value() - b.value(),
            ParameterExpression::Mul(a, b) => a.value() * b.value(),
            ParameterExpression::Div(a, b) => a.value() / b.value(),
        }
    }

    /// Structural negation.
    ///
    /// Constants are negated in place and an existing negation is unwrapped,
    /// so negating twice gives back an identical expression.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            ParameterExpression::Constant(v) => ParameterExpression::Constant(-v),
            ParameterExpression::Neg(e) => (**e).clone(),
            other => ParameterExpression::Neg(Box::new(other.clone())),
        }
    }

    /// Simplify the expression to a single constant.
    #[must_use]
    pub fn simplify(&self) -> Self {
        ParameterExpression::Constant(self.value())
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Pi => write!(f, "π"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Sub(a, b) => write!(f, "({a} - {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
            ParameterExpression::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::Constant(f64::from(value))
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParameterExpression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        ParameterExpression::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}
