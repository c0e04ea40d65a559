use bounded::Index;
use core::{
    fmt,
    fmt::{
        Debug,
        Display,
        Formatter,
    },
    ops::Not,
};

/// The polarity of a literal or of a variable's current assignment.
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Sign(bool);

impl Debug for Sign {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.into_bool() {
            true => write!(f, "Sign::True"),
            false => write!(f, "Sign::False"),
        }
    }
}

impl Sign {
    /// Asserts the variable as positive (`true`).
    pub const TRUE: Self = Self(true);
    /// Asserts the variable as negative (`false`).
    pub const FALSE: Self = Self(false);

    /// Creates a sign from a `bool`: `true` becomes [`Sign::TRUE`].
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        Self(value)
    }

    /// Converts the sign into a `bool` value.
    #[inline]
    pub fn into_bool(self) -> bool {
        self.0
    }
}

impl Not for Sign {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// A dense, zero-based internal handle for a variable discovered during ingestion.
///
/// Distinct from the externally supplied (arbitrary, non-contiguous) variable
/// identifiers callers pass to [`crate::Solver::add_clause`]; see
/// [`crate::VariableRegistry`] for the mapping between the two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Variable {
    value: u32,
}

impl Variable {
    /// The maximum number of unique variables this solver supports.
    pub const MAX_LEN: usize = (u32::MAX >> 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index < Self::MAX_LEN, "too many variables for this solver");
        Self {
            value: index as u32,
        }
    }

    #[inline]
    pub(crate) fn into_index(self) -> usize {
        self.value as usize
    }

    /// Returns the literal for this variable with the given polarity.
    #[inline]
    pub fn into_literal(self, sign: Sign) -> Literal {
        Literal {
            value: (self.value << 1) | sign.into_bool() as u32,
        }
    }
}

impl Index for Variable {
    #[inline]
    fn from_index(index: usize) -> Self {
        Variable::from_index(index)
    }

    #[inline]
    fn into_index(self) -> usize {
        self.into_index()
    }
}

/// A literal: a variable together with a polarity.
///
/// Packs the dense variable index and sign into a single `u32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Literal {
    value: u32,
}

impl Literal {
    /// Creates a new literal for the given variable and polarity.
    #[inline]
    pub fn new(variable: Variable, sign: Sign) -> Self {
        variable.into_literal(sign)
    }

    /// Returns the variable this literal refers to.
    #[inline]
    pub fn variable(self) -> Variable {
        Variable {
            value: self.value >> 1,
        }
    }

    /// Returns the polarity asserted by this literal.
    #[inline]
    pub fn sign(self) -> Sign {
        Sign((self.value & 1) != 0)
    }

    /// Returns `true` if this literal is satisfied when its variable holds `value`.
    #[inline]
    pub fn is_satisfied_by(self, value: Sign) -> bool {
        self.sign() == value
    }
}

impl Not for Literal {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self {
            value: self.value ^ 1,
        }
    }
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Literal({})", self)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.sign() == Sign::FALSE {
            write!(f, "-")?;
        }
        write!(f, "v{}", self.variable().into_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_round_trips() {
        let var = Variable::from_index(3);
        let pos = var.into_literal(Sign::TRUE);
        let neg = !pos;
        assert_eq!(neg.variable(), var);
        assert_eq!(neg.sign(), Sign::FALSE);
        assert_eq!(!neg, pos);
    }

    #[test]
    fn satisfaction_depends_on_sign() {
        let var = Variable::from_index(0);
        let pos = var.into_literal(Sign::TRUE);
        let neg = var.into_literal(Sign::FALSE);
        assert!(pos.is_satisfied_by(Sign::TRUE));
        assert!(!pos.is_satisfied_by(Sign::FALSE));
        assert!(neg.is_satisfied_by(Sign::FALSE));
        assert!(!neg.is_satisfied_by(Sign::TRUE));
    }
}
