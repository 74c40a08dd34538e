/// Element type of a cost matrix.
///
/// The solver keeps its working matrix implicitly as `cost - u[row] - v[col]`
/// and the column potentials can become negative, so only signed types
/// qualify.
pub trait Cost:
    nalgebra::Scalar
    + Copy
    + PartialOrd
    + num_traits::Zero
    + std::ops::Sub<Output = Self>
    + std::ops::SubAssign
    + std::ops::AddAssign
{
    /// Returns `false` for values the solver cannot order, such as NaN or the
    /// infinities.
    fn is_valid(&self) -> bool;

    /// Largest entry the solver accepts.
    ///
    /// Row potentials stay within `[0, max]` and column potentials within
    /// `[-max, max]`, so reduced entries never exceed twice the largest
    /// entry. Keeping entries at or below this bound rules out overflow.
    fn max_entry() -> Self;

    /// `self + other`, or `None` when the result is not representable.
    fn checked_add_cost(self, other: Self) -> Option<Self>;

    /// `self - other`, or `None` when the result is not representable.
    fn checked_sub_cost(self, other: Self) -> Option<Self>;

    /// Returns `true` when the value is strictly below zero.
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }
}

macro_rules! impl_cost_for_float {
    ($t:ty) => {
        impl Cost for $t {
            #[inline]
            fn is_valid(&self) -> bool {
                self.is_finite()
            }

            // a quarter leaves room for rounding in `cost - u - v`
            #[inline]
            fn max_entry() -> Self {
                <$t>::MAX / 4.0
            }

            #[inline]
            fn checked_add_cost(self, other: Self) -> Option<Self> {
                Some(self + other).filter(|x| x.is_finite())
            }

            #[inline]
            fn checked_sub_cost(self, other: Self) -> Option<Self> {
                Some(self - other).filter(|x| x.is_finite())
            }
        }
    };
}

macro_rules! impl_cost_for_int {
    ($t:ty) => {
        impl Cost for $t {
            #[inline]
            fn is_valid(&self) -> bool {
                true
            }

            #[inline]
            fn max_entry() -> Self {
                <$t>::MAX / 2
            }

            #[inline]
            fn checked_add_cost(self, other: Self) -> Option<Self> {
                self.checked_add(other)
            }

            #[inline]
            fn checked_sub_cost(self, other: Self) -> Option<Self> {
                self.checked_sub(other)
            }
        }
    };
}

impl_cost_for_float!(f32);
impl_cost_for_float!(f64);
impl_cost_for_int!(i32);
impl_cost_for_int!(i64);

/// Sums values in order, starting from zero. `None` on overflow.
pub(crate) fn total<T: Cost>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values
        .into_iter()
        .try_fold(T::zero(), |acc, x| acc.checked_add_cost(x))
}

/// Smallest value yielded, or `None` for an empty iterator.
pub(crate) fn minimum<T: Cost>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values
        .into_iter()
        .fold(None, |min, x| match min {
            Some(m) if m <= x => Some(m),
            _ => Some(x),
        })
}
