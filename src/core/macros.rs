/******************************************\
|==========================================|
|            Enum Conversions              |
|==========================================|
\******************************************/

/// `from_unchecked` and `index` for a fieldless enum with a `NUM` constant.
///
/// With a second argument the conversion takes that primitive instead of `u8`
/// and is safe to call: every value of the primitive the crate produces has a
/// matching variant.
#[macro_export]
macro_rules! enum_conversions {
    ($name:ident) => {
        impl $name {
            #[doc = concat!("The ", stringify!($name), " with discriminant `index`")]
            /// ## Safety
            /// `index` must be below `NUM`.
            #[inline]
            pub const unsafe fn from_unchecked(index: u8) -> Self {
                debug_assert!(index < Self::NUM as u8, "discriminant out of range");
                unsafe { std::mem::transmute(index) }
            }

            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }
        }
    };

    ($name:ident, $repr:ty) => {
        impl $name {
            #[doc = concat!("The ", stringify!($name), " with discriminant `raw`")]
            #[inline]
            pub const fn from_unchecked(raw: $repr) -> Self {
                unsafe { std::mem::transmute(raw) }
            }
        }
    };
}

/// `iter()` over every variant in discriminant order
#[macro_export]
macro_rules! enum_iter {
    ($name:ident) => {
        impl $name {
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
                (0..Self::NUM as u8).map(|i| unsafe { Self::from_unchecked(i) })
            }
        }
    };
}

/******************************************\
|==========================================|
|            Newtype Operators             |
|==========================================|
\******************************************/

/// One binary operator on a single-field tuple struct, plus its assigning form.
/// The `self` arm pairs the struct with itself, the second arm with a primitive.
#[macro_export]
macro_rules! newtype_op {
    ($name:ident, self, $op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl std::ops::$op_trait for $name {
            type Output = Self;

            #[inline]
            fn $op_fn(self, rhs: Self) -> Self {
                Self(self.0 $op rhs.0)
            }
        }

        impl std::ops::$assign_trait for $name {
            #[inline]
            fn $assign_fn(&mut self, rhs: Self) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };

    ($name:ident, $rhs:ty, $op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl std::ops::$op_trait<$rhs> for $name {
            type Output = Self;

            #[inline]
            fn $op_fn(self, rhs: $rhs) -> Self {
                Self(self.0 $op rhs)
            }
        }

        impl std::ops::$assign_trait<$rhs> for $name {
            #[inline]
            fn $assign_fn(&mut self, rhs: $rhs) {
                self.0 = self.0 $op rhs;
            }
        }
    };
}

/// `&`, `|` and `^` between two values of a set-like newtype
#[macro_export]
macro_rules! bitwise_ops {
    ($name:ident) => {
        $crate::newtype_op!($name, self, BitAnd, bitand, BitAndAssign, bitand_assign, &);
        $crate::newtype_op!($name, self, BitOr, bitor, BitOrAssign, bitor_assign, |);
        $crate::newtype_op!($name, self, BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
    };
}

/// Shifts by a primitive amount, and complement
#[macro_export]
macro_rules! shift_ops {
    ($name:ident, $amount:ty) => {
        $crate::newtype_op!($name, $amount, Shl, shl, ShlAssign, shl_assign, <<);
        $crate::newtype_op!($name, $amount, Shr, shr, ShrAssign, shr_assign, >>);

        impl std::ops::Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self {
                Self(!self.0)
            }
        }
    };
}
