//! Pool slot handles and list ranges.

use std::fmt;

use cpc_alloc::PoolKey;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl PoolKey for $name {
            #[inline]
            fn from_slot(slot: u32) -> Self {
                $name(slot)
            }

            #[inline]
            fn slot(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

define_id!(
    /// Expression node in an [`AstArena`](crate::AstArena).
    ExprId
);
define_id!(
    /// Statement node in an [`AstArena`](crate::AstArena).
    StmtId
);
define_id!(
    /// Type descriptor in a [`TypeArena`](crate::TypeArena).
    TypeId
);

macro_rules! define_range {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn len(self) -> usize {
                self.len as usize
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn to_range(self) -> std::ops::Range<usize> {
                self.start as usize..(self.start + self.len) as usize
            }
        }
    };
}

define_range!(
    /// Exact-length list of expressions (call arguments).
    ExprRange
);
define_range!(
    /// Exact-length list of statements (block bodies).
    StmtRange
);
define_range!(
    /// Exact-length list of types (function parameters).
    TypeRange
);
define_range!(
    /// Exact-length list of names (parameter names, enum variants).
    NameRange
);
define_range!(
    /// Exact-length list of struct fields.
    FieldRange
);
