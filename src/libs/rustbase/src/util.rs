/*
 * Copyright (C) 2018, Nils Asmussen <nils@os.inf.tu-dresden.de>
 * Economic rights: Technische Universitaet Dresden (Germany)
 *
 * This file is part of M3 (Microkernel-based SysteM for Heterogeneous Manycores).
 *
 * M3 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 2 as
 * published by the Free Software Foundation.
 *
 * M3 is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License version 2 for more details.
 */

//! Contains utility functions and macros

pub fn round_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}

pub fn is_pow2(value: usize) -> bool {
    value != 0 && (value & (value - 1)) == 0
}

/// Returns the range `[off, off + len)` if it fits into an object of size `size`
pub fn checked_range(off: usize, len: usize, size: usize) -> Option<std::ops::Range<usize>> {
    match off.checked_add(len) {
        Some(end) if end <= size => Some(off..end),
        _                        => None,
    }
}

#[macro_export]
macro_rules! __int_enum_impl {
    (
        struct $Name:ident: $T:ty {
            $(
                $(#[$inner:meta])*
                const $Flag:ident = $value:expr;
            )+
        }
    ) => (
        impl $Name {
            $(
                $(#[$inner])*
                #[allow(dead_code)]
                pub const $Flag: $Name = $Name { val: $value };
            )+

            /// Returns the name of the constant, or "??" for unknown values
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                $(
                    if self.val == $value {
                        return stringify!($Flag);
                    }
                )+
                "??"
            }
        }

        impl ::std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl From<$T> for $Name {
            fn from(val: $T) -> Self {
                $Name { val: val }
            }
        }
    )
}

/// Defines a struct with a set of integer constants, similar to a C enum
///
/// In contrast to a Rust enum, every value of the underlying type is a valid instance, which
/// makes the conversion from raw values infallible.
#[macro_export]
macro_rules! int_enum {
    (
        $(#[$outer:meta])*
        pub struct $Name:ident: $T:ty {
            $(
                $(#[$inner:meta])*
                const $Flag:ident = $value:expr;
            )+
        }
    ) => (
        $(#[$outer])*
        #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
        pub struct $Name {
            pub val: $T,
        }

        $crate::__int_enum_impl! {
            struct $Name : $T {
                $(
                    $(#[$inner])*
                    const $Flag = $value;
                )+
            }
        }
    );
    (
        $(#[$outer:meta])*
        struct $Name:ident: $T:ty {
            $(
                $(#[$inner:meta])*
                const $Flag:ident = $value:expr;
            )+
        }
    ) => (
        $(#[$outer])*
        #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
        struct $Name {
            pub val: $T,
        }

        $crate::__int_enum_impl! {
            struct $Name : $T {
                $(
                    $(#[$inner])*
                    const $Flag = $value;
                )+
            }
        }
    )
}
