//! The hash + equals capability.
//!
//! A value implements [`Equality`] to participate as a `Map`/`Set` key or in
//! structural comparisons. The rules:
//!
//! - Integers hash to themselves (widened to `u64`).
//! - Text hashes via the workspace's standard hasher (`FxHasher`).
//! - Collections hash structurally, so nested collections compare by value.
//!
//! Consistency law: if `a.equals(b)` then `a.hash_code() == b.hash_code()`.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Hash + equals contract for collection keys and structural comparison.
pub trait Equality {
    /// Deterministic structural hash.
    fn hash_code(&self) -> u64;

    /// Structural equality. Must agree with `hash_code`.
    fn equals(&self, other: &Self) -> bool;
}

fn hash_text(s: &str) -> u64 {
    let mut hasher = FxHasher::default();
    s.hash(&mut hasher);
    hasher.finish()
}

macro_rules! int_equality {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Equality for $ty {
                #[allow(clippy::cast_sign_loss, clippy::cast_lossless)]
                fn hash_code(&self) -> u64 {
                    *self as u64
                }
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

int_equality!(i32, i64, u32, u64, usize);

impl Equality for bool {
    fn hash_code(&self) -> u64 {
        u64::from(*self)
    }
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equality for char {
    fn hash_code(&self) -> u64 {
        u64::from(*self)
    }
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equality for String {
    fn hash_code(&self) -> u64 {
        hash_text(self)
    }
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equality for &str {
    fn hash_code(&self) -> u64 {
        hash_text(self)
    }
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equality for () {
    fn hash_code(&self) -> u64 {
        0
    }
    fn equals(&self, _other: &Self) -> bool {
        true
    }
}

impl<A: Equality, B: Equality> Equality for (A, B) {
    fn hash_code(&self) -> u64 {
        // Same order-sensitive mixing as Vector
        let mut acc: u64 = 1;
        acc = acc.wrapping_mul(17) ^ self.0.hash_code();
        acc = acc.wrapping_mul(17) ^ self.1.hash_code();
        acc
    }
    fn equals(&self, other: &Self) -> bool {
        self.0.equals(&other.0) && self.1.equals(&other.1)
    }
}
