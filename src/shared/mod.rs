//! Shared newtypes and utilities used across all domain modules.
//!
//! The identifier types serialize as plain strings and `Won` as a plain integer,
//! so they can sit directly in catalog JSON and flow snapshots.

pub mod fmt;

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ─── MenuItemId ──────────────────────────────────────────────────────────────

/// Identifier of a menu catalog entry (e.g. `"bbq-olive"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(String);

impl MenuItemId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MenuItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MenuItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── CityId ──────────────────────────────────────────────────────────────────

/// Identifier of a city catalog entry (e.g. `"seoul"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(String);

impl CityId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Won ─────────────────────────────────────────────────────────────────────

/// An amount in whole Korean won. There are no minor units.
///
/// Arithmetic saturates instead of overflowing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Won(u64);

impl Won {
    pub const ZERO: Won = Won(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Won {
        Won(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Add for Won {
    type Output = Won;

    fn add(self, rhs: Won) -> Won {
        Won(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, rhs: Won) {
        *self = *self + rhs;
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Won {
        iter.fold(Won::ZERO, Add::add)
    }
}

impl From<u64> for Won {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Won {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₩{}", fmt::display_amount(self.0))
    }
}
