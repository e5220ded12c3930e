//! Role capability bits.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// A single named capability.
///
/// Wire format of the stored mask: `i32`, one power-of-two bit per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    PublishBlog = 1,
    AddInstitution = 2,
    DeleteInstitution = 4,
    ViewInstitution = 8,
    UpdateInstitution = 16,
}

impl Permission {
    pub const ALL: [Permission; 5] = [
        Self::PublishBlog,
        Self::AddInstitution,
        Self::DeleteInstitution,
        Self::ViewInstitution,
        Self::UpdateInstitution,
    ];

    pub fn bit(self) -> i32 {
        self as i32
    }
}

/// A set of [`Permission`]s stored as an integer bitmask.
///
/// Mutation uses bitwise OR / AND-NOT, so adding or removing a union whose
/// bits are only partly set never double-counts.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Permissions(i32);

impl Permissions {
    pub const NONE: Self = Self(0);

    const KNOWN_BITS: i32 = 1 | 2 | 4 | 8 | 16;

    /// Build from an optional stored value. `None` (unset or null) means no permissions.
    pub fn new(initial: Option<i32>) -> Self {
        initial.map(Self::from_bits_truncate).unwrap_or_default()
    }

    pub fn all() -> Self {
        Self(Self::KNOWN_BITS)
    }

    /// Returns `None` if `bits` carries anything outside the named permissions.
    pub fn from_bits(bits: i32) -> Option<Self> {
        (bits & !Self::KNOWN_BITS == 0).then_some(Self(bits))
    }

    /// Drops bits that do not correspond to a named permission.
    pub fn from_bits_truncate(bits: i32) -> Self {
        Self(bits & Self::KNOWN_BITS)
    }

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Submask test: true iff every bit of `perms` is set.
    pub fn has(self, perms: impl Into<Permissions>) -> bool {
        let perms = perms.into();
        self.0 & perms.0 == perms.0
    }

    pub fn add(&mut self, perms: impl Into<Permissions>) {
        self.0 |= perms.into().0;
    }

    pub fn remove(&mut self, perms: impl Into<Permissions>) {
        self.0 &= !perms.into().0;
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Named permissions currently set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |p| self.has(*p))
    }
}

impl From<Permission> for Permissions {
    fn from(p: Permission) -> Self {
        Self(p.bit())
    }
}

impl FromIterator<Permission> for Permissions {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut perms = Self::NONE;
        for p in iter {
            perms.add(p);
        }
        perms
    }
}

impl BitOr for Permission {
    type Output = Permissions;

    fn bitor(self, rhs: Self) -> Permissions {
        Permissions(self.bit() | rhs.bit())
    }
}

impl BitOr<Permission> for Permissions {
    type Output = Permissions;

    fn bitor(self, rhs: Permission) -> Permissions {
        Permissions(self.0 | rhs.bit())
    }
}

impl BitOr for Permissions {
    type Output = Permissions;

    fn bitor(self, rhs: Self) -> Permissions {
        Permissions(self.0 | rhs.0)
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
