//! Store roles and per-role value tables
//!
//! Every store employee holds exactly one `Role`. Values keyed by role
//! (headcount, subsidy) live in a `RoleTable`, which always has an entry for
//! every role so lookups can never miss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position held by a store employee
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Staff,
    Supervisor,
    Consultant,
    RegionalManager,
    CityManager,
}

impl Role {
    /// All roles in display order
    pub const ALL: [Role; 5] = [
        Role::Staff,
        Role::Supervisor,
        Role::Consultant,
        Role::RegionalManager,
        Role::CityManager,
    ];

    /// Stable snake_case key, matching the serialized form
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Supervisor => "supervisor",
            Role::Consultant => "consultant",
            Role::RegionalManager => "regional_manager",
            Role::CityManager => "city_manager",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::Staff => "Staff",
            Role::Supervisor => "Supervisor",
            Role::Consultant => "Consultant",
            Role::RegionalManager => "Regional manager",
            Role::CityManager => "City manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.key() == normalized)
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

/// A value for every `Role`
///
/// Serialized as an object keyed by the role's snake_case name; missing keys
/// fall back to `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTable<T> {
    pub staff: T,
    pub supervisor: T,
    pub consultant: T,
    pub regional_manager: T,
    pub city_manager: T,
}

impl<T: Copy> RoleTable<T> {
    /// Build a table from a function of the role
    pub fn from_fn(mut f: impl FnMut(Role) -> T) -> Self {
        Self {
            staff: f(Role::Staff),
            supervisor: f(Role::Supervisor),
            consultant: f(Role::Consultant),
            regional_manager: f(Role::RegionalManager),
            city_manager: f(Role::CityManager),
        }
    }

    #[must_use]
    pub fn get(&self, role: Role) -> T {
        match role {
            Role::Staff => self.staff,
            Role::Supervisor => self.supervisor,
            Role::Consultant => self.consultant,
            Role::RegionalManager => self.regional_manager,
            Role::CityManager => self.city_manager,
        }
    }

    pub fn set(&mut self, role: Role, value: T) {
        match role {
            Role::Staff => self.staff = value,
            Role::Supervisor => self.supervisor = value,
            Role::Consultant => self.consultant = value,
            Role::RegionalManager => self.regional_manager = value,
            Role::CityManager => self.city_manager = value,
        }
    }

    /// Iterate `(role, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Role, T)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

impl RoleTable<i64> {
    /// Sum of all entries (negative entries are rejected by validation
    /// before this is used in any calculation)
    #[must_use]
    pub fn total(&self) -> i64 {
        self.iter().map(|(_, count)| count).sum()
    }
}
