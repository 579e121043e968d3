//! Grammatical roles a verb can fill.

use std::fmt;

/// A grammatical slot in a sentence.
///
/// `What` is the direct object; every other role is introduced by its
/// preposition keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// The direct object.
    What,
    /// Introduced by `FROM`.
    From,
    /// Introduced by `TO`.
    To,
    /// Introduced by `USING`.
    Using,
    /// Introduced by `WITH`.
    With,
}

impl Role {
    /// All roles, in bit order.
    pub const ALL: [Self; 5] = [Self::What, Self::From, Self::To, Self::Using, Self::With];

    /// The preposition keyword that introduces this role.
    #[must_use]
    pub const fn preposition(self) -> Option<&'static str> {
        match self {
            Self::What => None,
            Self::From => Some("FROM"),
            Self::To => Some("TO"),
            Self::Using => Some("USING"),
            Self::With => Some("WITH"),
        }
    }

    /// Looks up the role introduced by a preposition (case-insensitive).
    #[must_use]
    pub fn from_preposition(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.preposition().is_some_and(|p| p.eq_ignore_ascii_case(word)))
    }

    /// Human-readable role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::What => "What",
            Self::From => "From",
            Self::To => "To",
            Self::Using => "Using",
            Self::With => "With",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of roles, stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Adds a role. Returns false if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        let had = self.contains(role);
        self.0 |= role.bit();
        !had
    }

    /// Removes a role.
    pub fn remove(&mut self, role: Role) {
        self.0 &= !role.bit();
    }

    /// Checks membership.
    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Number of roles in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no role is present.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every role in `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates roles in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(Role::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
