use std::fmt::{Display, Formatter};

/// Every protocol upgrade the engine tracks, one entry per independently
/// named improvement proposal.
///
/// The declaration order is canonical: it is the order `transitions` reports
/// and the order the validator enforces monotonicity over. ECIP entries sit
/// between the eip160 and eip161 groups because the networks that use them
/// scheduled them there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Upgrade {
    Eip2,
    Eip7,
    Eip150,
    Eip155,
    Eip160,
    Ecip1010Pause,
    Ecip1017,
    Eip161abc,
    Eip161d,
    Eip170,
    Eip100,
    Eip140,
    Eip198,
    Eip211,
    Eip212,
    Eip213,
    Eip214,
    Eip649,
    Eip658,
    Eip145,
    Eip1014,
    Eip1052,
    Eip1234,
    Eip1283,
}

impl Upgrade {
    /// All upgrades in canonical order.
    pub const ALL: [Self; 24] = [
        Self::Eip2,
        Self::Eip7,
        Self::Eip150,
        Self::Eip155,
        Self::Eip160,
        Self::Ecip1010Pause,
        Self::Ecip1017,
        Self::Eip161abc,
        Self::Eip161d,
        Self::Eip170,
        Self::Eip100,
        Self::Eip140,
        Self::Eip198,
        Self::Eip211,
        Self::Eip212,
        Self::Eip213,
        Self::Eip214,
        Self::Eip649,
        Self::Eip658,
        Self::Eip145,
        Self::Eip1014,
        Self::Eip1052,
        Self::Eip1234,
        Self::Eip1283,
    ];

    /// Upgrade pairs that always activate together; a representation where
    /// both sides are set to different heights is inconsistent.
    pub const PAIRED: [(Self, Self); 2] =
        [(Self::Eip2, Self::Eip7), (Self::Eip161abc, Self::Eip161d)];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eip2 => "eip2",
            Self::Eip7 => "eip7",
            Self::Eip150 => "eip150",
            Self::Eip155 => "eip155",
            Self::Eip160 => "eip160",
            Self::Ecip1010Pause => "ecip1010pause",
            Self::Ecip1017 => "ecip1017",
            Self::Eip161abc => "eip161abc",
            Self::Eip161d => "eip161d",
            Self::Eip170 => "eip170",
            Self::Eip100 => "eip100",
            Self::Eip140 => "eip140",
            Self::Eip198 => "eip198",
            Self::Eip211 => "eip211",
            Self::Eip212 => "eip212",
            Self::Eip213 => "eip213",
            Self::Eip214 => "eip214",
            Self::Eip649 => "eip649",
            Self::Eip658 => "eip658",
            Self::Eip145 => "eip145",
            Self::Eip1014 => "eip1014",
            Self::Eip1052 => "eip1052",
            Self::Eip1234 => "eip1234",
            Self::Eip1283 => "eip1283",
        }
    }
}

impl Display for Upgrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_has_no_duplicates() {
        for (i, a) in Upgrade::ALL.iter().enumerate() {
            for b in &Upgrade::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn names_are_lowercase_and_unique() {
        let mut names: Vec<_> = Upgrade::ALL.iter().map(|u| u.name()).collect();
        assert!(names.iter().all(|n| *n == n.to_lowercase()));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Upgrade::ALL.len());
    }
}
