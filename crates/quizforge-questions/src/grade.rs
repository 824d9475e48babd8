//! Age → difficulty tier mapping.

use std::fmt;

/// A difficulty bucket derived from the player's age.
///
/// The tier decides which question *kinds* a generator may draw from:
/// algebra needs tier 7, trigonometry tier 9, and so on. It never changes
/// during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeTier {
    /// School grade 4 through 12.
    Grade(u8),
    /// Anyone 19 or older.
    University,
}

impl GradeTier {
    /// Maps an age to its tier.
    ///
    /// ```text
    /// age:  <8 8 9 10 11 12 13 14 15 16 17 18 19+
    /// tier:  4 4 4  5  6  7  7  8  9 10 11 12 university
    /// ```
    pub fn from_age(age: u32) -> Self {
        match age {
            19.. => Self::University,
            18 => Self::Grade(12),
            17 => Self::Grade(11),
            16 => Self::Grade(10),
            15 => Self::Grade(9),
            14 => Self::Grade(8),
            12 | 13 => Self::Grade(7),
            11 => Self::Grade(6),
            10 => Self::Grade(5),
            _ => Self::Grade(4),
        }
    }

    /// Numeric level used for unlock checks. University counts as 13.
    pub fn level(self) -> u8 {
        match self {
            Self::Grade(n) => n,
            Self::University => 13,
        }
    }

    /// Display label: the grade number, or `"university"`.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GradeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grade(n) => write!(f, "{n}"),
            Self::University => f.write_str("university"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_age_boundaries() {
        assert_eq!(GradeTier::from_age(8), GradeTier::Grade(4));
        assert_eq!(GradeTier::from_age(10), GradeTier::Grade(5));
        assert_eq!(GradeTier::from_age(12), GradeTier::Grade(7));
        assert_eq!(GradeTier::from_age(13), GradeTier::Grade(7));
        assert_eq!(GradeTier::from_age(18), GradeTier::Grade(12));
        assert_eq!(GradeTier::from_age(19), GradeTier::University);
        assert_eq!(GradeTier::from_age(25), GradeTier::University);
    }

    #[test]
    fn test_from_age_below_eight_is_grade_four() {
        assert_eq!(GradeTier::from_age(5), GradeTier::Grade(4));
        assert_eq!(GradeTier::from_age(0), GradeTier::Grade(4));
    }

    #[test]
    fn test_from_age_never_decreases_with_age() {
        let mut previous = 0;
        for age in 0..=99 {
            let level = GradeTier::from_age(age).level();
            assert!(level >= previous, "tier dropped at age {age}");
            previous = level;
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(GradeTier::Grade(9).label(), "9");
        assert_eq!(GradeTier::University.label(), "university");
    }
}
