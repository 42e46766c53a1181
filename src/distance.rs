use std::fmt;
use std::ops::Add;

/// A route length in km, or `Infinity` when no route exists.
///
/// Finite lengths are summed as `u128`, so adding up `usize` route weights
/// along any path cannot overflow into `Infinity`. `Infinity` absorbs
/// addition and orders after every finite value, so it can seed a Dijkstra
/// distance table directly.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Distance {
    Finite(u128),
    Infinity
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn is_finite(&self) -> bool {
        match self {
            Distance::Finite(_) => true,
            Distance::Infinity => false
        }
    }

    pub fn km(&self) -> Option<u128> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Infinity => None
        }
    }
}

impl From<usize> for Distance {
    fn from(km: usize) -> Self {
        Distance::Finite(km as u128)
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.checked_add(b)
                .map_or(Distance::Infinity, Distance::Finite),
            _ => Distance::Infinity
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{} km", d),
            Distance::Infinity => write!(f, "N/A (route not found)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Distance;

    #[test]
    fn infinity_absorbs_addition() {
        assert_eq!(Distance::Finite(3) + Distance::Finite(4), Distance::Finite(7));
        assert_eq!(Distance::Finite(3) + Distance::Infinity, Distance::Infinity);
        assert_eq!(Distance::Infinity + Distance::ZERO, Distance::Infinity);
        assert_eq!(Distance::Finite(u128::MAX) + Distance::Finite(1), Distance::Infinity);
    }

    #[test]
    fn infinity_is_largest() {
        assert!(Distance::Finite(u128::MAX) < Distance::Infinity);
        assert!(Distance::ZERO < Distance::Finite(1));
        assert_eq!(Distance::Infinity.km(), None);
        assert_eq!(Distance::from(12).km(), Some(12));
    }

    #[test]
    fn longest_routes_still_add_up() {
        let longest = Distance::from(usize::MAX);
        assert_eq!(longest + Distance::from(1), Distance::Finite(usize::MAX as u128 + 1));
        assert!((longest + longest + longest).is_finite());
    }

    #[test]
    fn display() {
        assert_eq!(Distance::Finite(8).to_string(), "8 km");
        assert!(!Distance::Infinity.is_finite());
        assert_eq!(Distance::Infinity.to_string(), "N/A (route not found)");
    }
}
