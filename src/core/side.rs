use anyhow::{bail, Result};
use colored::Colorize;
use num_derive::ToPrimitive;
use num_traits::ToPrimitive;
use std::fmt;
use std::ops::{Index, IndexMut, Not};
use std::str::FromStr;

/// Player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToPrimitive)]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    pub fn all() -> [Side; 2] {
        [Side::Upper, Side::Lower]
    }

    /// +1 for Upper, -1 for Lower; converts Upper-relative scores to this side's view
    pub fn sign(&self) -> i32 {
        match self {
            Side::Upper => 1,
            Side::Lower => -1,
        }
    }

    pub fn index(self) -> usize {
        // two unit variants always fit
        ToPrimitive::to_usize(&self).unwrap_or_default()
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::Upper => Side::Lower,
            Side::Lower => Side::Upper,
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upper" => Ok(Side::Upper),
            "lower" => Ok(Side::Lower),
            _ => bail!("Unknown side: {}", s),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Upper => write!(f, "{}", "upper".bright_blue()),
            Side::Lower => write!(f, "{}", "lower".bright_red()),
        }
    }
}

/// Array indexed by side
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SideArray<T> {
    pub values: [T; 2],
}

impl<T> SideArray<T> {
    pub fn new(upper: T, lower: T) -> Self {
        Self {
            values: [upper, lower],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, index: Side) -> &Self::Output {
        &self.values[index.index()]
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self.values[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_index() {
        assert_eq!(Side::Upper.index(), 0);
        assert_eq!(Side::Lower.index(), 1);
        assert_eq!(!Side::Upper, Side::Lower);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("upper".parse::<Side>().unwrap(), Side::Upper);
        assert_eq!("lower".parse::<Side>().unwrap(), Side::Lower);
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_array() {
        let mut array = SideArray::new(5, 10);
        assert_eq!(array[Side::Upper], 5);
        assert_eq!(array[Side::Lower], 10);

        array[Side::Upper] = 15;
        for v in array.iter_mut() {
            *v *= 2;
        }
        let values: Vec<_> = array.iter().copied().collect();
        assert_eq!(values, vec![30, 20]);
    }
}
