//! Arbitrary-precision decimals
//!
//! [`Decimal`] is an exact scaled integer, `mantissa × 10^-scale`, used by
//! the integer and fixed-point coders for bound checks and rounding. No
//! binary floating-point arithmetic takes place anywhere in this module;
//! `f64` inputs are converted through their shortest round-trip decimal
//! rendering, so `3.15_f64` becomes exactly `3.15`.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, Zero};

const CACHED_POWERS: usize = 96;

/// Largest decimal exponent accepted from text, well beyond any word width
const MAX_EXPONENT: i64 = 1024;

lazy_static! {
    static ref POW10: Vec<BigInt> = {
        let mut acc = BigInt::from(1u8);
        let mut v = Vec::with_capacity(CACHED_POWERS);
        for _ in 0..CACHED_POWERS {
            v.push(acc.clone());
            acc *= 10u8;
        }
        v
    };
}

/// Returns `10^n` as a [`BigInt`]
#[must_use]
pub fn pow10(n: u32) -> BigInt {
    match POW10.get(n as usize) {
        Some(p) => p.clone(),
        None => num_traits::pow(BigInt::from(10u8), n as usize),
    }
}

/// Error returned when text or a float cannot be read as a [`Decimal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// Text is not of the form `[+-]digits[.digits][e[+-]digits]`
    Malformed(String),
    /// Float input was NaN or infinite
    NonFinite,
}

impl Display for ParseDecimalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseDecimalError::Malformed(s) => write!(f, "`{s}` is not a decimal number"),
            ParseDecimalError::NonFinite => write!(f, "non-finite float is not a decimal number"),
        }
    }
}

impl Error for ParseDecimalError {}

/// Exact decimal number `mantissa × 10^-scale`.
///
/// Values are kept normalized (no trailing zero digits in the mantissa
/// while `scale > 0`), so that structural equality coincides with numeric
/// equality: `12.70 == 12.7`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    /// Constructs the decimal `mantissa × 10^-scale`.
    #[must_use]
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        let mut ret = Self { mantissa, scale };
        ret.normalize();
        ret
    }

    fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            self.scale = 0;
            return;
        }
        let ten = BigInt::from(10u8);
        while self.scale > 0 {
            let (q, r) = self.mantissa.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            self.mantissa = q;
            self.scale -= 1;
        }
    }

    /// Returns the unscaled integer digits
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Returns the number of fractional decimal digits
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns `true` if the value has no fractional part
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    /// Returns the value as an integer, or `None` if it has a fractional part
    #[must_use]
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.mantissa.clone())
    }

    /// Multiplies the value by `10^exp`.
    #[must_use]
    pub fn scale_up(&self, exp: u32) -> Self {
        if exp <= self.scale {
            Self::new(self.mantissa.clone(), self.scale - exp)
        } else {
            Self::new(&self.mantissa * pow10(exp - self.scale), 0)
        }
    }

    /// Divides the value by `10^exp`.
    #[must_use]
    pub fn scale_down(&self, exp: u32) -> Self {
        Self::new(self.mantissa.clone(), self.scale + exp)
    }

    /// Rounds to the nearest integer, with ties going to the integer of
    /// larger magnitude: `2.5 -> 3`, `-2.5 -> -3`, `-2.4 -> -2`.
    #[must_use]
    pub fn round_half_away(&self) -> BigInt {
        if self.scale == 0 {
            return self.mantissa.clone();
        }
        let unit = pow10(self.scale);
        // truncating division, remainder carries the sign of the mantissa
        let (q, r) = self.mantissa.div_rem(&unit);
        if r.abs() * 2u8 >= unit {
            match self.mantissa.sign() {
                Sign::Minus => q - 1u8,
                _ => q + 1u8,
            }
        } else {
            q
        }
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

macro_rules! impl_from_int {
    ( $( $t:ty ),+ ) => {
        $( impl From<$t> for Decimal {
            fn from(value: $t) -> Self {
                Self::new(BigInt::from(value), 0)
            }
        } )+
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl TryFrom<f64> for Decimal {
    type Error = ParseDecimalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ParseDecimalError::NonFinite);
        }
        // `Display` for f64 is the shortest round-trip rendering and never
        // uses exponent notation
        Self::from_str(&value.to_string())
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseDecimalError::Malformed(s.to_owned());
        let text = s.trim();
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (num, exp) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(ix) => {
                let exp: i64 = body[ix + 1..].parse().map_err(|_| malformed())?;
                (&body[..ix], exp)
            }
            None => (body, 0),
        };
        let (int_part, frac_part) = match num.split_once('.') {
            Some((i, f)) => (i, f),
            None => (num, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let digits = format!("{int_part}{frac_part}");
        let mut mantissa = BigInt::from_str(&digits).map_err(|_| malformed())?;
        if negative {
            mantissa = -mantissa;
        }
        let scale = (frac_part.len() as i64)
            .checked_sub(exp)
            .ok_or_else(malformed)?;
        if scale.abs() > MAX_EXPONENT {
            return Err(malformed());
        }
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| malformed())?;
            Ok(Self::new(mantissa, scale))
        } else {
            let up = u32::try_from(-scale).map_err(|_| malformed())?;
            Ok(Self::new(mantissa * pow10(up), 0))
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.mantissa.cmp(&other.mantissa),
            Ordering::Less => {
                (&self.mantissa * pow10(other.scale - self.scale)).cmp(&other.mantissa)
            }
            Ordering::Greater => self
                .mantissa
                .cmp(&(&other.mantissa * pow10(self.scale - other.scale))),
        }
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = self.mantissa.abs().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl std::fmt::Debug for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decimal({})", self)
    }
}
