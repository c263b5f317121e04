//! Declarative macros for score boilerplate.

/// Generates `PartialOrd`, `Add`, `Sub`, `Neg` and `AddAssign` field by field.
///
/// The constructor must accept fields in the order they are listed.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardMediumSoftScore { hard, medium, soft } => of);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::$ctor( $(self.$field + other.$field),+ )
            }
        }

        impl std::ops::AddAssign for $type {
            fn add_assign(&mut self, other: Self) {
                $( self.$field += other.$field; )+
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::$ctor( $(self.$field - other.$field),+ )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor( $(-self.$field),+ )
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($type::ZERO, |acc, s| acc + s)
            }
        }
    };
}

/// Generates a `ParseableScore` impl for the `"Xhard/Ymedium/Zsoft"` format.
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                let s = s.trim();
                let mut parts = s.split('/');
                $(
                    let $field = {
                        let part = parts
                            .next()
                            .ok_or_else(|| $crate::score::traits::ScoreParseError::MissingLevel {
                                input: s.to_string(),
                                level: $suffix,
                            })?
                            .trim();
                        let digits = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::traits::ScoreParseError::MissingLevel {
                                input: s.to_string(),
                                level: $suffix,
                            }
                        })?;
                        digits.parse::<i64>().map_err(|_| {
                            $crate::score::traits::ScoreParseError::InvalidNumber {
                                input: s.to_string(),
                                level: $suffix,
                            }
                        })?
                    };
                )+
                if parts.next().is_some() {
                    return Err($crate::score::traits::ScoreParseError::TrailingInput(
                        s.to_string(),
                    ));
                }
                Ok($type::$ctor( $($field),+ ))
            }
        }
    };
}
