use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an identifier from a route segment or string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

numeric_id!(
    /// Unique identifier for a signed-in user
    UserId
);
numeric_id!(
    /// Unique identifier for a Subject
    SubjectId
);
numeric_id!(
    /// Unique identifier for a Topic within a subject
    TopicId
);
numeric_id!(
    /// Unique identifier for a block in the daily schedule
    BlockId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_display_and_parse() {
        let id = SubjectId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<SubjectId>().unwrap(), id);
    }

    #[test]
    fn subject_id_parse_rejects_garbage() {
        let err = "physics".parse::<SubjectId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse SubjectId from string");
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", BlockId::new(7)), "BlockId(7)");
        assert_eq!(format!("{:?}", UserId::new(1)), "UserId(1)");
    }
}
