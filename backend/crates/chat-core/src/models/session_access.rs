use std::fmt;

/// Why a user is allowed into a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAccess {
    Owner,
    Participant,
}

impl fmt::Display for SessionAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Participant => write!(f, "participant"),
        }
    }
}
