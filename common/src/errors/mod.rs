use std::fmt::{self, Display};

use strum::AsRefStr;

#[macro_export]
macro_rules! notify_err {
    // Case with just a message literal
    ($kind:expr, $msg:expr) => {
        $crate::errors::NotifyError {
            kind: $kind,
            message: $msg.into(),
            file: file!(),
            line: line!(),
        }
    };
    // Case with message + format arguments
    ($kind:expr, $fmt:expr, $($args:tt)*) => {
        $crate::errors::NotifyError {
            kind: $kind,
            message: format!($fmt, $($args)*),
            file: file!(),
            line: line!(),
        }
    };
}

#[derive(Debug)]
pub struct NotifyError {
    pub kind: NotifyErrorKind,
    pub message: String,
    pub file: &'static str,
    pub line: u32,
}
impl Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for NotifyError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum NotifyErrorKind {
    // Command line
    UnknownFlag,
    AmbiguousFlag,
    MissingValue,
    UnexpectedValue,
    InvalidUtf8,

    // Bus
    DBusConnect,
    ProxyCreate,
    DBusProxyCall,
}
impl NotifyErrorKind {
    /// Errors the user caused on the command line. These end in the usage text, never in a
    /// bus call.
    pub fn is_usage(self) -> bool {
        matches!(
            self,
            Self::UnknownFlag
                | Self::AmbiguousFlag
                | Self::MissingValue
                | Self::UnexpectedValue
                | Self::InvalidUtf8
        )
    }
}
