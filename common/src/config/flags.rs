use std::ffi::OsString;

use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::{
    config::defaults::Defaults,
    errors::{NotifyError, NotifyErrorKind},
    notification::{NotificationRequest, PendingRequest},
    notify_err,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Notify(NotificationRequest),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
enum Flag {
    Help,
    Summary,
    App,
    Icon,
    Time,
}
impl Flag {
    fn short(self) -> char {
        match self {
            Self::Help => 'h',
            Self::Summary => 's',
            Self::App => 'a',
            Self::Icon => 'i',
            Self::Time => 't',
        }
    }
    fn takes_value(self) -> bool {
        !matches!(self, Self::Help)
    }
    fn from_short(c: char) -> Result<Self, NotifyError> {
        Self::iter().find(|f| f.short() == c).ok_or_else(|| {
            notify_err!(NotifyErrorKind::UnknownFlag, "invalid option -- '{}'", c)
        })
    }
    /// Exact names win; otherwise any unambiguous prefix is accepted (`--sum` for `--summary`).
    fn from_long(name: &str) -> Result<Self, NotifyError> {
        if let Some(flag) = Self::iter().find(|f| f.as_ref() == name) {
            return Ok(flag);
        }
        let mut candidates = Self::iter().filter(|f| f.as_ref().starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(flag), None) => Ok(flag),
            (Some(_), Some(_)) => Err(notify_err!(
                NotifyErrorKind::AmbiguousFlag,
                "option '--{}' is ambiguous",
                name
            )),
            _ => Err(notify_err!(
                NotifyErrorKind::UnknownFlag,
                "unrecognized option '--{}'",
                name
            )),
        }
    }
}

pub struct ArgParse {
    defaults: Defaults,
}
impl ArgParse {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }

    /// Parses the arguments following the program name.
    ///
    /// Options are read until the first non-option token or `--`; everything after that is the
    /// message body. The whole command line is read before anything is decided, so a bad flag
    /// anywhere is reported even when `--help` is present too.
    ///
    /// D-Bus strings are UTF-8, so a token that is not valid UTF-8 is a usage error.
    pub fn parse<I, S>(&self, args: I) -> Result<Command, NotifyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = args
            .into_iter()
            .map(|arg| {
                Into::<OsString>::into(arg).into_string().map_err(|raw| {
                    notify_err!(
                        NotifyErrorKind::InvalidUtf8,
                        "argument '{}' is not valid UTF-8",
                        raw.to_string_lossy()
                    )
                })
            })
            .collect::<Result<Vec<String>, _>>()?;
        let mut args = args.into_iter();
        let mut pending = PendingRequest::default();
        let mut help = false;
        let mut words: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            if arg == "--" {
                words.extend(args.by_ref());
                break;
            }

            if let Some(long) = arg.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (long, None),
                };
                let flag = Flag::from_long(name)?;

                if !flag.takes_value() {
                    if inline.is_some() {
                        return Err(notify_err!(
                            NotifyErrorKind::UnexpectedValue,
                            "option '--{}' doesn't allow an argument",
                            flag.as_ref()
                        ));
                    }
                    help = true;
                    continue;
                }

                let value = match inline {
                    Some(value) => value,
                    None => args.next().ok_or_else(|| {
                        notify_err!(
                            NotifyErrorKind::MissingValue,
                            "option '--{}' requires an argument",
                            flag.as_ref()
                        )
                    })?,
                };
                set(&mut pending, flag, value);
            } else if let Some(cluster) = arg.strip_prefix('-').filter(|c| !c.is_empty()) {
                let mut chars = cluster.chars();
                while let Some(c) = chars.next() {
                    let flag = Flag::from_short(c)?;
                    if !flag.takes_value() {
                        help = true;
                        continue;
                    }

                    // The rest of the cluster is the value: `-sBuild`
                    let rest = chars.as_str();
                    let value = if rest.is_empty() {
                        args.next().ok_or_else(|| {
                            notify_err!(
                                NotifyErrorKind::MissingValue,
                                "option requires an argument -- '{}'",
                                c
                            )
                        })?
                    } else {
                        rest.to_string()
                    };
                    set(&mut pending, flag, value);
                    break;
                }
            } else {
                words.push(arg);
                words.extend(args.by_ref());
                break;
            }
        }

        if help {
            return Ok(Command::Help);
        }

        if !words.is_empty() {
            pending.body = Some(words.join(" "));
        }
        let request = pending.resolve(&self.defaults);
        tracing::debug!(?request, "parsed command line");

        Ok(Command::Notify(request))
    }

    pub fn usage(&self) -> String {
        format!(
            "Usage: notify [OPTION...] [MESSAGE...]\n\
             Ask the desktop notification service to show MESSAGE.\n\
             \n\
             \x20 -a, --app=NAME        application name, shown when there is no summary\n\
             \x20 -i, --icon=ICON       icon name or path (default: {icon})\n\
             \x20 -t, --time=MILLIS     time before the notification hides, 0 = never (default: {timeout})\n\
             \x20 -s, --summary=TEXT    notification title\n\
             \x20 -h, --help            show this help and exit\n",
            icon = self.defaults.icon,
            timeout = self.defaults.timeout_millis,
        )
    }
}

fn set(pending: &mut PendingRequest, flag: Flag, value: String) {
    let slot = match flag {
        Flag::Summary => &mut pending.summary,
        Flag::App => &mut pending.application,
        Flag::Icon => &mut pending.icon,
        Flag::Time => &mut pending.timeout,
        Flag::Help => return,
    };
    *slot = Some(value);
}
