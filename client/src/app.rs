use std::{ffi::OsString, io::Write};

use common::{
    config::flags::{ArgParse, Command},
    errors::NotifyError,
    notification::NotificationHandle,
    service::NotificationService,
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug)]
pub enum Outcome {
    Sent(NotificationHandle),
    Help,
    Usage(NotifyError),
}

/// Parses `args` and, if they describe a notification, connects and sends it.
///
/// `connect` only runs once parsing produced a request. An `Err` is a bus failure and is fatal.
pub async fn compute<I, S, F, Fut, N>(
    args: I,
    parser: &ArgParse,
    connect: F,
) -> Result<Outcome, NotifyError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<N, NotifyError>>,
    N: NotificationService,
{
    let request = match parser.parse(args) {
        Ok(Command::Notify(request)) => request,
        Ok(Command::Help) => return Ok(Outcome::Help),
        Err(e) if e.kind.is_usage() => return Ok(Outcome::Usage(e)),
        Err(e) => return Err(e),
    };

    let service = connect().await?;
    let handle = service.notify(&request).await?;
    Ok(Outcome::Sent(handle))
}

/// Writes the outcome for the user and returns the process exit status.
pub fn report<O: Write, E: Write>(
    result: Result<Outcome, NotifyError>,
    usage: &str,
    out: &mut O,
    err: &mut E,
) -> u8 {
    match result {
        Ok(Outcome::Sent(handle)) => {
            // An id that never reaches stdout counts as a failed run
            match writeln!(out, "{handle}").and_then(|_| out.flush()) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    tracing::debug!(id = handle.id(), "could not write notification id");
                    let _ = writeln!(err, "notify: {e}");
                    EXIT_FAILURE
                }
            }
        }
        Ok(Outcome::Help) => {
            let _ = write!(out, "{usage}");
            EXIT_SUCCESS
        }
        Ok(Outcome::Usage(e)) => {
            let _ = writeln!(err, "notify: {e}");
            let _ = write!(out, "{usage}");
            EXIT_USAGE
        }
        Err(e) => {
            tracing::debug!(kind = e.kind.as_ref(), file = e.file, line = e.line, "{}", e.message);
            let _ = writeln!(err, "notify: {e}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        io::{self, ErrorKind},
        rc::Rc,
    };

    use async_trait::async_trait;
    use common::{
        config::defaults::{DEFAULT_ICON, Defaults},
        errors::NotifyErrorKind,
        notification::NotificationRequest,
        notify_err,
    };

    use super::*;

    const SERVICE_MISSING: &str =
        "The name org.freedesktop.Notifications was not provided by any .service files";

    struct BrokenPipe;
    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "Broken pipe"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "Broken pipe"))
        }
    }

    #[derive(Clone, Default)]
    struct FakeNotifier {
        reply: Option<u32>,
        sent: Rc<RefCell<Vec<NotificationRequest>>>,
        closed: Rc<RefCell<Vec<u32>>>,
    }
    #[async_trait(?Send)]
    impl NotificationService for FakeNotifier {
        async fn notify(
            &self,
            request: &NotificationRequest,
        ) -> Result<NotificationHandle, NotifyError> {
            self.sent.borrow_mut().push(request.clone());
            self.reply.map(NotificationHandle::from).ok_or_else(|| {
                notify_err!(NotifyErrorKind::DBusProxyCall, SERVICE_MISSING)
            })
        }

        async fn close_notification(&self, handle: NotificationHandle) -> Result<(), NotifyError> {
            self.closed.borrow_mut().push(handle.id());
            Ok(())
        }
    }

    fn parser() -> ArgParse {
        ArgParse::new(Defaults::default())
    }

    async fn run(args: &[&str], notifier: FakeNotifier) -> (u8, String, String, bool) {
        let connected = RefCell::new(false);
        let parser = parser();
        let result = compute(args.iter().copied(), &parser, || {
            *connected.borrow_mut() = true;
            async move { Ok::<_, NotifyError>(notifier) }
        })
        .await;

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = report(result, &parser.usage(), &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            connected.into_inner(),
        )
    }

    #[tokio::test]
    async fn sent_notification_prints_id() {
        let notifier = FakeNotifier {
            reply: Some(7),
            ..Default::default()
        };
        let (status, out, err, connected) =
            run(&["-s", "Build", "-a", "CI", "Done"], notifier.clone()).await;

        assert_eq!(status, EXIT_SUCCESS);
        assert_eq!(out, "7\n");
        assert!(err.is_empty());
        assert!(connected);

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].application(), "CI");
        assert_eq!(sent[0].summary(), "Build");
        assert_eq!(sent[0].body(), "Done");
        assert_eq!(sent[0].icon(), DEFAULT_ICON);
        assert_eq!(sent[0].timeout_millis(), 2000);
    }

    #[tokio::test]
    async fn failed_call_exits_nonzero_without_id() {
        let notifier = FakeNotifier::default();
        let (status, out, err, _) = run(&["hello"], notifier.clone()).await;

        assert_eq!(status, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, format!("notify: {SERVICE_MISSING}\n"));
        assert_eq!(notifier.sent.borrow().len(), 1);
    }

    #[test]
    fn unwritable_stdout_is_a_failure() {
        let mut err = Vec::new();
        let status = report(
            Ok(Outcome::Sent(NotificationHandle::from(7))),
            &parser().usage(),
            &mut BrokenPipe,
            &mut err,
        );
        assert_eq!(status, EXIT_FAILURE);
        assert_eq!(err, b"notify: Broken pipe\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_argument_exits_with_usage_status() {
        use std::os::unix::ffi::OsStringExt;

        let parser = parser();
        let connected = RefCell::new(false);
        let result = compute(
            [OsString::from("-s"), OsString::from_vec(vec![0xff])],
            &parser,
            || {
                *connected.borrow_mut() = true;
                async { Ok::<_, NotifyError>(FakeNotifier::default()) }
            },
        )
        .await;

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = report(result, &parser.usage(), &mut out, &mut err);
        assert_eq!(status, EXIT_USAGE);
        assert_eq!(out, parser.usage().as_bytes());
        assert!(String::from_utf8(err).unwrap().contains("not valid UTF-8"));
        assert!(!connected.into_inner());
    }

    #[tokio::test]
    async fn unreachable_bus_exits_nonzero() {
        let parser = parser();
        let result = compute(["hello"], &parser, || async {
            Err::<FakeNotifier, _>(notify_err!(
                NotifyErrorKind::DBusConnect,
                "Unable to open session bus"
            ))
        })
        .await;
        assert!(matches!(&result, Err(e) if e.kind == NotifyErrorKind::DBusConnect));

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = report(result, &parser.usage(), &mut out, &mut err);
        assert_eq!(status, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, b"notify: Unable to open session bus\n");
    }

    #[tokio::test]
    async fn help_never_connects() {
        let notifier = FakeNotifier {
            reply: Some(1),
            ..Default::default()
        };
        for flag in ["-h", "--help"] {
            let (status, out, err, connected) = run(&[flag], notifier.clone()).await;
            assert_eq!(status, EXIT_SUCCESS);
            assert_eq!(out, parser().usage());
            assert!(err.is_empty());
            assert!(!connected);
        }
        assert!(notifier.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn unknown_flag_is_a_usage_error() {
        let notifier = FakeNotifier {
            reply: Some(1),
            ..Default::default()
        };
        let (status, out, err, connected) = run(&["--bogus", "hi"], notifier.clone()).await;

        assert_eq!(status, EXIT_USAGE);
        assert_ne!(status, EXIT_SUCCESS);
        assert_eq!(out, parser().usage());
        assert_eq!(err, "notify: unrecognized option '--bogus'\n");
        assert!(!connected);
        assert!(notifier.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn close_goes_through_the_service() {
        let notifier = FakeNotifier::default();
        notifier
            .close_notification(NotificationHandle::from(7))
            .await
            .unwrap();
        assert_eq!(*notifier.closed.borrow(), vec![7]);
    }
}
