use async_trait::async_trait;
use common::{
    errors::{NotifyError, NotifyErrorKind},
    notification::{NotificationHandle, NotificationRequest},
    notify_err,
    protocol::{NotificationBus, NotifyCall},
    service::NotificationService,
};
use zbus::{Connection, Proxy};

/// Talks to `org.freedesktop.Notifications` on the session bus.
pub struct DBusNotifier {
    proxy: Proxy<'static>,
}
impl DBusNotifier {
    pub async fn connect() -> Result<Self, NotifyError> {
        let conn = Connection::session()
            .await
            .map_err(|e| notify_err!(NotifyErrorKind::DBusConnect, e.to_string()))?;

        let proxy = Proxy::new(
            &conn,
            NotificationBus::SERVICE,
            NotificationBus::PATH,
            NotificationBus::INTERFACE,
        )
        .await
        .map_err(|e| notify_err!(NotifyErrorKind::ProxyCreate, e.to_string()))?;

        Ok(Self { proxy })
    }
}

#[async_trait(?Send)]
impl NotificationService for DBusNotifier {
    async fn notify(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationHandle, NotifyError> {
        tracing::debug!(
            destination = NotificationBus::SERVICE,
            method = NotificationBus::NOTIFY,
            "sending notification"
        );

        let id = self
            .proxy
            .call::<_, _, u32>(
                NotificationBus::NOTIFY,
                &NotifyCall::from_request(request).body(),
            )
            .await
            .map_err(|e| notify_err!(NotifyErrorKind::DBusProxyCall, e.to_string()))?;

        tracing::debug!(id, "notification shown");
        Ok(NotificationHandle::from(id))
    }

    async fn close_notification(&self, handle: NotificationHandle) -> Result<(), NotifyError> {
        self.proxy
            .call::<_, _, ()>(NotificationBus::CLOSE_NOTIFICATION, &(handle.id(),))
            .await
            .map_err(|e| notify_err!(NotifyErrorKind::DBusProxyCall, e.to_string()))
    }
}
