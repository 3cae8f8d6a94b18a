use std::collections::HashMap;

use zbus::zvariant::Value;

use crate::notification::NotificationRequest;

pub struct NotificationBus;
impl NotificationBus {
    pub const SERVICE: &'static str = "org.freedesktop.Notifications";
    pub const PATH: &'static str = "/org/freedesktop/Notifications";
    pub const INTERFACE: &'static str = "org.freedesktop.Notifications";

    pub const NOTIFY: &'static str = "Notify";
    pub const CLOSE_NOTIFICATION: &'static str = "CloseNotification";

    /// `replaces_id` value asking for a new notification instead of updating one.
    pub const REPLACES_NONE: u32 = 0;
}

/// Body of a `Notify` call, in the order the signature `susssasa{sv}i` expects.
pub type NotifyBody<'a> = (
    &'a str,
    u32,
    &'a str,
    &'a str,
    &'a str,
    Vec<&'a str>,
    HashMap<&'a str, Value<'a>>,
    i32,
);

/// Arguments of one `Notify` call. Field order is wire order.
#[derive(Debug)]
pub struct NotifyCall<'a> {
    pub app_name: &'a str,
    pub replaces_id: u32,
    pub app_icon: &'a str,
    pub summary: &'a str,
    pub body: &'a str,
    pub actions: Vec<&'a str>,
    pub hints: HashMap<&'a str, Value<'a>>,
    pub expire_timeout: i32,
}
impl<'a> NotifyCall<'a> {
    pub fn from_request(request: &'a NotificationRequest) -> Self {
        Self {
            app_name: request.application(),
            replaces_id: NotificationBus::REPLACES_NONE,
            app_icon: request.icon(),
            summary: request.summary(),
            body: request.body(),
            actions: Vec::new(),
            hints: HashMap::new(),
            expire_timeout: request.timeout_millis(),
        }
    }

    pub fn body(self) -> NotifyBody<'a> {
        (
            self.app_name,
            self.replaces_id,
            self.app_icon,
            self.summary,
            self.body,
            self.actions,
            self.hints,
            self.expire_timeout,
        )
    }
}
