use async_trait::async_trait;

use crate::{
    errors::NotifyError,
    notification::{NotificationHandle, NotificationRequest},
};

/// Something that can show and dismiss desktop notifications.
///
/// Every failure is final. Implementations do not retry.
#[async_trait(?Send)]
pub trait NotificationService {
    async fn notify(&self, request: &NotificationRequest)
    -> Result<NotificationHandle, NotifyError>;

    async fn close_notification(&self, handle: NotificationHandle) -> Result<(), NotifyError>;
}
