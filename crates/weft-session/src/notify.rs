//! # Order Status Notifications
//!
//! Maps order-status keywords to the title/message pair shown in a device
//! notification. Presentation itself (notification channels, icons) is an
//! external collaborator behind the [`Notifier`] trait.

use tracing::info;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle states an order can be announced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Parses a status keyword; unrecognized keywords yield `None`
    /// (the caller turns that into a no-op, never an error).
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "confirmed" => Some(OrderStatus::Confirmed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// The notification content for this status.
    pub const fn notice(&self) -> StatusNotice {
        match self {
            OrderStatus::Confirmed => StatusNotice {
                title: "Order Confirmed",
                message: "Your order has been confirmed!",
            },
            OrderStatus::Shipped => StatusNotice {
                title: "Order Shipped",
                message: "Your order is on its way!",
            },
            OrderStatus::Delivered => StatusNotice {
                title: "Order Delivered",
                message: "Your order has been delivered!",
            },
        }
    }
}

/// A title/message pair ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusNotice {
    pub title: &'static str,
    pub message: &'static str,
}

// =============================================================================
// Notifier Seam
// =============================================================================

/// Presents a status notice to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, status: OrderStatus, notice: StatusNotice);
}

/// Notifier that writes to the tracing log.
///
/// Stands in for platform notification presentation, which is out of
/// scope for this workspace.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, status: OrderStatus, notice: StatusNotice) {
        info!(?status, title = notice.title, message = notice.message, "order status");
    }
}

/// Announces an order status by keyword.
///
/// Unrecognized keywords are a silent no-op.
pub fn notify_order_status(notifier: &dyn Notifier, keyword: &str) {
    if let Some(status) = OrderStatus::parse(keyword) {
        notifier.notify(status, status.notice());
    }
}

// =============================================================================
// Test Support
// =============================================================================

/// Records every notice it is asked to present.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) seen: std::sync::Mutex<Vec<OrderStatus>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, status: OrderStatus, _notice: StatusNotice) {
        self.seen
            .lock()
            .expect("notifier mutex poisoned")
            .push(status);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keywords() {
        assert_eq!(OrderStatus::parse("confirmed"), Some(OrderStatus::Confirmed));
        assert_eq!(OrderStatus::parse("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::parse("refunded"), None);
        assert_eq!(OrderStatus::parse("Confirmed"), None); // keywords are exact
    }

    #[test]
    fn test_notice_content() {
        let notice = OrderStatus::Shipped.notice();
        assert_eq!(notice.title, "Order Shipped");
        assert_eq!(notice.message, "Your order is on its way!");
    }

    #[test]
    fn test_unknown_keyword_is_noop() {
        let recorder = RecordingNotifier::default();
        notify_order_status(&recorder, "lost-in-transit");
        assert!(recorder.seen.lock().unwrap().is_empty());

        notify_order_status(&recorder, "delivered");
        assert_eq!(*recorder.seen.lock().unwrap(), vec![OrderStatus::Delivered]);
    }
}
