// County alert fan-out for newly created reports
mod county;

pub use county::{Notification, county_notifications, notification_id, notify_county};
