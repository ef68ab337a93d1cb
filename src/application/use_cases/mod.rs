pub mod change_point;
pub mod event_feed;
pub mod price_feed;
