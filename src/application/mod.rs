pub mod use_cases;

pub use use_cases::change_point::ChangePointUseCase;
pub use use_cases::event_feed::EventFeedUseCase;
pub use use_cases::price_feed::PriceFeedUseCase;
