pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use interface_adapters::clients::QrAuthClient;
pub use use_cases::{PollOutcome, PollerSettings, QrLoginPoller};
