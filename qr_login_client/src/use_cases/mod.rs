// Use cases layer: the QR login workflow.

pub mod poller;

#[cfg(test)]
pub(crate) mod test_support;

pub use poller::{PollOutcome, PollerSettings, QrLoginPoller};
