pub mod call_log;
pub mod fixture;
pub mod subscribers;

pub use call_log::CallLog;
pub use fixture::BridgeFixture;
pub use subscribers::{counted, override_table};
pub use test_host::TestHost;
pub use tracking_registry::TrackingRegistry;
