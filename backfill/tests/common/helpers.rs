//! Test helpers for composing a backfill runner from mock services

use std::time::Duration;

use backfill::{Backfill, MockConfigSource, MockImageProvider, MockRecordStore};
use shared::RunMode;

use super::fixtures::TestFixtures;

/// Helper methods shared across the test suites
pub struct TestHelpers;

impl TestHelpers {
    /// Mock config source that always loads the standard test config
    pub fn config_source() -> MockConfigSource {
        let mut source = MockConfigSource::new();
        source.expect_load().returning(|| Ok(TestFixtures::config()));
        source
    }

    /// Mock store that accepts configuration and passes the reachability probe
    pub fn reachable_store() -> MockRecordStore {
        let mut store = MockRecordStore::new();
        store.expect_configure().returning(|_, _| Ok(()));
        store.expect_test_reachable().returning(|| true);
        store
    }

    /// Mock provider that accepts configuration and passes the reachability probe
    pub fn reachable_provider() -> MockImageProvider {
        let mut provider = MockImageProvider::new();
        provider.expect_configure().returning(|_| Ok(()));
        provider.expect_test_reachable().returning(|| true);
        provider
    }

    /// Assemble a runner with zero pacing so tests run instantly
    pub fn backfill(
        store: MockRecordStore,
        provider: MockImageProvider,
        mode: RunMode,
    ) -> Backfill<MockConfigSource, MockRecordStore, MockImageProvider> {
        Backfill::new(Self::config_source(), store, provider, mode).with_pacing(Duration::ZERO)
    }
}
