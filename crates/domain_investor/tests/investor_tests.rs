//! Comprehensive tests for domain_investor

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{CacheSettings, DomainPort, InvestorId, PortError};

use domain_investor::{
    validate_address, validate_phone, CachedRegionDirectory, InMemoryInvestorStore, InvestorError,
    InvestorPatch, InvestorQuery, InvestorService, Province, RegionDirectory, Ward,
};
use test_utils::{
    assert_validation_error, invalid_phone_strategy, valid_phone_strategy, InvestorFixtures,
    RegionFixtures,
};

// ============================================================================
// Creation Tests
// ============================================================================

mod creation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_resolves_region_names() {
        let service = InvestorFixtures::service();
        let investor = service.create(InvestorFixtures::valid_draft()).await.unwrap();

        let address = investor.address.unwrap();
        assert_eq!(address.province_name, "Thành phố Hà Nội");
        assert_eq!(address.ward_name, "Phường Ba Đình");
        assert_eq!(investor.phone.as_str(), "0912345678");
    }

    #[tokio::test]
    async fn test_create_minimal() {
        let service = InvestorFixtures::service();
        let investor = service.create(InvestorFixtures::minimal_draft()).await.unwrap();

        assert!(investor.address.is_none());
        assert!(investor.email.is_none());
        assert_eq!(investor.created_at, investor.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_creation_stores_nothing() {
        let store = Arc::new(InMemoryInvestorStore::new());
        let service = InvestorService::new(store.clone(), RegionFixtures::shared());

        let mut draft = InvestorFixtures::valid_draft();
        draft.phone = "9.12345678E8".to_string();

        assert_validation_error(service.create(draft).await, "digits only");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_mismatched_ward_rejected() {
        let service = InvestorFixtures::service();
        let mut draft = InvestorFixtures::valid_draft();
        draft.ward_code = Some(RegionFixtures::BEN_THANH.to_string());

        assert_validation_error(service.create(draft).await, "does not belong");
    }
}

// ============================================================================
// Update Tests
// ============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_patch_changes_only_given_fields() {
        let service = InvestorFixtures::service();
        let created = service.create(InvestorFixtures::valid_draft()).await.unwrap();

        let patch = InvestorPatch {
            email: Some("an@example.vn".to_string()),
            ..Default::default()
        };
        let updated = service.update(created.id, patch).await.unwrap();

        assert_eq!(updated.email.as_deref(), Some("an@example.vn"));
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_phone_in_patch_rejects_whole_update() {
        let service = InvestorFixtures::service();
        let created = service.create(InvestorFixtures::valid_draft()).await.unwrap();

        let patch = InvestorPatch {
            name: Some("Nguyễn Văn Bình".to_string()),
            phone: Some("912345678.0".to_string()),
            ..Default::default()
        };
        assert_validation_error(service.update(created.id, patch).await, "Phone");

        let stored = service.get(created.id).await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_ward_patch_checked_against_stored_province() {
        let service = InvestorFixtures::service();
        let created = service.create(InvestorFixtures::valid_draft()).await.unwrap();

        let bad = InvestorPatch {
            ward_code: Some(RegionFixtures::BEN_THANH.to_string()),
            ..Default::default()
        };
        assert_validation_error(service.update(created.id, bad).await, "does not belong");

        let good = InvestorPatch {
            ward_code: Some(RegionFixtures::HOAN_KIEM.to_string()),
            ..Default::default()
        };
        let updated = service.update(created.id, good).await.unwrap();
        assert_eq!(updated.address.unwrap().ward_name, "Phường Hoàn Kiếm");
    }

    #[tokio::test]
    async fn test_clearing_address_requires_both_codes() {
        let service = InvestorFixtures::service();
        let created = service.create(InvestorFixtures::valid_draft()).await.unwrap();

        let half = InvestorPatch {
            province_code: Some(String::new()),
            ..Default::default()
        };
        assert_validation_error(service.update(created.id, half).await, "Province is required");

        let full = InvestorPatch {
            province_code: Some(String::new()),
            ward_code: Some(String::new()),
            address_line: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(created.id, full).await.unwrap();
        assert!(updated.address.is_none());
    }

    #[tokio::test]
    async fn test_empty_patch_is_noop() {
        let service = InvestorFixtures::service();
        let created = service.create(InvestorFixtures::minimal_draft()).await.unwrap();

        let updated = service.update(created.id, InvestorPatch::default()).await.unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_unknown_investor() {
        let service = InvestorFixtures::service();
        let result = service.update(InvestorId::new(), InvestorPatch::default()).await;
        assert!(matches!(result, Err(InvestorError::NotFound(_))));
    }
}

// ============================================================================
// Listing Tests
// ============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let service = InvestorFixtures::service();
        service.create(InvestorFixtures::valid_draft()).await.unwrap();
        service.create(InvestorFixtures::minimal_draft()).await.unwrap();

        let in_ha_noi = service.list(&InvestorQuery::by_province(RegionFixtures::HA_NOI)).await.unwrap();
        assert_eq!(in_ha_noi.len(), 1);

        let by_phone = service.list(&InvestorQuery::by_phone("0387654321")).await.unwrap();
        assert_eq!(by_phone[0].name, "Trần Thị Bình");

        let page = service.list(&InvestorQuery::default().paginate(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
    }
}

// ============================================================================
// Region Cache Tests
// ============================================================================

mod region_cache_tests {
    use super::*;

    /// Counts lookups reaching the underlying table
    struct CountingDirectory {
        inner: Arc<dyn RegionDirectory>,
        calls: AtomicUsize,
    }

    impl DomainPort for CountingDirectory {}

    impl RegionDirectory for CountingDirectory {
        fn province(&self, code: &str) -> Result<Option<Province>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.province(code)
        }

        fn ward(&self, code: &str) -> Result<Option<Ward>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.ward(code)
        }

        fn wards_of(&self, province_code: &str) -> Result<Vec<Ward>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.wards_of(province_code)
        }
    }

    fn counting() -> Arc<CountingDirectory> {
        Arc::new(CountingDirectory {
            inner: RegionFixtures::shared(),
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_repeated_lookups_served_from_cache() {
        let counter = counting();
        let cached = CachedRegionDirectory::new(counter.clone(), CacheSettings::default());

        for _ in 0..3 {
            validate_address(&cached, RegionFixtures::HA_NOI, RegionFixtures::BA_DINH).unwrap();
        }
        assert_eq!(counter.calls.load(Ordering::SeqCst), 2);

        // Misses are cached too
        assert!(cached.province("99").unwrap().is_none());
        assert!(cached.province("99").unwrap().is_none());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let counter = counting();
        let cached = CachedRegionDirectory::new(counter.clone(), CacheSettings::default());

        cached.wards_of(RegionFixtures::HA_NOI).unwrap();
        cached.invalidate();
        let wards = cached.wards_of(RegionFixtures::HA_NOI).unwrap();

        assert_eq!(wards.len(), 2);
        assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_canonical_phones_accepted(phone in valid_phone_strategy()) {
        let parsed = validate_phone(&phone).unwrap();
        prop_assert_eq!(parsed.as_str(), phone.as_str());
    }

    #[test]
    fn prop_padded_phones_trimmed(phone in valid_phone_strategy(), pad in "[ \t]{0,3}") {
        let padded = format!("{}{}{}", pad, phone, pad);
        let validated = validate_phone(&padded).unwrap();
        prop_assert_eq!(validated.as_str(), phone.as_str());
    }

    #[test]
    fn prop_malformed_phones_rejected(phone in invalid_phone_strategy()) {
        prop_assert!(validate_phone(&phone).is_err());
    }
}
