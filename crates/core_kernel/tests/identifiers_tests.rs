//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display formatting.

use core_kernel::{InvestorId, FundId, NavId, TransactionId};
use uuid::Uuid;

mod investor_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = InvestorId::new();
        let id2 = InvestorId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = InvestorId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = InvestorId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = InvestorId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = InvestorId::new();
        let parsed: InvestorId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: InvestorId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_json_serialization_is_bare_uuid() {
        let id = InvestorId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(!json.contains("INV-"));
        let deserialized: InvestorId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(InvestorId::prefix(), "INV");
        assert_eq!(FundId::prefix(), "FND");
        assert_eq!(NavId::prefix(), "NAV");
        assert_eq!(TransactionId::prefix(), "TXN");
    }

    #[test]
    fn test_wrong_prefix_fails_to_parse() {
        let fund = FundId::new();
        let result: Result<TransactionId, _> = fund.to_string().parse();
        assert!(result.is_err());
    }
}
