//! Pre-built Test Fixtures
//!
//! Provides consistent, predictable test data. The region table is a small
//! slice of the real province/ward codes.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{CanonicalZone, FundId, InvestorId, StoredTimestamp};
use domain_fund::{Nav, Transaction, TransactionType};
use domain_investor::{
    InMemoryInvestorStore, InMemoryRegionDirectory, InvestorDraft, InvestorService, Province,
    RegionDirectory, RegionTable, Ward,
};

/// Fixture for the province/ward reference table
pub struct RegionFixtures;

impl RegionFixtures {
    /// Ha Noi
    pub const HA_NOI: &'static str = "01";
    /// Ho Chi Minh City
    pub const HO_CHI_MINH: &'static str = "79";
    /// Ba Dinh ward, in Ha Noi
    pub const BA_DINH: &'static str = "00004";
    /// Hoan Kiem ward, in Ha Noi
    pub const HOAN_KIEM: &'static str = "00070";
    /// Ben Thanh ward, in Ho Chi Minh City
    pub const BEN_THANH: &'static str = "26743";

    /// The reference rows
    pub fn table() -> RegionTable {
        RegionTable {
            provinces: vec![
                Province { code: Self::HA_NOI.to_string(), name: "Thành phố Hà Nội".to_string() },
                Province { code: Self::HO_CHI_MINH.to_string(), name: "Thành phố Hồ Chí Minh".to_string() },
            ],
            wards: vec![
                Ward {
                    code: Self::BA_DINH.to_string(),
                    name: "Phường Ba Đình".to_string(),
                    province_code: Self::HA_NOI.to_string(),
                },
                Ward {
                    code: Self::HOAN_KIEM.to_string(),
                    name: "Phường Hoàn Kiếm".to_string(),
                    province_code: Self::HA_NOI.to_string(),
                },
                Ward {
                    code: Self::BEN_THANH.to_string(),
                    name: "Phường Bến Thành".to_string(),
                    province_code: Self::HO_CHI_MINH.to_string(),
                },
            ],
        }
    }

    /// The reference table as an in-memory directory
    pub fn directory() -> InMemoryRegionDirectory {
        InMemoryRegionDirectory::from_table(Self::table()).expect("fixture region table is consistent")
    }

    /// The directory behind an `Arc`, ready to inject
    pub fn shared() -> Arc<dyn RegionDirectory> {
        Arc::new(Self::directory())
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The zone used throughout the suite
    pub fn zone() -> CanonicalZone {
        CanonicalZone::new(chrono_tz::Asia::Ho_Chi_Minh)
    }

    /// Parses a stored timestamp, panicking on bad fixture input
    pub fn stored(raw: &str) -> StoredTimestamp {
        StoredTimestamp::parse(raw).expect("fixture timestamp parses")
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("fixture date is valid")
    }
}

/// Fixture for investor test data
pub struct InvestorFixtures;

impl InvestorFixtures {
    /// A complete, valid investor in Ba Dinh, Ha Noi
    pub fn valid_draft() -> InvestorDraft {
        InvestorDraft {
            name: "Nguyễn Văn An".to_string(),
            phone: "0912345678".to_string(),
            email: Some("an.nguyen@example.com".to_string()),
            province_code: Some(RegionFixtures::HA_NOI.to_string()),
            ward_code: Some(RegionFixtures::BA_DINH.to_string()),
            address_line: Some("12 Phố Đội Cấn".to_string()),
        }
    }

    /// A valid investor with no email or address
    pub fn minimal_draft() -> InvestorDraft {
        InvestorDraft {
            name: "Trần Thị Bình".to_string(),
            phone: "0387654321".to_string(),
            ..Default::default()
        }
    }

    /// An investor service over an empty in-memory store
    pub fn service() -> InvestorService {
        InvestorService::new(Arc::new(InMemoryInvestorStore::new()), RegionFixtures::shared())
    }
}

/// Fixture for ledger rows
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// A deposit of 10,000,000 at NAV 10,000 (1,000 units)
    pub fn deposit(fund_id: FundId, investor_id: InvestorId, at: &str) -> Transaction {
        Transaction::new(
            fund_id,
            Some(investor_id),
            TransactionType::Deposit,
            TemporalFixtures::stored(at),
            dec!(10000000),
            dec!(10000),
        )
        .expect("fixture amounts are in range")
    }

    /// A withdrawal of 2,000,000 at NAV 10,000 (200 units)
    pub fn withdrawal(fund_id: FundId, investor_id: InvestorId, at: &str) -> Transaction {
        Transaction::new(
            fund_id,
            Some(investor_id),
            TransactionType::Withdrawal,
            TemporalFixtures::stored(at),
            dec!(2000000),
            dec!(10000),
        )
        .expect("fixture amounts are in range")
    }

    /// A fee of 50,000 at NAV 10,000 (5 units)
    pub fn fee(fund_id: FundId, investor_id: InvestorId, at: &str) -> Transaction {
        Transaction::new(
            fund_id,
            Some(investor_id),
            TransactionType::Fee,
            TemporalFixtures::stored(at),
            dec!(50000),
            dec!(10000),
        )
        .expect("fixture amounts are in range")
    }

    /// A NAV figure published at 17:00 local time on the given date
    pub fn nav(fund_id: FundId, date: NaiveDate, value: rust_decimal::Decimal) -> Nav {
        let published = date.and_hms_opt(17, 0, 0).expect("17:00 is a valid time");
        Nav::new(fund_id, date, value, StoredTimestamp::Naive(published))
    }
}
