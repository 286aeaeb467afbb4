//! Tests for strongly-typed identifiers

use core_kernel::ClaimId;
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let ids: HashSet<ClaimId> = (0..100).map(|_| ClaimId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClaimId::prefix(), "CLM");
    }

    #[test]
    fn test_from_str_wrong_prefix_fails() {
        let uuid = Uuid::new_v4();
        assert!(format!("POL-{}", uuid).parse::<ClaimId>().is_err());
    }
}

proptest! {
    #[test]
    fn display_then_parse_preserves_identity(bytes in any::<[u8; 16]>()) {
        let id = ClaimId::from(Uuid::from_bytes(bytes));
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
