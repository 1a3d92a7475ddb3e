//! Equal per-member splitting of a single expense.

use std::collections::BTreeMap;

use trip_domain::{Amounted, MemberId, NamedEntity, Shared};

use crate::{CoreError, CoreResult};

/// Per-member portion of one expense.
pub type ShareMap = BTreeMap<MemberId, f64>;

pub struct ShareService;

impl ShareService {
    /// Splits `amount` equally between the distinct ids in `member_ids`.
    ///
    /// No remainder is redistributed: `100 / 3` yields `33.333…` for every
    /// member. Repeated ids count once.
    pub fn per_member_share(amount: f64, member_ids: &[MemberId]) -> CoreResult<ShareMap> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "amount must be positive, got {amount}"
            )));
        }
        let mut shares: ShareMap = member_ids.iter().map(|id| (id.clone(), 0.0)).collect();
        if shares.is_empty() {
            return Err(CoreError::InvalidInput(
                "an expense needs at least one member".into(),
            ));
        }
        let share = amount / shares.len() as f64;
        for value in shares.values_mut() {
            *value = share;
        }
        Ok(shares)
    }

    /// Shares for a budget or spending item, with the item name in any error.
    pub fn item_shares<T>(item: &T) -> CoreResult<ShareMap>
    where
        T: Amounted + Shared + NamedEntity,
    {
        Self::per_member_share(item.amount(), item.member_ids()).map_err(|err| match err {
            CoreError::InvalidInput(reason) => {
                CoreError::InvalidInput(format!("item `{}`: {}", item.name(), reason))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<MemberId> {
        raw.iter().map(|id| MemberId::new(*id)).collect()
    }

    #[test]
    fn thirds_are_equal_and_conserve_the_total() {
        let shares = ShareService::per_member_share(100.0, &ids(&["a", "b", "c"])).unwrap();
        assert_eq!(shares.len(), 3);
        for value in shares.values() {
            assert!((value - 100.0 / 3.0).abs() < 1e-12);
        }
        let total: f64 = shares.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn only_listed_members_receive_a_share() {
        let shares = ShareService::per_member_share(60.0, &ids(&["a", "c"])).unwrap();
        assert!(shares.contains_key(&MemberId::new("a")));
        assert!(shares.contains_key(&MemberId::new("c")));
        assert!(!shares.contains_key(&MemberId::new("b")));
    }

    #[test]
    fn repeated_ids_count_once() {
        let shares = ShareService::per_member_share(90.0, &ids(&["a", "b", "a"])).unwrap();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[&MemberId::new("a")], 45.0);
    }

    #[test]
    fn rejects_empty_member_set() {
        let err = ShareService::per_member_share(10.0, &[]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn rejects_non_positive_and_non_finite_amounts() {
        let members = ids(&["a"]);
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ShareService::per_member_share(amount, &members).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)), "amount {amount}");
        }
    }
}
