use std::collections::BTreeSet;

use proptest::prelude::*;
use sequery::from;

fn values() -> impl Strategy<Value = Vec<i16>> {
    proptest::collection::vec(any::<i16>(), 0..48)
}

proptest! {
    #[test]
    fn wrapping_round_trips(xs in values()) {
        prop_assert_eq!(from(&xs).to_vec(), xs);
    }

    #[test]
    fn filter_postcondition(xs in values(), m in 1_i16..7) {
        let filtered = from(&xs).where_by(move |x| x % m == 0);
        prop_assert!(filtered.all(|x| x % m == 0));
    }

    #[test]
    fn select_fuses(xs in values()) {
        let f = |x: i16| i32::from(x) * 3;
        let g = |x: i32| x - 7;
        let chained = from(&xs).select(f).select(g).to_vec();
        let fused = from(&xs).select(move |x| g(f(x))).to_vec();
        prop_assert_eq!(chained, fused);
    }

    #[test]
    fn take_counts_min(xs in values(), n in 0_usize..64) {
        prop_assert_eq!(from(&xs).take(n).count(), n.min(xs.len()));
        prop_assert!(from(&xs).take(0).is_empty());
    }

    #[test]
    fn concat_appends(xs in values(), ys in values()) {
        let mut expected = xs.clone();
        expected.extend_from_slice(&ys);
        prop_assert_eq!(from(&xs).concat(&ys).to_vec(), expected);
    }

    #[test]
    fn distinct_is_idempotent(xs in values()) {
        let once = from(&xs).distinct();
        prop_assert_eq!(once.distinct().to_vec(), once.to_vec());
    }

    #[test]
    fn set_algebra_matches_btreeset(xs in values(), ys in values()) {
        let left: BTreeSet<i16> = xs.iter().copied().collect();
        let right: BTreeSet<i16> = ys.iter().copied().collect();

        let union = from(&xs).union_with(&ys).to_vec();
        prop_assert_eq!(union, left.union(&right).copied().collect::<Vec<_>>());

        let intersect = from(&xs).intersect_with(&ys).to_set();
        prop_assert_eq!(intersect, left.intersection(&right).copied().collect::<BTreeSet<_>>());

        let except = from(&xs).except_with(&ys);
        prop_assert_eq!(except.count(), left.difference(&right).count());
    }

    #[test]
    fn order_by_matches_stable_sort(xs in proptest::collection::vec((0_u8..4, any::<u16>()), 0..48)) {
        let mut expected = xs.clone();
        expected.sort_by_key(|pair| pair.0);
        prop_assert_eq!(from(&xs).order_by(|pair| pair.0).to_vec(), expected);
    }

    #[test]
    fn reverse_twice_is_identity(xs in values()) {
        prop_assert_eq!(from(&xs).reverse().reverse().to_vec(), xs);
    }
}
