//! Structural properties of generated and repaired maps

use std::collections::HashSet;

use adv_core::repair::component_count;
use adv_core::topology::make_adventure;
use adv_core::{Adventure, RepairOptions, canon_dir, revalidate, validate_and_fix};
use proptest::prelude::*;

fn ids_unique(adv: &Adventure) -> bool {
    let ids: HashSet<&str> = adv.rooms.iter().map(|r| r.id.as_str()).collect();
    ids.len() == adv.rooms.len()
}

fn targets_valid(adv: &Adventure) -> bool {
    let ids = adv.room_ids();
    adv.rooms
        .iter()
        .flat_map(|r| r.exits.iter())
        .all(|e| ids.contains(e.to.as_str()))
}

fn exits_mirrored(adv: &Adventure) -> bool {
    adv.rooms.iter().all(|room| {
        room.exits.iter().all(|exit| match exit.direction() {
            Some(dir) => adv
                .room(&exit.to)
                .is_some_and(|back| back.has_exit(dir.opposite().code(), &room.id)),
            None => true,
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn repaired_map_is_well_formed(seed in any::<u32>(), n in 6usize..=40) {
        let mut adv = make_adventure("prop", u64::from(seed), n);
        let options = RepairOptions::default();
        validate_and_fix(&mut adv, &options);

        prop_assert!(ids_unique(&adv));
        prop_assert!(targets_valid(&adv));
        prop_assert!(exits_mirrored(&adv));
        prop_assert!(adv.rooms.len() <= options.cap);
        prop_assert!(adv.contains_room(&adv.start_room));
        if n <= options.cap {
            prop_assert_eq!(adv.rooms.len(), n);
            prop_assert_eq!(component_count(&adv), 1);
            prop_assert!(adv.rooms.iter().all(|r| !r.exits.is_empty()));
        }
    }

    #[test]
    fn cap_outcome_matches_report(seed in any::<u32>(), n in 6usize..=40, cap in 1usize..=40) {
        let mut adv = make_adventure("prop", u64::from(seed), n);
        let report = validate_and_fix(&mut adv, &RepairOptions::with_cap(cap));

        prop_assert_eq!(adv.rooms.len(), n.min(cap));
        prop_assert!(targets_valid(&adv));
        prop_assert!(exits_mirrored(&adv));
        prop_assert_eq!(report.disconnected_after_cap, component_count(&adv) > 1);
    }

    #[test]
    fn reconnect_after_cap_always_connects(
        seed in any::<u32>(),
        n in 6usize..=40,
        cap in 1usize..=40,
    ) {
        let mut adv = make_adventure("prop", u64::from(seed), n);
        let options = RepairOptions { cap, reconnect_after_cap: true };
        let report = validate_and_fix(&mut adv, &options);

        prop_assert!(!report.disconnected_after_cap);
        prop_assert_eq!(component_count(&adv), 1);
        prop_assert!(exits_mirrored(&adv));
    }

    #[test]
    fn repair_is_idempotent_under_cap(seed in any::<u32>(), n in 6usize..=30) {
        let mut adv = make_adventure("prop", u64::from(seed), n);
        let options = RepairOptions::default();
        validate_and_fix(&mut adv, &options);

        let once = adv.clone();
        let report = validate_and_fix(&mut adv, &options);
        prop_assert!(report.is_clean());
        prop_assert_eq!(adv, once);
    }

    #[test]
    fn revalidate_is_stable_for_any_cap(
        seed in any::<u32>(),
        n in 6usize..=40,
        cap in 1usize..=40,
    ) {
        let mut adv = make_adventure("prop", u64::from(seed), n);
        let options = RepairOptions::with_cap(cap);
        let first = validate_and_fix(&mut adv, &options);

        let once = adv.clone();
        let second = revalidate(&mut adv, &options, &first);
        prop_assert_eq!(second.corridors_added, 0);
        prop_assert_eq!(second.disconnected_after_cap, first.disconnected_after_cap);
        prop_assert_eq!(adv, once);
    }

    #[test]
    fn generation_is_deterministic(seed in any::<u32>(), n in 6usize..=40) {
        let mut a = make_adventure("prop", u64::from(seed), n);
        let mut b = make_adventure("prop", u64::from(seed), n);
        prop_assert_eq!(&a, &b);

        validate_and_fix(&mut a, &RepairOptions::default());
        validate_and_fix(&mut b, &RepairOptions::default());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn canon_dir_is_idempotent(raw in "[ a-zA-Z-]{0,12}") {
        let once = canon_dir(&raw);
        prop_assert_eq!(canon_dir(&once), once.clone());
    }
}
