mod common;

use common::Record;
use loadstate::{
    IdentifiedPaginatedCollection, NumberedPage, OffsetPage, PageSlice, PaginatedCollection,
    TimestampedPage, DEFAULT_PAGE_SIZE,
};
use proptest::prelude::*;

type Collection = IdentifiedPaginatedCollection<Record, NumberedPage>;

fn page(number: u32) -> NumberedPage {
    NumberedPage::new(number, 30)
}

fn labels(collection: &Collection) -> Vec<(u32, String)> {
    collection
        .values()
        .map(|record| (record.id, record.label.clone()))
        .collect()
}

// --- page keys ---

#[test]
fn bare_page_number_gets_the_default_size() {
    let page = NumberedPage::from(3);
    assert_eq!(page.number, 3);
    assert_eq!(page.size, DEFAULT_PAGE_SIZE);
    assert_eq!(page.size, 25);
}

#[test]
fn numbered_page_next_keeps_the_size() {
    let next = NumberedPage::new(2, 40).next();
    assert_eq!(next, NumberedPage::new(3, 40));
}

#[test]
fn offset_page_next_advances_by_limit() {
    let next = OffsetPage::new(20, 40).next();
    assert_eq!(next, OffsetPage::new(20, 60));
}

#[test]
fn timestamped_page_is_a_plain_key() {
    let now = chrono::Utc::now();
    let page = TimestampedPage::new(now, 10);
    assert_eq!(page.end_date, now);
    assert_eq!(page.size, 10);
}

// --- construction ---

#[test]
fn from_initial_preserves_slice_order_and_bookkeeping() {
    let slice = PageSlice::new(
        vec![Record::new(1, "a"), Record::new(2, "b"), Record::new(3, "c")],
        page(1),
        Some(page(2)),
    );
    let collection = Collection::from_initial(slice);

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.ids().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(collection.last_page(), &page(1));
    assert_eq!(collection.next_page(), Some(&page(2)));
    assert!(collection.has_next_page());
}

// --- append-upsert ---

#[test]
fn appending_adds_new_values_at_the_back() {
    let collection = Collection::from_initial(PageSlice::new(
        vec![Record::new(1, "a"), Record::new(2, "b")],
        page(1),
        Some(page(2)),
    ));
    let appended = collection.upsert_appending(PageSlice::new(
        vec![Record::new(3, "c"), Record::new(4, "d")],
        page(2),
        Some(page(3)),
    ));

    assert_eq!(appended.ids().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(appended.last_page(), &page(2));
    assert_eq!(appended.next_page(), Some(&page(3)));
    // The source collection is untouched.
    assert_eq!(collection.len(), 2);
}

#[test]
fn appending_updates_known_ids_in_place() {
    let collection = Collection::from_initial(PageSlice::new(
        vec![
            Record::new(1, "a"),
            Record::new(2, "old"),
            Record::new(3, "c"),
        ],
        page(1),
        Some(page(2)),
    ));
    let appended = collection.upsert_appending(PageSlice::new(
        vec![Record::new(2, "new"), Record::new(4, "d")],
        page(2),
        None,
    ));

    assert_eq!(
        labels(&appended),
        vec![
            (1, "a".to_string()),
            (2, "new".to_string()),
            (3, "c".to_string()),
            (4, "d".to_string()),
        ]
    );
    assert!(!appended.has_next_page());
}

#[test]
fn appending_an_empty_slice_only_moves_the_bookkeeping() {
    let collection = Collection::from_initial(PageSlice::new(
        vec![Record::new(1, "a")],
        page(1),
        Some(page(2)),
    ));
    let appended = collection.upsert_appending(PageSlice::new(vec![], page(2), None));

    assert_eq!(appended.len(), 1);
    assert_eq!(appended.last_page(), &page(2));
    assert_eq!(appended.next_page(), None);
}

// --- prepend-upsert ---

#[test]
fn prepending_all_new_values_lands_at_the_front_in_slice_order() {
    let collection = Collection::from_initial(PageSlice::new(
        vec![Record::new(10, "x"), Record::new(11, "y")],
        page(2),
        Some(page(3)),
    ));
    let prepended = collection.upsert_prepending(PageSlice::new(
        vec![Record::new(1, "a"), Record::new(2, "b")],
        page(1),
        Some(page(2)),
    ));

    assert_eq!(
        prepended.ids().copied().collect::<Vec<_>>(),
        vec![1, 2, 10, 11]
    );
}

#[test]
fn prepending_anchors_new_values_behind_matched_ones() {
    // Existing: r1, r2, r3("first"), r9, r10. A fresh first page arrives
    // with r3 updated plus two values not seen before.
    let collection = Collection::from_initial(PageSlice::new(
        vec![
            Record::new(1, "a"),
            Record::new(2, "b"),
            Record::new(3, "first"),
            Record::new(9, "i"),
            Record::new(10, "j"),
        ],
        page(3),
        Some(page(4)),
    ));
    let prepended = collection.upsert_prepending(PageSlice::new(
        vec![
            Record::new(3, "second"),
            Record::new(4, "d"),
            Record::new(5, "e"),
        ],
        page(1),
        Some(page(2)),
    ));

    assert_eq!(
        labels(&prepended),
        vec![
            (1, "a".to_string()),
            (2, "b".to_string()),
            (3, "second".to_string()),
            (4, "d".to_string()),
            (5, "e".to_string()),
            (9, "i".to_string()),
            (10, "j".to_string()),
        ]
    );
    // Bookkeeping stays with the deepest page walked.
    assert_eq!(prepended.next_page(), Some(&page(4)));
    assert_eq!(prepended.last_page(), &page(3));
}

// --- in-place helpers ---

#[test]
fn remove_ids_preserves_the_order_of_the_rest() {
    let mut collection = Collection::from_initial(PageSlice::new(
        vec![
            Record::new(1, "a"),
            Record::new(2, "b"),
            Record::new(3, "c"),
            Record::new(4, "d"),
        ],
        page(1),
        None,
    ));
    collection.remove_ids(&[2, 4, 99]);
    assert_eq!(collection.ids().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn update_replaces_in_place_and_ignores_unknown_ids() {
    let mut collection = Collection::from_initial(PageSlice::new(
        vec![Record::new(1, "a"), Record::new(2, "b")],
        page(1),
        None,
    ));

    assert!(collection.update(Record::new(2, "changed")));
    assert!(!collection.update(Record::new(7, "ghost")));

    assert_eq!(
        labels(&collection),
        vec![(1, "a".to_string()), (2, "changed".to_string())]
    );
    assert_eq!(collection.len(), 2);
}

// --- equality ---

#[test]
fn equality_is_order_sensitive() {
    let forward = Collection::from_initial(PageSlice::new(
        vec![Record::new(1, "a"), Record::new(2, "b")],
        page(1),
        None,
    ));
    let reversed = Collection::from_initial(PageSlice::new(
        vec![Record::new(2, "b"), Record::new(1, "a")],
        page(1),
        None,
    ));

    assert_eq!(forward, forward.clone());
    assert_ne!(forward, reversed);
}

// --- upsert invariants over arbitrary overlaps ---

fn unique_records(label: &'static str, range: std::ops::Range<u32>) -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::btree_set(range, 0..12).prop_map(move |ids| {
        ids.into_iter()
            .map(|id| Record::new(id, &format!("{label}-{id}")))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Appending keeps every existing id at its position, appends ids
    /// unique to the slice in slice order, and updates overlapping ids to
    /// the slice's value.
    #[test]
    fn append_upsert_invariants(
        existing in unique_records("base", 0..40u32),
        incoming in unique_records("slice", 20..60u32),
    ) {
        let collection = Collection::from_initial(PageSlice::new(existing.clone(), page(1), Some(page(2))));
        let appended = collection.upsert_appending(PageSlice::new(incoming.clone(), page(2), Some(page(3))));

        let before: Vec<u32> = collection.ids().copied().collect();
        let after: Vec<u32> = appended.ids().copied().collect();

        // Existing ids keep their exact positions.
        prop_assert_eq!(&after[..before.len()], &before[..]);

        // Ids unique to the slice are appended in slice order.
        let fresh: Vec<u32> = incoming
            .iter()
            .map(|r| r.id)
            .filter(|id| !before.contains(id))
            .collect();
        prop_assert_eq!(&after[before.len()..], &fresh[..]);

        // Overlapping ids carry the slice's value.
        for record in &incoming {
            prop_assert_eq!(appended.get(&record.id), Some(record));
        }

        // No id appears twice.
        prop_assert_eq!(appended.len(), before.len() + fresh.len());
    }

    /// Prepending never overwrites the old next page, keeps the relative
    /// order of surviving existing ids, and deduplicates by id.
    #[test]
    fn prepend_upsert_invariants(
        existing in unique_records("base", 0..40u32),
        incoming in unique_records("slice", 20..60u32),
        slice_next in proptest::option::of(2u32..9),
    ) {
        let collection = Collection::from_initial(PageSlice::new(existing.clone(), page(3), Some(page(4))));
        let prepended = collection.upsert_prepending(PageSlice::new(
            incoming.clone(),
            page(1),
            slice_next.map(page),
        ));

        // The slice's next pointer is ignored.
        prop_assert_eq!(prepended.next_page(), Some(&page(4)));
        prop_assert_eq!(prepended.last_page(), &page(3));

        // Existing ids keep their relative order.
        let before: Vec<u32> = collection.ids().copied().collect();
        let surviving: Vec<u32> = prepended
            .ids()
            .copied()
            .filter(|id| before.contains(id))
            .collect();
        prop_assert_eq!(&surviving[..], &before[..]);

        // Overlapping ids carry the slice's value; nothing is duplicated.
        for record in &incoming {
            prop_assert_eq!(prepended.get(&record.id), Some(record));
        }
        let fresh = incoming.iter().filter(|r| !before.contains(&r.id)).count();
        prop_assert_eq!(prepended.len(), before.len() + fresh);
    }
}
