use std::cell::RefCell;
use std::rc::Rc;

use common::model::card::{CardRecord, TemplateId};
use common::model::student::StudentRecord;
use common::store::{CardStore, MemorySlot, StorageBackend};
use common::validation::{FormRules, RawStudentInput};

fn jane() -> StudentRecord {
    StudentRecord {
        name: "Jane Doe".to_string(),
        roll_number: "12".to_string(),
        class: "5".to_string(),
        division: "A".to_string(),
        allergies: vec!["Nuts".to_string()],
        photo: None,
        rack_number: "R1".to_string(),
        bus_route: "Route 1".to_string(),
    }
}

fn jane_card() -> CardRecord {
    CardRecord::with_id("UNI-123456", jane(), TemplateId::Classic, "2024-01-01T00:00:00.000Z")
}

fn slot_contents(slot: &MemorySlot) -> Vec<CardRecord> {
    let raw = slot.raw().expect("slot should be written");
    serde_json::from_str(&raw).expect("slot should hold a card list")
}

#[test]
fn inserted_scenario_card_is_listed_exactly_once() {
    let store = CardStore::open(MemorySlot::new());
    store.insert(jane_card());

    let cards = store.list_all();
    assert_eq!(cards, vec![jane_card()]);
    assert_eq!(cards[0].id, "UNI-123456");
    assert_eq!(cards[0].template, TemplateId::Classic);
    assert_eq!(cards[0].created_at, "2024-01-01T00:00:00.000Z");
}

#[test]
fn validated_form_output_flows_into_the_store() {
    let input = RawStudentInput {
        name: "Jane Doe".to_string(),
        roll_number: "12".to_string(),
        class: "5".to_string(),
        division: "A".to_string(),
        allergies: vec!["Nuts".to_string()],
        photo: None,
        rack_number: "R1".to_string(),
        bus_route: "Route 1".to_string(),
    };
    let student = input.validate_and_normalize(&FormRules::default()).unwrap();
    let store = CardStore::open(MemorySlot::new());

    store.insert(CardRecord::with_id(
        "UNI-123456",
        student,
        TemplateId::Classic,
        "2024-01-01T00:00:00.000Z",
    ));

    assert_eq!(store.list_all(), vec![jane_card()]);
}

#[test]
fn persisted_slot_matches_list_all() {
    let slot = MemorySlot::new();
    let store = CardStore::open(slot.clone());
    store.insert(jane_card());
    store.insert(CardRecord::new(jane(), TemplateId::Modern, "2024-01-02T00:00:00.000Z"));

    assert_eq!(slot_contents(&slot), store.list_all());
}

#[test]
fn reopening_restores_insertion_order() {
    let slot = MemorySlot::new();
    {
        let store = CardStore::open(slot.clone());
        for n in 0..3 {
            store.insert(CardRecord::with_id(
                format!("card-{}", n),
                jane(),
                TemplateId::Classic,
                "2024-01-01T00:00:00.000Z",
            ));
        }
    }

    let ids: Vec<String> = CardStore::open(slot).list_all().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["card-0", "card-1", "card-2"]);
}

#[test]
fn deleting_twice_is_a_noop_the_second_time() {
    let slot = MemorySlot::new();
    let store = CardStore::open(slot.clone());
    store.insert(jane_card());
    store.insert(CardRecord::with_id("other", jane(), TemplateId::Modern, "2024-01-03T00:00:00.000Z"));

    store.delete_by_id("UNI-123456");
    assert_eq!(store.len(), 1);

    store.delete_by_id("UNI-123456");
    assert_eq!(store.len(), 1);
    assert!(store.list_all().iter().all(|c| c.id != "UNI-123456"));
    assert_eq!(slot_contents(&slot), store.list_all());
}

#[test]
fn deleting_an_unknown_id_leaves_no_such_record() {
    let store = CardStore::open(MemorySlot::new());
    store.insert(jane_card());

    store.delete_by_id("never-inserted");

    assert_eq!(store.list_all(), vec![jane_card()]);
}

#[test]
fn clear_all_empties_store_and_slot() {
    let slot = MemorySlot::new();
    let store = CardStore::open(slot.clone());
    store.insert(jane_card());

    store.clear_all();

    assert!(store.list_all().is_empty());
    assert_eq!(slot.raw(), None);
}

#[test]
fn corrupt_or_absent_slot_opens_empty() {
    assert!(CardStore::open(MemorySlot::new()).is_empty());

    let slot = MemorySlot::new();
    slot.seed("{not json");
    assert!(CardStore::open(slot).list_all().is_empty());
}

#[test]
fn failed_write_keeps_previous_state() {
    let slot = MemorySlot::new();
    let store = CardStore::open(slot.clone());
    store.insert(jane_card());

    slot.set_fail_writes(true);
    store.insert(CardRecord::with_id("lost", jane(), TemplateId::Modern, "2024-01-04T00:00:00.000Z"));
    store.delete_by_id("UNI-123456");

    assert_eq!(store.list_all(), vec![jane_card()]);
    assert_eq!(slot_contents(&slot), vec![jane_card()]);
}

#[test]
fn other_tab_write_replaces_view_and_notifies() {
    let tab_a = MemorySlot::new();
    let tab_b = tab_a.another_tab();
    let store_a = CardStore::open(tab_a);
    let store_b = CardStore::open(tab_b);

    let notified = Rc::new(RefCell::new(Vec::new()));
    let sink = notified.clone();
    let _sub = store_b.subscribe_to_external_changes(move |cards| {
        sink.borrow_mut().push(cards.len());
    });

    store_a.insert(jane_card());

    assert_eq!(store_b.list_all(), vec![jane_card()]);
    assert_eq!(*notified.borrow(), vec![1]);
}

#[test]
fn last_writer_wins_without_merging() {
    let tab_a = MemorySlot::new();
    let tab_b = tab_a.another_tab();
    let store_a = CardStore::open(tab_a.clone());
    let store_b = CardStore::open(tab_b);

    store_a.insert(jane_card());
    store_b.insert(CardRecord::with_id("from-b", jane(), TemplateId::Modern, "2024-01-05T00:00:00.000Z"));

    let ids: Vec<String> = store_a.list_all().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["UNI-123456", "from-b"]);
    assert_eq!(store_a.list_all(), store_b.list_all());
    assert_eq!(slot_contents(&tab_a), store_a.list_all());
}

#[test]
fn other_tab_clear_empties_view() {
    let tab_a = MemorySlot::new();
    let tab_b = tab_a.another_tab();
    let store_a = CardStore::open(tab_a);
    let store_b = CardStore::open(tab_b);
    store_a.insert(jane_card());
    assert_eq!(store_b.len(), 1);

    store_a.clear_all();

    assert!(store_b.is_empty());
}

#[test]
fn corrupt_external_write_is_ignored() {
    let tab_a = MemorySlot::new();
    let tab_b = tab_a.another_tab();
    let store_b = CardStore::open(tab_b);
    let store_a = CardStore::open(tab_a.clone());
    store_a.insert(jane_card());

    tab_a.write("[{\"broken\": true}]").unwrap();

    assert_eq!(store_b.list_all(), vec![jane_card()]);
}

#[test]
fn dropped_subscription_stops_notifications() {
    let tab_a = MemorySlot::new();
    let tab_b = tab_a.another_tab();
    let store_a = CardStore::open(tab_a);
    let store_b = CardStore::open(tab_b);

    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    let sub = store_b.subscribe_to_external_changes(move |_| *sink.borrow_mut() += 1);

    store_a.insert(jane_card());
    drop(sub);
    store_a.delete_by_id("UNI-123456");

    assert_eq!(*count.borrow(), 1);
    assert!(store_b.is_empty());
}
