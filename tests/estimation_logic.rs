use areacost_core::estimate::estimate;
use areacost_core::ledger::AreaLedger;

fn entry_sum(ledger: &AreaLedger) -> f64 {
    ledger.entries().iter().map(|entry| entry.total_cost).sum()
}

#[test]
fn grand_total_matches_entry_sum_at_every_step() {
    let mut ledger = AreaLedger::new("Workshop");
    let script: &[(&str, Option<f64>)] = &[
        ("Tile", Some(1000.0)),
        ("Hardwood", Some(1800.55)),
        ("Tile", None),
        ("Laminate", Some(0.1)),
        ("Tile", Some(700.0)),
        ("Hardwood", None),
        ("Laminate", None),
        ("Tile", None),
    ];

    for (item, action) in script {
        match action {
            Some(cost) => {
                ledger.add(item, "scripted", *cost).expect("add");
            }
            None => {
                ledger.undo(item).expect("undo");
            }
        }
        assert_eq!(
            ledger.grand_total(),
            entry_sum(&ledger),
            "invariant broken after touching {item}"
        );
    }
    assert!(ledger.is_empty());
    assert_eq!(ledger.display_total(), 0.0);
}

#[test]
fn add_then_undo_restores_state_exactly() {
    let mut ledger = AreaLedger::new("Workshop");
    ledger.add("Tile", "", 0.1).unwrap();
    ledger.add("Hardwood", "measured twice", 0.2).unwrap();
    let total_before = ledger.grand_total();
    let entries_before = ledger.entries().to_vec();

    ledger.add("Laminate", "", 0.3).unwrap();
    ledger.undo("Laminate").unwrap();

    assert_eq!(ledger.grand_total(), total_before);
    assert_eq!(ledger.entries(), entries_before.as_slice());
}

#[test]
fn same_item_name_is_independent_per_area() {
    let mut kitchen = AreaLedger::new("Kitchen");
    let mut garage = AreaLedger::new("Garage");
    kitchen.add("Paint", "satin", 125.0).unwrap();
    garage.add("Paint", "gloss", 62.5).unwrap();

    kitchen.undo("Paint").unwrap();
    assert!(garage.contains("Paint"));
    assert_eq!(garage.grand_total(), 62.5);
    assert_eq!(kitchen.grand_total(), 0.0);
}

#[test]
fn estimate_is_none_iff_quantity_not_positive() {
    for quantity in [-5.0, -0.0001, 0.0] {
        assert!(estimate(quantity, 1.0, 5.0).is_none());
    }
    for quantity in [0.0001, 1.0, 1e9] {
        let result = estimate(quantity, 1.0, 5.0).expect("positive quantity");
        assert!(result.total_cost >= 0.0);
    }
}

#[test]
fn assumption_text_survives_until_undo() {
    let mut ledger = AreaLedger::new("Kitchen");
    ledger
        .add("Tile", "assumes 10% waste", 1000.0)
        .expect("add");
    assert_eq!(
        ledger.entries()[0].assumption_text,
        "assumes 10% waste"
    );
    let removed = ledger.undo("Tile").expect("undo");
    assert_eq!(removed.assumption_text, "assumes 10% waste");
    assert!(ledger.entries().is_empty());
}
