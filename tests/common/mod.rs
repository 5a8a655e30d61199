use areacost_core::catalog::{Catalog, RawTable, AREA_COLUMNS, CATEGORY_COLUMNS};
use areacost_core::session::SessionState;

/// Builds a raw table from string literals.
pub fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        columns.iter().map(|column| column.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

/// Catalog used across the integration suites:
/// three areas and three categories with mixed unit semantics.
pub fn sample_catalog() -> Catalog {
    let areas = table(
        &AREA_COLUMNS,
        &[
            &["1", "Kitchen", "200"],
            &["2", "A", "100"],
            &["3", "B", "50"],
        ],
    );
    let categories = table(
        &CATEGORY_COLUMNS,
        &[
            &["1", "Flooring", "Tile", "5", "USD", "1", "sqft"],
            &["2", "Flooring", "Hardwood", "9", "USD", "1", "sqft"],
            &["3", "Flooring", "Laminate", "3.5", "USD", "1", "sqft"],
            &["4", "Painting", "Paint", "20", "gallon", "0.0025", "sqft"],
            &["5", "Fixtures", "Outlet", "4", "each", "2", "each"],
        ],
    );
    Catalog::from_tables(&areas, &categories).expect("sample tables are valid")
}

#[allow(dead_code)]
pub fn sample_session() -> SessionState {
    SessionState::new(sample_catalog())
}
