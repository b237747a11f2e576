//! Stock assignment for variant mutations.
//!
//! Warehouses are resolved up front: the orchestrator loads every warehouse
//! the input names, [`check_warehouses_exist`] reports the ones that do not
//! resolve, and only a fully resolvable input produces stock rows.

use shopforge_catalog::{Stock, Warehouse};
use shopforge_core::{FieldError, ValidationErrors, WarehouseId};

use crate::input::StockInput;

/// The distinct warehouse ids referenced by the stock inputs, in the order
/// they first appear.
pub fn requested_warehouse_ids(stocks: &[StockInput]) -> Vec<WarehouseId> {
    let mut ids = Vec::new();
    for stock in stocks {
        if !ids.contains(&stock.warehouse) {
            ids.push(stock.warehouse);
        }
    }
    ids
}

/// Record a NOT_FOUND error for every requested warehouse that did not
/// resolve.
pub fn check_warehouses_exist(
    stocks: &[StockInput],
    resolved: &[Warehouse],
    errors: &mut ValidationErrors,
) {
    let missing: Vec<WarehouseId> = requested_warehouse_ids(stocks)
        .into_iter()
        .filter(|id| !resolved.iter().any(|w| w.id == *id))
        .collect();
    if missing.is_empty() {
        return;
    }
    let listed = missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    errors.push(
        FieldError::not_found("warehouse", format!("Could not resolve to a warehouse: {listed}."))
            .with_warehouses(missing),
    );
}

/// Turn the validated inputs into stock rows, one per warehouse.
pub fn build_stocks(stocks: &[StockInput]) -> Vec<Stock> {
    stocks
        .iter()
        .map(|s| Stock::new(s.warehouse, s.quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopforge_core::ProductErrorCode;

    #[test]
    fn requested_ids_are_deduplicated_in_first_seen_order() {
        let w1 = WarehouseId::new();
        let w2 = WarehouseId::new();
        let stocks = vec![
            StockInput::new(w2, 1),
            StockInput::new(w1, 2),
            StockInput::new(w2, 3),
        ];
        assert_eq!(requested_warehouse_ids(&stocks), vec![w2, w1]);
    }

    #[test]
    fn missing_warehouses_are_reported_with_their_ids() {
        let known = Warehouse::new("Main", "main");
        let missing_a = WarehouseId::new();
        let missing_b = WarehouseId::new();
        let stocks = vec![
            StockInput::new(missing_a, 5),
            StockInput::new(known.id, 2),
            StockInput::new(missing_b, 1),
        ];

        let mut errors = ValidationErrors::new();
        check_warehouses_exist(&stocks, std::slice::from_ref(&known), &mut errors);

        assert_eq!(errors.len(), 1);
        let error = &errors.errors()[0];
        assert_eq!(error.field, "warehouse");
        assert_eq!(error.code, ProductErrorCode::NotFound);
        assert_eq!(
            error.message,
            format!("Could not resolve to a warehouse: {missing_a}, {missing_b}.")
        );
        assert_eq!(error.params.warehouses, vec![missing_a, missing_b]);
    }

    #[test]
    fn fully_resolved_input_is_quiet() {
        let main = Warehouse::new("Main", "main");
        let backup = Warehouse::new("Backup", "backup");
        let stocks = vec![StockInput::new(main.id, 5), StockInput::new(backup.id, 0)];

        let mut errors = ValidationErrors::new();
        check_warehouses_exist(&stocks, &[main, backup], &mut errors);
        check_warehouses_exist(&[], &[], &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn build_stocks_maps_each_row() {
        let w1 = WarehouseId::new();
        let w2 = WarehouseId::new();
        let rows = build_stocks(&[StockInput::new(w1, 3), StockInput::new(w2, 0)]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Stock::new(w1, 3));
        assert_eq!(rows[1], Stock::new(w2, 0));
    }
}
