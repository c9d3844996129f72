//! The two decoration passes applied to rendered tables every cycle.
//!
//! Both passes are idempotent and commute, so re-running them on an
//! unchanged table (or overlapping a slow cycle) changes nothing.

use mixwatch_protocol::Snapshot;
use mixwatch_resolve::{IdentityResolver, Resolution};

use crate::table::{CellBinding, CellClass, StatusTable};

/// Run both passes over every cell of every table.
pub fn update_display(
    resolver: &mut IdentityResolver,
    snapshot: &Snapshot,
    tables: &mut [StatusTable],
) {
    update_boolean_cells(tables);
    update_identity_cells(resolver, snapshot, tables);
}

/// Boolean styling pass: cells reading exactly `true` or `false`
/// (case-insensitive, surrounding whitespace ignored) gain the matching
/// class and lose the opposite one.
pub fn update_boolean_cells(tables: &mut [StatusTable]) {
    for table in tables.iter_mut() {
        for cell in table.cells_mut() {
            match cell.text.trim().to_lowercase().as_str() {
                "true" => {
                    cell.add_class(CellClass::True);
                    cell.remove_class(CellClass::False);
                }
                "false" => {
                    cell.add_class(CellClass::False);
                    cell.remove_class(CellClass::True);
                }
                _ => {}
            }
        }
    }
}

/// Identity substitution pass: endpoint-bound cells, and unbound cells
/// whose text contains `http://`, are resolved against the snapshot; a
/// successful resolution replaces the cell text with the descriptor name
/// and attaches its class. Blank and unknown identifiers leave the cell
/// untouched.
pub fn update_identity_cells(
    resolver: &mut IdentityResolver,
    snapshot: &Snapshot,
    tables: &mut [StatusTable],
) {
    for table in tables.iter_mut() {
        for cell in table.cells_mut() {
            let ident = match &cell.binding {
                Some(CellBinding::Endpoint(address)) => address.clone(),
                None => {
                    let text = cell.text.trim().to_lowercase();
                    if !text.contains("http://") {
                        continue;
                    }
                    text
                }
            };
            if let Resolution::Resolved(descriptor) = resolver.resolve(snapshot, &ident) {
                cell.text = descriptor.name.clone();
                cell.add_class(descriptor.class.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableCell;
    use mixwatch_protocol::{NodeStatus, PublicNodeInfo};

    fn single_cell_table(cell: TableCell) -> Vec<StatusTable> {
        let mut table = StatusTable::new("Test", &["Value"]);
        table.push_row(vec![cell]);
        vec![table]
    }

    fn node_snapshot(address: &str, id: i64, is_mixer: bool) -> Snapshot {
        let mut snap = Snapshot::default();
        snap.nodes.insert(
            address.to_string(),
            NodeStatus {
                node: PublicNodeInfo {
                    id,
                    is_mixer,
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        snap
    }

    #[test]
    fn boolean_pass_styles_true_cells() {
        let mut tables = single_cell_table(TableCell::plain("  TRUE  "));
        tables[0].rows[0][0].add_class(CellClass::False); // stale class from a previous cycle
        update_boolean_cells(&mut tables);

        let cell = &tables[0].rows[0][0];
        assert!(cell.has_class(CellClass::True));
        assert!(!cell.has_class(CellClass::False));
    }

    #[test]
    fn boolean_pass_ignores_other_text() {
        let mut tables = single_cell_table(TableCell::plain("banana"));
        update_boolean_cells(&mut tables);
        assert!(tables[0].rows[0][0].classes.is_empty());
    }

    #[test]
    fn identity_pass_substitutes_bound_cells() {
        let snap = node_snapshot("10.0.0.1", 1, true);
        let mut resolver = IdentityResolver::new();
        let mut tables = single_cell_table(TableCell::endpoint("http://10.0.0.1:8080"));

        update_identity_cells(&mut resolver, &snap, &mut tables);

        let cell = &tables[0].rows[0][0];
        assert_eq!(cell.text, "Node1 (mixer)");
        assert!(cell.has_class(CellClass::Mixer));
    }

    #[test]
    fn identity_pass_falls_back_to_text_sniffing() {
        let snap = node_snapshot("10.0.0.1", 1, false);
        let mut resolver = IdentityResolver::new();
        let mut tables = single_cell_table(TableCell::plain(" HTTP://10.0.0.1:8080 "));

        update_identity_cells(&mut resolver, &snap, &mut tables);

        let cell = &tables[0].rows[0][0];
        assert_eq!(cell.text, "Node1 (gatekeeper)");
        assert!(cell.has_class(CellClass::Gatekeeper));
    }

    #[test]
    fn identity_pass_leaves_unknown_endpoints_alone() {
        let mut resolver = IdentityResolver::new();
        let mut tables = single_cell_table(TableCell::plain("http://10.9.9.9:1"));

        update_identity_cells(&mut resolver, &Snapshot::default(), &mut tables);
        assert_eq!(tables[0].rows[0][0].text, "http://10.9.9.9:1");
        assert!(tables[0].rows[0][0].classes.is_empty());
    }

    #[test]
    fn passes_are_idempotent() {
        let snap = node_snapshot("10.0.0.1", 1, true);
        let mut resolver = IdentityResolver::new();

        let mut table = StatusTable::new("Test", &["Address", "Flag", "Other"]);
        table.push_row(vec![
            TableCell::endpoint("http://10.0.0.1:8080"),
            TableCell::plain("false"),
            TableCell::plain("banana"),
        ]);
        let mut tables = vec![table];

        update_display(&mut resolver, &snap, &mut tables);
        let after_first = tables.clone();
        update_display(&mut resolver, &snap, &mut tables);

        assert_eq!(tables, after_first);
    }

    #[test]
    fn empty_tables_are_a_no_op() {
        let mut resolver = IdentityResolver::new();
        let mut tables: Vec<StatusTable> = vec![StatusTable::new("Empty", &["Nothing"])];
        update_display(&mut resolver, &Snapshot::default(), &mut tables);
        assert!(tables[0].rows.is_empty());
    }
}
