//! Builds the status tables from a snapshot, one set per refresh cycle.
//!
//! Address cells are endpoint-bound so the display updater can resolve
//! them without re-parsing text; flag columns render as `true`/`false`
//! for the boolean styling pass.

use std::collections::HashSet;

use mixwatch_protocol::Snapshot;
use mixwatch_resolve::format_routing_path;

use crate::table::{StatusTable, TableCell};

pub fn render_tables(snapshot: &Snapshot) -> Vec<StatusTable> {
    vec![
        nodes_table(snapshot),
        clients_table(snapshot),
        messages_table(snapshot),
    ]
}

fn nodes_table(snapshot: &Snapshot) -> StatusTable {
    let mut table = StatusTable::new(
        "Nodes",
        &["Address", "ID", "Role", "Onions", "Checkpoints", "Dropped"],
    );
    for (address, status) in &snapshot.nodes {
        let role = status.node.role();
        let (got, want) = status.checkpoint_progress();
        table.push_row(vec![
            TableCell::endpoint(address),
            TableCell::plain(status.node.id.to_string()),
            TableCell::styled(role.to_string(), role.into()),
            TableCell::plain(status.onions_received().to_string()),
            TableCell::plain(format!("{got}/{want}")),
            TableCell::flag(status.dropped_any()),
        ]);
    }
    table
}

fn clients_table(snapshot: &Snapshot) -> StatusTable {
    let mut table = StatusTable::new("Clients", &["Address", "ID", "Sent", "Received"]);
    for (address, status) in &snapshot.clients {
        table.push_row(vec![
            TableCell::endpoint(address),
            TableCell::plain(status.client.id.to_string()),
            TableCell::plain(status.messages_sent.len().to_string()),
            TableCell::plain(status.messages_received.len().to_string()),
        ]);
    }
    table
}

fn messages_table(snapshot: &Snapshot) -> StatusTable {
    let mut table = StatusTable::new("Messages", &["From", "To", "Route", "Msg", "Delivered"]);

    // A sent message is delivered once its hash shows up in any client's
    // received list.
    let delivered: HashSet<&str> = snapshot
        .clients
        .values()
        .flat_map(|c| c.messages_received.iter())
        .map(|r| r.message.hash.as_str())
        .collect();

    for (address, status) in &snapshot.clients {
        for sent in &status.messages_sent {
            let to_cell = if sent.client_receiver.address.is_empty() {
                TableCell::plain(sent.message.to.to_string())
            } else {
                TableCell::endpoint(&sent.client_receiver.address)
            };
            table.push_row(vec![
                TableCell::endpoint(address),
                to_cell,
                TableCell::route(format_routing_path(&sent.routing_path)),
                TableCell::plain(sent.message.msg.clone()),
                TableCell::flag(delivered.contains(sent.message.hash.as_str())),
            ]);
        }
    }
    table
}
