//! Shared console state: the last rendered tables, the banner, and the
//! status line the refresh loop writes errors into.

use mixwatch_client::FetchError;
use mixwatch_protocol::Snapshot;
use mixwatch_resolve::IdentityResolver;

use crate::display;
use crate::render;
use crate::table::StatusTable;

/// State shared between the refresh task and the UI loop.
///
/// Owns the identity resolver, so the cache lives exactly as long as the
/// console session.
pub struct Dashboard {
    resolver: IdentityResolver,
    banner: Option<String>,
    status_line: Option<String>,
    tables: Vec<StatusTable>,
    last_updated: Option<chrono::DateTime<chrono::Utc>>,
    cycles: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            resolver: IdentityResolver::new(),
            banner: None,
            status_line: None,
            tables: Vec::new(),
            last_updated: None,
            cycles: 0,
        }
    }

    /// One successful refresh cycle: rebuild the tables, run both display
    /// passes, clear any stale error text.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        let mut tables = render::render_tables(snapshot);
        display::update_display(&mut self.resolver, snapshot, &mut tables);
        self.tables = tables;
        self.status_line = None;
        self.last_updated = Some(chrono::Utc::now());
        self.cycles += 1;
    }

    /// One failed refresh cycle: surface the error, keep the last good
    /// tables on screen.
    pub fn record_error(&mut self, err: &FetchError) {
        self.status_line = Some(format!("Error loading data: {err}"));
        self.cycles += 1;
    }

    pub fn set_banner(&mut self, banner: String) {
        self.banner = Some(banner);
    }

    /// Immutable copy of everything the UI needs to draw one frame.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            banner: self.banner.clone(),
            status_line: self.status_line.clone(),
            tables: self.tables.clone(),
            last_updated: self.last_updated,
            cycles: self.cycles,
            resolved_identities: self.resolver.cache().len(),
        }
    }

    #[cfg(test)]
    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    #[cfg(test)]
    pub fn tables(&self) -> &[StatusTable] {
        &self.tables
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-ready view of the dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub banner: Option<String>,
    pub status_line: Option<String>,
    pub tables: Vec<StatusTable>,
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
    pub cycles: u64,
    pub resolved_identities: usize,
}
