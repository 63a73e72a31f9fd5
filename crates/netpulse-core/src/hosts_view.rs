// ── Host table sort/filter ──
//
// Pure derived state: input list + sort state + filter term → output
// list. No hidden memoization, fully decoupled from fetch timing.

use std::cmp::Ordering;

use crate::model::ScannedHost;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Ip,
    Name,
    Type,
    Status,
    Ping,
    LastSeen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Current sort key + direction. Clicking the active key toggles the
/// direction; a new key resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Missing ping sorts last among ascending.
const PING_SENTINEL: u32 = 999;

/// Parse an IPv4 string into its four octets; unparsable parts become 0
/// so malformed ips sort first instead of panicking.
fn ip_octets(ip: &str) -> [u16; 4] {
    let mut octets = [0u16; 4];
    for (slot, part) in octets.iter_mut().zip(ip.split('.')) {
        *slot = part.parse().unwrap_or(0);
    }
    octets
}

fn compare(a: &ScannedHost, b: &ScannedHost, key: SortKey) -> Ordering {
    match key {
        SortKey::Ip => ip_octets(&a.ip).cmp(&ip_octets(&b.ip)),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Type => a.host_type.to_string().cmp(&b.host_type.to_string()),
        SortKey::Status => a.status.to_string().cmp(&b.status.to_string()),
        SortKey::Ping => a
            .ping
            .unwrap_or(PING_SENTINEL)
            .cmp(&b.ping.unwrap_or(PING_SENTINEL)),
        SortKey::LastSeen => a.last_seen.cmp(&b.last_seen),
    }
}

/// Case-insensitive substring match against ip, name, type, or vendor —
/// a host matching any field is kept.
pub fn matches_filter(host: &ScannedHost, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    host.ip.to_lowercase().contains(&term)
        || host.name.to_lowercase().contains(&term)
        || host.host_type.to_string().contains(&term)
        || host.vendor.to_lowercase().contains(&term)
}

/// Filter then stable-sort. Equal elements preserve their relative
/// input order — stability is part of the contract, not incidental.
pub fn apply(hosts: &[ScannedHost], term: &str, state: SortState) -> Vec<ScannedHost> {
    let mut view: Vec<ScannedHost> = hosts
        .iter()
        .filter(|h| matches_filter(h, term))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare(a, b, state.key);
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    view
}

/// Status breakdown for the table header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

pub fn status_counts(hosts: &[ScannedHost]) -> StatusCounts {
    use crate::model::HostStatus;
    let mut counts = StatusCounts::default();
    for host in hosts {
        match host.status {
            HostStatus::Online => counts.online += 1,
            HostStatus::Warning => counts.warning += 1,
            HostStatus::Offline => counts.offline += 1,
        }
    }
    counts
}

// ── Tests ───────────────────────────────────────────────────────────
