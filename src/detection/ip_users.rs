//! Distinct users with at least one failure from each IP

use std::collections::{BTreeMap, BTreeSet};

/// ip -> users, both kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpUserSet {
    users_by_ip: BTreeMap<String, BTreeSet<String>>,
}

impl IpUserSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the IP's set; adding the same user again is a no-op
    pub fn record(&mut self, ip: &str, user: &str) {
        self.users_by_ip
            .entry(ip.to_string())
            .or_default()
            .insert(user.to_string());
    }

    pub fn users(&self, ip: &str) -> Option<&BTreeSet<String>> {
        self.users_by_ip.get(ip)
    }

    /// Number of distinct IPs
    pub fn len(&self) -> usize {
        self.users_by_ip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users_by_ip.is_empty()
    }

    /// Iterate IPs in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.users_by_ip.iter()
    }

    /// Union another set into this one (commutative)
    pub fn merge(&mut self, other: IpUserSet) {
        for (ip, users) in other.users_by_ip {
            self.users_by_ip.entry(ip).or_default().extend(users);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(users: &[&str]) -> BTreeSet<String> {
        users.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut ips = IpUserSet::new();
        ips.record("10.0.0.9", "a");
        ips.record("10.0.0.9", "b");
        ips.record("10.0.0.9", "a");

        assert_eq!(ips.users("10.0.0.9"), Some(&set(&["a", "b"])));
        assert_eq!(ips.len(), 1);
    }

    #[test]
    fn test_unknown_ip_has_no_entry() {
        let ips = IpUserSet::new();
        assert!(ips.users("10.0.0.1").is_none());
        assert!(ips.is_empty());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut a = IpUserSet::new();
        a.record("1.1.1.1", "x");
        a.record("2.2.2.2", "y");
        let mut b = IpUserSet::new();
        b.record("1.1.1.1", "z");
        b.record("1.1.1.1", "x");

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);

        assert_eq!(ab, ba);
        assert_eq!(ab.users("1.1.1.1"), Some(&set(&["x", "z"])));
    }
}
