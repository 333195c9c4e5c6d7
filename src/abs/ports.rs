use serde::{Deserialize, Serialize};

/// Side of the macro on which a port's pins are placed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub index: usize,
    /// Appended to every pin name belonging to this port.
    pub suffix: String,
    pub edge: Edge,
}

/// Naming and placement of each read/write port.
///
/// A single port has no suffix and sits on the left edge. With multiple
/// ports, port `n` gets the suffix `_A`, `_B`, ..., `_Z`, `_AA`, `_AB`, ...
/// and ports alternate between the left and right edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortTable {
    ports: Vec<Port>,
}

impl PortTable {
    pub fn new(rw_ports: usize) -> Self {
        let ports = if rw_ports == 1 {
            vec![Port {
                index: 0,
                suffix: String::new(),
                edge: Edge::Left,
            }]
        } else {
            (0..rw_ports)
                .map(|index| Port {
                    index,
                    suffix: format!("_{}", port_letters(index)),
                    edge: if index % 2 == 0 { Edge::Left } else { Edge::Right },
                })
                .collect()
        };
        Self { ports }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Port> {
        self.ports.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    /// Suffixes of all ports, in port order.
    pub fn suffixes(&self) -> Vec<String> {
        self.iter().map(|port| port.suffix.clone()).collect()
    }
}

/// Spreadsheet-style column name of a zero-based index.
fn port_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_port() {
        let table = PortTable::new(1);
        assert_eq!(table.len(), 1);
        let port = table.get(0).unwrap();
        assert_eq!(port.suffix, "");
        assert_eq!(port.edge, Edge::Left);
    }

    #[test]
    fn test_dual_port() {
        let table = PortTable::new(2);
        assert_eq!(table.suffixes(), vec!["_A", "_B"]);
        assert_eq!(table.get(0).unwrap().edge, Edge::Left);
        assert_eq!(table.get(1).unwrap().edge, Edge::Right);
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_edges_alternate() {
        let table = PortTable::new(4);
        let edges = table.iter().map(|port| port.edge).collect::<Vec<_>>();
        assert_eq!(edges, [Edge::Left, Edge::Right, Edge::Left, Edge::Right]);
        assert_eq!(table.get(3).unwrap().suffix, "_D");
    }

    #[test]
    fn test_suffixes_past_z() {
        assert_eq!(port_letters(0), "A");
        assert_eq!(port_letters(25), "Z");
        assert_eq!(port_letters(26), "AA");
        assert_eq!(port_letters(27), "AB");
        assert_eq!(port_letters(701), "ZZ");
        assert_eq!(port_letters(702), "AAA");

        let table = PortTable::new(300);
        assert_eq!(table.get(191).unwrap().suffix, "_GJ");
        assert_eq!(table.get(299).unwrap().suffix, "_KN");
        assert!(table
            .iter()
            .all(|port| port.suffix[1..].chars().all(|c| c.is_ascii_uppercase())));
    }
}
