//! Double-SHA-256 Merkle root over transaction ids.
//!
//! Leaves and interior nodes are in wire (little-endian) byte order, the order
//! the hash function produces them in. Odd-length layers duplicate their last
//! element. Callers flip the result with [`Hash256::reversed`] to compare it
//! against display-order constants.

use crate::types::Hash256;

/// Hash two child nodes into their parent: `SHA256d(left || right)`.
pub fn node_hash(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    Hash256::digest(&buf)
}

/// Merkle root of `leaves`, in wire byte order.
///
/// Returns [`Hash256::ZERO`] for an empty slice. A single leaf is its own root.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }

    let mut current = leaves.to_vec();
    while current.len() > 1 {
        current = current
            .chunks(2)
            .map(|pair| node_hash(&pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
    }
    current[0]
}

/// Append a Bitcoin-style variable-length integer.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Append a minimal script data push for `data`.
pub fn push_script_data(script: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    match len {
        0..=0x4b => script.push(len as u8),
        0x4c..=0xff => {
            script.push(0x4c);
            script.push(len as u8);
        }
        0x100..=0xffff => {
            script.push(0x4d);
            script.extend_from_slice(&(len as u16).to_le_bytes());
        }
        _ => {
            script.push(0x4e);
            script.extend_from_slice(&(len as u32).to_le_bytes());
        }
    }
    script.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(seed: u8) -> Hash256 {
        Hash256([seed; 32])
    }

    #[test]
    fn empty_root_is_zero() {
        assert_eq!(merkle_root(&[]), Hash256::ZERO);
    }

    #[test]
    fn single_leaf_is_root() {
        assert_eq!(merkle_root(&[h(7)]), h(7));
    }

    #[test]
    fn two_leaves_hash_concatenation() {
        let mut buf = Vec::new();
        buf.extend_from_slice(h(1).as_bytes());
        buf.extend_from_slice(h(2).as_bytes());
        assert_eq!(merkle_root(&[h(1), h(2)]), Hash256::digest(&buf));
    }

    #[test]
    fn odd_layer_duplicates_last() {
        let left = node_hash(&h(1), &h(2));
        let right = node_hash(&h(3), &h(3));
        assert_eq!(merkle_root(&[h(1), h(2), h(3)]), node_hash(&left, &right));
    }

    #[test]
    fn compact_size_boundaries() {
        let cases: [(u64, &[u8]); 4] = [
            (0xfc, &[0xfc]),
            (0xfd, &[0xfd, 0xfd, 0x00]),
            (0x1_0000, &[0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0x1_0000_0000, &[0xff, 0, 0, 0, 0, 1, 0, 0, 0]),
        ];
        for (n, expected) in cases {
            let mut out = Vec::new();
            write_compact_size(&mut out, n);
            assert_eq!(out, expected, "n = {n:#x}");
        }
    }

    #[test]
    fn script_push_opcodes() {
        let mut short = Vec::new();
        push_script_data(&mut short, &[0x2a]);
        assert_eq!(short, [0x01, 0x2a]);

        let mut long = Vec::new();
        push_script_data(&mut long, &[0u8; 80]);
        assert_eq!(long[..2], [0x4c, 80]);
        assert_eq!(long.len(), 82);
    }
}
