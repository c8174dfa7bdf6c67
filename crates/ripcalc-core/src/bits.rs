//! Byte-wise mask arithmetic and bit-string rendering
//!
//! Both address families work on fixed-size big-endian byte arrays
//! (`[u8; 4]` for IPv4, `[u8; 16]` for IPv6), so every helper here is
//! generic over the array length.

/// CIDR mask with the top `prefix_len` bits set.
///
/// Prefixes wider than the array saturate to an all-ones mask.
pub fn prefix_mask<const N: usize>(prefix_len: u8) -> [u8; N] {
    let mut remaining = usize::from(prefix_len).min(N * 8);
    let mut mask = [0u8; N];

    for byte in mask.iter_mut() {
        if remaining >= 8 {
            *byte = 0xFF;
            remaining -= 8;
        } else {
            *byte = !(0xFFu8 >> remaining);
            break;
        }
    }

    mask
}

/// Bitwise NOT of every byte
pub fn complement<const N: usize>(bytes: [u8; N]) -> [u8; N] {
    bytes.map(|b| !b)
}

/// Bitwise AND of two arrays
pub fn and<const N: usize>(a: [u8; N], b: [u8; N]) -> [u8; N] {
    std::array::from_fn(|i| a[i] & b[i])
}

/// Bitwise OR of two arrays
pub fn or<const N: usize>(a: [u8; N], b: [u8; N]) -> [u8; N] {
    std::array::from_fn(|i| a[i] | b[i])
}

/// Whether `addr` falls inside the block `network/prefix_len`
pub fn in_block<const N: usize>(network: [u8; N], prefix_len: u8, addr: [u8; N]) -> bool {
    let mask = prefix_mask::<N>(prefix_len);
    and(addr, mask) == and(network, mask)
}

/// How an address is split into printable groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLayout {
    /// Bytes per group
    pub group_bytes: usize,
    /// Character written between groups
    pub separator: char,
}

impl BitLayout {
    /// `11000000.10101000.00000001.00000000`
    pub const DOTTED_OCTETS: BitLayout = BitLayout {
        group_bytes: 1,
        separator: '.',
    };

    /// Eight 16-bit groups joined by `:`
    pub const COLON_HEXTETS: BitLayout = BitLayout {
        group_bytes: 2,
        separator: ':',
    };

    /// Render every bit of `bytes`, most significant first.
    ///
    /// With `boundary` set, a single space is written right before bit
    /// index `boundary` (after the group separator when the boundary falls
    /// on a group edge). Boundaries of 0 or at/after the last bit are
    /// ignored, since the whole address is then network or host bits.
    pub fn render(&self, bytes: &[u8], boundary: Option<u8>) -> String {
        let width = bytes.len() * 8;
        let boundary = boundary
            .map(usize::from)
            .filter(|&b| b > 0 && b < width);

        let mut out = String::with_capacity(width + bytes.len() + 1);
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 && i % self.group_bytes == 0 {
                out.push(self.separator);
            }

            for bit in 0..8 {
                if boundary == Some(i * 8 + bit) {
                    out.push(' ');
                }
                out.push(if byte & (0x80u8 >> bit) != 0 { '1' } else { '0' });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_mask_v4() {
        assert_eq!(prefix_mask::<4>(0), [0, 0, 0, 0]);
        assert_eq!(prefix_mask::<4>(8), [255, 0, 0, 0]);
        assert_eq!(prefix_mask::<4>(12), [255, 240, 0, 0]);
        assert_eq!(prefix_mask::<4>(24), [255, 255, 255, 0]);
        assert_eq!(prefix_mask::<4>(31), [255, 255, 255, 254]);
        assert_eq!(prefix_mask::<4>(32), [255, 255, 255, 255]);
    }

    #[test]
    fn test_prefix_mask_saturates() {
        assert_eq!(prefix_mask::<4>(200), [255; 4]);
    }

    #[test]
    fn test_prefix_mask_v6() {
        let mask = prefix_mask::<16>(10);
        assert_eq!(mask[0], 0xFF);
        assert_eq!(mask[1], 0xC0);
        assert!(mask[2..].iter().all(|&b| b == 0));

        assert_eq!(prefix_mask::<16>(128), [0xFF; 16]);
    }

    #[test]
    fn test_complement_and_or() {
        let mask = prefix_mask::<4>(24);
        assert_eq!(complement(mask), [0, 0, 0, 255]);
        assert_eq!(and([192, 168, 1, 77], mask), [192, 168, 1, 0]);
        assert_eq!(or([192, 168, 1, 0], complement(mask)), [192, 168, 1, 255]);
    }

    #[test]
    fn test_in_block() {
        assert!(in_block([10, 0, 0, 0], 8, [10, 200, 3, 4]));
        assert!(!in_block([10, 0, 0, 0], 8, [11, 0, 0, 0]));
        assert!(in_block([0, 0, 0, 0], 0, [255, 255, 255, 255]));
        assert!(in_block([172, 16, 0, 0], 12, [172, 31, 255, 255]));
        assert!(!in_block([172, 16, 0, 0], 12, [172, 32, 0, 0]));
    }

    #[test]
    fn test_render_dotted() {
        assert_eq!(
            BitLayout::DOTTED_OCTETS.render(&[192, 168, 0, 0], None),
            "11000000.10101000.00000000.00000000"
        );
    }

    #[test]
    fn test_render_boundary_on_group_edge() {
        assert_eq!(
            BitLayout::DOTTED_OCTETS.render(&[192, 168, 0, 1], Some(24)),
            "11000000.10101000.00000000. 00000001"
        );
    }

    #[test]
    fn test_render_boundary_inside_group() {
        assert_eq!(
            BitLayout::DOTTED_OCTETS.render(&[255, 240, 0, 0], Some(12)),
            "11111111.1111 0000.00000000.00000000"
        );
    }

    #[test]
    fn test_render_ignores_degenerate_boundary() {
        let plain = BitLayout::DOTTED_OCTETS.render(&[10, 0, 0, 1], None);
        assert_eq!(BitLayout::DOTTED_OCTETS.render(&[10, 0, 0, 1], Some(0)), plain);
        assert_eq!(BitLayout::DOTTED_OCTETS.render(&[10, 0, 0, 1], Some(32)), plain);
        assert!(!plain.contains(' '));
    }

    #[test]
    fn test_render_colon_hextets() {
        let mut bytes = [0u8; 16];
        bytes[15] = 1;
        let rendered = BitLayout::COLON_HEXTETS.render(&bytes, None);
        assert_eq!(rendered.split(':').count(), 8);
        assert!(rendered.split(':').all(|group| group.len() == 16));
        assert!(rendered.ends_with("0000000000000001"));
    }

    #[test]
    fn test_render_boundary_position_matches_prefix() {
        let bytes = [0xABu8; 16];
        for prefix in 1..128u8 {
            let rendered = BitLayout::COLON_HEXTETS.render(&bytes, Some(prefix));
            let (head, _) = rendered.split_once(' ').expect("boundary space");
            let digits = head.chars().filter(|c| *c == '0' || *c == '1').count();
            assert_eq!(digits, usize::from(prefix));
            assert_eq!(rendered.matches(' ').count(), 1);
        }
    }
}
