use super::LaneKernel;

/// Plain-Rust kernel over lanes of `W` units.
///
/// The OR-reductions below are written so the autovectorizer can turn them
/// into packed compares on targets without a dedicated kernel. `W == 1` is
/// the scalar baseline.
pub(crate) struct Portable<const W: usize>;

impl<const W: usize> LaneKernel for Portable<W> {
    const WIDTH: usize = W;

    #[inline]
    fn utf8_lane_is_ascii(lane: &[u8]) -> bool {
        debug_assert_eq!(lane.len(), W);
        lane.iter().fold(0u8, |acc, &b| acc | b) < 0x80
    }

    #[inline]
    fn utf16_lane_is_ascii(lane: &[u16]) -> bool {
        debug_assert_eq!(lane.len(), W);
        lane.iter().fold(0u16, |acc, &u| acc | u) < 0x80
    }
}

#[cfg(test)]
mod tests {
    use super::Portable;
    use crate::lanes::LaneKernel;

    #[test]
    fn ascii_tests_see_every_position() {
        let mut lane = [b'a'; 8];
        assert!(Portable::<8>::utf8_lane_is_ascii(&lane));
        for i in 0..8 {
            lane[i] = 0x80;
            assert!(!Portable::<8>::utf8_lane_is_ascii(&lane));
            lane[i] = b'a';
        }

        let mut lane16 = [u16::from(b'a'); 4];
        assert!(Portable::<4>::utf16_lane_is_ascii(&lane16));
        lane16[3] = 0x100;
        assert!(!Portable::<4>::utf16_lane_is_ascii(&lane16));
    }
}
