//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`; a neighbor receives
/// `error * weight / divisor` of the quantization error. Offsets always point
/// at pixels that have not been visited yet in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

impl Kernel {
    /// Sum of all weights. Equal to the divisor for full propagation.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes 100% of the error (16/16) to 4 neighbors.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_propagates_everything() {
        assert_eq!(
            FLOYD_STEINBERG.total_weight(),
            FLOYD_STEINBERG.divisor as u32
        );
    }

    #[test]
    fn test_floyd_steinberg_only_reaches_forward() {
        for &(dx, dy, _) in FLOYD_STEINBERG.entries {
            assert!(dy > 0 || (dy == 0 && dx > 0), "({dx}, {dy}) points backward");
        }
    }
}
