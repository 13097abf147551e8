use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Half-open frame range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// First frame in the range
    pub start: usize,
    /// One past the last frame
    pub end: usize,
}

impl Interval {
    /// Create a new interval
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "interval start {} after end {}", start, end);
        Interval { start, end }
    }

    /// Number of frames covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the interval covers no frames
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length as wall-clock time
    pub fn duration(&self, sample_rate: u32) -> Duration {
        super::frames_to_duration(self.len(), sample_rate)
    }

    /// Check that `cuts` are non-empty, sorted, disjoint and inside `[0, total)`
    pub fn check_sorted_disjoint(cuts: &[Interval], total: usize) -> AudioResult<()> {
        let mut cursor = 0;
        for cut in cuts {
            if cut.start >= cut.end || cut.start < cursor || cut.end > total {
                return Err(AudioError::ConsistencyViolation {
                    expected: format!("sorted disjoint cuts within [0, {})", total),
                    actual: format!("{:?} after frame {}", cut, cursor),
                });
            }
            cursor = cut.end;
        }
        Ok(())
    }

    /// Keep intervals: the parts of `[0, total)` not covered by `cuts`.
    ///
    /// `cuts` must already satisfy [`Interval::check_sorted_disjoint`].
    pub fn complement(cuts: &[Interval], total: usize) -> Vec<Interval> {
        let mut keeps = Vec::with_capacity(cuts.len() + 1);
        let mut cursor = 0;

        for cut in cuts {
            if cut.start > cursor {
                keeps.push(Interval::new(cursor, cut.start));
            }
            cursor = cut.end;
        }

        if cursor < total {
            keeps.push(Interval::new(cursor, total));
        }

        keeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk keeps and cuts together and make sure they tile `[0, total)`
    fn assert_tiles(cuts: &[Interval], total: usize) {
        let keeps = Interval::complement(cuts, total);
        let mut all: Vec<Interval> = cuts.iter().chain(keeps.iter()).copied().collect();
        all.sort_by_key(|i| i.start);

        let mut cursor = 0;
        for interval in &all {
            assert_eq!(interval.start, cursor, "gap or overlap at {}", cursor);
            cursor = interval.end;
        }
        assert_eq!(cursor, total);
    }

    #[test]
    fn test_complement_no_cuts() {
        assert_eq!(Interval::complement(&[], 100), vec![Interval::new(0, 100)]);
    }

    #[test]
    fn test_complement_full_cut() {
        assert!(Interval::complement(&[Interval::new(0, 100)], 100).is_empty());
    }

    #[test]
    fn test_complement_edges_and_middle() {
        let cuts = [Interval::new(0, 10), Interval::new(40, 60), Interval::new(90, 100)];
        assert_eq!(
            Interval::complement(&cuts, 100),
            vec![Interval::new(10, 40), Interval::new(60, 90)]
        );
    }

    #[test]
    fn test_complement_tiles_range() {
        let layouts: Vec<Vec<Interval>> = vec![
            vec![],
            vec![Interval::new(0, 1)],
            vec![Interval::new(5, 7), Interval::new(7, 9)],
            vec![Interval::new(3, 50), Interval::new(51, 99)],
            vec![Interval::new(0, 100)],
        ];
        for cuts in layouts {
            Interval::check_sorted_disjoint(&cuts, 100).unwrap();
            assert_tiles(&cuts, 100);
        }
    }

    #[test]
    fn test_check_rejects_bad_cuts() {
        let overlapping = [Interval::new(0, 10), Interval::new(5, 20)];
        assert!(Interval::check_sorted_disjoint(&overlapping, 100).is_err());

        let unsorted = [Interval::new(50, 60), Interval::new(10, 20)];
        assert!(Interval::check_sorted_disjoint(&unsorted, 100).is_err());

        let out_of_range = [Interval::new(90, 110)];
        assert!(Interval::check_sorted_disjoint(&out_of_range, 100).is_err());

        let empty = [Interval::new(10, 10)];
        assert!(Interval::check_sorted_disjoint(&empty, 100).is_err());

        // Fields are public, so an inverted range can bypass `new`
        let inverted = [Interval { start: 50, end: 10 }];
        assert!(Interval::check_sorted_disjoint(&inverted, 100).is_err());
    }

    #[test]
    fn test_duration() {
        let cut = Interval::new(0, 22050);
        assert_eq!(cut.duration(44100), Duration::from_millis(500));
    }
}
