use crate::{
    config::SymmetryConfig,
    geom::{slice_angle, Segment},
};

/// Replicates the base slice around the full circle.
///
/// Output is grouped by rotation index, then slice order, with each
/// original segment followed by its mirror image when mirroring is on.
pub(crate) fn replicate(slice: &[Segment], config: &SymmetryConfig) -> Vec<Segment> {
    let arc = slice_angle(config.count());
    let working: Vec<Segment> = if config.mirror {
        slice.iter().flat_map(|&s| [s, s.mirror()]).collect()
    } else {
        slice.to_vec()
    };

    let mut out = Vec::with_capacity(working.len() * config.count() as usize);
    for k in 0..config.count() {
        let angle = k as f64 * arc;
        out.extend(working.iter().map(|s| s.rotate(angle)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    const EPS: f64 = 1e-9;

    fn sample_slice() -> Vec<Segment> {
        vec![
            Segment::new(Point::new(0., 0.), Point::new(0.6, 0.1)),
            Segment::new(Point::new(0.6, 0.1), Point::new(0.8, 0.3)),
            Segment::new(Point::new(0.4, 0.05), Point::new(0.45, 0.25)),
        ]
    }

    fn contains(set: &[Segment], needle: Segment) -> bool {
        set.iter().any(|s| s.approx_eq(needle, 1e-6))
    }

    #[test]
    fn test_count_matches() {
        let slice = sample_slice();
        for count in 1..=12 {
            for mirror in [false, true] {
                let config = SymmetryConfig::new(count, mirror);
                let factor = if mirror { 2 } else { 1 };
                assert_eq!(
                    replicate(&slice, &config).len(),
                    slice.len() * count as usize * factor
                );
            }
        }
    }

    #[test]
    fn test_empty_slice() {
        for count in [1, 3, 6] {
            assert!(replicate(&[], &SymmetryConfig::new(count, true)).is_empty());
        }
    }

    #[test]
    fn test_deterministic() {
        let config = SymmetryConfig::new(7, true);
        assert_eq!(
            replicate(&sample_slice(), &config),
            replicate(&sample_slice(), &config)
        );
    }

    #[test]
    fn test_rotational_closure() {
        for mirror in [false, true] {
            let config = SymmetryConfig::new(5, mirror);
            let set = replicate(&sample_slice(), &config);
            let arc = slice_angle(5);
            for s in &set {
                assert!(contains(&set, s.rotate(arc)));
            }
        }
    }

    #[test]
    fn test_six_fold_line() {
        let slice = [Segment::new(Point::ORIGIN, Point::new(10., 0.))];
        let set = replicate(&slice, &SymmetryConfig::new(6, false));
        assert_eq!(set.len(), 6);
        for (k, s) in set.iter().enumerate() {
            let angle = (60. * k as f64).to_radians();
            let expected = Segment::new(
                Point::ORIGIN,
                Point::new(10. * angle.cos(), 10. * angle.sin()),
            );
            assert!(s.approx_eq(expected, EPS));
        }
    }

    #[test]
    fn test_four_fold_mirrored() {
        let slice = [Segment::new(Point::ORIGIN, Point::new(10., 0.))];
        let set = replicate(&slice, &SymmetryConfig::new(4, true));
        assert_eq!(set.len(), 8);
        for k in 0..4 {
            let angle = (90. * k as f64).to_radians();
            let expected = Segment::new(Point::ORIGIN, Point::from_polar(10., angle));
            assert!(set[2 * k].approx_eq(expected, EPS));
            assert!(set[2 * k + 1].approx_eq(expected, EPS));
        }
    }

    #[test]
    fn test_mirrored_copy_is_reflected() {
        let s = Segment::new(Point::new(0.2, 0.1), Point::new(0.5, 0.3));
        let set = replicate(&[s], &SymmetryConfig::new(1, true));
        assert_eq!(set, vec![s, s.mirror()]);
        assert_eq!(set[1].end, Point::new(0.5, -0.3));
    }
}
