use inference_core::{ConfidenceLevel, ErrorKind, IntervalResult, RandomStream, Sidedness};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_interval_is_ordered_or_rejected(a in -1e6f64..1e6, b in -1e6f64..1e6, level in 0.01f64..0.99) {
        let level = ConfidenceLevel::new(level).unwrap();
        match IntervalResult::new(a, b, 0.5 * (a + b), level, Sidedness::TwoSided) {
            Ok(ci) => prop_assert!(ci.lower <= ci.upper),
            Err(e) => {
                prop_assert!(a > b);
                prop_assert_eq!(e.kind(), ErrorKind::NumericalAnomaly);
            }
        }
    }

    #[test]
    fn prop_streams_replay(seed in any::<u64>(), stream in 0u64..1000, n in 1usize..50) {
        let sample: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut first = Vec::new();
        let mut second = Vec::new();
        RandomStream::new(seed, stream).resample_into(&sample, &mut first);
        RandomStream::new(seed, stream).resample_into(&sample, &mut second);
        prop_assert_eq!(first, second);
    }
}
