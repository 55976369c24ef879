use crate::models::{FrequencySpan, Network};

/// Slice a network to the inclusive MHz window `[start_mhz, stop_mhz]`.
///
/// Returns a new network; the input is left untouched. An empty window yields
/// an empty network rather than an error.
pub fn slice_mhz(network: &Network, start_mhz: f64, stop_mhz: f64) -> Network {
    network.range_mhz(start_mhz, stop_mhz)
}

/// Slice a network to a span whose bounds are taken as MHz.
pub fn slice_span(network: &Network, span: &FrequencySpan) -> Network {
    slice_mhz(network, span.start(), span.stop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use num_complex::Complex64;
    use proptest::prelude::*;

    fn network_at(freqs_mhz: &[f64]) -> Network {
        let samples = freqs_mhz
            .iter()
            .map(|f| Sample::new(f * 1e6, vec![vec![Complex64::new(1.0, 0.0)]]))
            .collect();
        Network::new("dut", samples).unwrap()
    }

    #[test]
    fn test_slice_span_uses_mhz() {
        let network = network_at(&[700.0, 710.0, 720.0, 730.0, 740.0]);
        let span = FrequencySpan::mhz(717.0, 728.0).unwrap();
        let sliced = slice_span(&network, &span);
        assert_eq!(sliced.len(), 1);
        assert_eq!(sliced.samples()[0].frequency_hz, 720e6);
    }

    #[test]
    fn test_slice_keeps_bounds() {
        let network = network_at(&[700.0, 800.0, 900.0]);
        assert_eq!(slice_mhz(&network, 700.0, 900.0).len(), 3);
        assert_eq!(slice_mhz(&network, 701.0, 899.0).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_slice_is_ordered_subsequence_in_window(
            steps in proptest::collection::vec(0.5f64..50.0, 0..40),
            a in 0.0f64..1500.0,
            b in 0.0f64..1500.0,
        ) {
            let mut freq = 100.0;
            let freqs: Vec<f64> = steps.iter().map(|s| { freq += s; freq }).collect();
            let network = network_at(&freqs);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let sliced = slice_mhz(&network, lo, hi);
            prop_assert!(sliced.len() <= network.len());

            let out: Vec<f64> = sliced.samples().iter().map(|s| s.frequency_hz).collect();
            prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
            for f in &out {
                prop_assert!(*f >= lo * 1e6 && *f <= hi * 1e6);
            }
            let expected: Vec<f64> = network
                .samples()
                .iter()
                .map(|s| s.frequency_hz)
                .filter(|f| *f >= lo * 1e6 && *f <= hi * 1e6)
                .collect();
            prop_assert_eq!(out, expected);
        }
    }
}
