//! LTE operating bands with their uplink/downlink frequency ranges (MHz).

use std::fmt;

use super::frequency::{BandSpec, FrequencySpan};
use crate::error::{AnalysisError, AnalysisResult};

type Range = (f64, f64);

/// `(band id, uplink, downlink)`; uplink is absent for downlink-only bands.
const LTE_BANDS: &[(i64, Option<Range>, Range)] = &[
    (1, Some((1920.0, 1980.0)), (2110.0, 2170.0)),
    (2, Some((1850.0, 1910.0)), (1930.0, 1990.0)),
    (3, Some((1710.0, 1785.0)), (1805.0, 1880.0)),
    (4, Some((1710.0, 1755.0)), (2110.0, 2155.0)),
    (5, Some((824.0, 849.0)), (869.0, 894.0)),
    (6, Some((830.0, 840.0)), (875.0, 885.0)),
    (7, Some((2500.0, 2570.0)), (2620.0, 2690.0)),
    (8, Some((880.0, 915.0)), (925.0, 960.0)),
    (9, Some((1749.9, 1784.9)), (1844.9, 1879.9)),
    (10, Some((1710.0, 1770.0)), (2110.0, 2170.0)),
    (11, Some((1427.9, 1447.9)), (1475.9, 1495.9)),
    (12, Some((698.0, 716.0)), (728.0, 746.0)),
    (13, Some((777.0, 787.0)), (746.0, 756.0)),
    (14, Some((788.0, 798.0)), (758.0, 768.0)),
    (17, Some((704.0, 716.0)), (734.0, 746.0)),
    (18, Some((815.0, 830.0)), (860.0, 875.0)),
    (19, Some((830.0, 845.0)), (875.0, 890.0)),
    (20, Some((832.0, 862.0)), (791.0, 821.0)),
    (21, Some((1447.9, 1462.9)), (1495.9, 1510.9)),
    (22, Some((3410.0, 3490.0)), (3510.0, 3590.0)),
    (23, Some((2000.0, 2020.0)), (2180.0, 2200.0)),
    (24, Some((1625.5, 1660.5)), (1525.0, 1559.0)),
    (25, Some((1850.0, 1915.0)), (1930.0, 1995.0)),
    (26, Some((814.0, 849.0)), (859.0, 894.0)),
    (27, Some((807.0, 824.0)), (852.0, 869.0)),
    (28, Some((703.0, 748.0)), (758.0, 803.0)),
    (29, None, (717.0, 728.0)),
    (30, Some((2305.0, 2315.0)), (2350.0, 2360.0)),
    (31, Some((452.5, 457.5)), (462.5, 467.5)),
    (32, None, (1452.0, 1496.0)),
    (33, Some((1900.0, 1920.0)), (1900.0, 1920.0)),
    (34, Some((2010.0, 2025.0)), (2010.0, 2025.0)),
    (35, Some((1850.0, 1910.0)), (1850.0, 1910.0)),
    (36, Some((1930.0, 1990.0)), (1930.0, 1990.0)),
    (37, Some((1910.0, 1930.0)), (1910.0, 1930.0)),
    (38, Some((2570.0, 2620.0)), (2570.0, 2620.0)),
    (39, Some((1880.0, 1920.0)), (1880.0, 1920.0)),
    (40, Some((2300.0, 2400.0)), (2300.0, 2400.0)),
    (41, Some((2496.0, 2690.0)), (2496.0, 2690.0)),
    (42, Some((3400.0, 3600.0)), (3400.0, 3600.0)),
    (43, Some((3600.0, 3800.0)), (3600.0, 3800.0)),
    (44, Some((703.0, 803.0)), (703.0, 803.0)),
    (45, Some((1447.0, 1467.0)), (1447.0, 1467.0)),
    (46, Some((5150.0, 5925.0)), (5150.0, 5925.0)),
    (47, Some((5855.0, 5925.0)), (5855.0, 5925.0)),
    (48, Some((3550.0, 3700.0)), (3550.0, 3700.0)),
    (49, Some((3550.0, 3700.0)), (3550.0, 3700.0)),
    (50, Some((1432.0, 1517.0)), (1432.0, 1517.0)),
    (51, Some((1427.0, 1432.0)), (1427.0, 1432.0)),
    (52, Some((3300.0, 3400.0)), (3300.0, 3400.0)),
    (53, Some((2483.5, 2495.0)), (2483.5, 2495.0)),
    (65, Some((1920.0, 2010.0)), (2110.0, 2200.0)),
    (66, Some((1710.0, 1780.0)), (2110.0, 2200.0)),
    (67, None, (738.0, 758.0)),
    (68, Some((698.0, 728.0)), (753.0, 783.0)),
    (69, None, (2570.0, 2620.0)),
    (70, Some((1695.0, 1710.0)), (1995.0, 2020.0)),
    (71, Some((663.0, 698.0)), (617.0, 652.0)),
    (72, Some((461.0, 469.0)), (451.0, 459.0)),
    (73, Some((461.0, 466.0)), (451.0, 456.0)),
    (74, Some((1427.0, 1470.0)), (1475.0, 1518.0)),
    (75, None, (1432.0, 1517.0)),
    (76, None, (1427.0, 1432.0)),
    (85, Some((698.0, 716.0)), (728.0, 746.0)),
];

/// An LTE band definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LteBand {
    pub band_id: i64,
    pub downlink: FrequencySpan,
    pub uplink: Option<FrequencySpan>,
}

impl fmt::Display for LteBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uplink {
            None => write!(
                f,
                "<Band {}>: downlink only: [{}-{}] MHz",
                self.band_id,
                self.downlink.start(),
                self.downlink.stop()
            ),
            Some(uplink) => write!(
                f,
                "<Band {}>: uplink [{}-{}] MHz, downlink: [{}-{}] MHz",
                self.band_id,
                uplink.start(),
                uplink.stop(),
                self.downlink.start(),
                self.downlink.stop()
            ),
        }
    }
}

/// The downlink span is the band marked on charts.
impl From<&LteBand> for BandSpec {
    fn from(band: &LteBand) -> Self {
        BandSpec::Structured(band.downlink.clone())
    }
}

/// Look up a band by numeric id.
pub fn lookup(band_id: i64) -> AnalysisResult<LteBand> {
    let (_, uplink, downlink) = LTE_BANDS
        .iter()
        .find(|(id, _, _)| *id == band_id)
        .ok_or(AnalysisError::UnknownBand(band_id))?;

    Ok(LteBand {
        band_id,
        downlink: FrequencySpan::mhz(downlink.0, downlink.1)?,
        uplink: uplink
            .map(|(start, stop)| FrequencySpan::mhz(start, stop))
            .transpose()?,
    })
}

/// Look up a band from its textual id (e.g. `"7"`).
pub fn lookup_str(band_id: &str) -> AnalysisResult<LteBand> {
    let id = band_id
        .trim()
        .parse::<i64>()
        .map_err(|_| AnalysisError::InvalidBandId(band_id.to_string()))?;
    lookup(id)
}

/// All band ids in the table, ascending.
pub fn band_ids() -> impl Iterator<Item = i64> {
    LTE_BANDS.iter().map(|(id, _, _)| *id)
}
