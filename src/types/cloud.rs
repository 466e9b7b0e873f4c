//! Cloud layer decoding.

use log::debug;
use std::fmt;

/// Convective cloud types that may be appended to a cloud layer group.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CloudType {
    /// `CB`
    Cumulonimbus,
    /// `TCU`
    ToweringCumulus,
    /// `CBMAM`
    CumulonimbusMammatus,
}

impl CloudType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CB" => Some(CloudType::Cumulonimbus),
            "TCU" => Some(CloudType::ToweringCumulus),
            "CBMAM" => Some(CloudType::CumulonimbusMammatus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CloudType::Cumulonimbus => "cumulonimbus",
            CloudType::ToweringCumulus => "towering cumulus",
            CloudType::CumulonimbusMammatus => "cumulonimbus mammatus",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decoded cloud layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCloudLayer {
    /// Coverage code as reported (`FEW`, `SCT`, `BKN`, `OVC`, `VV`).
    pub coverage: String,
    /// Base of the layer in feet above ground level.
    pub height_ft: u32,
    pub cloud_type: Option<CloudType>,
}

impl DecodedCloudLayer {
    /// Decodes a `[coverage, height in hundreds of feet, optional type]` tuple.
    ///
    /// Missing elements and unparseable heights decode to empty values.
    ///
    /// ```
    /// use metar::{CloudType, DecodedCloudLayer};
    ///
    /// let layer = DecodedCloudLayer::decode(&["BKN", "020", "CB"]);
    /// assert_eq!(layer.height_ft, 2000);
    /// assert_eq!(layer.cloud_type, Some(CloudType::Cumulonimbus));
    /// ```
    pub fn decode<S: AsRef<str>>(layer: &[S]) -> Self {
        let coverage = layer.first().map(|s| s.as_ref()).unwrap_or_default();
        let raw_height = layer.get(1).map(|s| s.as_ref()).unwrap_or_default();
        let height_ft = match raw_height.trim().parse::<u32>() {
            Ok(hundreds) => hundreds.saturating_mul(100),
            Err(_) => {
                debug!("Unparseable cloud height '{}', using 0", raw_height);
                0
            }
        };
        let cloud_type = layer.get(2).and_then(|code| CloudType::from_code(code.as_ref()));

        DecodedCloudLayer {
            coverage: coverage.to_string(),
            height_ft,
            cloud_type,
        }
    }
}

impl fmt::Display for DecodedCloudLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}FT", self.coverage, self.height_ft)?;
        if let Some(cloud_type) = self.cloud_type {
            write!(f, " ({})", cloud_type)?;
        }
        Ok(())
    }
}

pub fn decode_cloud_layers<S: AsRef<str>>(layers: &[Vec<S>]) -> Vec<DecodedCloudLayer> {
    layers
        .iter()
        .map(|layer| DecodedCloudLayer::decode(layer.as_slice()))
        .collect()
}
