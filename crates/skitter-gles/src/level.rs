/// GL feature level, selected once at init from the driver-reported version.
///
/// ES 3.x drivers get the instanced path; ES 2.0 drivers fall back to a
/// per-instance draw loop. Desktop GL (common in development hosts) maps onto
/// the same split by instancing support: `vertex_attrib_divisor` landed in
/// GL 3.3.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FeatureLevel {
    Es2,
    Es3,
}

impl FeatureLevel {
    /// Picks the feature level for a driver-reported version, or `None` when
    /// the driver is below the ES 2.0 / GL 2.0 floor.
    pub fn detect(is_embedded: bool, major: u32, minor: u32) -> Option<Self> {
        match (is_embedded, major, minor) {
            (true, 3.., _) => Some(Self::Es3),
            (true, 2, _) => Some(Self::Es2),
            (false, 4.., _) | (false, 3, 3..) => Some(Self::Es3),
            (false, 2..=3, _) => Some(Self::Es2),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Es2 => "ES2",
            Self::Es3 => "ES3",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_versions() {
        assert_eq!(FeatureLevel::detect(true, 3, 0), Some(FeatureLevel::Es3));
        assert_eq!(FeatureLevel::detect(true, 3, 2), Some(FeatureLevel::Es3));
        assert_eq!(FeatureLevel::detect(true, 2, 0), Some(FeatureLevel::Es2));
        assert_eq!(FeatureLevel::detect(true, 1, 1), None);
    }

    #[test]
    fn desktop_versions_split_on_instancing_support() {
        assert_eq!(FeatureLevel::detect(false, 4, 6), Some(FeatureLevel::Es3));
        assert_eq!(FeatureLevel::detect(false, 3, 3), Some(FeatureLevel::Es3));
        assert_eq!(FeatureLevel::detect(false, 3, 2), Some(FeatureLevel::Es2));
        assert_eq!(FeatureLevel::detect(false, 2, 1), Some(FeatureLevel::Es2));
        assert_eq!(FeatureLevel::detect(false, 1, 5), None);
    }
}
