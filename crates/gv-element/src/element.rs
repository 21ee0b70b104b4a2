//! The GeoElement capability: payload + CRS + validation.

use gv_core::Crs;
use tracing::debug;

use crate::payload::GeoPayload;
use crate::GeoError;

/// Recognized construction options for geo elements.
#[derive(Debug, Clone, Default)]
pub struct GeoOptions {
    /// Explicit coordinate reference system of the data. Must match the
    /// inferred CRS when both are present.
    pub crs: Option<Crs>,
    /// Style-group label; defaults to the variant name.
    pub group: Option<String>,
}

impl GeoOptions {
    pub fn with_crs(crs: Crs) -> Self {
        Self {
            crs: Some(crs),
            ..Self::default()
        }
    }
}

/// Overrides applied by [`GeoElement::clone_with`].
///
/// A `None` field keeps the original's value; `crs: Some(None)` explicitly
/// unsets the CRS (it may be re-inferred from the new payload).
#[derive(Debug, Clone, Default)]
pub struct CloneOverrides {
    pub crs: Option<Option<Crs>>,
    pub group: Option<String>,
}

impl CloneOverrides {
    pub fn crs(crs: Crs) -> Self {
        Self {
            crs: Some(Some(crs)),
            ..Self::default()
        }
    }

    pub fn unset_crs() -> Self {
        Self {
            crs: Some(None),
            ..Self::default()
        }
    }
}

/// A geospatial payload together with its coordinate reference system.
///
/// The CRS is fixed at construction: explicitly supplied, inferred from the
/// payload, or absent. Supplied and inferred values must agree when both
/// exist.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoElement {
    payload: GeoPayload,
    crs: Option<Crs>,
    group: String,
}

impl GeoElement {
    pub fn new(payload: GeoPayload, opts: GeoOptions, group: &str) -> Result<Self, GeoError> {
        let inferred = payload.inferred_crs();
        let crs = match (opts.crs, inferred) {
            (Some(supplied), Some(inferred)) => {
                if supplied != inferred {
                    return Err(GeoError::CrsConflict { supplied, inferred });
                }
                Some(supplied)
            }
            (Some(supplied), None) => Some(supplied),
            (None, Some(inferred)) => {
                debug!(crs = ?inferred, "adopting crs inferred from payload");
                Some(inferred)
            }
            (None, None) => None,
        };
        Ok(Self {
            payload,
            crs,
            group: opts.group.unwrap_or_else(|| group.to_string()),
        })
    }

    pub fn payload(&self) -> &GeoPayload {
        &self.payload
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Derives a new element, keeping this element's CRS and group unless
    /// the overrides say otherwise.
    ///
    /// The derivation is routed back through construction, so a replacement
    /// payload is re-validated against the effective CRS.
    pub fn clone_with(
        &self,
        payload: Option<GeoPayload>,
        overrides: CloneOverrides,
    ) -> Result<Self, GeoError> {
        let crs = overrides.crs.unwrap_or_else(|| self.crs.clone());
        let group = overrides.group.unwrap_or_else(|| self.group.clone());
        Self::new(
            payload.unwrap_or_else(|| self.payload.clone()),
            GeoOptions {
                crs,
                group: Some(group),
            },
            &self.group,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{CoordSystem, Dataset, ScatterData};

    fn geodetic_scatter() -> GeoPayload {
        GeoPayload::Dataset(Dataset::from_scatter(ScatterData::new(
            vec![0.0, 10.0],
            vec![45.0, 50.0],
            Some(CoordSystem::Geodetic { prime_meridian: 0.0 }),
        )))
    }

    fn bare_scatter() -> GeoPayload {
        GeoPayload::Dataset(Dataset::from_scatter(ScatterData::new(
            vec![0.0, 10.0],
            vec![45.0, 50.0],
            None,
        )))
    }

    #[test]
    fn inferred_crs_is_adopted() {
        let el = GeoElement::new(geodetic_scatter(), GeoOptions::default(), "Points").unwrap();
        assert_eq!(el.crs(), Some(&Crs::plate_carree()));
    }

    #[test]
    fn matching_supplied_crs_is_accepted() {
        let el = GeoElement::new(
            geodetic_scatter(),
            GeoOptions::with_crs(Crs::plate_carree()),
            "Points",
        )
        .unwrap();
        assert_eq!(el.crs(), Some(&Crs::plate_carree()));
    }

    #[test]
    fn conflicting_supplied_crs_fails() {
        let err = GeoElement::new(
            geodetic_scatter(),
            GeoOptions::with_crs(Crs::mercator()),
            "Points",
        )
        .unwrap_err();
        assert_eq!(
            err,
            GeoError::CrsConflict {
                supplied: Crs::mercator(),
                inferred: Crs::plate_carree(),
            }
        );
    }

    #[test]
    fn crs_stays_unset_without_inference_or_option() {
        let el = GeoElement::new(bare_scatter(), GeoOptions::default(), "Points").unwrap();
        assert!(el.crs().is_none());
    }

    #[test]
    fn clone_preserves_crs_by_default() {
        let el = GeoElement::new(
            bare_scatter(),
            GeoOptions::with_crs(Crs::mercator()),
            "Points",
        )
        .unwrap();
        let cloned = el.clone_with(None, CloneOverrides::default()).unwrap();
        assert_eq!(cloned.crs(), Some(&Crs::mercator()));
    }

    #[test]
    fn clone_override_is_honored() {
        let el = GeoElement::new(
            bare_scatter(),
            GeoOptions::with_crs(Crs::mercator()),
            "Points",
        )
        .unwrap();
        let cloned = el
            .clone_with(None, CloneOverrides::crs(Crs::orthographic(0.0, 45.0)))
            .unwrap();
        assert_eq!(cloned.crs(), Some(&Crs::orthographic(0.0, 45.0)));
    }

    #[test]
    fn clone_can_explicitly_unset_crs() {
        let el = GeoElement::new(
            bare_scatter(),
            GeoOptions::with_crs(Crs::mercator()),
            "Points",
        )
        .unwrap();
        let cloned = el.clone_with(None, CloneOverrides::unset_crs()).unwrap();
        assert!(cloned.crs().is_none());
    }

    #[test]
    fn clone_with_inferable_payload_reinfers_after_unset() {
        let el = GeoElement::new(bare_scatter(), GeoOptions::default(), "Points").unwrap();
        let cloned = el
            .clone_with(Some(geodetic_scatter()), CloneOverrides::unset_crs())
            .unwrap();
        assert_eq!(cloned.crs(), Some(&Crs::plate_carree()));
    }

    #[test]
    fn group_defaults_and_survives_clone() {
        let el = GeoElement::new(bare_scatter(), GeoOptions::default(), "Points").unwrap();
        assert_eq!(el.group(), "Points");
        let cloned = el.clone_with(None, CloneOverrides::default()).unwrap();
        assert_eq!(cloned.group(), "Points");
    }
}
