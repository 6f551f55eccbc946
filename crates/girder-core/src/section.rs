//! The steel beam section record and the seed catalogue.
//!
//! A [`Beam`] is a fixed-schema record keyed by its section designation
//! (exact-string, case-sensitive). All other attributes are numeric physical
//! properties; the system trusts caller-supplied values and enforces no
//! cross-field invariants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A structural steel beam cross-section.
///
/// Absent JSON fields decode to zero: a full replace with a partial body
/// zeroes the unfilled properties rather than preserving the old values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Beam {
    /// Human-readable identifier, e.g. `UB406x178x74`. Acts as the catalogue
    /// key; uniqueness is not enforced.
    pub section_designation: String,
    /// Mass per metre (kg/m).
    pub mass_per_metre: f64,
    /// Depth of section (mm).
    pub depth_of_section: f64,
    /// Width of section (mm).
    pub width_of_section: f64,
    /// Web thickness (mm).
    pub thickness_web: f64,
    /// Flange thickness (mm).
    pub thickness_flange: f64,
    /// Root radius (mm).
    pub root_radius: f64,
    /// Depth between fillets (mm).
    pub depth_between_fillets: f64,
    /// Local buckling ratio for the web.
    pub ratios_for_local_buckling_web: f64,
    /// Local buckling ratio for the flange.
    pub ratios_for_local_buckling_flange: f64,
    /// End clearance for detailing (mm).
    pub end_clearance: f64,
    /// Notch dimension for detailing (mm).
    pub notch: f64,
    /// Detailing dimension N (mm).
    pub dimensions_for_detailing_n: f64,
    /// Surface area per metre (m²/m).
    pub surface_area_per_metre: f64,
    /// Surface area per tonne (m²/t).
    pub surface_area_per_tonne: f64,
    /// Second moment of area, y-y axis (cm⁴).
    pub second_moment_of_area_axis_y: f64,
    /// Second moment of area, z-z axis (cm⁴).
    pub second_moment_of_area_axis_z: f64,
    /// Radius of gyration, y-y axis (cm).
    pub radius_of_gyration_axis_y: f64,
    /// Radius of gyration, z-z axis (cm).
    pub radius_of_gyration_axis_z: f64,
    /// Elastic modulus, y-y axis (cm³).
    pub elastic_modulus_axis_y: f64,
    /// Elastic modulus, z-z axis (cm³).
    pub elastic_modulus_axis_z: f64,
    /// Plastic modulus, y-y axis (cm³).
    pub plastic_modulus_axis_y: f64,
    /// Plastic modulus, z-z axis (cm³).
    pub plastic_modulus_axis_z: f64,
    /// Buckling parameter.
    pub buckling_parameter: f64,
    /// Torsional index.
    pub torsional_index: f64,
    /// Warping constant (dm⁶).
    pub warping_constant: f64,
    /// Torsional constant (cm⁴).
    pub torsional_constant: f64,
    /// Area of section (cm²).
    pub area_of_section: f64,
}

/// Returns the seed catalogue served by a freshly started process:
/// `UB406x178x74` followed by `UB406x178x67`, in that order.
#[must_use]
pub fn standard_sections() -> Vec<Beam> {
    vec![
        Beam {
            section_designation: "UB406x178x74".to_string(),
            mass_per_metre: 74.6,
            depth_of_section: 412.8,
            width_of_section: 179.5,
            thickness_web: 9.3,
            thickness_flange: 16.0,
            root_radius: 10.2,
            depth_between_fillets: 360.8,
            ratios_for_local_buckling_web: 38.8,
            ratios_for_local_buckling_flange: 5.61,
            end_clearance: 369.0,
            notch: 360.8,
            dimensions_for_detailing_n: 45.0,
            surface_area_per_metre: 1.17,
            surface_area_per_tonne: 15.7,
            second_moment_of_area_axis_y: 27400.0,
            second_moment_of_area_axis_z: 1600.0,
            radius_of_gyration_axis_y: 17.1,
            radius_of_gyration_axis_z: 4.22,
            elastic_modulus_axis_y: 1330.0,
            elastic_modulus_axis_z: 178.0,
            plastic_modulus_axis_y: 1500.0,
            plastic_modulus_axis_z: 275.0,
            buckling_parameter: 0.338,
            torsional_index: 29.6,
            warping_constant: 0.581,
            torsional_constant: 53.8,
            area_of_section: 95.0,
        },
        Beam {
            section_designation: "UB406x178x67".to_string(),
            mass_per_metre: 67.1,
            depth_of_section: 406.4,
            width_of_section: 177.9,
            thickness_web: 8.6,
            thickness_flange: 12.8,
            root_radius: 10.2,
            depth_between_fillets: 360.8,
            ratios_for_local_buckling_web: 42.0,
            ratios_for_local_buckling_flange: 6.95,
            end_clearance: 362.6,
            notch: 360.8,
            dimensions_for_detailing_n: 45.0,
            surface_area_per_metre: 1.15,
            surface_area_per_tonne: 17.1,
            second_moment_of_area_axis_y: 23500.0,
            second_moment_of_area_axis_z: 1350.0,
            radius_of_gyration_axis_y: 16.6,
            radius_of_gyration_axis_z: 4.09,
            elastic_modulus_axis_y: 1160.0,
            elastic_modulus_axis_z: 152.0,
            plastic_modulus_axis_y: 1300.0,
            plastic_modulus_axis_z: 234.0,
            buckling_parameter: 0.364,
            torsional_index: 25.4,
            warping_constant: 0.424,
            torsional_constant: 36.4,
            area_of_section: 85.5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalogue_order_is_stable() {
        let sections = standard_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_designation, "UB406x178x74");
        assert_eq!(sections[1].section_designation, "UB406x178x67");
    }

    #[test]
    fn missing_json_fields_decode_to_zero() {
        let beam: Beam =
            serde_json::from_str(r#"{"section_designation":"UB406x178x90"}"#).expect("decode");
        assert_eq!(beam.section_designation, "UB406x178x90");
        assert_eq!(beam.mass_per_metre, 0.0);
        assert_eq!(beam.area_of_section, 0.0);
    }

    #[test]
    fn json_field_names_are_snake_case() {
        let beam = &standard_sections()[0];
        let value = serde_json::to_value(beam).expect("encode");
        assert_eq!(value["section_designation"], "UB406x178x74");
        assert_eq!(value["mass_per_metre"], 74.6);
        assert_eq!(value["ratios_for_local_buckling_flange"], 5.61);
    }
}
