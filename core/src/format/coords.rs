use crate::format::finite;
use crate::prelude::{ReportError, ReportResult};

const MAX_LATITUDE_DDM: f64 = 9000.0;
const MAX_LONGITUDE_DDM: f64 = 18000.0;

/// Converts decimal degrees to `degrees * 100 + decimal minutes`.
///
/// The whole-degree part is truncated toward zero (floor for non-negative,
/// ceil for negative input) so the sign of the result always follows the
/// sign of the input.
pub fn degrees_to_ddm(degrees: f64) -> ReportResult<f64> {
    let degrees = finite("degrees", degrees)?;
    let whole = if degrees >= 0.0 {
        degrees.floor()
    } else {
        degrees.ceil()
    };
    Ok(100.0 * whole + (degrees - whole) * 60.0)
}

pub fn radians_to_ddm(radians: f64) -> ReportResult<f64> {
    degrees_to_ddm(finite("radians", radians)?.to_degrees())
}

/// Formats a DDM latitude/longitude pair as `LLLL.LLLLN-LLLLL.LLLLE`.
pub fn format_fix(latitude_ddm: f64, longitude_ddm: f64) -> ReportResult<String> {
    let latitude = finite("latitude", latitude_ddm)?;
    let longitude = finite("longitude", longitude_ddm)?;
    if latitude.abs() > MAX_LATITUDE_DDM {
        return Err(ReportError::domain(
            "latitude",
            format!("{latitude} exceeds {MAX_LATITUDE_DDM}"),
        ));
    }
    if longitude.abs() > MAX_LONGITUDE_DDM {
        return Err(ReportError::domain(
            "longitude",
            format!("{longitude} exceeds {MAX_LONGITUDE_DDM}"),
        ));
    }

    let north_south = if latitude >= 0.0 { 'N' } else { 'S' };
    let east_west = if longitude >= 0.0 { 'E' } else { 'W' };
    Ok(format!(
        "{:09.4}{}-{:010.4}{}",
        latitude.abs(),
        north_south,
        longitude.abs(),
        east_west
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn positive_degrees_floor_whole_part() {
        assert!(close(degrees_to_ddm(38.5).unwrap(), 3830.0));
        assert!(close(degrees_to_ddm(0.25).unwrap(), 15.0));
    }

    #[test]
    fn negative_degrees_ceil_whole_part() {
        assert!(close(degrees_to_ddm(-9.25).unwrap(), -915.0));
        assert!(close(degrees_to_ddm(-0.5).unwrap(), -30.0));
    }

    #[test]
    fn radians_go_through_degrees() {
        let ddm = radians_to_ddm(38.5f64.to_radians()).unwrap();
        assert!(close(ddm, 3830.0));
    }

    #[test]
    fn fix_pads_and_picks_hemisphere() {
        assert_eq!(
            format_fix(3830.0, -915.0).unwrap(),
            "3830.0000N-00915.0000W"
        );
        assert_eq!(
            format_fix(-5.123456, 12345.6).unwrap(),
            "0005.1235S-12345.6000E"
        );
    }

    #[test]
    fn zero_takes_positive_hemisphere() {
        assert_eq!(format_fix(0.0, 0.0).unwrap(), "0000.0000N-00000.0000E");
        assert_eq!(format_fix(-0.0, -0.0).unwrap(), "0000.0000N-00000.0000E");
    }

    #[test]
    fn out_of_range_fix_is_domain_error() {
        assert!(matches!(
            format_fix(9100.0, 0.0),
            Err(ReportError::Domain { .. })
        ));
        assert!(matches!(
            format_fix(0.0, -18000.5),
            Err(ReportError::Domain { .. })
        ));
        assert!(matches!(
            format_fix(f64::INFINITY, 0.0),
            Err(ReportError::Format { .. })
        ));
    }

    proptest! {
        #[test]
        fn negative_input_truncates_toward_zero(d in 0.001f64..179.999) {
            let ddm = degrees_to_ddm(-d).unwrap();
            prop_assert_eq!((ddm / 100.0).trunc(), (-d).ceil());
            let positive = degrees_to_ddm(d).unwrap();
            prop_assert_eq!((positive / 100.0).trunc(), d.floor());
        }

        #[test]
        fn fix_field_widths_are_fixed(lat in -89.99f64..89.99, lon in -179.99f64..179.99) {
            let fix = format_fix(degrees_to_ddm(lat).unwrap(), degrees_to_ddm(lon).unwrap()).unwrap();
            let (lat_part, lon_part) = fix.split_once('-').unwrap();
            prop_assert_eq!(lat_part.len(), 10);
            prop_assert_eq!(lon_part.len(), 11);
            prop_assert!(lat_part.ends_with('N') || lat_part.ends_with('S'));
            prop_assert!(lon_part.ends_with('E') || lon_part.ends_with('W'));
        }
    }
}
