//! Colocation job files.
//!
//! A job file describes the destination grid, the ungridded data and
//! optional colocation settings. YAML and JSON are both accepted:
//!
//! ```yaml
//! grid:
//!   axes:
//!     - name: latitude
//!       points: [-10, -5, 0, 5, 10]
//!     - name: longitude
//!       bounds: [[-7.5, -2.5], [-2.5, 2.5], [2.5, 7.5]]
//! data:
//!   coords:
//!     - name: latitude
//!       points: [0.5]
//!     - name: longitude
//!       points: [0.5]
//!   values: [1.2]
//! colocation:
//!   constraint: binning
//!   fill_value: -999.9
//! ```

use anyhow::{bail, Context, Result};
use colocation::{
    ColocationConfig, ConstraintKind, DestinationGrid, GridAxis, KernelKind, UngriddedData,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete colocation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    pub grid: GridSpec,
    pub data: UngriddedData,
    #[serde(default)]
    pub colocation: ColocationOverrides,
}

/// Destination grid description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    pub axes: Vec<AxisSpec>,
}

/// One grid axis, given by cell centres or by explicit cell bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSpec {
    pub name: String,
    #[serde(default)]
    pub standard_name: Option<String>,
    #[serde(default)]
    pub points: Option<Vec<f64>>,
    #[serde(default)]
    pub bounds: Option<Vec<[f64; 2]>>,
}

impl AxisSpec {
    fn to_axis(&self) -> Result<GridAxis> {
        let axis = match (&self.bounds, &self.points) {
            (Some(bounds), _) => {
                let pairs: Vec<(f64, f64)> = bounds.iter().map(|b| (b[0], b[1])).collect();
                GridAxis::from_bounds(&self.name, &pairs)?
            }
            (None, Some(points)) => GridAxis::from_points(&self.name, points)?,
            (None, None) => bail!("axis '{}' needs either points or bounds", self.name),
        };
        Ok(match &self.standard_name {
            Some(standard_name) => axis.with_standard_name(standard_name),
            None => axis,
        })
    }
}

impl GridSpec {
    /// Build the destination grid.
    pub fn build(&self) -> Result<DestinationGrid> {
        let axes = self
            .axes
            .iter()
            .map(AxisSpec::to_axis)
            .collect::<Result<Vec<_>>>()?;
        Ok(DestinationGrid::new(axes)?)
    }
}

/// Colocation settings that override a base configuration when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColocationOverrides {
    #[serde(default)]
    pub constraint: Option<ConstraintKind>,
    #[serde(default, with = "colocation::float_format::float_opt")]
    pub fill_value: Option<f64>,
    #[serde(default)]
    pub kernel: Option<KernelKind>,
    #[serde(default)]
    pub parallel: Option<bool>,
}

impl ColocationOverrides {
    /// Apply the settings that are present on top of `config`.
    pub fn apply(&self, config: &mut ColocationConfig) {
        if let Some(constraint) = self.constraint {
            config.constraint = constraint;
        }
        if let Some(fill_value) = self.fill_value {
            config.fill_value = fill_value;
        }
        if let Some(kernel) = self.kernel {
            config.kernel = kernel;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
    }
}

/// Load a job file. Files ending in `.json` are parsed as JSON, anything
/// else as YAML.
pub fn load_job<P: AsRef<Path>>(path: P) -> Result<JobFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file: {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON job file: {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML job file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_YAML: &str = r#"
grid:
  axes:
    - name: latitude
      standard_name: latitude
      points: [-10, -5, 0, 5, 10]
    - name: longitude
      bounds: [[-7.5, -2.5], [-2.5, 2.5], [2.5, 7.5]]
data:
  coords:
    - name: latitude
      points: [0.5]
    - name: longitude
      standard_name: not_a_cf_name
      points: [0.5]
  values: [1.2]
colocation:
  constraint: binning
  fill_value: -999.9
"#;

    #[test]
    fn test_parse_yaml_job() {
        let job: JobFile = serde_yaml::from_str(JOB_YAML).unwrap();
        assert_eq!(job.grid.axes.len(), 2);
        assert_eq!(job.data.values, vec![1.2]);
        assert_eq!(
            job.data.coords[1].standard_name.as_deref(),
            Some("not_a_cf_name")
        );
        assert_eq!(job.colocation.constraint, Some(ConstraintKind::Binning));
        assert_eq!(job.colocation.fill_value, Some(-999.9));
        assert_eq!(job.colocation.parallel, None);
    }

    #[test]
    fn test_build_grid_from_points_and_bounds() {
        let job: JobFile = serde_yaml::from_str(JOB_YAML).unwrap();
        let grid = job.grid.build().unwrap();
        assert_eq!(grid.shape(), vec![5, 3]);
        assert_eq!(grid.axes()[0].standard_name(), Some("latitude"));
        assert_eq!(grid.axes()[1].bounds()[1].upper, 2.5);
    }

    #[test]
    fn test_axis_without_points_or_bounds() {
        let grid = GridSpec {
            axes: vec![AxisSpec {
                name: "x".to_string(),
                standard_name: None,
                points: None,
                bounds: None,
            }],
        };
        let err = grid.build().unwrap_err();
        assert!(err.to_string().contains("needs either points or bounds"));
    }

    #[test]
    fn test_overrides_only_touch_present_fields() {
        let mut config = ColocationConfig {
            parallel: true,
            ..Default::default()
        };
        let overrides = ColocationOverrides {
            fill_value: Some(0.0),
            ..Default::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.fill_value, 0.0);
        assert!(config.parallel);
        assert_eq!(config.constraint, ConstraintKind::Interval);
    }

    #[test]
    fn test_yaml_infinite_fill_value() {
        let overrides: ColocationOverrides = serde_yaml::from_str("fill_value: .inf").unwrap();
        assert_eq!(overrides.fill_value, Some(f64::INFINITY));
    }

    #[test]
    fn test_json_fill_value_spelled_out() {
        let overrides: ColocationOverrides =
            serde_json::from_str(r#"{"fill_value": "-inf"}"#).unwrap();
        assert_eq!(overrides.fill_value, Some(f64::NEG_INFINITY));

        let overrides: ColocationOverrides = serde_json::from_str(r#"{"fill_value": null}"#).unwrap();
        assert_eq!(overrides.fill_value, None);
    }
}
