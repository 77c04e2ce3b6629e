//! California Housing dataset
//!
//! 20640 block groups from the 1990 U.S. census. The raw file
//! `cal_housing.data` holds nine comma-separated columns per block group;
//! the eight features are derived from them the standard way (per-household
//! averages, target in units of $100,000).

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::fetch::fetch_raw_data;
use super::{Dataset, DatasetSource};
use crate::errors::{StatsError, StatsResult};

/// Name of the raw data file inside the data home
pub const RAW_DATA_FILE: &str = "cal_housing.data";

/// Line of [`DESCR`] describing the first feature
pub const ATTRIBUTE_LINE_OFFSET: usize = 12;

/// Feature names, in column order
pub const FEATURE_NAMES: [&str; 8] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Dataset description
pub const DESCR: &str = "\
.. _california_housing_dataset:

California Housing dataset
--------------------------

**Data Set Characteristics:**

:Number of Instances: 20640

:Number of Attributes: 8 numeric, predictive attributes and the target

:Attribute Information:
    - MedInc        median income in block group
    - HouseAge      median house age in block group
    - AveRooms      average number of rooms per household
    - AveBedrms     average number of bedrooms per household
    - Population    block group population
    - AveOccup      average number of household members
    - Latitude      block group latitude
    - Longitude     block group longitude

:Missing Attribute Values: None

This dataset was obtained from the StatLib repository.
https://www.dcc.fc.up.pt/~ltorgo/Regression/cal_housing.html

The target variable is the median house value for California districts,
expressed in hundreds of thousands of dollars ($100,000).

This dataset was derived from the 1990 U.S. census, using one row per census
block group. A block group is the smallest geographical unit for which the U.S.
Census Bureau publishes sample data (a block group typically has a population
of 600 to 3,000 people).

A household is a group of people residing within a home. Since the average
number of rooms and bedrooms in this dataset are provided per household, these
columns may take surprisingly large values for block groups with few households
and many empty houses, such as vacation resorts.

.. rubric:: References

- Pace, R. Kelley and Ronald Barry, Sparse Spatial Autoregressions,
  Statistics and Probability Letters, 33 (1997) 291-297
";

/// One line of `cal_housing.data`, in file order
#[derive(Debug, Deserialize)]
struct RawRow {
    longitude: f64,
    latitude: f64,
    housing_median_age: f64,
    total_rooms: f64,
    total_bedrooms: f64,
    population: f64,
    households: f64,
    median_income: f64,
    median_house_value: f64,
}

/// California Housing source backed by a local data home.
///
/// Loads `cal_housing.data` from `data_home`; when the file is missing and
/// `download_if_missing` is set, the archive is downloaded first (requires the
/// `network` feature).
#[derive(Debug, Clone)]
pub struct CaliforniaHousing {
    pub data_home: PathBuf,
    pub download_if_missing: bool,
}

impl Default for CaliforniaHousing {
    fn default() -> Self {
        Self {
            data_home: default_data_home(),
            download_if_missing: true,
        }
    }
}

fn default_data_home() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("housing-stats")
}

impl CaliforniaHousing {
    pub fn new(data_home: impl Into<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
            download_if_missing: true,
        }
    }

    pub fn with_download(mut self, download_if_missing: bool) -> Self {
        self.download_if_missing = download_if_missing;
        self
    }

    /// Location of the raw data file
    pub fn data_path(&self) -> PathBuf {
        self.data_home.join(RAW_DATA_FILE)
    }
}

impl DatasetSource for CaliforniaHousing {
    fn load(&self) -> StatsResult<Dataset> {
        let path = self.data_path();

        if path.is_file() {
            log::debug!("loading California Housing from cache {}", path.display());
        } else if self.download_if_missing {
            log::info!(
                "{} not found, downloading California Housing into {}",
                path.display(),
                self.data_home.display()
            );
            fetch_raw_data(&self.data_home)?;
        } else {
            return Err(StatsError::DatasetUnavailable(format!(
                "{} not found and downloads are disabled",
                path.display()
            )));
        }

        load_raw_file(&path)
    }
}

/// Load the raw California Housing file
pub fn load_raw_file(path: &Path) -> StatsResult<Dataset> {
    let file = std::fs::File::open(path).map_err(|e| {
        StatsError::DatasetUnavailable(format!("cannot open {}: {e}", path.display()))
    })?;
    parse_raw(file)
}

/// Parse raw California Housing rows and derive the eight features.
///
/// Derived columns: `AveRooms = total_rooms / households`,
/// `AveBedrms = total_bedrooms / households`,
/// `AveOccup = population / households`; the target is
/// `median_house_value / 100000`.
pub fn parse_raw<R: Read>(reader: R) -> StatsResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut features: Vec<Vec<f64>> = vec![Vec::new(); FEATURE_NAMES.len()];
    let mut target = Vec::new();

    for record in reader.deserialize::<RawRow>() {
        let row = record?;
        let values = [
            row.median_income,
            row.housing_median_age,
            row.total_rooms / row.households,
            row.total_bedrooms / row.households,
            row.population,
            row.population / row.households,
            row.latitude,
            row.longitude,
        ];
        for (col, value) in features.iter_mut().zip(values) {
            col.push(value);
        }
        target.push(row.median_house_value / 100_000.0);
    }

    if target.is_empty() {
        return Err(StatsError::DatasetUnavailable(
            "California Housing data file is empty".into(),
        ));
    }

    log::debug!(
        "parsed {} California Housing rows ({} features)",
        target.len(),
        features.len()
    );

    Dataset::new(features, target, DESCR.to_string(), ATTRIBUTE_LINE_OFFSET)
}
