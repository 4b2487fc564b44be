//! Housing observation data structures for price prediction

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::schema;

/// One housing observation to be priced
///
/// Fields mirror the Boston housing survey columns; each field also accepts
/// the survey's uppercase column name as a serde alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingFeatures {
    /// Per capita crime rate by town
    #[serde(alias = "CRIM")]
    pub crim: f64,

    /// Proportion of residential land zoned for lots over 25,000 sq. ft.
    #[serde(alias = "ZN")]
    pub zn: f64,

    /// Proportion of non-retail business acres per town
    #[serde(alias = "INDUS")]
    pub indus: f64,

    /// Charles River indicator (1 if tract bounds the river, 0 otherwise)
    #[serde(alias = "CHAS")]
    pub chas: f64,

    /// Nitric oxides concentration (parts per 10 million)
    #[serde(alias = "NOX")]
    pub nox: f64,

    /// Average number of rooms per dwelling
    #[serde(alias = "RM")]
    pub rm: f64,

    /// Proportion of owner-occupied units built prior to 1940
    #[serde(alias = "AGE")]
    pub age: f64,

    /// Weighted distance to five Boston employment centres
    #[serde(alias = "DIS")]
    pub dis: f64,

    /// Index of accessibility to radial highways
    #[serde(alias = "RAD")]
    pub rad: f64,

    /// Full-value property-tax rate per $10,000
    #[serde(alias = "TAX")]
    pub tax: f64,

    /// Pupil-teacher ratio by town
    #[serde(alias = "PTRATIO")]
    pub ptratio: f64,

    /// Transformed town demographic proportion (the survey's B column)
    #[serde(alias = "B")]
    pub b: f64,

    /// Percentage of lower-status population
    #[serde(alias = "LSTAT")]
    pub lstat: f64,
}

impl HousingFeatures {
    /// Flatten the observation into a vector in schema order.
    pub fn feature_vector(&self) -> Vec<f64> {
        vec![
            self.crim,
            self.zn,
            self.indus,
            self.chas,
            self.nox,
            self.rm,
            self.age,
            self.dis,
            self.rad,
            self.tax,
            self.ptratio,
            self.b,
            self.lstat,
        ]
    }

    /// Build an observation from a name-to-value map.
    ///
    /// Every schema column must be present under its uppercase name;
    /// keys outside the schema are ignored.
    pub fn from_named(values: &HashMap<String, f64>) -> Result<Self, InferenceError> {
        let mut ordered = vec![0.0; schema::feature_count()];
        let mut present = 0;
        for (i, name) in schema::FEATURE_NAMES.iter().enumerate() {
            if let Some(&value) = values.get(*name) {
                ordered[i] = value;
                present += 1;
            }
        }
        if present != schema::feature_count() {
            return Err(InferenceError::SchemaMismatch {
                expected: schema::feature_count(),
                actual: present,
            });
        }

        Ok(Self {
            crim: ordered[0],
            zn: ordered[1],
            indus: ordered[2],
            chas: ordered[3],
            nox: ordered[4],
            rm: ordered[5],
            age: ordered[6],
            dis: ordered[7],
            rad: ordered[8],
            tax: ordered[9],
            ptratio: ordered[10],
            b: ordered[11],
            lstat: ordered[12],
        })
    }
}
