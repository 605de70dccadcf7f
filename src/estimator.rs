// 🧮 Plate Estimator - raw input → plate → resolution → badge

use crate::badge::{BadgeClassifier, BadgeResult, FuelType};
use crate::error::{ResolverError, ValidationError};
use crate::plate::{self, PlateCode};
use crate::resolver::{DateResolver, Resolution};
use crate::table::PeriodTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateEstimate {
    pub plate: PlateCode,
    pub resolution: Resolution,
    /// Present when a fuel was given and the plate was found
    pub badge: Option<BadgeResult>,
}

pub struct PlateEstimator<'a> {
    resolver: DateResolver<'a>,
    classifier: BadgeClassifier,
}

impl<'a> PlateEstimator<'a> {
    pub fn new(table: &'a PeriodTable, classifier: BadgeClassifier) -> Result<Self, ResolverError> {
        Ok(PlateEstimator {
            resolver: DateResolver::new(table)?,
            classifier,
        })
    }

    pub fn estimate(&self, raw: &str, fuel: Option<FuelType>) -> Result<PlateEstimate, ValidationError> {
        let plate = plate::validate(raw)?;
        let resolution = self.resolver.resolve_plate(&plate);
        let badge = fuel.and_then(|f| self.classifier.classify_resolution(&resolution, f));

        Ok(PlateEstimate {
            plate,
            resolution,
            badge,
        })
    }
}
