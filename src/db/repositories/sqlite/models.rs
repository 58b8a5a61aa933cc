use diesel::prelude::*;

use super::schema::measurement;
use crate::db::models::Measurement;

/// One row of the measurement table as loaded by Diesel.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = measurement)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MeasurementRow {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            id: row.id,
            station: row.station,
            date: row.date,
            prcp: row.prcp,
            tobs: row.tobs,
        }
    }
}
