// Diesel schema for the climate dataset. Declared statically instead of
// reflecting the live database; the embedded migration creates the same
// shape when the tables are absent.

diesel::table! {
    measurement (id) {
        id -> BigInt,
        station -> Text,
        date -> Text,
        prcp -> Nullable<Double>,
        tobs -> Double,
    }
}

diesel::table! {
    station (id) {
        id -> BigInt,
        station -> Text,
        name -> Text,
        latitude -> Double,
        longitude -> Double,
        elevation -> Double,
    }
}

diesel::allow_tables_to_appear_in_same_query!(measurement, station);
