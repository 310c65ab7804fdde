//! CSV parsing for the station price dataset.
//!
//! Rows are deserialized into a strict schema and then validated into
//! [`StationRecord`]s. A malformed row never aborts the load: it is logged
//! at `warn` and skipped. Only an unreadable header or a missing required
//! column is fatal.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    Coord, InvalidCoord, InvalidPrice, InvalidStateCode, PricePerGallon, StateCode, StationRecord,
};

use super::error::CatalogError;

/// Header names every dataset must provide. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Truckstop Name",
    "Address",
    "City",
    "State",
    "Retail Price",
    "Latitude",
    "Longitude",
];

/// One raw row, matched to the header by column name.
#[derive(Debug, Deserialize)]
struct StationRow {
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Retail Price")]
    retail_price: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

/// Why a well-formed row was still rejected.
#[derive(Debug, thiserror::Error)]
enum RowError {
    #[error("empty station name")]
    EmptyName,

    #[error(transparent)]
    State(#[from] InvalidStateCode),

    #[error(transparent)]
    Price(#[from] InvalidPrice),

    #[error(transparent)]
    Coord(#[from] InvalidCoord),
}

impl StationRow {
    /// Validate the row into a station record.
    fn into_record(self) -> Result<StationRecord, RowError> {
        if self.name.is_empty() {
            return Err(RowError::EmptyName);
        }

        Ok(StationRecord {
            state: StateCode::parse_normalized(&self.state)?,
            price: PricePerGallon::new(self.retail_price)?,
            position: Coord::new(self.longitude, self.latitude)?,
            name: self.name,
            address: self.address,
            city: self.city,
        })
    }
}

/// Result of parsing a dataset.
#[derive(Debug)]
pub(super) struct ParsedStations {
    pub stations: Vec<StationRecord>,
    pub skipped: usize,
}

/// Parse station rows from CSV, skipping and logging bad rows.
pub(super) fn parse_stations<R: Read>(reader: R) -> Result<ParsedStations, CatalogError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();

    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns { missing });
    }

    let mut stations = Vec::new();
    let mut skipped = 0;

    for (i, row) in csv_reader.deserialize::<StationRow>().enumerate() {
        // Line 1 is the header
        let line = i + 2;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable station row");
                skipped += 1;
                continue;
            }
        };

        match row.into_record() {
            Ok(station) => stations.push(station),
            Err(e) => {
                warn!(line, error = %e, "skipping invalid station row");
                skipped += 1;
            }
        }
    }

    Ok(ParsedStations { stations, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price,Latitude,Longitude";

    fn parse(body: &str) -> ParsedStations {
        let csv = format!("{HEADER}\n{body}");
        parse_stations(csv.as_bytes()).unwrap()
    }

    #[test]
    fn parses_valid_rows() {
        let parsed = parse(
            "7,WOODSHED OF BIG CABIN,I-44 EXIT 283,Big Cabin,OK,307,3.00733333,36.54,-95.22\n\
             44,KWIK TRIP #796,I-94 EXIT 143,Tomah,wi,454,3.28733333,43.98,-90.50\n",
        );

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.stations.len(), 2);

        let first = &parsed.stations[0];
        assert_eq!(first.name, "WOODSHED OF BIG CABIN");
        assert_eq!(first.city, "Big Cabin");
        assert_eq!(first.state.as_str(), "OK");
        assert_eq!(first.price.value(), 3.00733333);
        assert_eq!(first.position, Coord::new(-95.22, 36.54).unwrap());

        // State is normalized to uppercase
        assert_eq!(parsed.stations[1].state.as_str(), "WI");
    }

    #[test]
    fn trims_fields() {
        let parsed = parse("1,  PILOT #1 , I-10 ,  Tucson , AZ ,1, 3.10 ,32.2,-110.9\n");
        assert_eq!(parsed.stations[0].name, "PILOT #1");
        assert_eq!(parsed.stations[0].city, "Tucson");
    }

    #[test]
    fn skips_malformed_rows() {
        let parsed = parse(
            "1,GOOD,Addr,City,TX,1,3.10,32.0,-97.0\n\
             2,BAD PRICE,Addr,City,TX,1,not-a-number,32.0,-97.0\n\
             3,ZERO PRICE,Addr,City,TX,1,0,32.0,-97.0\n\
             4,BAD LAT,Addr,City,TX,1,3.10,132.0,-97.0\n\
             5,,Addr,City,TX,1,3.10,32.0,-97.0\n\
             6,BAD STATE,Addr,City,Texas,1,3.10,32.0,-97.0\n\
             7,MISSING COORDS,Addr,City,TX,1,3.10,,\n\
             8,SHORT ROW,Addr\n\
             9,ALSO GOOD,Addr,City,OK,1,2.95,35.0,-97.5\n",
        );

        assert_eq!(parsed.stations.len(), 2);
        assert_eq!(parsed.skipped, 7);
        assert_eq!(parsed.stations[0].name, "GOOD");
        assert_eq!(parsed.stations[1].name, "ALSO GOOD");
    }

    #[test]
    fn missing_columns_is_fatal() {
        let csv = "Truckstop Name,Address,City,State,Retail Price\nX,Y,Z,TX,3.0\n";
        let err = parse_stations(csv.as_bytes()).unwrap_err();

        match err {
            CatalogError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["Latitude", "Longitude"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_body_yields_empty_catalog() {
        let parsed = parse("");
        assert!(parsed.stations.is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}
