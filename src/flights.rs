//! Flight repository: parameterized lookups over the flights/airlines
//! tables.
//!
//! Every public lookup composes the shared projection/join template with one
//! predicate, binds its parameters by name, and returns rows as [`Record`]s.
//! Query failures never reach the caller: they are logged and collapse to an
//! empty result, so an empty return means "no rows matched or the query
//! failed".

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::sqlite::{Params, Record, Value};

/// Shared projection and join for every flight lookup. Each operation
/// appends its own predicate.
///
/// `FLIGHT_ID` and `DELAY` are derived aliases kept alongside the wildcard's
/// `ID` and `DEPARTURE_DELAY` columns; downstream callers address records
/// through the aliases.
const FLIGHT_SELECT: &str = "SELECT flights.*, airlines.AIRLINE, \
     flights.ID AS FLIGHT_ID, flights.DEPARTURE_DELAY AS DELAY \
     FROM flights JOIN airlines ON flights.AIRLINE = airlines.ID \
     WHERE ";

const BY_ID: &str = "flights.ID = :flight_id";
const BY_DATE: &str = "flights.YEAR = :year AND flights.MONTH = :month AND flights.DAY = :day";
// Delay thresholds intentionally differ between the two delayed lookups.
const DELAYED_BY_AIRLINE: &str =
    "flights.DEPARTURE_DELAY > 0 AND airlines.AIRLINE = :airline_name";
const DELAYED_BY_AIRPORT: &str =
    "flights.DEPARTURE_DELAY >= 20 AND flights.ORIGIN_AIRPORT = :airport_iata_code";

/// Data access layer for flight and airline records.
///
/// Owns one SQLite connection for its whole lifetime. The connection is
/// opened eagerly at construction and released when the repository is
/// dropped, or earlier via [`FlightRepository::close`]. Synchronous and
/// blocking; use one repository per logical caller.
pub struct FlightRepository {
    conn: Connection,
}

impl FlightRepository {
    /// Open the database at `db_path`.
    ///
    /// Connectivity is validated here (fail fast), not deferred to the
    /// first query.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref();
        let conn = Connection::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Open an ephemeral in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Open {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Wrap an already-open connection, e.g. one the caller configured with
    /// pragmas or seeded in memory.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Look up a single flight by its identifier.
    ///
    /// Returns a one-element sequence if the flight exists, otherwise empty.
    pub fn find_flight_by_id(&self, flight_id: impl Into<Value>) -> Vec<Record> {
        let flight_id = flight_id.into();
        debug!(?flight_id, "looking up flight by id");
        self.query_flights(BY_ID, Params::new().with_value("flight_id", flight_id))
    }

    /// Look up all flights departing on the given date.
    pub fn find_flights_by_date(&self, day: u32, month: u32, year: u32) -> Vec<Record> {
        debug!(day, month, year, "looking up flights by date");
        self.query_flights(
            BY_DATE,
            Params::new()
                .with_value("day", day)
                .with_value("month", month)
                .with_value("year", year),
        )
    }

    /// Look up delayed flights (departure delay over 0 minutes) for the
    /// airline with the given display name.
    pub fn find_delayed_flights_by_airline(&self, airline_name: &str) -> Vec<Record> {
        self.query_flights(
            DELAYED_BY_AIRLINE,
            Params::new().with_value("airline_name", airline_name),
        )
    }

    /// Look up delayed flights (departure delay of 20 minutes or more)
    /// departing from the airport with the given IATA code.
    pub fn find_delayed_flights_by_airport(&self, airport_iata_code: &str) -> Vec<Record> {
        self.query_flights(
            DELAYED_BY_AIRPORT,
            Params::new().with_value("airport_iata_code", airport_iata_code),
        )
    }

    /// Release the underlying connection.
    ///
    /// Consumes the repository, so teardown cannot be repeated; dropping an
    /// unclosed repository releases the connection as well.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, source)| Error::Close(source))
    }

    /// Fail-soft boundary for the public lookups: failures are logged and
    /// collapse to an empty result.
    fn query_flights(&self, predicate: &str, params: Params) -> Vec<Record> {
        match self.run_query(predicate, &params) {
            Ok(records) => records,
            Err(err) => {
                error!(%err, predicate, "flight query failed, returning no records");
                Vec::new()
            }
        }
    }

    fn run_query(&self, predicate: &str, params: &Params) -> Result<Vec<Record>> {
        let sql = format!("{FLIGHT_SELECT}{predicate}");
        let mut stmt = self.conn.prepare(&sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = stmt.query(params.as_sql().as_slice())?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut columns = Vec::with_capacity(column_names.len());
            for (index, name) in column_names.iter().enumerate() {
                columns.push((name.clone(), Value::from_sql_ref(row.get_ref(index)?)));
            }
            records.push(Record::new(columns));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_composes_one_where_clause_per_predicate() {
        for predicate in [BY_ID, BY_DATE, DELAYED_BY_AIRLINE, DELAYED_BY_AIRPORT] {
            let sql = format!("{FLIGHT_SELECT}{predicate}");
            assert!(sql.starts_with("SELECT flights.*"));
            assert_eq!(sql.matches("WHERE").count(), 1);
            assert_eq!(sql.matches("JOIN airlines").count(), 1);
        }
    }

    #[test]
    fn every_placeholder_is_named() {
        for predicate in [BY_ID, BY_DATE, DELAYED_BY_AIRLINE, DELAYED_BY_AIRPORT] {
            assert!(!predicate.contains('?'), "positional placeholder in {predicate}");
            assert!(predicate.contains(':'), "no named placeholder in {predicate}");
        }
    }
}
