// covid-watch: COVID-19 statistics for a personal list of favorite countries.
//
// This is the library root. `stats` is the pure core (resolution, ranking,
// percentage reports); `provider` fetches upstream data; `db` stores
// accounts and favorites; `web` wires it all into a JSON API.

pub mod config;
pub mod db;
pub mod output;
pub mod provider;
pub mod stats;
pub mod web;
