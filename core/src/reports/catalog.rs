//! The fixed report definitions, grouped by family: vehicle, demographic,
//! time and duration, violation, location, and multi-stage aggregates.
//!
//! Ordering clauses are part of each report's contract: consumers rely
//! on row order for top-N semantics, so they are never left implicit.

use super::{Cmp, GroupFilter, RankStage, ReportQuery};

pub(super) static ENTRIES: &[ReportQuery] = &[
    // ── Vehicle ──────────────────────────────────────────────────────────
    ReportQuery {
        name: "Top 10 vehicles in drug-related stops",
        summary: "Vehicles most often involved in drug-related stops",
        columns: &["vehicle_number", "drug_stop_count"],
        body: "SELECT vehicle_number, COUNT(*) AS drug_stop_count
               FROM stop_records",
        filter: Some("drugs_related_stop = 1"),
        country_dimension: false,
        group_by: Some("vehicle_number"),
        group_filter: None,
        order_by: Some("drug_stop_count DESC"),
        limit: Some(10),
        rank: None,
    },
    ReportQuery {
        name: "Most frequently searched vehicles",
        summary: "Top 20 vehicles by number of searches conducted",
        columns: &["vehicle_number", "search_count"],
        body: "SELECT vehicle_number, COUNT(*) AS search_count
               FROM stop_records",
        filter: Some("search_conducted = 1"),
        country_dimension: false,
        group_by: Some("vehicle_number"),
        group_filter: None,
        order_by: Some("search_count DESC"),
        limit: Some(20),
        rank: None,
    },
    // ── Demographics ─────────────────────────────────────────────────────
    ReportQuery {
        name: "Driver age group with highest arrest rate",
        summary: "Arrest rate per derived age band",
        columns: &["age_group", "total_stops", "arrests", "arrest_rate_pct"],
        body: "WITH age_buckets AS (
                 SELECT
                   CASE
                     WHEN driver_age < 18 THEN '<18'
                     WHEN driver_age BETWEEN 18 AND 24 THEN '18-24'
                     WHEN driver_age BETWEEN 25 AND 34 THEN '25-34'
                     WHEN driver_age BETWEEN 35 AND 44 THEN '35-44'
                     WHEN driver_age BETWEEN 45 AND 54 THEN '45-54'
                     WHEN driver_age >= 55 THEN '55+'
                     ELSE 'Unknown'
                   END AS age_group,
                   is_arrested
                 FROM stop_records
               )
               SELECT age_group,
                      COUNT(*) AS total_stops,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM age_buckets",
        filter: None,
        country_dimension: false,
        group_by: Some("age_group"),
        group_filter: None,
        order_by: Some("arrest_rate_pct DESC"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Gender distribution by country",
        summary: "Stop counts per country and driver gender",
        columns: &["country_name", "driver_gender", "stops"],
        body: "SELECT country_name, driver_gender, COUNT(*) AS stops
               FROM stop_records",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name, driver_gender"),
        group_filter: None,
        order_by: Some("country_name, stops DESC"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Race and gender combination with highest search rate",
        summary: "Search rate per race and gender pairing, small groups excluded",
        columns: &[
            "driver_race",
            "driver_gender",
            "total_stops",
            "searches",
            "search_rate_pct",
        ],
        body: "SELECT driver_race, driver_gender, COUNT(*) AS total_stops,
                      SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS searches,
                      CAST(SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS search_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("driver_race, driver_gender"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Ge,
            min: 20,
        }),
        order_by: Some("search_rate_pct DESC"),
        limit: Some(10),
        rank: None,
    },
    // ── Time & duration ──────────────────────────────────────────────────
    ReportQuery {
        name: "Stops by hour of day",
        summary: "Stop volume per hour derived from the stop datetime",
        columns: &["hour_of_day", "stops"],
        body: "SELECT CAST(strftime('%H', stop_datetime) AS INTEGER) AS hour_of_day,
                      COUNT(*) AS stops
               FROM stop_records",
        filter: Some("stop_datetime IS NOT NULL"),
        country_dimension: false,
        group_by: Some("hour_of_day"),
        group_filter: None,
        order_by: Some("stops DESC"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Average stop duration per violation",
        summary: "Mean stop duration in minutes, from bucket midpoints",
        columns: &["violation", "n_samples", "avg_duration_minutes"],
        body: "WITH mapped AS (
                 SELECT violation,
                        CASE stop_duration
                          WHEN '0-15 Min' THEN 7.5
                          WHEN '16-30 Min' THEN 23.0
                          WHEN '>30 Min' THEN 45.0
                          ELSE NULL
                        END AS duration_minutes
                 FROM stop_records
               )
               SELECT violation,
                      COUNT(duration_minutes) AS n_samples,
                      AVG(duration_minutes) AS avg_duration_minutes
               FROM mapped",
        filter: None,
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: None,
        order_by: Some("avg_duration_minutes DESC"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Night vs day arrest rate",
        summary: "Arrest rate for night stops (hour >= 20 or <= 4) against day stops",
        columns: &["period", "total_stops", "arrests", "arrest_rate_pct"],
        body: "WITH flagged AS (
                 SELECT is_arrested,
                        CAST(strftime('%H', stop_datetime) AS INTEGER) AS hour
                 FROM stop_records
               )
               SELECT CASE WHEN hour >= 20 OR hour <= 4 THEN 'night' ELSE 'day' END AS period,
                      COUNT(*) AS total_stops,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM flagged",
        filter: None,
        country_dimension: false,
        group_by: Some("period"),
        group_filter: None,
        order_by: Some("arrest_rate_pct DESC"),
        limit: None,
        rank: None,
    },
    // ── Violations ───────────────────────────────────────────────────────
    ReportQuery {
        name: "Violations most associated with searches or arrests",
        summary: "Search and arrest rates per violation",
        columns: &[
            "violation",
            "total_stops",
            "searches",
            "arrests",
            "search_rate_pct",
            "arrest_rate_pct",
        ],
        body: "SELECT violation, COUNT(*) AS total_stops,
                      SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS searches,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS search_rate_pct,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Gt,
            min: 10,
        }),
        order_by: Some("arrest_rate_pct DESC, search_rate_pct DESC"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Violations common among drivers under 25",
        summary: "Violation mix within the under-25 subset",
        columns: &["violation", "stops_under_25", "pct_of_under_25_stops"],
        body: "SELECT violation,
                      COUNT(*) AS stops_under_25,
                      CAST(COUNT(*) AS REAL) / (SELECT COUNT(*) FROM stop_records WHERE driver_age < 25) * 100.0 AS pct_of_under_25_stops
               FROM stop_records",
        filter: Some("driver_age < 25"),
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: None,
        order_by: Some("stops_under_25 DESC"),
        limit: Some(20),
        rank: None,
    },
    ReportQuery {
        name: "Violations that rarely lead to search or arrest",
        summary: "Violations with the lowest combined search and arrest rates",
        columns: &["violation", "total_stops", "search_rate_pct", "arrest_rate_pct"],
        body: "SELECT violation, COUNT(*) AS total_stops,
                      CAST(SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS search_rate_pct,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Gt,
            min: 50,
        }),
        order_by: Some("(search_rate_pct + arrest_rate_pct) ASC"),
        limit: Some(10),
        rank: None,
    },
    // ── Location ─────────────────────────────────────────────────────────
    ReportQuery {
        name: "Countries with highest drug-related stop rate",
        summary: "Drug-related stop rate per country, small groups excluded",
        columns: &["country_name", "total_stops", "drug_stops", "drug_rate_pct"],
        body: "SELECT country_name, COUNT(*) AS total_stops,
                      SUM(CASE WHEN drugs_related_stop = 1 THEN 1 ELSE 0 END) AS drug_stops,
                      CAST(SUM(CASE WHEN drugs_related_stop = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS drug_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Gt,
            min: 50,
        }),
        order_by: Some("drug_rate_pct DESC"),
        limit: Some(10),
        rank: None,
    },
    ReportQuery {
        name: "Arrest rate by country and violation",
        summary: "Arrest rate per country and violation pairing",
        columns: &[
            "country_name",
            "violation",
            "total_stops",
            "arrests",
            "arrest_rate_pct",
        ],
        body: "SELECT country_name, violation, COUNT(*) AS total_stops,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name, violation"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Ge,
            min: 10,
        }),
        order_by: Some("arrest_rate_pct DESC"),
        limit: Some(50),
        rank: None,
    },
    ReportQuery {
        name: "Countries with most searches conducted",
        summary: "Search volume and rate per country",
        columns: &["country_name", "searches", "total_stops", "search_rate_pct"],
        body: "SELECT country_name,
                      SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS searches,
                      COUNT(*) AS total_stops,
                      CAST(SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS search_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name"),
        group_filter: None,
        order_by: Some("searches DESC"),
        limit: Some(10),
        rank: None,
    },
    // ── Multi-stage ──────────────────────────────────────────────────────
    ReportQuery {
        name: "Yearly stops and arrests by country",
        summary: "Per-country yearly totals with a running cumulative stop count",
        columns: &[
            "country_name",
            "year",
            "stops",
            "arrests",
            "arrest_rate_pct",
            "running_stops",
        ],
        body: "WITH parsed AS (
                 SELECT country_name,
                        CAST(strftime('%Y', stop_datetime) AS INTEGER) AS year,
                        is_arrested
                 FROM stop_records
               )
               SELECT country_name, year,
                      COUNT(*) AS stops,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct,
                      SUM(COUNT(*)) OVER (PARTITION BY country_name ORDER BY year ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) AS running_stops
               FROM parsed",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name, year"),
        group_filter: None,
        order_by: Some("country_name, year"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Violation trends by age group and race",
        summary: "Violation mix per age band and race, as a share of all stops",
        columns: &[
            "age_group",
            "driver_race",
            "violation",
            "stops",
            "pct_of_all_stops",
        ],
        body: "WITH age_grouped AS (
                 SELECT driver_race, violation,
                   CASE
                     WHEN driver_age < 18 THEN '<18'
                     WHEN driver_age BETWEEN 18 AND 24 THEN '18-24'
                     WHEN driver_age BETWEEN 25 AND 34 THEN '25-34'
                     WHEN driver_age BETWEEN 35 AND 44 THEN '35-44'
                     WHEN driver_age BETWEEN 45 AND 54 THEN '45-54'
                     WHEN driver_age >= 55 THEN '55+'
                     ELSE 'Unknown'
                   END AS age_group
                 FROM stop_records
               )
               SELECT age_group, driver_race, violation,
                      COUNT(*) AS stops,
                      CAST(COUNT(*) AS REAL) * 100.0 / (SELECT COUNT(*) FROM stop_records WHERE driver_age IS NOT NULL AND driver_age >= 0) AS pct_of_all_stops
               FROM age_grouped",
        filter: None,
        country_dimension: false,
        group_by: Some("age_group, driver_race, violation"),
        group_filter: None,
        order_by: Some("age_group, stops DESC"),
        limit: Some(200),
        rank: None,
    },
    ReportQuery {
        name: "Stops by year, month and hour",
        summary: "Stop volume across three derived time buckets",
        columns: &["year", "month", "hour", "stops"],
        body: "SELECT CAST(strftime('%Y', stop_datetime) AS INTEGER) AS year,
                      CAST(strftime('%m', stop_datetime) AS INTEGER) AS month,
                      CAST(strftime('%H', stop_datetime) AS INTEGER) AS hour,
                      COUNT(*) AS stops
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("year, month, hour"),
        group_filter: None,
        order_by: Some("year DESC, month DESC, hour"),
        limit: None,
        rank: None,
    },
    ReportQuery {
        name: "Violations ranked by search and arrest rates",
        summary: "Independent arrest-rate and search-rate ranks per violation",
        columns: &[
            "violation",
            "total_stops",
            "searches",
            "arrests",
            "search_rate_pct",
            "arrest_rate_pct",
            "rank_by_arrest_rate",
            "rank_by_search_rate",
        ],
        body: "SELECT violation, COUNT(*) AS total_stops,
                      SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS searches,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN search_conducted = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS search_rate_pct,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Gt,
            min: 30,
        }),
        order_by: None,
        limit: None,
        rank: Some(RankStage {
            select: "violation, total_stops, searches, arrests, search_rate_pct, arrest_rate_pct,
                     RANK() OVER (ORDER BY arrest_rate_pct DESC) AS rank_by_arrest_rate,
                     RANK() OVER (ORDER BY search_rate_pct DESC) AS rank_by_search_rate",
            order_by: "rank_by_arrest_rate, rank_by_search_rate",
            limit: Some(30),
        }),
    },
    ReportQuery {
        name: "Driver demographics by country",
        summary: "Stop counts per country, gender, age band, and race",
        columns: &[
            "country_name",
            "driver_gender",
            "age_group",
            "driver_race",
            "stops",
        ],
        body: "SELECT country_name, driver_gender,
                      CASE
                        WHEN driver_age < 18 THEN '<18'
                        WHEN driver_age BETWEEN 18 AND 24 THEN '18-24'
                        WHEN driver_age BETWEEN 25 AND 34 THEN '25-34'
                        WHEN driver_age BETWEEN 35 AND 44 THEN '35-44'
                        WHEN driver_age BETWEEN 45 AND 54 THEN '45-54'
                        WHEN driver_age >= 55 THEN '55+'
                        ELSE 'Unknown'
                      END AS age_group,
                      driver_race,
                      COUNT(*) AS stops
               FROM stop_records",
        filter: None,
        country_dimension: true,
        group_by: Some("country_name, driver_gender, age_group, driver_race"),
        group_filter: None,
        order_by: Some("country_name, stops DESC"),
        limit: Some(500),
        rank: None,
    },
    ReportQuery {
        name: "Top 5 violations with highest arrest rates",
        summary: "Highest arrest-rate violations, small groups excluded",
        columns: &["violation", "total_stops", "arrests", "arrest_rate_pct"],
        body: "SELECT violation, COUNT(*) AS total_stops,
                      SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS arrests,
                      CAST(SUM(CASE WHEN is_arrested = 1 THEN 1 ELSE 0 END) AS REAL) * 100.0 / COUNT(*) AS arrest_rate_pct
               FROM stop_records",
        filter: None,
        country_dimension: false,
        group_by: Some("violation"),
        group_filter: Some(GroupFilter {
            expr: "COUNT(*)",
            cmp: Cmp::Ge,
            min: 30,
        }),
        order_by: Some("arrest_rate_pct DESC"),
        limit: Some(5),
        rank: None,
    },
];
