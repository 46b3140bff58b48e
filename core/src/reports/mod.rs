//! The report catalog: fixed, named aggregate queries over the ledger.
//!
//! Each entry is a structured descriptor rather than opaque SQL text: the
//! optional country predicate and the minimum-group-size threshold are
//! explicit slots, so applying a runtime filter composes clauses instead
//! of rewriting query strings. The country value is always bound as a
//! parameter.

mod catalog;

use rusqlite::ToSql;

use crate::{
    error::{LedgerError, LedgerResult},
    rows::TableResult,
    store::LedgerStore,
};

// ── Descriptor ───────────────────────────────────────────────────────────────

/// Comparator for the minimum-group-size threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Gt,
    Ge,
}

impl Cmp {
    fn as_sql(self) -> &'static str {
        match self {
            Cmp::Gt => ">",
            Cmp::Ge => ">=",
        }
    }
}

/// Post-aggregation filter excluding groups below a minimum size, to
/// avoid rate estimates from small samples.
#[derive(Debug, Clone, Copy)]
pub struct GroupFilter {
    pub expr: &'static str,
    pub cmp: Cmp,
    pub min: u32,
}

/// Outer ranking stage wrapped around the grouped result.
#[derive(Debug, Clone, Copy)]
pub struct RankStage {
    pub select: &'static str,
    pub order_by: &'static str,
    pub limit: Option<u32>,
}

/// A named aggregate report over the stop ledger.
///
/// `body` carries the projection and FROM clause (CTEs allowed for
/// derived buckets and windows); the remaining slots are composed around
/// it in fixed order. `columns` declares the result schema at
/// catalog-definition time.
#[derive(Debug, Clone, Copy)]
pub struct ReportQuery {
    pub name: &'static str,
    pub summary: &'static str,
    pub columns: &'static [&'static str],
    pub body: &'static str,
    /// Fixed base predicate, if any.
    pub filter: Option<&'static str>,
    /// Whether the outermost scan exposes `country_name`. Only these
    /// reports accept the optional country filter.
    pub country_dimension: bool,
    pub group_by: Option<&'static str>,
    pub group_filter: Option<GroupFilter>,
    pub order_by: Option<&'static str>,
    pub limit: Option<u32>,
    pub rank: Option<RankStage>,
}

/// Runtime knobs accepted by every report invocation.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Restrict country-dimension reports to one country. Silently
    /// ignored by reports without a country dimension.
    pub country: Option<String>,
    /// Override the report's default minimum group size. Ignored by
    /// reports without a group-size threshold.
    pub min_group_size: Option<u32>,
}

impl ReportQuery {
    /// Assemble the SQL text and bound parameters for this report.
    pub fn sql(&self, opts: &ReportOptions) -> (String, Vec<String>) {
        let mut sql = String::from(self.body);
        let mut params = Vec::new();

        let mut predicates: Vec<&str> = Vec::new();
        if let Some(filter) = self.filter {
            predicates.push(filter);
        }
        if self.country_dimension {
            if let Some(country) = opts.country.as_deref() {
                if !country.is_empty() {
                    predicates.push("country_name = ?1");
                    params.push(country.to_string());
                }
            }
        }
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if let Some(group_by) = self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(gf) = self.group_filter {
            let min = opts.min_group_size.unwrap_or(gf.min);
            sql.push_str(&format!(" HAVING {} {} {min}", gf.expr, gf.cmp.as_sql()));
        }

        if let Some(rank) = self.rank {
            sql = format!("WITH grouped AS ({sql}) SELECT {} FROM grouped", rank.select);
            sql.push_str(&format!(" ORDER BY {}", rank.order_by));
            if let Some(limit) = rank.limit {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
        } else {
            if let Some(order_by) = self.order_by {
                sql.push_str(&format!(" ORDER BY {order_by}"));
            }
            if let Some(limit) = self.limit {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
        }

        (sql, params)
    }
}

// ── Catalog access & execution ───────────────────────────────────────────────

/// All reports, in catalog order.
pub fn catalog() -> &'static [ReportQuery] {
    catalog::ENTRIES
}

/// Look up a report by its exact name.
pub fn find(name: &str) -> Option<&'static ReportQuery> {
    catalog::ENTRIES.iter().find(|r| r.name == name)
}

/// Execute a cataloged report against `store`.
pub fn run(store: &LedgerStore, name: &str, opts: &ReportOptions) -> LedgerResult<TableResult> {
    let report = find(name).ok_or_else(|| LedgerError::UnknownReport(name.to_string()))?;
    let (sql, params) = report.sql(opts);
    log::debug!("report '{name}': {sql}");
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
    store.query(&sql, &param_refs).map_err(|e| match e {
        LedgerError::Database(source) => LedgerError::Report {
            name: name.to_string(),
            source,
        },
        other => other,
    })
}
