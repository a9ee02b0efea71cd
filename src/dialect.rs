//! The dialect catalog: which database products exist, how they group into
//! families, and which capabilities each one has.
//!
//! The catalog is pure data. Capability lookups are total and fail closed:
//! a (dialect, capability) pair that is not explicitly granted is `false`,
//! so new dialects default to the conservative, emulated rendering path.
//! Resolving a dialect *identifier*, on the other hand, fails fast: an
//! unrecognized identifier is a configuration error, not a safe default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A specific database product targeted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Access,
    AuroraMysql,
    AuroraPostgres,
    BigQuery,
    ClickHouse,
    CockroachDb,
    Cubrid,
    Db2,
    Derby,
    DuckDb,
    Exasol,
    Firebird,
    H2,
    Hana,
    Hsqldb,
    Ignite,
    Informix,
    MariaDb,
    MemSql,
    MySql,
    Oracle,
    Postgres,
    Redshift,
    Snowflake,
    SqlServer,
    Sqlite,
    Sybase,
    Teradata,
    Trino,
    Vertica,
    YugabyteDb,
}

/// The product line a dialect belongs to.
///
/// Derived products (Aurora, Cockroach, Yugabyte, ...) share the syntax
/// family of the product they are wire-compatible with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Access,
    BigQuery,
    ClickHouse,
    Cubrid,
    Db2,
    Derby,
    DuckDb,
    Exasol,
    Firebird,
    H2,
    Hana,
    Hsqldb,
    Ignite,
    Informix,
    MariaDb,
    MySql,
    Oracle,
    Postgres,
    Redshift,
    Snowflake,
    SqlServer,
    Sqlite,
    Sybase,
    Teradata,
    Trino,
    Vertica,
}

/// A named, per-dialect capability flag consulted during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// The dialect has a native `XOR` boolean operator.
    NativeXor,
    /// The dialect has a native `ILIKE` operator.
    NativeIlike,
    /// The dialect has `TRUE` / `FALSE` boolean literals.
    BooleanLiterals,
    /// The dialect has `ARRAY[...]` literal syntax.
    ArrayLiterals,
    /// The dialect accepts nested-loop planner hints.
    NestedLoopHints,
}

impl Dialect {
    /// Every dialect in the catalog, in identifier order.
    pub const ALL: [Dialect; 31] = [
        Dialect::Access,
        Dialect::AuroraMysql,
        Dialect::AuroraPostgres,
        Dialect::BigQuery,
        Dialect::ClickHouse,
        Dialect::CockroachDb,
        Dialect::Cubrid,
        Dialect::Db2,
        Dialect::Derby,
        Dialect::DuckDb,
        Dialect::Exasol,
        Dialect::Firebird,
        Dialect::H2,
        Dialect::Hana,
        Dialect::Hsqldb,
        Dialect::Ignite,
        Dialect::Informix,
        Dialect::MariaDb,
        Dialect::MemSql,
        Dialect::MySql,
        Dialect::Oracle,
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::Snowflake,
        Dialect::SqlServer,
        Dialect::Sqlite,
        Dialect::Sybase,
        Dialect::Teradata,
        Dialect::Trino,
        Dialect::Vertica,
        Dialect::YugabyteDb,
    ];

    /// The family this dialect belongs to. Total: every dialect maps to
    /// exactly one family.
    pub fn family(&self) -> Family {
        match self {
            Dialect::Access => Family::Access,
            Dialect::AuroraMysql | Dialect::MemSql | Dialect::MySql => Family::MySql,
            Dialect::AuroraPostgres
            | Dialect::CockroachDb
            | Dialect::Postgres
            | Dialect::YugabyteDb => Family::Postgres,
            Dialect::BigQuery => Family::BigQuery,
            Dialect::ClickHouse => Family::ClickHouse,
            Dialect::Cubrid => Family::Cubrid,
            Dialect::Db2 => Family::Db2,
            Dialect::Derby => Family::Derby,
            Dialect::DuckDb => Family::DuckDb,
            Dialect::Exasol => Family::Exasol,
            Dialect::Firebird => Family::Firebird,
            Dialect::H2 => Family::H2,
            Dialect::Hana => Family::Hana,
            Dialect::Hsqldb => Family::Hsqldb,
            Dialect::Ignite => Family::Ignite,
            Dialect::Informix => Family::Informix,
            Dialect::MariaDb => Family::MariaDb,
            Dialect::Oracle => Family::Oracle,
            Dialect::Redshift => Family::Redshift,
            Dialect::Snowflake => Family::Snowflake,
            Dialect::SqlServer => Family::SqlServer,
            Dialect::Sqlite => Family::Sqlite,
            Dialect::Sybase => Family::Sybase,
            Dialect::Teradata => Family::Teradata,
            Dialect::Trino => Family::Trino,
            Dialect::Vertica => Family::Vertica,
        }
    }

    /// Whether this dialect natively supports the given capability.
    ///
    /// Fails closed: anything not explicitly granted here is `false`.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::NativeXor => matches!(
                self.family(),
                Family::MySql | Family::MariaDb | Family::Access
            ),
            Capability::NativeIlike => matches!(
                self.family(),
                Family::Postgres
                    | Family::Redshift
                    | Family::Snowflake
                    | Family::DuckDb
                    | Family::ClickHouse
                    | Family::Trino
            ),
            Capability::BooleanLiterals => matches!(
                self.family(),
                Family::Postgres
                    | Family::MySql
                    | Family::MariaDb
                    | Family::H2
                    | Family::Hsqldb
                    | Family::Firebird
                    | Family::DuckDb
                    | Family::Trino
                    | Family::Snowflake
                    | Family::BigQuery
                    | Family::ClickHouse
                    | Family::Vertica
                    | Family::Exasol
                    | Family::Ignite
                    | Family::Redshift
                    | Family::Cubrid
            ),
            Capability::ArrayLiterals => matches!(
                self.family(),
                Family::Postgres | Family::DuckDb | Family::H2 | Family::Trino
            ),
            Capability::NestedLoopHints => matches!(
                self,
                Dialect::YugabyteDb | Dialect::Oracle | Dialect::SqlServer
            ),
        }
    }

    /// The bind parameter placeholder for a 1-based index.
    pub fn placeholder(&self, index: usize) -> String {
        match self.family() {
            Family::Postgres | Family::DuckDb => format!("${}", index),
            Family::SqlServer | Family::Sybase => format!("@p{}", index),
            Family::Oracle => format!(":{}", index),
            _ => "?".into(),
        }
    }

    /// The boolean literal for this dialect.
    pub fn bool_literal(&self, value: bool) -> &'static str {
        if self.supports(Capability::BooleanLiterals) {
            if value { "TRUE" } else { "FALSE" }
        } else if value {
            "1"
        } else {
            "0"
        }
    }

    /// Quote an identifier if it is a reserved word or contains characters
    /// that require quoting. Dotted paths are quoted per part.
    pub fn identifier(&self, name: &str) -> String {
        if name.contains('.') {
            return name
                .split('.')
                .map(|part| self.identifier_part(part, false))
                .collect::<Vec<_>>()
                .join(".");
        }
        self.identifier_part(name, false)
    }

    /// Quote an identifier unconditionally.
    pub fn quoted_identifier(&self, name: &str) -> String {
        self.identifier_part(name, true)
    }

    fn identifier_part(&self, name: &str, force: bool) -> String {
        let lower = name.to_lowercase();
        let needs_quoting = force
            || RESERVED_WORDS.contains(&lower.as_str())
            || name.chars().any(|c| !c.is_alphanumeric() && c != '_')
            || name.chars().next().map(|c| c.is_numeric()).unwrap_or(false);

        if !needs_quoting {
            return name.to_string();
        }

        match self.family() {
            Family::MySql | Family::MariaDb | Family::BigQuery | Family::ClickHouse => {
                format!("`{}`", name.replace('`', "``"))
            }
            Family::SqlServer | Family::Sybase | Family::Access => {
                format!("[{}]", name.replace(']', "]]"))
            }
            _ => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }
}

/// Capability query contract: total over all dialects, `false` for anything
/// not explicitly granted.
pub fn supports_native(capability: Capability, dialect: Dialect) -> bool {
    dialect.supports(capability)
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dialect::Access => "access",
            Dialect::AuroraMysql => "aurora-mysql",
            Dialect::AuroraPostgres => "aurora-postgres",
            Dialect::BigQuery => "bigquery",
            Dialect::ClickHouse => "clickhouse",
            Dialect::CockroachDb => "cockroachdb",
            Dialect::Cubrid => "cubrid",
            Dialect::Db2 => "db2",
            Dialect::Derby => "derby",
            Dialect::DuckDb => "duckdb",
            Dialect::Exasol => "exasol",
            Dialect::Firebird => "firebird",
            Dialect::H2 => "h2",
            Dialect::Hana => "hana",
            Dialect::Hsqldb => "hsqldb",
            Dialect::Ignite => "ignite",
            Dialect::Informix => "informix",
            Dialect::MariaDb => "mariadb",
            Dialect::MemSql => "memsql",
            Dialect::MySql => "mysql",
            Dialect::Oracle => "oracle",
            Dialect::Postgres => "postgres",
            Dialect::Redshift => "redshift",
            Dialect::Snowflake => "snowflake",
            Dialect::SqlServer => "sqlserver",
            Dialect::Sqlite => "sqlite",
            Dialect::Sybase => "sybase",
            Dialect::Teradata => "teradata",
            Dialect::Trino => "trino",
            Dialect::Vertica => "vertica",
            Dialect::YugabyteDb => "yugabytedb",
        };
        f.write_str(name)
    }
}

impl FromStr for Dialect {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Dialect::ALL
            .iter()
            .copied()
            .find(|d| d.to_string() == lower)
            .ok_or_else(|| RenderError::UnknownDialect(s.to_string()))
    }
}

/// SQL reserved words that must be quoted when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "order", "group", "user", "table", "select", "from", "where", "join", "left", "right",
    "inner", "outer", "on", "and", "or", "not", "null", "true", "false", "limit", "offset",
    "as", "in", "is", "like", "between", "having", "union", "all", "distinct", "case", "when",
    "then", "else", "end", "create", "alter", "drop", "insert", "update", "delete", "index",
    "key", "primary", "foreign", "references", "default", "constraint", "check",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dialect_has_a_family() {
        for dialect in Dialect::ALL {
            // family() is total by construction; exercise it anyway.
            let _ = dialect.family();
        }
    }

    #[test]
    fn test_capability_lookup_fails_closed() {
        assert!(Dialect::MySql.supports(Capability::NativeXor));
        assert!(Dialect::MariaDb.supports(Capability::NativeXor));
        assert!(!Dialect::Postgres.supports(Capability::NativeXor));
        assert!(!Dialect::Derby.supports(Capability::NativeXor));
        assert!(!Dialect::Firebird.supports(Capability::NativeXor));
        assert!(!Dialect::H2.supports(Capability::NativeXor));
        assert!(!Dialect::Hsqldb.supports(Capability::NativeXor));
        assert!(!Dialect::Ignite.supports(Capability::NativeXor));
        assert!(!Dialect::Sqlite.supports(Capability::NativeXor));
        assert!(!Dialect::YugabyteDb.supports(Capability::NativeXor));
    }

    #[test]
    fn test_supports_native_is_total_over_the_catalog() {
        for dialect in Dialect::ALL {
            for capability in [
                Capability::NativeXor,
                Capability::NativeIlike,
                Capability::BooleanLiterals,
                Capability::ArrayLiterals,
                Capability::NestedLoopHints,
            ] {
                // never panics, whatever the pair
                let _ = supports_native(capability, dialect);
            }
        }
    }

    #[test]
    fn test_derived_dialects_share_the_family_capabilities() {
        assert!(Dialect::AuroraMysql.supports(Capability::NativeXor));
        assert!(Dialect::CockroachDb.supports(Capability::NativeIlike));
        assert!(Dialect::YugabyteDb.supports(Capability::NestedLoopHints));
        assert!(!Dialect::Postgres.supports(Capability::NestedLoopHints));
    }

    #[test]
    fn test_from_str_round_trips() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_from_str_fails_fast_on_unknown() {
        let err = "interbase".parse::<Dialect>().unwrap_err();
        assert_eq!(err.to_string(), "unknown dialect: 'interbase'");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::Postgres.placeholder(1), "$1");
        assert_eq!(Dialect::YugabyteDb.placeholder(2), "$2");
        assert_eq!(Dialect::MySql.placeholder(1), "?");
        assert_eq!(Dialect::SqlServer.placeholder(3), "@p3");
        assert_eq!(Dialect::Oracle.placeholder(1), ":1");
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Dialect::Postgres.identifier("email"), "email");
        assert_eq!(Dialect::Postgres.identifier("order"), "\"order\"");
        assert_eq!(Dialect::MySql.identifier("order"), "`order`");
        assert_eq!(Dialect::SqlServer.identifier("order"), "[order]");
        assert_eq!(Dialect::Postgres.identifier("t.order"), "t.\"order\"");
        assert_eq!(Dialect::Postgres.identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(Dialect::Postgres.bool_literal(true), "TRUE");
        assert_eq!(Dialect::Sqlite.bool_literal(true), "1");
        assert_eq!(Dialect::SqlServer.bool_literal(false), "0");
    }
}
