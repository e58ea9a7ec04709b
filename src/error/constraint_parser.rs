use std::sync::OnceLock;

use regex::Regex;

/// Parses PostgreSQL constraint violation messages into structured parts.
///
/// Constraint names follow the conventions diesel's migrations produce:
/// `{table}_{column}_key` for unique indexes and `{table}_{column}_fkey`
/// for foreign keys. Message details carry the offending values.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)" in violation DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Extracts (entity, field, value) from a unique violation message.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name
            && let Some((entity, field)) = Self::parse_constraint_name(constraint)
        {
            if let Some((_, value)) = Self::extract_key_value_from_message(message) {
                return Some((entity, field, value));
            }
            return Some((entity, field, "duplicate_value".to_string()));
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity =
                Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Extracts (entity, field) from a not-null violation message.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name
            && let Some(parsed) = Self::parse_constraint_name(constraint)
        {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Extracts (referenced entity, field, value) from a foreign key
    /// violation message.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let field = constraint_name
            .and_then(Self::parse_foreign_key_constraint_name)
            .map(|(_, field)| field)
            .or_else(|| Self::extract_key_value_from_message(message).map(|(field, _)| field))?;

        let value = Self::extract_key_value_from_message(message)
            .map(|(_, value)| value)
            .unwrap_or_else(|| "unknown".to_string());

        // "is not present in table "x"" names the referenced table last
        let entity = Self::patterns()
            .table_name
            .captures_iter(message)
            .last()
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| "resource".to_string());

        Some((entity, field, value))
    }

    /// Extracts (entity, field) from a check violation message.
    pub fn parse_check_violation(
        _message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name.and_then(|c| {
            // "{table}_{column}_check"
            let stripped = c.strip_suffix("_check")?;
            Self::split_table_column(stripped)
        })
    }

    /// Splits a `{table}_{column}_key` unique constraint name.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        // "_fkey" itself ends with "_key", so strip it first
        let stripped = constraint
            .strip_suffix("_fkey")
            .or_else(|| constraint.strip_suffix("_key"))?;
        let (table, column) = Self::split_table_column(stripped)?;
        // fkey names carry the full column ("user_id"); unique keys the bare
        // field, so trim a trailing "_id" only for fkey-derived fields
        if constraint.ends_with("_fkey") {
            let column = column.strip_suffix("_id").unwrap_or(&column).to_string();
            return Some((table, column));
        }
        Some((table, column))
    }

    /// Splits a `{table}_{column}_fkey` constraint name, keeping the full
    /// column name.
    pub fn parse_foreign_key_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stripped = constraint.strip_suffix("_fkey")?;
        Self::split_table_column(stripped)
    }

    fn split_table_column(name: &str) -> Option<(String, String)> {
        // Table names may themselves contain underscores; match known
        // multi-word prefixes greedily before falling back to the first
        // segment.
        for table in ["service_categories", "service_requests"] {
            if let Some(rest) = name.strip_prefix(table)
                && let Some(column) = rest.strip_prefix('_')
            {
                return Some((table.to_string(), column.to_string()));
            }
        }
        let (table, column) = name.split_once('_')?;
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts ("field", "value") from a "Key (field)=(value)" detail.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(message)
            .map(|c| (c[1].to_string(), c[2].to_string()))
    }

    /// Extracts the quoted column name from a violation message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .map(|c| c[1].to_string())
    }

    /// Extracts the first quoted table name from a violation message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .map(|c| c[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unique_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_username_key"),
            Some(("users".to_string(), "username".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("service_categories_name_key"),
            Some(("service_categories".to_string(), "name".to_string()))
        );
    }

    #[test]
    fn parses_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("service_requests_category_id_fkey"),
            Some(("service_requests".to_string(), "category_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("service_requests_user_id_fkey"),
            Some(("service_requests".to_string(), "user_id".to_string()))
        );
    }

    #[test]
    fn extracts_key_value_detail() {
        let message = "duplicate key value violates unique constraint \"users_username_key\"\nDETAIL: Key (username)=(alice) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("username".to_string(), "alice".to_string()))
        );
    }

    #[test]
    fn parses_unique_violation() {
        let message = "duplicate key value violates unique constraint \"users_username_key\"\nDETAIL: Key (username)=(alice) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("users_username_key")),
            Some((
                "users".to_string(),
                "username".to_string(),
                "alice".to_string()
            ))
        );
    }

    #[test]
    fn parses_foreign_key_violation_names_referenced_table() {
        let message = "insert or update on table \"service_requests\" violates foreign key constraint \"service_requests_category_id_fkey\"\nDETAIL: Key (category_id)=(999) is not present in table \"service_categories\".";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(
                message,
                Some("service_requests_category_id_fkey")
            ),
            Some((
                "service_categories".to_string(),
                "category_id".to_string(),
                "999".to_string()
            ))
        );
    }

    #[test]
    fn extracts_column_from_not_null_message() {
        let message = "null value in column \"description\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::extract_column_from_message(message),
            Some("description".to_string())
        );
    }
}
