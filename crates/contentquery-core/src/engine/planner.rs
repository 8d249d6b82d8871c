/// Query planner
///
/// Resolves a parsed read against a table's columns and lays it out as a
/// physical plan: scan, filter, sort, limit, then project.
use super::ast::*;
use std::fmt;

/// Parsed read against one table
#[derive(Debug, Clone, Default)]
pub struct ReadQuery {
    /// Requested columns, `None` for all of them
    pub projection: Option<Vec<String>>,
    pub selection: Option<Expression>,
    pub sort_order: Option<SortOrder>,
}

/// Physical query plan
#[derive(Debug, Clone)]
pub struct PhysicalPlan {
    pub root: PhysicalOperator,
    /// Names of the result columns
    pub output: Vec<String>,
}

/// Sort key resolved to a table column
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub column: usize,
    pub direction: OrderDirection,
}

/// Physical operators for query execution
#[derive(Debug, Clone)]
pub enum PhysicalOperator {
    /// Full table scan
    TableScan { table: String },
    /// Filter rows based on predicate
    Filter {
        input: Box<PhysicalOperator>,
        condition: Expression,
    },
    /// Sort rows
    Sort {
        input: Box<PhysicalOperator>,
        keys: Vec<SortKey>,
    },
    /// Limit number of results
    Limit {
        input: Box<PhysicalOperator>,
        count: usize,
        offset: usize,
    },
    /// Keep the listed table columns, in order
    Project {
        input: Box<PhysicalOperator>,
        columns: Vec<usize>,
    },
}

/// Column lookup shared by the planner and executor. Names are matched
/// case-insensitively.
pub(crate) fn column_position(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.eq_ignore_ascii_case(name))
}

/// Query planner
pub struct Planner<'a> {
    /// Columns of the table being read
    columns: &'a [String],
}

impl<'a> Planner<'a> {
    /// Create a planner for a table with the given columns
    pub fn new(columns: &'a [String]) -> Self {
        Self { columns }
    }

    /// Plan a read
    pub fn plan(&self, table: &str, query: &ReadQuery) -> Result<PhysicalPlan, PlanError> {
        let projected = self.resolve_projection(query.projection.as_deref())?;

        let mut plan = PhysicalOperator::TableScan {
            table: table.to_string(),
        };

        if let Some(ref condition) = query.selection {
            self.check_columns(condition)?;
            plan = PhysicalOperator::Filter {
                input: Box::new(plan),
                condition: condition.clone(),
            };
        }

        if let Some(ref order) = query.sort_order {
            let keys = order
                .terms
                .iter()
                .map(|term| self.resolve_sort_key(term, &projected))
                .collect::<Result<Vec<_>, _>>()?;

            plan = PhysicalOperator::Sort {
                input: Box::new(plan),
                keys,
            };

            if let Some(ref limit) = order.limit {
                plan = PhysicalOperator::Limit {
                    input: Box::new(plan),
                    count: limit.count,
                    offset: limit.offset.unwrap_or(0),
                };
            }
        }

        let output = projected.iter().map(|&i| self.columns[i].clone()).collect();
        plan = PhysicalOperator::Project {
            input: Box::new(plan),
            columns: projected,
        };

        Ok(PhysicalPlan { root: plan, output })
    }

    fn resolve_projection(&self, projection: Option<&[String]>) -> Result<Vec<usize>, PlanError> {
        match projection {
            None | Some([]) => Ok((0..self.columns.len()).collect()),
            Some(names) => names
                .iter()
                .map(|name| {
                    column_position(self.columns, name)
                        .ok_or_else(|| PlanError::UnknownColumn(name.clone()))
                })
                .collect(),
        }
    }

    fn resolve_sort_key(&self, term: &OrderTerm, projected: &[usize]) -> Result<SortKey, PlanError> {
        let column = match term.key {
            OrderKey::Column(ref name) => column_position(self.columns, name)
                .ok_or_else(|| PlanError::UnknownColumn(name.clone()))?,
            // Ordinals count result columns, not table columns.
            OrderKey::Ordinal(n) => *n
                .checked_sub(1)
                .and_then(|i| projected.get(i))
                .ok_or(PlanError::OrdinalOutOfRange {
                    ordinal: n,
                    columns: projected.len(),
                })?,
        };

        Ok(SortKey {
            column,
            direction: term.direction.clone(),
        })
    }

    fn check_columns(&self, expr: &Expression) -> Result<(), PlanError> {
        match expr {
            Expression::Column(name) => column_position(self.columns, name)
                .map(|_| ())
                .ok_or_else(|| PlanError::UnknownColumn(name.clone())),
            Expression::Literal(_) | Expression::Parameter(_) => Ok(()),
            Expression::BinaryOp { left, right, .. } | Expression::LogicalOp { left, right, .. } => {
                self.check_columns(left)?;
                self.check_columns(right)
            }
            Expression::Not(inner) | Expression::IsNull { expr: inner, .. } => {
                self.check_columns(inner)
            }
            Expression::Like { expr, pattern, .. } => {
                self.check_columns(expr)?;
                self.check_columns(pattern)
            }
            Expression::In { expr, values, .. } => {
                self.check_columns(expr)?;
                values.iter().try_for_each(|v| self.check_columns(v))
            }
            Expression::Between { expr, min, max } => {
                self.check_columns(expr)?;
                self.check_columns(min)?;
                self.check_columns(max)
            }
        }
    }
}

/// Planning errors
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    UnknownColumn(String),
    OrdinalOutOfRange { ordinal: usize, columns: usize },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::UnknownColumn(name) => write!(f, "No such column: {}", name),
            PlanError::OrdinalOutOfRange { ordinal, columns } => write!(
                f,
                "ORDER BY term {} out of range, should be between 1 and {}",
                ordinal, columns
            ),
        }
    }
}

impl std::error::Error for PlanError {}

impl fmt::Display for PhysicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl fmt::Display for PhysicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalOperator::TableScan { table } => write!(f, "TableScan({})", table),
            PhysicalOperator::Filter { input, condition } => {
                write!(f, "Filter({}) -> {}", condition, input)
            }
            PhysicalOperator::Sort { input, keys } => {
                write!(f, "Sort(")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "#{} {}", key.column, key.direction)?;
                }
                write!(f, ") -> {}", input)
            }
            PhysicalOperator::Limit {
                input,
                count,
                offset,
            } => {
                write!(f, "Limit({}, {}) -> {}", count, offset, input)
            }
            PhysicalOperator::Project { input, columns } => {
                write!(f, "Project(")?;
                for (i, col) in columns.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "#{}", col)?;
                }
                write!(f, ") -> {}", input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::Parser;

    fn columns() -> Vec<String> {
        vec!["_id".into(), "title".into(), "size".into()]
    }

    fn read(projection: Option<&[&str]>, selection: Option<&str>, sort: Option<&str>) -> ReadQuery {
        ReadQuery {
            projection: projection.map(|p| p.iter().map(|s| s.to_string()).collect()),
            selection: selection.map(|s| Parser::new(s).unwrap().parse_selection().unwrap()),
            sort_order: sort.map(|s| Parser::new(s).unwrap().parse_sort_order().unwrap()),
        }
    }

    #[test]
    fn test_simple_plan() {
        let cols = columns();
        let plan = Planner::new(&cols).plan("files", &read(None, None, None)).unwrap();

        // Should have Project -> TableScan
        match plan.root {
            PhysicalOperator::Project { input, columns } => {
                assert_eq!(columns, vec![0, 1, 2]);
                assert!(matches!(*input, PhysicalOperator::TableScan { .. }));
            }
            _ => panic!("Expected Project"),
        }
        assert_eq!(plan.output, cols);
    }

    #[test]
    fn test_full_plan_shape() {
        let cols = columns();
        let query = read(Some(&["title"]), Some("size > ?"), Some("_id DESC LIMIT 3"));
        let plan = Planner::new(&cols).plan("files", &query).unwrap();

        assert_eq!(
            plan.to_string(),
            "Project(#1) -> Limit(3, 0) -> Sort(#0 DESC) -> Filter((size > ?1)) -> TableScan(files)"
        );
        assert_eq!(plan.output, vec!["title".to_string()]);
    }

    #[test]
    fn test_ordinal_follows_projection() {
        let cols = columns();
        let query = read(Some(&["size", "title"]), None, Some("1 LIMIT 1"));
        let plan = Planner::new(&cols).plan("files", &query).unwrap();
        assert!(plan.to_string().contains("Sort(#2 ASC)"));
    }

    #[test]
    fn test_unknown_columns() {
        let cols = columns();
        let planner = Planner::new(&cols);

        assert_eq!(
            planner
                .plan("files", &read(Some(&["missing"]), None, None))
                .unwrap_err(),
            PlanError::UnknownColumn("missing".into())
        );
        assert!(planner
            .plan("files", &read(None, Some("missing = 1"), None))
            .is_err());
        assert!(planner
            .plan("files", &read(None, None, Some("missing")))
            .is_err());
    }

    #[test]
    fn test_ordinal_out_of_range() {
        let cols = columns();
        let err = Planner::new(&cols)
            .plan("files", &read(Some(&["title"]), None, Some("2")))
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::OrdinalOutOfRange {
                ordinal: 2,
                columns: 1
            }
        );
    }
}
