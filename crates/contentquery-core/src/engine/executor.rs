/// Query executor
///
/// Executes physical plans over an in-memory table.
use super::ast::*;
use super::planner::{column_position, PhysicalOperator, PhysicalPlan, SortKey};
use crate::error::Result;
use crate::value::Value;
use std::cmp::Ordering;

/// Rows of one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
}

/// Query executor
pub struct Executor<'a> {
    table: &'a Table,
    /// Values bound to `?` placeholders, by position
    parameters: &'a [Value],
    case_sensitive_like: bool,
}

impl<'a> Executor<'a> {
    /// Create new executor
    pub fn new(table: &'a Table, parameters: &'a [Value]) -> Self {
        Self {
            table,
            parameters,
            case_sensitive_like: false,
        }
    }

    /// Make LIKE compare case-sensitively
    pub fn with_case_sensitive_like(mut self, enabled: bool) -> Self {
        self.case_sensitive_like = enabled;
        self
    }

    /// Execute a physical plan, returning rows in `plan.output` column order
    pub fn execute(&self, plan: &PhysicalPlan) -> Result<Vec<Vec<Value>>> {
        self.execute_operator(&plan.root)
    }

    fn execute_operator(&self, op: &PhysicalOperator) -> Result<Vec<Vec<Value>>> {
        match op {
            PhysicalOperator::TableScan { .. } => Ok(self.table.rows.clone()),
            PhysicalOperator::Filter { input, condition } => self.execute_filter(input, condition),
            PhysicalOperator::Sort { input, keys } => self.execute_sort(input, keys),
            PhysicalOperator::Limit {
                input,
                count,
                offset,
            } => self.execute_limit(input, *count, *offset),
            PhysicalOperator::Project { input, columns } => self.execute_project(input, columns),
        }
    }

    fn execute_filter(
        &self,
        input: &PhysicalOperator,
        condition: &Expression,
    ) -> Result<Vec<Vec<Value>>> {
        let rows = self.execute_operator(input)?;

        let filtered = rows
            .into_iter()
            .filter(|row| self.evaluate_condition(row, condition) == Some(true))
            .collect();

        Ok(filtered)
    }

    fn execute_sort(&self, input: &PhysicalOperator, keys: &[SortKey]) -> Result<Vec<Vec<Value>>> {
        let mut rows = self.execute_operator(input)?;

        // Stable, so ties keep table order.
        rows.sort_by(|a, b| {
            for key in keys {
                let ordering = a[key.column].sort_cmp(&b[key.column]);
                let ordering = match key.direction {
                    OrderDirection::Asc => ordering,
                    OrderDirection::Desc => ordering.reverse(),
                };

                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        Ok(rows)
    }

    fn execute_limit(
        &self,
        input: &PhysicalOperator,
        count: usize,
        offset: usize,
    ) -> Result<Vec<Vec<Value>>> {
        let rows = self.execute_operator(input)?;
        Ok(rows.into_iter().skip(offset).take(count).collect())
    }

    fn execute_project(
        &self,
        input: &PhysicalOperator,
        columns: &[usize],
    ) -> Result<Vec<Vec<Value>>> {
        let rows = self.execute_operator(input)?;

        let projected = rows
            .into_iter()
            .map(|row| columns.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(projected)
    }

    /// Three-valued evaluation: `None` is SQL UNKNOWN.
    fn evaluate_condition(&self, row: &[Value], condition: &Expression) -> Option<bool> {
        match condition {
            Expression::Column(_) | Expression::Literal(_) | Expression::Parameter(_) => {
                let value = self.evaluate_expression(row, condition);
                if value.is_null() {
                    None
                } else {
                    Some(value.as_f64().is_some_and(|v| v != 0.0))
                }
            }
            Expression::BinaryOp { left, op, right } => {
                let left_val = self.evaluate_expression(row, left);
                let right_val = self.evaluate_expression(row, right);
                let ordering = left_val.predicate_cmp(&right_val)?;

                Some(match op {
                    BinaryOperator::Eq => ordering == Ordering::Equal,
                    BinaryOperator::Ne => ordering != Ordering::Equal,
                    BinaryOperator::Lt => ordering == Ordering::Less,
                    BinaryOperator::Le => ordering != Ordering::Greater,
                    BinaryOperator::Gt => ordering == Ordering::Greater,
                    BinaryOperator::Ge => ordering != Ordering::Less,
                })
            }
            Expression::LogicalOp { left, op, right } => {
                let left_result = self.evaluate_condition(row, left);
                let right_result = self.evaluate_condition(row, right);

                match op {
                    LogicalOperator::And => match (left_result, right_result) {
                        (Some(false), _) | (_, Some(false)) => Some(false),
                        (Some(true), Some(true)) => Some(true),
                        _ => None,
                    },
                    LogicalOperator::Or => match (left_result, right_result) {
                        (Some(true), _) | (_, Some(true)) => Some(true),
                        (Some(false), Some(false)) => Some(false),
                        _ => None,
                    },
                }
            }
            Expression::Not(expr) => self.evaluate_condition(row, expr).map(|b| !b),
            Expression::Like {
                expr,
                pattern,
                negated,
            } => {
                let text = self.evaluate_expression(row, expr).as_text()?;
                let pattern = self.evaluate_expression(row, pattern).as_text()?;
                let matched = like_match(&text, &pattern, self.case_sensitive_like);
                Some(matched != *negated)
            }
            Expression::In {
                expr,
                values,
                negated,
            } => {
                let value = self.evaluate_expression(row, expr);
                if value.is_null() {
                    return None;
                }

                let mut saw_null = false;
                for candidate in values {
                    let candidate = self.evaluate_expression(row, candidate);
                    match value.predicate_cmp(&candidate) {
                        Some(Ordering::Equal) => return Some(!*negated),
                        Some(_) => {}
                        None => saw_null = true,
                    }
                }

                if saw_null {
                    None
                } else {
                    Some(*negated)
                }
            }
            Expression::Between { expr, min, max } => {
                let value = self.evaluate_expression(row, expr);
                let lower = value.predicate_cmp(&self.evaluate_expression(row, min))?;
                let upper = value.predicate_cmp(&self.evaluate_expression(row, max))?;
                Some(lower != Ordering::Less && upper != Ordering::Greater)
            }
            Expression::IsNull { expr, negated } => {
                let is_null = self.evaluate_expression(row, expr).is_null();
                Some(is_null != *negated)
            }
        }
    }

    fn evaluate_expression(&self, row: &[Value], expr: &Expression) -> Value {
        match expr {
            Expression::Column(name) => column_position(&self.table.columns, name)
                .and_then(|idx| row.get(idx).cloned())
                .unwrap_or(Value::Null),
            Expression::Literal(lit) => literal_to_value(lit),
            // Unbound parameters read as NULL.
            Expression::Parameter(index) => {
                self.parameters.get(*index).cloned().unwrap_or(Value::Null)
            }
            condition => match self.evaluate_condition(row, condition) {
                Some(b) => Value::Boolean(b),
                None => Value::Null,
            },
        }
    }
}

fn literal_to_value(lit: &Literal) -> Value {
    match lit {
        Literal::Integer(i) => Value::Integer(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::String(s) => Value::Text(s.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
    }
}

/// LIKE matching with `%` (any run) and `_` (one character).
pub(crate) fn like_match(text: &str, pattern: &str, case_sensitive: bool) -> bool {
    let fold = |s: &str| -> Vec<char> {
        if case_sensitive {
            s.chars().collect()
        } else {
            s.chars().map(|c| c.to_ascii_lowercase()).collect()
        }
    };
    let text = fold(text);
    let pattern = fold(pattern);

    // Greedy match with backtracking to the last '%'.
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = backtrack {
            p = star_p + 1;
            t = star_t + 1;
            backtrack = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '%')
}
