//! Builds parameterized DDL, INSERT, SELECT, UPDATE, DELETE from a resolved table.

use crate::schema::{quoted, ResolvedTable};
use crate::sql::BindValue;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn placeholder(n: u32) -> String {
    format!("${}", n)
}

/// SELECT list in column order. With an alias every column is qualified and re-labelled.
pub fn select_column_list(table: &ResolvedTable, alias: Option<&str>) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(c.name);
            match alias {
                Some(a) => format!("{}.{} AS {}", a, q, q),
                None => q,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// ORDER BY list for the primary key, optionally qualified.
fn order_by_pk(table: &ResolvedTable, alias: Option<&str>) -> String {
    table
        .pk_columns
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{}.{}", a, quoted(c)),
            None => quoted(c),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// LIMIT/OFFSET suffix. OFFSET is only emitted together with LIMIT.
pub fn pagination_clause(limit: Option<u32>, offset: Option<u32>) -> String {
    match (limit, offset) {
        (Some(l), Some(o)) => format!(" LIMIT {} OFFSET {}", l, o),
        (Some(l), None) => format!(" LIMIT {}", l),
        (None, _) => String::new(),
    }
}

/// Offset for a 1-based position; `None` for positions below 1.
pub fn position_offset(position: i64) -> Option<i64> {
    if position < 1 {
        None
    } else {
        Some(position - 1)
    }
}

pub fn create_table(table: &ResolvedTable) -> String {
    let mut defs: Vec<String> = table.columns.iter().map(|c| table.column_ddl(c)).collect();
    defs.extend(table.constraints.iter().cloned());
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(&table.table_name),
        defs.join(", ")
    )
}

pub fn drop_table(table: &ResolvedTable) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", quoted(&table.table_name))
}

/// INSERT over every column except `id`, in sorted order. Columns without a value bind NULL.
pub fn insert(table: &ResolvedTable, values: &[(&'static str, BindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for name in table.column_names_without_id() {
        let val = values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(BindValue::NULL);
        let n = q.push_param(val);
        cols.push(quoted(name));
        placeholders.push(placeholder(n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(&table.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(table, None)
    );
    q
}

/// Full-row UPDATE by primary key. The id is bound last.
pub fn update(table: &ResolvedTable, id: i32, values: &[(&'static str, BindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = &table.pk_columns[0];
    let mut sets = Vec::new();
    for name in table.column_names_without_id() {
        let val = values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(BindValue::NULL);
        let n = q.push_param(val);
        sets.push(format!("{} = {}", quoted(name), placeholder(n)));
    }
    let id_param = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(&table.table_name),
        sets.join(", "),
        quoted(pk),
        id_param,
        select_column_list(table, None)
    );
    q
}

pub fn delete(table: &ResolvedTable, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = &table.pk_columns[0];
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(&table.table_name),
        quoted(pk),
        n,
        select_column_list(table, None)
    );
    q
}

/// SELECT every row ordered by primary key, with optional pagination.
pub fn select_list(table: &ResolvedTable, limit: Option<u32>, offset: Option<u32>) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}{}",
        select_column_list(table, None),
        quoted(&table.table_name),
        order_by_pk(table, None),
        pagination_clause(limit, offset)
    );
    q
}

/// Single row at a 1-based position in primary-key order. `None` when the position is below 1.
pub fn select_at_position(table: &ResolvedTable, position: i64) -> Option<QueryBuf> {
    let offset = position_offset(position)?;
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT 1 OFFSET {}",
        select_column_list(table, None),
        quoted(&table.table_name),
        order_by_pk(table, None),
        offset
    );
    Some(q)
}

pub fn count(table: &ResolvedTable) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(&table.table_name));
    q
}

/// COUNT(*) of rows where `column = value`, optionally skipping one primary key.
pub fn count_where(
    table: &ResolvedTable,
    column: &str,
    value: BindValue,
    exclude_id: Option<i32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(value);
    let mut sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = {}",
        quoted(&table.table_name),
        quoted(column),
        placeholder(n)
    );
    if let Some(id) = exclude_id {
        let n = q.push_param(BindValue::Int(id));
        sql.push_str(&format!(" AND {} <> ${}", quoted(&table.pk_columns[0]), n));
    }
    q.sql = sql;
    q
}

/// Parent column pulled into a child listing: child.foreign_key = parent.pk, parent.label_column AS alias.
pub struct ParentLabel<'a> {
    pub parent: &'a ResolvedTable,
    pub foreign_key: &'a str,
    pub label_column: &'a str,
    pub alias: &'a str,
}

const CHILD_ALIAS: &str = "c";
const PARENT_ALIAS: &str = "p";

fn select_with_parent_base(child: &ResolvedTable, label: &ParentLabel<'_>) -> String {
    format!(
        "SELECT {}, {}.{} AS {} FROM {} {} JOIN {} {} ON {}.{} = {}.{} WHERE {}.{} = $1 ORDER BY {}",
        select_column_list(child, Some(CHILD_ALIAS)),
        PARENT_ALIAS,
        quoted(label.label_column),
        quoted(label.alias),
        quoted(&child.table_name),
        CHILD_ALIAS,
        quoted(&label.parent.table_name),
        PARENT_ALIAS,
        CHILD_ALIAS,
        quoted(label.foreign_key),
        PARENT_ALIAS,
        quoted(&label.parent.pk_columns[0]),
        CHILD_ALIAS,
        quoted(label.foreign_key),
        order_by_pk(child, Some(CHILD_ALIAS)),
    )
}

/// Child rows of one parent joined with the parent's label, ordered by child primary key.
pub fn select_list_with_parent(
    child: &ResolvedTable,
    label: &ParentLabel<'_>,
    parent_id: i32,
    limit: Option<u32>,
    offset: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(BindValue::Int(parent_id));
    q.sql = format!(
        "{}{}",
        select_with_parent_base(child, label),
        pagination_clause(limit, offset)
    );
    q
}

/// One child row of a parent at a 1-based position, same join and order as [`select_list_with_parent`].
pub fn select_at_position_with_parent(
    child: &ResolvedTable,
    label: &ParentLabel<'_>,
    parent_id: i32,
    position: i64,
) -> Option<QueryBuf> {
    let offset = position_offset(position)?;
    let mut q = QueryBuf::new();
    q.push_param(BindValue::Int(parent_id));
    q.sql = format!(
        "{} LIMIT 1 OFFSET {}",
        select_with_parent_base(child, label),
        offset
    );
    Some(q)
}
