//! End-to-end query tests against CSV files on disk.

use mini_sql::query::{parse, AggregateArg, Operator, Projection};
use mini_sql::render::format_table;
use mini_sql::session::{Response, Session};
use mini_sql::{Config, CsvLoader, EngineError, Executor, Value};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const EMPLOYEES: &str = "\
name,age,dept
Alice,30,Engineering
Bob,25,Marketing
Carol,41,Engineering
Dan,,Sales
Eve,35,\"Research, Applied\"
";

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("employees.csv"), EMPLOYEES).unwrap();
    dir
}

fn executor(dir: &Path) -> Executor<CsvLoader> {
    Executor::new(CsvLoader::new(Config {
        data_dir: dir.to_path_buf(),
        ..Config::default()
    }))
}

fn count_of(result: &mini_sql::QueryResult) -> Value {
    result.rows[0].get("count").cloned().unwrap()
}

#[test]
fn test_count_star() {
    let dir = fixture();
    let result = executor(dir.path())
        .execute_sql("SELECT COUNT(*) FROM employees")
        .unwrap();

    assert_eq!(result.columns, vec!["count"]);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(count_of(&result), Value::Integer(5));
}

#[test]
fn test_select_specific_columns() {
    let dir = fixture();
    let result = executor(dir.path())
        .execute_sql("SELECT name, age FROM employees")
        .unwrap();

    assert_eq!(result.columns, vec!["name", "age"]);
    assert_eq!(result.rows.len(), 5);
    for row in &result.rows {
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "age"]);
    }
}

#[test]
fn test_string_literal_filter_on_missing_column() {
    let dir = fixture();
    fs::write(dir.path().join("customers.csv"), "name,city\nAcme,Paris\n").unwrap();

    let query = parse("SELECT * FROM customers WHERE country = 'USA'").unwrap();
    let filter = query.filter.clone().unwrap();
    assert_eq!(filter.column, "country");
    assert_eq!(filter.operator, Operator::Eq);
    assert_eq!(filter.literal, Value::String("USA".into()));

    let err = executor(dir.path()).execute(&query).unwrap_err();
    assert!(matches!(err, EngineError::ColumnNotFound(c) if c == "country"));
}

#[test]
fn test_empty_field_excluded_from_column_count() {
    let dir = fixture();
    let exec = executor(dir.path());

    let all = exec.execute_sql("SELECT COUNT(*) FROM employees").unwrap();
    let ages = exec.execute_sql("SELECT COUNT(age) FROM employees").unwrap();
    assert_eq!(count_of(&all), Value::Integer(5));
    assert_eq!(count_of(&ages), Value::Integer(4));

    let dan = exec
        .execute_sql("SELECT age FROM employees WHERE name = Dan")
        .unwrap();
    assert_eq!(dan.rows[0].get("age"), Some(&Value::Null));
}

#[test]
fn test_select_star_identity() {
    let dir = fixture();
    let exec = executor(dir.path());
    let result = exec.execute_sql("SELECT * FROM employees").unwrap();
    let table = exec.source().config().resolve_path("employees");

    assert_eq!(result.columns, vec!["name", "age", "dept"]);
    assert_eq!(result.rows.len(), 5);
    assert_eq!(result.rows[4].get("dept"), Some(&Value::String("Research, Applied".into())));
    assert!(table.ends_with("employees.csv"));
}

#[test]
fn test_numeric_and_text_filters() {
    let dir = fixture();
    let exec = executor(dir.path());

    let over_30 = exec
        .execute_sql("SELECT name FROM employees WHERE age > 30")
        .unwrap();
    let names: Vec<_> = over_30.rows.iter().filter_map(|r| r.get("name").cloned()).collect();
    assert_eq!(names, vec![Value::from("Carol"), Value::from("Eve")]);

    let engineers = exec
        .execute_sql("SELECT COUNT(*) FROM employees WHERE dept = 'Engineering'")
        .unwrap();
    assert_eq!(count_of(&engineers), Value::Integer(2));

    // Float literal against integer column
    let result = exec
        .execute_sql("SELECT COUNT(*) FROM employees WHERE age <= 30.0")
        .unwrap();
    assert_eq!(count_of(&result), Value::Integer(2));
}

#[test]
fn test_null_column_with_ordering_operator() {
    let dir = fixture();
    let result = executor(dir.path())
        .execute_sql("SELECT name FROM employees WHERE age < 1000")
        .unwrap();
    assert_eq!(result.rows.len(), 4);

    let result = executor(dir.path())
        .execute_sql("SELECT name FROM employees WHERE age != 30")
        .unwrap();
    // Null != 30 holds
    assert_eq!(result.rows.len(), 4);
}

#[test]
fn test_table_not_found() {
    let dir = fixture();
    let err = executor(dir.path())
        .execute_sql("SELECT * FROM missing")
        .unwrap_err();
    assert!(matches!(err, EngineError::TableNotFound(_)));
    assert_eq!(err.kind(), "table_not_found");
}

#[test]
fn test_syntax_errors_never_touch_storage() {
    let dir = tempdir().unwrap();
    let err = executor(dir.path()).execute_sql("SELECT FROM x").unwrap_err();
    assert!(matches!(err, EngineError::Syntax(_)));
}

#[test]
fn test_parse_shapes() {
    let q = parse("SELECT COUNT(dept) FROM employees").unwrap();
    assert_eq!(q.aggregate().unwrap().argument, AggregateArg::Column("dept".into()));

    let q = parse("SELECT dept,name FROM employees").unwrap();
    assert_eq!(
        q.projection(),
        Some(&Projection::Columns(vec!["dept".into(), "name".into()]))
    );
}

#[test]
fn test_render_result() {
    let dir = fixture();
    let result = executor(dir.path())
        .execute_sql("SELECT name, age FROM employees WHERE dept = 'Sales'")
        .unwrap();
    assert_eq!(
        format_table(&result.columns, &result.rows),
        "name | age\n-----+----\nDan  |    "
    );

    let empty = executor(dir.path())
        .execute_sql("SELECT name FROM employees WHERE age > 99")
        .unwrap();
    assert_eq!(
        format_table(&empty.columns, &empty.rows),
        "name\n----\n(0 rows)"
    );
}

#[test]
fn test_session_with_csv_loader() {
    let dir = fixture();
    let loader = CsvLoader::new(Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    });
    let mut session = Session::new(loader);

    assert!(matches!(
        session.handle("LOAD employees.csv"),
        Response::Loaded { rows: 5, .. }
    ));
    match session.handle("SELECT COUNT(*) WHERE dept = 'Engineering';") {
        Response::Rows(result) => assert_eq!(count_of(&result), Value::Integer(2)),
        other => panic!("unexpected response: {:?}", other),
    }
    match session.handle("SELECT name FROM employees WHERE age >= 35") {
        Response::Rows(result) => assert_eq!(result.rows.len(), 2),
        other => panic!("unexpected response: {:?}", other),
    }
}
