//! Integration tests for parsing query IR documents.

use mdxgen::ir::{CondValue, Condition, IrError, Operator, OrderBy, QueryIr, Scalar};
use mdxgen::mdx::SortDir;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_load_fixture() {
    let ir = QueryIr::from_file(fixture("query.json")).unwrap();

    assert_eq!(ir.measure, vec!["m_sales"]);
    assert_eq!(ir.row, vec!["d_region", "t_month"]);
    assert!(ir.col.is_empty());
    assert_eq!(ir.conds.len(), 3);
    assert_eq!(
        ir.conds[0],
        Condition::compare("t_month", Operator::Gte, "2023-03")
    );
    assert_eq!(ir.conds[2], Condition::eq("d_region", "North"));
    assert_eq!(ir.order_by, Some(OrderBy::new("Sales", SortDir::Desc)));
}

#[test]
fn test_condition_triples_and_objects() {
    let ir = QueryIr::from_json(
        r#"{
            "conds": [
                ["d1", "in", ["North", "South"]],
                {"id": "d2", "operator": "<", "value": 2023}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(ir.conds[0], Condition::one_of("d1", ["North", "South"]));
    assert!(ir.conds[0].is_multi_select());
    assert_eq!(ir.conds[1].op, Operator::Lt);
    assert_eq!(ir.conds[1].value, CondValue::Scalar(Scalar::Int(2023)));
}

#[test]
fn test_numeric_values_render_as_member_names() {
    assert_eq!(Scalar::Int(2023).to_string(), "2023");
    assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
    assert_eq!(Scalar::Text("2023-01".into()).to_string(), "2023-01");
}

#[test]
fn test_unknown_operator_rejected() {
    let err = QueryIr::from_json(r#"{"conds": [["d1", "LIKE", "No%"]]}"#).unwrap_err();
    match err {
        IrError::ParseError(e) => assert!(e.to_string().contains("LIKE")),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_null_value_rejected() {
    let result = QueryIr::from_json(r#"{"conds": [["d1", "=", null]]}"#);
    assert!(matches!(result, Err(IrError::ParseError(_))));
}

#[test]
fn test_missing_fields_default() {
    let ir = QueryIr::from_json("{}").unwrap();
    assert_eq!(ir, QueryIr::new());
}

#[test]
fn test_missing_file() {
    let err = QueryIr::from_file("/nonexistent/query.json").unwrap_err();
    assert!(matches!(err, IrError::FileNotFound(_)));
}
