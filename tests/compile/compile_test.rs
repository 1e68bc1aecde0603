//! Integration tests for the end-to-end query IR → MDX compilation pipeline.

use insta::assert_snapshot;
use mdxgen::compile::{compile, compile_json, CompileError, CompileOptions};
use mdxgen::ir::{Condition, Operator, OrderBy, QueryIr};
use mdxgen::mdx::SortDir;
use mdxgen::metadata::{DimensionMeta, MetadataIndex};
use mdxgen::planner::{DatePlacement, OrderDirective, PlanError, Placement};

fn index() -> MetadataIndex {
    MetadataIndex::new()
        .with(DimensionMeta::measure("m1", "Sales"))
        .with(DimensionMeta::dimension("d1", "Region"))
        .with(DimensionMeta::dimension("d2", "Region"))
        .with(DimensionMeta::level("t1", "Date", "Month").with_time_level("month"))
        .with(DimensionMeta::level("t2", "Date", "Year").with_time_level("year"))
}

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(path).unwrap()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_measure_and_full_row_axis() {
    let ir = QueryIr::new().with_measure(["m1"]).with_row(["d1"]);
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert!(output.mdx.contains("{[Measures].[Sales]} ON COLUMNS"));
    assert!(output.mdx.contains("NON EMPTY {[Region].[Region].Members} ON ROWS"));
    assert!(!output.mdx.contains("WHERE"));
    assert_snapshot!(output.mdx, @r"
    SELECT
    {[Measures].[Sales]} ON COLUMNS,
    NON EMPTY {[Region].[Region].Members} ON ROWS
    FROM [cube]
    ");
}

#[test]
fn test_condition_on_displayed_dimension() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_row(["d2"])
        .with_cond(Condition::eq("d2", "North"));
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert_eq!(output.statement.rows.len(), 1);
    assert_eq!(output.statement.rows[0].to_mdx(), "[Region].[Region].[North]");
    assert!(!output.mdx.contains(".Members"));
    assert_eq!(output.used, vec!["d2"]);
}

#[test]
fn test_date_range_clears_ordering() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_cond(Condition::compare("t1", Operator::Gt, "2023-01"))
        .with_cond(Condition::compare("t1", Operator::Lt, "2023-12"))
        .with_order_by(OrderBy::new("Sales", SortDir::Desc));
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert_eq!(output.mdx.matches("filter(").count(), 1);
    assert_eq!(output.order_by, None);
    assert_eq!(output.ordering, OrderDirective::Suppressed);
    assert_snapshot!(output.mdx, @r"
    SELECT
    {[Measures].[Sales]} ON COLUMNS,
    NON EMPTY {filter([Date].[Month].Members, (Ancestor([Date].currentMember, [Date].[Month]).caption > '2023-01') and (Ancestor([Date].currentMember, [Date].[Month]).caption < '2023-12'))} ON ROWS
    FROM [cube]
    ");
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_ordering_kept_without_date_conditions() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_row(["d1"])
        .with_order_by(OrderBy::new("Sales", SortDir::Desc));
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert_eq!(output.order_by, Some(OrderBy::new("Sales", SortDir::Desc)));
    assert_eq!(output.ordering, OrderDirective::KeepOriginal);
    assert_eq!(output.date_placement, None);
}

#[test]
fn test_multi_select_clears_ordering() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_row(["t1"])
        .with_cond(Condition::one_of("t1", ["2023-01", "2023-02"]))
        .with_order_by(OrderBy::new("Sales", SortDir::Asc));
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert_eq!(output.order_by, None);
    assert!(matches!(output.ordering, OrderDirective::Overridden(_)));
    assert_snapshot!(output.mdx, @r"
    SELECT
    {[Measures].[Sales]} ON COLUMNS,
    NON EMPTY {order({[Date].[Month].[2023-01],[Date].[Month].[2023-02]}, ([Date].currentMember.caption), BASC)} ON ROWS
    FROM [cube]
    ");
}

#[test]
fn test_input_ir_not_mutated() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_cond(Condition::compare("t1", Operator::Gte, "2023-01"))
        .with_order_by(OrderBy::new("Sales", SortDir::Desc));
    let before = ir.clone();
    compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert_eq!(ir, before);
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_rows_cross_joined() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_row(["t2", "d1"])
        .with_cond(Condition::eq("t2", "2023"));
    let output = compile(&index(), &ir, &CompileOptions::default()).unwrap();

    assert!(output
        .mdx
        .contains("NON EMPTY {{[Date].[Year].[2023]}*[Region].[Region].Members} ON ROWS"));
}

#[test]
fn test_resolver_placement_emits_where() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_row(["d1"])
        .with_cond(Condition::eq("t2", "2023"));
    let options = CompileOptions::default()
        .with_cube("Contracts")
        .with_date_placement(DatePlacement::Resolver);
    let output = compile(&index(), &ir, &options).unwrap();

    assert_eq!(output.date_placement, Some(Placement::Slicer));
    assert_snapshot!(output.mdx, @r"
    SELECT
    {[Measures].[Sales]} ON COLUMNS,
    NON EMPTY {[Region].[Region].Members} ON ROWS
    FROM [Contracts]
    WHERE {{[Date].[Year].[2023]}}
    ");
}

#[test]
fn test_empty_query_is_minimal_statement() {
    let output = compile(&index(), &QueryIr::new(), &CompileOptions::default()).unwrap();
    assert_eq!(output.mdx, "SELECT\nFROM [cube]");
}

#[test]
fn test_compilation_is_deterministic() {
    let ir = QueryIr::from_json(&fixture("query.json")).unwrap();
    let index = MetadataIndex::from_json(&fixture("fields.json")).unwrap();

    let first = compile(&index, &ir.clone(), &CompileOptions::default()).unwrap();
    let second = compile(&index, &ir.clone(), &CompileOptions::default()).unwrap();

    assert_eq!(first.mdx, second.mdx);
    assert_eq!(first, second);
}

#[test]
fn test_compile_fixture_documents() {
    let output = compile_json(
        &fixture("fields.json"),
        &fixture("query.json"),
        &CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(output.order_by, None);
    assert_eq!(output.used, vec!["t_month", "d_region"]);
    assert_snapshot!(output.mdx, @r"
    SELECT
    {[Measures].[Sales]} ON COLUMNS,
    NON EMPTY {filter([Date].[Month].Members, (Ancestor([Date].currentMember, [Date].[Month]).caption >= '2023-03') and (Ancestor([Date].currentMember, [Date].[Month]).caption <= '2023-06'))*[Region].[Region].[North]} ON ROWS
    FROM [cube]
    ");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_identifier_fails() {
    let ir = QueryIr::new()
        .with_measure(["m1"])
        .with_cond(Condition::eq("d9", "North"));
    let err = compile(&index(), &ir, &CompileOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        CompileError::Plan(PlanError::UnknownIdentifier { ref id }) if id == "d9"
    ));
    assert_eq!(
        err.to_string(),
        "Planning error: Unknown identifier: 'd9'"
    );
}

#[test]
fn test_malformed_documents_fail() {
    let err = compile_json("[", "{}", &CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::Metadata(_)));

    let err = compile_json("{}", r#"{"conds": [["d1", "~", 1]]}"#, &CompileOptions::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Query(_)));
}
