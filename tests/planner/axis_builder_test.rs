//! Integration tests for axis and condition assignment.

use mdxgen::ir::{Condition, Operator, QueryIr};
use mdxgen::mdx::MdxExpr;
use mdxgen::metadata::{DimensionMeta, MetadataIndex};
use mdxgen::planner::{
    build_axes, AxisBuilder, DatePlacement, MdxPlanner, OrderDirective, PlanError, Placement,
};

fn index() -> MetadataIndex {
    MetadataIndex::new()
        .with(DimensionMeta::level("t_year", "Date", "Year").with_time_level("year"))
        .with(DimensionMeta::level("t_month", "Date", "Month").with_time_level("month"))
        .with(DimensionMeta::dimension("d_region", "Region"))
        .with(DimensionMeta::dimension("d_product", "Product"))
        .with(DimensionMeta::level("d_city", "Geography", "City"))
        .with(DimensionMeta::measure("m_sales", "Sales"))
}

fn rendered(rows: &[MdxExpr]) -> Vec<String> {
    rows.iter().map(MdxExpr::to_mdx).collect()
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_condition_replaces_members_enumeration() {
    let ir = QueryIr::new()
        .with_row(["d_region"])
        .with_cond(Condition::eq("d_region", "North"));
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(rendered(&plan.rows), vec!["[Region].[Region].[North]"]);
    assert_eq!(plan.used.into_vec(), vec!["d_region"]);
}

#[test]
fn test_level_condition_uses_object_name() {
    let ir = QueryIr::new().with_cond(Condition::one_of("d_city", ["Oslo", "Bergen"]));
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(
        rendered(&plan.rows),
        vec!["{[Geography].[City].[Oslo],[Geography].[City].[Bergen]}"]
    );
}

#[test]
fn test_date_fragment_precedes_other_conditions() {
    let ir = QueryIr::new()
        .with_cond(Condition::eq("d_region", "North"))
        .with_cond(Condition::eq("t_year", "2023"));
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(
        rendered(&plan.rows),
        vec!["{[Date].[Year].[2023]}", "[Region].[Region].[North]"]
    );
    assert_eq!(plan.date_placement, Some(Placement::Slicer));
    assert!(plan.slicer.is_empty());
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_unused_axes_enumerated_in_order() {
    let ir = QueryIr::new()
        .with_row(["d_region"])
        .with_col(["d_product"]);
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(
        rendered(&plan.rows),
        vec!["[Region].[Region].Members", "[Product].[Product].Members"]
    );
    assert_eq!(plan.ordering, OrderDirective::KeepOriginal);
}

#[test]
fn test_each_identifier_emitted_once() {
    let ir = QueryIr::new()
        .with_row(["d_region", "d_region", "t_month"])
        .with_col(["d_region"])
        .with_cond(Condition::eq("d_region", "North"))
        .with_cond(Condition::eq("d_region", "South"))
        .with_cond(Condition::compare("t_month", Operator::Gt, "2023-01"));
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(plan.rows.len(), 2);
    let rows = rendered(&plan.rows);
    assert!(rows[0].starts_with("filter("));
    assert_eq!(rows[1], "[Region].[Region].[North]");
    assert!(!rows.iter().any(|r| r.ends_with(".Members")));
}

#[test]
fn test_measure_on_axis_skipped() {
    let ir = QueryIr::new().with_row(["m_sales", "d_region"]);
    let plan = build_axes(&index(), &ir, DatePlacement::Rows).unwrap();

    assert_eq!(rendered(&plan.rows), vec!["[Region].[Region].Members"]);
}

#[test]
fn test_builder_passes_chain() {
    let index = index();
    let ir = QueryIr::new().with_row(["d_product"]);
    let mut builder = AxisBuilder::new(&index, &ir, DatePlacement::Rows);
    builder.build_condition().unwrap().build_row().unwrap();
    let plan = builder.finish();

    assert_eq!(plan.used.len(), 1);
    assert!(plan.used.contains("d_product"));
}

// ============================================================================
// Date placement policy
// ============================================================================

#[test]
fn test_resolver_policy_routes_slicer_fragment() {
    let ir = QueryIr::new()
        .with_row(["d_region"])
        .with_cond(Condition::eq("t_year", "2023"));
    let plan = MdxPlanner::new(&index())
        .with_date_placement(DatePlacement::Resolver)
        .plan(&ir)
        .unwrap();

    assert_eq!(rendered(&plan.slicer), vec!["{[Date].[Year].[2023]}"]);
    assert_eq!(rendered(&plan.rows), vec!["[Region].[Region].Members"]);
}

#[test]
fn test_resolver_policy_keeps_axis_fragment_on_rows() {
    let ir = QueryIr::new()
        .with_row(["t_year"])
        .with_cond(Condition::eq("t_year", "2023"));
    let plan = MdxPlanner::new(&index())
        .with_date_placement(DatePlacement::Resolver)
        .plan(&ir)
        .unwrap();

    assert!(plan.slicer.is_empty());
    assert_eq!(rendered(&plan.rows), vec!["{[Date].[Year].[2023]}"]);
    assert_eq!(plan.date_placement, Some(Placement::Axis));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_condition_identifier() {
    let ir = QueryIr::new().with_cond(Condition::eq("d_missing", "x"));
    let err = build_axes(&index(), &ir, DatePlacement::Rows).unwrap_err();
    assert_eq!(
        err,
        PlanError::UnknownIdentifier {
            id: "d_missing".into()
        }
    );
}

#[test]
fn test_unknown_axis_identifier() {
    let ir = QueryIr::new().with_col(["d_missing"]);
    let err = build_axes(&index(), &ir, DatePlacement::Rows).unwrap_err();
    assert!(matches!(err, PlanError::UnknownIdentifier { .. }));
}

#[test]
fn test_comparison_on_non_time_dimension() {
    let ir = QueryIr::new().with_cond(Condition::compare("d_region", Operator::Gt, "N"));
    let err = build_axes(&index(), &ir, DatePlacement::Rows).unwrap_err();
    assert_eq!(
        err,
        PlanError::ComparisonOnNonTime {
            id: "d_region".into(),
            op: Operator::Gt,
        }
    );
    assert_eq!(
        err.to_string(),
        "Comparison '>' on 'd_region' requires a time dimension"
    );
}

#[test]
fn test_empty_member_list_on_dimension() {
    let ir = QueryIr::new().with_cond(Condition::one_of("d_region", Vec::<&str>::new()));
    let err = build_axes(&index(), &ir, DatePlacement::Rows).unwrap_err();
    assert!(matches!(err, PlanError::EmptyMemberList { ref id } if id == "d_region"));
}
